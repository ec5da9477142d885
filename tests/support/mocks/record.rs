// tests/support/mocks/record.rs
use std::collections::HashMap;

use slugline::domain::slug::{FieldValue, RecordId, SluggableRecord};

/// メモリ上のレコード（ロード時の値と現在値を保持）
#[derive(Debug, Clone, Default)]
pub struct MemoryRecord {
    id: Option<RecordId>,
    loaded: HashMap<String, FieldValue>,
    current: HashMap<String, FieldValue>,
}

impl MemoryRecord {
    /// 未保存の新規レコード
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field on the current values only, as a caller editing the record would.
    pub fn set(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.current.insert(name.to_string(), value.into());
        self
    }

    pub fn assign(&mut self, name: &str, value: impl Into<FieldValue>) {
        self.current.insert(name.to_string(), value.into());
    }

    /// 保存済みとしてマークする（現在値をロード時の値にコピー）
    pub fn mark_persisted(&mut self, id: RecordId) {
        self.id = Some(id);
        self.loaded = self.current.clone();
    }

    pub fn fields(&self) -> &HashMap<String, FieldValue> {
        &self.current
    }

    pub fn slug(&self) -> FieldValue {
        self.read_field("slug")
    }
}

impl SluggableRecord for MemoryRecord {
    fn read_field(&self, name: &str) -> FieldValue {
        self.current.get(name).cloned().unwrap_or_default()
    }

    fn loaded_field(&self, name: &str) -> FieldValue {
        self.loaded.get(name).cloned().unwrap_or_default()
    }

    fn write_field(&mut self, name: &str, value: FieldValue) {
        self.current.insert(name.to_string(), value);
    }

    fn id(&self) -> Option<RecordId> {
        self.id
    }
}
