// tests/support/mocks/store.rs
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use slugline::domain::errors::{DomainError, DomainResult};
use slugline::domain::slug::{
    FieldValue, RecordId, Slug, SlugLookup, SlugQuery, SlugWriteRepository, SluggableRecord,
};

use super::record::MemoryRecord;

type Row = HashMap<String, FieldValue>;

#[derive(Default)]
struct Rows {
    next_id: i64,
    rows: BTreeMap<i64, Row>,
}

/// インメモリの永続化層（presence / uniqueness 制約を模倣）
#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<Rows>,
    unique_scope: Option<Vec<String>>,
    checks: Mutex<Vec<SlugQuery>>,
}

impl InMemoryStore {
    /// No storage-level uniqueness constraint on the slug.
    pub fn new() -> Self {
        Self::default()
    }

    /// Unique index over the slug plus the given scope fields.
    pub fn with_unique_slug(scope: &[&str]) -> Self {
        Self {
            unique_scope: Some(scope.iter().map(|s| (*s).to_string()).collect()),
            ..Self::default()
        }
    }

    /// 既存レコードを直接投入する
    pub fn seed(&self, fields: &[(&str, FieldValue)]) -> RecordId {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let id = inner.next_id;
        let row = fields
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect();
        inner.rows.insert(id, row);
        RecordId(id)
    }

    pub fn insert(&self, record: &mut MemoryRecord) -> DomainResult<RecordId> {
        let mut inner = self.inner.lock().unwrap();
        self.check_constraints(&inner, record.fields(), None)?;
        inner.next_id += 1;
        let id = RecordId(inner.next_id);
        inner.rows.insert(id.0, record.fields().clone());
        record.mark_persisted(id);
        Ok(id)
    }

    pub fn update(&self, record: &mut MemoryRecord) -> DomainResult<()> {
        let id = record
            .id()
            .ok_or_else(|| DomainError::NotFound("record was never inserted".into()))?;
        let mut inner = self.inner.lock().unwrap();
        self.check_constraints(&inner, record.fields(), Some(id))?;
        inner.rows.insert(id.0, record.fields().clone());
        record.mark_persisted(id);
        Ok(())
    }

    pub fn slug_of(&self, id: RecordId) -> FieldValue {
        let inner = self.inner.lock().unwrap();
        inner
            .rows
            .get(&id.0)
            .and_then(|row| row.get("slug").cloned())
            .unwrap_or_default()
    }

    pub fn slugs(&self) -> Vec<String> {
        let inner = self.inner.lock().unwrap();
        inner
            .rows
            .values()
            .filter_map(|row| row.get("slug").map(ToString::to_string))
            .collect()
    }

    pub fn checks(&self) -> Vec<SlugQuery> {
        self.checks.lock().unwrap().clone()
    }

    fn check_constraints(&self, inner: &Rows, fields: &Row, id: Option<RecordId>) -> DomainResult<()> {
        let slug = fields.get("slug").cloned().unwrap_or_default();
        if slug.is_blank() {
            return Err(DomainError::Validation("slug can't be blank".into()));
        }
        let Some(scope) = &self.unique_scope else {
            return Ok(());
        };
        let clash = inner.rows.iter().any(|(row_id, row)| {
            Some(RecordId(*row_id)) != id
                && row.get("slug") == Some(&slug)
                && scope.iter().all(|f| row.get(f) == fields.get(f))
        });
        if clash {
            return Err(DomainError::Conflict("slug has already been taken".into()));
        }
        Ok(())
    }
}

fn row_matches(id: i64, row: &Row, query: &SlugQuery) -> bool {
    let slug_matches = row
        .get(&query.slug_field)
        .and_then(FieldValue::to_text)
        .is_some_and(|slug| slug == query.candidate);
    let scope_matches = query
        .scope
        .iter()
        .all(|(field, value)| row.get(field).cloned().unwrap_or_default() == *value);
    slug_matches && scope_matches && query.exclude != Some(RecordId(id))
}

#[async_trait]
impl SlugLookup for InMemoryStore {
    async fn slug_taken(&self, query: &SlugQuery) -> DomainResult<bool> {
        self.checks.lock().unwrap().push(query.clone());
        let inner = self.inner.lock().unwrap();
        Ok(inner.rows.iter().any(|(id, row)| row_matches(*id, row, query)))
    }
}

#[async_trait]
impl SlugWriteRepository for InMemoryStore {
    async fn update_slug(&self, slug_field: &str, id: RecordId, slug: &Slug) -> DomainResult<()> {
        let mut inner = self.inner.lock().unwrap();
        let row = inner
            .rows
            .get_mut(&id.0)
            .ok_or_else(|| DomainError::NotFound(format!("row {id} not found")))?;
        row.insert(slug_field.to_string(), FieldValue::from(slug.as_str()));
        Ok(())
    }
}
