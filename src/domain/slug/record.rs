// src/domain/slug/record.rs
use std::borrow::Cow;
use std::fmt;

use crate::domain::slug::normalizer::sanitize_encoding;
use crate::domain::slug::value_objects::RecordId;

/// A field value as the host persistence layer hands it over.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    #[default]
    Null,
    Text(String),
    Bytes(Vec<u8>),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl FieldValue {
    /// Coerce to text. Byte values are sanitized, never rejected.
    pub fn to_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Null => None,
            Self::Text(value) => Some(Cow::Borrowed(value.as_str())),
            Self::Bytes(bytes) => Some(Cow::Owned(sanitize_encoding(bytes))),
            Self::Integer(value) => Some(Cow::Owned(value.to_string())),
            Self::Float(value) => Some(Cow::Owned(value.to_string())),
            Self::Boolean(value) => Some(Cow::Owned(value.to_string())),
        }
    }

    /// Null, or text that is empty after trimming whitespace.
    pub fn is_blank(&self) -> bool {
        self.to_text().is_none_or(|text| text.trim().is_empty())
    }

    pub fn is_present(&self) -> bool {
        !self.is_blank()
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_text() {
            Some(text) => f.write_str(&text),
            None => f.write_str("NULL"),
        }
    }
}

/// The value of a field as loaded from storage next to its current value.
///
/// For a record that was never persisted, `loaded` is whatever the record was
/// constructed with (usually `Null`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldState {
    pub loaded: FieldValue,
    pub current: FieldValue,
}

impl FieldState {
    pub fn new(loaded: FieldValue, current: FieldValue) -> Self {
        Self { loaded, current }
    }

    pub fn unchanged(value: FieldValue) -> Self {
        Self {
            loaded: value.clone(),
            current: value,
        }
    }

    pub fn is_changed(&self) -> bool {
        self.loaded != self.current
    }

    pub fn is_present(&self) -> bool {
        self.current.is_present()
    }

    pub fn is_blank(&self) -> bool {
        self.current.is_blank()
    }
}

/// Field access the slug lifecycle needs from a host record.
pub trait SluggableRecord {
    /// Current value of `name`; `Null` for unknown fields.
    fn read_field(&self, name: &str) -> FieldValue;

    /// Value of `name` as of load (or construction, for new records).
    fn loaded_field(&self, name: &str) -> FieldValue;

    fn write_field(&mut self, name: &str, value: FieldValue);

    /// Identifier, known once the record has been inserted.
    fn id(&self) -> Option<RecordId>;

    fn field_state(&self, name: &str) -> FieldState {
        FieldState::new(self.loaded_field(name), self.read_field(name))
    }
}

/// Type-level metadata checked once when slug options are registered.
pub trait RecordSchema {
    fn type_name(&self) -> &str;

    fn has_field(&self, name: &str) -> bool;
}
