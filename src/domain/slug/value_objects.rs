// src/domain/slug/value_objects.rs
use crate::domain::errors::{DomainError, DomainResult};
use serde::Deserialize;
use std::fmt;

/// Placeholder written in place of the record id under [`ConflictPolicy::AppendId`].
///
/// `+` is never kept by normalization and cannot be a separator, so the token
/// cannot be produced from a title.
pub const DEFERRED_MARKER: &str = "+ID+";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId(pub i64);

impl From<RecordId> for i64 {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A slug value that is allowed to reach storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slug(String);

impl Slug {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::Validation("slug cannot be empty".into()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part before a trailing deferred marker, if the slug still waits
    /// for its record id.
    pub fn deferred_base(&self, separator: SubstitutionChar) -> Option<&str> {
        self.0.strip_suffix(&deferred_suffix(separator))
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

/// `separator + DEFERRED_MARKER`, the suffix the after-insert pass looks for.
pub fn deferred_suffix(separator: SubstitutionChar) -> String {
    format!("{separator}{DEFERRED_MARKER}")
}

/// Character joining words and suffix blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubstitutionChar(char);

impl SubstitutionChar {
    pub fn new(value: char) -> DomainResult<Self> {
        if !value.is_ascii_punctuation() {
            return Err(DomainError::Validation(format!(
                "substitution char must be ascii punctuation, got {value:?}"
            )));
        }
        if DEFERRED_MARKER.contains(value) {
            return Err(DomainError::Validation(format!(
                "substitution char {value:?} is reserved for the deferred id marker"
            )));
        }
        Ok(Self(value))
    }

    pub fn as_char(self) -> char {
        self.0
    }
}

impl Default for SubstitutionChar {
    fn default() -> Self {
        Self('-')
    }
}

impl fmt::Display for SubstitutionChar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<char> for SubstitutionChar {
    type Error = DomainError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for SubstitutionChar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = char::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

/// What happens when a candidate slug is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Append `separator + [a-z0-9]{3}` until the candidate is free.
    #[default]
    RandomSuffix,
    /// Append `separator + DEFERRED_MARKER`, substituted with the id after insert.
    AppendId,
    /// Leave the slug as is; the storage uniqueness constraint rejects the save.
    Error,
}

impl ConflictPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RandomSuffix => "random_suffix",
            Self::AppendId => "append_id",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ConflictPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random_suffix" | "concat_random_chars" => Ok(Self::RandomSuffix),
            "append_id" => Ok(Self::AppendId),
            "error" => Ok(Self::Error),
            other => Err(DomainError::Validation(format!(
                "unknown conflict policy: {other}"
            ))),
        }
    }
}

/// Source field(s) a slug is derived from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TitleFields {
    Single(String),
    Many(Vec<String>),
}

impl TitleFields {
    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::Single(name) => vec![name.as_str()],
            Self::Many(names) => names.iter().map(String::as_str).collect(),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::Many(_))
    }
}

impl Default for TitleFields {
    fn default() -> Self {
        Self::Single("title".into())
    }
}

impl From<&str> for TitleFields {
    fn from(value: &str) -> Self {
        Self::Single(value.into())
    }
}

impl From<Vec<&str>> for TitleFields {
    fn from(value: Vec<&str>) -> Self {
        Self::Many(value.into_iter().map(String::from).collect())
    }
}
