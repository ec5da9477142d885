// src/domain/slug/options.rs
use serde::Deserialize;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::record::RecordSchema;
use crate::domain::slug::value_objects::{ConflictPolicy, SubstitutionChar, TitleFields};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 100;

/// Resolved slug configuration for one record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugOptions {
    title_fields: TitleFields,
    slug_field: String,
    substitution_char: SubstitutionChar,
    downcase: bool,
    max_length: Option<usize>,
    conflict_policy: ConflictPolicy,
    uniqueness_scope: Vec<String>,
    require_uniqueness: bool,
    max_attempts: u32,
}

impl SlugOptions {
    pub fn builder() -> SlugOptionsBuilder {
        SlugOptionsBuilder::default()
    }

    /// Check the options against the record type they are attached to.
    ///
    /// Runs once at setup; a missing slug field is fatal.
    pub fn register(self, schema: &dyn RecordSchema) -> DomainResult<Self> {
        if !schema.has_field(&self.slug_field) {
            return Err(DomainError::Configuration(format!(
                "{} is missing required {} field",
                schema.type_name(),
                self.slug_field
            )));
        }
        if let Some(missing) = self
            .uniqueness_scope
            .iter()
            .find(|field| !schema.has_field(field))
        {
            return Err(DomainError::Configuration(format!(
                "{} is missing scope field {missing}",
                schema.type_name()
            )));
        }
        tracing::debug!(
            record_type = schema.type_name(),
            slug_field = %self.slug_field,
            policy = %self.conflict_policy,
            "slug options registered"
        );
        Ok(self)
    }

    pub fn title_fields(&self) -> &TitleFields {
        &self.title_fields
    }

    pub fn slug_field(&self) -> &str {
        &self.slug_field
    }

    pub fn substitution_char(&self) -> SubstitutionChar {
        self.substitution_char
    }

    pub fn downcase(&self) -> bool {
        self.downcase
    }

    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    pub fn conflict_policy(&self) -> ConflictPolicy {
        self.conflict_policy
    }

    pub fn uniqueness_scope(&self) -> &[String] {
        &self.uniqueness_scope
    }

    /// A scope always implies uniqueness within that scope.
    pub fn require_uniqueness(&self) -> bool {
        self.require_uniqueness || !self.uniqueness_scope.is_empty()
    }

    /// Upper bound on random-suffix collision checks.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

impl Default for SlugOptions {
    fn default() -> Self {
        Self {
            title_fields: TitleFields::default(),
            slug_field: "slug".into(),
            substitution_char: SubstitutionChar::default(),
            downcase: true,
            max_length: None,
            conflict_policy: ConflictPolicy::default(),
            uniqueness_scope: Vec::new(),
            require_uniqueness: false,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Builder for [`SlugOptions`]; also the deserialization target for options
/// loaded from a config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlugOptionsBuilder {
    title_fields: Option<TitleFields>,
    slug_field: Option<String>,
    substitution_char: Option<SubstitutionChar>,
    downcase: Option<bool>,
    max_length: Option<usize>,
    conflict_policy: Option<ConflictPolicy>,
    uniqueness_scope: Vec<String>,
    require_uniqueness: Option<bool>,
    max_attempts: Option<u32>,
}

impl SlugOptionsBuilder {
    pub fn title_fields(mut self, fields: impl Into<TitleFields>) -> Self {
        self.title_fields = Some(fields.into());
        self
    }

    pub fn slug_field(mut self, field: impl Into<String>) -> Self {
        self.slug_field = Some(field.into());
        self
    }

    pub fn substitution_char(mut self, value: SubstitutionChar) -> Self {
        self.substitution_char = Some(value);
        self
    }

    pub fn downcase(mut self, downcase: bool) -> Self {
        self.downcase = Some(downcase);
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.conflict_policy = Some(policy);
        self
    }

    pub fn scope_field(mut self, field: impl Into<String>) -> Self {
        self.uniqueness_scope.push(field.into());
        self
    }

    pub fn require_uniqueness(mut self, required: bool) -> Self {
        self.require_uniqueness = Some(required);
        self
    }

    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    pub fn build(self) -> DomainResult<SlugOptions> {
        let defaults = SlugOptions::default();

        let title_fields = self.title_fields.unwrap_or(defaults.title_fields);
        let names = title_fields.names();
        if names.is_empty() {
            return Err(DomainError::Configuration(
                "at least one title field is required".into(),
            ));
        }
        if names.iter().any(|name| name.trim().is_empty()) {
            return Err(DomainError::Configuration(
                "title field names cannot be empty".into(),
            ));
        }

        let slug_field = self.slug_field.unwrap_or(defaults.slug_field);
        if slug_field.trim().is_empty() {
            return Err(DomainError::Configuration(
                "slug field name cannot be empty".into(),
            ));
        }

        if self.max_length == Some(0) {
            return Err(DomainError::Configuration(
                "max_length must be greater than zero".into(),
            ));
        }

        let max_attempts = self.max_attempts.unwrap_or(defaults.max_attempts);
        if max_attempts == 0 {
            return Err(DomainError::Configuration(
                "max_attempts must be greater than zero".into(),
            ));
        }

        if self.uniqueness_scope.iter().any(|f| f.trim().is_empty()) {
            return Err(DomainError::Configuration(
                "scope field names cannot be empty".into(),
            ));
        }

        Ok(SlugOptions {
            title_fields,
            slug_field,
            substitution_char: self.substitution_char.unwrap_or(defaults.substitution_char),
            downcase: self.downcase.unwrap_or(defaults.downcase),
            max_length: self.max_length,
            conflict_policy: self.conflict_policy.unwrap_or(defaults.conflict_policy),
            uniqueness_scope: self.uniqueness_scope,
            require_uniqueness: self.require_uniqueness.unwrap_or(defaults.require_uniqueness),
            max_attempts,
        })
    }
}
