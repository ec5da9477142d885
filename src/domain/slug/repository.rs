// src/domain/slug/repository.rs
use crate::domain::errors::DomainResult;
use crate::domain::slug::record::FieldValue;
use crate::domain::slug::value_objects::{RecordId, Slug};
use async_trait::async_trait;

/// "Does any other record already hold this slug?"
#[derive(Debug, Clone, PartialEq)]
pub struct SlugQuery {
    pub slug_field: String,
    pub candidate: String,
    /// Field equality constraints narrowing the search; empty means global.
    pub scope: Vec<(String, FieldValue)>,
    /// The record being saved, excluded from the search once it has an id.
    pub exclude: Option<RecordId>,
}

impl SlugQuery {
    pub fn new(slug_field: impl Into<String>, candidate: impl Into<String>) -> Self {
        Self {
            slug_field: slug_field.into(),
            candidate: candidate.into(),
            scope: Vec::new(),
            exclude: None,
        }
    }

    pub fn with_scope(mut self, field: impl Into<String>, value: FieldValue) -> Self {
        self.scope.push((field.into(), value));
        self
    }

    pub fn excluding(mut self, id: Option<RecordId>) -> Self {
        self.exclude = id;
        self
    }

    /// Same constraints, different candidate.
    pub fn with_candidate(&self, candidate: impl Into<String>) -> Self {
        Self {
            candidate: candidate.into(),
            ..self.clone()
        }
    }
}

#[async_trait]
pub trait SlugLookup: Send + Sync {
    async fn slug_taken(&self, query: &SlugQuery) -> DomainResult<bool>;
}

#[async_trait]
pub trait SlugWriteRepository: Send + Sync {
    async fn update_slug(&self, slug_field: &str, id: RecordId, slug: &Slug) -> DomainResult<()>;
}
