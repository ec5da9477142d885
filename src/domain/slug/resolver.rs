// src/domain/slug/resolver.rs
use crate::application::ports::util::SuffixSource;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::options::SlugOptions;
use crate::domain::slug::repository::{SlugLookup, SlugQuery};
use crate::domain::slug::value_objects::{ConflictPolicy, deferred_suffix};

/// Characters a random suffix block is drawn from.
pub const SUFFIX_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
pub const SUFFIX_LEN: usize = 3;

/// Terminal outcome of conflict resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No other record holds the slug.
    Accepted(String),
    /// Slug carries the deferred marker; the id is substituted after insert.
    /// Only produced for records that have no id yet.
    Deferred(String),
    /// Slug collides and is left for the storage uniqueness check to reject.
    Rejected(String),
}

impl Resolution {
    pub fn slug(&self) -> &str {
        match self {
            Self::Accepted(slug) | Self::Deferred(slug) | Self::Rejected(slug) => slug,
        }
    }
}

#[derive(Debug)]
enum ResolverState {
    Proposed(String),
    Checking(String),
    Retrying(String),
    Done(Resolution),
}

/// Drives a candidate through collision checks until a policy settles it.
pub struct ConflictResolver<'a> {
    options: &'a SlugOptions,
    lookup: &'a dyn SlugLookup,
    suffixes: &'a dyn SuffixSource,
}

impl<'a> ConflictResolver<'a> {
    pub fn new(
        options: &'a SlugOptions,
        lookup: &'a dyn SlugLookup,
        suffixes: &'a dyn SuffixSource,
    ) -> Self {
        Self {
            options,
            lookup,
            suffixes,
        }
    }

    /// Resolve `query.candidate` within the constraints carried by `query`.
    pub async fn resolve(&self, query: &SlugQuery) -> DomainResult<Resolution> {
        let separator = self.options.substitution_char();
        let max_attempts = self.options.max_attempts();
        let mut attempts = 0u32;
        let mut state = ResolverState::Proposed(query.candidate.clone());

        loop {
            state = match state {
                ResolverState::Proposed(candidate) => ResolverState::Checking(candidate),
                ResolverState::Checking(candidate) => {
                    attempts += 1;
                    if self.lookup.slug_taken(&query.with_candidate(&candidate)).await? {
                        self.on_collision(candidate, query)
                    } else {
                        tracing::debug!(slug = %candidate, attempts, "slug accepted");
                        ResolverState::Done(Resolution::Accepted(candidate))
                    }
                }
                ResolverState::Retrying(candidate) => {
                    if attempts >= max_attempts {
                        tracing::warn!(slug = %candidate, attempts, "random suffix retries exhausted");
                        return Err(DomainError::Conflict(format!(
                            "no free slug found for {candidate} after {attempts} attempts"
                        )));
                    }
                    let suffix = self.suffixes.suffix(SUFFIX_LEN);
                    let next = format!("{candidate}{separator}{suffix}");
                    tracing::debug!(taken = %candidate, next = %next, "slug taken, retrying");
                    ResolverState::Checking(next)
                }
                ResolverState::Done(resolution) => return Ok(resolution),
            };
        }
    }

    fn on_collision(&self, candidate: String, query: &SlugQuery) -> ResolverState {
        match self.options.conflict_policy() {
            ConflictPolicy::RandomSuffix => ResolverState::Retrying(candidate),
            ConflictPolicy::AppendId => {
                let separator = self.options.substitution_char();
                match query.exclude {
                    Some(id) => {
                        let slug = format!("{candidate}{separator}{id}");
                        tracing::debug!(slug = %slug, "slug taken, appending record id");
                        ResolverState::Done(Resolution::Accepted(slug))
                    }
                    None => {
                        let deferred = format!("{candidate}{}", deferred_suffix(separator));
                        tracing::debug!(slug = %deferred, "slug taken, deferring to record id");
                        ResolverState::Done(Resolution::Deferred(deferred))
                    }
                }
            }
            ConflictPolicy::Error => {
                tracing::warn!(slug = %candidate, "slug taken, leaving it to the uniqueness constraint");
                ResolverState::Done(Resolution::Rejected(candidate))
            }
        }
    }
}
