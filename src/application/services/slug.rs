// src/application/services/slug.rs
use std::sync::Arc;

use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        ports::{SuffixSourcePort, TransliteratorPort},
    },
    domain::slug::{
        ConflictResolver, FieldState, FieldValue, Normalizer, Resolution, SaveEvent, Slug,
        SlugLookup, SlugOptions, SlugQuery, SlugWriteRepository, SluggableRecord,
        should_regenerate,
    },
};

/// Current value(s) of the configured title field(s).
#[derive(Debug, Clone, PartialEq)]
pub enum TitleSource {
    Single(FieldValue),
    Many(Vec<FieldValue>),
}

impl TitleSource {
    pub fn is_present(&self) -> bool {
        match self {
            Self::Single(value) => value.is_present(),
            Self::Many(values) => values.iter().any(FieldValue::is_present),
        }
    }

    /// Text fed to the normalizer; list values are joined by one space.
    pub fn text(&self) -> String {
        match self {
            Self::Single(value) => value
                .to_text()
                .map(std::borrow::Cow::into_owned)
                .unwrap_or_default(),
            Self::Many(values) => values
                .iter()
                .filter_map(FieldValue::to_text)
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

/// What a before-save hook did to the slug field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlugOutcome {
    /// Regeneration was not needed (or not possible); the field is untouched.
    Skipped,
    /// Written without a uniqueness check.
    Generated(String),
    /// Written after conflict resolution.
    Resolved(Resolution),
}

impl SlugOutcome {
    pub fn slug(&self) -> Option<&str> {
        match self {
            Self::Skipped => None,
            Self::Generated(slug) => Some(slug),
            Self::Resolved(resolution) => Some(resolution.slug()),
        }
    }
}

/// Wires slug derivation into a record's save lifecycle.
pub struct SlugService {
    options: Arc<SlugOptions>,
    lookup: Arc<dyn SlugLookup>,
    writer: Arc<dyn SlugWriteRepository>,
    transliterator: Arc<TransliteratorPort>,
    suffixes: Arc<SuffixSourcePort>,
}

impl SlugService {
    pub fn new(
        options: Arc<SlugOptions>,
        lookup: Arc<dyn SlugLookup>,
        writer: Arc<dyn SlugWriteRepository>,
        transliterator: Arc<TransliteratorPort>,
        suffixes: Arc<SuffixSourcePort>,
    ) -> Self {
        Self {
            options,
            lookup,
            writer,
            transliterator,
            suffixes,
        }
    }

    pub fn title_source<R>(&self, record: &R) -> TitleSource
    where
        R: SluggableRecord + ?Sized,
    {
        let names = self.options.title_fields().names();
        if self.options.title_fields().is_list() {
            TitleSource::Many(names.into_iter().map(|n| record.read_field(n)).collect())
        } else {
            TitleSource::Single(
                names
                    .first()
                    .map(|n| record.read_field(n))
                    .unwrap_or_default(),
            )
        }
    }

    pub fn normalize(&self, source: &str) -> String {
        Normalizer::new(&self.options, self.transliterator.as_ref()).normalize(source)
    }

    /// Hook for the host's before-insert point.
    pub async fn before_insert<R>(&self, record: &mut R) -> ApplicationResult<SlugOutcome>
    where
        R: SluggableRecord + ?Sized,
    {
        self.permalize(SaveEvent::Create, record).await
    }

    /// Hook for the host's before-update point.
    pub async fn before_update<R>(&self, record: &mut R) -> ApplicationResult<SlugOutcome>
    where
        R: SluggableRecord + ?Sized,
    {
        self.permalize(SaveEvent::Update, record).await
    }

    /// Hook for the host's after-insert point: swap a trailing deferred marker
    /// for the record id and persist the result. No-op without a marker.
    pub async fn after_insert<R>(&self, record: &mut R) -> ApplicationResult<Option<Slug>>
    where
        R: SluggableRecord + ?Sized,
    {
        let slug_field = self.options.slug_field();
        let separator = self.options.substitution_char();
        let Some(current) = record
            .read_field(slug_field)
            .to_text()
            .and_then(|text| Slug::new(text).ok())
        else {
            return Ok(None);
        };
        let Some(base) = current.deferred_base(separator) else {
            return Ok(None);
        };

        let id = record.id().ok_or_else(|| {
            ApplicationError::validation("record has no identifier after insert")
        })?;
        let slug = Slug::new(format!("{base}{separator}{id}"))?;

        self.writer.update_slug(slug_field, id, &slug).await?;
        record.write_field(slug_field, FieldValue::Text(slug.as_str().to_owned()));
        tracing::info!(%id, slug = %slug, "deferred slug marker replaced with record id");
        Ok(Some(slug))
    }

    async fn permalize<R>(&self, event: SaveEvent, record: &mut R) -> ApplicationResult<SlugOutcome>
    where
        R: SluggableRecord + ?Sized,
    {
        let slug_field = self.options.slug_field();
        let slug_state = record.field_state(slug_field);
        let title = self.title_source(record);

        if !should_regenerate(event, &slug_state, title.is_present()) {
            tracing::debug!(?event, slug_field, "slug regeneration skipped");
            return Ok(SlugOutcome::Skipped);
        }

        let candidate = self.normalize(&source_text(&title, &slug_state));

        let outcome = if self.options.require_uniqueness() && !candidate.is_empty() {
            let query = self.collision_query(record, candidate);
            let resolver =
                ConflictResolver::new(&self.options, self.lookup.as_ref(), self.suffixes.as_ref());
            SlugOutcome::Resolved(resolver.resolve(&query).await?)
        } else {
            SlugOutcome::Generated(candidate)
        };

        let slug = outcome.slug().unwrap_or_default().to_owned();
        record.write_field(slug_field, FieldValue::Text(slug));
        Ok(outcome)
    }

    fn collision_query<R>(&self, record: &R, candidate: String) -> SlugQuery
    where
        R: SluggableRecord + ?Sized,
    {
        self.options
            .uniqueness_scope()
            .iter()
            .fold(
                SlugQuery::new(self.options.slug_field(), candidate),
                |query, field| query.with_scope(field.as_str(), record.read_field(field)),
            )
            .excluding(record.id())
    }
}

/// A single-field title yields to a slug the caller just edited.
fn source_text(title: &TitleSource, slug_state: &FieldState) -> String {
    match title {
        TitleSource::Single(_) if slug_state.is_changed() && slug_state.is_present() => {
            slug_state.current.to_string()
        }
        _ => title.text(),
    }
}
