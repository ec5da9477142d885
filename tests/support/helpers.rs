// tests/support/helpers.rs
use std::sync::Arc;

use slugline::application::ApplicationResult;
use slugline::application::ports::util::SuffixSource;
use slugline::application::services::{SlugOutcome, SlugService};
use slugline::domain::slug::{SlugLookup, SlugOptions, SlugWriteRepository, SluggableRecord};
use slugline::infrastructure::random::ThreadRngSuffix;
use slugline::infrastructure::transliteration::DeunicodeTransliterator;

use super::mocks::{InMemoryStore, MemoryRecord, TEST_SCHEMA};

pub fn build_service(
    options: SlugOptions,
    store: &Arc<InMemoryStore>,
    suffixes: Arc<dyn SuffixSource>,
) -> SlugService {
    let options = options.register(&TEST_SCHEMA).expect("options fit test schema");
    let lookup: Arc<dyn SlugLookup> = store.clone();
    let writer: Arc<dyn SlugWriteRepository> = store.clone();
    SlugService::new(
        Arc::new(options),
        lookup,
        writer,
        Arc::new(DeunicodeTransliterator),
        suffixes,
    )
}

pub fn build_random_service(options: SlugOptions, store: &Arc<InMemoryStore>) -> SlugService {
    build_service(options, store, Arc::new(ThreadRngSuffix))
}

/// Full create lifecycle: before-insert hook, insert, after-insert hook.
pub async fn create(
    service: &SlugService,
    store: &InMemoryStore,
    record: &mut MemoryRecord,
) -> ApplicationResult<SlugOutcome> {
    let outcome = service.before_insert(record).await?;
    store.insert(record)?;
    service.after_insert(record).await?;
    Ok(outcome)
}

/// Full update lifecycle: before-update hook, update.
pub async fn update(
    service: &SlugService,
    store: &InMemoryStore,
    record: &mut MemoryRecord,
) -> ApplicationResult<SlugOutcome> {
    let outcome = service.before_update(record).await?;
    store.update(record)?;
    Ok(outcome)
}

pub fn slug_text(record: &MemoryRecord) -> String {
    record.read_field("slug").to_string()
}
