pub mod change;
pub mod normalizer;
pub mod options;
pub mod record;
pub mod repository;
pub mod resolver;
pub mod value_objects;

pub use change::{SaveEvent, should_regenerate};
pub use normalizer::Normalizer;
pub use options::{SlugOptions, SlugOptionsBuilder};
pub use record::{FieldState, FieldValue, RecordSchema, SluggableRecord};
pub use repository::{SlugLookup, SlugQuery, SlugWriteRepository};
pub use resolver::{ConflictResolver, Resolution};
pub use value_objects::{ConflictPolicy, DEFERRED_MARKER, RecordId, Slug, SubstitutionChar, TitleFields};
