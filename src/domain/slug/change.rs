// src/domain/slug/change.rs
use crate::domain::slug::record::FieldState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveEvent {
    Create,
    Update,
}

/// Decide whether a save should derive a fresh slug.
///
/// Updates are triggered by the slug field (blank or edited), never by a title
/// edit alone, so a curated slug survives unrelated title changes.
pub fn should_regenerate(event: SaveEvent, slug: &FieldState, title_present: bool) -> bool {
    if event == SaveEvent::Update && !(slug.is_blank() || slug.is_changed()) {
        return false;
    }
    if slug.is_present() && !slug.is_changed() {
        return false;
    }
    title_present
}
