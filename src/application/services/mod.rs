// src/application/services/mod.rs
pub mod slug;

pub use slug::{SlugOutcome, SlugService, TitleSource};
