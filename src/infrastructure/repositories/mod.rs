// src/infrastructure/repositories/mod.rs
pub mod error;
mod sqlite_slug;

pub use sqlite_slug::{SqlIdentifier, SqliteSlugRepository};
