// tests/support/mocks/mod.rs
//! テストサポートモック再エクスポートモジュール
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod record;
pub mod store;
pub mod util;

pub use record::MemoryRecord;
pub use store::InMemoryStore;
pub use util::{ScriptedSuffix, TEST_SCHEMA};
