// tests/support/mocks/util.rs
use std::collections::VecDeque;
use std::sync::Mutex;

use slugline::application::ports::util::SuffixSource;
use slugline::domain::slug::RecordSchema;

/// 決められた順番でサフィックスを返すダミー
pub struct ScriptedSuffix(Mutex<VecDeque<String>>);

impl ScriptedSuffix {
    pub fn new(suffixes: &[&str]) -> Self {
        Self(Mutex::new(suffixes.iter().map(|s| (*s).to_string()).collect()))
    }
}

impl SuffixSource for ScriptedSuffix {
    fn suffix(&self, len: usize) -> String {
        let next = self
            .0
            .lock()
            .unwrap()
            .pop_front()
            .expect("scripted suffixes exhausted");
        assert_eq!(next.len(), len);
        next
    }
}

/// Schema of the record type used across the integration tests.
pub struct TestSchema(&'static [&'static str]);

pub const TEST_SCHEMA: TestSchema =
    TestSchema(&["id", "title", "first_name", "last_name", "year", "slug", "site_id"]);

impl RecordSchema for TestSchema {
    fn type_name(&self) -> &str {
        "Post"
    }

    fn has_field(&self, name: &str) -> bool {
        self.0.contains(&name)
    }
}
