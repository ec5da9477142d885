// src/application/ports/util.rs
/// Folds arbitrary text into ASCII before slug shaping.
pub trait Transliterator: Send + Sync {
    fn transliterate(&self, input: &str) -> String;
}

/// Produces the random block appended on slug collisions.
pub trait SuffixSource: Send + Sync {
    /// `len` characters drawn from `SUFFIX_ALPHABET`.
    fn suffix(&self, len: usize) -> String;
}
