// src/domain/slug/normalizer.rs
use crate::application::ports::util::Transliterator;
use crate::domain::slug::options::SlugOptions;
use crate::domain::slug::value_objects::SubstitutionChar;

const REPLACEMENT: char = '?';

/// Turns raw title text into a slug candidate. Total: never fails.
pub struct Normalizer<'a> {
    options: &'a SlugOptions,
    transliterator: &'a dyn Transliterator,
}

impl<'a> Normalizer<'a> {
    pub fn new(options: &'a SlugOptions, transliterator: &'a dyn Transliterator) -> Self {
        Self {
            options,
            transliterator,
        }
    }

    pub fn normalize(&self, source: &str) -> String {
        let sanitized = sanitize_text(source);
        let ascii = self.transliterator.transliterate(&sanitized);
        let separator = self.options.substitution_char();
        let slug = to_slug_form(&ascii, separator, self.options.downcase());
        match self.options.max_length() {
            Some(max_length) => truncate(&slug, max_length, separator),
            None => slug,
        }
    }
}

/// Decode bytes as UTF-8, replacing every invalid sequence with `?`.
pub fn sanitize_encoding(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(&sanitize_text(chunk.valid()));
        if !chunk.invalid().is_empty() {
            out.push(REPLACEMENT);
        }
    }
    out
}

/// Replace code points that have no mapping (replacement char, noncharacters) with `?`.
pub fn sanitize_text(input: &str) -> String {
    input
        .chars()
        .map(|c| if is_unmappable(c) { REPLACEMENT } else { c })
        .collect()
}

fn is_unmappable(c: char) -> bool {
    let code = u32::from(c);
    c == char::REPLACEMENT_CHARACTER
        || (0xFDD0..=0xFDEF).contains(&code)
        || (code & 0xFFFE) == 0xFFFE
}

/// Keep ASCII alphanumerics, turn every other run into a single separator and
/// drop separators at either end.
pub fn to_slug_form(input: &str, separator: SubstitutionChar, downcase: bool) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_separator = false;
    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push(separator.as_char());
            }
            pending_separator = false;
            out.push(if downcase { c.to_ascii_lowercase() } else { c });
        } else {
            pending_separator = true;
        }
    }
    out
}

/// Cut to `max_length` characters and drop one dangling separator.
pub fn truncate(slug: &str, max_length: usize, separator: SubstitutionChar) -> String {
    let mut out: String = slug.chars().take(max_length).collect();
    if out.ends_with(separator.as_char()) {
        out.pop();
    }
    out
}
