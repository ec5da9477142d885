use proptest::prelude::*;

use slugline::domain::slug::{DEFERRED_MARKER, Normalizer, SlugOptions, SubstitutionChar};
use slugline::infrastructure::transliteration::DeunicodeTransliterator;

/// Every separator the options builder accepts.
fn separators() -> impl Strategy<Value = SubstitutionChar> {
    let allowed: Vec<SubstitutionChar> = ('!'..='~')
        .filter_map(|c| SubstitutionChar::new(c).ok())
        .collect();
    prop::sample::select(allowed)
}

fn options(separator: SubstitutionChar, downcase: bool, max_length: Option<usize>) -> SlugOptions {
    let builder = SlugOptions::builder()
        .substitution_char(separator)
        .downcase(downcase);
    match max_length {
        Some(max_length) => builder.max_length(max_length),
        None => builder,
    }
    .build()
    .unwrap()
}

fn is_clean_slug(slug: &str, separator: char, downcase: bool) -> bool {
    let doubled: String = [separator, separator].iter().collect();
    slug.chars().all(|c| {
        c == separator
            || c.is_ascii_digit()
            || if downcase { c.is_ascii_lowercase() } else { c.is_ascii_alphabetic() }
    }) && !slug.starts_with(separator)
        && !slug.ends_with(separator)
        && !slug.contains(&doubled)
}

proptest! {
    #[test]
    fn output_uses_slug_alphabet(
        input in any::<String>(),
        separator in separators(),
        downcase in any::<bool>(),
    ) {
        let opts = options(separator, downcase, None);
        let slug = Normalizer::new(&opts, &DeunicodeTransliterator).normalize(&input);
        prop_assert!(
            is_clean_slug(&slug, separator.as_char(), downcase),
            "unclean slug {slug:?} from {input:?}"
        );
    }

    #[test]
    fn truncation_respects_the_limit(
        input in "\\PC{0,80}",
        separator in separators(),
        max_length in 1usize..40,
    ) {
        let opts = options(separator, true, Some(max_length));
        let slug = Normalizer::new(&opts, &DeunicodeTransliterator).normalize(&input);
        prop_assert!(slug.chars().count() <= max_length);
        prop_assert!(!slug.ends_with(separator.as_char()));
    }

    #[test]
    fn normalizing_twice_changes_nothing(
        input in "\\PC{0,80}",
        separator in separators(),
        downcase in any::<bool>(),
        max_length in prop::option::of(1usize..40),
    ) {
        let opts = options(separator, downcase, max_length);
        let normalizer = Normalizer::new(&opts, &DeunicodeTransliterator);
        let once = normalizer.normalize(&input);
        prop_assert_eq!(normalizer.normalize(&once), once);
    }

    #[test]
    fn titles_never_spell_the_deferred_marker(
        words in prop::collection::vec("[A-Za-z0-9+ ]{1,8}|ID|\\+ID\\+", 1..6),
        separator in separators(),
        downcase in any::<bool>(),
    ) {
        let opts = options(separator, downcase, None);
        let slug = Normalizer::new(&opts, &DeunicodeTransliterator).normalize(&words.join(" "));
        prop_assert!(!slug.contains(DEFERRED_MARKER), "marker in {slug:?}");
    }

    #[test]
    fn ascii_words_keep_their_letters(words in prop::collection::vec("[a-z0-9]{1,8}", 1..6)) {
        let opts = SlugOptions::default();
        let slug = Normalizer::new(&opts, &DeunicodeTransliterator).normalize(&words.join("  "));
        prop_assert_eq!(slug, words.join("-"));
    }
}
