// src/infrastructure/random.rs
use crate::application::ports::util::SuffixSource;
use crate::domain::slug::resolver::SUFFIX_ALPHABET;
use rand::Rng;

#[derive(Default, Clone)]
pub struct ThreadRngSuffix;

impl SuffixSource for ThreadRngSuffix {
    fn suffix(&self, len: usize) -> String {
        let mut rng = rand::thread_rng();
        (0..len)
            .map(|_| char::from(SUFFIX_ALPHABET[rng.gen_range(0..SUFFIX_ALPHABET.len())]))
            .collect()
    }
}
