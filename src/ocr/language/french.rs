//! French ruleset

use super::RulesetDefinition;

pub const LANGUAGE: &str = "fra";

pub const ALPHANUMERIC: &str = "0123456789abcdefghijklmnopqrstuvwxyzáéíóúüñ";
pub const VOWELS: &str = "aáeéiíoóuúü";
pub const CONSONANTS: &str = "bcdfghjklmnñpqrstvwxyz";
/// One-letter words that are valid on their own
pub const SINGLE_LETTER_WORDS: &str = "aeoóuy";

pub fn definition() -> RulesetDefinition {
    RulesetDefinition {
        language: LANGUAGE.to_string(),
        alphanumeric: ALPHANUMERIC.to_string(),
        vowels: VOWELS.to_string(),
        consonants: CONSONANTS.to_string(),
        single_letter_words: SINGLE_LETTER_WORDS.to_string(),
        max_length: super::DEFAULT_MAX_LENGTH,
        vowel_run: super::DEFAULT_VOWEL_RUN,
        consonant_run: super::DEFAULT_CONSONANT_RUN,
    }
}
