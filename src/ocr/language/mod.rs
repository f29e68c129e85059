/*!
 * Garbage Word Classification
 *
 * Lexical heuristics that decide whether a token produced by the OCR engine
 * is plausible language content or recognition noise. The rules are the same
 * for every language; only the character classes and the single-letter
 * whitelist vary, and those come from a `RulesetDefinition`.
 */

pub mod french;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::RulesetError;

/// A word whose alphanumeric count is below `len / ALPHANUMERIC_RATIO_DIVISOR` is garbage
pub const ALPHANUMERIC_RATIO_DIVISOR: usize = 2;

const DEFAULT_MAX_LENGTH: usize = 20;
const DEFAULT_VOWEL_RUN: usize = 3;
const DEFAULT_CONSONANT_RUN: usize = 5;

fn default_max_length() -> usize {
    DEFAULT_MAX_LENGTH
}

fn default_vowel_run() -> usize {
    DEFAULT_VOWEL_RUN
}

fn default_consonant_run() -> usize {
    DEFAULT_CONSONANT_RUN
}

/// Uncompiled description of a language ruleset.
///
/// Character sets are plain strings listing every member character; matching
/// is case-insensitive so only one case needs to be listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesetDefinition {
    /// Language code, e.g. `fra`
    pub language: String,
    /// Characters counted as alphanumeric
    pub alphanumeric: String,
    pub vowels: String,
    pub consonants: String,
    /// Characters that are valid words on their own
    #[serde(default)]
    pub single_letter_words: String,
    /// Words longer than this are garbage
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    /// This many consecutive vowels makes a word garbage
    #[serde(default = "default_vowel_run")]
    pub vowel_run: usize,
    /// This many consecutive consonants makes a word garbage
    #[serde(default = "default_consonant_run")]
    pub consonant_run: usize,
}

/// Which rule rejected a word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    TooLong,
    LowAlphanumericRatio,
    NoAlphanumeric,
    VowelRun,
    ConsonantRun,
    SingleLetter,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::TooLong => "too_long",
            RejectReason::LowAlphanumericRatio => "low_alphanumeric_ratio",
            RejectReason::NoAlphanumeric => "no_alphanumeric",
            RejectReason::VowelRun => "vowel_run",
            RejectReason::ConsonantRun => "consonant_run",
            RejectReason::SingleLetter => "single_letter",
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected(RejectReason),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }
}

/// The capability of checking a word against language-specific rules.
pub trait WordCheck: Send + Sync {
    /// Language code this checker applies to
    fn language(&self) -> &str;

    fn verdict(&self, word: &str) -> Verdict;

    /// Returns the word unchanged when it is accepted, `None` when it is garbage
    fn classify<'w>(&self, word: &'w str) -> Option<&'w str> {
        match self.verdict(word) {
            Verdict::Accepted => Some(word),
            Verdict::Rejected(_) => None,
        }
    }
}

/// A compiled ruleset. Patterns are built once here and shared read-only.
#[derive(Debug, Clone)]
pub struct LanguageRuleset {
    definition: RulesetDefinition,
    alphanumeric: Regex,
    non_alphanumeric: Regex,
    vowel_run: Regex,
    consonant_run: Regex,
    /// `None` when no single-letter word is valid
    single_letter_words: Option<Regex>,
}

impl LanguageRuleset {
    pub fn new(definition: RulesetDefinition) -> Result<Self, RulesetError> {
        let language = definition.language.trim().to_lowercase();
        if language.is_empty() {
            return Err(RulesetError::MissingLanguage);
        }

        for (set, chars) in [
            ("alphanumeric", &definition.alphanumeric),
            ("vowel", &definition.vowels),
            ("consonant", &definition.consonants),
        ] {
            if chars.is_empty() {
                return Err(RulesetError::EmptyCharacterSet { language, set });
            }
        }

        for (name, value) in [
            ("max_length", definition.max_length),
            ("vowel_run", definition.vowel_run),
            ("consonant_run", definition.consonant_run),
        ] {
            if value == 0 {
                return Err(RulesetError::InvalidThreshold {
                    language,
                    name,
                    details: "must be greater than zero".to_string(),
                });
            }
        }

        let alphanumeric_class = char_class(&definition.alphanumeric);
        let vowel_class = char_class(&definition.vowels);
        let consonant_class = char_class(&definition.consonants);

        let compile = |set: &'static str, pattern: String| {
            Regex::new(&pattern).map_err(|source| RulesetError::Pattern {
                language: language.clone(),
                set,
                source,
            })
        };

        let alphanumeric = compile("alphanumeric", format!("(?i)[{}]", alphanumeric_class))?;
        let non_alphanumeric = compile("non-alphanumeric", format!("(?i)[^{}]", alphanumeric_class))?;
        let vowel_run = compile(
            "vowel",
            format!("(?i)[{}]{{{}}}", vowel_class, definition.vowel_run),
        )?;
        let consonant_run = compile(
            "consonant",
            format!("(?i)[{}]{{{}}}", consonant_class, definition.consonant_run),
        )?;
        let single_letter_words = if definition.single_letter_words.is_empty() {
            None
        } else {
            Some(compile(
                "single letter",
                format!("(?i)^[{}]$", char_class(&definition.single_letter_words)),
            )?)
        };

        Ok(Self {
            definition: RulesetDefinition { language, ..definition },
            alphanumeric,
            non_alphanumeric,
            vowel_run,
            consonant_run,
            single_letter_words,
        })
    }

    /// The built-in French ruleset
    pub fn french() -> Result<Self, RulesetError> {
        Self::new(french::definition())
    }

    pub fn definition(&self) -> &RulesetDefinition {
        &self.definition
    }

    /// Apply the garbage rules in order; the first one that matches wins.
    pub fn check(&self, word: &str) -> Verdict {
        let length = word.chars().count();

        // Abnormally long runs of characters are OCR noise
        if length > self.definition.max_length {
            return Verdict::Rejected(RejectReason::TooLong);
        }

        // Less than half alphanumeric
        let alphanumeric_count = self.alphanumeric.find_iter(word).count();
        if alphanumeric_count < length / ALPHANUMERIC_RATIO_DIVISOR {
            return Verdict::Rejected(RejectReason::LowAlphanumericRatio);
        }

        // Also catches the empty word
        if self.non_alphanumeric.find_iter(word).count() == length {
            return Verdict::Rejected(RejectReason::NoAlphanumeric);
        }

        if self.vowel_run.is_match(word) {
            return Verdict::Rejected(RejectReason::VowelRun);
        }

        if self.consonant_run.is_match(word) {
            return Verdict::Rejected(RejectReason::ConsonantRun);
        }

        if length == 1 && !self.single_letter_words.as_ref().is_some_and(|re| re.is_match(word)) {
            return Verdict::Rejected(RejectReason::SingleLetter);
        }

        Verdict::Accepted
    }
}

impl WordCheck for LanguageRuleset {
    fn language(&self) -> &str {
        &self.definition.language
    }

    fn verdict(&self, word: &str) -> Verdict {
        self.check(word)
    }
}

/// Checker for languages without a ruleset: every word is kept.
#[derive(Debug, Clone)]
pub struct PassThrough {
    language: String,
}

impl PassThrough {
    pub fn new(language: impl Into<String>) -> Self {
        Self { language: language.into() }
    }
}

impl WordCheck for PassThrough {
    fn language(&self) -> &str {
        &self.language
    }

    fn verdict(&self, _word: &str) -> Verdict {
        Verdict::Accepted
    }
}

/// Classify a single word against a ruleset.
pub fn classify<'w>(word: &'w str, ruleset: &dyn WordCheck) -> Option<&'w str> {
    ruleset.classify(word)
}

/// Body of a regex character class matching exactly the given characters
fn char_class(chars: &str) -> String {
    let mut seen = Vec::new();
    let mut class = String::new();
    for c in chars.chars() {
        if seen.contains(&c) {
            continue;
        }
        seen.push(c);
        match c {
            '\\' | ']' | '[' | '^' | '-' | '&' | '~' => {
                class.push('\\');
                class.push(c);
            }
            _ => class.push(c),
        }
    }
    class
}
