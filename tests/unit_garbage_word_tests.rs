/*!
 * Unit Tests for Garbage Word Classification
 *
 * These tests verify the French ruleset decisions for individual OCR tokens
 * through the public API.
 */

#[cfg(test)]
mod tests {
    use wordsieve::ocr::language::classify;
    use wordsieve::{LanguageRegistry, LanguageRuleset, RejectReason, Verdict, WordCheck};

    fn french() -> LanguageRuleset {
        LanguageRuleset::french().expect("French ruleset should compile")
    }

    #[test]
    fn test_long_words_are_always_rejected() {
        let ruleset = french();
        let long_words = [
            "a".repeat(21),
            "bonjour".repeat(3) + "!",
            "xyz123456789012345678".to_string(),
            "é".repeat(40),
            "!".repeat(100),
        ];
        for word in &long_words {
            assert_eq!(ruleset.check(word), Verdict::Rejected(RejectReason::TooLong), "'{}' should be too long", word);
        }
    }

    #[test]
    fn test_twenty_characters_is_not_too_long() {
        let ruleset = french();
        let word = "anticonstitutionnels";
        assert_eq!(word.chars().count(), 20);
        assert_eq!(ruleset.classify(word), Some(word), "20-character word should be accepted");
    }

    #[test]
    fn test_alphanumeric_words_never_fail_ratio() {
        let ruleset = french();
        for length in 0..=20 {
            let word: String = "0123456789abcdefghijklmnopqrstuvwxyzáéíóúüñ".chars().cycle().take(length).collect();
            assert_ne!(
                ruleset.check(&word),
                Verdict::Rejected(RejectReason::LowAlphanumericRatio),
                "all-alphanumeric '{}' should pass the ratio check",
                word
            );
        }
    }

    #[test]
    fn test_classification_is_deterministic() {
        let ruleset = french();
        for word in ["bonjour", "!!!", "aaabcd", "a", "b", "", "Ça", "12€"] {
            assert_eq!(ruleset.classify(word), ruleset.classify(word), "'{}' should classify the same twice", word);
        }
    }

    #[test]
    fn test_single_letter_words() {
        let ruleset = french();
        assert_eq!(classify("a", &ruleset), Some("a"), "'a' is a French word");
        assert_eq!(classify("b", &ruleset), None, "'b' is not a French word");
        assert_eq!(classify("í", &ruleset), None, "'í' is not in the whitelist");
    }

    #[test]
    fn test_consecutive_vowels() {
        let ruleset = french();
        assert_eq!(classify("aaabcd", &ruleset), None, "three vowels in a row is garbage");
        assert_ne!(ruleset.check("aabcd"), Verdict::Rejected(RejectReason::VowelRun), "two vowels in a row is fine");
    }

    #[test]
    fn test_consecutive_consonants() {
        let ruleset = french();
        assert_eq!(classify("bcdfg", &ruleset), None, "five consonants in a row is garbage");
        assert_ne!(ruleset.check("bcdf"), Verdict::Rejected(RejectReason::ConsonantRun), "four consonants in a row is fine");
    }

    #[test]
    fn test_punctuation_only() {
        assert_eq!(classify("!!!", &french()), None, "punctuation only is garbage");
    }

    #[test]
    fn test_real_word_is_accepted_unchanged() {
        assert_eq!(classify("bonjour", &french()), Some("bonjour"));
    }

    #[test]
    fn test_case_insensitive_matching() {
        let ruleset = french();
        assert_eq!(ruleset.classify("BONJOUR"), Some("BONJOUR"));
        assert_eq!(ruleset.classify("ÉTÉ"), Some("ÉTÉ"));
        assert_eq!(ruleset.check("AAABCD"), ruleset.check("aaabcd"));
        assert_eq!(ruleset.check("BCDFG"), ruleset.check("bcdfg"));
    }

    #[test]
    fn test_empty_word_is_rejected() {
        assert_eq!(french().check(""), Verdict::Rejected(RejectReason::NoAlphanumeric));
    }

    #[test]
    fn test_token_list_end_to_end() {
        let checker = LanguageRegistry::builtin()
            .expect("built-in rulesets should compile")
            .checker("fra");
        let tokens = ["bonjour", "!!!", "aaabcd", "xyz123456789012345678", "a", "b"];
        let accepted: Vec<&str> = tokens.iter().copied().filter_map(|word| checker.classify(word)).collect();
        assert_eq!(accepted, vec!["bonjour", "a"]);
    }
}
