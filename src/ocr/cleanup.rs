/*!
 * OCR Text Cleanup
 *
 * Post-processing stage run on recognised page text: every whitespace
 * separated token goes through the language checker and garbage tokens are
 * dropped. Line structure is kept so page layout survives cleanup.
 */

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use super::language::{RejectReason, Verdict, WordCheck};

/// Recognised text of one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    pub page_number: u32,
    pub content: String,
}

impl PageText {
    pub fn new(page_number: u32, content: impl Into<String>) -> Self {
        Self {
            page_number,
            content: content.into(),
        }
    }
}

/// Word counts gathered while cleaning
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupStats {
    pub total_words: usize,
    pub accepted_words: usize,
    pub rejected_words: usize,
    /// Rejections broken down by the rule that fired
    pub rejections: BTreeMap<RejectReason, usize>,
}

impl CleanupStats {
    fn record(&mut self, verdict: Verdict) {
        self.total_words += 1;
        match verdict {
            Verdict::Accepted => self.accepted_words += 1,
            Verdict::Rejected(reason) => {
                self.rejected_words += 1;
                *self.rejections.entry(reason).or_insert(0) += 1;
            }
        }
    }

    pub fn merge(&mut self, other: &CleanupStats) {
        self.total_words += other.total_words;
        self.accepted_words += other.accepted_words;
        self.rejected_words += other.rejected_words;
        for (reason, count) in &other.rejections {
            *self.rejections.entry(*reason).or_insert(0) += count;
        }
    }

    /// Fraction of words rejected, 0.0 when nothing was seen
    pub fn rejection_rate(&self) -> f32 {
        if self.total_words == 0 {
            0.0
        } else {
            self.rejected_words as f32 / self.total_words as f32
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CleanedText {
    pub text: String,
    pub stats: CleanupStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanedDocument {
    pub pages: Vec<PageText>,
    pub stats: CleanupStats,
}

impl CleanedDocument {
    /// Document-level text of the cleaned pages
    pub fn text(&self) -> String {
        document_text(&self.pages)
    }
}

/// Runs a language checker over OCR output
#[derive(Clone)]
pub struct TextCleaner {
    checker: Arc<dyn WordCheck>,
    log_rejections: bool,
}

impl TextCleaner {
    pub fn new(checker: Arc<dyn WordCheck>) -> Self {
        Self {
            checker,
            log_rejections: false,
        }
    }

    /// Log every rejected token at debug level
    pub fn with_rejection_logging(mut self, enabled: bool) -> Self {
        self.log_rejections = enabled;
        self
    }

    pub fn language(&self) -> &str {
        self.checker.language()
    }

    fn check(&self, word: &str) -> Verdict {
        let verdict = self.checker.verdict(word);
        if self.log_rejections {
            if let Verdict::Rejected(reason) = verdict {
                debug!("Rejected OCR token '{}' ({}, language '{}')", word, reason, self.language());
            }
        }
        verdict
    }

    /// Accepted tokens, in their original order
    pub fn filter_tokens<'w, I>(&self, tokens: I) -> Vec<&'w str>
    where
        I: IntoIterator<Item = &'w str>,
    {
        tokens
            .into_iter()
            .filter(|word| self.check(word).is_accepted())
            .collect()
    }

    /// Clean a block of recognised text line by line.
    ///
    /// Each line keeps its accepted words joined by a single space; lines
    /// left with no words stay as empty lines.
    pub fn clean_text(&self, text: &str) -> CleanedText {
        let mut stats = CleanupStats::default();
        let mut lines = Vec::new();

        for line in text.lines() {
            let mut kept = Vec::new();
            for word in line.split_whitespace() {
                let verdict = self.check(word);
                stats.record(verdict);
                if verdict.is_accepted() {
                    kept.push(word);
                }
            }
            lines.push(kept.join(" "));
        }

        CleanedText {
            text: lines.join("\n"),
            stats,
        }
    }

    /// Clean each page independently and merge the statistics
    pub fn clean_pages(&self, pages: &[PageText]) -> CleanedDocument {
        let mut stats = CleanupStats::default();
        let pages = pages
            .iter()
            .map(|page| {
                let cleaned = self.clean_text(&page.content);
                debug!(
                    "Cleaned page {}: kept {} of {} words",
                    page.page_number, cleaned.stats.accepted_words, cleaned.stats.total_words
                );
                stats.merge(&cleaned.stats);
                PageText::new(page.page_number, cleaned.text)
            })
            .collect();

        CleanedDocument { pages, stats }
    }
}

/// Join page contents into a single document text.
///
/// Pages without content are skipped; every other page is followed by a
/// page marker. Pages are emitted in the order given.
pub fn document_text(pages: &[PageText]) -> String {
    let mut text = String::new();
    for page in pages.iter().filter(|page| !page.content.is_empty()) {
        text.push_str(&page.content);
        text.push_str(&format!("\n\n\n - Page {} - \n\n\n", page.page_number));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr::language::{LanguageRuleset, PassThrough};
    use std::io;
    use std::sync::Mutex;

    fn french_cleaner() -> TextCleaner {
        TextCleaner::new(Arc::new(LanguageRuleset::french().expect("French ruleset should compile")))
    }

    /// In-memory log sink shared with the subscriber
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` under a debug-level subscriber and return what it logged
    fn captured_logs<F: FnOnce()>(f: F) -> String {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, f);

        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_filter_tokens_keeps_order() {
        let cleaner = french_cleaner();
        let tokens = ["bonjour", "!!!", "aaabcd", "xyz123456789012345678", "a", "b"];
        assert_eq!(cleaner.filter_tokens(tokens), vec!["bonjour", "a"]);
    }

    #[test]
    fn test_clean_text_preserves_lines() {
        let cleaner = french_cleaner();
        let cleaned = cleaner.clean_text("  Le   chat ~~~ dort\n%%%% ###\nsur le tapis  ");

        assert_eq!(cleaned.text, "Le chat dort\n\nsur le tapis");
        assert_eq!(cleaned.stats.total_words, 9);
        assert_eq!(cleaned.stats.accepted_words, 6);
        assert_eq!(cleaned.stats.rejected_words, 3);
    }

    #[test]
    fn test_stats_break_down_rejections() {
        let cleaner = french_cleaner();
        let cleaned = cleaner.clean_text("aaabcd bcdfg b !!! bonjour");

        assert_eq!(cleaned.stats.rejections.get(&RejectReason::VowelRun), Some(&1));
        assert_eq!(cleaned.stats.rejections.get(&RejectReason::ConsonantRun), Some(&1));
        assert_eq!(cleaned.stats.rejections.get(&RejectReason::SingleLetter), Some(&1));
        assert_eq!(cleaned.stats.rejections.get(&RejectReason::LowAlphanumericRatio), Some(&1));
        assert!((cleaned.stats.rejection_rate() - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn test_empty_text() {
        let cleaned = french_cleaner().clean_text("");
        assert_eq!(cleaned.text, "");
        assert_eq!(cleaned.stats, CleanupStats::default());
        assert_eq!(cleaned.stats.rejection_rate(), 0.0);
    }

    #[test]
    fn test_clean_pages_merges_stats() {
        let cleaner = french_cleaner().with_rejection_logging(true);
        let pages = vec![
            PageText::new(1, "Bonjour ~~~~"),
            PageText::new(2, "zzzzzz"),
            PageText::new(3, "un deux trois"),
        ];

        let document = cleaner.clean_pages(&pages);

        assert_eq!(document.pages[0].content, "Bonjour");
        assert_eq!(document.pages[1].content, "");
        assert_eq!(document.pages[2].content, "un deux trois");
        assert_eq!(document.stats.total_words, 6);
        assert_eq!(document.stats.accepted_words, 4);
        assert_eq!(
            document.text(),
            "Bonjour\n\n\n - Page 1 - \n\n\nun deux trois\n\n\n - Page 3 - \n\n\n"
        );
    }

    #[test]
    fn test_rejected_tokens_are_logged_when_enabled() {
        let logs = captured_logs(|| {
            french_cleaner().with_rejection_logging(true).clean_text("bonjour !!! aaaa");
        });

        assert!(logs.contains("Rejected OCR token '!!!' (low_alphanumeric_ratio, language 'fra')"), "{}", logs);
        assert!(logs.contains("Rejected OCR token 'aaaa' (vowel_run, language 'fra')"), "{}", logs);
        assert!(!logs.contains("'bonjour'"), "{}", logs);
    }

    #[test]
    fn test_rejected_tokens_are_not_logged_by_default() {
        let logs = captured_logs(|| {
            french_cleaner().clean_text("bonjour !!! aaaa");
            french_cleaner().with_rejection_logging(false).filter_tokens(["~~~"]);
        });

        assert!(!logs.contains("Rejected OCR token"), "{}", logs);
    }

    #[test]
    fn test_pass_through_cleaner_only_normalizes_whitespace() {
        let cleaner = TextCleaner::new(Arc::new(PassThrough::new("deu")));
        let cleaned = cleaner.clean_text("!!!   ~~~\nzzzzzz");
        assert_eq!(cleaned.text, "!!! ~~~\nzzzzzz");
        assert_eq!(cleaned.stats.rejected_words, 0);
    }

    #[test]
    fn test_document_text_skips_empty_pages() {
        let pages = vec![PageText::new(1, ""), PageText::new(2, "texte")];
        assert_eq!(document_text(&pages), "texte\n\n\n - Page 2 - \n\n\n");
        assert_eq!(document_text(&[]), "");
    }

    #[test]
    fn test_cleaner_is_shareable_across_threads() {
        let cleaner = Arc::new(french_cleaner());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cleaner = Arc::clone(&cleaner);
                std::thread::spawn(move || cleaner.clean_text("bonjour !!! a b").text)
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), "bonjour a");
        }
    }
}
