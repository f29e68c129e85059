pub mod cleanup;
pub mod language;
pub mod registry;

use anyhow::Result;
use tracing::info;

use crate::config::Config;
use crate::ocr::cleanup::{CleanedDocument, CleanedText, PageText, TextCleaner};
use crate::ocr::registry::LanguageRegistry;

/// Configuration for the OCR cleanup service
#[derive(Debug, Clone)]
pub struct OcrCleanupConfig {
    /// Language used when the caller does not name one
    pub default_language: String,
    /// Optional JSON file with extra ruleset definitions
    pub rulesets_path: Option<String>,
    pub log_rejections: bool,
}

impl Default for OcrCleanupConfig {
    fn default() -> Self {
        Self {
            default_language: language::french::LANGUAGE.to_string(),
            rulesets_path: None,
            log_rejections: false,
        }
    }
}

impl OcrCleanupConfig {
    /// Apply command-line overrides on top of the environment configuration
    pub fn with_overrides(mut self, language: Option<String>, rulesets_path: Option<String>) -> Self {
        if let Some(language) = language {
            self.default_language = language;
        }
        if rulesets_path.is_some() {
            self.rulesets_path = rulesets_path;
        }
        self
    }
}

impl From<&Config> for OcrCleanupConfig {
    fn from(config: &Config) -> Self {
        Self {
            default_language: config.ocr_language.clone(),
            rulesets_path: config.ocr_rulesets_path.clone(),
            log_rejections: config.ocr_log_rejections,
        }
    }
}

/// Removes OCR garbage words from recognised text
pub struct OcrCleanupService {
    registry: LanguageRegistry,
    default_language: String,
    log_rejections: bool,
}

impl OcrCleanupService {
    /// Create the service with the built-in rulesets and default settings
    pub fn new() -> Result<Self> {
        Self::new_with_config(OcrCleanupConfig::default())
    }

    /// Create the service with configuration, loading any extra rulesets
    pub fn new_with_config(config: OcrCleanupConfig) -> Result<Self> {
        let mut registry = LanguageRegistry::with_builtin()?;
        if let Some(path) = &config.rulesets_path {
            registry.load_file(path)?;
        }

        info!(
            "OCR cleanup ready for languages [{}], default '{}'",
            registry.languages().join(", "),
            config.default_language
        );

        Ok(Self {
            registry,
            default_language: config.default_language,
            log_rejections: config.log_rejections,
        })
    }

    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Cleaner for a language, or for the default language when `None`
    pub fn cleaner(&self, lang: Option<&str>) -> TextCleaner {
        let lang = lang.unwrap_or(self.default_language.as_str());
        TextCleaner::new(self.registry.checker(lang)).with_rejection_logging(self.log_rejections)
    }

    pub fn clean_text(&self, text: &str) -> CleanedText {
        self.clean_text_with_lang(text, &self.default_language)
    }

    pub fn clean_text_with_lang(&self, text: &str, lang: &str) -> CleanedText {
        self.cleaner(Some(lang)).clean_text(text)
    }

    pub fn clean_pages_with_lang(&self, pages: &[PageText], lang: &str) -> CleanedDocument {
        self.cleaner(Some(lang)).clean_pages(pages)
    }
}
