use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::RulesetError;
use super::language::{LanguageRuleset, PassThrough, RulesetDefinition, WordCheck};

static BUILTIN: Lazy<Result<LanguageRegistry, RulesetError>> = Lazy::new(LanguageRegistry::with_builtin);

/// Language code to ruleset mapping.
///
/// Languages differ only in data, so adding one means registering a
/// `RulesetDefinition`, either in code or from a rulesets file.
#[derive(Debug, Clone, Default)]
pub struct LanguageRegistry {
    rulesets: HashMap<String, Arc<LanguageRuleset>>,
}

impl LanguageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the rulesets that ship with the crate
    pub fn with_builtin() -> Result<Self, RulesetError> {
        let mut registry = Self::new();
        registry.insert(LanguageRuleset::french()?);
        Ok(registry)
    }

    /// Shared process-wide registry of the built-in rulesets, compiled on first use
    pub fn builtin() -> Result<&'static LanguageRegistry, &'static RulesetError> {
        BUILTIN.as_ref()
    }

    /// Compile a definition and add it, replacing any ruleset for the same language
    pub fn register(&mut self, definition: RulesetDefinition) -> Result<(), RulesetError> {
        let ruleset = LanguageRuleset::new(definition)?;
        self.insert(ruleset);
        Ok(())
    }

    fn insert(&mut self, ruleset: LanguageRuleset) {
        let language = ruleset.language().to_string();
        if self.rulesets.insert(language.clone(), Arc::new(ruleset)).is_some() {
            debug!("Replaced ruleset for language '{}'", language);
        }
    }

    /// Load a JSON array of ruleset definitions and register each of them.
    ///
    /// Every definition is compiled before any is registered, so a bad file
    /// leaves the registry untouched. Returns the number of rulesets loaded.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, RulesetError> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let contents = std::fs::read_to_string(path).map_err(|source| RulesetError::Io {
            path: path_str.clone(),
            source,
        })?;
        let definitions: Vec<RulesetDefinition> = serde_json::from_str(&contents)
            .map_err(|source| RulesetError::Parse {
                path: path_str.clone(),
                source,
            })?;

        let rulesets = definitions
            .into_iter()
            .map(LanguageRuleset::new)
            .collect::<Result<Vec<_>, _>>()?;

        let count = rulesets.len();
        for ruleset in rulesets {
            self.insert(ruleset);
        }

        info!("Loaded {} OCR language ruleset(s) from {}", count, path_str);
        Ok(count)
    }

    pub fn get(&self, language: &str) -> Option<Arc<LanguageRuleset>> {
        self.rulesets.get(&normalize(language)).cloned()
    }

    pub fn contains(&self, language: &str) -> bool {
        self.rulesets.contains_key(&normalize(language))
    }

    /// Checker for a language; languages without a ruleset keep every word
    pub fn checker(&self, language: &str) -> Arc<dyn WordCheck> {
        if let Some(ruleset) = self.get(language) {
            return ruleset;
        }

        debug!("No OCR ruleset for language '{}', words will not be filtered", language);
        Arc::new(PassThrough::new(normalize(language)))
    }

    /// Registered language codes, sorted
    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = self.rulesets.keys().map(String::as_str).collect();
        languages.sort_unstable();
        languages
    }

    pub fn len(&self) -> usize {
        self.rulesets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rulesets.is_empty()
    }
}

fn normalize(language: &str) -> String {
    language.trim().to_lowercase()
}
