use anyhow::{anyhow, Result};
use std::env;
use tracing::warn;

use crate::ocr::language::french;

#[derive(Debug, Clone)]
pub struct Config {
    /// Language used for OCR cleanup when none is given
    pub ocr_language: String,
    /// JSON file with extra language ruleset definitions
    pub ocr_rulesets_path: Option<String>,
    /// Log every rejected OCR token at debug level
    pub ocr_log_rejections: bool,
}

impl Config {
    /// Load configuration from the process environment, reading `.env` first if present
    pub fn from_env() -> Result<Self> {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from any variable source
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let ocr_language = match lookup("OCR_LANGUAGE") {
            Some(value) if !value.trim().is_empty() => value.trim().to_lowercase(),
            Some(_) => return Err(anyhow!("OCR_LANGUAGE must not be empty")),
            None => french::LANGUAGE.to_string(),
        };

        let ocr_rulesets_path = lookup("OCR_RULESETS_PATH").filter(|path| !path.trim().is_empty());

        let ocr_log_rejections = match lookup("OCR_LOG_REJECTIONS") {
            Some(value) => parse_bool(&value).unwrap_or_else(|| {
                warn!("Invalid OCR_LOG_REJECTIONS value '{}', using default false", value);
                false
            }),
            None => false,
        };

        Ok(Config {
            ocr_language,
            ocr_rulesets_path,
            ocr_log_rejections,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
