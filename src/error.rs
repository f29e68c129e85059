use thiserror::Error;

/// Errors raised while building or loading language rulesets.
///
/// Classification itself never fails; these only surface when a ruleset is
/// constructed from a bad definition or a rulesets file cannot be read.
#[derive(Error, Debug)]
pub enum RulesetError {
    #[error("Ruleset language code must not be empty")]
    MissingLanguage,

    #[error("Ruleset '{language}' has an empty {set} set")]
    EmptyCharacterSet { language: String, set: &'static str },

    #[error("Ruleset '{language}' has invalid threshold {name}: {details}")]
    InvalidThreshold {
        language: String,
        name: &'static str,
        details: String,
    },

    #[error("Failed to compile {set} pattern for ruleset '{language}': {source}")]
    Pattern {
        language: String,
        set: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("Failed to read rulesets file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse rulesets file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised while resolving metadata defaults and lookups.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MetadataError {
    #[error("Unknown default function '{name}' for metadata type '{metadata_type}'")]
    UnknownFunction { metadata_type: String, name: String },

    #[error("Unknown lookup '{name}' for metadata type '{metadata_type}'")]
    UnknownLookup { metadata_type: String, name: String },

    #[error("Lookup name must not be empty")]
    EmptyLookupName,
}
