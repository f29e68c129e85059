pub mod config;
pub mod error;
pub mod metadata;
pub mod ocr;

pub use config::Config;
pub use error::{MetadataError, RulesetError};
pub use ocr::language::{LanguageRuleset, PassThrough, RejectReason, RulesetDefinition, Verdict, WordCheck};
pub use ocr::registry::LanguageRegistry;
