/*!
 * Metadata Defaults and Lookups
 *
 * Metadata types may name a default-value function and a lookup that
 * supplies the allowed values. Both are keys into closed registries of
 * functions and choice lists registered in code; stored configuration can
 * only select among them, never supply code of its own.
 */

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::MetadataError;

/// Label of the leading choice offered when a value is optional
pub const EMPTY_CHOICE_LABEL: &str = "------";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataType {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Name of a default-value function
    #[serde(default)]
    pub default: Option<String>,
    /// Name of a registered lookup
    #[serde(default)]
    pub lookup: Option<String>,
}

impl MetadataType {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            title: None,
            default: None,
            lookup: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_default(mut self, function: impl Into<String>) -> Self {
        self.default = Some(function.into());
        self
    }

    pub fn with_lookup(mut self, lookup: impl Into<String>) -> Self {
        self.lookup = Some(lookup.into());
        self
    }

    /// Title when set, otherwise the name
    pub fn display_name(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => &self.name,
        }
    }
}

/// A named group of metadata types selected together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataSet {
    pub name: String,
    pub items: Vec<MetadataType>,
}

pub type DefaultFn = fn(&NaiveDateTime) -> String;

fn current_date(now: &NaiveDateTime) -> String {
    now.format("%Y-%m-%d").to_string()
}

fn current_datetime(now: &NaiveDateTime) -> String {
    now.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn current_year(now: &NaiveDateTime) -> String {
    now.format("%Y").to_string()
}

fn current_month(now: &NaiveDateTime) -> String {
    now.format("%m").to_string()
}

const BUILTIN_FUNCTIONS: &[(&str, DefaultFn)] = &[
    ("current_date", current_date as DefaultFn),
    ("current_datetime", current_datetime as DefaultFn),
    ("current_year", current_year as DefaultFn),
    ("current_month", current_month as DefaultFn),
];

/// Closed set of default-value functions, selectable by name
#[derive(Clone)]
pub struct DefaultFunctions {
    functions: BTreeMap<&'static str, DefaultFn>,
}

impl DefaultFunctions {
    pub fn builtin() -> Self {
        Self {
            functions: BUILTIN_FUNCTIONS.iter().copied().collect(),
        }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.functions.keys().copied().collect()
    }

    pub fn evaluate(&self, name: &str, now: &NaiveDateTime) -> Option<String> {
        self.functions.get(name).map(|function| function(now))
    }
}

impl Default for DefaultFunctions {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Named lists of allowed values, registered at start-up
#[derive(Debug, Clone, Default)]
pub struct LookupRegistry {
    lookups: BTreeMap<String, Vec<String>>,
}

impl LookupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<I, S>(&mut self, name: impl Into<String>, values: I) -> Result<(), MetadataError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(MetadataError::EmptyLookupName);
        }
        self.lookups.insert(name, values.into_iter().map(Into::into).collect());
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.lookups.get(name).map(Vec::as_slice)
    }
}

/// Editable metadata value for one metadata type, ready to present
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataField {
    pub id: u32,
    pub label: String,
    pub required: bool,
    pub initial: Option<String>,
    /// `(value, label)` pairs; `None` when the value is free text
    pub choices: Option<Vec<(String, String)>>,
}

impl MetadataField {
    pub fn resolve(
        metadata_type: &MetadataType,
        required: bool,
        functions: &DefaultFunctions,
        lookups: &LookupRegistry,
        now: &NaiveDateTime,
    ) -> Result<Self, MetadataError> {
        let label = if required {
            format!("{} (required)", metadata_type.display_name())
        } else {
            metadata_type.display_name().to_string()
        };

        let initial = match metadata_type.default.as_deref() {
            Some(name) if !name.is_empty() => Some(functions.evaluate(name, now).ok_or_else(|| {
                MetadataError::UnknownFunction {
                    metadata_type: metadata_type.name.clone(),
                    name: name.to_string(),
                }
            })?),
            _ => None,
        };

        let choices = match metadata_type.lookup.as_deref() {
            Some(name) if !name.is_empty() => {
                let values = lookups.get(name).ok_or_else(|| MetadataError::UnknownLookup {
                    metadata_type: metadata_type.name.clone(),
                    name: name.to_string(),
                })?;
                let mut choices = Vec::with_capacity(values.len() + 1);
                if !required {
                    choices.push((String::new(), EMPTY_CHOICE_LABEL.to_string()));
                }
                choices.extend(values.iter().map(|value| (value.clone(), value.clone())));
                Some(choices)
            }
            _ => None,
        };

        Ok(Self {
            id: metadata_type.id,
            label,
            required,
            initial,
            choices,
        })
    }
}

/// Metadata types to fill in for a new document: the directly selected
/// types first, then those of each selected set, without duplicates.
pub fn merge_metadata_types(direct: &[MetadataType], sets: &[MetadataSet]) -> Vec<MetadataType> {
    let mut merged: Vec<MetadataType> = Vec::new();
    let candidates = direct.iter().chain(sets.iter().flat_map(|set| set.items.iter()));
    for metadata_type in candidates {
        if !merged.iter().any(|existing| existing.id == metadata_type.id) {
            merged.push(metadata_type.clone());
        }
    }
    merged
}
