// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Configuration types for the obfuscation engine

#[cfg(feature = "python")]
use pyo3::prelude::*;
#[cfg(feature = "python")]
use pyo3::types::{PyDict, PyList};
use serde::{Deserialize, Serialize};

use super::error::ObfuscationError;
use super::patterns::{lookup, DataType};

/// Transform applied to every match of a rule's pattern
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ObfuscationMethod {
    #[default]
    Asterisks, // Every character becomes '*'
    ReplaceFirstN,     // Mask the leading N characters
    ReplaceLastN,      // Mask the trailing N characters
    Remove,            // Drop the match
    NumbersToLetters,  // 0 -> a, 1 -> b, ...
    LettersToNumbers,  // a -> 0, b -> 1, ...
    CustomReplacement, // Fixed replacement text
    Hash,              // Short rolling-hash fingerprint
    RandomChars,       // Same-length random alphanumerics
    CategoryLabel,     // [EMAIL], [SSN], ...
    /// Any name not listed above; matches become `[REDACTED]`
    Unrecognized(String),
}

impl ObfuscationMethod {
    /// Parse a method name. Never fails: unknown names are kept as `Unrecognized`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "asterisks" => Self::Asterisks,
            "replace_first_n" => Self::ReplaceFirstN,
            "replace_last_n" => Self::ReplaceLastN,
            "remove" => Self::Remove,
            "numbers_to_letters" => Self::NumbersToLetters,
            "letters_to_numbers" => Self::LettersToNumbers,
            "custom_replacement" => Self::CustomReplacement,
            "hash" => Self::Hash,
            "random_chars" => Self::RandomChars,
            "category_label" => Self::CategoryLabel,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Asterisks => "asterisks",
            Self::ReplaceFirstN => "replace_first_n",
            Self::ReplaceLastN => "replace_last_n",
            Self::Remove => "remove",
            Self::NumbersToLetters => "numbers_to_letters",
            Self::LettersToNumbers => "letters_to_numbers",
            Self::CustomReplacement => "custom_replacement",
            Self::Hash => "hash",
            Self::RandomChars => "random_chars",
            Self::CategoryLabel => "category_label",
            Self::Unrecognized(name) => name,
        }
    }
}

impl From<String> for ObfuscationMethod {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<ObfuscationMethod> for String {
    fn from(method: ObfuscationMethod) -> Self {
        method.as_str().to_string()
    }
}

/// One pattern + transform directive.
///
/// `pattern` is regex source text; it is compiled once per rule set by
/// [`compile_rules`](super::patterns::compile_rules). A pattern that fails to
/// compile leaves the rule inert instead of failing the whole redaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObfuscationRule {
    pub pattern: String,
    #[serde(default)]
    pub method: ObfuscationMethod,
    #[serde(default)]
    pub first_n: Option<usize>,
    #[serde(default)]
    pub last_n: Option<usize>,
    #[serde(default)]
    pub custom_replacement: Option<String>,
}

impl ObfuscationRule {
    pub fn new(pattern: impl Into<String>, method: ObfuscationMethod) -> Self {
        Self {
            pattern: pattern.into(),
            method,
            first_n: None,
            last_n: None,
            custom_replacement: None,
        }
    }

    /// Build a rule from a catalog data type, `None` for `custom_regex`
    pub fn for_data_type(data_type: DataType, method: ObfuscationMethod) -> Option<Self> {
        let pattern = data_type.pattern();
        if pattern.is_empty() {
            return None;
        }
        Some(Self::new(pattern, method))
    }

    pub fn with_first_n(mut self, n: usize) -> Self {
        self.first_n = Some(n);
        self
    }

    pub fn with_last_n(mut self, n: usize) -> Self {
        self.last_n = Some(n);
        self
    }

    pub fn with_custom_replacement(mut self, replacement: impl Into<String>) -> Self {
        self.custom_replacement = Some(replacement.into());
        self
    }
}

/// User-facing rule: a data type (or custom regex) plus method parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    #[serde(default = "default_data_type", alias = "dataType")]
    pub data_type: String,
    #[serde(default, alias = "customRegex")]
    pub custom_regex: Option<String>,
    #[serde(default)]
    pub method: ObfuscationMethod,
    #[serde(default, alias = "replaceFirstN")]
    pub replace_first_n: Option<usize>,
    #[serde(default, alias = "replaceLastN")]
    pub replace_last_n: Option<usize>,
    #[serde(default, alias = "customReplacement")]
    pub custom_replacement: Option<String>,
}

fn default_data_type() -> String {
    DataType::Email.as_str().to_string()
}

impl Default for RuleSpec {
    fn default() -> Self {
        Self {
            data_type: default_data_type(),
            custom_regex: None,
            method: ObfuscationMethod::default(),
            replace_first_n: None,
            replace_last_n: None,
            custom_replacement: None,
        }
    }
}

impl RuleSpec {
    /// Resolve the pattern text and build a rule.
    ///
    /// Returns `None` when the data type is unknown or the resolved pattern is
    /// empty (e.g. `custom_regex` without `custom_regex` text).
    pub fn resolve(&self) -> Option<ObfuscationRule> {
        let pattern = if self.data_type == DataType::CustomRegex.as_str() {
            self.custom_regex.clone().unwrap_or_default()
        } else {
            lookup(&self.data_type).unwrap_or_default().to_string()
        };

        if pattern.is_empty() {
            return None;
        }

        Some(ObfuscationRule {
            pattern,
            method: self.method.clone(),
            first_n: self.replace_first_n,
            last_n: self.replace_last_n,
            custom_replacement: self.custom_replacement.clone(),
        })
    }
}

/// How the host processes its input
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OperationMode {
    #[default]
    Simple, // Obfuscate input, return obfuscated output
    Passthrough(String), // Any other mode: return input untouched
}

impl From<String> for OperationMode {
    fn from(mode: String) -> Self {
        match mode.as_str() {
            "simple" => Self::Simple,
            _ => Self::Passthrough(mode),
        }
    }
}

impl From<OperationMode> for String {
    fn from(mode: OperationMode) -> Self {
        match mode {
            OperationMode::Simple => "simple".to_string(),
            OperationMode::Passthrough(mode) => mode,
        }
    }
}

/// Configuration for the obfuscation host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObfuscationConfig {
    #[serde(default = "default_enabled", alias = "enableImageFiltering")]
    pub enable_image_filtering: bool,
    #[serde(default, alias = "operationMode")]
    pub operation_mode: OperationMode,
    #[serde(default, alias = "obfuscationRules")]
    pub rules: Vec<RuleSpec>,
}

fn default_enabled() -> bool {
    true
}

impl Default for ObfuscationConfig {
    fn default() -> Self {
        Self {
            enable_image_filtering: true,
            operation_mode: OperationMode::Simple,
            rules: Vec::new(),
        }
    }
}

impl ObfuscationConfig {
    /// Parse configuration from a JSON document
    pub fn from_json(json: &str) -> Result<Self, ObfuscationError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolve rule specs into an ordered rule set, dropping specs without a pattern
    pub fn resolve_rules(&self) -> Vec<ObfuscationRule> {
        self.rules
            .iter()
            .filter_map(|spec| {
                let rule = spec.resolve();
                if rule.is_none() {
                    log::debug!(
                        "Dropping obfuscation rule for data type '{}': no pattern",
                        spec.data_type
                    );
                }
                rule
            })
            .collect()
    }
}

#[cfg(feature = "python")]
impl ObfuscationConfig {
    /// Extract configuration from Python dict
    pub fn from_py_dict(dict: &Bound<'_, PyDict>) -> PyResult<Self> {
        let mut config = Self::default();

        if let Some(value) = dict.get_item("enable_image_filtering")? {
            config.enable_image_filtering = value.extract()?;
        }

        if let Some(value) = dict.get_item("operation_mode")? {
            let mode: String = value.extract()?;
            config.operation_mode = OperationMode::from(mode);
        }

        if let Some(value) = dict.get_item("rules")? {
            if let Ok(py_list) = value.downcast::<PyList>() {
                for item in py_list.iter() {
                    if let Ok(py_dict) = item.downcast::<PyDict>() {
                        config.rules.push(RuleSpec::from_py_dict(py_dict)?);
                    }
                }
            }
        }

        Ok(config)
    }
}

#[cfg(feature = "python")]
impl RuleSpec {
    fn from_py_dict(dict: &Bound<'_, PyDict>) -> PyResult<Self> {
        let mut spec = Self::default();

        // Helper macro to extract optional values
        macro_rules! extract_opt {
            ($field:ident) => {
                if let Some(value) = dict.get_item(stringify!($field))? {
                    if !value.is_none() {
                        spec.$field = Some(value.extract()?);
                    }
                }
            };
        }

        if let Some(value) = dict.get_item("data_type")? {
            spec.data_type = value.extract()?;
        }
        if let Some(value) = dict.get_item("method")? {
            let method: String = value.extract()?;
            spec.method = ObfuscationMethod::from(method);
        }
        extract_opt!(custom_regex);
        extract_opt!(replace_first_n);
        extract_opt!(replace_last_n);
        extract_opt!(custom_replacement);

        Ok(spec)
    }
}
