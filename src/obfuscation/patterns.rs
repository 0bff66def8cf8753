// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Pattern catalog and rule compilation
// Each rule set is compiled once and shared by every string it is applied to

use regex::{Regex, RegexBuilder};

use super::config::ObfuscationRule;
use super::error::ObfuscationError;

/// Compiled regex size limit, per rule
const REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Sensitive data shapes with a predefined detection pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Email,
    Phone,
    PhoneInternational,
    Url,
    CreditCard,
    Ssn,
    Dni,
    Passport,
    IpAddress,
    MacAddress,
    PostalCode,
    Date,
    Time,
    Currency,
    Percentage,
    CustomRegex,
}

impl DataType {
    pub const ALL: [DataType; 16] = [
        DataType::Email,
        DataType::Phone,
        DataType::PhoneInternational,
        DataType::Url,
        DataType::CreditCard,
        DataType::Ssn,
        DataType::Dni,
        DataType::Passport,
        DataType::IpAddress,
        DataType::MacAddress,
        DataType::PostalCode,
        DataType::Date,
        DataType::Time,
        DataType::Currency,
        DataType::Percentage,
        DataType::CustomRegex,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Email => "email",
            DataType::Phone => "phone",
            DataType::PhoneInternational => "phone_international",
            DataType::Url => "url",
            DataType::CreditCard => "credit_card",
            DataType::Ssn => "ssn",
            DataType::Dni => "dni",
            DataType::Passport => "passport",
            DataType::IpAddress => "ip_address",
            DataType::MacAddress => "mac_address",
            DataType::PostalCode => "postal_code",
            DataType::Date => "date",
            DataType::Time => "time",
            DataType::Currency => "currency",
            DataType::Percentage => "percentage",
            DataType::CustomRegex => "custom_regex",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|data_type| data_type.as_str() == id)
    }

    /// Detection pattern source. Empty for `CustomRegex`, whose pattern the caller supplies.
    ///
    /// These are recall-oriented heuristics: `Dni` is any bare 8-digit run and
    /// `IpAddress` does not range-check octets. Digits are ASCII `[0-9]` and word
    /// boundaries are ASCII `(?-u:\b)`, so a non-ASCII letter such as `º` never
    /// glues onto a number. A `\b` is never placed next to a leading `+`/`$` or
    /// trailing `%`, where it would demand a word character.
    pub fn pattern(&self) -> &'static str {
        match self {
            DataType::Email => {
                r"(?-u:\b)[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}(?-u:\b)"
            }
            DataType::Phone => concat!(
                r"(?-u:\b)(?:(?:\+?1[-.]?)?\(?[0-9]{3}\)?[-.]?[0-9]{3}[-.]?[0-9]{4}",
                r"|\+?51?\s*[0-9]{9}|[0-9]{9}|[0-9]{10})(?-u:\b)"
            ),
            DataType::PhoneInternational => r"\+[1-9][0-9]{1,14}(?-u:\b)",
            DataType::Url => r#"(?-u:\b)https?://[^\s<>"{}|\^`\[\]\\]+(?-u:\b)"#,
            DataType::CreditCard => r"(?-u:\b)(?:[0-9]{4}[- ]?){3}[0-9]{4}(?-u:\b)",
            DataType::Ssn => r"(?-u:\b)[0-9]{3}-[0-9]{2}-[0-9]{4}(?-u:\b)",
            DataType::Dni => r"(?-u:\b)[0-9]{8}(?-u:\b)",
            DataType::Passport => r"(?-u:\b)[A-Z]{1,2}[0-9]{6,9}(?-u:\b)",
            DataType::IpAddress => r"(?-u:\b)(?:[0-9]{1,3}\.){3}[0-9]{1,3}(?-u:\b)",
            DataType::MacAddress => r"(?-u:\b)([0-9A-Fa-f]{2}[:-]){5}([0-9A-Fa-f]{2})(?-u:\b)",
            DataType::PostalCode => r"(?-u:\b)[0-9]{5}(?:-[0-9]{4})?(?-u:\b)",
            DataType::Date => r"(?-u:\b)[0-9]{1,2}[/-][0-9]{1,2}[/-][0-9]{2,4}(?-u:\b)",
            DataType::Time => r"(?-u:\b)[0-9]{1,2}:[0-9]{2}(?::[0-9]{2})?(?:\s?[AP]M)?(?-u:\b)",
            DataType::Currency => r"\$[0-9]+(?:\.[0-9]{2})?(?-u:\b)",
            DataType::Percentage => r"(?-u:\b)[0-9]+(?:\.[0-9]+)?%",
            DataType::CustomRegex => "",
        }
    }
}

/// Look up the detection pattern for a data type identifier.
///
/// `custom_regex` yields `Some("")`: the caller must supply its own pattern.
pub fn lookup(data_type_id: &str) -> Option<&'static str> {
    DataType::from_id(data_type_id).map(|data_type| data_type.pattern())
}

/// A rule paired with the outcome of compiling its pattern
#[derive(Debug)]
pub struct CompiledRule {
    pub rule: ObfuscationRule,
    pub regex: Result<Regex, ObfuscationError>,
}

/// An ordered, compiled rule set
#[derive(Debug, Default)]
pub struct CompiledRules {
    pub rules: Vec<CompiledRule>,
}

impl CompiledRules {
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Compilation failures, in rule order. These rules are skipped when applied.
    pub fn failures(&self) -> impl Iterator<Item = &ObfuscationError> {
        self.rules.iter().filter_map(|compiled| compiled.regex.as_ref().err())
    }
}

/// Compile a single pattern with all-matches, case-sensitive semantics
pub fn compile_pattern(pattern: &str) -> Result<Regex, ObfuscationError> {
    RegexBuilder::new(pattern)
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
        .map_err(|source| ObfuscationError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

/// Compile every rule's pattern, keeping failed rules as inert entries
pub fn compile_rules(rules: &[ObfuscationRule]) -> CompiledRules {
    let rules = rules
        .iter()
        .map(|rule| {
            let regex = compile_pattern(&rule.pattern);
            if let Err(e) = &regex {
                log::debug!("Obfuscation rule will be skipped: {}", e);
            }
            CompiledRule {
                rule: rule.clone(),
                regex,
            }
        })
        .collect();

    CompiledRules { rules }
}
