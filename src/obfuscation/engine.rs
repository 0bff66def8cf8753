// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Recursive redaction over JSON-shaped values

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::collections::BTreeMap;

use super::config::{ObfuscationConfig, ObfuscationRule, OperationMode};
use super::masking::apply_method;
use super::patterns::{compile_rules, CompiledRules};

/// Replacement for image payloads when image filtering is enabled
pub const IMAGE_REDACTED: &str = "[IMAGE_REDACTED]";

/// Apply every rule to `text`, in order, each rule seeing the previous rule's output.
///
/// Rules whose pattern failed to compile contribute no change.
pub fn redact_text<'a>(text: &'a str, rules: &CompiledRules) -> Cow<'a, str> {
    let mut result = Cow::Borrowed(text);

    for compiled in &rules.rules {
        let regex = match &compiled.regex {
            Ok(regex) => regex,
            Err(_) => continue,
        };

        let replaced = match replace_matches(regex, &result, &compiled.rule) {
            Some(replaced) => replaced,
            None => continue,
        };
        result = Cow::Owned(replaced);
    }

    result
}

/// Replace every match of `regex` in `text`, `None` when nothing matched.
///
/// The search resumes at the end of each match and steps one character past an
/// empty match, so an empty match right after a non-empty one is still replaced.
fn replace_matches(regex: &Regex, text: &str, rule: &ObfuscationRule) -> Option<String> {
    let mut result = String::with_capacity(text.len());
    let mut last = 0;
    let mut pos = 0;
    let mut matched = false;

    while pos <= text.len() {
        let Some(m) = regex.find_at(text, pos) else {
            break;
        };
        matched = true;
        result.push_str(&text[last..m.start()]);
        result.push_str(&apply_method(m.as_str(), rule));
        last = m.end();

        pos = if m.is_empty() {
            m.end() + text[m.end()..].chars().next().map_or(1, char::len_utf8)
        } else {
            m.end()
        };
    }

    if !matched {
        return None;
    }
    result.push_str(&text[last..]);
    Some(result)
}

/// Redact every string leaf of `value`. Containers keep their length, keys and key order.
pub fn redact_value(value: Value, rules: &CompiledRules) -> Value {
    match value {
        Value::String(text) => {
            let redacted = match redact_text(&text, rules) {
                Cow::Owned(redacted) => Some(redacted),
                Cow::Borrowed(_) => None,
            };
            Value::String(redacted.unwrap_or(text))
        }
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| redact_value(item, rules))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, item)| (key, redact_value(item, rules)))
                .collect::<Map<String, Value>>(),
        ),
        other @ (Value::Null | Value::Bool(_) | Value::Number(_)) => other,
    }
}

/// Compile `rules` and redact `value` with them
pub fn redact(value: Value, rules: &[ObfuscationRule]) -> Value {
    if rules.is_empty() {
        return value;
    }
    redact_value(value, &compile_rules(rules))
}

/// Whether a string payload is an inline image (data URI or media type reference)
pub fn is_inline_image(text: &str) -> bool {
    text.starts_with("data:image/") || text.contains("image/")
}

/// Binary attachment carried next to an item's JSON payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryData {
    #[serde(default, rename = "mimeType", alias = "mime_type")]
    pub mime_type: Option<String>,
    pub data: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BinaryData {
    pub fn is_image(&self) -> bool {
        self.mime_type
            .as_deref()
            .is_some_and(|mime| mime.starts_with("image/"))
    }
}

/// One unit of host input: a JSON payload plus optional named attachments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionItem {
    pub json: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary: Option<BTreeMap<String, BinaryData>>,
}

impl ExecutionItem {
    pub fn new(json: Value) -> Self {
        Self { json, binary: None }
    }
}

/// Resolved configuration plus its compiled rule set
///
/// # Example
/// ```
/// use obfuscation_rust::obfuscation::{ObfuscationConfig, Obfuscator};
/// use serde_json::json;
///
/// let config = ObfuscationConfig::from_json(
///     r#"{"rules": [{"data_type": "ssn", "method": "category_label"}]}"#,
/// ).unwrap();
/// let obfuscator = Obfuscator::new(config);
///
/// let redacted = obfuscator.obfuscate(json!({"note": "My SSN is 123-45-6789"}));
/// assert_eq!(redacted, json!({"note": "My SSN is [SSN]"}));
/// ```
#[derive(Debug)]
pub struct Obfuscator {
    config: ObfuscationConfig,
    rules: CompiledRules,
}

impl Obfuscator {
    pub fn new(config: ObfuscationConfig) -> Self {
        let rules = compile_rules(&config.resolve_rules());
        log::debug!(
            "Obfuscator ready with {} rules ({} inert)",
            rules.len(),
            rules.failures().count()
        );
        Self { config, rules }
    }

    pub fn config(&self) -> &ObfuscationConfig {
        &self.config
    }

    pub fn rules(&self) -> &CompiledRules {
        &self.rules
    }

    /// Redact one payload
    pub fn obfuscate(&self, data: Value) -> Value {
        if self.config.enable_image_filtering {
            if let Value::String(text) = &data {
                if is_inline_image(text) {
                    return Value::String(IMAGE_REDACTED.to_string());
                }
            }
        }

        if self.rules.is_empty() {
            return data;
        }

        redact_value(data, &self.rules)
    }

    /// Redact a batch of items: JSON payloads by rule, image attachments wholesale
    pub fn process_items(&self, items: Vec<ExecutionItem>) -> Vec<ExecutionItem> {
        if let OperationMode::Passthrough(mode) = &self.config.operation_mode {
            log::debug!("Operation mode '{}' passes items through unchanged", mode);
            return items;
        }

        items
            .into_iter()
            .map(|item| ExecutionItem {
                json: self.obfuscate(item.json),
                binary: item.binary.map(|binary| self.filter_binary(binary)),
            })
            .collect()
    }

    fn filter_binary(
        &self,
        binary: BTreeMap<String, BinaryData>,
    ) -> BTreeMap<String, BinaryData> {
        if !self.config.enable_image_filtering {
            return binary;
        }

        binary
            .into_iter()
            .map(|(key, mut attachment)| {
                if attachment.is_image() {
                    attachment.data = IMAGE_REDACTED.to_string();
                }
                (key, attachment)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obfuscation::config::{ObfuscationMethod, RuleSpec};
    use crate::obfuscation::patterns::DataType;
    use serde_json::json;

    fn email_asterisks() -> Vec<ObfuscationRule> {
        vec![ObfuscationRule::for_data_type(DataType::Email, ObfuscationMethod::Asterisks).unwrap()]
    }

    #[test]
    fn test_redact_text_no_match_borrows() {
        let rules = compile_rules(&email_asterisks());
        let result = redact_text("nothing to see", &rules);
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn test_redact_text_masks_every_match() {
        let rules = compile_rules(&email_asterisks());
        let result = redact_text("a@b.io, c@d.io", &rules);
        assert_eq!(result, "******, ******");
    }

    #[test]
    fn test_empty_match_after_match_is_replaced() {
        let rules = compile_rules(&[
            ObfuscationRule::new("a*", ObfuscationMethod::CustomReplacement)
                .with_custom_replacement("X"),
        ]);
        assert_eq!(redact_text("aaa", &rules), "XX");
        assert_eq!(redact_text("", &rules), "X");
        assert_eq!(redact_text("ñ", &rules), "XñX");
    }

    #[test]
    fn test_invalid_rule_skipped_later_rules_apply() {
        let rules = compile_rules(&[
            ObfuscationRule::new("(", ObfuscationMethod::Remove),
            ObfuscationRule::new(r"\d", ObfuscationMethod::Asterisks),
        ]);
        assert_eq!(redact_text("pin (1234)", &rules), "pin (****)");
    }

    #[test]
    fn test_non_string_leaves_untouched() {
        let rules = vec![ObfuscationRule::new(r"\d", ObfuscationMethod::Remove)];
        let value = json!([1, 2.5, true, null, "x1"]);
        assert_eq!(redact(value, &rules), json!([1, 2.5, true, null, "x"]));
    }

    #[test]
    fn test_object_key_order_preserved() {
        let rules = vec![ObfuscationRule::new(r"\d", ObfuscationMethod::Asterisks)];
        let value = json!({"z": "1", "a": {"m": "2", "b": ["3"]}});
        let redacted = redact(value, &rules);

        let keys: Vec<_> = redacted.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a"]);
        let inner: Vec<_> = redacted["a"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(inner, vec!["m", "b"]);
        assert_eq!(redacted, json!({"z": "*", "a": {"m": "*", "b": ["*"]}}));
    }

    #[test]
    fn test_keys_are_not_redacted() {
        let rules = vec![ObfuscationRule::new(r"\d", ObfuscationMethod::Asterisks)];
        let redacted = redact(json!({"k1": "v1"}), &rules);
        assert_eq!(redacted, json!({"k1": "v*"}));
    }

    #[test]
    fn test_inline_image_replaced_when_filtering() {
        let obfuscator = Obfuscator::new(ObfuscationConfig::default());
        let redacted = obfuscator.obfuscate(json!("data:image/png;base64,AAAA"));
        assert_eq!(redacted, json!(IMAGE_REDACTED));

        let obfuscator = Obfuscator::new(ObfuscationConfig {
            enable_image_filtering: false,
            ..Default::default()
        });
        let kept = obfuscator.obfuscate(json!("data:image/png;base64,AAAA"));
        assert_eq!(kept, json!("data:image/png;base64,AAAA"));
    }

    #[test]
    fn test_binary_images_redacted() {
        let obfuscator = Obfuscator::new(ObfuscationConfig {
            rules: vec![RuleSpec::default()],
            ..Default::default()
        });

        let item: ExecutionItem = serde_json::from_value(json!({
            "json": {"contact": "john@example.com"},
            "binary": {
                "photo": {"mimeType": "image/png", "data": "iVBORw0", "fileName": "a.png"},
                "report": {"mimeType": "application/pdf", "data": "JVBERi0"}
            }
        }))
        .unwrap();

        let processed = obfuscator.process_items(vec![item]);
        let binary = processed[0].binary.as_ref().unwrap();

        assert_eq!(processed[0].json, json!({"contact": "****************"}));
        assert_eq!(binary["photo"].data, IMAGE_REDACTED);
        assert_eq!(binary["photo"].extra["fileName"], json!("a.png"));
        assert_eq!(binary["report"].data, "JVBERi0");
    }

    #[test]
    fn test_passthrough_mode() {
        let obfuscator = Obfuscator::new(ObfuscationConfig {
            operation_mode: OperationMode::Passthrough("tool_wrapper".to_string()),
            rules: vec![RuleSpec::default()],
            ..Default::default()
        });
        let items = vec![ExecutionItem::new(json!({"contact": "john@example.com"}))];
        assert_eq!(obfuscator.process_items(items.clone()), items);
    }
}
