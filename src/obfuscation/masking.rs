// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Obfuscation methods applied to a single match

use once_cell::sync::Lazy;
use rand::distr::Alphanumeric;
use rand::Rng;
use regex::Regex;

use super::config::{ObfuscationMethod, ObfuscationRule};

/// Replacement for unrecognized methods and the default custom replacement
pub const REDACTED: &str = "[REDACTED]";

// Shape checks for category labels, tried in this order
static HYPHENATED_PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]{3}-[0-9]{3}-[0-9]{4}").unwrap());
static SIMPLE_EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static HYPHENATED_SSN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]{3}-[0-9]{2}-[0-9]{4}").unwrap());

/// Apply a rule's method to one matched substring
///
/// # Arguments
/// * `matched` - The full text of the match
/// * `rule` - Rule carrying the method and its parameters
///
/// # Returns
/// The replacement text for this match
pub fn apply_method(matched: &str, rule: &ObfuscationRule) -> String {
    match &rule.method {
        ObfuscationMethod::Asterisks => asterisks(matched),
        ObfuscationMethod::ReplaceFirstN => mask_first_n(matched, rule.first_n),
        ObfuscationMethod::ReplaceLastN => mask_last_n(matched, rule.last_n),
        ObfuscationMethod::Remove => String::new(),
        ObfuscationMethod::NumbersToLetters => numbers_to_letters(matched),
        ObfuscationMethod::LettersToNumbers => letters_to_numbers(matched),
        ObfuscationMethod::CustomReplacement => rule
            .custom_replacement
            .as_deref()
            .filter(|replacement| !replacement.is_empty())
            .unwrap_or(REDACTED)
            .to_string(),
        ObfuscationMethod::Hash => hash_mask(matched),
        ObfuscationMethod::RandomChars => random_chars(matched),
        ObfuscationMethod::CategoryLabel => category_label(matched).to_string(),
        ObfuscationMethod::Unrecognized(_) => REDACTED.to_string(),
    }
}

fn asterisks(value: &str) -> String {
    "*".repeat(value.chars().count())
}

/// Mask the first `n` characters; the whole value when `n` is unset, zero, or not shorter than it
fn mask_first_n(value: &str, n: Option<usize>) -> String {
    let len = value.chars().count();
    match n {
        Some(n) if n > 0 && n < len => {
            let rest: String = value.chars().skip(n).collect();
            format!("{}{}", "*".repeat(n), rest)
        }
        _ => "*".repeat(len),
    }
}

/// Mask the last `n` characters, with the same fallback as `mask_first_n`
fn mask_last_n(value: &str, n: Option<usize>) -> String {
    let len = value.chars().count();
    match n {
        Some(n) if n > 0 && n < len => {
            let kept: String = value.chars().take(len - n).collect();
            format!("{}{}", kept, "*".repeat(n))
        }
        _ => "*".repeat(len),
    }
}

fn numbers_to_letters(value: &str) -> String {
    value
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => char::from(b'a' + d as u8),
            None => c,
        })
        .collect()
}

/// Letters become their offset from 'a'; uppercase letters share that base and go negative
fn letters_to_numbers(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for c in value.chars() {
        if c.is_ascii_alphabetic() {
            result.push_str(&(c as i32 - 'a' as i32).to_string());
        } else {
            result.push(c);
        }
    }
    result
}

/// 32-bit rolling hash (`h = h * 31 + unit` over UTF-16 units), rendered as hex of its magnitude
fn hash_mask(value: &str) -> String {
    let hash = value.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_mul(31).wrapping_add(i32::from(unit))
    });
    format!("{:x}", hash.unsigned_abs())
}

/// Same-length string drawn from the thread-local RNG
fn random_chars(value: &str) -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(value.chars().count())
        .map(char::from)
        .collect()
}

/// Classify a match by shape; the first check that fits wins
fn category_label(value: &str) -> &'static str {
    if HYPHENATED_PHONE.is_match(value) {
        return "[PHONE_NUMBER]";
    }
    if SIMPLE_EMAIL.is_match(value) {
        return "[EMAIL]";
    }
    if HYPHENATED_SSN.is_match(value) {
        return "[SSN]";
    }

    let all_digits = value.bytes().all(|b| b.is_ascii_digit());
    match value.len() {
        16 if all_digits => "[CREDIT_CARD]",
        10 if all_digits => "[PHONE_NUMBER]",
        8 if all_digits => "[DOCUMENT_NUMBER]",
        _ => "[SENSITIVE_DATA]",
    }
}
