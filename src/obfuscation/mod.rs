// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Data Obfuscation - Rust Implementation
//
// Regex-driven redaction of nested payloads:
// - Pattern catalog for common sensitive data shapes
// - Rule sets compiled once, applied in order to every string leaf
// - Structure-preserving traversal over serde_json values

pub mod config;
pub mod engine;
pub mod error;
pub mod masking;
pub mod patterns;
#[cfg(feature = "python")]
pub mod python;

pub use config::{ObfuscationConfig, ObfuscationMethod, ObfuscationRule, OperationMode, RuleSpec};
pub use engine::{redact, redact_text, redact_value, BinaryData, ExecutionItem, Obfuscator};
pub use error::ObfuscationError;
pub use patterns::{compile_rules, lookup, CompiledRules, DataType};
#[cfg(feature = "python")]
pub use python::ObfuscatorRust;
