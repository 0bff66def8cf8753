// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Error types for the obfuscation engine

use thiserror::Error;

/// Errors surfaced by rule compilation and configuration parsing.
///
/// Redaction itself never fails; an `InvalidPattern` only marks a rule as
/// inert inside [`CompiledRules`](super::patterns::CompiledRules).
#[derive(Debug, Error)]
pub enum ObfuscationError {
    #[error("Failed to compile pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid obfuscation config: {0}")]
    Config(#[from] serde_json::Error),
}
