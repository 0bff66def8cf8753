// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Data obfuscation engine
// Optional PyO3 bindings behind the `python` feature

//! Recursive, regex-driven redaction of nested values.
//!
//! ```
//! use obfuscation_rust::obfuscation::{redact, DataType, ObfuscationMethod, ObfuscationRule};
//! use serde_json::json;
//!
//! let rules = vec![
//!     ObfuscationRule::for_data_type(DataType::CreditCard, ObfuscationMethod::ReplaceLastN)
//!         .unwrap()
//!         .with_last_n(4),
//! ];
//! let redacted = redact(json!({"card": "4111-1111-1111-1111", "note": "ok"}), &rules);
//! assert_eq!(redacted, json!({"card": "4111-1111-1111-****", "note": "ok"}));
//! ```

// Allow non-local definitions for PyO3 macros
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod obfuscation;

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Python module: obfuscation_rust
///
/// # Examples
///
/// ```python
/// from obfuscation_rust import ObfuscatorRust
///
/// obfuscator = ObfuscatorRust({
///     "rules": [{"data_type": "email", "method": "asterisks"}],
/// })
/// obfuscator.obfuscate_text("Contact me at john@example.com")
/// # "Contact me at ****************"
/// ```
#[cfg(feature = "python")]
#[pymodule]
fn obfuscation_rust(m: &Bound<'_, pyo3::types::PyModule>) -> PyResult<()> {
    m.add_class::<obfuscation::ObfuscatorRust>()?;

    // Module metadata
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add("__doc__", "Recursive data obfuscation engine")?;

    Ok(())
}
