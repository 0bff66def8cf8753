// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// PyO3 bindings for the obfuscation engine

use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList, PyString};
use std::borrow::Cow;

use super::config::ObfuscationConfig;
use super::engine::{is_inline_image, redact_text, Obfuscator, IMAGE_REDACTED};

/// Obfuscator exposed to Python
///
/// # Example (Python)
/// ```python
/// from obfuscation_rust import ObfuscatorRust
///
/// config = {"rules": [{"data_type": "ssn", "method": "category_label"}]}
/// obfuscator = ObfuscatorRust(config)
///
/// obfuscator.obfuscate({"note": "My SSN is 123-45-6789"})
/// # {"note": "My SSN is [SSN]"}
/// ```
#[pyclass]
pub struct ObfuscatorRust {
    inner: Obfuscator,
}

#[pymethods]
impl ObfuscatorRust {
    /// Create a new obfuscator
    ///
    /// # Configuration Keys
    /// * `enable_image_filtering` (bool): Replace inline images with `[IMAGE_REDACTED]`
    /// * `operation_mode` (str): "simple" (default)
    /// * `rules` (list[dict]): `data_type`, `custom_regex`, `method`,
    ///   `replace_first_n`, `replace_last_n`, `custom_replacement`
    #[new]
    pub fn new(config_dict: &Bound<'_, PyDict>) -> PyResult<Self> {
        let config = ObfuscationConfig::from_py_dict(config_dict)?;
        Ok(Self {
            inner: Obfuscator::new(config),
        })
    }

    /// Redact a single string
    pub fn obfuscate_text(&self, text: &str) -> String {
        redact_text(text, self.inner.rules()).into_owned()
    }

    /// Redact nested data (dicts, lists, strings); other objects are returned as-is
    pub fn obfuscate(&self, py: Python, data: &Bound<'_, PyAny>) -> PyResult<Py<PyAny>> {
        if self.inner.config().enable_image_filtering {
            if let Ok(text) = data.downcast::<PyString>() {
                if is_inline_image(text.to_str()?) {
                    return Ok(PyString::new(py, IMAGE_REDACTED).into_any().unbind());
                }
            }
        }

        self.process_nested(py, data)
    }
}

// Internal methods
impl ObfuscatorRust {
    fn process_nested(&self, py: Python, data: &Bound<'_, PyAny>) -> PyResult<Py<PyAny>> {
        // Handle strings directly
        if let Ok(text) = data.downcast::<PyString>() {
            return match redact_text(text.to_str()?, self.inner.rules()) {
                Cow::Borrowed(_) => Ok(data.clone().unbind()),
                Cow::Owned(redacted) => Ok(redacted.into_pyobject(py)?.into_any().unbind()),
            };
        }

        // Handle dictionaries
        if let Ok(dict) = data.downcast::<PyDict>() {
            let new_dict = PyDict::new(py);
            for (key, value) in dict.iter() {
                let new_value = self.process_nested(py, &value)?;
                new_dict.set_item(key, new_value.bind(py))?;
            }
            return Ok(new_dict.into_any().unbind());
        }

        // Handle lists
        if let Ok(list) = data.downcast::<PyList>() {
            let new_list = PyList::empty(py);
            for item in list.iter() {
                let new_item = self.process_nested(py, &item)?;
                new_list.append(new_item.bind(py))?;
            }
            return Ok(new_list.into_any().unbind());
        }

        // Other types: no processing
        Ok(data.clone().unbind())
    }
}
