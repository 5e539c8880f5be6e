//! Form field value objects

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Type-safe field values
///
/// Serializes to the plain JSON shape of each variant (string, array, bool).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Free text or the chosen value of a radio/dropdown
    Text(String),
    /// Checked option values of a checkbox group, in check order
    Selection(Vec<String>),
    /// State of a lone checkbox
    Flag(bool),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl FieldValue {
    /// Get the text value (returns None for selections and flags)
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Whether the value counts as "nothing entered": empty text or an unchecked box
    pub fn is_falsy(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Flag(checked) => !checked,
            FieldValue::Selection(_) => false,
        }
    }

    /// Whether the value is text made only of whitespace (or nothing)
    pub fn is_blank_text(&self) -> bool {
        matches!(self, FieldValue::Text(s) if s.trim().is_empty())
    }

    pub fn is_selected(&self, option_value: &str) -> bool {
        match self {
            FieldValue::Selection(values) => values.iter().any(|v| v == option_value),
            FieldValue::Text(s) => s == option_value,
            FieldValue::Flag(_) => false,
        }
    }
}

/// Values entered so far, keyed by field id. A missing key means untouched.
pub type FormValues = HashMap<String, FieldValue>;
