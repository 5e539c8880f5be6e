//! Declarative field and section validation
//!
//! Rules run in a fixed order and the first failing rule wins, so a field
//! never reports more than one message per pass.

use super::field::{FieldValue, FormValues};
use crate::state::schema::{FieldDefinition, FieldKind};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use thiserror::Error;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

const PHONE_DIGITS: usize = 10;

/// Errors of one section, keyed by field id. Passing fields are absent.
pub type FieldErrors = HashMap<String, String>;

/// A failed validation rule; `Display` gives the default message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("This field is required")]
    Required,
    #[error("Minimum {0} characters required")]
    TooShort(usize),
    #[error("Maximum {0} characters allowed")]
    TooLong(usize),
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter a valid 10-digit phone number")]
    InvalidPhone,
}

/// Run every rule against a value and report the first failure
pub fn check_field(
    field: &FieldDefinition,
    value: Option<&FieldValue>,
) -> Result<(), ValidationFailure> {
    if field.required && is_missing(field, value) {
        return Err(ValidationFailure::Required);
    }

    // Empty optional text skips the remaining rules
    let text = match value {
        Some(v) if v.is_blank_text() => return Ok(()),
        Some(FieldValue::Text(s)) => s.as_str(),
        _ => return Ok(()),
    };

    let length = text.chars().count();
    if let Some(min) = field.min_length() {
        if length < min {
            return Err(ValidationFailure::TooShort(min));
        }
    }
    if let Some(max) = field.max_length() {
        if length > max {
            return Err(ValidationFailure::TooLong(max));
        }
    }

    match field.kind {
        FieldKind::Email if !EMAIL_PATTERN.is_match(text) => Err(ValidationFailure::InvalidEmail),
        FieldKind::Tel if !is_phone_number(text) => Err(ValidationFailure::InvalidPhone),
        _ => Ok(()),
    }
}

/// Validate a single field, returning the message to display on failure
///
/// A custom validation message declared on the field replaces every
/// default message.
pub fn validate_field(field: &FieldDefinition, value: Option<&FieldValue>) -> Option<String> {
    check_field(field, value).err().map(|failure| {
        field
            .custom_message()
            .map(str::to_string)
            .unwrap_or_else(|| failure.to_string())
    })
}

/// Validate every field of a section independently
pub fn validate_section(fields: &[FieldDefinition], values: &FormValues) -> FieldErrors {
    fields
        .iter()
        .filter_map(|field| {
            validate_field(field, values.get(&field.field_id))
                .map(|message| (field.field_id.clone(), message))
        })
        .collect()
}

fn is_missing(field: &FieldDefinition, value: Option<&FieldValue>) -> bool {
    let Some(value) = value else {
        return true;
    };
    if value.is_falsy() {
        return true;
    }
    if field.is_checkbox_group() {
        matches!(value, FieldValue::Selection(values) if values.is_empty())
    } else {
        value.is_blank_text()
    }
}

fn is_phone_number(text: &str) -> bool {
    text.chars().filter(char::is_ascii_digit).count() == PHONE_DIGITS
}
