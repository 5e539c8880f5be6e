//! Form schema types as delivered by the form service

use serde::{Deserialize, Serialize};

/// Declared kind of a form field
///
/// Unknown kinds are kept by name so they can be reported instead of
/// failing the whole schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    Text,
    Tel,
    Email,
    Date,
    Textarea,
    Dropdown,
    Radio,
    Checkbox,
    Unsupported(String),
}

impl FieldKind {
    /// Wire name of the kind
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Tel => "tel",
            Self::Email => "email",
            Self::Date => "date",
            Self::Textarea => "textarea",
            Self::Dropdown => "dropdown",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::Unsupported(name) => name,
        }
    }

    /// Kinds edited as free text
    pub fn is_text_like(&self) -> bool {
        matches!(
            self,
            Self::Text | Self::Tel | Self::Email | Self::Date | Self::Textarea
        )
    }
}

impl From<String> for FieldKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "text" => Self::Text,
            "tel" => Self::Tel,
            "email" => Self::Email,
            "date" => Self::Date,
            "textarea" => Self::Textarea,
            "dropdown" => Self::Dropdown,
            "radio" => Self::Radio,
            "checkbox" => Self::Checkbox,
            _ => Self::Unsupported(value),
        }
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Unsupported(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

/// A selectable option of a dropdown, radio or checkbox group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldOption {
    pub value: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_test_id: Option<String>,
}

/// Custom validation settings of a field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRule {
    /// Replaces every default failure message of the field
    #[serde(default)]
    pub message: Option<String>,
}

/// A single field of a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub field_id: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub label: String,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_test_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
}

impl FieldDefinition {
    /// Minimal field of the given kind, used by tests and the login screen
    pub fn new(field_id: &str, kind: FieldKind, label: &str) -> Self {
        Self {
            field_id: field_id.to_string(),
            kind,
            label: label.to_string(),
            placeholder: None,
            required: false,
            data_test_id: None,
            validation: None,
            options: None,
            min_length: None,
            max_length: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    /// Custom validation message, if declared
    pub fn custom_message(&self) -> Option<&str> {
        self.validation.as_ref()?.message.as_deref()
    }

    /// A checkbox carrying options is a multi-select group
    pub fn is_checkbox_group(&self) -> bool {
        self.kind == FieldKind::Checkbox && self.options.is_some()
    }

    /// Options of the field (empty when none are declared)
    pub fn options(&self) -> &[FieldOption] {
        self.options.as_deref().unwrap_or_default()
    }

    /// Declared minimum length; zero counts as undeclared
    pub fn min_length(&self) -> Option<usize> {
        self.min_length.filter(|&n| n > 0)
    }

    /// Declared maximum length; zero counts as undeclared
    pub fn max_length(&self) -> Option<usize> {
        self.max_length.filter(|&n| n > 0)
    }
}

/// An ordered, independently validated group of fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionDefinition {
    #[serde(default)]
    pub section_id: Option<serde_json::Value>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub fields: Vec<FieldDefinition>,
}

/// A complete form as delivered by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDefinition {
    pub form_title: String,
    #[serde(default)]
    pub form_id: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    pub sections: Vec<SectionDefinition>,
}

impl FormDefinition {
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }
}

/// Response of the schema fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub form: FormDefinition,
}

/// Identity collected on the login screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub roll_number: String,
    pub name: String,
}

/// Response of the user creation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}
