//! Login screen state

use super::forms::{validate_field, FieldValue};
use super::schema::{FieldDefinition, FieldKind, UserData};

/// Rows of the login screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    RollNumber,
    Name,
    LoginButton,
}

impl LoginField {
    pub fn next(&self) -> Self {
        match self {
            Self::RollNumber => Self::Name,
            Self::Name => Self::LoginButton,
            Self::LoginButton => Self::RollNumber,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::RollNumber => Self::LoginButton,
            Self::Name => Self::RollNumber,
            Self::LoginButton => Self::Name,
        }
    }
}

/// Identity entry and the status of the last login attempt
#[derive(Debug, Clone, Default)]
pub struct LoginState {
    pub roll_number: String,
    pub name: String,
    pub active_field: LoginField,
    pub roll_number_error: Option<String>,
    pub name_error: Option<String>,
    /// Message of the last failed attempt
    pub error: Option<String>,
    /// Set while the remote calls are running
    pub is_loading: bool,
    /// A validated login waiting for the event loop to run it
    pub pending: Option<UserData>,
}

impl LoginState {
    pub fn roll_number_field() -> FieldDefinition {
        FieldDefinition::new("rollNumber", FieldKind::Text, "Roll Number")
            .required()
            .with_placeholder("Enter your roll number")
    }

    pub fn name_field() -> FieldDefinition {
        FieldDefinition::new("name", FieldKind::Text, "Name")
            .required()
            .with_placeholder("Enter your full name")
    }

    /// A login is queued or running; the login button is disabled
    pub fn is_busy(&self) -> bool {
        self.is_loading || self.pending.is_some()
    }

    fn active_text_mut(&mut self) -> Option<&mut String> {
        match self.active_field {
            LoginField::RollNumber => Some(&mut self.roll_number),
            LoginField::Name => Some(&mut self.name),
            LoginField::LoginButton => None,
        }
    }

    pub fn input_char(&mut self, c: char) {
        if self.is_busy() {
            return;
        }
        if let Some(text) = self.active_text_mut() {
            text.push(c);
            self.clear_active_error();
        }
    }

    pub fn backspace(&mut self) {
        if self.is_busy() {
            return;
        }
        if let Some(text) = self.active_text_mut() {
            text.pop();
            self.clear_active_error();
        }
    }

    fn clear_active_error(&mut self) {
        match self.active_field {
            LoginField::RollNumber => self.roll_number_error = None,
            LoginField::Name => self.name_error = None,
            LoginField::LoginButton => {}
        }
    }

    /// Validate both fields and queue the login when they pass
    ///
    /// Returns false when the request is ignored or a field is missing.
    pub fn request_login(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }

        self.roll_number_error = validate_field(
            &Self::roll_number_field(),
            Some(&FieldValue::Text(self.roll_number.clone())),
        );
        self.name_error = validate_field(
            &Self::name_field(),
            Some(&FieldValue::Text(self.name.clone())),
        );
        if self.roll_number_error.is_some() || self.name_error.is_some() {
            return false;
        }

        self.pending = Some(UserData {
            roll_number: self.roll_number.trim().to_string(),
            name: self.name.trim().to_string(),
        });
        true
    }
}
