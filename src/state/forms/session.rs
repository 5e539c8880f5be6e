//! Section navigation state machine for one form session

use super::field::{FieldValue, FormValues};
use super::validation::{validate_section, FieldErrors};
use crate::state::schema::{FieldDefinition, FormDefinition, SectionDefinition};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use uuid::Uuid;

/// Reasons a fetched schema cannot start a session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("The form has no sections")]
    EmptyForm,
    #[error("The form declares field '{0}' more than once")]
    DuplicateFieldId(String),
}

/// Where the user is in the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationState {
    Editing(usize),
    Submitted,
}

/// Result of a navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Moved to the given section
    Moved(usize),
    /// Validation failed with this many field errors
    Blocked(usize),
    /// Validation passed but there was nowhere to go
    Stayed,
    /// The form is now submitted
    Submitted,
    /// The request does not apply in the current state
    Ignored,
}

/// Validation errors per section index
///
/// A section only has an entry once it has been validated, and each pass
/// replaces the previous entry wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrorState {
    sections: HashMap<usize, FieldErrors>,
}

impl FormErrorState {
    #[cfg(test)]
    pub fn section(&self, index: usize) -> Option<&FieldErrors> {
        self.sections.get(&index)
    }

    pub fn error_for(&self, index: usize, field_id: &str) -> Option<&str> {
        self.sections.get(&index)?.get(field_id).map(String::as_str)
    }

    fn replace(&mut self, index: usize, errors: FieldErrors) {
        self.sections.insert(index, errors);
    }

    fn clear_field(&mut self, index: usize, field_id: &str) -> bool {
        self.sections
            .get_mut(&index)
            .is_some_and(|errors| errors.remove(field_id).is_some())
    }
}

/// Final payload of a submitted form
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedForm {
    pub session_id: Uuid,
    pub form_title: String,
    pub submitted_at: DateTime<Utc>,
    pub values: FormValues,
}

/// One pass through a fetched form
#[derive(Debug, Clone)]
pub struct FormSession {
    id: Uuid,
    form: FormDefinition,
    values: FormValues,
    errors: FormErrorState,
    nav: NavigationState,
    submitted: Option<SubmittedForm>,
}

impl FormSession {
    /// Start a session at the first section
    pub fn new(form: FormDefinition) -> Result<Self, SessionError> {
        if form.sections.is_empty() {
            return Err(SessionError::EmptyForm);
        }

        let mut seen = HashSet::new();
        for field in form.sections.iter().flat_map(|s| &s.fields) {
            if !seen.insert(field.field_id.as_str()) {
                return Err(SessionError::DuplicateFieldId(field.field_id.clone()));
            }
        }

        Ok(Self {
            id: Uuid::new_v4(),
            form,
            values: FormValues::new(),
            errors: FormErrorState::default(),
            nav: NavigationState::Editing(0),
            submitted: None,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn form(&self) -> &FormDefinition {
        &self.form
    }

    #[cfg(test)]
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn value(&self, field_id: &str) -> Option<&FieldValue> {
        self.values.get(field_id)
    }

    #[cfg(test)]
    pub fn errors(&self) -> &FormErrorState {
        &self.errors
    }

    #[cfg(test)]
    pub fn navigation(&self) -> NavigationState {
        self.nav
    }

    pub fn is_submitted(&self) -> bool {
        self.nav == NavigationState::Submitted
    }

    pub fn submitted(&self) -> Option<&SubmittedForm> {
        self.submitted.as_ref()
    }

    pub fn section_count(&self) -> usize {
        self.form.section_count()
    }

    /// Index of the section being edited (None once submitted)
    pub fn current_index(&self) -> Option<usize> {
        match self.nav {
            NavigationState::Editing(index) => Some(index),
            NavigationState::Submitted => None,
        }
    }

    pub fn current_section(&self) -> Option<&SectionDefinition> {
        self.form.sections.get(self.current_index()?)
    }

    pub fn current_fields(&self) -> &[FieldDefinition] {
        self.current_section()
            .map(|s| s.fields.as_slice())
            .unwrap_or_default()
    }

    /// Errors currently shown for a field of the section being edited
    pub fn current_error(&self, field_id: &str) -> Option<&str> {
        self.errors.error_for(self.current_index()?, field_id)
    }

    pub fn is_first_section(&self) -> bool {
        self.current_index() == Some(0)
    }

    pub fn is_last_section(&self) -> bool {
        self.current_index() == Some(self.section_count() - 1)
    }

    /// Completion percentage derived from the current position
    pub fn progress_percent(&self) -> f64 {
        match self.nav {
            NavigationState::Editing(index) => {
                (index + 1) as f64 / self.section_count() as f64 * 100.0
            }
            NavigationState::Submitted => 100.0,
        }
    }

    /// Record a new value for a field
    ///
    /// Clears that field's error in the current section without
    /// re-validating anything. Returns false once submitted.
    pub fn set_value(&mut self, field_id: &str, value: FieldValue) -> bool {
        let Some(index) = self.current_index() else {
            return false;
        };
        self.values.insert(field_id.to_string(), value);
        self.errors.clear_field(index, field_id);
        true
    }

    /// Go back one section; never validates
    pub fn previous(&mut self) -> Transition {
        match self.nav {
            NavigationState::Editing(index) if index > 0 => {
                self.nav = NavigationState::Editing(index - 1);
                Transition::Moved(index - 1)
            }
            _ => Transition::Ignored,
        }
    }

    /// Validate the current section and advance when it passes
    pub fn next(&mut self) -> Transition {
        let Some(index) = self.current_index() else {
            return Transition::Ignored;
        };

        let error_count = self.validate_current(index);
        if error_count > 0 {
            tracing::debug!(section = index, error_count, "section blocked");
            return Transition::Blocked(error_count);
        }

        if index + 1 < self.section_count() {
            self.nav = NavigationState::Editing(index + 1);
            Transition::Moved(index + 1)
        } else {
            Transition::Stayed
        }
    }

    /// Validate the last section and finish the form when it passes
    pub fn submit(&mut self) -> Transition {
        let Some(index) = self.current_index() else {
            return Transition::Ignored;
        };
        if !self.is_last_section() {
            return Transition::Ignored;
        }

        let error_count = self.validate_current(index);
        if error_count > 0 {
            tracing::debug!(section = index, error_count, "submission blocked");
            return Transition::Blocked(error_count);
        }

        self.nav = NavigationState::Submitted;
        self.submitted = Some(SubmittedForm {
            session_id: self.id,
            form_title: self.form.form_title.clone(),
            submitted_at: Utc::now(),
            values: self.values.clone(),
        });
        Transition::Submitted
    }

    fn validate_current(&mut self, index: usize) -> usize {
        let errors = validate_section(&self.form.sections[index].fields, &self.values);
        let count = errors.len();
        self.errors.replace(index, errors);
        count
    }
}
