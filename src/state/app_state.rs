//! Application state definitions

use super::forms::FormState;
use super::login::LoginState;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Login,
    Form,
    Submitted,
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    pub current_view: View,
    pub login: LoginState,
    /// Active form, present once a login succeeded
    pub form: Option<FormState>,
    /// Queue of error messages shown one at a time in a dialog
    pub error_queue: Vec<String>,
}

impl AppState {
    /// Hand control to a freshly started form
    pub fn start_form(&mut self, form: FormState) {
        self.form = Some(form);
        self.current_view = View::Form;
    }

    /// Show the submitted screen once the active form has been submitted
    pub fn sync_view(&mut self) {
        if self
            .form
            .as_ref()
            .is_some_and(|f| f.session.is_submitted())
        {
            self.current_view = View::Submitted;
        }
    }

    pub fn push_error(&mut self, message: String) {
        self.error_queue.push(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.first().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        if !self.error_queue.is_empty() {
            self.error_queue.remove(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_view_is_login() {
        let state = AppState::default();
        assert_eq!(state.current_view, View::Login);
        assert!(state.form.is_none());
    }

    #[test]
    fn test_error_queue_order() {
        let mut state = AppState::default();
        state.push_error("first".to_string());
        state.push_error("second".to_string());

        assert!(state.has_errors());
        assert_eq!(state.current_error(), Some("first"));
        state.dismiss_error();
        assert_eq!(state.current_error(), Some("second"));
        state.dismiss_error();
        assert!(!state.has_errors());
        state.dismiss_error();
    }

    #[test]
    fn test_sync_view_without_form_keeps_view() {
        let mut state = AppState::default();
        state.sync_view();
        assert_eq!(state.current_view, View::Login);
    }
}
