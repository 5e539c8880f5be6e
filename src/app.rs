//! Application state and core logic

use crate::api::FormApi;
use crate::state::{
    bootstrap, AppState, FieldInput, FormState, LoginField, SectionButton, Transition, View,
};
use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Form service client
    api: Box<dyn FormApi>,
    /// Whether the app should quit
    quit: bool,
    /// Transient feedback shown in the status bar
    pub status_message: Option<String>,
}

impl App {
    /// Create a new App instance
    pub fn new(api: Box<dyn FormApi>) -> Self {
        Self {
            state: AppState::default(),
            api,
            quit: false,
            status_message: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Handle a key press in the current view
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return;
        }

        // Clear any status messages on key press
        self.status_message = None;

        match self.state.current_view {
            View::Login => self.handle_login_key(key),
            View::Form => self.handle_form_key(key),
            View::Submitted => self.handle_submitted_key(key),
        }
    }

    /// Run a login queued by the login screen
    ///
    /// Called by the event loop after a frame showing the loading state
    /// has been drawn.
    pub async fn run_pending_login(&mut self) {
        let Some(user) = self.state.login.pending.take() else {
            return;
        };

        tracing::info!(roll_number = %user.roll_number, "logging in");
        if let Some(session) = bootstrap(self.api.as_ref(), &mut self.state.login, user).await {
            self.state.start_form(FormState::new(session));
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) {
        let login = &mut self.state.login;

        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Tab | KeyCode::Down => login.active_field = login.active_field.next(),
            KeyCode::BackTab | KeyCode::Up => login.active_field = login.active_field.prev(),
            KeyCode::Enter => match login.active_field {
                LoginField::RollNumber => login.active_field = LoginField::Name,
                LoginField::Name | LoginField::LoginButton => {
                    login.request_login();
                }
            },
            KeyCode::Backspace => login.backspace(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                login.input_char(c)
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let Some(form) = self.state.form.as_mut() else {
            return;
        };
        let on_buttons = form.is_buttons_row_active();
        let on_choice = form.is_active_field_choice();

        match key.code {
            // Keyboard shortcuts (work from anywhere)
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.forward();
            }
            KeyCode::Esc => self.previous(),
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            // Buttons row
            KeyCode::Left | KeyCode::Right if on_buttons => form.toggle_button(),
            KeyCode::Enter | KeyCode::Char(' ') if on_buttons => match form.selected_button {
                SectionButton::Previous => self.previous(),
                SectionButton::Forward => self.forward(),
            },
            // Option lists and checkboxes
            KeyCode::Left if on_choice => form.move_option_cursor(false),
            KeyCode::Right if on_choice => form.move_option_cursor(true),
            KeyCode::Enter | KeyCode::Char(' ') if on_choice => {
                form.input(FieldInput::Choose(form.option_cursor));
            }
            // Text entry
            KeyCode::Enter => {
                if form.is_active_field_multiline() {
                    form.input(FieldInput::Newline);
                } else {
                    form.next_field();
                }
            }
            KeyCode::Backspace => {
                form.input(FieldInput::Backspace);
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                form.input(FieldInput::Char(c));
            }
            _ => {}
        }
    }

    fn handle_submitted_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') => match self.copy_payload() {
                Ok(()) => self.status_message = Some("Submission copied".to_string()),
                Err(err) => self.push_error(format!("{err:#}")),
            },
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            _ => {}
        }
    }

    /// Next, or Submit on the last section
    fn forward(&mut self) {
        let Some(form) = self.state.form.as_mut() else {
            return;
        };
        match form.forward() {
            Transition::Moved(index) => {
                tracing::info!(section = index, "advanced to section");
            }
            Transition::Blocked(count) => {
                let noun = if count == 1 { "field needs" } else { "fields need" };
                self.status_message = Some(format!("{count} {noun} attention"));
            }
            Transition::Submitted => {
                if let Some(payload) = form.session.submitted() {
                    match serde_json::to_string(payload) {
                        Ok(json) => tracing::info!(payload = %json, "form submitted"),
                        Err(err) => {
                            tracing::warn!(error = %err, "form submitted, payload not serializable")
                        }
                    }
                }
                self.state.sync_view();
            }
            Transition::Stayed | Transition::Ignored => {}
        }
    }

    fn previous(&mut self) {
        if let Some(form) = self.state.form.as_mut() {
            if let Transition::Moved(index) = form.previous() {
                tracing::info!(section = index, "returned to section");
            }
        }
    }

    /// Pretty JSON of the submitted payload
    pub fn submitted_json(&self) -> Option<String> {
        let payload = self.state.form.as_ref()?.session.submitted()?;
        serde_json::to_string_pretty(payload).ok()
    }

    fn copy_payload(&self) -> Result<()> {
        use arboard::Clipboard;
        let text = self
            .submitted_json()
            .context("Nothing has been submitted yet")?;
        let mut clipboard = Clipboard::new().context("Clipboard unavailable")?;
        clipboard
            .set_text(text)
            .context("Failed to copy submission")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockFormApi;
    use crate::state::{
        CreateUserResponse, FieldDefinition, FieldKind, FieldOption, FieldValue, FormDefinition,
        FormResponse, NavigationState, SectionDefinition,
    };
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn form_response() -> FormResponse {
        let mut color = FieldDefinition::new("color", FieldKind::Radio, "Color").required();
        color.options = Some(vec![
            FieldOption {
                value: "red".into(),
                label: "Red".into(),
                data_test_id: None,
            },
            FieldOption {
                value: "blue".into(),
                label: "Blue".into(),
                data_test_id: None,
            },
        ]);

        FormResponse {
            message: None,
            form: FormDefinition {
                form_title: "Preferences".into(),
                form_id: None,
                version: None,
                sections: vec![
                    SectionDefinition {
                        section_id: None,
                        title: "Name".into(),
                        description: String::new(),
                        fields: vec![
                            FieldDefinition::new("name", FieldKind::Text, "Name").required()
                        ],
                    },
                    SectionDefinition {
                        section_id: None,
                        title: "Color".into(),
                        description: String::new(),
                        fields: vec![color],
                    },
                ],
            },
        }
    }

    fn mock_api(success: bool) -> MockFormApi {
        let mut api = MockFormApi::new();
        api.expect_create_user().returning(move |_| {
            Ok(CreateUserResponse {
                success,
                message: if success { "ok" } else { "Roll number not found" }.to_string(),
            })
        });
        api.expect_get_form_structure()
            .returning(|_| Ok(form_response()));
        api
    }

    fn logged_in_app() -> App {
        let mut app = App::new(Box::new(mock_api(true)));
        type_text(&mut app, "42");
        app.handle_key(key(KeyCode::Enter));
        type_text(&mut app, "Ada");
        app.handle_key(key(KeyCode::Enter));
        tokio_test::block_on(app.run_pending_login());
        app
    }

    mod login {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_enter_moves_to_name_then_queues_login() {
            let mut app = App::new(Box::new(MockFormApi::new()));
            type_text(&mut app, "42");
            app.handle_key(key(KeyCode::Enter));
            assert_eq!(app.state.login.active_field, LoginField::Name);

            type_text(&mut app, "Ada");
            app.handle_key(key(KeyCode::Enter));
            assert!(app.state.login.is_busy());
        }

        #[test]
        fn test_missing_fields_do_not_queue() {
            let mut app = App::new(Box::new(MockFormApi::new()));
            app.state.login.active_field = LoginField::LoginButton;
            app.handle_key(key(KeyCode::Enter));

            assert!(!app.state.login.is_busy());
            assert!(app.state.login.roll_number_error.is_some());
            assert!(app.state.login.name_error.is_some());
        }

        #[test]
        fn test_successful_login_opens_form() {
            let app = logged_in_app();
            assert_eq!(app.state.current_view, View::Form);
            assert!(!app.state.login.is_busy());
        }

        #[test]
        fn test_rejected_login_stays_on_login() {
            let mut app = App::new(Box::new(mock_api(false)));
            app.state.login.roll_number = "42".into();
            app.state.login.name = "Ada".into();
            app.state.login.request_login();
            tokio_test::block_on(app.run_pending_login());

            assert_eq!(app.state.current_view, View::Login);
            assert_eq!(
                app.state.login.error.as_deref(),
                Some("Roll number not found")
            );
            assert!(!app.state.login.is_loading);
        }

        #[test]
        fn test_escape_quits() {
            let mut app = App::new(Box::new(MockFormApi::new()));
            app.handle_key(key(KeyCode::Esc));
            assert!(app.should_quit());
        }
    }

    mod form {
        use super::*;
        use pretty_assertions::assert_eq;

        fn session_nav(app: &App) -> NavigationState {
            app.state.form.as_ref().unwrap().session.navigation()
        }

        #[test]
        fn test_blocked_next_sets_status() {
            let mut app = logged_in_app();
            app.handle_key(ctrl('s'));

            assert_eq!(session_nav(&app), NavigationState::Editing(0));
            assert_eq!(app.status_message.as_deref(), Some("1 field needs attention"));
        }

        #[test]
        fn test_full_flow_to_submitted() {
            let mut app = logged_in_app();
            type_text(&mut app, "Ada");
            app.handle_key(ctrl('s'));
            assert_eq!(session_nav(&app), NavigationState::Editing(1));

            // Pick "Blue" on the radio field
            app.handle_key(key(KeyCode::Right));
            app.handle_key(key(KeyCode::Char(' ')));
            app.handle_key(ctrl('s'));

            assert_eq!(app.state.current_view, View::Submitted);
            let json = app.submitted_json().unwrap();
            assert!(json.contains("\"color\": \"blue\""));
        }

        #[test]
        fn test_escape_goes_back_without_validation() {
            let mut app = logged_in_app();
            type_text(&mut app, "Ada");
            app.handle_key(ctrl('s'));
            app.handle_key(key(KeyCode::Esc));

            assert_eq!(session_nav(&app), NavigationState::Editing(0));
            let form = app.state.form.as_ref().unwrap();
            assert!(form.session.errors().section(1).is_none());
            assert_eq!(
                form.session.value("name"),
                Some(&FieldValue::Text("Ada".into()))
            );
        }

        #[test]
        fn test_buttons_row_previous_disabled_on_first_section() {
            let mut app = logged_in_app();
            app.handle_key(key(KeyCode::Tab));
            app.handle_key(key(KeyCode::Left));
            app.handle_key(key(KeyCode::Enter));

            assert_eq!(session_nav(&app), NavigationState::Editing(0));
            assert!(app.status_message.is_none());
        }

        #[test]
        fn test_submitted_view_quits_on_q() {
            let mut app = logged_in_app();
            type_text(&mut app, "Ada");
            app.handle_key(ctrl('s'));
            app.handle_key(key(KeyCode::Char(' ')));
            app.handle_key(ctrl('s'));
            assert_eq!(app.state.current_view, View::Submitted);

            app.handle_key(key(KeyCode::Char('q')));
            assert!(app.should_quit());
        }
    }

    #[test]
    fn test_error_dialog_is_modal() {
        let mut app = App::new(Box::new(MockFormApi::new()));
        app.push_error("Clipboard unavailable");
        type_text(&mut app, "42");
        assert!(app.state.login.roll_number.is_empty());

        app.handle_key(key(KeyCode::Enter));
        assert!(!app.state.has_errors());
    }
}
