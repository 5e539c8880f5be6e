//! Keyboard focus over a form session

use super::field::FieldValue;
use super::input::{apply_input, FieldInput};
use super::session::{FormSession, Transition};
use crate::state::schema::{FieldDefinition, FieldKind};

/// Buttons below the fields of a section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionButton {
    Previous,
    /// Next, or Submit on the last section
    #[default]
    Forward,
}

/// A form session plus which field, option and button have focus
#[derive(Debug, Clone)]
pub struct FormState {
    pub session: FormSession,
    /// Focused row; `fields.len()` is the buttons row
    pub active_field_index: usize,
    /// Focused option of a radio, dropdown or checkbox group
    pub option_cursor: usize,
    pub selected_button: SectionButton,
}

impl FormState {
    pub fn new(session: FormSession) -> Self {
        Self {
            session,
            active_field_index: 0,
            option_cursor: 0,
            selected_button: SectionButton::default(),
        }
    }

    /// Focusable rows: every field plus the buttons row
    pub fn field_count(&self) -> usize {
        self.session.current_fields().len() + 1
    }

    pub fn is_buttons_row_active(&self) -> bool {
        self.active_field_index == self.session.current_fields().len()
    }

    pub fn active_field(&self) -> Option<&FieldDefinition> {
        self.session.current_fields().get(self.active_field_index)
    }

    pub fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.field_count() - 1);
        self.option_cursor = self.selected_option_index().unwrap_or(0);
    }

    pub fn next_field(&mut self) {
        let count = self.field_count();
        self.set_active_field((self.active_field_index + 1) % count);
    }

    pub fn prev_field(&mut self) {
        let count = self.field_count();
        if self.active_field_index == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(self.active_field_index - 1);
        }
    }

    pub fn toggle_button(&mut self) {
        self.selected_button = match self.selected_button {
            SectionButton::Previous => SectionButton::Forward,
            SectionButton::Forward => SectionButton::Previous,
        };
    }

    /// Move the option cursor of the active field, wrapping around
    pub fn move_option_cursor(&mut self, forward: bool) {
        let count = self.active_field().map_or(0, |f| f.options().len());
        if count == 0 {
            return;
        }
        self.option_cursor = if forward {
            (self.option_cursor + 1) % count
        } else {
            (self.option_cursor + count - 1) % count
        };
    }

    /// Feed an input event to the active field and report the change
    pub fn input(&mut self, input: FieldInput) -> bool {
        let Some(field) = self.active_field() else {
            return false;
        };
        let input = match input {
            FieldInput::Choose(_) => FieldInput::Choose(self.option_cursor),
            other => other,
        };
        let Some(value) = apply_input(field, self.session.value(&field.field_id), input) else {
            return false;
        };
        let field_id = field.field_id.clone();
        self.session.set_value(&field_id, value)
    }

    /// Whether the active field is edited as multi-line text
    pub fn is_active_field_multiline(&self) -> bool {
        self.active_field()
            .is_some_and(|f| f.kind == FieldKind::Textarea)
    }

    /// Whether Space/Enter should choose on the active field
    pub fn is_active_field_choice(&self) -> bool {
        self.active_field().is_some_and(|f| {
            matches!(
                f.kind,
                FieldKind::Checkbox | FieldKind::Radio | FieldKind::Dropdown
            )
        })
    }

    pub fn previous(&mut self) -> Transition {
        let transition = self.session.previous();
        self.after_transition(transition);
        transition
    }

    /// Next on inner sections, Submit on the last one
    pub fn forward(&mut self) -> Transition {
        let transition = if self.session.is_last_section() {
            self.session.submit()
        } else {
            self.session.next()
        };
        self.after_transition(transition);
        transition
    }

    fn after_transition(&mut self, transition: Transition) {
        match transition {
            Transition::Moved(_) => {
                self.selected_button = SectionButton::default();
                self.set_active_field(0);
            }
            Transition::Blocked(_) => self.focus_first_error(),
            _ => {}
        }
    }

    fn focus_first_error(&mut self) {
        let first = self
            .session
            .current_fields()
            .iter()
            .position(|f| self.session.current_error(&f.field_id).is_some());
        if let Some(index) = first {
            self.set_active_field(index);
        }
    }

    fn selected_option_index(&self) -> Option<usize> {
        let field = self.active_field()?;
        let value = self.session.value(&field.field_id)?;
        match value {
            FieldValue::Text(_) => field
                .options()
                .iter()
                .position(|o| value.is_selected(&o.value)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::schema::{FieldOption, FormDefinition, SectionDefinition};
    use crate::state::NavigationState;

    fn form() -> FormDefinition {
        let mut level = FieldDefinition::new("level", FieldKind::Radio, "Level").required();
        level.options = Some(vec![
            FieldOption {
                value: "low".into(),
                label: "Low".into(),
                data_test_id: None,
            },
            FieldOption {
                value: "high".into(),
                label: "High".into(),
                data_test_id: None,
            },
        ]);

        FormDefinition {
            form_title: "Test".into(),
            form_id: None,
            version: None,
            sections: vec![
                SectionDefinition {
                    section_id: None,
                    title: "One".into(),
                    description: String::new(),
                    fields: vec![
                        FieldDefinition::new("name", FieldKind::Text, "Name").required(),
                        level,
                    ],
                },
                SectionDefinition {
                    section_id: None,
                    title: "Two".into(),
                    description: String::new(),
                    fields: vec![FieldDefinition::new("bio", FieldKind::Textarea, "Bio")],
                },
            ],
        }
    }

    fn state() -> FormState {
        FormState::new(FormSession::new(form()).unwrap())
    }

    #[test]
    fn test_field_count_includes_buttons_row() {
        let state = state();
        assert_eq!(state.field_count(), 3);
        assert!(!state.is_buttons_row_active());
    }

    #[test]
    fn test_next_field_cycles() {
        let mut state = state();
        for _ in 0..3 {
            state.next_field();
        }
        assert_eq!(state.active_field_index, 0);
    }

    #[test]
    fn test_prev_field_wraps_to_buttons() {
        let mut state = state();
        state.prev_field();
        assert!(state.is_buttons_row_active());
    }

    #[test]
    fn test_typing_reaches_session() {
        let mut state = state();
        assert!(state.input(FieldInput::Char('A')));
        assert_eq!(
            state.session.value("name"),
            Some(&FieldValue::Text("A".into()))
        );
    }

    #[test]
    fn test_choose_uses_option_cursor() {
        let mut state = state();
        state.next_field();
        state.move_option_cursor(true);
        assert!(state.input(FieldInput::Choose(0)));
        assert_eq!(
            state.session.value("level"),
            Some(&FieldValue::Text("high".into()))
        );
    }

    #[test]
    fn test_option_cursor_wraps_backwards() {
        let mut state = state();
        state.next_field();
        state.move_option_cursor(false);
        assert_eq!(state.option_cursor, 1);
    }

    #[test]
    fn test_blocked_forward_focuses_first_error() {
        let mut state = state();
        state.input(FieldInput::Char('A'));
        state.set_active_field(2);

        assert_eq!(state.forward(), Transition::Blocked(1));
        assert_eq!(state.active_field_index, 1);
    }

    #[test]
    fn test_forward_then_submit() {
        let mut state = state();
        state.input(FieldInput::Char('A'));
        state.next_field();
        state.input(FieldInput::Choose(0));

        assert_eq!(state.forward(), Transition::Moved(1));
        assert_eq!(state.active_field_index, 0);
        assert!(state.is_active_field_multiline());

        assert_eq!(state.forward(), Transition::Submitted);
        assert_eq!(state.session.navigation(), NavigationState::Submitted);
    }

    #[test]
    fn test_cleared_dropdown_fails_required_again() {
        let mut country =
            FieldDefinition::new("country", FieldKind::Dropdown, "Country").required();
        country.options = Some(vec![FieldOption {
            value: "np".into(),
            label: "Nepal".into(),
            data_test_id: None,
        }]);
        let form = FormDefinition {
            form_title: "Test".into(),
            form_id: None,
            version: None,
            sections: vec![SectionDefinition {
                section_id: None,
                title: "Only".into(),
                description: String::new(),
                fields: vec![country],
            }],
        };
        let mut state = FormState::new(FormSession::new(form).unwrap());

        assert!(state.input(FieldInput::Choose(0)));
        assert!(state.input(FieldInput::Backspace));
        assert_eq!(
            state.session.value("country"),
            Some(&FieldValue::Text(String::new()))
        );

        assert_eq!(state.forward(), Transition::Blocked(1));
        assert_eq!(
            state.session.current_error("country"),
            Some("This field is required")
        );
    }

    #[test]
    fn test_toggle_button() {
        let mut state = state();
        assert_eq!(state.selected_button, SectionButton::Forward);
        state.toggle_button();
        assert_eq!(state.selected_button, SectionButton::Previous);
    }
}
