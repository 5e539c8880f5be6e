//! Conversion of raw input events into field values

use super::field::FieldValue;
use crate::state::schema::{FieldDefinition, FieldKind};

/// A raw edit coming from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldInput {
    /// A typed character
    Char(char),
    Backspace,
    Newline,
    /// Space/Enter on a checkbox, or on the option at this index
    Choose(usize),
}

/// Compute the new value of a field after an input event
///
/// Returns None when the event does not apply to the field's kind, in
/// which case nothing should be reported to the session.
pub fn apply_input(
    field: &FieldDefinition,
    current: Option<&FieldValue>,
    input: FieldInput,
) -> Option<FieldValue> {
    match &field.kind {
        kind if kind.is_text_like() => apply_text_input(field, current, input),
        FieldKind::Checkbox if field.is_checkbox_group() => {
            let FieldInput::Choose(index) = input else {
                return None;
            };
            let option = field.options().get(index)?;
            let mut selected = match current {
                Some(FieldValue::Selection(values)) => values.clone(),
                _ => Vec::new(),
            };
            if let Some(pos) = selected.iter().position(|v| *v == option.value) {
                selected.remove(pos);
            } else {
                selected.push(option.value.clone());
            }
            Some(FieldValue::Selection(selected))
        }
        FieldKind::Checkbox => match input {
            FieldInput::Choose(_) => {
                let checked = matches!(current, Some(FieldValue::Flag(true)));
                Some(FieldValue::Flag(!checked))
            }
            _ => None,
        },
        // Backspace puts a dropdown back on its empty "Select an option" entry
        FieldKind::Dropdown if input == FieldInput::Backspace => current
            .is_some_and(|v| !v.is_blank_text())
            .then_some(FieldValue::Text(String::new())),
        FieldKind::Radio | FieldKind::Dropdown => {
            let FieldInput::Choose(index) = input else {
                return None;
            };
            let option = field.options().get(index)?;
            Some(FieldValue::Text(option.value.clone()))
        }
        _ => None,
    }
}

fn apply_text_input(
    field: &FieldDefinition,
    current: Option<&FieldValue>,
    input: FieldInput,
) -> Option<FieldValue> {
    let mut text = current
        .and_then(FieldValue::as_text)
        .unwrap_or_default()
        .to_string();

    match input {
        FieldInput::Char(c) => {
            if at_max_length(field, &text) {
                return None;
            }
            text.push(c);
        }
        FieldInput::Newline if field.kind == FieldKind::Textarea => {
            if at_max_length(field, &text) {
                return None;
            }
            text.push('\n');
        }
        FieldInput::Backspace => {
            text.pop()?;
        }
        FieldInput::Newline | FieldInput::Choose(_) => return None,
    }

    Some(FieldValue::Text(text))
}

fn at_max_length(field: &FieldDefinition, text: &str) -> bool {
    field
        .max_length()
        .is_some_and(|max| text.chars().count() >= max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::schema::FieldOption;
    use pretty_assertions::assert_eq;

    fn options(values: &[&str]) -> Option<Vec<FieldOption>> {
        Some(
            values
                .iter()
                .map(|v| FieldOption {
                    value: v.to_string(),
                    label: v.to_uppercase(),
                    data_test_id: None,
                })
                .collect(),
        )
    }

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    #[test]
    fn test_typing_appends_to_text() {
        let field = FieldDefinition::new("name", FieldKind::Text, "Name");
        let value = apply_input(&field, None, FieldInput::Char('A'));
        assert_eq!(value, Some(text("A")));
        let value = apply_input(&field, value.as_ref(), FieldInput::Char('d'));
        assert_eq!(value, Some(text("Ad")));
    }

    #[test]
    fn test_backspace_on_empty_reports_nothing() {
        let field = FieldDefinition::new("name", FieldKind::Email, "Email");
        assert_eq!(apply_input(&field, None, FieldInput::Backspace), None);
        assert_eq!(
            apply_input(&field, Some(&text("ab")), FieldInput::Backspace),
            Some(text("a"))
        );
    }

    #[test]
    fn test_newline_only_in_textarea() {
        let single = FieldDefinition::new("name", FieldKind::Text, "Name");
        let multi = FieldDefinition::new("bio", FieldKind::Textarea, "Bio");
        assert_eq!(apply_input(&single, None, FieldInput::Newline), None);
        assert_eq!(
            apply_input(&multi, Some(&text("a")), FieldInput::Newline),
            Some(text("a\n"))
        );
    }

    #[test]
    fn test_typing_stops_at_max_length() {
        let mut field = FieldDefinition::new("code", FieldKind::Text, "Code");
        field.max_length = Some(2);
        assert_eq!(
            apply_input(&field, Some(&text("ab")), FieldInput::Char('c')),
            None
        );
        assert_eq!(
            apply_input(&field, Some(&text("a")), FieldInput::Char('b')),
            Some(text("ab"))
        );
    }

    #[test]
    fn test_lone_checkbox_toggles_flag() {
        let field = FieldDefinition::new("agree", FieldKind::Checkbox, "I agree");
        let checked = apply_input(&field, None, FieldInput::Choose(0));
        assert_eq!(checked, Some(FieldValue::Flag(true)));
        assert_eq!(
            apply_input(&field, checked.as_ref(), FieldInput::Choose(0)),
            Some(FieldValue::Flag(false))
        );
        assert_eq!(apply_input(&field, None, FieldInput::Char('x')), None);
    }

    #[test]
    fn test_checkbox_group_toggles_membership() {
        let mut field = FieldDefinition::new("topics", FieldKind::Checkbox, "Topics");
        field.options = options(&["rust", "go", "zig"]);

        let value = apply_input(&field, None, FieldInput::Choose(2));
        let value = apply_input(&field, value.as_ref(), FieldInput::Choose(0));
        assert_eq!(
            value,
            Some(FieldValue::Selection(vec!["zig".into(), "rust".into()]))
        );

        let value = apply_input(&field, value.as_ref(), FieldInput::Choose(2));
        assert_eq!(value, Some(FieldValue::Selection(vec!["rust".into()])));
    }

    #[test]
    fn test_radio_and_dropdown_select_option_value() {
        for kind in [FieldKind::Radio, FieldKind::Dropdown] {
            let mut field = FieldDefinition::new("level", kind, "Level");
            field.options = options(&["low", "high"]);
            assert_eq!(
                apply_input(&field, Some(&text("low")), FieldInput::Choose(1)),
                Some(text("high"))
            );
            assert_eq!(apply_input(&field, None, FieldInput::Choose(5)), None);
        }
    }

    #[test]
    fn test_backspace_clears_dropdown_only() {
        let mut dropdown = FieldDefinition::new("level", FieldKind::Dropdown, "Level");
        dropdown.options = options(&["low", "high"]);
        assert_eq!(
            apply_input(&dropdown, Some(&text("high")), FieldInput::Backspace),
            Some(text(""))
        );
        assert_eq!(apply_input(&dropdown, Some(&text("")), FieldInput::Backspace), None);
        assert_eq!(apply_input(&dropdown, None, FieldInput::Backspace), None);

        let mut radio = FieldDefinition::new("level", FieldKind::Radio, "Level");
        radio.options = options(&["low", "high"]);
        assert_eq!(
            apply_input(&radio, Some(&text("high")), FieldInput::Backspace),
            None
        );
    }

    #[test]
    fn test_unsupported_kind_ignores_input() {
        let field = FieldDefinition::new("file", FieldKind::Unsupported("file".into()), "File");
        assert_eq!(apply_input(&field, None, FieldInput::Char('a')), None);
        assert_eq!(apply_input(&field, None, FieldInput::Choose(0)), None);
    }
}
