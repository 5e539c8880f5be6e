//! Login screen

use super::components::{render_button, BUTTON_HEIGHT};
use super::forms::{draw_field, field_height, FieldView};
use crate::state::{FieldValue, LoginField, LoginState};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const PANEL_WIDTH: u16 = 56;

pub fn draw(frame: &mut Frame, area: Rect, login: &LoginState) {
    let roll_number_def = LoginState::roll_number_field();
    let name_def = LoginState::name_field();
    let roll_number = FieldValue::Text(login.roll_number.clone());
    let name = FieldValue::Text(login.name.clone());

    let error_height = if login.error.is_some() { 3 } else { 0 };
    let panel_height = 2 // borders
        + 2 // title and spacer
        + field_height(&roll_number_def, login.roll_number_error.is_some())
        + field_height(&name_def, login.name_error.is_some())
        + error_height
        + BUTTON_HEIGHT;
    let panel = centered(area, PANEL_WIDTH, panel_height);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(field_height(
                &roll_number_def,
                login.roll_number_error.is_some(),
            )),
            Constraint::Length(field_height(&name_def, login.name_error.is_some())),
            Constraint::Length(error_height),
            Constraint::Length(BUTTON_HEIGHT),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Student Login",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center),
        chunks[0],
    );

    draw_field(
        frame,
        chunks[1],
        &FieldView {
            field: &roll_number_def,
            value: Some(&roll_number),
            error: login.roll_number_error.as_deref(),
            is_active: login.active_field == LoginField::RollNumber,
            option_cursor: 0,
        },
    );
    draw_field(
        frame,
        chunks[2],
        &FieldView {
            field: &name_def,
            value: Some(&name),
            error: login.name_error.as_deref(),
            is_active: login.active_field == LoginField::Name,
            option_cursor: 0,
        },
    );

    if let Some(error) = &login.error {
        let error_box = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red)),
            );
        frame.render_widget(error_box, chunks[3]);
    }

    let label = if login.is_busy() {
        "Signing in..."
    } else {
        "Login"
    };
    render_button(
        frame,
        chunks[4],
        label,
        login.active_field == LoginField::LoginButton,
        !login.is_busy(),
        None,
    );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::UserData;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(login: &LoginState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal
            .draw(|frame| draw(frame, frame.area(), login))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_login_screen() {
        let screen = render(&LoginState::default());
        assert!(screen.contains("Student Login"));
        assert!(screen.contains("Roll Number *"));
        assert!(screen.contains("Enter your roll number"));
        assert!(screen.contains("Login"));
    }

    #[test]
    fn test_login_failure_message() {
        let login = LoginState {
            error: Some("User already exists".to_string()),
            ..LoginState::default()
        };
        assert!(render(&login).contains("User already exists"));
    }

    #[test]
    fn test_busy_button_label() {
        let login = LoginState {
            pending: Some(UserData {
                roll_number: "42".to_string(),
                name: "Ada".to_string(),
            }),
            ..LoginState::default()
        };
        assert!(render(&login).contains("Signing in..."));
    }
}
