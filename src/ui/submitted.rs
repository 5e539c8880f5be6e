//! Confirmation screen shown after a successful submit

use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Headline
            Constraint::Min(0),    // Payload
        ])
        .split(area);

    let title = app
        .state
        .form
        .as_ref()
        .map(|f| f.session.form().form_title.as_str())
        .unwrap_or_default();

    let headline = vec![
        Line::from(Span::styled(
            "Form Submitted Successfully!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Thank you for completing {title}.")),
    ];
    frame.render_widget(
        Paragraph::new(headline).alignment(Alignment::Center),
        chunks[0],
    );

    let payload = app.submitted_json().unwrap_or_default();
    frame.render_widget(
        Paragraph::new(payload)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title(" Submission ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            ),
        chunks[1],
    );
}
