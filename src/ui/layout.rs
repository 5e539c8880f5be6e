//! Layout components (content area, status bar)

use crate::app::App;
use crate::state::{FieldKind, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into content and a one-line status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::raw(" ")];

    spans.push(Span::styled(
        view_hints(app),
        Style::default().fg(Color::Gray),
    ));

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Yellow)));
    }

    let quit_hint = " ^C:quit ";
    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    let quit_width = quit_hint.len() as u16;
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_width),
        width: quit_width.min(area.width),
        ..area
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Keyboard hints for the current view
fn view_hints(app: &App) -> &'static str {
    match app.state.current_view {
        View::Login => "Tab:next  Enter:login  Esc:quit",
        View::Form => {
            let form = app.state.form.as_ref();
            if form.is_some_and(|f| f.is_buttons_row_active()) {
                "←/→:button  Enter:press  Tab:fields  Esc:previous"
            } else if form
                .and_then(|f| f.active_field())
                .is_some_and(|f| f.kind == FieldKind::Dropdown)
            {
                "←/→:option  Space:choose  Bksp:clear  Tab:next  ^S:next  Esc:previous"
            } else if form.is_some_and(|f| f.is_active_field_choice()) {
                "←/→:option  Space:choose  Tab:next  ^S:next  Esc:previous"
            } else {
                "Tab:next  ^S:next/submit  Esc:previous"
            }
        }
        View::Submitted => "y:copy  q:quit",
    }
}
