//! Current-section view of a form session

use super::field_renderer::{draw_field, field_height, FieldView};
use crate::state::{FormState, SectionButton};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

/// Draw the form title, progress, current section and its buttons
pub fn draw_form(frame: &mut Frame, area: Rect, form: &FormState) {
    let session = &form.session;
    let Some(section) = session.current_section() else {
        return;
    };
    let index = session.current_index().unwrap_or(0);

    let block = Block::default()
        .title(format!(" {} ", session.form().form_title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let description_height = u16::from(!section.description.is_empty());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                  // Progress
            Constraint::Length(1),                  // Spacer
            Constraint::Length(1),                  // Section title
            Constraint::Length(description_height), // Description
            Constraint::Length(1),                  // Spacer
            Constraint::Min(0),                     // Fields
            Constraint::Length(BUTTON_HEIGHT),      // Buttons
        ])
        .split(inner);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
        .ratio((session.progress_percent() / 100.0).clamp(0.0, 1.0))
        .label(format!(
            "Section {} of {}",
            index + 1,
            session.section_count()
        ));
    frame.render_widget(gauge, chunks[0]);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            section.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ))),
        chunks[2],
    );
    if !section.description.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                section.description.as_str(),
                Style::default().fg(Color::Gray),
            ))
            .wrap(Wrap { trim: true }),
            chunks[3],
        );
    }

    draw_fields(frame, chunks[5], form);
    draw_buttons(frame, chunks[6], form);
}

fn draw_fields(frame: &mut Frame, area: Rect, form: &FormState) {
    let session = &form.session;
    let fields = session.current_fields();
    let heights: Vec<u16> = fields
        .iter()
        .map(|f| field_height(f, session.current_error(&f.field_id).is_some()))
        .collect();

    let first = first_visible(&heights, form.active_field_index, area.height);

    let mut y = area.y;
    for (index, field) in fields.iter().enumerate().skip(first) {
        let height = heights[index];
        if y + height > area.y + area.height {
            break;
        }
        let view = FieldView {
            field,
            value: session.value(&field.field_id),
            error: session.current_error(&field.field_id),
            is_active: index == form.active_field_index,
            option_cursor: form.option_cursor,
        };
        draw_field(
            frame,
            Rect {
                y,
                height,
                ..area
            },
            &view,
        );
        y += height;
    }
}

/// First field to draw so the focused one stays on screen
fn first_visible(heights: &[u16], active: usize, available: u16) -> usize {
    let active = active.min(heights.len().saturating_sub(1));
    let mut first = 0;
    let mut used: u16 = heights.iter().take(active + 1).sum();
    while used > available && first < active {
        used -= heights[first];
        first += 1;
    }
    first
}

fn draw_buttons(frame: &mut Frame, area: Rect, form: &FormState) {
    let session = &form.session;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(14),
            Constraint::Min(0),
            Constraint::Length(14),
        ])
        .split(area);

    let on_buttons = form.is_buttons_row_active();
    let forward_label = if session.is_last_section() {
        "Submit"
    } else {
        "Next"
    };
    let forward_accent = session.is_last_section().then_some(Color::Green);

    render_button(
        frame,
        chunks[0],
        "Previous",
        on_buttons && form.selected_button == SectionButton::Previous,
        !session.is_first_section(),
        None,
    );
    render_button(
        frame,
        chunks[2],
        forward_label,
        on_buttons && form.selected_button == SectionButton::Forward,
        true,
        forward_accent,
    );
}
