//! Field rendering for schema-driven forms

use crate::state::{FieldDefinition, FieldKind, FieldValue};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const TEXTAREA_ROWS: u16 = 4;

/// Everything needed to draw one field
pub struct FieldView<'a> {
    pub field: &'a FieldDefinition,
    pub value: Option<&'a FieldValue>,
    pub error: Option<&'a str>,
    pub is_active: bool,
    /// Focused option, meaningful for option lists
    pub option_cursor: usize,
}

/// Rows a field occupies, including its error line
pub fn field_height(field: &FieldDefinition, has_error: bool) -> u16 {
    let body = match field.kind {
        FieldKind::Textarea => TEXTAREA_ROWS + 2,
        FieldKind::Radio => field.options().len() as u16 + 2,
        FieldKind::Checkbox if field.is_checkbox_group() => field.options().len() as u16 + 2,
        _ => 3,
    };
    body + u16::from(has_error)
}

/// Draw a form field according to its kind
pub fn draw_field(frame: &mut Frame, area: Rect, view: &FieldView) {
    let (box_area, error_area) = split_error_line(area, view.error.is_some());

    let border_style = if view.error.is_some() {
        Style::default().fg(Color::Red)
    } else if view.is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .title(title(view.field))
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines = match &view.field.kind {
        kind if kind.is_text_like() => text_lines(view),
        FieldKind::Checkbox if view.field.is_checkbox_group() => option_lines(view, true),
        FieldKind::Checkbox => vec![checkbox_line(view)],
        FieldKind::Radio => option_lines(view, false),
        FieldKind::Dropdown => vec![dropdown_line(view)],
        FieldKind::Unsupported(name) => vec![Line::from(Span::styled(
            format!("Unsupported field type: {name}"),
            Style::default().fg(Color::Yellow),
        ))],
        // is_text_like covers the remaining kinds
        _ => Vec::new(),
    };

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block),
        box_area,
    );

    if let (Some(error), Some(error_area)) = (view.error, error_area) {
        let error_line = Paragraph::new(Line::from(Span::styled(
            format!(" {error}"),
            Style::default().fg(Color::Red),
        )));
        frame.render_widget(error_line, error_area);
    }
}

fn split_error_line(area: Rect, has_error: bool) -> (Rect, Option<Rect>) {
    if !has_error || area.height < 2 {
        return (area, None);
    }
    let box_area = Rect {
        height: area.height - 1,
        ..area
    };
    let error_area = Rect {
        y: area.y + area.height - 1,
        height: 1,
        ..area
    };
    (box_area, Some(error_area))
}

fn title(field: &FieldDefinition) -> Line<'static> {
    let mut spans = vec![Span::raw(format!(" {}", field.label))];
    if field.required {
        spans.push(Span::styled(" *", Style::default().fg(Color::Red)));
    }
    spans.push(Span::raw(" "));
    Line::from(spans)
}

fn text_lines<'a>(view: &FieldView<'a>) -> Vec<Line<'a>> {
    let cursor = Span::styled("▌", Style::default().fg(Color::Cyan));
    let text = view.value.and_then(FieldValue::as_text).unwrap_or_default();

    if text.is_empty() {
        let placeholder = view.field.placeholder.as_deref().unwrap_or_default();
        let mut spans = Vec::new();
        if view.is_active {
            spans.push(cursor);
        }
        spans.push(Span::styled(
            placeholder.to_string(),
            Style::default().fg(Color::DarkGray),
        ));
        return vec![Line::from(spans)];
    }

    let style = if view.is_active {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };
    let mut lines: Vec<Line> = text
        .split('\n')
        .map(|l| Line::from(Span::styled(l.to_string(), style)))
        .collect();
    if view.is_active {
        if let Some(last) = lines.last_mut() {
            last.spans.push(cursor);
        }
    }
    lines
}

fn option_lines<'a>(view: &FieldView<'a>, multi: bool) -> Vec<Line<'a>> {
    view.field
        .options()
        .iter()
        .enumerate()
        .map(|(index, option)| {
            let selected = view.value.is_some_and(|v| v.is_selected(&option.value));
            let marker = match (multi, selected) {
                (true, true) => "[x]",
                (true, false) => "[ ]",
                (false, true) => "(•)",
                (false, false) => "( )",
            };
            let focused = view.is_active && index == view.option_cursor;
            let style = if focused {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(Span::styled(format!("{marker} {}", option.label), style))
        })
        .collect()
}

fn checkbox_line<'a>(view: &FieldView<'a>) -> Line<'a> {
    let checked = matches!(view.value, Some(FieldValue::Flag(true)));
    let marker = if checked { "[x]" } else { "[ ]" };
    let style = if view.is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Line::from(Span::styled(format!("{marker} {}", view.field.label), style))
}

fn dropdown_line<'a>(view: &FieldView<'a>) -> Line<'a> {
    let options = view.field.options();
    let chosen = view
        .value
        .and_then(|v| options.iter().find(|o| v.is_selected(&o.value)));

    if view.is_active {
        let focused = options
            .get(view.option_cursor)
            .map_or("Select an option", |o| o.label.as_str());
        let marker = if chosen.is_some_and(|c| Some(c) == options.get(view.option_cursor)) {
            " ✓"
        } else {
            ""
        };
        return Line::from(vec![
            Span::styled("◀ ", Style::default().fg(Color::Cyan)),
            Span::styled(
                format!("{focused}{marker}"),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ▶", Style::default().fg(Color::Cyan)),
        ]);
    }

    match chosen {
        Some(option) => Line::from(option.label.clone()),
        None => Line::from(Span::styled(
            "Select an option",
            Style::default().fg(Color::DarkGray),
        )),
    }
}
