//! Multi-section form rendering

use super::field_renderer::{draw_schema_field, field_height, FieldView};
use super::progress::{progress_line, step_caption};
use crate::app::App;
use crate::platform::{JUMP_SHORTCUT, NEXT_SHORTCUT, PREVIOUS_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::{section_buttons, FormSession, SectionCursor};
use crate::ui::components::{render_button_row, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw the form view for the current section
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let Some(session) = &app.state.session else {
        return;
    };
    let cursor = &app.state.section_cursor;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Title
            Constraint::Length(2),             // Progress
            Constraint::Min(5),                // Section card
            Constraint::Length(BUTTON_HEIGHT), // Buttons
            Constraint::Length(1),             // Help
        ])
        .split(area);

    draw_title(frame, chunks[0], app, session);
    draw_progress(frame, chunks[1], session);
    draw_section(frame, chunks[2], session, cursor);

    let buttons = section_buttons(session);
    let labels: Vec<&str> = buttons.iter().map(|b| b.label()).collect();
    let selected = cursor
        .is_buttons_row_active()
        .then(|| cursor.selected_button.min(labels.len().saturating_sub(1)));
    render_button_row(frame, chunks[3], &labels, selected);

    draw_help(frame, chunks[4], session);
}

fn draw_title(frame: &mut Frame, area: Rect, app: &App, session: &FormSession) {
    let mut spans = vec![Span::styled(
        session.schema().form_title.as_str(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(user) = &app.state.user {
        spans.push(Span::styled(
            format!("  {} ({})", user.name, user.roll_number),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let title = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(title, area);
}

fn draw_progress(frame: &mut Frame, area: Rect, session: &FormSession) {
    let lines = vec![
        progress_line(session),
        Line::from(Span::styled(
            step_caption(session),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

/// First field to draw so that the focused one fits in `available` rows
fn first_visible(heights: &[u16], focused: usize, available: u16) -> usize {
    let focused = focused.min(heights.len().saturating_sub(1));
    let mut start = focused;
    let mut used = heights.get(focused).copied().unwrap_or(0);
    while start > 0 && used + heights[start - 1] <= available {
        used += heights[start - 1];
        start -= 1;
    }
    start
}

fn draw_section(frame: &mut Frame, area: Rect, session: &FormSession, cursor: &SectionCursor) {
    let section = session.current_section();
    let block = Block::default()
        .title(format!(" {} ", section.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut fields_area = inner;
    if let Some(description) = &section.description {
        let description_area = Rect {
            height: 2u16.min(inner.height),
            ..inner
        };
        frame.render_widget(
            Paragraph::new(Span::styled(
                description.as_str(),
                Style::default().fg(Color::Gray),
            ))
            .wrap(Wrap { trim: true }),
            description_area,
        );
        fields_area.y += description_area.height;
        fields_area.height -= description_area.height;
    }

    let heights: Vec<u16> = section
        .fields
        .iter()
        .map(|f| field_height(f, session.field_error(&f.field_id).is_some()))
        .collect();

    let start = first_visible(&heights, cursor.active_field_index, fields_area.height);
    let mut y = fields_area.y;
    let bottom = fields_area.y + fields_area.height;

    for (idx, field) in section.fields.iter().enumerate().skip(start) {
        let height = heights[idx];
        if y + height > bottom {
            break;
        }
        let is_active = idx == cursor.active_field_index;
        let view = FieldView {
            field,
            answer: session.answer(&field.field_id),
            error: session.field_error(&field.field_id),
            is_active,
            option_index: if is_active { cursor.option_index } else { 0 },
        };
        draw_schema_field(
            frame,
            Rect {
                y,
                height,
                ..fields_area
            },
            &view,
        );
        y += height;
    }
}

fn draw_help(frame: &mut Frame, area: Rect, session: &FormSession) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Cyan));
    let mut spans = vec![
        key("Tab"),
        Span::raw(": next field  "),
        key("Space"),
        Span::raw(": select  "),
    ];
    if !session.wizard().is_first() {
        spans.push(key(PREVIOUS_SHORTCUT));
        spans.push(Span::raw(": previous  "));
    }
    if session.wizard().is_last() {
        spans.push(key(SUBMIT_SHORTCUT));
        spans.push(Span::raw(": submit  "));
    } else {
        spans.push(key(NEXT_SHORTCUT));
        spans.push(Span::raw(": next  "));
    }
    spans.push(key(JUMP_SHORTCUT));
    spans.push(Span::raw(": jump  "));
    spans.push(key("Esc"));
    spans.push(Span::raw(": logout"));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_everything_fits() {
        assert_eq!(first_visible(&[3, 3, 3], 2, 20), 0);
    }

    #[test]
    fn test_scrolls_to_keep_focus_visible() {
        assert_eq!(first_visible(&[3, 3, 3, 3], 3, 7), 2);
        assert_eq!(first_visible(&[3, 6, 3], 2, 9), 1);
    }

    #[test]
    fn test_buttons_row_keeps_last_field_visible() {
        assert_eq!(first_visible(&[3, 3, 3], 3, 6), 1);
    }

    #[test]
    fn test_empty_section() {
        assert_eq!(first_visible(&[], 0, 10), 0);
    }
}
