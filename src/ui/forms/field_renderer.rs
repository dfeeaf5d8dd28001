//! Field rendering utilities for forms

use crate::state::{AnswerValue, FieldError, FieldKind, FieldSchema, FormField};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows given to a multi-line text box, borders included
const MULTILINE_HEIGHT: u16 = 6;

/// Rows a schema field needs, including its error line
pub fn field_height(field: &FieldSchema, has_error: bool) -> u16 {
    let body = match field.kind {
        FieldKind::MultiLineText => MULTILINE_HEIGHT,
        FieldKind::Checkbox | FieldKind::Radio => field.options.len() as u16 + 2,
        FieldKind::ShortText
        | FieldKind::Phone
        | FieldKind::Email
        | FieldKind::Date
        | FieldKind::Dropdown => 3,
    };
    body + u16::from(has_error)
}

fn focus_style(is_active: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn cursor_span(is_active: bool) -> Span<'static> {
    Span::styled(if is_active { "▌" } else { "" }, Style::default().fg(Color::Cyan))
}

/// Draw a free-standing text input (login screen)
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let value = field.display_value();
    let value_span = match (&field.placeholder, value.is_empty()) {
        (Some(placeholder), true) => Span::styled(
            placeholder.clone(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ),
        (None, true) if !is_active => Span::styled("(empty)", focus_style(false)),
        _ => Span::styled(value, focus_style(is_active)),
    };

    let content = Paragraph::new(Line::from(vec![value_span, cursor_span(is_active)]));
    let block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(focus_style(is_active));

    frame.render_widget(content.block(block), area);
}

/// Everything needed to draw one schema field
pub struct FieldView<'a> {
    pub field: &'a FieldSchema,
    pub answer: Option<&'a AnswerValue>,
    pub error: Option<&'a FieldError>,
    pub is_active: bool,
    /// Highlighted option when the field is active
    pub option_index: usize,
}

/// Draw a schema field with its inline error
pub fn draw_schema_field(frame: &mut Frame, area: Rect, view: &FieldView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(u16::from(view.error.is_some())),
        ])
        .split(area);

    let field = view.field;
    let required = if field.required { " *" } else { "" };
    let border_color = match (view.is_active, view.error.is_some()) {
        (true, _) => Color::Cyan,
        (false, true) => Color::Red,
        (false, false) => Color::DarkGray,
    };
    let mut block = Block::default()
        .title(format!(" {}{required} ", field.label))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    if view.is_active {
        block = block.title_bottom(Line::styled(
            format!(" {} ", field.kind.label()),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let content = match field.kind {
        FieldKind::ShortText | FieldKind::Phone | FieldKind::Email | FieldKind::Date => {
            text_content(view, false)
        }
        FieldKind::MultiLineText => text_content(view, true),
        FieldKind::Dropdown => dropdown_content(view),
        FieldKind::Checkbox | FieldKind::Radio => option_list_content(view),
    };

    frame.render_widget(
        content.wrap(Wrap { trim: false }).block(block),
        chunks[0],
    );

    if let Some(error) = view.error {
        let line = Paragraph::new(Span::styled(
            format!(" {error}"),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(line, chunks[1]);
    }
}

fn text_content<'a>(view: &'a FieldView, multiline: bool) -> Paragraph<'a> {
    let value = view.answer.and_then(AnswerValue::as_text).unwrap_or("");

    if value.is_empty() {
        let placeholder = match (&view.field.placeholder, view.field.kind) {
            (Some(p), _) => p.as_str(),
            (None, FieldKind::Date) => "YYYY-MM-DD",
            (None, _) if view.is_active => "",
            (None, _) => "(empty)",
        };
        return Paragraph::new(Line::from(vec![
            Span::styled(
                placeholder,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ),
            cursor_span(view.is_active),
        ]));
    }

    let style = if view.is_active {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };

    if !multiline {
        return Paragraph::new(Line::from(vec![
            Span::styled(value, style),
            cursor_span(view.is_active),
        ]));
    }

    // split('\n') keeps a trailing empty line so the cursor follows a fresh newline
    let mut lines: Vec<Line> = value
        .split('\n')
        .map(|l| Line::from(Span::styled(l, style)))
        .collect();
    if let Some(last) = lines.last_mut() {
        last.spans.push(cursor_span(view.is_active));
    }
    Paragraph::new(lines)
}

fn dropdown_content<'a>(view: &'a FieldView) -> Paragraph<'a> {
    let field = view.field;
    let selected = view.answer.and_then(AnswerValue::as_text);

    if !view.is_active {
        let span = match selected {
            Some(value) => Span::styled(field.option_label(value), Style::default().fg(Color::Gray)),
            None => Span::styled(
                field.placeholder.as_deref().unwrap_or("(none selected)"),
                Style::default().fg(Color::DarkGray),
            ),
        };
        return Paragraph::new(Line::from(span));
    }

    let Some(option) = field.options.get(view.option_index) else {
        return Paragraph::new("");
    };
    let marker = if selected == Some(option.value.as_str()) {
        " ✓"
    } else {
        ""
    };
    let arrow = |enabled: bool| {
        Style::default().fg(if enabled { Color::Cyan } else { Color::DarkGray })
    };

    Paragraph::new(Line::from(vec![
        Span::styled("◀ ", arrow(view.option_index > 0)),
        Span::styled(
            option.label.as_str(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(marker, Style::default().fg(Color::Green)),
        Span::styled(" ▶", arrow(view.option_index + 1 < field.options.len())),
        Span::styled(
            format!("  {}/{}", view.option_index + 1, field.options.len()),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
}

fn option_list_content<'a>(view: &'a FieldView) -> Paragraph<'a> {
    let field = view.field;
    let lines = field
        .options
        .iter()
        .enumerate()
        .map(|(idx, option)| {
            let checked = match view.answer {
                Some(AnswerValue::Choices(values)) => values.contains(&option.value),
                Some(AnswerValue::Text(value)) => *value == option.value,
                None => false,
            };
            let marker = match (field.kind, checked) {
                (FieldKind::Checkbox, true) => "[x] ",
                (FieldKind::Checkbox, false) => "[ ] ",
                (_, true) => "(•) ",
                (_, false) => "( ) ",
            };
            let highlighted = view.is_active && idx == view.option_index;
            let style = if highlighted {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else if checked {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(vec![
                Span::styled(marker, style),
                Span::styled(option.label.as_str(), style),
            ])
        })
        .collect::<Vec<_>>();
    Paragraph::new(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(view: &FieldView, width: u16) -> Vec<String> {
        let height = field_height(view.field, view.error.is_some());
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| draw_schema_field(frame, frame.area(), view))
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| (0..width).map(|x| buffer[(x, y)].symbol().to_string()).collect())
            .collect()
    }

    fn view<'a>(field: &'a FieldSchema, answer: Option<&'a AnswerValue>) -> FieldView<'a> {
        FieldView {
            field,
            answer,
            error: None,
            is_active: false,
            option_index: 0,
        }
    }

    #[test]
    fn test_heights_per_kind() {
        let text = FieldSchema::new("a", FieldKind::ShortText, "A");
        let area = FieldSchema::new("b", FieldKind::MultiLineText, "B");
        let radio = FieldSchema::new("c", FieldKind::Radio, "C")
            .with_options(&[("1", "One"), ("2", "Two"), ("3", "Three")]);
        assert_eq!(field_height(&text, false), 3);
        assert_eq!(field_height(&text, true), 4);
        assert_eq!(field_height(&area, false), MULTILINE_HEIGHT);
        assert_eq!(field_height(&radio, false), 5);
    }

    #[test]
    fn test_required_label_and_value() {
        let field = FieldSchema::new("name", FieldKind::ShortText, "Full Name").required();
        let answer = AnswerValue::text("Jane");
        let rows = render(&view(&field, Some(&answer)), 30);
        assert!(rows[0].contains("Full Name *"));
        assert!(rows[1].contains("Jane"));
    }

    #[test]
    fn test_error_shown_under_field() {
        let field = FieldSchema::new("name", FieldKind::ShortText, "Name").required();
        let error = FieldError::Required {
            label: "Name".to_string(),
        };
        let mut field_view = view(&field, None);
        field_view.error = Some(&error);
        let rows = render(&field_view, 30);
        assert!(rows[3].contains("Name is required"));
    }

    #[test]
    fn test_checkbox_marks_selected_options() {
        let field = FieldSchema::new("langs", FieldKind::Checkbox, "Languages")
            .with_options(&[("rs", "Rust"), ("go", "Go")]);
        let answer = AnswerValue::choices(["go"]);
        let rows = render(&view(&field, Some(&answer)), 30);
        assert!(rows[1].contains("[ ] Rust"));
        assert!(rows[2].contains("[x] Go"));
    }

    #[test]
    fn test_radio_marks_selected_option() {
        let field = FieldSchema::new("year", FieldKind::Radio, "Year")
            .with_options(&[("1", "First"), ("2", "Second")]);
        let answer = AnswerValue::text("1");
        let rows = render(&view(&field, Some(&answer)), 30);
        assert!(rows[1].contains("(•) First"));
        assert!(rows[2].contains("( ) Second"));
    }

    #[test]
    fn test_dropdown_shows_selected_label_when_inactive() {
        let field = FieldSchema::new("branch", FieldKind::Dropdown, "Branch")
            .with_options(&[("cse", "Computer Science"), ("ee", "Electrical")]);
        let answer = AnswerValue::text("ee");
        let rows = render(&view(&field, Some(&answer)), 40);
        assert!(rows[1].contains("Electrical"));
    }

    #[test]
    fn test_active_dropdown_shows_highlighted_option() {
        let field = FieldSchema::new("branch", FieldKind::Dropdown, "Branch")
            .with_options(&[("cse", "Computer Science"), ("ee", "Electrical")]);
        let mut field_view = view(&field, None);
        field_view.is_active = true;
        field_view.option_index = 1;
        let rows = render(&field_view, 50);
        assert!(rows[1].contains("Electrical"));
        assert!(rows[1].contains("2/2"));
    }

    #[test]
    fn test_date_placeholder() {
        let field = FieldSchema::new("dob", FieldKind::Date, "Date of Birth");
        let rows = render(&view(&field, None), 30);
        assert!(rows[1].contains("YYYY-MM-DD"));
    }
}
