//! Confirmation screen shown after a successful submit

use crate::app::App;
use crate::state::{AnswerSet, AnswerValue, FieldSchema, FormSession};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Human-readable answer, with option values shown by their labels
fn display_answer(field: &FieldSchema, answer: Option<&AnswerValue>) -> String {
    match answer {
        None => "-".to_string(),
        Some(AnswerValue::Text(value)) if field.kind.is_choice() => {
            field.option_label(value).to_string()
        }
        Some(AnswerValue::Text(value)) if value.is_empty() => "-".to_string(),
        Some(AnswerValue::Text(value)) => value.replace('\n', " / "),
        Some(AnswerValue::Choices(values)) if values.is_empty() => "-".to_string(),
        Some(AnswerValue::Choices(values)) => values
            .iter()
            .map(|v| field.option_label(v))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

fn summary_lines<'a>(session: &'a FormSession, answers: &AnswerSet) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    for section in &session.schema().sections {
        lines.push(Line::from(Span::styled(
            section.title.as_str(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        for field in &section.fields {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {}: ", field.label),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(display_answer(field, answers.get(&field.field_id))),
            ]));
        }
    }
    lines
}

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let Some(submission) = &app.state.submission else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),      // Banner
            Constraint::Percentage(50), // Summary
            Constraint::Min(3),         // Payload
        ])
        .split(area);

    let banner = Paragraph::new(Line::from(vec![
        Span::styled(
            "✓ Form submitted successfully!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                "  {}",
                submission.submitted_at.format("%Y-%m-%d %H:%M:%S")
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)),
    );
    frame.render_widget(banner, chunks[0]);

    if let Some(session) = &app.state.session {
        let summary = Paragraph::new(summary_lines(session, &submission.answers))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title(" Summary ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        frame.render_widget(summary, chunks[1]);
    }

    let payload = Paragraph::new(submission.payload.as_str())
        .style(Style::default().fg(Color::Gray))
        .block(
            Block::default()
                .title(" Submitted data ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(payload, chunks[2]);
}
