//! Wizard progress indicator

use crate::state::FormSession;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Where a section sits relative to the one on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Completed,
    Current,
    Upcoming,
}

impl StepStatus {
    pub fn of(step: usize, current: usize) -> Self {
        match step.cmp(&current) {
            std::cmp::Ordering::Less => Self::Completed,
            std::cmp::Ordering::Equal => Self::Current,
            std::cmp::Ordering::Greater => Self::Upcoming,
        }
    }

    fn marker(self) -> &'static str {
        match self {
            Self::Completed => "✓",
            Self::Current => "●",
            Self::Upcoming => "○",
        }
    }

    fn style(self) -> Style {
        match self {
            Self::Completed => Style::default().fg(Color::Green),
            Self::Current => Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            Self::Upcoming => Style::default().fg(Color::DarkGray),
        }
    }
}

/// One step per section, numbered from 1
pub fn progress_line(session: &FormSession) -> Line<'_> {
    let current = session.current_index();
    let mut spans = Vec::new();

    for (idx, section) in session.schema().sections.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled(" ── ", Style::default().fg(Color::DarkGray)));
        }
        let status = StepStatus::of(idx, current);
        spans.push(Span::styled(
            format!("{} {} {}", status.marker(), idx + 1, section.title),
            status.style(),
        ));
    }

    Line::from(spans)
}

/// "Section i of n" caption
pub fn step_caption(session: &FormSession) -> String {
    format!(
        "Section {} of {}",
        session.current_index() + 1,
        session.wizard().section_count()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{FieldKind, FieldSchema, FormSchema, SectionSchema};
    use pretty_assertions::assert_eq;

    fn session() -> FormSession {
        let sections = ["Personal", "Contact", "Review"]
            .iter()
            .enumerate()
            .map(|(idx, title)| SectionSchema {
                section_id: idx as u32 + 1,
                title: title.to_string(),
                description: None,
                fields: vec![FieldSchema::new(
                    &format!("f{idx}"),
                    FieldKind::ShortText,
                    "Field",
                )],
            })
            .collect();
        FormSession::new(FormSchema {
            form_title: "Form".to_string(),
            form_id: None,
            version: None,
            sections,
        })
        .unwrap()
    }

    #[test]
    fn test_step_status() {
        assert_eq!(StepStatus::of(0, 1), StepStatus::Completed);
        assert_eq!(StepStatus::of(1, 1), StepStatus::Current);
        assert_eq!(StepStatus::of(2, 1), StepStatus::Upcoming);
    }

    #[test]
    fn test_progress_line_follows_wizard() {
        let mut session = session();
        assert!(session.next());

        let text: String = progress_line(&session)
            .spans
            .iter()
            .map(|s| s.content.to_string())
            .collect();
        assert_eq!(text, "✓ 1 Personal ── ● 2 Contact ── ○ 3 Review");
        assert_eq!(step_caption(&session), "Section 2 of 3");
    }
}
