//! Button component for TUI

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Render a generic button with border
pub fn render_button(frame: &mut Frame, area: Rect, content: &str, is_selected: bool) {
    let border_style = if is_selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text_style = if is_selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(format!(" {content} ")).style(text_style);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}

/// Width of a button showing `label`
fn button_width(label: &str) -> u16 {
    // label + one space padding each side + borders
    label.chars().count() as u16 + 4
}

/// Render a right-aligned row of buttons; `selected` highlights one of them
pub fn render_button_row(frame: &mut Frame, area: Rect, labels: &[&str], selected: Option<usize>) {
    let mut constraints = vec![Constraint::Min(0)];
    for label in labels {
        constraints.push(Constraint::Length(button_width(label)));
        constraints.push(Constraint::Length(1));
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (idx, label) in labels.iter().enumerate() {
        render_button(frame, chunks[1 + idx * 2], label, selected == Some(idx));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_button_width_counts_chars() {
        assert_eq!(button_width("Next"), 8);
        assert_eq!(button_width("Précédent"), 13);
    }

    #[test]
    fn test_row_renders_every_label() {
        let mut terminal = Terminal::new(TestBackend::new(40, BUTTON_HEIGHT)).unwrap();
        terminal
            .draw(|frame| {
                render_button_row(frame, frame.area(), &["Previous", "Submit"], Some(1));
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let row: String = (0..40).map(|x| buffer[(x, 1)].symbol().to_string()).collect();
        assert!(row.contains("Previous"));
        assert!(row.contains("Submit"));
        assert!(row.find("Previous") < row.find("Submit"));
    }
}
