//! Error dialog component

use super::base::{render_dialog, DialogConfig};
use crate::state::AppState;
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};

/// Render the oldest queued error over the whole screen, if any
pub fn render_error_dialog(frame: &mut Frame, state: &AppState) {
    let Some(message) = state.current_error() else {
        return;
    };

    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut hint = vec![
        Span::raw("Press "),
        Span::styled("Enter", key_style),
        Span::raw(" or "),
        Span::styled("Esc", key_style),
        Span::raw(" to dismiss"),
    ];
    let waiting = state.queued_errors().saturating_sub(1);
    if waiting > 0 {
        hint.push(Span::styled(
            format!(" ({waiting} more)"),
            Style::default().fg(Color::DarkGray),
        ));
    }

    render_dialog(
        frame,
        frame.area(),
        DialogConfig {
            title: "Error",
            title_color: Color::Red,
            border_color: Color::Red,
            message,
            hint: Some(hint),
            max_width: 60,
        },
    );
}
