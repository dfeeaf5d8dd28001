//! Loading indicator dialog

use super::base::{render_dialog, DialogConfig};
use ratatui::{layout::Rect, style::Color, Frame};

/// Render a "please wait" box centered in `area`
pub fn render_loading_dialog(frame: &mut Frame, area: Rect, message: &str) {
    render_dialog(
        frame,
        area,
        DialogConfig {
            title: "Loading",
            title_color: Color::Yellow,
            border_color: Color::Yellow,
            message,
            hint: None,
            max_width: 50,
        },
    );
}
