//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod login;
mod submitted;

use crate::app::App;
use crate::state::View;
use components::{render_error_dialog, render_loading_dialog};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (header_area, main_area, status_area) = layout::create_layout(frame.area());

    layout::draw_header(frame, header_area, app);

    match &app.state.current_view {
        View::Login => login::draw(frame, main_area, app),
        View::Loading => render_loading_dialog(frame, main_area, "Loading form..."),
        View::Form => forms::draw_form(frame, main_area, app),
        View::Submitted => submitted::draw(frame, main_area, app),
    }

    layout::draw_status_bar(frame, status_area, app);

    // Error dialog goes on top of everything
    render_error_dialog(frame, &app.state);
}
