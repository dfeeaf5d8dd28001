//! Dialog components for TUI

mod base;
mod error_dialog;
mod loading_dialog;

pub use error_dialog::render_error_dialog;
pub use loading_dialog::render_loading_dialog;
