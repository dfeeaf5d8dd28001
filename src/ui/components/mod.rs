//! Reusable UI components

mod button;
mod dialog;

pub use button::{render_button, render_button_row, BUTTON_HEIGHT};
pub use dialog::{render_error_dialog, render_loading_dialog};
