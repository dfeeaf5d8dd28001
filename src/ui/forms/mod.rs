//! Form rendering

mod field_renderer;
mod progress;
mod section_form;

pub use field_renderer::draw_field;
pub use section_form::draw as draw_form;
