//! Form domain layer
//!
//! Schema store, answer set, field/section validation and wizard navigation,
//! plus the focus state the terminal UI keeps on top of them.

mod answers;
mod field;
mod form_state;
mod schema;
mod session;
mod validation;
mod wizard;

pub use answers::{AnswerSet, AnswerValue};
pub use field::FormField;
pub use form_state::{section_buttons, Form, FormButton, LoginForm, SectionCursor};
pub use schema::{FieldKind, FieldSchema, FormSchema};
pub use session::{FormSession, SessionError};
pub use validation::FieldError;

#[cfg(test)]
pub use schema::SectionSchema;
