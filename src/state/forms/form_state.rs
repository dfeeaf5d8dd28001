//! Focus and editing state for the login form and the current section

use super::answers::AnswerValue;
use super::field::FormField;
use super::schema::{FieldKind, FieldSchema};
use super::session::{FormSession, SessionError};

/// Longest value a date input accepts (YYYY-MM-DD)
const DATE_INPUT_LEN: usize = 10;

/// Trait for common form focus operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

// Login Form
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub roll_number: FormField,
    pub name: FormField,
    pub active_field_index: usize,
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            roll_number: FormField::text("Roll Number")
                .with_placeholder("Enter your roll number"),
            name: FormField::text("Name").with_placeholder("Enter your full name"),
            active_field_index: 0,
        }
    }

    /// Returns true if the Login button is focused
    pub fn is_button_active(&self) -> bool {
        self.active_field_index == 2
    }

    pub fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        match self.active_field_index {
            0 => Some(&mut self.roll_number),
            1 => Some(&mut self.name),
            _ => None,
        }
    }

    pub fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.roll_number),
            1 => Some(&self.name),
            // Index 2 is the Login button
            _ => None,
        }
    }

    /// Trimmed roll number and name, or `None` when either is blank
    pub fn credentials(&self) -> Option<(String, String)> {
        let roll_number = self.roll_number.trimmed();
        let name = self.name.trimmed();
        if roll_number.is_empty() || name.is_empty() {
            None
        } else {
            Some((roll_number.to_string(), name.to_string()))
        }
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for LoginForm {
    fn field_count(&self) -> usize {
        3 // roll number, name, button
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(2);
    }
}

/// Buttons shown under a section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormButton {
    Previous,
    Next,
    Submit,
}

impl FormButton {
    pub fn label(self) -> &'static str {
        match self {
            Self::Previous => "Previous",
            Self::Next => "Next",
            Self::Submit => "Submit",
        }
    }
}

/// Buttons available at the session's current position
pub fn section_buttons(session: &FormSession) -> Vec<FormButton> {
    let wizard = session.wizard();
    let mut buttons = Vec::with_capacity(2);
    if !wizard.is_first() {
        buttons.push(FormButton::Previous);
    }
    if wizard.is_last() {
        buttons.push(FormButton::Submit);
    } else {
        buttons.push(FormButton::Next);
    }
    buttons
}

/// Focus within the current section: one slot per field plus the buttons row
#[derive(Debug, Clone, Default)]
pub struct SectionCursor {
    pub active_field_index: usize,
    /// Highlighted option of the focused choice field
    pub option_index: usize,
    /// Selected button when the buttons row is focused
    pub selected_button: usize,
    field_count: usize,
}

impl SectionCursor {
    /// Fresh cursor for the session's current section
    pub fn for_section(session: &FormSession) -> Self {
        let field_count = session.current_section().fields.len();
        Self {
            active_field_index: 0,
            option_index: 0,
            // Default to the forward button (Next or Submit)
            selected_button: section_buttons(session).len() - 1,
            field_count,
        }
    }

    pub fn is_buttons_row_active(&self) -> bool {
        self.active_field_index == self.field_count
    }

    pub fn selected_button(&self, session: &FormSession) -> Option<FormButton> {
        let buttons = section_buttons(session);
        buttons
            .get(self.selected_button.min(buttons.len().saturating_sub(1)))
            .copied()
    }

    /// Move to the next button (wraps around)
    pub fn next_button(&mut self, session: &FormSession) {
        let count = section_buttons(session).len();
        self.selected_button = (self.selected_button + 1) % count;
    }

    /// Move to the previous button (wraps around)
    pub fn prev_button(&mut self, session: &FormSession) {
        let count = section_buttons(session).len();
        if self.selected_button == 0 {
            self.selected_button = count - 1;
        } else {
            self.selected_button -= 1;
        }
    }

    pub fn active_schema<'a>(&self, session: &'a FormSession) -> Option<&'a FieldSchema> {
        session
            .current_section()
            .fields
            .get(self.active_field_index)
    }

    /// Move the option highlight of a choice field, clamped to its options
    pub fn move_option(&mut self, session: &FormSession, forward: bool) {
        let Some(field) = self.active_schema(session) else {
            return;
        };
        if !field.kind.is_choice() || field.options.is_empty() {
            return;
        }
        let last = field.options.len() - 1;
        self.option_index = if forward {
            (self.option_index + 1).min(last)
        } else {
            self.option_index.saturating_sub(1)
        };
    }

    /// Type a character into the focused text-like or date field
    pub fn input_char(&self, session: &mut FormSession, c: char) -> Result<(), SessionError> {
        let Some(field) = self.active_schema(session) else {
            return Ok(());
        };
        let field_id = field.field_id.clone();
        let mut value = current_text(session, &field_id);

        match field.kind {
            FieldKind::ShortText | FieldKind::Phone | FieldKind::Email | FieldKind::MultiLineText => {
                value.push(c)
            }
            FieldKind::Date => {
                if !(c.is_ascii_digit() || c == '-') || value.chars().count() >= DATE_INPUT_LEN {
                    return Ok(());
                }
                value.push(c);
            }
            FieldKind::Dropdown | FieldKind::Checkbox | FieldKind::Radio => return Ok(()),
        }

        session.set_answer(&field_id, AnswerValue::Text(value))
    }

    /// Insert a line break into a multi-line field
    pub fn newline(&self, session: &mut FormSession) -> Result<(), SessionError> {
        match self.active_schema(session) {
            Some(field) if field.kind == FieldKind::MultiLineText => {
                let field_id = field.field_id.clone();
                let mut value = current_text(session, &field_id);
                value.push('\n');
                session.set_answer(&field_id, AnswerValue::Text(value))
            }
            _ => Ok(()),
        }
    }

    /// Delete the last character of the focused text-like or date field
    pub fn backspace(&self, session: &mut FormSession) -> Result<(), SessionError> {
        let Some(field) = self.active_schema(session) else {
            return Ok(());
        };
        if !(field.kind.is_text_like() || field.kind == FieldKind::Date) {
            return Ok(());
        }
        let field_id = field.field_id.clone();
        if session.answer(&field_id).is_none() {
            return Ok(());
        }
        let mut value = current_text(session, &field_id);
        value.pop();
        session.set_answer(&field_id, AnswerValue::Text(value))
    }

    /// Toggle (checkbox) or pick (dropdown, radio) the highlighted option
    pub fn activate_option(&self, session: &mut FormSession) -> Result<(), SessionError> {
        let Some(field) = self.active_schema(session) else {
            return Ok(());
        };
        let Some(option) = field.options.get(self.option_index) else {
            return Ok(());
        };
        let field_id = field.field_id.clone();
        let option_value = option.value.clone();

        let value = match field.kind {
            FieldKind::Checkbox => {
                let mut selected: Vec<String> = session
                    .answer(&field_id)
                    .and_then(AnswerValue::as_choices)
                    .map(<[String]>::to_vec)
                    .unwrap_or_default();
                if let Some(pos) = selected.iter().position(|v| *v == option_value) {
                    selected.remove(pos);
                } else {
                    selected.push(option_value);
                }
                AnswerValue::Choices(selected)
            }
            FieldKind::Dropdown | FieldKind::Radio => AnswerValue::Text(option_value),
            FieldKind::ShortText
            | FieldKind::Phone
            | FieldKind::Email
            | FieldKind::MultiLineText
            | FieldKind::Date => return Ok(()),
        };

        session.set_answer(&field_id, value)
    }
}

impl Form for SectionCursor {
    fn field_count(&self) -> usize {
        self.field_count + 1 // fields plus buttons row
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        let index = index.min(self.field_count);
        if index != self.active_field_index {
            self.option_index = 0;
        }
        self.active_field_index = index;
    }
}

fn current_text(session: &FormSession, field_id: &str) -> String {
    session
        .answer(field_id)
        .and_then(AnswerValue::as_text)
        .unwrap_or_default()
        .to_string()
}
