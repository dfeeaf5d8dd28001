//! Form session: schema store plus the validation/navigation engine

use super::answers::{AnswerSet, AnswerValue};
use super::schema::{FieldPatterns, FieldSchema, FormSchema, SchemaError, SectionSchema};
use super::validation::{validate_field, FieldError};
use super::wizard::WizardState;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// Rejected session operations
#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("invalid form schema: {0}")]
    Schema(#[from] SchemaError),
    #[error("unknown field '{0}'")]
    UnknownField(String),
    #[error("field '{field}' expects {expected}")]
    ShapeMismatch {
        field: String,
        expected: &'static str,
    },
    #[error("'{value}' is not an option of field '{field}'")]
    UnknownOption { field: String, value: String },
}

/// Everything one student's pass through the form needs.
///
/// Created when the schema arrives and dropped when the user leaves the form.
/// The schema is immutable for the lifetime of the session.
#[derive(Debug, Clone)]
pub struct FormSession {
    schema: FormSchema,
    patterns: FieldPatterns,
    answers: AnswerSet,
    wizard: WizardState,
    errors: HashMap<String, FieldError>,
    submitted: bool,
}

impl FormSession {
    pub fn new(schema: FormSchema) -> Result<Self, SessionError> {
        let patterns = schema.check()?;
        let wizard = WizardState::new(schema.section_count());
        Ok(Self {
            schema,
            patterns,
            answers: AnswerSet::new(),
            wizard,
            errors: HashMap::new(),
            submitted: false,
        })
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    #[cfg(test)]
    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn wizard(&self) -> &WizardState {
        &self.wizard
    }

    pub fn current_index(&self) -> usize {
        self.wizard.index()
    }

    pub fn current_section(&self) -> &SectionSchema {
        // The wizard index is bounded by the section count and the schema has
        // at least one section (checked in `new`).
        &self.schema.sections[self.wizard.index()]
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Inline error currently shown for a field
    pub fn field_error(&self, field_id: &str) -> Option<&FieldError> {
        self.errors.get(field_id)
    }

    pub fn answer(&self, field_id: &str) -> Option<&AnswerValue> {
        self.answers.get(field_id)
    }

    /// Record a value for a field and re-run that field's validation
    pub fn set_answer(&mut self, field_id: &str, value: AnswerValue) -> Result<(), SessionError> {
        let field = self
            .schema
            .field(field_id)
            .ok_or_else(|| SessionError::UnknownField(field_id.to_string()))?;

        check_shape(field, &value)?;

        let error = validate_field(field, self.patterns.get(field_id), Some(&value));
        self.answers.insert(field_id, value);
        match error {
            Some(error) => {
                self.errors.insert(field_id.to_string(), error);
            }
            None => {
                self.errors.remove(field_id);
            }
        }
        Ok(())
    }

    fn check_field(&self, field: &FieldSchema) -> Option<FieldError> {
        validate_field(
            field,
            self.patterns.get(&field.field_id),
            self.answers.get(&field.field_id),
        )
    }

    /// Errors for every failing field of a section, or `None` for an unknown section
    pub fn section_errors(&self, section_id: u32) -> Option<BTreeMap<String, FieldError>> {
        let section = self.schema.section(section_id)?;
        Some(
            section
                .fields
                .iter()
                .filter_map(|field| {
                    let error = self.check_field(field)?;
                    Some((field.field_id.clone(), error))
                })
                .collect(),
        )
    }

    /// True iff every field of the section validates. Unknown sections fail closed.
    pub fn validate_section(&self, section_id: u32) -> bool {
        let Some(section) = self.schema.section(section_id) else {
            return false;
        };
        section.fields.iter().all(|field| self.check_field(field).is_none())
    }

    /// Validate the current section and publish its errors inline
    fn gate_current_section(&mut self) -> bool {
        let section_id = self.current_section().section_id;
        if self.validate_section(section_id) {
            for field in &self.schema.sections[self.wizard.index()].fields {
                self.errors.remove(&field.field_id);
            }
            return true;
        }

        let failures = self.section_errors(section_id).unwrap_or_default();
        for field in &self.schema.sections[self.wizard.index()].fields {
            match failures.get(&field.field_id) {
                Some(error) => {
                    self.errors.insert(field.field_id.clone(), error.clone());
                }
                None => {
                    self.errors.remove(&field.field_id);
                }
            }
        }
        tracing::debug!(
            "Section {section_id} blocked by {} field error(s)",
            failures.len()
        );
        false
    }

    /// Advance one section if the current one validates
    pub fn next(&mut self) -> bool {
        if self.submitted || self.wizard.is_last() {
            return false;
        }
        if !self.gate_current_section() {
            return false;
        }
        self.wizard.advance()
    }

    /// Go back one section without validating the one being left
    pub fn previous(&mut self) -> bool {
        if self.submitted {
            return false;
        }
        self.wizard.retreat()
    }

    /// Jump to a section. Forward jumps pass every intermediate section gate.
    pub fn go_to(&mut self, target: usize) -> bool {
        if self.submitted || target >= self.wizard.section_count() {
            return false;
        }
        while self.wizard.index() > target {
            self.wizard.retreat();
        }
        while self.wizard.index() < target {
            if !self.gate_current_section() {
                return false;
            }
            self.wizard.advance();
        }
        true
    }

    /// Validate the last section and hand the answers to `on_submit`.
    ///
    /// Only available on the last section, and only once per session.
    pub fn submit<F: FnOnce(&AnswerSet)>(&mut self, on_submit: F) -> bool {
        if self.submitted || !self.wizard.is_last() {
            return false;
        }
        if !self.gate_current_section() {
            return false;
        }
        self.submitted = true;
        on_submit(&self.answers);
        true
    }
}

fn check_shape(field: &FieldSchema, value: &AnswerValue) -> Result<(), SessionError> {
    match (field.kind.is_multi_valued(), value) {
        (false, AnswerValue::Choices(_)) => Err(SessionError::ShapeMismatch {
            field: field.field_id.clone(),
            expected: "a single value",
        }),
        (true, AnswerValue::Text(_)) => Err(SessionError::ShapeMismatch {
            field: field.field_id.clone(),
            expected: "a list of values",
        }),
        _ if field.kind.is_choice() => {
            let unknown = match value {
                AnswerValue::Text(v) if !v.is_empty() => (!field.has_option(v)).then_some(v),
                AnswerValue::Text(_) => None,
                AnswerValue::Choices(values) => values.iter().find(|v| !field.has_option(v)),
            };
            match unknown {
                Some(v) => Err(SessionError::UnknownOption {
                    field: field.field_id.clone(),
                    value: v.clone(),
                }),
                None => Ok(()),
            }
        }
        _ => Ok(()),
    }
}
