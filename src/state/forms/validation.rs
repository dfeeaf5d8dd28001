//! Declarative field rules

use super::answers::AnswerValue;
use super::schema::{FieldKind, FieldSchema};
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// A single field's validation failure, rendered inline under the field
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("{label} is required")]
    Required { label: String },
    #[error("{label} must be at least {min} characters")]
    TooShort { label: String, min: usize },
    #[error("{label} cannot exceed {max} characters")]
    TooLong { label: String, max: usize },
    #[error("{message}")]
    InvalidFormat { message: String },
    #[error("{label} must be a number")]
    NotANumber { label: String },
    #[error("{label} must be at least {min}")]
    BelowMinimum { label: String, min: f64 },
    #[error("{label} cannot exceed {max}")]
    AboveMaximum { label: String, max: f64 },
}

fn email_shape() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
    })
}

fn is_phone_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | ' ')
}

fn format_error(field: &FieldSchema) -> FieldError {
    FieldError::InvalidFormat {
        message: field
            .format_message()
            .map(str::to_string)
            .unwrap_or_else(|| format!("{} is not in a valid format", field.label)),
    }
}

/// Validate one answer against its field's rules.
///
/// Pure function of the schema and the value; `None` means the value is acceptable.
/// `pattern` is the field's `pattern` rule, compiled when the schema was checked.
pub fn validate_field(
    field: &FieldSchema,
    pattern: Option<&Regex>,
    value: Option<&AnswerValue>,
) -> Option<FieldError> {
    let value = match value {
        Some(v) if !v.is_empty() => v,
        _ if field.required => {
            return Some(FieldError::Required {
                label: field.label.clone(),
            })
        }
        _ => return None,
    };

    let text = value.as_text()?;

    if field.kind.is_text_like() {
        if let Some(error) = check_text(field, pattern, text) {
            return Some(error);
        }
    }

    if field.has_numeric_range() {
        return check_range(field, text);
    }

    None
}

fn check_text(field: &FieldSchema, pattern: Option<&Regex>, text: &str) -> Option<FieldError> {
    let length = text.chars().count();

    if let Some(min) = field.min_length {
        if length < min {
            return Some(FieldError::TooShort {
                label: field.label.clone(),
                min,
            });
        }
    }

    if let Some(max) = field.max_length {
        if length > max {
            return Some(FieldError::TooLong {
                label: field.label.clone(),
                max,
            });
        }
    }

    let shape_ok = match field.kind {
        FieldKind::Email => email_shape().is_match(text),
        FieldKind::Phone => text.chars().all(is_phone_char),
        FieldKind::ShortText
        | FieldKind::MultiLineText
        | FieldKind::Date
        | FieldKind::Dropdown
        | FieldKind::Checkbox
        | FieldKind::Radio => true,
    };
    if !shape_ok {
        return Some(format_error(field));
    }

    if let Some(pattern) = pattern {
        if !pattern.is_match(text) {
            return Some(format_error(field));
        }
    }

    None
}

fn check_range(field: &FieldSchema, text: &str) -> Option<FieldError> {
    // f64 parsing also accepts "NaN" and "inf"
    let number = match text.trim().parse::<f64>() {
        Ok(number) if number.is_finite() => number,
        _ => {
            return Some(FieldError::NotANumber {
                label: field.label.clone(),
            })
        }
    };

    if let Some(min) = field.min {
        if number < min {
            return Some(FieldError::BelowMinimum {
                label: field.label.clone(),
                min,
            });
        }
    }

    if let Some(max) = field.max {
        if number > max {
            return Some(FieldError::AboveMaximum {
                label: field.label.clone(),
                max,
            });
        }
    }

    None
}
