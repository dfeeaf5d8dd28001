//! Form schema definitions as served by the form service

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// The closed set of input kinds a field can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    #[serde(rename = "text")]
    ShortText,
    #[serde(rename = "tel")]
    Phone,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "textarea")]
    MultiLineText,
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "dropdown")]
    Dropdown,
    #[serde(rename = "checkbox")]
    Checkbox,
    #[serde(rename = "radio")]
    Radio,
}

impl FieldKind {
    /// Kinds that are edited by typing free text and carry length/format rules
    pub fn is_text_like(self) -> bool {
        matches!(
            self,
            Self::ShortText | Self::Phone | Self::Email | Self::MultiLineText
        )
    }

    /// Kinds whose value is picked from the option list
    pub fn is_choice(self) -> bool {
        matches!(self, Self::Dropdown | Self::Checkbox | Self::Radio)
    }

    /// Kinds whose answer is an ordered list of option values
    pub fn is_multi_valued(self) -> bool {
        matches!(self, Self::Checkbox)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ShortText => "Text",
            Self::Phone => "Phone",
            Self::Email => "Email",
            Self::MultiLineText => "Text area",
            Self::Date => "Date",
            Self::Dropdown => "Dropdown",
            Self::Checkbox => "Checkboxes",
            Self::Radio => "Radio",
        }
    }
}

/// One selectable entry of a choice field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldOption {
    pub value: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_test_id: Option<String>,
}

/// Custom messages attached to a field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationMessages {
    #[serde(default)]
    pub message: Option<String>,
}

/// A single input of the form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSchema {
    pub field_id: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub label: String,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub data_test_id: Option<String>,
    #[serde(default)]
    pub validation: Option<ValidationMessages>,
    #[serde(default)]
    pub options: Vec<FieldOption>,
    #[serde(default)]
    pub min_length: Option<usize>,
    #[serde(default)]
    pub max_length: Option<usize>,
    #[serde(default)]
    pub pattern: Option<String>,
    /// Inclusive lower bound for numeric answers
    #[serde(default)]
    pub min: Option<f64>,
    /// Inclusive upper bound for numeric answers
    #[serde(default)]
    pub max: Option<f64>,
}

#[cfg(test)]
impl FieldSchema {
    /// Create a field with no rules beyond its kind
    pub fn new(field_id: &str, kind: FieldKind, label: &str) -> Self {
        Self {
            field_id: field_id.to_string(),
            kind,
            label: label.to_string(),
            placeholder: None,
            required: false,
            data_test_id: None,
            validation: None,
            options: Vec::new(),
            min_length: None,
            max_length: None,
            pattern: None,
            min: None,
            max: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_options(mut self, options: &[(&str, &str)]) -> Self {
        self.options = options
            .iter()
            .map(|(value, label)| FieldOption {
                value: value.to_string(),
                label: label.to_string(),
                data_test_id: None,
            })
            .collect();
        self
    }

    pub fn with_length(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.pattern = Some(pattern.to_string());
        self
    }

    pub fn with_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }
}

impl FieldSchema {
    /// Whether the schema encodes a numeric range for this field
    pub fn has_numeric_range(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    /// Custom format message supplied by the schema, if any
    pub fn format_message(&self) -> Option<&str> {
        self.validation
            .as_ref()
            .and_then(|v| v.message.as_deref())
            .filter(|m| !m.is_empty())
    }

    /// Label shown for an option value, falling back to the raw value
    pub fn option_label<'a>(&'a self, value: &'a str) -> &'a str {
        self.options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
            .unwrap_or(value)
    }

    pub fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }
}

/// One page of the wizard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionSchema {
    pub section_id: u32,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
}

/// The whole form as served by `get-form`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    #[serde(alias = "title")]
    pub form_title: String,
    #[serde(default)]
    pub form_id: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    pub sections: Vec<SectionSchema>,
}

/// Reasons a served schema cannot back a session
#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("form has no sections")]
    NoSections,
    #[error("duplicate section id {0}")]
    DuplicateSection(u32),
    #[error("duplicate field id '{0}'")]
    DuplicateField(String),
    #[error("field '{0}' has no options")]
    MissingOptions(String),
    #[error("field '{field}' has an invalid pattern: {reason}")]
    InvalidPattern { field: String, reason: String },
    #[error("field '{0}' has a minimum above its maximum")]
    InvertedBounds(String),
}

/// Compiled `pattern` rules of a checked schema, keyed by field id
#[derive(Debug, Clone)]
pub struct FieldPatterns(HashMap<String, Regex>);

impl FieldPatterns {
    pub fn get(&self, field_id: &str) -> Option<&Regex> {
        self.0.get(field_id)
    }
}

impl FormSchema {
    /// Check the structural invariants the session relies on.
    ///
    /// Field patterns are compiled here, once per schema.
    pub fn check(&self) -> Result<FieldPatterns, SchemaError> {
        if self.sections.is_empty() {
            return Err(SchemaError::NoSections);
        }

        let mut section_ids = HashSet::new();
        let mut field_ids = HashSet::new();
        let mut patterns = HashMap::new();

        for section in &self.sections {
            if !section_ids.insert(section.section_id) {
                return Err(SchemaError::DuplicateSection(section.section_id));
            }
            for field in &section.fields {
                if !field_ids.insert(field.field_id.as_str()) {
                    return Err(SchemaError::DuplicateField(field.field_id.clone()));
                }
                if field.kind.is_choice() && field.options.is_empty() {
                    return Err(SchemaError::MissingOptions(field.field_id.clone()));
                }
                if let Some(pattern) = &field.pattern {
                    let compiled = Regex::new(pattern).map_err(|e| SchemaError::InvalidPattern {
                        field: field.field_id.clone(),
                        reason: e.to_string(),
                    })?;
                    patterns.insert(field.field_id.clone(), compiled);
                }
                let lengths_inverted = matches!(
                    (field.min_length, field.max_length),
                    (Some(min), Some(max)) if min > max
                );
                let range_inverted =
                    matches!((field.min, field.max), (Some(min), Some(max)) if min > max);
                if lengths_inverted || range_inverted {
                    return Err(SchemaError::InvertedBounds(field.field_id.clone()));
                }
            }
        }

        Ok(FieldPatterns(patterns))
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn section(&self, section_id: u32) -> Option<&SectionSchema> {
        self.sections.iter().find(|s| s.section_id == section_id)
    }

    /// Find a field in any section
    pub fn field(&self, field_id: &str) -> Option<&FieldSchema> {
        self.sections
            .iter()
            .flat_map(|s| s.fields.iter())
            .find(|f| f.field_id == field_id)
    }
}
