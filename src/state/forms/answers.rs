//! Answer values collected from the user

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Type-safe answer values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// Text-like, date and single-select answers
    Text(String),
    /// Multi-select checkbox answers, in selection order
    Choices(Vec<String>),
}

impl AnswerValue {
    #[cfg(test)]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    #[cfg(test)]
    pub fn choices<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::Choices(values.into_iter().map(Into::into).collect())
    }

    /// Empty string or empty selection
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Choices(v) => v.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Choices(_) => None,
        }
    }

    pub fn as_choices(&self) -> Option<&[String]> {
        match self {
            Self::Choices(v) => Some(v),
            Self::Text(_) => None,
        }
    }
}

/// The user's answers keyed by field identifier
///
/// Unset fields are absent. Entries are overwritten, never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    values: BTreeMap<String, AnswerValue>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field_id: &str) -> Option<&AnswerValue> {
        self.values.get(field_id)
    }

    /// Insert or overwrite an answer
    pub(crate) fn insert(&mut self, field_id: &str, value: AnswerValue) {
        self.values.insert(field_id.to_string(), value);
    }

    #[cfg(test)]
    pub fn contains(&self, field_id: &str) -> bool {
        self.values.contains_key(field_id)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Render the submission payload
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_emptiness() {
        assert!(AnswerValue::text("").is_empty());
        assert!(!AnswerValue::text(" ").is_empty());
        assert!(AnswerValue::Choices(vec![]).is_empty());
        assert!(!AnswerValue::choices(["a"]).is_empty());
    }

    #[test]
    fn test_accessors() {
        let text = AnswerValue::text("hello");
        assert_eq!(text.as_text(), Some("hello"));
        assert!(text.as_choices().is_none());

        let choices = AnswerValue::choices(["a", "b"]);
        assert_eq!(
            choices.as_choices(),
            Some(&["a".to_string(), "b".to_string()][..])
        );
        assert!(choices.as_text().is_none());
    }

    #[test]
    fn test_insert_overwrites() {
        let mut answers = AnswerSet::new();
        answers.insert("name", AnswerValue::text("a"));
        answers.insert("name", AnswerValue::text("b"));
        assert_eq!(answers.len(), 1);
        assert_eq!(answers.get("name"), Some(&AnswerValue::text("b")));
        assert!(!answers.contains("other"));
    }

    #[test]
    fn test_payload_shape() {
        let mut answers = AnswerSet::new();
        answers.insert("name", AnswerValue::text("Jane"));
        answers.insert("skills", AnswerValue::choices(["rust", "go"]));

        let value: serde_json::Value =
            serde_json::from_str(&answers.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"name": "Jane", "skills": ["rust", "go"]})
        );
    }
}
