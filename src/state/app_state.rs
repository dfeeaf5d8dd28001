//! Application state definitions

use super::forms::{AnswerSet, FormSession, LoginForm, SectionCursor};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Login,
    /// Waiting for the form schema
    Loading,
    Form,
    Submitted,
}

/// The student filling out the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub roll_number: String,
    pub name: String,
}

/// What was handed to the submit collaborator
#[derive(Debug, Clone)]
pub struct Submission {
    pub answers: AnswerSet,
    pub payload: String,
    pub submitted_at: DateTime<Local>,
}

impl Submission {
    pub fn new(answers: &AnswerSet) -> Self {
        Self {
            answers: answers.clone(),
            payload: answers.to_json().unwrap_or_else(|_| "{}".to_string()),
            submitted_at: Local::now(),
        }
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    pub current_view: View,
    pub login_form: LoginForm,
    /// Student registered for this session
    pub user: Option<User>,
    /// Active form session, present from schema load until logout
    pub session: Option<FormSession>,
    pub section_cursor: SectionCursor,
    pub submission: Option<Submission>,
    /// Transient notification shown in the status bar
    pub status_message: Option<String>,
    /// Errors waiting to be shown, oldest first
    errors: VecDeque<String>,
}

impl AppState {
    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: String) {
        tracing::warn!("{message}");
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Error currently shown in the dialog
    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    /// Number of errors waiting, including the one on screen
    pub fn queued_errors(&self) -> usize {
        self.errors.len()
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }

    /// Install a freshly loaded session and show its first section
    pub fn start_session(&mut self, session: FormSession) {
        self.section_cursor = SectionCursor::for_section(&session);
        self.session = Some(session);
        self.submission = None;
        self.current_view = View::Form;
    }

    /// Drop the session and user and return to the login view
    pub fn end_session(&mut self) {
        self.session = None;
        self.user = None;
        self.submission = None;
        self.section_cursor = SectionCursor::default();
        self.login_form = LoginForm::new();
        self.current_view = View::Login;
    }

    /// Re-seat the focus after the wizard moved to another section
    pub fn reset_section_cursor(&mut self) {
        if let Some(session) = &self.session {
            self.section_cursor = SectionCursor::for_section(session);
        }
    }
}
