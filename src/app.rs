//! Application state and core logic

use crate::api::{FormApi, FormResponse};
use crate::platform;
use crate::state::{
    AppState, FieldKind, Form, FormButton, FormSession, SessionError, Submission, User, View,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Form service client
    api: Box<dyn FormApi>,
    /// Whether the schema fetch for the current login is still outstanding
    fetch_pending: bool,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub fn new(api: Box<dyn FormApi>) -> Self {
        Self {
            state: AppState::default(),
            api,
            fetch_pending: false,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Whether the Loading view is waiting on the schema fetch
    pub fn is_fetch_pending(&self) -> bool {
        self.fetch_pending && matches!(self.state.current_view, View::Loading)
    }

    /// Run work that must happen between frames (the one-off schema fetch)
    pub async fn tick(&mut self) {
        if self.is_fetch_pending() {
            self.load_form().await;
        }
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        match self.state.current_view {
            View::Login => self.handle_login_key(key).await,
            // No interaction while the schema is in flight
            View::Loading => {}
            View::Form => self.handle_form_key(key),
            View::Submitted => self.handle_submitted_key(key),
        }
        Ok(())
    }

    /// Handle keys in the Login view
    async fn handle_login_key(&mut self, key: KeyEvent) {
        let form = &mut self.state.login_form;
        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Enter => {
                if form.active_field_index == 0 {
                    form.next_field();
                } else {
                    self.login().await;
                }
            }
            KeyCode::Char(c) => {
                if let Some(field) = form.get_active_field_mut() {
                    field.push_char(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = form.get_active_field_mut() {
                    field.pop_char();
                }
            }
            _ => {}
        }
    }

    /// Register the student and queue the schema fetch
    async fn login(&mut self) {
        let Some((roll_number, name)) = self.state.login_form.credentials() else {
            self.push_error("Roll number and name are required");
            return;
        };
        let user = User { roll_number, name };

        match self.api.create_user(&user).await {
            Ok(response) if response.success => {
                tracing::info!("Logged in as {}", user.roll_number);
                self.state.status_message = Some(response.message);
                self.state.user = Some(user);
                self.state.current_view = View::Loading;
                self.fetch_pending = true;
            }
            Ok(response) => self.push_error(response.message),
            Err(e) => self.push_error(e.to_string()),
        }
    }

    /// Fetch the schema once and open the session, or return to login
    async fn load_form(&mut self) {
        self.fetch_pending = false;

        let Some(roll_number) = self.state.user.as_ref().map(|u| u.roll_number.clone()) else {
            self.push_error("Please login first");
            self.state.end_session();
            return;
        };

        let outcome = match self.api.get_form(&roll_number).await {
            Ok(FormResponse {
                success: true,
                form: Some(form),
                ..
            }) => FormSession::new(form).map_err(|e| format!("Failed to load form: {e}")),
            Ok(response) if response.message.is_empty() => Err("Failed to load form".to_string()),
            Ok(response) => Err(format!("Failed to load form: {}", response.message)),
            Err(e) => Err(format!("An error occurred while loading the form: {e}")),
        };

        match outcome {
            Ok(session) => {
                tracing::info!(
                    "Loaded form '{}' with {} section(s)",
                    session.schema().form_title,
                    session.schema().section_count()
                );
                self.state.start_session(session);
            }
            Err(message) => {
                self.push_error(message);
                self.state.end_session();
            }
        }
    }

    /// Handle keys in the Form view
    fn handle_form_key(&mut self, key: KeyEvent) {
        if platform::is_command(key.modifiers) {
            match key.code {
                KeyCode::Char('n') => self.next_section(),
                KeyCode::Char('p') => self.previous_section(),
                KeyCode::Char('s') => self.submit(),
                _ => {}
            }
            return;
        }

        if key.modifiers.contains(platform::JUMP_MODIFIER) {
            if let KeyCode::Char(c @ '1'..='9') = key.code {
                let step = c as usize - '1' as usize;
                self.go_to_section(step);
            }
            return;
        }

        let Some(session) = self.state.session.as_mut() else {
            return;
        };
        let cursor = &mut self.state.section_cursor;

        if cursor.is_buttons_row_active() {
            match key.code {
                KeyCode::Esc => self.logout(),
                KeyCode::Tab | KeyCode::Down => cursor.next_field(),
                KeyCode::BackTab | KeyCode::Up => cursor.prev_field(),
                KeyCode::Left => cursor.prev_button(session),
                KeyCode::Right => cursor.next_button(session),
                KeyCode::Enter | KeyCode::Char(' ') => {
                    if let Some(button) = cursor.selected_button(session) {
                        self.press(button);
                    }
                }
                _ => {}
            }
            return;
        }

        let is_choice = cursor
            .active_schema(session)
            .is_some_and(|f| f.kind.is_choice());

        let edit: Result<(), SessionError> = match key.code {
            KeyCode::Esc => {
                self.logout();
                return;
            }
            KeyCode::Tab | KeyCode::Down => {
                cursor.next_field();
                Ok(())
            }
            KeyCode::BackTab | KeyCode::Up => {
                cursor.prev_field();
                Ok(())
            }
            KeyCode::Left => {
                cursor.move_option(session, false);
                Ok(())
            }
            KeyCode::Right => {
                cursor.move_option(session, true);
                Ok(())
            }
            KeyCode::Char(' ') if is_choice => cursor.activate_option(session),
            KeyCode::Char(c) => cursor.input_char(session, c),
            KeyCode::Backspace => cursor.backspace(session),
            KeyCode::Enter => {
                let multiline = cursor
                    .active_schema(session)
                    .is_some_and(|f| f.kind == FieldKind::MultiLineText);
                if multiline {
                    cursor.newline(session)
                } else {
                    cursor.next_field();
                    Ok(())
                }
            }
            _ => Ok(()),
        };

        if let Err(e) = edit {
            tracing::warn!("Ignored edit: {e}");
        }
    }

    fn press(&mut self, button: FormButton) {
        match button {
            FormButton::Previous => self.previous_section(),
            FormButton::Next => self.next_section(),
            FormButton::Submit => self.submit(),
        }
    }

    /// Move focus to the first field that currently shows an error
    fn focus_first_error(&mut self) {
        let Some(session) = &self.state.session else {
            return;
        };
        let first_error = session
            .current_section()
            .fields
            .iter()
            .position(|f| session.field_error(&f.field_id).is_some());
        if let Some(index) = first_error {
            self.state.section_cursor.set_active_field(index);
        }
    }

    fn next_section(&mut self) {
        let Some(session) = self.state.session.as_mut() else {
            return;
        };
        if session.wizard().is_last() {
            return;
        }
        if session.next() {
            self.state.status_message = None;
            self.state.reset_section_cursor();
        } else {
            self.state.status_message = Some("Please fix the highlighted fields".to_string());
            self.focus_first_error();
        }
    }

    fn previous_section(&mut self) {
        let Some(session) = self.state.session.as_mut() else {
            return;
        };
        if session.previous() {
            self.state.status_message = None;
            self.state.reset_section_cursor();
        }
    }

    /// Jump to a section from the progress indicator
    pub fn go_to_section(&mut self, index: usize) {
        let Some(session) = self.state.session.as_mut() else {
            return;
        };
        if index >= session.wizard().section_count() {
            return;
        }
        let start = session.current_index();
        let reached = session.go_to(index);
        if session.current_index() != start {
            self.state.reset_section_cursor();
        }
        if !reached {
            self.state.status_message = Some("Please fix the highlighted fields".to_string());
            self.focus_first_error();
        }
    }

    fn submit(&mut self) {
        let Some(session) = self.state.session.as_mut() else {
            return;
        };
        if !session.wizard().is_last() || session.is_submitted() {
            return;
        }

        let mut submission = None;
        let accepted = session.submit(|answers| {
            let record = Submission::new(answers);
            tracing::info!(
                "Form submitted with {} answer(s): {}",
                answers.len(),
                record.payload
            );
            submission = Some(record);
        });

        if accepted {
            self.state.submission = submission;
            self.state.status_message = Some("Form submitted successfully!".to_string());
            self.state.current_view = View::Submitted;
        } else {
            self.state.status_message = Some("Please fix the highlighted fields".to_string());
            self.focus_first_error();
        }
    }

    fn logout(&mut self) {
        tracing::info!("Session closed");
        self.fetch_pending = false;
        self.state.status_message = None;
        self.state.end_session();
    }

    /// Handle keys in the Submitted view
    fn handle_submitted_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Enter | KeyCode::Esc => self.logout(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MockFormApi, UserResponse};
    use crate::state::{AnswerValue, FieldSchema, FormSchema, SectionSchema};
    use anyhow::anyhow;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn schema() -> FormSchema {
        FormSchema {
            form_title: "Application".to_string(),
            form_id: None,
            version: None,
            sections: vec![
                SectionSchema {
                    section_id: 1,
                    title: "Personal".to_string(),
                    description: None,
                    fields: vec![FieldSchema::new("name", FieldKind::ShortText, "Name").required()],
                },
                SectionSchema {
                    section_id: 2,
                    title: "Contact".to_string(),
                    description: Some("How to reach you".to_string()),
                    fields: vec![
                        FieldSchema::new("email", FieldKind::Email, "Email").required(),
                        FieldSchema::new("year", FieldKind::Radio, "Year")
                            .with_options(&[("1", "First"), ("2", "Second")]),
                    ],
                },
            ],
        }
    }

    fn accepting_api() -> MockFormApi {
        let mut api = MockFormApi::new();
        api.expect_create_user().returning(|_| {
            Ok(UserResponse {
                success: true,
                message: "User created successfully".to_string(),
            })
        });
        api.expect_get_form().returning(|_| {
            Ok(FormResponse {
                success: true,
                message: String::new(),
                form: Some(schema()),
            })
        });
        api
    }

    async fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
    }

    async fn logged_in_app(api: MockFormApi) -> App {
        let mut app = App::new(Box::new(api));
        type_text(&mut app, "R42").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_text(&mut app, "Jane").await;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        app
    }

    mod login {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_blank_credentials_are_rejected() {
            let mut api = MockFormApi::new();
            api.expect_create_user().times(0);
            let mut app = App::new(Box::new(api));

            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            app.handle_key(key(KeyCode::Enter)).await.unwrap();

            assert_eq!(
                app.state.current_error(),
                Some("Roll number and name are required")
            );
            assert_eq!(app.state.current_view, View::Login);
        }

        #[tokio::test]
        async fn test_success_moves_to_loading() {
            let mut api = MockFormApi::new();
            api.expect_create_user()
                .withf(|user: &User| user.roll_number == "R42" && user.name == "Jane")
                .times(1)
                .returning(|_| {
                    Ok(UserResponse {
                        success: true,
                        message: "Welcome".to_string(),
                    })
                });

            let app = logged_in_app(api).await;
            assert_eq!(app.state.current_view, View::Loading);
            assert!(app.is_fetch_pending());
            assert_eq!(app.state.status_message.as_deref(), Some("Welcome"));
        }

        #[tokio::test]
        async fn test_rejection_stays_on_login() {
            let mut api = MockFormApi::new();
            api.expect_create_user().returning(|_| {
                Ok(UserResponse {
                    success: false,
                    message: "Roll number taken".to_string(),
                })
            });

            let app = logged_in_app(api).await;
            assert_eq!(app.state.current_view, View::Login);
            assert_eq!(app.state.current_error(), Some("Roll number taken"));
            assert!(app.state.user.is_none());
        }

        #[tokio::test]
        async fn test_transport_error_is_shown() {
            let mut api = MockFormApi::new();
            api.expect_create_user()
                .returning(|_| Err(anyhow!("Failed to create user: connection refused")));

            let app = logged_in_app(api).await;
            assert_eq!(app.state.current_view, View::Login);
            assert!(app.state.has_errors());
        }

        #[tokio::test]
        async fn test_escape_quits() {
            let mut app = App::new(Box::new(MockFormApi::new()));
            app.handle_key(key(KeyCode::Esc)).await.unwrap();
            assert!(app.should_quit());
        }
    }

    mod loading {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_schema_fetched_once_and_session_started() {
            let mut api = MockFormApi::new();
            api.expect_create_user().returning(|_| {
                Ok(UserResponse {
                    success: true,
                    message: "ok".to_string(),
                })
            });
            api.expect_get_form()
                .withf(|roll: &str| roll == "R42")
                .times(1)
                .returning(|_| {
                    Ok(FormResponse {
                        success: true,
                        message: String::new(),
                        form: Some(schema()),
                    })
                });

            let mut app = logged_in_app(api).await;
            app.tick().await;
            app.tick().await;

            assert_eq!(app.state.current_view, View::Form);
            let session = app.state.session.as_ref().unwrap();
            assert_eq!(session.current_index(), 0);
            assert!(session.answers().is_empty());
        }

        #[tokio::test]
        async fn test_missing_form_returns_to_login() {
            let mut api = MockFormApi::new();
            api.expect_create_user().returning(|_| {
                Ok(UserResponse {
                    success: true,
                    message: "ok".to_string(),
                })
            });
            api.expect_get_form().returning(|_| {
                Ok(FormResponse {
                    success: true,
                    message: String::new(),
                    form: None,
                })
            });

            let mut app = logged_in_app(api).await;
            app.tick().await;

            assert_eq!(app.state.current_view, View::Login);
            assert_eq!(app.state.current_error(), Some("Failed to load form"));
            assert!(app.state.user.is_none());
            assert!(app.state.session.is_none());
        }

        #[tokio::test]
        async fn test_fetch_error_returns_to_login() {
            let mut api = MockFormApi::new();
            api.expect_create_user().returning(|_| {
                Ok(UserResponse {
                    success: true,
                    message: "ok".to_string(),
                })
            });
            api.expect_get_form()
                .returning(|_| Err(anyhow!("Failed to fetch form: timed out")));

            let mut app = logged_in_app(api).await;
            app.tick().await;

            assert_eq!(app.state.current_view, View::Login);
            assert!(app
                .state
                .current_error()
                .unwrap()
                .starts_with("An error occurred while loading the form"));
        }

        #[tokio::test]
        async fn test_invalid_schema_returns_to_login() {
            let mut api = MockFormApi::new();
            api.expect_create_user().returning(|_| {
                Ok(UserResponse {
                    success: true,
                    message: "ok".to_string(),
                })
            });
            api.expect_get_form().returning(|_| {
                let mut form = schema();
                form.sections.clear();
                Ok(FormResponse {
                    success: true,
                    message: String::new(),
                    form: Some(form),
                })
            });

            let mut app = logged_in_app(api).await;
            app.tick().await;

            assert_eq!(app.state.current_view, View::Login);
            assert_eq!(
                app.state.current_error(),
                Some("Failed to load form: invalid form schema: form has no sections")
            );
        }

        #[tokio::test]
        async fn test_keys_ignored_while_loading() {
            let mut app = logged_in_app(accepting_api()).await;
            app.handle_key(key(KeyCode::Char('x'))).await.unwrap();
            assert_eq!(app.state.current_view, View::Loading);
        }
    }

    mod form {
        use super::*;
        use pretty_assertions::assert_eq;

        async fn form_app() -> App {
            let mut app = logged_in_app(accepting_api()).await;
            app.tick().await;
            assert_eq!(app.state.current_view, View::Form);
            app
        }

        fn index(app: &App) -> usize {
            app.state.session.as_ref().unwrap().current_index()
        }

        #[tokio::test]
        async fn test_next_blocked_then_advances_by_one() {
            let mut app = form_app().await;

            app.handle_key(ctrl('n')).await.unwrap();
            assert_eq!(index(&app), 0);
            assert_eq!(
                app.state.status_message.as_deref(),
                Some("Please fix the highlighted fields")
            );

            type_text(&mut app, "Jane").await;
            app.handle_key(ctrl('n')).await.unwrap();
            assert_eq!(index(&app), 1);
            assert_eq!(app.state.section_cursor.active_field_index, 0);
        }

        #[tokio::test]
        async fn test_buttons_row_drives_navigation() {
            let mut app = form_app().await;
            type_text(&mut app, "Jane").await;

            // Focus the buttons row and press Next
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            assert!(app.state.section_cursor.is_buttons_row_active());
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            assert_eq!(index(&app), 1);

            // On the last section the buttons are Previous and Submit
            for _ in 0..2 {
                app.handle_key(key(KeyCode::Tab)).await.unwrap();
            }
            app.handle_key(key(KeyCode::Left)).await.unwrap();
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            assert_eq!(index(&app), 0);
        }

        #[tokio::test]
        async fn test_previous_skips_validation() {
            let mut app = form_app().await;
            type_text(&mut app, "Jane").await;
            app.handle_key(ctrl('n')).await.unwrap();

            app.handle_key(ctrl('p')).await.unwrap();
            assert_eq!(index(&app), 0);
            let session = app.state.session.as_ref().unwrap();
            assert!(session.field_error("email").is_none());
        }

        #[tokio::test]
        async fn test_submit_only_on_last_section() {
            let mut app = form_app().await;
            type_text(&mut app, "Jane").await;
            app.handle_key(ctrl('s')).await.unwrap();
            assert_eq!(app.state.current_view, View::Form);
            assert!(app.state.submission.is_none());
        }

        #[tokio::test]
        async fn test_full_submission() {
            let mut app = form_app().await;
            type_text(&mut app, "Jane").await;
            app.handle_key(ctrl('n')).await.unwrap();

            // Failing submit focuses the offending field
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            app.handle_key(ctrl('s')).await.unwrap();
            assert_eq!(app.state.current_view, View::Form);
            assert_eq!(app.state.section_cursor.active_field_index, 0);

            type_text(&mut app, "a@b.co").await;
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            app.handle_key(key(KeyCode::Right)).await.unwrap();
            app.handle_key(key(KeyCode::Char(' '))).await.unwrap();
            app.handle_key(ctrl('s')).await.unwrap();

            assert_eq!(app.state.current_view, View::Submitted);
            let submission = app.state.submission.as_ref().unwrap();
            assert_eq!(submission.answers.get("name"), Some(&AnswerValue::text("Jane")));
            assert_eq!(
                submission.answers.get("email"),
                Some(&AnswerValue::text("a@b.co"))
            );
            assert_eq!(submission.answers.get("year"), Some(&AnswerValue::text("2")));
            assert_eq!(
                app.state.status_message.as_deref(),
                Some("Form submitted successfully!")
            );
        }

        #[tokio::test]
        async fn test_go_to_section_respects_gate() {
            let mut app = form_app().await;
            app.go_to_section(1);
            assert_eq!(index(&app), 0);

            type_text(&mut app, "Jane").await;
            app.go_to_section(1);
            assert_eq!(index(&app), 1);
            app.go_to_section(0);
            assert_eq!(index(&app), 0);
        }

        #[tokio::test]
        async fn test_escape_logs_out() {
            let mut app = form_app().await;
            app.handle_key(key(KeyCode::Esc)).await.unwrap();
            assert_eq!(app.state.current_view, View::Login);
            assert!(app.state.session.is_none());
            assert!(app.state.user.is_none());
        }

        #[tokio::test]
        async fn test_error_dialog_is_modal() {
            let mut app = form_app().await;
            app.push_error("boom");
            app.handle_key(key(KeyCode::Char('x'))).await.unwrap();
            assert!(app
                .state
                .session
                .as_ref()
                .unwrap()
                .answer("name")
                .is_none());
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            assert!(!app.state.has_errors());
        }
    }

    mod submitted {
        use super::*;
        use pretty_assertions::assert_eq;

        async fn submitted_app() -> App {
            let mut app = logged_in_app(accepting_api()).await;
            app.tick().await;
            type_text(&mut app, "Jane").await;
            app.handle_key(ctrl('n')).await.unwrap();
            type_text(&mut app, "a@b.co").await;
            app.handle_key(ctrl('s')).await.unwrap();
            assert_eq!(app.state.current_view, View::Submitted);
            app
        }

        #[tokio::test]
        async fn test_enter_starts_over() {
            let mut app = submitted_app().await;
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            assert_eq!(app.state.current_view, View::Login);
            assert!(app.state.submission.is_none());
        }

        #[tokio::test]
        async fn test_q_quits() {
            let mut app = submitted_app().await;
            app.handle_key(key(KeyCode::Char('q'))).await.unwrap();
            assert!(app.should_quit());
        }
    }
}
