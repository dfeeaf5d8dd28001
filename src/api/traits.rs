//! Trait abstraction for the form service to enable mocking in tests

use super::client::{FormResponse, UserResponse};
use crate::state::User;
use anyhow::Result;
use async_trait::async_trait;

/// Remote operations the form session depends on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FormApi: Send + Sync {
    /// Register the session's student
    async fn create_user(&self, user: &User) -> Result<UserResponse>;

    /// Fetch the form schema for a student
    async fn get_form(&self, roll_number: &str) -> Result<FormResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_stands_in_for_the_service() {
        let mut api = MockFormApi::new();
        api.expect_get_form()
            .withf(|roll: &str| roll == "R1")
            .times(1)
            .returning(|_| {
                Ok(FormResponse {
                    success: false,
                    message: "Failed to fetch form".to_string(),
                    form: None,
                })
            });

        let response = tokio_test::block_on(api.get_form("R1")).unwrap();
        assert!(!response.success);
        assert!(response.form.is_none());
    }
}
