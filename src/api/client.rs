//! HTTP client for the form service
//!
//! This module talks to the form service's two JSON endpoints:
//! `POST /create-user` and `GET /get-form`.

use super::traits::FormApi;
use crate::config::TuiConfig;
use crate::state::{FormSchema, User};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Default form service address
pub const DEFAULT_ADDRESS: &str = "https://dynamic-form-generator-9rl7.onrender.com";

/// Environment variable overriding the service address
const ADDRESS_ENV: &str = "STUDENT_FORM_API_URL";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Outcome of `create-user`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserResponse {
    pub success: bool,
    pub message: String,
}

/// Outcome of `get-form`
#[derive(Debug, Clone, PartialEq)]
pub struct FormResponse {
    pub success: bool,
    pub message: String,
    pub form: Option<FormSchema>,
}

/// Message body the service attaches to every response
#[derive(Debug, Default, Deserialize)]
struct ServiceMessage {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FormEnvelope {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    form: Option<FormSchema>,
}

/// Client for communicating with the form service
pub struct FormApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl FormApiClient {
    /// Create a client for an explicit base address
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from the user configuration, honouring the address override
    pub fn from_config(config: &TuiConfig) -> Result<Self> {
        let address = std::env::var(ADDRESS_ENV)
            .ok()
            .filter(|a| !a.is_empty())
            .or_else(|| config.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_ADDRESS.to_string());
        let timeout = Duration::from_secs(config.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));

        tracing::debug!("Using form service at {address}");
        Self::new(address, timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl FormApi for FormApiClient {
    async fn create_user(&self, user: &User) -> Result<UserResponse> {
        let response = self
            .http
            .post(self.url("create-user"))
            .json(user)
            .send()
            .await
            .map_err(|e| anyhow!("Failed to create user: {}", e))?;

        let status = response.status();
        let body = response.json::<ServiceMessage>().await.unwrap_or_default();

        if !status.is_success() {
            tracing::warn!("create-user returned {status}");
            return Ok(UserResponse {
                success: false,
                message: body
                    .message
                    .unwrap_or_else(|| "Failed to create user".to_string()),
            });
        }

        Ok(UserResponse {
            success: true,
            message: body
                .message
                .unwrap_or_else(|| "User created successfully".to_string()),
        })
    }

    async fn get_form(&self, roll_number: &str) -> Result<FormResponse> {
        let response = self
            .http
            .get(self.url("get-form"))
            .query(&[("rollNumber", roll_number)])
            .send()
            .await
            .map_err(|e| anyhow!("Failed to fetch form: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("get-form returned {status}");
            let body = response.json::<ServiceMessage>().await.unwrap_or_default();
            return Ok(FormResponse {
                success: false,
                message: body
                    .message
                    .unwrap_or_else(|| "Failed to fetch form".to_string()),
                form: None,
            });
        }

        let envelope = response
            .json::<FormEnvelope>()
            .await
            .map_err(|e| anyhow!("Failed to decode form: {}", e))?;

        Ok(FormResponse {
            success: true,
            message: envelope.message.unwrap_or_default(),
            form: envelope.form,
        })
    }
}
