//! Request and response payloads with a fixed shape
//!
//! Data endpoints are passed through as [`serde_json::Value`].

use crate::error::ClientError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /auth/login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Username or email
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Build credentials from raw form input; the username is trimmed, the
    /// password is kept verbatim
    pub fn new(username: impl AsRef<str>, password: impl Into<String>) -> Self {
        Self {
            username: username.as_ref().trim().to_string(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        if self.username.trim().is_empty() || self.password.is_empty() {
            return Err(ClientError::Validation(
                "Please enter both username and password".into(),
            ));
        }
        Ok(())
    }
}

/// Body returned by `POST /auth/login`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub user: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /auth/register`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Registration {
    pub fn validate(&self) -> Result<(), ClientError> {
        let required = [
            ("Username", &self.username),
            ("Email", &self.email),
            ("Password", &self.password),
        ];

        match required.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(ClientError::Validation(format!("{field} is required"))),
            None => Ok(()),
        }
    }
}

/// Body returned by `GET /health`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}
