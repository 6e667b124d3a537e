//! TaskGrid endpoint methods

use crate::client::{OnUnauthorized, TaskGridClient};
use crate::config::{AuthEndpoints, DataEndpoints, HEALTH_ENDPOINT};
use crate::error::ClientError;
use crate::types::{Credentials, HealthStatus, LoginResponse, Registration};
use reqwest::Method;
use serde_json::Value;
use tracing::info;

impl TaskGridClient {
    /// Log in and store the returned token and user
    ///
    /// Empty credentials are rejected before any request is made. A 401 here
    /// means bad credentials, so it is returned to the caller instead of
    /// redirecting to the login page.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ClientError> {
        credentials.validate()?;

        let request = self
            .request(Method::POST, AuthEndpoints::LOGIN)
            .json(credentials);
        let response: LoginResponse = self
            .execute_with(request, OnUnauthorized::Surface)
            .await?;

        if let Some(token) = &response.access_token {
            self.session().set_token(token)?;
        }
        if let Some(user) = &response.user {
            self.session().set_user(user)?;
        }

        info!(username = %credentials.username, "Logged in");
        Ok(response)
    }

    /// Register a new account
    pub async fn register(&self, registration: &Registration) -> Result<Value, ClientError> {
        registration.validate()?;

        let request = self
            .request(Method::POST, AuthEndpoints::REGISTER)
            .json(registration);
        self.execute(request).await
    }

    /// Forget the stored session
    pub fn logout(&self) {
        self.session().clear();
        info!("Logged out");
    }

    pub async fn profile(&self) -> Result<Value, ClientError> {
        self.call(AuthEndpoints::PROFILE, None, None).await
    }

    pub async fn dashboard(&self) -> Result<Value, ClientError> {
        self.call(DataEndpoints::DASHBOARD, None, None).await
    }

    pub async fn projects(&self) -> Result<Value, ClientError> {
        self.call(DataEndpoints::PROJECTS, None, None).await
    }

    pub async fn create_project(&self, project: &Value) -> Result<Value, ClientError> {
        self.call(DataEndpoints::PROJECTS, Some(Method::POST), Some(project))
            .await
    }

    pub async fn tasks(&self) -> Result<Value, ClientError> {
        self.call(DataEndpoints::TASKS, None, None).await
    }

    pub async fn create_task(&self, task: &Value) -> Result<Value, ClientError> {
        self.call(DataEndpoints::TASKS, Some(Method::POST), Some(task))
            .await
    }

    pub async fn users(&self) -> Result<Value, ClientError> {
        self.call(DataEndpoints::USERS, None, None).await
    }

    pub async fn work_logs(&self) -> Result<Value, ClientError> {
        self.call(DataEndpoints::WORK_LOGS, None, None).await
    }

    /// Check the backend's health endpoint
    ///
    /// Sent without session headers; never touches stored credentials. Any 2xx
    /// counts as healthy. The body is read if it is JSON and ignored otherwise.
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let url = self.config().endpoint_url(HEALTH_ENDPOINT);
        let response = self.http().get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(ClientError::from_response(status, &body));
        }

        Ok(serde_json::from_slice(&body).unwrap_or_default())
    }
}
