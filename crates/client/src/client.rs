//! Request wrapper for the TaskGrid API

use crate::config::TaskGridConfig;
use crate::error::ClientError;
use crate::navigation::Navigator;
use crate::storage::{CredentialStore, SessionStore};
use reqwest::{Client, Method, RequestBuilder, header};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// What to do when the server answers 401
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OnUnauthorized {
    /// Clear credentials and send the browser to the login page
    Redirect,
    /// Clear credentials and hand the error back to the caller
    Surface,
}

/// TaskGrid API client
///
/// Every request carries `Content-Type: application/json` and, while a token
/// is stored, `Authorization: Bearer <token>`. Each call is a single attempt.
#[derive(Clone)]
pub struct TaskGridClient {
    client: Client,
    config: Arc<TaskGridConfig>,
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
}

impl TaskGridClient {
    /// Create a new client builder
    pub fn builder() -> TaskGridClientBuilder {
        TaskGridClientBuilder::default()
    }

    pub fn config(&self) -> &TaskGridConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Send the browser to the given page
    pub fn navigate(&self, path: &str) {
        self.navigator.navigate(path);
    }

    /// Create a request builder for an endpoint with the session headers attached
    pub fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let url = self.config.endpoint_url(endpoint);
        let token = self.session.token();
        debug!(%method, endpoint, authenticated = token.is_some(), "API request");

        let mut request = self
            .client
            .request(method, url)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        request
    }

    /// Execute a request, redirecting to the login page on 401
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        self.execute_with(request, OnUnauthorized::Redirect).await
    }

    /// Call an endpoint with an optional JSON body and return the parsed response
    ///
    /// The method defaults to GET.
    pub async fn call(
        &self,
        endpoint: &str,
        method: Option<Method>,
        body: Option<&Value>,
    ) -> Result<Value, ClientError> {
        let mut request = self.request(method.unwrap_or(Method::GET), endpoint);
        if let Some(body) = body {
            request = request.json(body);
        }
        self.execute(request).await
    }

    pub(crate) async fn execute_with<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        on_unauthorized: OnUnauthorized,
    ) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            return Ok(serde_json::from_slice(&body)?);
        }

        let error = ClientError::from_response(status, &body);
        warn!(status = status.as_u16(), "API request failed: {error}");

        if error.is_auth_expired() {
            self.session.clear();
            if on_unauthorized == OnUnauthorized::Redirect {
                debug!(page = %self.config.pages.login, "Session rejected, redirecting to login");
                self.navigator.navigate(&self.config.pages.login);
            }
        }

        Err(error)
    }

    /// Bare HTTP client, for requests that must not carry session headers
    pub(crate) fn http(&self) -> &Client {
        &self.client
    }
}

impl std::fmt::Debug for TaskGridClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskGridClient")
            .field("base_url", &self.config.base_url())
            .field("session", &self.session)
            .finish()
    }
}

/// Builder for [`TaskGridClient`]
///
/// In the browser the store and navigator default to `localStorage` and
/// `window.location`. Native builds default to an in-memory store and must be
/// given a navigator.
#[derive(Default)]
pub struct TaskGridClientBuilder {
    config: Option<TaskGridConfig>,
    store: Option<Arc<dyn CredentialStore>>,
    navigator: Option<Arc<dyn Navigator>>,
}

impl TaskGridClientBuilder {
    pub fn config(mut self, config: TaskGridConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Override the API base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.get_or_insert_with(TaskGridConfig::default).api_base_url = url.into();
        self
    }

    pub fn store(mut self, store: impl CredentialStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    pub fn navigator(mut self, navigator: impl Navigator + 'static) -> Self {
        self.navigator = Some(Arc::new(navigator));
        self
    }

    /// Build the client
    pub fn build(self) -> Result<TaskGridClient, ClientError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let store = match self.store {
            Some(store) => store,
            None => default_store(),
        };
        let navigator = match self.navigator {
            Some(navigator) => navigator,
            None => default_navigator()?,
        };

        let session = SessionStore::new(store, &config.storage_prefix);

        Ok(TaskGridClient {
            client: build_http_client()?,
            config: Arc::new(config),
            session,
            navigator,
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_http_client() -> Result<Client, ClientError> {
    Ok(Client::builder()
        .user_agent(concat!("taskgrid-client/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

#[cfg(target_arch = "wasm32")]
fn build_http_client() -> Result<Client, ClientError> {
    Ok(Client::builder().build()?)
}

#[cfg(not(target_arch = "wasm32"))]
fn default_store() -> Arc<dyn CredentialStore> {
    Arc::new(crate::storage::MemoryStore::new())
}

#[cfg(target_arch = "wasm32")]
fn default_store() -> Arc<dyn CredentialStore> {
    Arc::new(crate::storage::LocalStore)
}

#[cfg(not(target_arch = "wasm32"))]
fn default_navigator() -> Result<Arc<dyn Navigator>, ClientError> {
    Err(ClientError::Configuration(
        "a navigator is required outside the browser".into(),
    ))
}

#[cfg(target_arch = "wasm32")]
fn default_navigator() -> Result<Arc<dyn Navigator>, ClientError> {
    Ok(Arc::new(crate::navigation::BrowserNavigator))
}
