//! TaskGrid API client
//!
//! Configuration, credential storage and the request wrapper shared by the
//! TaskGrid pages. Builds natively and for `wasm32`.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod navigation;
pub mod storage;
pub mod types;

pub use client::{TaskGridClient, TaskGridClientBuilder};
pub use config::{AuthEndpoints, DataEndpoints, HEALTH_ENDPOINT, PageConfig, TaskGridConfig};
pub use error::ClientError;
pub use navigation::Navigator;
pub use storage::{CredentialStore, MemoryStore, SessionStore};
pub use types::{Credentials, HealthStatus, LoginResponse, Registration};

#[cfg(target_arch = "wasm32")]
pub use navigation::BrowserNavigator;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;

pub use reqwest::Method;
