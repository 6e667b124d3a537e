//! TaskGrid client configuration

use crate::error::ClientError;
use serde::{Deserialize, Serialize};
use url::Url;

/// Authentication endpoints
pub struct AuthEndpoints;

impl AuthEndpoints {
    pub const LOGIN: &'static str = "/auth/login";
    pub const REGISTER: &'static str = "/auth/register";
    pub const PROFILE: &'static str = "/auth/profile";
}

/// Data endpoints
pub struct DataEndpoints;

impl DataEndpoints {
    pub const DASHBOARD: &'static str = "/data/dashboard";
    pub const PROJECTS: &'static str = "/data/projects";
    pub const TASKS: &'static str = "/data/tasks";
    pub const USERS: &'static str = "/data/users";
    pub const WORK_LOGS: &'static str = "/data/work-logs";
}

/// Backend liveness check
pub const HEALTH_ENDPOINT: &str = "/health";

/// Client configuration shared by every page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskGridConfig {
    /// Base URL of the TaskGrid API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Display name of the application
    #[serde(default = "default_app_name")]
    pub app_name: String,
    /// Application version
    #[serde(default = "default_version")]
    pub version: String,
    /// Prefix applied to every local storage key
    #[serde(default = "default_storage_prefix")]
    pub storage_prefix: String,
    /// Page locations used for redirects
    #[serde(default)]
    pub pages: PageConfig,
}

/// Locations of the pages the client navigates between
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    #[serde(default = "default_login_page")]
    pub login: String,
    #[serde(default = "default_dashboard_page")]
    pub dashboard: String,
    #[serde(default = "default_signup_page")]
    pub signup: String,
}

fn default_api_base_url() -> String {
    "https://taskgrid-yd65.onrender.com".to_string()
}

fn default_app_name() -> String {
    "TaskGrid".to_string()
}

fn default_version() -> String {
    "1.0.0".to_string()
}

fn default_storage_prefix() -> String {
    "taskgrid_".to_string()
}

fn default_login_page() -> String {
    "../index.html".to_string()
}

fn default_dashboard_page() -> String {
    "../dashboard/dashboard-enhanced.html".to_string()
}

fn default_signup_page() -> String {
    "../signup/signup-fixed.html".to_string()
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            login: default_login_page(),
            dashboard: default_dashboard_page(),
            signup: default_signup_page(),
        }
    }
}

impl Default for TaskGridConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            app_name: default_app_name(),
            version: default_version(),
            storage_prefix: default_storage_prefix(),
            pages: PageConfig::default(),
        }
    }
}

impl TaskGridConfig {
    /// Create a configuration pointing at the given API base URL
    pub fn with_base_url(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Self::default()
        }
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }

    /// Absolute URL for an endpoint path
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url(), endpoint)
    }

    /// Check that the configuration can be used to build a client
    pub fn validate(&self) -> Result<(), ClientError> {
        Url::parse(self.base_url()).map_err(|e| {
            ClientError::Configuration(format!("invalid api_base_url {:?}: {e}", self.api_base_url))
        })?;

        if self.storage_prefix.is_empty() {
            return Err(ClientError::Configuration(
                "storage_prefix must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Load configuration from `taskgrid.toml` or `config/taskgrid.toml` and
    /// `TASKGRID__*` environment variables
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Self, config::ConfigError> {
        use std::path::Path;

        Self::load_layered(
            &[Path::new("taskgrid.toml"), Path::new("config/taskgrid.toml")],
            environment(),
        )
    }

    /// Load configuration from a specific file, with environment overrides
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: &str) -> Result<Self, config::ConfigError> {
        use config::{Config, File};

        Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(File::with_name(path))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Defaults, then every existing file in order, then the environment
    #[cfg(not(target_arch = "wasm32"))]
    fn load_layered(
        paths: &[&std::path::Path],
        env: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        use config::{Config, File};

        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        for path in paths.iter().filter(|path| path.exists()) {
            builder = builder.add_source(File::from(*path));
        }

        builder.add_source(env).build()?.try_deserialize()
    }
}

/// `TASKGRID__API_BASE_URL`, `TASKGRID__PAGES__LOGIN`, ...
#[cfg(not(target_arch = "wasm32"))]
fn environment() -> config::Environment {
    config::Environment::with_prefix("TASKGRID")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_deployed_backend() {
        let config = TaskGridConfig::default();
        assert_eq!(config.api_base_url, "https://taskgrid-yd65.onrender.com");
        assert_eq!(config.storage_prefix, "taskgrid_");
        assert_eq!(config.app_name, "TaskGrid");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn endpoint_url_strips_trailing_slash() {
        let config = TaskGridConfig::with_base_url("http://localhost:5000/");
        assert_eq!(
            config.endpoint_url(AuthEndpoints::LOGIN),
            "http://localhost:5000/auth/login"
        );
        assert_eq!(
            config.endpoint_url(DataEndpoints::WORK_LOGS),
            "http://localhost:5000/data/work-logs"
        );
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let config = TaskGridConfig::with_base_url("not a url");
        assert!(matches!(
            config.validate(),
            Err(ClientError::Configuration(_))
        ));
    }

    #[test]
    fn rejects_empty_storage_prefix() {
        let config = TaskGridConfig {
            storage_prefix: String::new(),
            ..TaskGridConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    #[cfg(not(target_arch = "wasm32"))]
    fn load_from_file_overrides_defaults() {
        let dir = std::env::temp_dir().join(format!("taskgrid-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("taskgrid.toml");
        std::fs::write(
            &path,
            "api_base_url = \"http://localhost:5000\"\n[pages]\nlogin = \"/login.html\"\n",
        )
        .unwrap();

        let config = TaskGridConfig::load_from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:5000");
        assert_eq!(config.pages.login, "/login.html");
        assert_eq!(config.pages.dashboard, default_dashboard_page());
        assert_eq!(config.storage_prefix, "taskgrid_");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[cfg(not(target_arch = "wasm32"))]
    mod layered {
        use crate::config::*;
        use std::path::{Path, PathBuf};

        struct TempDir(PathBuf);

        impl TempDir {
            fn new(name: &str) -> Self {
                let dir = std::env::temp_dir()
                    .join(format!("taskgrid-{name}-{}", std::process::id()));
                std::fs::create_dir_all(&dir).unwrap();
                Self(dir)
            }

            fn write(&self, file: &str, contents: &str) -> PathBuf {
                let path = self.0.join(file);
                std::fs::write(&path, contents).unwrap();
                path
            }
        }

        impl Drop for TempDir {
            fn drop(&mut self) {
                std::fs::remove_dir_all(&self.0).ok();
            }
        }

        fn env(vars: &[(&str, &str)]) -> config::Environment {
            let mut map = config::Map::new();
            for (key, value) in vars {
                map.insert(key.to_string(), value.to_string());
            }
            environment().source(Some(map))
        }

        #[test]
        fn missing_files_are_skipped() {
            let dir = TempDir::new("skip");
            let present = dir.write("taskgrid.toml", "app_name = \"TaskGrid Staging\"\n");
            let missing = dir.0.join("config").join("taskgrid.toml");

            let config =
                TaskGridConfig::load_layered(&[missing.as_path(), present.as_path()], env(&[]))
                    .unwrap();
            assert_eq!(config.app_name, "TaskGrid Staging");
            assert_eq!(config.api_base_url, default_api_base_url());
        }

        #[test]
        fn later_files_override_earlier_ones() {
            let dir = TempDir::new("order");
            let first = dir.write("first.toml", "api_base_url = \"http://first:5000\"\n");
            let second = dir.write("second.toml", "api_base_url = \"http://second:5000\"\n");

            let config =
                TaskGridConfig::load_layered(&[first.as_path(), second.as_path()], env(&[]))
                    .unwrap();
            assert_eq!(config.api_base_url, "http://second:5000");
        }

        #[test]
        fn environment_overrides_files() {
            let dir = TempDir::new("env");
            let file = dir.write(
                "taskgrid.toml",
                "storage_prefix = \"tg_\"\n[pages]\nlogin = \"/file-login.html\"\n",
            );

            let config = TaskGridConfig::load_layered(
                &[file.as_path()],
                env(&[
                    ("TASKGRID__PAGES__LOGIN", "/env-login.html"),
                    ("TASKGRID__API_BASE_URL", "http://localhost:7000"),
                ]),
            )
            .unwrap();
            assert_eq!(config.pages.login, "/env-login.html");
            assert_eq!(config.api_base_url, "http://localhost:7000");
            assert_eq!(config.storage_prefix, "tg_");
            assert_eq!(config.pages.dashboard, default_dashboard_page());
        }

        #[test]
        fn no_sources_yield_defaults() {
            let missing = Path::new("/nonexistent/taskgrid.toml");
            let config = TaskGridConfig::load_layered(&[missing], env(&[])).unwrap();
            assert_eq!(config, TaskGridConfig::default());
        }
    }
}
