//! Console configuration loaded via OrthoConfig.
//!
//! Values come from `CRM_*` environment variables and configuration files;
//! global command-line flags are layered on top by the caller.

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use camino::Utf8PathBuf;
use list_view::DEFAULT_PAGE_SIZE;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const STATE_DIR_NAME: &str = "crm";

/// Errors raised while loading or interpreting settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Configuration sources could not be merged.
    #[error("failed to load configuration: {message}")]
    Load {
        /// Loader diagnostic.
        message: String,
    },
    /// The backend base URL is not an absolute URL.
    #[error("invalid base URL '{value}': {message}")]
    BaseUrl {
        /// Configured value.
        value: String,
        /// Parser diagnostic.
        message: String,
    },
    /// The state directory is not valid UTF-8.
    #[error("state directory '{path}' is not valid UTF-8")]
    StateDir {
        /// Lossy rendering of the configured path.
        path: String,
    },
}

/// Settings shared by every console command.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CRM")]
pub struct ConsoleSettings {
    /// Backend base URL.
    pub base_url: Option<String>,
    /// Directory holding the persisted session entry.
    pub state_dir: Option<PathBuf>,
    /// Per-request timeout in seconds.
    #[ortho_config(default = 30)]
    pub request_timeout_secs: u64,
    /// Rows per page in admin tables.
    pub page_size: Option<usize>,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            state_dir: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            page_size: None,
        }
    }
}

/// Command-line values that take precedence over loaded settings.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    /// `--base-url`.
    pub base_url: Option<String>,
    /// `--state-dir`.
    pub state_dir: Option<PathBuf>,
    /// `--page-size`.
    pub page_size: Option<usize>,
}

impl ConsoleSettings {
    /// Load settings from the environment and configuration files only.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] when a source is malformed.
    pub fn from_environment() -> Result<Self, ConfigError> {
        Self::load_from_iter([OsString::from("crm")]).map_err(|err| ConfigError::Load {
            message: err.to_string(),
        })
    }

    /// Apply command-line overrides.
    #[must_use]
    pub fn with_overrides(self, overrides: SettingsOverrides) -> Self {
        Self {
            base_url: overrides.base_url.or(self.base_url),
            state_dir: overrides.state_dir.or(self.state_dir),
            page_size: overrides.page_size.or(self.page_size),
            request_timeout_secs: self.request_timeout_secs,
        }
    }

    /// Backend base URL, falling back to the local development server.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::BaseUrl`] when the value does not parse.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let value = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        Url::parse(value).map_err(|err| ConfigError::BaseUrl {
            value: value.to_owned(),
            message: err.to_string(),
        })
    }

    /// Session state directory, falling back to the XDG state location.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::StateDir`] for non UTF-8 paths.
    pub fn state_dir(&self) -> Result<Utf8PathBuf, ConfigError> {
        let path = self.state_dir.clone().unwrap_or_else(default_state_dir);
        Utf8PathBuf::from_path_buf(path).map_err(|path| ConfigError::StateDir {
            path: path.to_string_lossy().into_owned(),
        })
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Rows per table page.
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }
}

fn default_state_dir() -> PathBuf {
    if let Some(state_home) = std::env::var_os("XDG_STATE_HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(state_home).join(STATE_DIR_NAME);
    }
    std::env::var_os("HOME").filter(|v| !v.is_empty()).map_or_else(
        || PathBuf::from(".").join(format!(".{STATE_DIR_NAME}")),
        |home| {
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join(STATE_DIR_NAME)
        },
    )
}
