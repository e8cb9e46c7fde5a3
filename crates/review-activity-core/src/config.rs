//! TOML-based configuration and run-time settings resolution.
//!
//! Optional settings live at `~/.config/review-activity/config.toml` (or the
//! platform equivalent). A missing file means built-in defaults. The auth
//! token is never read from this file: it comes from the command line or
//! the `UDACITY_AUTH_TOKEN` environment variable, resolved once at startup.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::stats::Window;

/// Environment variable holding the fallback auth token.
pub const TOKEN_ENV_VAR: &str = "UDACITY_AUTH_TOKEN";

/// Default review API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://review-api.udacity.com/api/v1";

/// User settings, all optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// IANA zone used to assign reviews to calendar days.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

// Default functions
fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.into()
}
fn default_timezone() -> String {
    // The review platform books its day in Pacific time.
    "US/Pacific".into()
}
fn default_window_days() -> u32 {
    365
}
fn default_output() -> PathBuf {
    PathBuf::from("activity.png")
}
fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            timezone: default_timezone(),
            window_days: default_window_days(),
            output: default_output(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub timezone: Option<String>,
    pub window_days: Option<u32>,
    pub output: Option<PathBuf>,
}

impl Settings {
    /// Returns `<config dir>/review-activity/config.toml`, if a config dir exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("review-activity").join("config.toml"))
    }

    /// Load from `path`, or return defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Load from an explicit path or the default location.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => match Self::default_path() {
                Some(path) => Self::load_from(&path),
                None => Ok(Self::default()),
            },
        }
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, overrides: SettingsOverrides) -> Self {
        if let Some(tz) = overrides.timezone {
            self.timezone = tz;
        }
        if let Some(days) = overrides.window_days {
            self.window_days = days;
        }
        if let Some(output) = overrides.output {
            self.output = output;
        }
        self
    }
}

/// API token. Debug output never shows the value.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// Pick the token from the flag, falling back to the environment value.
///
/// Empty or whitespace-only values count as absent.
///
/// # Errors
///
/// Returns [`ConfigError::MissingToken`] when neither source has a token.
pub fn resolve_token(
    flag: Option<String>,
    env_value: Option<String>,
) -> Result<AuthToken, ConfigError> {
    flag.into_iter()
        .chain(env_value)
        .map(|t| t.trim().to_string())
        .find(|t| !t.is_empty())
        .map(AuthToken)
        .ok_or(ConfigError::MissingToken {
            env_var: TOKEN_ENV_VAR,
        })
}

/// Immutable configuration for one run, validated once at startup.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub token: AuthToken,
    pub api_base_url: String,
    pub timezone: Tz,
    /// Trailing window ending today in `timezone`.
    pub window: Window,
    pub output: PathBuf,
    pub request_timeout: Duration,
    pub debug: bool,
}

impl RunConfig {
    /// Validate settings and bind them to a token.
    pub fn new(settings: Settings, token: AuthToken, debug: bool) -> Result<Self, ConfigError> {
        let timezone: Tz = settings
            .timezone
            .parse()
            .map_err(|e| ConfigError::InvalidValue {
                key: "timezone".into(),
                message: format!("{e}"),
            })?;

        let window = Window::ending_today(&timezone, settings.window_days)?;

        if settings.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "request_timeout_secs".into(),
                message: "must be at least 1".into(),
            });
        }

        if settings.output.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "output".into(),
                message: "path is empty".into(),
            });
        }

        Ok(Self {
            token,
            api_base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            timezone,
            window,
            output: settings.output,
            request_timeout: Duration::from_secs(settings.request_timeout_secs),
            debug,
        })
    }
}
