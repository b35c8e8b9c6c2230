//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP transport settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Remote endpoints
    #[serde(default)]
    pub api: ApiConfig,

    /// State file settings
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    ///
    /// A missing file is the normal case and only logged at debug level.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("No config file at {:?}, using defaults", path);
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("Config load failed from {:?}: {}. Using defaults.", path, e);
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        for (name, value) in [
            ("api.login_url", &self.api.login_url),
            ("api.entries_url", &self.api.entries_url),
            ("api.notify_url", &self.api.notify_url),
        ] {
            Url::parse(value)
                .map_err(|e| AppError::validation(format!("{name} is not a valid URL: {e}")))?;
        }
        Ok(())
    }

    /// Resolve the state file path.
    ///
    /// Falls back to `unread.json` beside the running executable.
    pub fn state_file(&self) -> Result<PathBuf> {
        if let Some(path) = &self.storage.state_file {
            return Ok(path.clone());
        }
        let exe = std::env::current_exe()?;
        let dir = exe
            .parent()
            .ok_or_else(|| AppError::config("Cannot determine executable directory"))?;
        Ok(dir.join(defaults::STATE_FILE_NAME))
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Origin header sent to the reading-list API
    #[serde(default = "defaults::origin")]
    pub origin: String,

    /// Referer header sent to the reading-list API
    #[serde(default = "defaults::referer")]
    pub referer: String,

    /// Per-request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Extra attempts for transient failures
    #[serde(default = "defaults::max_retries")]
    pub max_retries: u32,

    /// Base backoff between attempts in milliseconds, doubled each retry
    #[serde(default = "defaults::backoff")]
    pub backoff_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            origin: defaults::origin(),
            referer: defaults::referer(),
            timeout_secs: defaults::timeout(),
            max_retries: defaults::max_retries(),
            backoff_ms: defaults::backoff(),
        }
    }
}

/// Remote endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Session (login) endpoint
    #[serde(default = "defaults::login_url")]
    pub login_url: String,

    /// Paged reading-list endpoint
    #[serde(default = "defaults::entries_url")]
    pub entries_url: String,

    /// Reading-list status filter
    #[serde(default = "defaults::status_filter")]
    pub status_filter: u32,

    /// Push notification endpoint
    #[serde(default = "defaults::notify_url")]
    pub notify_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            login_url: defaults::login_url(),
            entries_url: defaults::entries_url(),
            status_filter: defaults::status_filter(),
            notify_url: defaults::notify_url(),
        }
    }
}

/// State file settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Explicit state file path
    #[serde(default)]
    pub state_file: Option<PathBuf>,
}

mod defaults {
    pub const STATE_FILE_NAME: &str = "unread.json";

    // HTTP defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/134.0.0.0 Safari/537.36"
            .into()
    }
    pub fn origin() -> String {
        "https://www.kenmei.co".into()
    }
    pub fn referer() -> String {
        "https://www.kenmei.co/".into()
    }
    pub fn timeout() -> u64 {
        10
    }
    pub fn max_retries() -> u32 {
        3
    }
    pub fn backoff() -> u64 {
        1000
    }

    // API defaults
    pub fn login_url() -> String {
        "https://api.kenmei.co/auth/sessions".into()
    }
    pub fn entries_url() -> String {
        "https://api.kenmei.co/api/v2/manga_entries".into()
    }
    pub fn status_filter() -> u32 {
        1
    }
    pub fn notify_url() -> String {
        "https://api.pushover.net/1/messages.json".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.http.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.http.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_endpoint() {
        let mut config = Config::default();
        config.api.notify_url = "not a url".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("api.notify_url"));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [http]
            timeout_secs = 3

            [storage]
            state_file = "/var/lib/kenmei/unread.json"
            "#,
        )
        .unwrap();

        assert_eq!(config.http.timeout_secs, 3);
        assert_eq!(config.http.max_retries, 3);
        assert_eq!(config.api.status_filter, 1);
        assert_eq!(
            config.state_file().unwrap(),
            PathBuf::from("/var/lib/kenmei/unread.json")
        );
    }

    #[test]
    fn load_or_default_handles_missing_and_broken_files() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("absent.toml");
        assert_eq!(Config::load_or_default(&missing).http.timeout_secs, 10);

        let broken = tmp.path().join("broken.toml");
        fs::write(&broken, "[http\ntimeout_secs = ").unwrap();
        assert_eq!(Config::load_or_default(&broken).http.timeout_secs, 10);
    }

    #[test]
    fn default_state_file_sits_beside_executable() {
        let path = Config::default().state_file().unwrap();
        assert_eq!(path.file_name().unwrap(), "unread.json");
    }
}
