//! Account credentials read from the environment.

use std::fmt;

use crate::error::{AppError, Result};

pub const ENV_LOGIN: &str = "KENMEI_EMAIL";
pub const ENV_PASSWORD: &str = "KENMEI_PASSWORD";
pub const ENV_PUSHOVER_APP: &str = "PUSHOVER_APP_KEY";
pub const ENV_PUSHOVER_USER: &str = "PUSHOVER_ACC_KEY";

/// Every variable that must be set before a run starts.
pub const REQUIRED_VARS: [&str; 4] = [ENV_LOGIN, ENV_PASSWORD, ENV_PUSHOVER_APP, ENV_PUSHOVER_USER];

/// Kenmei login and Pushover keys.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub login: String,
    pub password: String,
    pub pushover_app_token: String,
    pub pushover_user_key: String,
}

impl Credentials {
    /// Read credentials from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read credentials through `lookup`, reporting every missing key at once.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let missing: Vec<&str> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|&key| value(key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(AppError::config(format!(
                "Missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        let take = |key: &str| value(key).unwrap_or_default();
        Ok(Self {
            login: take(ENV_LOGIN),
            password: take(ENV_PASSWORD),
            pushover_app_token: take(ENV_PUSHOVER_APP),
            pushover_user_key: take(ENV_PUSHOVER_USER),
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .field("pushover_app_token", &"<redacted>")
            .field("pushover_user_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_all_present() {
        let creds = Credentials::from_lookup(lookup_from(&[
            (ENV_LOGIN, "reader@example.com"),
            (ENV_PASSWORD, "hunter2"),
            (ENV_PUSHOVER_APP, "app-token"),
            (ENV_PUSHOVER_USER, "user-key"),
        ]))
        .unwrap();

        assert_eq!(creds.login, "reader@example.com");
        assert_eq!(creds.pushover_user_key, "user-key");
    }

    #[test]
    fn test_reports_every_missing_key() {
        let err = Credentials::from_lookup(lookup_from(&[
            (ENV_LOGIN, "reader@example.com"),
            (ENV_PASSWORD, ""),
        ]))
        .unwrap_err();

        let message = err.to_string();
        assert!(message.contains(ENV_PASSWORD));
        assert!(message.contains(ENV_PUSHOVER_APP));
        assert!(message.contains(ENV_PUSHOVER_USER));
        assert!(!message.contains(ENV_LOGIN));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = Credentials {
            login: "reader".into(),
            password: "hunter2".into(),
            pushover_app_token: "app-token".into(),
            pushover_user_key: "user-key".into(),
        };
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("app-token"));
        assert!(rendered.contains("reader"));
    }
}
