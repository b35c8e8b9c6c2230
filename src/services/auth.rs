// src/services/auth.rs

//! Session gateway: trades credentials for a bearer token.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{ApiConfig, Credentials};
use crate::utils::http::HttpClient;

/// Bearer token for the reading-list API.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    user: LoginUser<'a>,
}

#[derive(Serialize)]
struct LoginUser<'a> {
    login: &'a str,
    password: &'a str,
    remember_me: bool,
}

#[derive(Deserialize)]
struct LoginResponse {
    #[serde(default)]
    access: Option<String>,
}

/// Service for logging in to the reading-list API.
#[derive(Debug, Clone)]
pub struct SessionGateway {
    http: HttpClient,
    login_url: String,
}

impl SessionGateway {
    pub fn new(http: HttpClient, api: &ApiConfig) -> Self {
        Self {
            http,
            login_url: api.login_url.clone(),
        }
    }

    /// Log in and return the access token.
    ///
    /// Any non-2xx status, transport failure, malformed body or missing
    /// token is an [`AppError::Auth`].
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<AccessToken> {
        let body = LoginRequest {
            user: LoginUser {
                login: &credentials.login,
                password: &credentials.password,
                remember_me: false,
            },
        };

        let request = self.http.inner().post(&self.login_url).json(&body);
        let response = self.http.send(request).await.map_err(AppError::auth)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::auth(format!("login returned HTTP {status}")));
        }

        let parsed: LoginResponse = response
            .json()
            .await
            .map_err(|e| AppError::auth(format!("invalid login response: {e}")))?;

        let token = parsed
            .access
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| AppError::auth("login response has no access token"))?;

        log::debug!("Authentication successful");
        Ok(AccessToken::new(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_body_shape() {
        let body = LoginRequest {
            user: LoginUser {
                login: "reader@example.com",
                password: "hunter2",
                remember_me: false,
            },
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "user": {
                    "login": "reader@example.com",
                    "password": "hunter2",
                    "remember_me": false
                }
            })
        );
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let token = AccessToken::new("eyJhbGciOi");
        assert!(!format!("{token:?}").contains("eyJ"));
        assert_eq!(token.secret(), "eyJhbGciOi");
    }
}
