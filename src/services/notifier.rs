// src/services/notifier.rs

//! Push notifications for newly released chapters.

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::{ApiConfig, Chapter, Credentials, Notification};
use crate::utils::http::HttpClient;

/// Something that can tell the user about a new chapter.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send one message for `title` reaching `chapter`.
    async fn notify(&self, title: &str, chapter: &Chapter) -> Result<()>;
}

/// Pushover message sender.
#[derive(Debug, Clone)]
pub struct PushoverNotifier {
    http: HttpClient,
    url: String,
    app_token: String,
    user_key: String,
}

impl PushoverNotifier {
    pub fn new(http: HttpClient, api: &ApiConfig, credentials: &Credentials) -> Self {
        Self {
            http,
            url: api.notify_url.clone(),
            app_token: credentials.pushover_app_token.clone(),
            user_key: credentials.pushover_user_key.clone(),
        }
    }
}

#[async_trait]
impl Notifier for PushoverNotifier {
    async fn notify(&self, title: &str, chapter: &Chapter) -> Result<()> {
        let message = Notification::new(title, chapter.clone()).message();
        let form = [
            ("token", self.app_token.as_str()),
            ("user", self.user_key.as_str()),
            ("message", message.as_str()),
        ];

        let request = self.http.inner().post(&self.url).form(&form);
        let response = self
            .http
            .send(request)
            .await
            .map_err(|e| AppError::notify(title, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::notify(title, format!("HTTP status {status}")));
        }
        Ok(())
    }
}
