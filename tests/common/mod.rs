#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use kenmei_notifier::error::{AppError, Result};
use kenmei_notifier::models::{Chapter, Config, Credentials};
use kenmei_notifier::services::Notifier;
use serde_json::{Value, json};
use wiremock::MockServer;

pub const LOGIN_PATH: &str = "/auth/sessions";
pub const ENTRIES_PATH: &str = "/api/v2/manga_entries";
pub const NOTIFY_PATH: &str = "/1/messages.json";
pub const TOKEN: &str = "test-access-token";

/// Config pointing every endpoint at the mock server, with fast retries.
pub fn config_for(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.api.login_url = format!("{}{}", server.uri(), LOGIN_PATH);
    config.api.entries_url = format!("{}{}", server.uri(), ENTRIES_PATH);
    config.api.notify_url = format!("{}{}", server.uri(), NOTIFY_PATH);
    config.http.max_retries = 1;
    config.http.backoff_ms = 0;
    config.http.timeout_secs = 5;
    config
}

/// Base URL of a local port nothing is listening on.
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

pub fn credentials() -> Credentials {
    Credentials {
        login: "reader@example.com".into(),
        password: "hunter2".into(),
        pushover_app_token: "app-token".into(),
        pushover_user_key: "user-key".into(),
    }
}

pub fn entry(title: &str, unread: bool, chapter: Value) -> Value {
    json!({
        "id": title.len(),
        "type": "manga_entry",
        "attributes": {
            "title": title,
            "unread": unread,
            "latestChapter": {"chapter": chapter}
        }
    })
}

pub fn page(entries: Vec<Value>, pages: u32) -> Value {
    json!({
        "entries": entries,
        "pagy": {"page": 1, "pages": pages}
    })
}

/// Notifier that records calls and can be told to fail.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<(String, String)>>,
    pub fail_titles: Vec<String>,
}

impl RecordingNotifier {
    pub fn failing_for(titles: &[&str]) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_titles: titles.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, title: &str, chapter: &Chapter) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((title.to_string(), chapter.to_string()));
        if self.fail_titles.iter().any(|t| t == title) {
            return Err(AppError::notify(title, "simulated failure"));
        }
        Ok(())
    }
}
