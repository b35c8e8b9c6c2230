// src/utils/http.rs

//! HTTP transport shared by every remote call.
//!
//! [`HttpClient`] is built once per run and handed to each service. It owns
//! the default headers, the per-request timeout and the retry policy for
//! transient failures.

use std::time::Duration;

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, ORIGIN, REFERER};
use reqwest::{RequestBuilder, Response, StatusCode};

use crate::error::{AppError, Result};
use crate::models::HttpConfig;

/// Statuses worth another attempt.
const RETRY_STATUSES: [StatusCode; 5] = [
    StatusCode::TOO_MANY_REQUESTS,
    StatusCode::INTERNAL_SERVER_ERROR,
    StatusCode::BAD_GATEWAY,
    StatusCode::SERVICE_UNAVAILABLE,
    StatusCode::GATEWAY_TIMEOUT,
];

/// Bounded exponential backoff.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Extra attempts after the first
    pub max_retries: u32,
    /// Delay before the first retry; doubled for each one after
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &HttpConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            backoff: Duration::from_millis(config.backoff_ms),
        }
    }

    /// Delay before retry number `attempt` (0-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(2u32.saturating_pow(attempt))
    }

    fn should_retry_status(status: StatusCode) -> bool {
        RETRY_STATUSES.contains(&status)
    }

    fn should_retry_error(error: &reqwest::Error) -> bool {
        error.is_connect() || error.is_timeout() || error.is_request()
    }
}

/// Configured HTTP client with retries.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl HttpClient {
    /// Create a client from the HTTP section of the config.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .default_headers(default_headers(config)?)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            retry: RetryPolicy::from_config(config),
        })
    }

    /// The underlying client, for building requests.
    pub fn inner(&self) -> &reqwest::Client {
        &self.client
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Send a request, retrying connection errors, timeouts and
    /// 429/500/502/503/504 responses.
    ///
    /// Once attempts run out the last response is returned as-is, so callers
    /// still see the final status.
    pub async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let mut attempt = 0;
        loop {
            let pending = request
                .try_clone()
                .ok_or_else(|| AppError::config("request body cannot be retried"))?;
            let retries_left = attempt < self.retry.max_retries;

            match pending.send().await {
                Ok(response)
                    if retries_left && RetryPolicy::should_retry_status(response.status()) =>
                {
                    log::debug!(
                        "{} returned {}, retrying ({}/{})",
                        response.url(),
                        response.status(),
                        attempt + 1,
                        self.retry.max_retries
                    );
                }
                Ok(response) => return Ok(response),
                Err(e) if retries_left && RetryPolicy::should_retry_error(&e) => {
                    log::debug!(
                        "Request failed: {}, retrying ({}/{})",
                        e,
                        attempt + 1,
                        self.retry.max_retries
                    );
                }
                Err(e) => return Err(e.into()),
            }

            let delay = self.retry.delay(attempt);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            attempt += 1;
        }
    }
}

fn default_headers(config: &HttpConfig) -> Result<HeaderMap> {
    let value = |name: &str, v: &str| {
        HeaderValue::from_str(v)
            .map_err(|e| AppError::config(format!("Invalid {name} header {v:?}: {e}")))
    };

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(ORIGIN, value("origin", &config.origin)?);
    headers.insert(REFERER, value("referer", &config.referer)?);
    Ok(headers)
}
