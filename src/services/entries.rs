// src/services/entries.rs

//! Reading-list fetcher.
//!
//! Pages are requested one after another. Page 1 tells us how many pages
//! exist; a later page that fails is logged and left out of the result.

use crate::error::{AppError, Result};
use crate::models::{ApiConfig, EntriesPage, RemoteEntry};
use crate::services::auth::AccessToken;
use crate::utils::http::HttpClient;

/// Aggregated result of fetching every page.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    /// Entries from every page that loaded, in page order
    pub entries: Vec<RemoteEntry>,
    /// Page count reported by the first page
    pub total_pages: u32,
    /// Pages whose entries are missing from `entries`
    pub failed_pages: Vec<u32>,
}

impl FetchOutcome {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Some pages loaded but at least one did not.
    pub fn is_partial(&self) -> bool {
        !self.entries.is_empty() && !self.failed_pages.is_empty()
    }

    fn push_page(&mut self, page: u32, data: EntriesPage) {
        if data.entries.is_empty() {
            log::debug!("No entries found on page {}", page);
            return;
        }
        log::debug!("Fetched {} entries from page {}", data.entries.len(), page);
        self.entries
            .extend(data.entries.iter().map(RemoteEntry::from_json));
    }
}

/// Service for fetching the user's reading list.
#[derive(Debug, Clone)]
pub struct EntryFetcher {
    http: HttpClient,
    entries_url: String,
    status_filter: u32,
}

impl EntryFetcher {
    pub fn new(http: HttpClient, api: &ApiConfig) -> Self {
        Self {
            http,
            entries_url: api.entries_url.clone(),
            status_filter: api.status_filter,
        }
    }

    /// Fetch every page of the reading list.
    ///
    /// Never fails: a first-page failure yields an empty outcome.
    pub async fn fetch_all(&self, token: &AccessToken) -> FetchOutcome {
        let first = match self.fetch_page(token, 1).await {
            Ok(page) => page,
            Err(e) => {
                log::error!("Initial reading list request failed: {}", e);
                return FetchOutcome {
                    total_pages: 1,
                    failed_pages: vec![1],
                    ..FetchOutcome::default()
                };
            }
        };

        let total_pages = first.total_pages();
        log::debug!("Found {} page(s) of manga entries", total_pages);

        let mut outcome = FetchOutcome {
            total_pages,
            ..FetchOutcome::default()
        };
        outcome.push_page(1, first);

        for page in 2..=total_pages {
            match self.fetch_page(token, page).await {
                Ok(data) => outcome.push_page(page, data),
                Err(e) => {
                    log::error!("Failed to fetch data on page {}: {}", page, e);
                    outcome.failed_pages.push(page);
                }
            }
        }

        outcome
    }

    /// Fetch and decode a single page.
    async fn fetch_page(&self, token: &AccessToken, page: u32) -> Result<EntriesPage> {
        let context = || format!("page {page}");

        let request = self
            .http
            .inner()
            .get(&self.entries_url)
            .bearer_auth(token.secret())
            .query(&[("page", page), ("status", self.status_filter)]);

        let response = self
            .http
            .send(request)
            .await
            .map_err(|e| AppError::fetch(context(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::fetch(context(), format!("HTTP status {status}")));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::fetch(context(), e))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| AppError::fetch(context(), format!("invalid JSON: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_push_page_converts_entries() {
        let page: EntriesPage = serde_json::from_value(json!({
            "entries": [
                {"id": 1, "attributes": {"title": "A", "unread": true}},
                {"id": 2, "attributes": {"title": "B", "unread": false}}
            ]
        }))
        .unwrap();

        let mut outcome = FetchOutcome::default();
        outcome.push_page(1, page);

        let titles: Vec<_> = outcome
            .entries
            .iter()
            .map(|e| e.title.as_deref().unwrap())
            .collect();
        assert_eq!(titles, vec!["A", "B"]);
        assert!(!outcome.is_partial());
    }

    #[test]
    fn test_partial_outcome() {
        let mut outcome = FetchOutcome::default();
        assert!(outcome.is_empty());
        outcome.failed_pages.push(2);
        assert!(!outcome.is_partial());

        outcome.entries.push(RemoteEntry::from_json(&json!({})));
        assert!(outcome.is_partial());
    }
}
