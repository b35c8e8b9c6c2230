// src/models/mod.rs

//! Domain models for the notifier.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod chapter;
mod config;
mod credentials;
mod entry;
mod state;

// Re-export all public types
pub use chapter::{Chapter, ChapterSkip, RawChapter};
pub use config::{ApiConfig, Config, HttpConfig, StorageConfig};
pub use credentials::{Credentials, REQUIRED_VARS};
pub use entry::{EntriesPage, Pagination, RemoteEntry};
pub use state::UnreadState;

/// A `(title, chapter)` pair that should be pushed to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub chapter: Chapter,
}

impl Notification {
    pub fn new(title: impl Into<String>, chapter: Chapter) -> Self {
        Self {
            title: title.into(),
            chapter,
        }
    }

    /// Push message body.
    pub fn message(&self) -> String {
        format!("{} | Ch. {} released!", self.title, self.chapter)
    }
}
