//! Reconciliation of fetched entries against persisted state.
//!
//! Every run rebuilds the state from scratch: a title survives only if it
//! is currently unread with a usable chapter. Titles whose chapter differs
//! from what was last notified produce a notification.

use std::collections::HashSet;

use crate::models::{Chapter, Notification, RemoteEntry, UnreadState};

/// Result of one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciliation {
    /// Complete replacement for the prior state
    pub state: UnreadState,
    /// One entry per title with a new chapter, in fetch order
    pub notifications: Vec<Notification>,
    /// Titles that were tracked before but are not any more
    pub removed: Vec<String>,
    /// Entries ignored for a missing title or unusable chapter
    pub skipped: usize,
}

impl Reconciliation {
    /// Whether anything needs to be sent.
    pub fn has_notifications(&self) -> bool {
        !self.notifications.is_empty()
    }
}

/// Walks entries against prior state.
#[derive(Debug, Clone, Default)]
pub struct Reconciler;

impl Reconciler {
    pub fn new() -> Self {
        Self
    }

    /// Compute the new state and the notifications to send.
    pub fn reconcile(&self, entries: &[RemoteEntry], prior: &UnreadState) -> Reconciliation {
        let mut state = UnreadState::new();
        let mut order: Vec<&str> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        let mut skipped = 0;

        for entry in entries {
            let Some(title) = entry.title.as_deref() else {
                log::warn!("Skipping entry with missing title: {}", entry.label());
                skipped += 1;
                continue;
            };

            let chapter = match Chapter::normalize(entry.latest_chapter.as_ref()) {
                Ok(chapter) => chapter,
                Err(reason) => {
                    log::warn!("Skipping entry with {}: {}", reason, title);
                    skipped += 1;
                    continue;
                }
            };

            if !entry.unread {
                continue;
            }

            state.insert(title, chapter);
            if seen.insert(title) {
                order.push(title);
            }
        }

        let notifications = order
            .into_iter()
            .filter_map(|title| {
                let chapter = state.get(title)?;
                (prior.get(title) != Some(chapter))
                    .then(|| Notification::new(title, chapter.clone()))
            })
            .collect();

        let removed: Vec<String> = prior
            .titles_missing_from(&state)
            .into_iter()
            .map(str::to_string)
            .collect();
        if !removed.is_empty() {
            log::debug!("Removed stale titles: {}", removed.join(", "));
        }

        Reconciliation {
            state,
            notifications,
            removed,
            skipped,
        }
    }
}

/// Convenience function to reconcile with the default reconciler.
pub fn reconcile(entries: &[RemoteEntry], prior: &UnreadState) -> Reconciliation {
    Reconciler::new().reconcile(entries, prior)
}
