//! Service layer for the notifier.
//!
//! This module contains the remote-facing logic for:
//! - Logging in (`SessionGateway`)
//! - Fetching the reading list (`EntryFetcher`)
//! - Sending push notifications (`Notifier`, `PushoverNotifier`)

mod auth;
mod entries;
mod notifier;

pub use auth::{AccessToken, SessionGateway};
pub use entries::{EntryFetcher, FetchOutcome};
pub use notifier::{Notifier, PushoverNotifier};
