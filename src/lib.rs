// src/lib.rs

//! Kenmei chapter notifier library.
//!
//! Logs in to the Kenmei reading-list API, finds unread titles whose latest
//! chapter changed since the last run, pushes one Pushover message per
//! title and saves the new state.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
