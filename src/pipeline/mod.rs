//! Pipeline entry points.
//!
//! - `reconcile`: Diff fetched entries against saved state
//! - `run_pipeline`: Login, fetch, reconcile, notify and save in one run

pub mod reconcile;
pub mod run;

pub use reconcile::{Reconciler, Reconciliation, reconcile};
pub use run::{Pipeline, RunOptions, RunReport, RunStatus, run_pipeline};
