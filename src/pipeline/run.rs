// src/pipeline/run.rs

//! One full run: authenticate, fetch, reconcile, notify, save.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{Config, Credentials};
use crate::pipeline::reconcile::Reconciler;
use crate::services::{EntryFetcher, Notifier, PushoverNotifier, SessionGateway};
use crate::storage::StateStore;
use crate::utils::http::HttpClient;

const TOTAL_STEPS: usize = 4;

/// Per-run switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Reconcile and report, but send nothing and leave state untouched
    pub dry_run: bool,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// State was reconciled (and saved unless dry-run)
    Completed,
    /// Nothing usable came back from the reading list; state untouched
    NothingFetched,
}

/// Summary of a run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub status: RunStatus,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub entries_fetched: usize,
    pub failed_pages: Vec<u32>,
    pub tracked: usize,
    pub notified: usize,
    pub notify_failures: usize,
    pub removed: usize,
    pub skipped: usize,
    pub dry_run: bool,
}

impl RunReport {
    fn new(options: RunOptions) -> Self {
        let now = Utc::now();
        Self {
            status: RunStatus::NothingFetched,
            started_at: now,
            finished_at: now,
            entries_fetched: 0,
            failed_pages: Vec::new(),
            tracked: 0,
            notified: 0,
            notify_failures: 0,
            removed: 0,
            skipped: 0,
            dry_run: options.dry_run,
        }
    }

    fn finish(mut self, status: RunStatus) -> Self {
        self.status = status;
        self.finished_at = Utc::now();
        self
    }

    /// Log the run summary.
    pub fn log_summary(&self) {
        let elapsed = self.finished_at - self.started_at;
        log::info!(
            "Run summary ({:?}{}): {} entries fetched, {} titles tracked, {} notified, {} notification failures, {} removed, {} skipped in {}ms",
            self.status,
            if self.dry_run { ", dry run" } else { "" },
            self.entries_fetched,
            self.tracked,
            self.notified,
            self.notify_failures,
            self.removed,
            self.skipped,
            elapsed.num_milliseconds()
        );
        if !self.failed_pages.is_empty() {
            log::warn!("Pages not fetched this run: {:?}", self.failed_pages);
        }
    }
}

/// The wired-up pipeline.
pub struct Pipeline<'a> {
    gateway: SessionGateway,
    fetcher: EntryFetcher,
    notifier: &'a dyn Notifier,
    store: &'a dyn StateStore,
    options: RunOptions,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        gateway: SessionGateway,
        fetcher: EntryFetcher,
        notifier: &'a dyn Notifier,
        store: &'a dyn StateStore,
    ) -> Self {
        Self {
            gateway,
            fetcher,
            notifier,
            store,
            options: RunOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    /// Execute one run.
    ///
    /// Errors are the fatal cases: login failure, an unreadable state file,
    /// or a failed save. Fetch gaps and notification failures are logged and
    /// reported, not returned.
    pub async fn run(&self, credentials: &Credentials) -> Result<RunReport> {
        let mut report = RunReport::new(self.options);

        log::info!("[STEP 1/{}] Logging in", TOTAL_STEPS);
        let token = self.gateway.authenticate(credentials).await.map_err(|e| {
            log::error!("Login failed: {}", e);
            e
        })?;

        log::info!("[STEP 2/{}] Fetching reading list", TOTAL_STEPS);
        let fetched = self.fetcher.fetch_all(&token).await;
        report.entries_fetched = fetched.entries.len();
        report.failed_pages = fetched.failed_pages.clone();

        if fetched.is_empty() {
            log::warn!(
                "No reading list entries fetched; leaving {} untouched",
                self.store.location()
            );
            return Ok(report.finish(RunStatus::NothingFetched));
        }
        if fetched.is_partial() {
            log::warn!(
                "Pages {:?} of {} failed; unread titles on them will be dropped from state this run",
                fetched.failed_pages,
                fetched.total_pages
            );
        }

        log::info!("[STEP 3/{}] Reconciling with saved state", TOTAL_STEPS);
        let prior = self.store.load().await.map_err(|e| {
            log::error!("Failed to load state: {}", e);
            e
        })?;
        let reconciliation = Reconciler::new().reconcile(&fetched.entries, &prior);
        report.tracked = reconciliation.state.len();
        report.removed = reconciliation.removed.len();
        report.skipped = reconciliation.skipped;

        log::info!(
            "[STEP 4/{}] Sending {} notification(s)",
            TOTAL_STEPS,
            reconciliation.notifications.len()
        );
        for notification in &reconciliation.notifications {
            if self.options.dry_run {
                log::info!("Would notify: {}", notification.message());
                continue;
            }
            match self
                .notifier
                .notify(&notification.title, &notification.chapter)
                .await
            {
                Ok(()) => {
                    report.notified += 1;
                    log::info!("Notified: {}", notification.message());
                }
                Err(e) => {
                    report.notify_failures += 1;
                    log::error!("Failed to send notification for {}: {}", notification.title, e);
                }
            }
        }

        if self.options.dry_run {
            log::info!("Dry run: not writing {}", self.store.location());
        } else {
            self.store.save(&reconciliation.state).await.map_err(|e| {
                log::error!("Failed to save state: {}", e);
                e
            })?;
            log::info!(
                "Saved {} tracked titles to {}",
                reconciliation.state.len(),
                self.store.location()
            );
        }

        Ok(report.finish(RunStatus::Completed))
    }
}

/// Build the transport and services from config and run once with Pushover
/// notifications.
pub async fn run_pipeline(
    config: &Config,
    credentials: &Credentials,
    store: &dyn StateStore,
    options: RunOptions,
) -> Result<RunReport> {
    let http = HttpClient::new(&config.http)?;
    let notifier = PushoverNotifier::new(http.clone(), &config.api, credentials);

    Pipeline::new(
        SessionGateway::new(http.clone(), &config.api),
        EntryFetcher::new(http, &config.api),
        &notifier,
        store,
    )
    .with_options(options)
    .run(credentials)
    .await
}
