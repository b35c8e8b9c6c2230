//! Local filesystem state store.
//!
//! Writes go to a sibling file named after the target plus `.tmp`, which is
//! then renamed over the target, so a crash mid-write never truncates the previous state.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::UnreadState;
use crate::storage::StateStore;

/// JSON file backed state store.
#[derive(Debug, Clone)]
pub struct LocalStateStore {
    path: PathBuf,
}

impl LocalStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `unread.json` -> `unread.json.tmp`, never the target itself.
    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("state"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp = self.tmp_path();
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        file.sync_all().await?;
        drop(file);

        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::storage(&self.path, e)),
        }
    }
}

#[async_trait]
impl StateStore for LocalStateStore {
    async fn load(&self) -> Result<UnreadState> {
        let Some(bytes) = self.read_bytes().await? else {
            log::info!("No state file at {}, starting fresh", self.path.display());
            return Ok(UnreadState::new());
        };

        match serde_json::from_slice::<UnreadState>(&bytes) {
            Ok(state) => {
                log::debug!(
                    "Loaded {} tracked titles from {}",
                    state.len(),
                    self.path.display()
                );
                Ok(state)
            }
            Err(e) => {
                log::error!(
                    "Failed to parse {}: {}. Treating state as empty.",
                    self.path.display(),
                    e
                );
                Ok(UnreadState::new())
            }
        }
    }

    async fn save(&self, state: &UnreadState) -> Result<()> {
        let mut bytes = serde_json::to_vec_pretty(state)?;
        bytes.push(b'\n');
        self.write_bytes(&bytes)
            .await
            .map_err(|e| AppError::storage(&self.path, e))?;
        log::debug!(
            "Saved {} tracked titles to {}",
            state.len(),
            self.path.display()
        );
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
