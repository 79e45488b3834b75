//! JSON file implementation of the `HistoryStore` port.
//!
//! The whole ledger lives in one file as a single JSON array. A save
//! writes to a sibling temp file, syncs it, and renames it over the
//! final path, so the ledger on disk is always either the old or the
//! new version, never a torn write.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use cellier_core::error::DomainError;
use cellier_history::domain::events::HistoryEvent;
use cellier_history::store::HistoryStore;
use tokio::io::AsyncWriteExt;

/// Default ledger file name, carried over from the original local
/// store key.
pub const DEFAULT_LEDGER_FILE: &str = "cave_history.json";

/// History store persisting the ledger as one JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileHistoryStore {
    path: PathBuf,
}

impl JsonFileHistoryStore {
    /// Creates a store backed by the given file path. The file is
    /// created on first save; a missing file reads as an empty ledger.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The ledger file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl HistoryStore for JsonFileHistoryStore {
    async fn load(&self) -> Result<Vec<HistoryEvent>, DomainError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(DomainError::Storage(format!(
                    "reading {}: {err}",
                    self.path.display()
                )));
            }
        };

        // A corrupted ledger degrades to "no history" rather than
        // blocking the application.
        match serde_json::from_str(&contents) {
            Ok(events) => Ok(events),
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "history ledger is unparseable, treating as empty"
                );
                Ok(Vec::new())
            }
        }
    }

    async fn save(&self, events: &[HistoryEvent]) -> Result<(), DomainError> {
        let contents = serde_json::to_string(events)
            .map_err(|err| DomainError::Storage(format!("serializing ledger: {err}")))?;

        let temp_path = self.path.with_extension("tmp");
        let write_err =
            |err: std::io::Error| DomainError::Storage(format!("writing {}: {err}", self.path.display()));

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
        }

        let mut file = tokio::fs::File::create(&temp_path)
            .await
            .map_err(write_err)?;
        file.write_all(contents.as_bytes())
            .await
            .map_err(write_err)?;
        file.sync_all().await.map_err(write_err)?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(write_err)?;
        Ok(())
    }
}
