//! Bounded lookup event log
//!
//! Append-only sequence of lookup dates used for daily request statistics,
//! capped at the most recent [`EVENT_LOG_CAPACITY`] entries with FIFO
//! eviction. Persists to its own JSON file with the same whole-file
//! read→mutate→persist discipline as the record store, behind its own lock;
//! the two stores are independent resources and never share one.

use binvault_common::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::info;

/// Maximum retained event entries; oldest entries are evicted first
pub const EVENT_LOG_CAPACITY: usize = 5000;

/// Bounded rolling log of lookup event dates
pub struct EventLog {
    path: PathBuf,
    /// Serializes the read→mutate→persist cycle for appends
    write_lock: Mutex<()>,
}

impl EventLog {
    /// Open the log, creating an empty file if none exists.
    ///
    /// Unreadable or unparseable existing content is `StorageCorruption`,
    /// fatal at startup.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let log = Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        };

        if tokio::fs::try_exists(&log.path).await? {
            let entries = log.load().await?;
            info!(
                "Opened event log at {} ({} entries)",
                log.path.display(),
                entries.len()
            );
        } else {
            log.persist(&[]).await?;
            info!("Created empty event log at {}", log.path.display());
        }

        Ok(log)
    }

    /// Append an entry for the given instant's date, evicting from the front
    /// when the log exceeds capacity.
    pub async fn record_event(&self, now: DateTime<Utc>) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.load().await?;
        entries.push(now.date_naive());
        trim_to_capacity(&mut entries);
        self.persist(&entries).await
    }

    /// Number of entries recorded on the given date.
    pub async fn count_for(&self, date: NaiveDate) -> Result<usize> {
        let entries = self.load().await?;
        Ok(entries.iter().filter(|d| **d == date).count())
    }

    async fn load(&self) -> Result<Vec<NaiveDate>> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            Error::StorageCorruption(format!("{}: {}", self.path.display(), e))
        })?;
        serde_json::from_slice(&bytes).map_err(|e| {
            Error::StorageCorruption(format!("{}: {}", self.path.display(), e))
        })
    }

    async fn persist(&self, entries: &[NaiveDate]) -> Result<()> {
        let json = serde_json::to_vec(entries)
            .map_err(|e| Error::StorageWrite(e.to_string()))?;

        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, &json)
            .await
            .map_err(|e| Error::StorageWrite(format!("{}: {}", tmp.display(), e)))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| Error::StorageWrite(format!("{}: {}", self.path.display(), e)))?;

        Ok(())
    }
}

/// Evict from the front until the log holds at most `EVENT_LOG_CAPACITY`
/// entries.
fn trim_to_capacity(entries: &mut Vec<NaiveDate>) {
    if entries.len() > EVENT_LOG_CAPACITY {
        let excess = entries.len() - EVENT_LOG_CAPACITY;
        entries.drain(..excess);
    }
}
