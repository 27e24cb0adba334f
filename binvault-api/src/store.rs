//! Persistent record store
//!
//! Owns the mapping from canonical site key to its list of bin codes. The
//! sole durable copy lives in a single JSON file this component exclusively
//! manages. Every mutation runs the full read → mutate → persist cycle under
//! one async mutex, and persisting replaces the file whole via a temp-file
//! rename, so external state is always either the pre- or post-mutation
//! snapshot.

use binvault_common::{Error, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Full store contents: canonical key → bins in insertion order
type RecordMap = BTreeMap<String, Vec<String>>;

/// Counters reported by the stats endpoint
#[derive(Debug, Clone, Copy)]
pub struct StoreStats {
    pub record_count: usize,
    pub storage_size_bytes: u64,
}

/// Whole-file key-value record store
pub struct RecordStore {
    path: PathBuf,
    /// Serializes the read→mutate→persist cycle so concurrent mutations
    /// cannot lose updates
    write_lock: Mutex<()>,
}

impl RecordStore {
    /// Open the store, creating an empty file if none exists.
    ///
    /// An existing file that cannot be read or parsed is fatal
    /// (`StorageCorruption`); there is no inline recovery.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        };

        if tokio::fs::try_exists(&store.path).await? {
            let records = store.load().await?;
            info!(
                "Opened record store at {} ({} records)",
                store.path.display(),
                records.len()
            );
        } else {
            store.persist(&RecordMap::new()).await?;
            info!("Created empty record store at {}", store.path.display());
        }

        Ok(store)
    }

    /// Look up the bins recorded for a canonical key.
    ///
    /// Read-only; no write lock needed because the persisted file is only
    /// ever replaced atomically as a whole.
    pub async fn lookup(&self, key: &str) -> Result<Option<Vec<String>>> {
        let records = self.load().await?;
        Ok(records.get(key).cloned())
    }

    /// Add a bin to a key's record, creating the record on first insertion.
    ///
    /// Idempotent: inserting a bin that is already a member is a no-op on
    /// the record contents. Insertion order of distinct bins is preserved.
    pub async fn upsert(&self, key: &str, bin: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.load().await?;
        let bins = records.entry(key.to_string()).or_default();
        if !bins.iter().any(|b| b == bin) {
            bins.push(bin.to_string());
        }
        self.persist(&records).await?;

        debug!("Upserted bin {} for key {}", bin, key);
        Ok(())
    }

    /// Remove a key's entire record. Returns whether a record existed.
    pub async fn delete(&self, key: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.load().await?;
        let existed = records.remove(key).is_some();
        if existed {
            self.persist(&records).await?;
            debug!("Deleted record for key {}", key);
        }
        Ok(existed)
    }

    /// Record count and on-disk size of the store.
    pub async fn stats(&self) -> Result<StoreStats> {
        let records = self.load().await?;
        let metadata = tokio::fs::metadata(&self.path).await?;
        Ok(StoreStats {
            record_count: records.len(),
            storage_size_bytes: metadata.len(),
        })
    }

    /// Read and parse the current persisted snapshot.
    async fn load(&self) -> Result<RecordMap> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            Error::StorageCorruption(format!("{}: {}", self.path.display(), e))
        })?;
        serde_json::from_slice(&bytes).map_err(|e| {
            Error::StorageCorruption(format!("{}: {}", self.path.display(), e))
        })
    }

    /// Replace the persisted snapshot whole (temp file + rename).
    ///
    /// A failure here leaves the previous snapshot in place; the caller must
    /// report the mutation as not committed.
    async fn persist(&self, records: &RecordMap) -> Result<()> {
        let json = serde_json::to_vec_pretty(records)
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
