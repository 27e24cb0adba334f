//! Query service orchestration
//!
//! Composes the normalizer, record store, and event log behind one facade.
//! This is the only layer the HTTP handlers call into, so the lookup and
//! admin semantics stay testable without a transport.

use crate::events::EventLog;
use crate::store::RecordStore;
use binvault_common::{normalize, Error, Result};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

/// Outcome of a lookup request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found { site: String, bins: Vec<String> },
    NotFound,
    EmptyQuery,
}

/// Statistics reported by the admin stats endpoint
#[derive(Debug, Clone, Copy)]
pub struct ServiceStats {
    /// Number of stored records
    pub count: usize,
    /// Lookup events recorded today
    pub reqs: usize,
    /// Record store file size in bytes
    pub db_size: u64,
}

/// Facade over the record store and event log
pub struct QueryService {
    store: Arc<RecordStore>,
    events: Arc<EventLog>,
}

impl QueryService {
    pub fn new(store: Arc<RecordStore>, events: Arc<EventLog>) -> Self {
        Self { store, events }
    }

    /// Answer a lookup query.
    ///
    /// Empty or whitespace-only queries are rejected before touching the
    /// event log or the store. Anything else counts as a lookup event, even
    /// when the normalized key has no record.
    pub async fn public_lookup(&self, raw: &str, now: DateTime<Utc>) -> Result<LookupOutcome> {
        if raw.trim().is_empty() {
            return Ok(LookupOutcome::EmptyQuery);
        }

        self.events.record_event(now).await?;

        let key = normalize(raw);
        match self.store.lookup(&key).await? {
            Some(bins) => Ok(LookupOutcome::Found { site: key, bins }),
            None => Ok(LookupOutcome::NotFound),
        }
    }

    /// Normalize a site and add a bin to its record.
    pub async fn add_record(&self, raw_site: &str, bin: &str) -> Result<()> {
        let key = self.canonical_key(raw_site)?;
        self.store.upsert(&key, bin).await?;
        info!("Added bin {} for site {}", bin, key);
        Ok(())
    }

    /// Normalize a site and remove its entire record.
    ///
    /// Returns whether a record existed.
    pub async fn remove_record(&self, raw_site: &str) -> Result<bool> {
        let key = self.canonical_key(raw_site)?;
        let existed = self.store.delete(&key).await?;
        if existed {
            info!("Removed record for site {}", key);
        }
        Ok(existed)
    }

    /// Record count, today's request count, and store file size.
    pub async fn stats(&self, now: DateTime<Utc>) -> Result<ServiceStats> {
        let store_stats = self.store.stats().await?;
        let reqs = self.events.count_for(now.date_naive()).await?;
        Ok(ServiceStats {
            count: store_stats.record_count,
            reqs,
            db_size: store_stats.storage_size_bytes,
        })
    }

    /// Normalize a raw site argument, rejecting inputs with no resolvable
    /// host rather than permitting a degenerate shared record.
    fn canonical_key(&self, raw_site: &str) -> Result<String> {
        let key = normalize(raw_site);
        if key.is_empty() {
            return Err(Error::Validation(format!(
                "site {:?} does not contain a resolvable host",
                raw_site
            )));
        }
        Ok(key)
    }
}
