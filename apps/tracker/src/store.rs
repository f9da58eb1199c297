//! The application record store: an ordered collection persisted write-through
//! to a `Storage` adapter.

use std::collections::HashSet;

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{ApplicationRecord, NewApplication, Status};
use crate::storage::Storage;

/// Key holding the JSON array of records.
pub const STORAGE_KEY: &str = "jobApplications";
/// Key receiving an unreadable collection before it can be overwritten.
pub const CORRUPT_BACKUP_KEY: &str = "jobApplications.corrupt";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid application: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("No unused application id left")]
    IdsExhausted,
}

pub struct ApplicationStore<S> {
    storage: S,
    records: Vec<ApplicationRecord>,
}

impl<S: Storage> ApplicationStore<S> {
    /// Reads the persisted collection.
    ///
    /// Absent data yields an empty store. Data that does not parse as a list of
    /// records (including bytes that are not UTF-8) also yields an empty store;
    /// the raw bytes are copied to `CORRUPT_BACKUP_KEY` first so the next write
    /// cannot destroy them.
    pub fn load(mut storage: S) -> Result<Self, StoreError> {
        let records = match storage.get(STORAGE_KEY)? {
            None => Vec::new(),
            Some(raw) => match serde_json::from_slice::<Vec<ApplicationRecord>>(&raw) {
                Ok(records) => records,
                Err(e) => {
                    warn!("Stored applications are unreadable, starting empty: {e}");
                    storage.set(CORRUPT_BACKUP_KEY, &raw)?;
                    warn!("Previous contents preserved under '{CORRUPT_BACKUP_KEY}'");
                    Vec::new()
                }
            },
        };

        debug!("Loaded {} applications", records.len());
        Ok(Self { storage, records })
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[ApplicationRecord] {
        &self.records
    }

    pub fn get(&self, id: i64) -> Option<&ApplicationRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Validates, assigns a fresh id, appends and persists.
    pub fn add(&mut self, application: NewApplication) -> Result<ApplicationRecord, StoreError> {
        application.validate().map_err(StoreError::Validation)?;

        let now = Utc::now();
        let id = self.next_id(now.timestamp_millis())?;
        let record = application.into_record(id, now.date_naive());

        self.records.push(record.clone());
        self.persist()?;

        debug!(id, company = %record.company, "Added application");
        Ok(record)
    }

    /// Sets the status of the record with `id`. Returns `false` if there is none;
    /// the collection is persisted either way.
    pub fn update_status(&mut self, id: i64, status: Status) -> Result<bool, StoreError> {
        let mut found = false;
        for record in self.records.iter_mut().filter(|r| r.id == id) {
            record.status = status;
            found = true;
        }
        self.persist()?;
        Ok(found)
    }

    /// Deletes the record with `id`. Returns `false` if there is none.
    pub fn remove(&mut self, id: i64) -> Result<bool, StoreError> {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        self.persist()?;
        Ok(self.records.len() != before)
    }

    /// The creation timestamp, bumped past the current maximum id if needed.
    /// When the maximum is `i64::MAX`, the first unused id from `now_millis` up.
    fn next_id(&self, now_millis: i64) -> Result<i64, StoreError> {
        let max = match self.records.iter().map(|r| r.id).max() {
            Some(max) if max >= now_millis => max,
            _ => return Ok(now_millis),
        };
        if let Some(next) = max.checked_add(1) {
            return Ok(next);
        }

        let taken: HashSet<i64> = self.records.iter().map(|r| r.id).collect();
        (now_millis..=i64::MAX)
            .find(|id| !taken.contains(id))
            .ok_or(StoreError::IdsExhausted)
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let json = serde_json::to_vec(&self.records)?;
        self.storage.set(STORAGE_KEY, &json)?;
        Ok(())
    }
}
