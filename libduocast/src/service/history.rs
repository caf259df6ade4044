//! Session upload history
//!
//! The ledger keeps successful uploads newest-first for as long as the
//! process lives. Nothing is persisted and nothing is evicted.

use std::sync::{Arc, PoisonError, RwLock};

use crate::types::{Platform, UploadRecord};

/// Newest-first list of completed uploads
///
/// Cloning shares the same underlying list.
#[derive(Clone, Default)]
pub struct HistoryLedger {
    records: Arc<RwLock<Vec<UploadRecord>>>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record in front of every existing one
    pub fn prepend(&self, record: UploadRecord) {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        records.insert(0, record);
    }

    /// Snapshot of all records, newest first
    pub fn list(&self) -> Vec<UploadRecord> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Snapshot of one platform's records, newest first
    pub fn by_platform(&self, platform: Platform) -> Vec<UploadRecord> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|r| r.platform == platform)
            .cloned()
            .collect()
    }

    pub fn latest(&self) -> Option<UploadRecord> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .first()
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.records.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
