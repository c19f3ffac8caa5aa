use std::sync::Mutex;

use chrono::{Datelike, NaiveDate};

use super::{group_month_rows, EntryStore};
use crate::error::{Result, SparlogError};
use crate::model::{LeaderboardRow, PurchaseEntry, ANONYMOUS_USER};

/// In-memory backend for exercising dispatch and aggregation without
/// filesystem or network I/O. Follows the remote adapter's contract
/// (user stamping, unscoped listing) so routing tests can observe it.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<Vec<PurchaseEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<PurchaseEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<PurchaseEntry>>> {
        self.entries
            .lock()
            .map_err(|_| SparlogError::Store("memory store lock poisoned".to_string()))
    }
}

impl EntryStore for MemoryStore {
    fn add(&self, mut entry: PurchaseEntry, display_name: &str) -> Result<()> {
        entry.user = if display_name.trim().is_empty() {
            ANONYMOUS_USER.to_string()
        } else {
            display_name.to_string()
        };
        self.lock()?.push(entry);
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<PurchaseEntry>> {
        Ok(self.lock()?.clone())
    }

    fn list_month(&self, date: NaiveDate, _display_name: &str) -> Result<Vec<LeaderboardRow>> {
        let all = self.list_all()?;
        Ok(group_month_rows(&all, date.year(), date.month()))
    }
}
