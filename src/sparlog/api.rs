//! # API Facade
//!
//! Thin entry point over the command layer: one method per user-visible
//! operation, each returning a structured [`CmdResult`]. No business logic
//! lives here and nothing here touches stdout or stderr; any client (the
//! bundled CLI, or something else entirely) renders the results itself.

use chrono::NaiveDate;

use crate::commands::{self, CmdResult};
use crate::error::Result;
use crate::model::StorageMode;
use crate::store::Storage;

pub struct SparlogApi {
    storage: Storage,
}

impl SparlogApi {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// First-run demo seeding; a no-op once the onboarding flag is set.
    pub fn seed_demo(&self) -> Result<()> {
        self.storage.seed_demo()
    }

    pub fn current_mode(&self) -> StorageMode {
        self.storage.current_mode()
    }

    pub fn remote_available(&self) -> bool {
        self.storage.remote_available()
    }

    pub fn add_purchase(&self, input: commands::add::NewEntry) -> Result<CmdResult> {
        commands::add::run(&self.storage, input)
    }

    pub fn list_purchases(&self, limit: Option<usize>) -> Result<CmdResult> {
        commands::list::run(&self.storage, limit)
    }

    pub fn stats(&self) -> Result<CmdResult> {
        commands::stats::run(&self.storage)
    }

    pub fn leaderboard(&self, date: NaiveDate) -> Result<CmdResult> {
        commands::leaderboard::run(&self.storage, date)
    }

    pub fn export_csv(&self) -> Result<CmdResult> {
        commands::export::run(&self.storage)
    }

    pub fn profile(&self, action: commands::profile::ProfileAction) -> Result<CmdResult> {
        commands::profile::run(&self.storage, action)
    }

    pub fn reset(&self) -> Result<CmdResult> {
        commands::reset::run(&self.storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add::NewEntry;
    use crate::store::LocalStore;

    fn test_api() -> (tempfile::TempDir, SparlogApi) {
        let dir = tempfile::tempdir().unwrap();
        let api = SparlogApi::new(Storage::new(
            LocalStore::new(dir.path().to_path_buf()),
            None,
        ));
        (dir, api)
    }

    #[test]
    fn add_then_list_roundtrip() {
        let (_dir, api) = test_api();
        api.add_purchase(NewEntry {
            merchant: "Kiwi".into(),
            item: "Melk".into(),
            amount: "100".into(),
            discount_percent: "10".into(),
            ..Default::default()
        })
        .unwrap();

        let listed = api.list_purchases(None).unwrap();
        assert_eq!(listed.entries.len(), 1);
        assert_eq!(listed.entries[0].merchant, "Kiwi");
    }

    #[test]
    fn stats_dispatches_over_full_log() {
        let (_dir, api) = test_api();
        let result = api.stats().unwrap();
        assert_eq!(result.stats.unwrap().count, 0);
    }
}
