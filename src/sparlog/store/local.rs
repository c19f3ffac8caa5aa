use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use super::{entry_in_month, EntryStore};
use crate::error::Result;
use crate::model::{LeaderboardRow, Profile, PurchaseEntry};

pub const ENTRIES_FILE: &str = "entries.json";
pub const PROFILE_FILE: &str = "profile.json";
pub const ONBOARDED_FILE: &str = "onboarded.json";

/// Durable per-device storage: three namespaced JSON files under one root.
/// Also the exclusive owner of the profile and the onboarding flag, which
/// are never synced remotely.
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Missing or malformed JSON reads as the default value, never an error.
    fn read_json<T: DeserializeOwned + Default>(&self, file: &str) -> T {
        match fs::read_to_string(self.root.join(file)) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => T::default(),
        }
    }

    // Atomic write: tmp file then rename.
    fn write_json<T: Serialize + ?Sized>(&self, file: &str, value: &T) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        let content = serde_json::to_string_pretty(value)?;
        let tmp = self.root.join(format!(".{}-{}.tmp", file, Uuid::new_v4()));
        fs::write(&tmp, content)?;
        fs::rename(&tmp, self.root.join(file))?;
        Ok(())
    }

    pub fn entries(&self) -> Vec<PurchaseEntry> {
        self.read_json(ENTRIES_FILE)
    }

    pub fn replace_entries(&self, entries: &[PurchaseEntry]) -> Result<()> {
        self.write_json(ENTRIES_FILE, entries)
    }

    pub fn load_profile(&self) -> Profile {
        self.read_json(PROFILE_FILE)
    }

    pub fn save_profile(&self, profile: &Profile) -> Result<()> {
        self.write_json(PROFILE_FILE, profile)
    }

    pub fn onboarded(&self) -> bool {
        self.read_json(ONBOARDED_FILE)
    }

    pub fn set_onboarded(&self) -> Result<()> {
        self.write_json(ONBOARDED_FILE, &true)
    }

    /// Erases all three namespaced files.
    pub fn reset(&self) -> Result<()> {
        for file in [ENTRIES_FILE, PROFILE_FILE, ONBOARDED_FILE] {
            let path = self.root.join(file);
            if path.exists() {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }
}

impl EntryStore for LocalStore {
    fn add(&self, entry: PurchaseEntry, _display_name: &str) -> Result<()> {
        let mut all = self.entries();
        all.push(entry);
        self.replace_entries(&all)
    }

    fn list_all(&self) -> Result<Vec<PurchaseEntry>> {
        Ok(self.entries())
    }

    /// Single-device data: the whole month collapses into one synthetic
    /// "me" row. A cross-user leaderboard is not possible here.
    fn list_month(&self, date: NaiveDate, display_name: &str) -> Result<Vec<LeaderboardRow>> {
        let mine: Vec<PurchaseEntry> = self
            .entries()
            .into_iter()
            .filter(|e| entry_in_month(e, date.year(), date.month()))
            .collect();
        Ok(vec![LeaderboardRow {
            user_key: "me".to_string(),
            display_name: display_name.to_string(),
            total_saved: mine.iter().map(|e| e.savings()).sum(),
            purchase_count: mine.len(),
        }])
    }
}
