//! # Storage Layer
//!
//! One purchase log, two backends:
//!
//! - [`local::LocalStore`]: namespaced JSON files in the device's data
//!   directory. Also the sole owner of the profile and the onboarding flag.
//! - [`remote::RemoteStore`]: a shared multi-user document store over HTTP,
//!   present only when valid connection config existed at bootstrap.
//!
//! [`Storage`] sits in front of both and re-resolves the active backend on
//! every call from the persisted mode preference plus adapter availability.
//! A user can flip modes at any time without restart; a remote adapter that
//! never initialized silently keeps everything on the local backend.
//!
//! [`memory::MemoryStore`] exercises dispatch and aggregation in tests
//! without touching the filesystem or the network.

use chrono::{Datelike, NaiveDate};

use crate::error::Result;
use crate::model::{LeaderboardRow, Profile, PurchaseEntry, StorageMode, UNKNOWN_USER};

pub mod local;
pub mod memory;
pub mod remote;

pub use local::LocalStore;
pub use memory::MemoryStore;
pub use remote::RemoteStore;

const DEMO_DATA: &str = include_str!("../../../demos/demo-data.json");

/// Capability interface shared by the backends.
///
/// `display_name` is the caller's current profile name: the remote backend
/// stamps it onto stored entries, the local backend labels its single
/// leaderboard row with it.
pub trait EntryStore {
    /// Append one entry. Contents are taken as-is; coercion happened upstream.
    fn add(&self, entry: PurchaseEntry, display_name: &str) -> Result<()>;

    /// Every entry the backend can see. In local mode that is the device's
    /// own log; in remote mode it is the whole shared collection, with no
    /// per-user filtering.
    fn list_all(&self) -> Result<Vec<PurchaseEntry>>;

    /// Per-user savings rows for the calendar month containing `date`.
    fn list_month(&self, date: NaiveDate, display_name: &str) -> Result<Vec<LeaderboardRow>>;
}

/// Calendar month membership on the entry's recorded (wall clock) date.
pub fn entry_in_month(entry: &PurchaseEntry, year: i32, month: u32) -> bool {
    entry
        .local_date()
        .is_some_and(|d| d.year() == year && d.month() == month)
}

/// Month-filter, group by `user`, sum savings and counts, then stable-sort
/// by total savings descending. Ties keep grouping-insertion order.
pub fn group_month_rows(entries: &[PurchaseEntry], year: i32, month: u32) -> Vec<LeaderboardRow> {
    let mut rows: Vec<LeaderboardRow> = Vec::new();
    for entry in entries.iter().filter(|e| entry_in_month(e, year, month)) {
        let key = if entry.user.trim().is_empty() {
            UNKNOWN_USER
        } else {
            entry.user.as_str()
        };
        match rows.iter_mut().find(|r| r.user_key == key) {
            Some(row) => {
                row.total_saved += entry.savings();
                row.purchase_count += 1;
            }
            None => rows.push(LeaderboardRow {
                user_key: key.to_string(),
                display_name: key.to_string(),
                total_saved: entry.savings(),
                purchase_count: 1,
            }),
        }
    }
    rows.sort_by(|a, b| {
        b.total_saved
            .partial_cmp(&a.total_saved)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    rows
}

/// The storage abstraction the rest of the crate talks to.
pub struct Storage {
    local: LocalStore,
    remote: Option<Box<dyn EntryStore>>,
}

impl Storage {
    /// `remote` is the outcome of bootstrap-time adapter initialization.
    /// `None` pins every call to the local backend no matter what the
    /// persisted preference says.
    pub fn new(local: LocalStore, remote: Option<Box<dyn EntryStore>>) -> Self {
        Self { local, remote }
    }

    /// The persisted mode preference; `Local` when unset or malformed.
    pub fn current_mode(&self) -> StorageMode {
        self.local.load_profile().mode
    }

    pub fn remote_available(&self) -> bool {
        self.remote.is_some()
    }

    pub fn profile(&self) -> Profile {
        self.local.load_profile()
    }

    /// Saving the profile also marks onboarding done, matching the original
    /// first-run flow.
    pub fn save_profile(&self, profile: &Profile) -> Result<()> {
        self.local.save_profile(profile)?;
        self.local.set_onboarded()
    }

    /// Erases the local log, profile, and onboarding flag. Remote data is
    /// never touched.
    pub fn reset(&self) -> Result<()> {
        self.local.reset()
    }

    // Re-resolved per call so a mode switch takes effect immediately and an
    // uninitialized remote falls back without surfacing anything.
    fn active(&self) -> &dyn EntryStore {
        match (&self.remote, self.current_mode()) {
            (Some(remote), StorageMode::Remote) => remote.as_ref(),
            _ => &self.local,
        }
    }

    /// Remote write failures propagate to the caller; there is no retry.
    pub fn add(&self, entry: PurchaseEntry) -> Result<()> {
        let name = self.profile().name;
        self.active().add(entry, &name)
    }

    pub fn list_all(&self) -> Result<Vec<PurchaseEntry>> {
        self.active().list_all()
    }

    pub fn list_month(&self, date: NaiveDate) -> Result<Vec<LeaderboardRow>> {
        let name = self.profile().name;
        self.active().list_month(date, &name)
    }

    /// First-run seeding: installs the bundled demo dataset into the local
    /// log, then sets the onboarding flag whether or not the install worked.
    /// Must never block first use.
    pub fn seed_demo(&self) -> Result<()> {
        if self.local.onboarded() {
            return Ok(());
        }
        if let Ok(items) = serde_json::from_str::<Vec<PurchaseEntry>>(DEMO_DATA) {
            let _ = self.local.replace_entries(&items);
        }
        self.local.set_onboarded()
    }
}
