use chrono::NaiveDate;

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::Storage;

pub fn run(storage: &Storage, date: NaiveDate) -> Result<CmdResult> {
    let rows = storage.list_month(date)?;

    let mut result = CmdResult::default();
    if rows.iter().all(|r| r.purchase_count == 0) {
        result.add_message(CmdMessage::info(format!(
            "No purchases recorded for {}.",
            date.format("%Y-%m")
        )));
    }
    result.leaderboard = rows;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Profile, PurchaseEntry, StorageMode};
    use crate::store::{LocalStore, MemoryStore, Storage};

    fn entry(user: &str, amount: f64, discount: f64, date: &str) -> PurchaseEntry {
        PurchaseEntry {
            merchant: "Butikk".into(),
            item: "Vare".into(),
            category: String::new(),
            amount,
            discount_percent: discount,
            note: String::new(),
            receipt_image: None,
            date: date.into(),
            user: user.into(),
        }
    }

    #[test]
    fn remote_mode_ranks_users_descending() {
        let dir = tempfile::tempdir().unwrap();
        let local = LocalStore::new(dir.path().to_path_buf());
        local
            .save_profile(&Profile {
                name: "Alice".into(),
                mode: StorageMode::Remote,
            })
            .unwrap();
        let remote = MemoryStore::with_entries(vec![
            entry("A", 500.0, 10.0, "2024-03-05"), // saved 50
            entry("B", 160.0, 50.0, "2024-03-20"), // saved 80
        ]);
        let storage = Storage::new(local, Some(Box::new(remote)));

        let result = run(&storage, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()).unwrap();
        let rows = result.leaderboard;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].display_name, "B");
        assert_eq!(rows[1].display_name, "A");
    }

    #[test]
    fn empty_month_gets_a_message() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(LocalStore::new(dir.path().to_path_buf()), None);
        let result = run(&storage, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()).unwrap();
        assert_eq!(result.messages.len(), 1);
    }
}
