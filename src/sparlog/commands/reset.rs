use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::Storage;

/// Erases the local log, profile, and onboarding flag. Remote data stays.
pub fn run(storage: &Storage) -> Result<CmdResult> {
    storage.reset()?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(
        "Local data erased. Remote data, if any, was kept.",
    ));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add::{self, NewEntry};
    use crate::store::LocalStore;

    #[test]
    fn reset_empties_the_local_log() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(LocalStore::new(dir.path().to_path_buf()), None);
        add::run(
            &storage,
            NewEntry {
                merchant: "Kiwi".into(),
                amount: "10".into(),
                ..Default::default()
            },
        )
        .unwrap();

        run(&storage).unwrap();
        assert!(storage.list_all().unwrap().is_empty());
    }
}
