use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::Storage;

/// How many entries the default "recent" view shows.
pub const RECENT_WINDOW: usize = 8;

/// Lists the visible log, newest first, optionally truncated.
pub fn run(storage: &Storage, limit: Option<usize>) -> Result<CmdResult> {
    let mut entries = storage.list_all()?;
    entries.reverse();
    if let Some(limit) = limit {
        entries.truncate(limit);
    }

    let mut result = CmdResult::default();
    if entries.is_empty() {
        result.add_message(CmdMessage::info("No purchases recorded yet."));
    }
    result.entries = entries;
    Ok(result)
}
