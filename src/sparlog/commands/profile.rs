use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{StorageMode, DEFAULT_PROFILE_NAME};
use crate::store::Storage;

#[derive(Debug, Clone)]
pub enum ProfileAction {
    Show,
    Update {
        name: Option<String>,
        mode: Option<StorageMode>,
    },
}

pub fn run(storage: &Storage, action: ProfileAction) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match action {
        ProfileAction::Show => {
            result.profile = Some(storage.profile());
        }
        ProfileAction::Update { name, mode } => {
            let mut profile = storage.profile();
            if let Some(name) = name {
                let trimmed = name.trim();
                profile.name = if trimmed.is_empty() {
                    DEFAULT_PROFILE_NAME.to_string()
                } else {
                    trimmed.to_string()
                };
            }
            if let Some(mode) = mode {
                profile.mode = mode;
            }
            storage.save_profile(&profile)?;
            result.add_message(CmdMessage::success("Profile saved."));
            result.profile = Some(profile);
        }
    }
    Ok(result)
}
