use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine;
use chrono::Local;

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{coerce_amount, PurchaseEntry};
use crate::store::Storage;

/// Raw form-style input, before numeric coercion.
#[derive(Debug, Clone, Default)]
pub struct NewEntry {
    pub merchant: String,
    pub item: String,
    pub category: String,
    pub amount: String,
    pub discount_percent: String,
    pub note: String,
    pub receipt: Option<PathBuf>,
}

pub fn run(storage: &Storage, input: NewEntry) -> Result<CmdResult> {
    let receipt_image = match &input.receipt {
        Some(path) => Some(read_receipt(path)?),
        None => None,
    };

    let entry = PurchaseEntry {
        merchant: input.merchant.trim().to_string(),
        item: input.item.trim().to_string(),
        category: input.category.trim().to_string(),
        amount: coerce_amount(&input.amount),
        discount_percent: coerce_amount(&input.discount_percent),
        note: input.note.trim().to_string(),
        receipt_image,
        date: Local::now().to_rfc3339(),
        user: String::new(),
    };

    let saved = entry.savings();
    storage.add(entry)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Purchase recorded ({:.2} saved).",
        saved
    )));
    Ok(result)
}

/// Receipt files are stored inline as data URIs, so an export or a remote
/// document carries the image with it.
fn read_receipt(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    let mime = match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    };
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    Ok(format!("data:{};base64,{}", mime, encoded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::LocalStore;

    fn test_storage() -> (tempfile::TempDir, Storage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(LocalStore::new(dir.path().to_path_buf()), None);
        (dir, storage)
    }

    #[test]
    fn malformed_numbers_coerce_to_zero_instead_of_failing() {
        let (_dir, storage) = test_storage();
        let input = NewEntry {
            merchant: "Kiwi".into(),
            item: "Melk".into(),
            amount: "not-a-number".into(),
            discount_percent: "".into(),
            ..Default::default()
        };
        run(&storage, input).unwrap();

        let all = storage.list_all().unwrap();
        assert_eq!(all[0].amount, 0.0);
        assert_eq!(all[0].discount_percent, 0.0);
    }

    #[test]
    fn entry_gets_an_rfc3339_timestamp() {
        let (_dir, storage) = test_storage();
        let input = NewEntry {
            merchant: "Kiwi".into(),
            item: "Melk".into(),
            amount: "100".into(),
            discount_percent: "10".into(),
            ..Default::default()
        };
        run(&storage, input).unwrap();

        let all = storage.list_all().unwrap();
        assert!(all[0].local_date().is_some());
        assert_eq!(all[0].savings(), 10.0);
    }

    #[test]
    fn receipt_file_becomes_a_data_uri() {
        let (dir, storage) = test_storage();
        let receipt = dir.path().join("kvittering.png");
        fs::write(&receipt, [0x89, 0x50, 0x4e, 0x47]).unwrap();

        let input = NewEntry {
            merchant: "Elkjøp".into(),
            item: "Kabel".into(),
            amount: "99".into(),
            receipt: Some(receipt),
            ..Default::default()
        };
        run(&storage, input).unwrap();

        let all = storage.list_all().unwrap();
        let uri = all[0].receipt_image.as_deref().unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn missing_receipt_file_is_an_error() {
        let (dir, storage) = test_storage();
        let input = NewEntry {
            merchant: "X".into(),
            receipt: Some(dir.path().join("does-not-exist.png")),
            ..Default::default()
        };
        assert!(run(&storage, input).is_err());
    }
}
