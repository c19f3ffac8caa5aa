use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, SparlogError};
use crate::model::PurchaseEntry;
use crate::store::Storage;

/// Column order is part of the export contract.
pub const CSV_HEADER: [&str; 9] = [
    "date",
    "name",
    "merchant",
    "item",
    "category",
    "amount",
    "discount_percent",
    "saved",
    "note",
];

pub fn run(storage: &Storage) -> Result<CmdResult> {
    let items = storage.list_all()?;
    let profile = storage.profile();
    let csv = render_csv(&items, &profile.name)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported {} purchases.",
        items.len()
    )));
    result.csv = Some(csv);
    Ok(result)
}

/// Entries without a stamped user (local mode) fall back to the profile
/// name. Quoting and escaping is the csv writer's job, so commas or quotes
/// in notes never shift columns.
pub fn render_csv(items: &[PurchaseEntry], fallback_name: &str) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for entry in items {
        let name = if entry.user.trim().is_empty() {
            fallback_name
        } else {
            entry.user.as_str()
        };
        let amount = entry.amount.to_string();
        let discount = entry.discount_percent.to_string();
        let saved = entry.savings().to_string();
        writer.write_record([
            entry.date.as_str(),
            name,
            entry.merchant.as_str(),
            entry.item.as_str(),
            entry.category.as_str(),
            amount.as_str(),
            discount.as_str(),
            saved.as_str(),
            entry.note.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| SparlogError::Store(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| SparlogError::Store(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(note: &str) -> PurchaseEntry {
        PurchaseEntry {
            merchant: "Kiwi".into(),
            item: "Melk".into(),
            category: "Dagligvarer".into(),
            amount: 100.0,
            discount_percent: 10.0,
            note: note.into(),
            receipt_image: None,
            date: "2024-03-05T10:00:00Z".into(),
            user: String::new(),
        }
    }

    #[test]
    fn columns_land_in_documented_positions() {
        let csv = render_csv(&[entry("fin handel")], "Meg").unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "date,name,merchant,item,category,amount,discount_percent,saved,note"
        );
        assert_eq!(
            lines.next().unwrap(),
            "2024-03-05T10:00:00Z,Meg,Kiwi,Melk,Dagligvarer,100,10,10,fin handel"
        );
    }

    #[test]
    fn commas_and_quotes_in_notes_stay_in_one_column() {
        let csv = render_csv(&[entry(r#"billig, "nesten gratis""#)], "Meg").unwrap();
        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(record.len(), 9);
        assert_eq!(&record[8], r#"billig, "nesten gratis""#);
        assert_eq!(&record[2], "Kiwi");
    }

    #[test]
    fn stamped_user_wins_over_fallback_name() {
        let mut e = entry("");
        e.user = "Bob".into();
        let csv = render_csv(&[e], "Meg").unwrap();
        assert!(csv.lines().nth(1).unwrap().starts_with("2024-03-05T10:00:00Z,Bob,"));
    }

    #[test]
    fn empty_log_is_header_only() {
        let csv = render_csv(&[], "Meg").unwrap();
        assert_eq!(csv.lines().count(), 1);
    }
}
