use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Display name used when the profile has never been saved.
pub const DEFAULT_PROFILE_NAME: &str = "Meg";
/// Display name stamped on remote entries when the profile name is blank.
pub const ANONYMOUS_USER: &str = "Anonym";
/// Leaderboard bucket for remote entries that carry no user at all.
pub const UNKNOWN_USER: &str = "Ukjent";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    #[default]
    Local,
    Remote,
}

/// Per-device user settings. Lives only in the local store; the remote
/// backend never sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default = "default_profile_name")]
    pub name: String,
    #[serde(default)]
    pub mode: StorageMode,
}

fn default_profile_name() -> String {
    DEFAULT_PROFILE_NAME.to_string()
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: default_profile_name(),
            mode: StorageMode::Local,
        }
    }
}

/// One recorded purchase. Immutable once written; there is no update or
/// delete, only the full local reset.
///
/// Wire names (`discount`, `receipt`) match the original export format so
/// existing data files stay readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseEntry {
    #[serde(default)]
    pub merchant: String,
    #[serde(default)]
    pub item: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub amount: f64,
    #[serde(default, deserialize_with = "lenient_number", rename = "discount")]
    pub discount_percent: f64,
    #[serde(default)]
    pub note: String,
    #[serde(default, rename = "receipt", skip_serializing_if = "Option::is_none")]
    pub receipt_image: Option<String>,
    #[serde(default)]
    pub date: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user: String,
}

impl PurchaseEntry {
    /// The single source of truth for "saved" money. Recomputed everywhere,
    /// never persisted.
    pub fn savings(&self) -> f64 {
        self.amount * (self.discount_percent / 100.0)
    }

    /// Calendar date of the entry as recorded (wall clock, not UTC).
    /// `None` when the stored date string does not parse; such entries are
    /// excluded from month and week bucketing.
    pub fn local_date(&self) -> Option<NaiveDate> {
        parse_entry_date(&self.date).map(|dt| dt.date())
    }
}

/// Accepts RFC 3339, a naive datetime, or a plain date.
pub fn parse_entry_date(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN))
        .ok()
}

/// Numeric coercion for form-style input: malformed or empty becomes 0,
/// never an error.
pub fn coerce_amount(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(0.0)
}

/// Serde-side counterpart of [`coerce_amount`]: numbers pass through,
/// numeric strings parse, everything else (null, objects, garbage) is 0.
fn lenient_number<'de, D>(de: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(de)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => coerce_amount(&s),
        _ => 0.0,
    })
}

/// Derived per-user monthly summary. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardRow {
    pub user_key: String,
    pub display_name: String,
    pub total_saved: f64,
    pub purchase_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn savings_is_amount_times_discount_fraction() {
        let entry = PurchaseEntry {
            merchant: "Kiwi".into(),
            item: "Melk".into(),
            category: "Dagligvarer".into(),
            amount: 200.0,
            discount_percent: 50.0,
            note: String::new(),
            receipt_image: None,
            date: "2024-03-20T12:00:00Z".into(),
            user: String::new(),
        };
        assert_eq!(entry.savings(), 100.0);
    }

    #[test]
    fn malformed_numbers_coerce_to_zero() {
        let json = r#"{
            "merchant": "X",
            "item": "Y",
            "category": "",
            "amount": "not a number",
            "discount": null,
            "date": "2024-01-01T00:00:00Z"
        }"#;
        let entry: PurchaseEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.amount, 0.0);
        assert_eq!(entry.discount_percent, 0.0);
        assert_eq!(entry.savings(), 0.0);
    }

    #[test]
    fn numeric_strings_parse() {
        let json = r#"{"amount": "129.5", "discount": "10", "date": "2024-01-01"}"#;
        let entry: PurchaseEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.amount, 129.5);
        assert_eq!(entry.discount_percent, 10.0);
    }

    #[test]
    fn coerce_amount_handles_garbage() {
        assert_eq!(coerce_amount("100"), 100.0);
        assert_eq!(coerce_amount(" 12.5 "), 12.5);
        assert_eq!(coerce_amount(""), 0.0);
        assert_eq!(coerce_amount("abc"), 0.0);
    }

    #[test]
    fn profile_defaults() {
        let profile: Profile = serde_json::from_str("{}").unwrap();
        assert_eq!(profile.name, DEFAULT_PROFILE_NAME);
        assert_eq!(profile.mode, StorageMode::Local);
    }

    #[test]
    fn storage_mode_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&StorageMode::Remote).unwrap(),
            "\"remote\""
        );
    }

    #[test]
    fn date_parsing_variants() {
        assert!(parse_entry_date("2024-03-05T10:00:00+01:00").is_some());
        assert!(parse_entry_date("2024-03-05T10:00:00.123").is_some());
        assert!(parse_entry_date("2024-03-05").is_some());
        assert!(parse_entry_date("last tuesday").is_none());
    }

    #[test]
    fn local_date_uses_wall_clock() {
        let entry = PurchaseEntry {
            merchant: String::new(),
            item: String::new(),
            category: String::new(),
            amount: 0.0,
            discount_percent: 0.0,
            note: String::new(),
            receipt_image: None,
            date: "2024-03-31T23:30:00+02:00".into(),
            user: String::new(),
        };
        // The recorded calendar day, not the UTC one (which would be 2024-03-31T21:30Z).
        assert_eq!(
            entry.local_date(),
            NaiveDate::from_ymd_opt(2024, 3, 31)
        );
    }
}
