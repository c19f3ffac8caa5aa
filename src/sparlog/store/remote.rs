use chrono::{Datelike, NaiveDate};
use reqwest::blocking::Client;
use reqwest::header;

use super::{group_month_rows, EntryStore};
use crate::config::RemoteConfig;
use crate::error::Result;
use crate::model::{LeaderboardRow, PurchaseEntry, ANONYMOUS_USER};

/// Adapter for the shared multi-user document store.
///
/// Constructed once at bootstrap; if construction fails the adapter stays
/// disabled for the process lifetime, exactly like missing configuration.
/// Failures after that point propagate to the caller: there is no retry,
/// and writes are at-most-once.
pub struct RemoteStore {
    client: Client,
    base_url: String,
    collection: String,
}

impl RemoteStore {
    pub fn connect(config: &RemoteConfig) -> Option<Self> {
        let mut headers = header::HeaderMap::new();
        let key = header::HeaderValue::from_str(&config.api_key).ok()?;
        headers.insert("x-api-key", key);

        let client = Client::builder().default_headers(headers).build().ok()?;
        Some(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            collection: config.collection.clone(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, self.collection)
    }
}

impl EntryStore for RemoteStore {
    /// Stamps the document with the caller's display name, overriding
    /// whatever `user` the caller supplied.
    fn add(&self, mut entry: PurchaseEntry, display_name: &str) -> Result<()> {
        entry.user = if display_name.trim().is_empty() {
            ANONYMOUS_USER.to_string()
        } else {
            display_name.to_string()
        };
        self.client
            .post(self.collection_url())
            .json(&entry)
            .send()?
            .error_for_status()?;
        Ok(())
    }

    /// Every document in the collection, store-native order, all users.
    fn list_all(&self) -> Result<Vec<PurchaseEntry>> {
        let entries = self
            .client
            .get(self.collection_url())
            .send()?
            .error_for_status()?
            .json()?;
        Ok(entries)
    }

    /// No server-side month query: fetch everything and aggregate here.
    /// Linear in total collection size, fine at these volumes.
    fn list_month(&self, date: NaiveDate, _display_name: &str) -> Result<Vec<LeaderboardRow>> {
        let all = self.list_all()?;
        Ok(group_month_rows(&all, date.year(), date.month()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_builds_collection_url_without_trailing_slash() {
        let config = RemoteConfig {
            api_url: "https://store.example.com/api/".into(),
            api_key: "k-123".into(),
            collection: "sparlog_entries".into(),
        };
        let store = RemoteStore::connect(&config).unwrap();
        assert_eq!(
            store.collection_url(),
            "https://store.example.com/api/sparlog_entries"
        );
    }

    #[test]
    fn connect_rejects_unprintable_api_key() {
        let config = RemoteConfig {
            api_url: "https://store.example.com".into(),
            api_key: "bad\nkey".into(),
            collection: "sparlog_entries".into(),
        };
        assert!(RemoteStore::connect(&config).is_none());
    }
}
