//! SQLite-backed persistence for the recent-search ring.
//!
//! The ring is stored as a JSON array of strings under a single named key in
//! a small key-value table, read once at startup and rewritten on every
//! insertion.

use rusqlite::{params, Connection};
use std::path::Path;
use thiserror::Error;

use crate::recent::RecentSearches;

const RECENT_SEARCHES_KEY: &str = "recent_searches";

/// Search-history persistence errors.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("History storage error: {0}")]
    Storage(String),

    #[error("History data corrupt: {0}")]
    Corrupt(String),
}

impl HistoryError {
    fn storage(e: impl std::fmt::Display) -> Self {
        HistoryError::Storage(e.to_string())
    }
}

/// Local store for search history.
pub struct HistoryStore {
    conn: Connection,
}

impl HistoryStore {
    /// Open (or create) the history database at the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, HistoryError> {
        let conn = Connection::open(path).map_err(HistoryError::storage)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory store (for testing).
    #[cfg(test)]
    pub fn in_memory() -> Result<Self, HistoryError> {
        let conn = Connection::open_in_memory().map_err(HistoryError::storage)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), HistoryError> {
        self.conn
            .execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS state (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );
                "#,
            )
            .map_err(HistoryError::storage)?;
        Ok(())
    }

    /// Load the persisted ring. A missing key yields an empty ring.
    pub fn load_recent(&self) -> Result<RecentSearches, HistoryError> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM state WHERE key = ?1")
            .map_err(HistoryError::storage)?;

        let mut rows = stmt
            .query(params![RECENT_SEARCHES_KEY])
            .map_err(HistoryError::storage)?;

        match rows.next().map_err(HistoryError::storage)? {
            Some(row) => {
                let value: String = row.get(0).map_err(HistoryError::storage)?;
                let items: Vec<String> = serde_json::from_str(&value)
                    .map_err(|e| HistoryError::Corrupt(e.to_string()))?;
                Ok(RecentSearches::from_items(items))
            }
            None => Ok(RecentSearches::new()),
        }
    }

    /// Persist the ring, replacing the previous value.
    pub fn save_recent(&self, ring: &RecentSearches) -> Result<(), HistoryError> {
        let value = serde_json::to_string(ring.items())
            .map_err(|e| HistoryError::Storage(e.to_string()))?;

        self.conn
            .execute(
                "INSERT OR REPLACE INTO state (key, value) VALUES (?1, ?2)",
                params![RECENT_SEARCHES_KEY, value],
            )
            .map_err(HistoryError::storage)?;

        tracing::debug!("Persisted {} recent searches", ring.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn test_load_from_empty_store() {
        let store = HistoryStore::in_memory().unwrap();
        let ring = store.load_recent().unwrap();
        assert!(ring.is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let store = HistoryStore::in_memory().unwrap();

        let mut ring = RecentSearches::new();
        ring.insert("London, GB");
        ring.insert("Paris, FR");
        store.save_recent(&ring).unwrap();

        let loaded = store.load_recent().unwrap();
        assert_eq!(loaded, ring);
    }

    #[test]
    fn test_save_replaces_previous_value() {
        let store = HistoryStore::in_memory().unwrap();

        let mut ring = RecentSearches::new();
        ring.insert("London, GB");
        store.save_recent(&ring).unwrap();

        ring.insert("Berlin, DE");
        store.save_recent(&ring).unwrap();

        let loaded = store.load_recent().unwrap();
        assert_eq!(loaded.items(), ["Berlin, DE", "London, GB"]);
    }

    #[test]
    fn test_corrupt_blob_is_reported() {
        let store = HistoryStore::in_memory().unwrap();
        store
            .conn
            .execute(
                "INSERT INTO state (key, value) VALUES (?1, ?2)",
                params![RECENT_SEARCHES_KEY, "not json"],
            )
            .unwrap();

        let result = store.load_recent();
        assert!(matches!(result, Err(HistoryError::Corrupt(_))));
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.db");

        {
            let store = HistoryStore::new(&path).unwrap();
            let mut ring = RecentSearches::new();
            ring.insert("Oslo, NO");
            store.save_recent(&ring).unwrap();
        }

        let store = HistoryStore::new(&path).unwrap();
        let loaded = store.load_recent().unwrap();
        assert_eq!(loaded.items(), ["Oslo, NO"]);
    }
}
