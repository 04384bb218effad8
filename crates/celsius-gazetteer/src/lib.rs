//! City-name autocomplete for Celsius
//!
//! Provides prefix search over a static gazetteer dataset, the request
//! sequencing guard used by debounced lookups, and the persisted
//! recent-search ring.

pub mod dataset;
pub mod recent;
pub mod search;
pub mod sequence;
pub mod store;

pub use dataset::{DatasetError, GazetteerEntry};
pub use recent::RecentSearches;
pub use search::{Gazetteer, Suggestion, MAX_SUGGESTIONS, MIN_QUERY_LEN};
pub use sequence::RequestSequencer;
pub use store::{HistoryError, HistoryStore};
