//! Case-insensitive prefix search over the gazetteer.
//!
//! Queries arrive on every keystroke, so the dataset is indexed up front:
//! a name-sorted side table allows a binary-search range scan instead of a
//! full pass over tens of thousands of entries.

use crate::dataset::GazetteerEntry;

/// Minimum normalized query length that produces matches.
pub const MIN_QUERY_LEN: usize = 2;
/// Hard cap on returned suggestions (first N in dataset order, not best N).
pub const MAX_SUGGESTIONS: usize = 5;

/// One autocomplete row, derived fresh per query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub name: String,
    pub country: String,
    /// Combined "<name>, <country>" form used for selection and history.
    pub full: String,
}

impl Suggestion {
    fn for_entry(entry: &GazetteerEntry) -> Self {
        Self {
            name: entry.name.clone(),
            country: entry.country.clone(),
            full: format!("{}, {}", entry.name, entry.country),
        }
    }
}

/// Immutable gazetteer snapshot with a prefix-search index.
#[derive(Debug)]
pub struct Gazetteer {
    entries: Vec<GazetteerEntry>,
    /// (lowercased name, position in `entries`), sorted by name then position.
    index: Vec<(String, u32)>,
}

impl Gazetteer {
    /// Build the search index over a dataset snapshot.
    pub fn new(entries: Vec<GazetteerEntry>) -> Self {
        let mut index: Vec<(String, u32)> = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.name.to_lowercase(), i as u32))
            .collect();
        index.sort();
        Self { entries, index }
    }

    /// Number of entries in the dataset.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by its combined "<name>, <country>" form.
    pub fn find_by_full(&self, full: &str) -> Option<&GazetteerEntry> {
        self.entries
            .iter()
            .find(|e| format!("{}, {}", e.name, e.country) == full)
    }

    /// Top-K case-insensitive prefix matches for a partial query.
    ///
    /// Queries shorter than [`MIN_QUERY_LEN`] after trimming return an empty
    /// list (soft failure). Matches preserve dataset order and are capped at
    /// [`MAX_SUGGESTIONS`]. Pure function over the dataset snapshot.
    pub fn search(&self, query: &str) -> Vec<Suggestion> {
        let query = query.trim().to_lowercase();
        if query.chars().count() < MIN_QUERY_LEN {
            return Vec::new();
        }

        // All names sharing the prefix sort contiguously, so one partition
        // point gives the start of the range and the scan stops at the first
        // non-match.
        let start = self.index.partition_point(|(name, _)| name.as_str() < query.as_str());
        let mut positions: Vec<u32> = self.index[start..]
            .iter()
            .take_while(|(name, _)| name.starts_with(&query))
            .map(|&(_, pos)| pos)
            .collect();

        // Restore dataset order before applying the cap: the contract is the
        // first K matches of the dataset, not an arbitrary K.
        positions.sort_unstable();
        positions
            .iter()
            .take(MAX_SUGGESTIONS)
            .map(|&pos| Suggestion::for_entry(&self.entries[pos as usize]))
            .collect()
    }
}
