//! Gazetteer dataset loading.
//!
//! The dataset is the `cities.json` shape: a flat array of objects with
//! `name`, `country` and `lat`/`lng` fields. Coordinates appear both as
//! numbers and as strings in the wild, so decoding accepts either.

use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// One place record. Loaded once at startup, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct GazetteerEntry {
    pub name: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

/// Dataset loading errors
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    name: String,
    country: String,
    #[serde(deserialize_with = "de_coord")]
    lat: f64,
    #[serde(rename = "lng", deserialize_with = "de_coord")]
    lon: f64,
}

/// Accept `12.34` and `"12.34"`; a malformed string decodes as 0.0 rather
/// than failing the whole dataset.
fn de_coord<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Coord {
        Num(f64),
        Text(String),
    }

    Ok(match Coord::deserialize(deserializer)? {
        Coord::Num(n) => n,
        Coord::Text(s) => s.trim().parse().unwrap_or(0.0),
    })
}

impl From<RawEntry> for GazetteerEntry {
    fn from(raw: RawEntry) -> Self {
        Self {
            name: raw.name,
            country: raw.country,
            lat: raw.lat,
            lon: raw.lon,
        }
    }
}

/// Load gazetteer entries from a JSON file, preserving dataset order.
pub fn load_entries<P: AsRef<Path>>(path: P) -> Result<Vec<GazetteerEntry>, DatasetError> {
    let file = std::fs::File::open(path)?;
    entries_from_reader(std::io::BufReader::new(file))
}

/// Load gazetteer entries from any reader.
pub fn entries_from_reader<R: Read>(reader: R) -> Result<Vec<GazetteerEntry>, DatasetError> {
    let raw: Vec<RawEntry> = serde_json::from_reader(reader)?;
    let entries: Vec<GazetteerEntry> = raw.into_iter().map(GazetteerEntry::from).collect();
    tracing::info!("Loaded {} gazetteer entries", entries.len());
    Ok(entries)
}
