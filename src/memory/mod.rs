//! Episodic record storage.
//!
//! `RecordStore` keeps an ordered sequence of structured records and
//! persists them as a JSON array. The same type backs both the memory
//! store and the reflection store; the `kind` label tells the two apart
//! in logs and summaries.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::persist::{self, LoadMode};

/// A structured, JSON-serializable entry.
///
/// Records carry no ID: identity is the position in the sequence, and
/// insertion order is chronological.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Ordered, persisted collection of [`Record`]s.
pub struct RecordStore {
    path: PathBuf,
    kind: String,
    load_mode: LoadMode,
    records: Vec<Record>,
}

impl RecordStore {
    /// Create an empty store backed by `path`, with lenient loads.
    pub fn new(path: impl Into<PathBuf>, kind: impl Into<String>) -> Self {
        Self::with_load_mode(path, kind, LoadMode::Lenient)
    }

    /// Create an empty store with an explicit [`LoadMode`].
    pub fn with_load_mode(
        path: impl Into<PathBuf>,
        kind: impl Into<String>,
        load_mode: LoadMode,
    ) -> Self {
        Self {
            path: path.into(),
            kind: kind.into(),
            load_mode,
            records: Vec::new(),
        }
    }

    /// Replace the in-memory sequence with the persisted one.
    ///
    /// A missing backing file leaves the store empty. A malformed file
    /// leaves the store empty too; in strict mode the parse error is
    /// also returned. The sequence is never partially populated.
    pub fn load(&mut self) -> Result<()> {
        match persist::load_json(&self.path, &self.kind, self.load_mode) {
            Ok(records) => {
                self.records = records;
                debug!("loaded {} {} entries", self.records.len(), self.kind);
                Ok(())
            }
            Err(e) => {
                self.records.clear();
                Err(e).with_context(|| format!("failed to load {}", self.kind))
            }
        }
    }

    /// Append a record to the end of the sequence.
    ///
    /// In-memory only; call [`save`](Self::save) to persist.
    pub fn add(&mut self, record: Record) {
        self.records.push(record);
        debug!("added {} entry ({} total)", self.kind, self.records.len());
    }

    /// Return the records whose serialized form contains `query` as a
    /// case-insensitive substring, in original order.
    ///
    /// An empty query matches every record.
    pub fn search(&self, query: &str) -> Vec<&Record> {
        let needle = query.to_lowercase();
        let results: Vec<&Record> = self
            .records
            .iter()
            .filter(|record| {
                serde_json::to_string(record)
                    .map(|text| text.to_lowercase().contains(&needle))
                    .unwrap_or(false)
            })
            .collect();
        debug!(
            "found {} {} matching '{}'",
            results.len(),
            self.kind,
            query
        );
        results
    }

    /// A count-based report of the current size.
    pub fn summarize(&self) -> String {
        format!("{} {} stored.", self.records.len(), self.kind)
    }

    /// Serialize the entire sequence, replacing the backing file.
    pub fn save(&self) -> Result<()> {
        persist::save_json(&self.path, &self.kind, &self.records)
            .with_context(|| format!("failed to save {}", self.kind))
    }

    /// The current sequence, in insertion order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Label used in logs and summaries.
    pub fn kind(&self) -> &str {
        &self.kind
    }
}
