//! Emotional state tracking.
//!
//! `AffectState` maps emotion names to scalar intensities, persisted as
//! a single JSON object. Intensities decay multiplicatively and entries
//! that decay away are pruned outright, so the map never accumulates
//! dead near-zero values.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::persist::{self, LoadMode};

/// Intensities at or below this threshold are pruned by decay.
pub const EPSILON: f64 = 1e-6;

/// Persisted mapping from emotion name to intensity.
pub struct AffectState {
    path: PathBuf,
    load_mode: LoadMode,
    emotions: HashMap<String, f64>,
}

impl AffectState {
    /// Create an empty state backed by `path`, with lenient loads.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_load_mode(path, LoadMode::Lenient)
    }

    /// Create an empty state with an explicit [`LoadMode`].
    pub fn with_load_mode(path: impl Into<PathBuf>, load_mode: LoadMode) -> Self {
        Self {
            path: path.into(),
            load_mode,
            emotions: HashMap::new(),
        }
    }

    /// Replace the in-memory map with the persisted one.
    ///
    /// Same recovery contract as [`RecordStore::load`]: missing file
    /// means empty state, malformed file means empty state (or an error
    /// in strict mode), never a partial map.
    ///
    /// [`RecordStore::load`]: crate::memory::RecordStore::load
    pub fn load(&mut self) -> Result<()> {
        match persist::load_json(&self.path, "emotions", self.load_mode) {
            Ok(emotions) => {
                self.emotions = emotions;
                debug!("loaded {} emotion entries", self.emotions.len());
                Ok(())
            }
            Err(e) => {
                self.emotions.clear();
                Err(e).context("failed to load emotions")
            }
        }
    }

    /// Set the intensity of an emotion, replacing any prior value.
    ///
    /// No clamping: zero or negative values are stored as given. The
    /// next decay pass prunes anything at or below [`EPSILON`].
    pub fn update(&mut self, name: impl Into<String>, intensity: f64) {
        let name = name.into();
        debug!("updated emotion '{}' to intensity {:.3}", name, intensity);
        self.emotions.insert(name, intensity);
    }

    /// Multiply every intensity by `max(0, 1 - rate)` in one pass and
    /// prune entries that end up at or below [`EPSILON`].
    ///
    /// `rate` is expected in `[0, 1]`. A pruned emotion is
    /// indistinguishable from one that was never set.
    pub fn decay(&mut self, rate: f64) {
        let factor = (1.0 - rate).max(0.0);
        for intensity in self.emotions.values_mut() {
            *intensity *= factor;
        }
        self.emotions.retain(|name, intensity| {
            let keep = *intensity > EPSILON;
            if !keep {
                debug!("pruned emotion '{}'", name);
            }
            keep
        });
        debug!("decayed emotions by rate {:.3}", rate);
    }

    /// The emotion with the highest intensity, or `None` when empty.
    ///
    /// Ties are resolved by map traversal order; callers must not rely
    /// on a specific winner among equal intensities.
    pub fn dominant(&self) -> Option<(&str, f64)> {
        self.emotions
            .iter()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(name, intensity)| (name.as_str(), *intensity))
    }

    /// Current intensity for `name`, if set.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.emotions.get(name).copied()
    }

    /// Serialize the whole map, replacing the backing file.
    pub fn save(&self) -> Result<()> {
        persist::save_json(&self.path, "emotions", &self.emotions).context("failed to save emotions")
    }

    pub fn len(&self) -> usize {
        self.emotions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emotions.is_empty()
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
