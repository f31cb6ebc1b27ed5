//! Configuration management
//!
//! State file locations, the default iteration count, and the load
//! strictness flag. Values come from a TOML file with per-field
//! defaults; the CLI can override any of them.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::persist::LoadMode;

/// Runtime configuration for the soul loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoulConfig {
    /// Path to the memory JSON file
    #[serde(default = "default_memory_path")]
    pub memory_path: PathBuf,
    /// Path to the emotions JSON file
    #[serde(default = "default_emotions_path")]
    pub emotions_path: PathBuf,
    /// Path to the reflections JSON file
    #[serde(default = "default_reflections_path")]
    pub reflections_path: PathBuf,
    /// Default number of cycles for `run`
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    /// Fail instead of resetting when a state file is malformed
    #[serde(default)]
    pub strict_load: bool,
}

fn default_memory_path() -> PathBuf {
    PathBuf::from("memory.json")
}

fn default_emotions_path() -> PathBuf {
    PathBuf::from("emotions.json")
}

fn default_reflections_path() -> PathBuf {
    PathBuf::from("reflections.json")
}

fn default_iterations() -> u32 {
    1
}

impl Default for SoulConfig {
    fn default() -> Self {
        Self {
            memory_path: default_memory_path(),
            emotions_path: default_emotions_path(),
            reflections_path: default_reflections_path(),
            iterations: default_iterations(),
            strict_load: false,
        }
    }
}

impl SoulConfig {
    /// Load configuration from an explicit TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from the default config location, or fall back to defaults
    /// when no file is present.
    pub fn load_default() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Default config file path (`<config dir>/soul-loop/config.toml`).
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("soul-loop")
            .join("config.toml")
    }

    /// The [`LoadMode`] implied by `strict_load`.
    pub fn load_mode(&self) -> LoadMode {
        if self.strict_load {
            LoadMode::Strict
        } else {
            LoadMode::Lenient
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_working_directory_files() {
        let config = SoulConfig::default();
        assert_eq!(config.memory_path, PathBuf::from("memory.json"));
        assert_eq!(config.emotions_path, PathBuf::from("emotions.json"));
        assert_eq!(config.reflections_path, PathBuf::from("reflections.json"));
        assert_eq!(config.iterations, 1);
        assert!(!config.strict_load);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: SoulConfig =
            toml::from_str("memory_path = \"/tmp/m.json\"\nstrict_load = true\n").unwrap();
        assert_eq!(config.memory_path, PathBuf::from("/tmp/m.json"));
        assert!(config.strict_load);
        assert_eq!(config.iterations, 1);
        assert_eq!(config.load_mode(), LoadMode::Strict);
    }
}
