//! Shared JSON persistence for the state stores.
//!
//! Every store keeps its whole state in a single JSON file and persists
//! by full replace: `save_json` serializes everything and overwrites the
//! backing file. Load is recoverable by default: a missing file yields
//! the empty value, and a malformed file yields the empty value in
//! lenient mode or an error in strict mode.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// How `load_json` reacts to a backing file that exists but fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadMode {
    /// Reset to empty state and keep going.
    #[default]
    Lenient,
    /// Propagate the parse error to the caller.
    Strict,
}

/// Failure classification at the persistence boundary.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to read {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed JSON in {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode {kind} state")]
    Encode {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write {path}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Load a JSON document from `path`.
///
/// A missing file is not an error: the caller gets `T::default()` and a
/// warning is logged. A file that fails to parse also yields
/// `T::default()` in [`LoadMode::Lenient`]; in [`LoadMode::Strict`] the
/// parse error is returned instead. `kind` labels the store in
/// diagnostics ("memories", "emotions", ...).
pub fn load_json<T>(path: &Path, kind: &str, mode: LoadMode) -> Result<T, PersistError>
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        warn!("{} file {} not found, starting empty", kind, path.display());
        return Ok(T::default());
    }

    let raw = std::fs::read_to_string(path).map_err(|source| PersistError::Read {
        path: path.display().to_string(),
        source,
    })?;

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(source) => match mode {
            LoadMode::Lenient => {
                error!(
                    "failed to decode {} file {}: {}",
                    kind,
                    path.display(),
                    source
                );
                Ok(T::default())
            }
            LoadMode::Strict => Err(PersistError::Parse {
                path: path.display().to_string(),
                source,
            }),
        },
    }
}

/// Serialize `value` and replace the file at `path` with it.
///
/// The document is written to a sibling temp file and renamed into
/// place, so the target is always a complete snapshot. Parent
/// directories are created as needed.
pub fn save_json<T: Serialize>(path: &Path, kind: &str, value: &T) -> Result<(), PersistError> {
    info!("saving {} to {}", kind, path.display());

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|source| PersistError::Write {
                path: parent.display().to_string(),
                source,
            })?;
        }
    }

    let json = serde_json::to_string_pretty(value).map_err(|source| PersistError::Encode {
        kind: kind.to_string(),
        source,
    })?;

    let tmp = tmp_path(path);
    std::fs::write(&tmp, json).map_err(|source| PersistError::Write {
        path: tmp.display().to_string(),
        source,
    })?;
    std::fs::rename(&tmp, path).map_err(|source| PersistError::Write {
        path: path.display().to_string(),
        source,
    })?;

    debug!("{} saved", kind);
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(".tmp");
    PathBuf::from(os)
}
