//! # State Store
//!
//! Persists the application's flat key-value state - settings, favorites,
//! history, last-used raw inputs - as one human-readable JSON document with
//! safety features:
//!
//! - **Atomic saves**: write to .tmp, fsync, rename to prevent corruption
//! - **Version validation**: ensure schema compatibility on load
//!
//! A state file that is missing or unreadable degrades to defaults; the
//! calculator must stay usable offline and after a bad write.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::history::History;
use crate::settings::Settings;

/// Current schema version for state files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Raw as-typed input strings for one template, keyed by input key.
pub type RawInputs = BTreeMap<String, String>;

/// Root container for all persisted state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateFile {
    /// Schema version (for migration compatibility)
    pub version: String,

    pub settings: Settings,

    /// Ids of templates the user starred
    pub favorites: BTreeSet<String>,

    /// Saved calculations, newest first
    pub history: History,

    /// Last-typed raw inputs per template id, restored when a template opens
    pub last_inputs: BTreeMap<String, RawInputs>,
}

impl StateFile {
    pub fn new() -> Self {
        StateFile {
            version: SCHEMA_VERSION.to_string(),
            settings: Settings::default(),
            favorites: BTreeSet::new(),
            history: History::new(),
            last_inputs: BTreeMap::new(),
        }
    }

    /// Star/unstar a template. Returns the new favorite state.
    pub fn toggle_favorite(&mut self, template_id: &str) -> bool {
        if self.favorites.remove(template_id) {
            false
        } else {
            self.favorites.insert(template_id.to_string());
            true
        }
    }

    pub fn is_favorite(&self, template_id: &str) -> bool {
        self.favorites.contains(template_id)
    }

    /// Remember the raw text typed into a template's fields.
    pub fn remember_inputs(&mut self, template_id: &str, raw: RawInputs) {
        self.last_inputs.insert(template_id.to_string(), raw);
    }

    /// Raw text last typed into a template's fields, if any.
    pub fn recall_inputs(&self, template_id: &str) -> Option<&RawInputs> {
        self.last_inputs.get(template_id)
    }
}

impl Default for StateFile {
    fn default() -> Self {
        StateFile::new()
    }
}

/// Save state with atomic write semantics.
///
/// Serialize, write to a `.tmp` sibling, fsync, then rename over the target.
/// An interrupted write leaves the previous file intact.
pub fn save_state(state: &StateFile, path: &Path) -> CalcResult<()> {
    let json =
        serde_json::to_string_pretty(state).map_err(|e| CalcError::SerializationError {
            reason: e.to_string(),
        })?;

    let tmp_path = path.with_extension("json.tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error(
            "create temp file",
            tmp_path.display().to_string(),
            e.to_string(),
        )
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error(
            "write temp file",
            tmp_path.display().to_string(),
            e.to_string(),
        )
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error(
            "sync temp file",
            tmp_path.display().to_string(),
            e.to_string(),
        )
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// Load state from a file, validating the schema version.
pub fn load_state(path: &Path) -> CalcResult<StateFile> {
    let mut file = File::open(path)
        .map_err(|e| CalcError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let state: StateFile =
        serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    validate_version(&state.version)?;

    Ok(state)
}

/// Load state, falling back to defaults when the file is missing or unusable.
pub fn load_or_default(path: &Path) -> StateFile {
    if path.exists() {
        load_state(path).unwrap_or_default()
    } else {
        StateFile::new()
    }
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(CalcError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        });
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(CalcError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        });
    }

    // For 0.x versions a newer minor is a breaking change we cannot read
    if current_parts[0] == 0
        && file_parts.len() > 1
        && current_parts.len() > 1
        && file_parts[1] > current_parts[1]
    {
        return Err(CalcError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        });
    }

    Ok(())
}
