// packup-rs: Modpack Update & Release Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Outdated marker store.
//!
//! A mod flagged for update carries an extra suffix on its metadata file:
//!
//! ```text
//! mods/sodium.pw.toml.outdated    marked     (name, filename, ...)
//! mods/sodium.pw.toml             active
//! identifier: sodium
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{MarkerError, PackResult};

/// Metadata recorded in a marker file. Other fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MarkerRecord {
    /// Display name of the mod.
    pub name: String,
    /// Artifact filename expected after a successful update.
    pub filename: String,
}

/// A mod flagged outdated, located in the mods directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutdatedMarker {
    dir: PathBuf,
    file_name: String,
    suffix: String,
    record: MarkerRecord,
}

impl OutdatedMarker {
    /// Creates a marker for `file_name` (which must end with `suffix`) in `dir`.
    pub fn new(
        dir: impl AsRef<Path>,
        file_name: impl Into<String>,
        suffix: impl Into<String>,
        record: MarkerRecord,
    ) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            file_name: file_name.into(),
            suffix: suffix.into(),
            record,
        }
    }

    /// Marker file name, suffix included.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// File name with the marker suffix removed.
    #[must_use]
    pub fn active_file_name(&self) -> &str {
        self.file_name
            .strip_suffix(self.suffix.as_str())
            .unwrap_or(&self.file_name)
    }

    /// Identifier passed to the package tool: the active name with the first
    /// matching manifest suffix removed.
    #[must_use]
    pub fn identifier<S: AsRef<str>>(&self, manifest_suffixes: &[S]) -> &str {
        let active = self.active_file_name();
        manifest_suffixes
            .iter()
            .find_map(|suffix| active.strip_suffix(suffix.as_ref()))
            .unwrap_or(active)
    }

    /// Full path of the marked form.
    #[must_use]
    pub fn marked_path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    /// Full path of the active form.
    #[must_use]
    pub fn active_path(&self) -> PathBuf {
        self.dir.join(self.active_file_name())
    }

    #[must_use]
    pub const fn record(&self) -> &MarkerRecord {
        &self.record
    }
}

/// Enumerates outdated markers in a mods directory.
#[derive(Debug, Clone)]
pub struct MarkerStore {
    dir: PathBuf,
    suffix: String,
}

impl MarkerStore {
    pub fn new(dir: impl AsRef<Path>, suffix: impl Into<String>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            suffix: suffix.into(),
        }
    }

    /// Lists every marker in the directory, keyed and ordered by file name.
    ///
    /// Subdirectories are not searched.
    ///
    /// # Errors
    ///
    /// - `MarkerError::DirectoryUnreadable` if the directory cannot be listed.
    /// - `MarkerError::MalformedRecord` if any marker cannot be read or parsed.
    ///   One bad marker aborts the whole listing.
    pub fn list_outdated(&self) -> PackResult<BTreeMap<String, OutdatedMarker>> {
        let unreadable = |source| MarkerError::DirectoryUnreadable {
            path: self.dir.clone(),
            source,
        };

        let mut markers = BTreeMap::new();
        for entry in std::fs::read_dir(&self.dir).map_err(unreadable)? {
            let entry = entry.map_err(unreadable)?;
            let Some(file_name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if !file_name.ends_with(&self.suffix) || file_name.len() == self.suffix.len() {
                continue;
            }
            if !entry.file_type().map_err(unreadable)?.is_file() {
                continue;
            }

            let record = Self::read_record(&entry.path())?;
            debug!(marker = %file_name, name = %record.name, "found outdated marker");
            markers.insert(
                file_name.clone(),
                OutdatedMarker::new(&self.dir, file_name, self.suffix.clone(), record),
            );
        }

        Ok(markers)
    }

    fn read_record(path: &Path) -> PackResult<MarkerRecord> {
        let malformed = |message: String| MarkerError::MalformedRecord {
            path: path.to_path_buf(),
            message,
        };

        let content = std::fs::read_to_string(path).map_err(|e| malformed(e.to_string()))?;
        let record: MarkerRecord =
            toml::from_str(&content).map_err(|e| malformed(e.message().to_string()))?;
        // An empty filename is a substring of any output.
        if record.filename.trim().is_empty() {
            return Err(malformed("'filename' must not be empty".to_string()).into());
        }
        Ok(record)
    }
}
