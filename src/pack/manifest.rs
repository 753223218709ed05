// packup-rs: Modpack Update & Release Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pack manifest version handling.
//!
//! ```text
//! pack.toml  version = "1.4.7"
//!      |  load (toml_edit, lossless)
//!      v
//! PackVersion 1.4.7 --bump--> 1.5.0
//!      |  set "version" only, decor kept
//!      v
//! save (temp file + rename)
//! ```

use std::fmt;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use tempfile::NamedTempFile;
use toml_edit::{DocumentMut, Item, Value};
use tracing::{debug, info};

use crate::error::{ManifestError, PackResult, VersionError};

/// Leading `major.minor.patch`; anything after it is ignored.
fn version_regex() -> Result<&'static Regex, VersionError> {
    static VERSION_RE: OnceLock<Option<Regex>> = OnceLock::new();
    VERSION_RE
        .get_or_init(|| Regex::new(r"^([0-9]+)\.([0-9]+)\.([0-9]+)").ok())
        .as_ref()
        .ok_or_else(|| VersionError::InvalidVersion("version pattern failed to compile".into()))
}

/// A `major.minor.patch` pack version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl PackVersion {
    #[must_use]
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Next minor release: `major.(minor + 1).0`.
    ///
    /// # Errors
    ///
    /// Returns `VersionError::InvalidVersion` if the minor component overflows.
    pub fn bump_minor(self) -> Result<Self, VersionError> {
        let minor = self
            .minor
            .checked_add(1)
            .ok_or_else(|| VersionError::InvalidVersion(self.to_string()))?;
        Ok(Self::new(self.major, minor, 0))
    }
}

impl FromStr for PackVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || VersionError::InvalidVersion(s.to_string());
        let captures = version_regex()?.captures(s).ok_or_else(invalid)?;

        let component = |i: usize| -> Result<u64, VersionError> {
            captures
                .get(i)
                .ok_or_else(invalid)?
                .as_str()
                .parse()
                .map_err(|_| invalid())
        };

        Ok(Self::new(component(1)?, component(2)?, component(3)?))
    }
}

impl fmt::Display for PackVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Computes the next minor version string.
///
/// `"1.4.7"` becomes `"1.5.0"`.
///
/// # Errors
///
/// Returns `VersionError::InvalidVersion` if `version` does not start with
/// three dot-separated non-negative integers.
pub fn bump(version: &str) -> Result<String, VersionError> {
    Ok(version.parse::<PackVersion>()?.bump_minor()?.to_string())
}

/// A version change applied to the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionBump {
    pub from: String,
    pub to: String,
}

/// The pack manifest document.
#[derive(Debug, Clone)]
pub struct PackManifest {
    path: PathBuf,
    doc: DocumentMut,
}

impl PackManifest {
    /// Loads and parses a manifest.
    ///
    /// # Errors
    ///
    /// - `ManifestError::Read` if the file cannot be read.
    /// - `ManifestError::Parse` if it is not valid TOML.
    /// - `ManifestError::MissingVersion` if there is no string `version`.
    pub fn load(path: impl AsRef<Path>) -> PackResult<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|source| ManifestError::Read {
            path: path.clone(),
            source,
        })?;
        let doc = content
            .parse::<DocumentMut>()
            .map_err(|e| ManifestError::Parse {
                path: path.clone(),
                message: e.message().to_string(),
            })?;

        let manifest = Self { path, doc };
        manifest.version()?;
        Ok(manifest)
    }

    /// Current version string.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::MissingVersion` if `version` is absent or not a string.
    pub fn version(&self) -> PackResult<&str> {
        self.doc
            .get("version")
            .and_then(Item::as_str)
            .ok_or_else(|| {
                ManifestError::MissingVersion {
                    path: self.path.clone(),
                }
                .into()
            })
    }

    /// Current version, parsed.
    ///
    /// # Errors
    ///
    /// Fails if the version is missing or not `major.minor.patch`.
    pub fn pack_version(&self) -> PackResult<PackVersion> {
        Ok(self.version()?.parse()?)
    }

    /// Replaces the `version` value, keeping its surrounding whitespace and comments.
    pub fn set_version(&mut self, version: &str) {
        match self.doc.get_mut("version").and_then(Item::as_value_mut) {
            Some(value) => {
                let decor = value.decor().clone();
                *value = Value::from(version);
                *value.decor_mut() = decor;
            }
            None => {
                self.doc["version"] = toml_edit::value(version);
            }
        }
    }

    /// Bumps the minor version in memory.
    ///
    /// # Errors
    ///
    /// Fails without touching the document if the current version is
    /// missing or invalid.
    pub fn bump_version(&mut self) -> PackResult<VersionBump> {
        let from = self.version()?.to_string();
        let to = bump(&from)?;
        self.set_version(&to);
        debug!(%from, %to, "bumped pack version");
        Ok(VersionBump { from, to })
    }

    /// Writes the document back to its path.
    ///
    /// The content goes to a temporary file in the same directory which then
    /// replaces the manifest.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::Write` on any I/O failure.
    pub fn save(&self) -> PackResult<()> {
        let write_err = |source| ManifestError::Write {
            path: self.path.clone(),
            source,
        };

        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        // Temp files are created 0600; keep the manifest's own mode.
        if let Ok(meta) = std::fs::metadata(&self.path) {
            tmp.as_file()
                .set_permissions(meta.permissions())
                .map_err(write_err)?;
        }
        tmp.write_all(self.render().as_bytes())
            .map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;
        Ok(())
    }

    /// Renders the document.
    #[must_use]
    pub fn render(&self) -> String {
        self.doc.to_string()
    }
}

/// Loads the manifest at `path`, bumps its minor version and saves it.
///
/// # Errors
///
/// Fails before writing anything if the manifest cannot be loaded or its
/// version is invalid. Fails with `ManifestError::Write` if saving fails.
pub fn bump_manifest(path: impl AsRef<Path>) -> PackResult<VersionBump> {
    let mut manifest = PackManifest::load(path)?;
    let bump = manifest.bump_version()?;
    manifest.save()?;
    info!(from = %bump.from, to = %bump.to, "pack version");
    Ok(bump)
}
