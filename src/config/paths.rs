// packup-rs: Modpack Update & Release Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Path configuration.
//!
//! ```text
//! root/          (pack root, default ".")
//!   pack.toml    (manifest)
//!   mods/        (*.pw.toml, *.pw.toml.outdated)
//! ```
//!
//! `mods` and `manifest` are resolved from `root` if relative or unset.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Pack layout paths.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Pack root (all other paths relative to this).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    /// Mods directory holding the per-mod manifests (default: root/mods).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mods: Option<PathBuf>,
    /// Pack manifest (default: root/pack.toml).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest: Option<PathBuf>,
}

impl PathsConfig {
    /// Resolve relative paths against `root` and fill in defaults.
    pub fn resolve(&mut self) {
        let root = self.root.get_or_insert_with(|| PathBuf::from(".")).clone();

        let resolve = |path: &mut Option<PathBuf>, default: &str| match path {
            Some(p) if p.is_relative() => {
                *path = Some(root.join(p.clone()));
            }
            None => {
                *path = Some(root.join(default));
            }
            _ => {}
        };

        resolve(&mut self.mods, "mods");
        resolve(&mut self.manifest, "pack.toml");
    }

    /// Get the pack root.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if paths were not resolved.
    pub fn root(&self) -> Result<&Path> {
        Self::require(self.root.as_deref(), "root")
    }

    /// Get the mods directory.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if paths were not resolved.
    pub fn mods_dir(&self) -> Result<&Path> {
        Self::require(self.mods.as_deref(), "mods")
    }

    /// Get the pack manifest path.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if paths were not resolved.
    pub fn manifest_path(&self) -> Result<&Path> {
        Self::require(self.manifest.as_deref(), "manifest")
    }

    fn require<'a>(path: Option<&'a Path>, key: &str) -> Result<&'a Path> {
        path.ok_or_else(|| {
            ConfigError::MissingKey {
                section: "paths".to_string(),
                key: key.to_string(),
            }
            .into()
        })
    }
}
