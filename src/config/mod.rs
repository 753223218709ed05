// packup-rs: Modpack Update & Release Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for packup-rs.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. packup.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. PACKUP_* env vars
//! 5. CLI overrides (--root, --push, log levels)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! PACKUP_PATHS__ROOT=/pack           → paths.root = "/pack"
//! PACKUP_RELEASE__REMOTE=upstream    → release.remote = "upstream"
//! PACKUP_TOOL__MARKER_SUFFIX=.stale  → tool.marker_suffix = ".stale"
//! ```

pub mod loader;
pub mod paths;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use paths::PathsConfig;
use types::{GlobalConfig, ReleaseConfig, ToolConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Pack layout.
    pub paths: PathsConfig,
    /// External package tool.
    pub tool: ToolConfig,
    /// Commit, tag and push settings.
    pub release: ReleaseConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use packup_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("packup.toml")
    ///     .with_env_prefix("PACKUP")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Resolve all paths and validate configuration.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` if the marker suffix or the
    /// change delimiter is empty.
    pub fn resolve_and_validate(&mut self) -> Result<()> {
        self.paths.resolve();

        if self.tool.marker_suffix.is_empty() {
            return Err(ConfigError::InvalidValue {
                section: "tool".to_string(),
                key: "marker_suffix".to_string(),
                message: "must not be empty".to_string(),
            }
            .into());
        }
        if self.tool.change_delimiter.is_empty() {
            return Err(ConfigError::InvalidValue {
                section: "tool".to_string(),
                key: "change_delimiter".to_string(),
                message: "must not be empty".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_paths_options(&mut options);
        self.format_tool_options(&mut options);
        self.format_release_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert("global.log_file".into(), fmt_path(self.global.log_file.as_ref()));
    }

    fn format_paths_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("paths.root".into(), fmt_path(self.paths.root.as_ref()));
        options.insert("paths.mods".into(), fmt_path(self.paths.mods.as_ref()));
        options.insert(
            "paths.manifest".into(),
            fmt_path(self.paths.manifest.as_ref()),
        );
    }

    fn format_tool_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "tool.packwiz".into(),
            self.tool.packwiz.display().to_string(),
        );
        options.insert(
            "tool.marker_suffix".into(),
            self.tool.marker_suffix.clone(),
        );
        options.insert(
            "tool.manifest_suffixes".into(),
            self.tool.manifest_suffixes.join(", "),
        );
        options.insert(
            "tool.change_delimiter".into(),
            self.tool.change_delimiter.clone(),
        );
    }

    fn format_release_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("release.remote".into(), self.release.remote.clone());
        options.insert(
            "release.commit_prefix".into(),
            self.release.commit_prefix.clone(),
        );
        options.insert("release.push".into(), self.release.push.to_string());
    }
}

fn fmt_path(path: Option<&PathBuf>) -> String {
    path.map_or_else(String::new, |p| p.display().to_string())
}
