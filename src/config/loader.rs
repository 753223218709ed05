// packup-rs: Modpack Update & Release Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Layered configuration loading.
//!
//! ```text
//! ConfigLoader::new()
//!   .add_toml_file_optional("packup.toml")   lowest
//!   .add_toml_file(--config ...)
//!   .add_toml_str(..)                        tests
//!   .with_env_prefix("PACKUP")               PACKUP_<SECTION>__<KEY>
//!   .set_all(cli overrides)                  highest
//!        |
//!        v
//!    build() --> Config (paths resolved, values validated)
//! ```

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File, FileFormat};

use super::Config;
use crate::error::{ConfigError, Result};

/// Where a configuration layer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Required file (`--config`).
    File,
    /// Optional file that existed when added.
    Optional,
    /// Inline TOML.
    Inline,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::File => "file",
            Self::Optional => "optional",
            Self::Inline => "inline",
        })
    }
}

/// Builder for loading configuration from multiple sources.
///
/// Later sources win. Environment variables beat every file and explicit
/// overrides beat everything.
pub struct ConfigLoader {
    builder: ConfigBuilder<DefaultState>,
    env_prefix: Option<String>,
    sources: Vec<(SourceKind, PathBuf)>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            sources: Vec::new(),
        }
    }

    fn add_file(mut self, path: &Path, required: bool) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(required));
        self
    }

    /// Adds a TOML file that must exist when `build()` runs.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(self, path: P) -> Self {
        let path = path.as_ref();
        let mut loader = self.add_file(path, true);
        loader.sources.push((SourceKind::File, path.to_path_buf()));
        loader
    }

    /// Adds a TOML file that is skipped if missing.
    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(self, path: P) -> Self {
        let path = path.as_ref();
        let mut loader = self.add_file(path, false);
        if path.is_file() {
            loader.sources.push((SourceKind::Optional, path.to_path_buf()));
        }
        loader
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.sources
            .push((SourceKind::Inline, PathBuf::from("<inline>")));
        self
    }

    /// Reads `<PREFIX>_<SECTION>__<KEY>` environment variables.
    ///
    /// The double underscore separates section from key so that keys like
    /// `marker_suffix` survive intact.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Sets a dotted-key override, e.g. `("release.remote", "upstream")`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ParseError` if the key is not a valid path.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> Result<Self> {
        self.builder = self
            .builder
            .set_override(key, value)
            .map_err(|e| ConfigError::ParseError {
                path: format!("override {key}"),
                message: e.to_string(),
            })?;
        Ok(self)
    }

    /// Applies every override in order.
    ///
    /// # Errors
    ///
    /// Returns the first invalid key.
    pub fn set_all<K, V, I>(self, overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<config::Value>,
    {
        overrides
            .into_iter()
            .try_fold(self, |loader, (key, value)| loader.set(key.as_ref(), value))
    }

    /// Merges all sources into a validated [`Config`].
    ///
    /// # Errors
    ///
    /// Returns an error if a required file is missing, a file or environment
    /// value does not parse, a key is unknown, or validation fails.
    pub fn build(self) -> Result<Config> {
        let builder = match &self.env_prefix {
            Some(prefix) => self.builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            ),
            None => self.builder,
        };
        let mut config: Config = builder.build()?.try_deserialize()?;
        config.resolve_and_validate()?;
        Ok(config)
    }

    /// File layers in load order, as `(kind, path)`.
    #[must_use]
    pub fn loaded_files(&self) -> Vec<(String, PathBuf)> {
        self.sources
            .iter()
            .map(|(kind, path)| (kind.to_string(), path.clone()))
            .collect()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
