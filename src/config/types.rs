// packup-rs: Modpack Update & Release Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for packup-rs.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, PathsConfig, ToolConfig, ReleaseConfig
//! ```
//!
//! # Push Policy
//!
//! ```text
//! PushPolicy: Ask (default) | Always | Never
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::logging::LogLevel;

/// Whether the release commit and tag are pushed to the remote.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PushPolicy {
    /// Prompt the operator once.
    #[default]
    Ask,
    /// Push without asking.
    Always,
    /// Never push.
    Never,
}

impl std::fmt::Display for PushPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ask => write!(f, "ask"),
            Self::Always => write!(f, "always"),
            Self::Never => write!(f, "never"),
        }
    }
}

impl std::str::FromStr for PushPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ask" => Ok(Self::Ask),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            _ => Err(ConfigError::InvalidValue {
                section: "release".to_string(),
                key: "push".to_string(),
                message: format!("expected 'ask', 'always', or 'never', got '{s}'"),
            }),
        }
    }
}

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Console (stderr) log level (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file (no file logging if unset).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
        }
    }
}

/// External package tool settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// packwiz executable, looked up in the pack root first, then PATH.
    pub packwiz: PathBuf,
    /// Filename suffix marking a mod as outdated.
    pub marker_suffix: String,
    /// Manifest suffixes stripped from a mod filename to get its identifier.
    pub manifest_suffixes: Vec<String>,
    /// Token in `update --all` output lines that marks an applied change.
    pub change_delimiter: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            packwiz: PathBuf::from(if cfg!(windows) {
                "packwiz.exe"
            } else {
                "packwiz"
            }),
            marker_suffix: ".outdated".to_string(),
            manifest_suffixes: vec![".pw.toml".to_string()],
            change_delimiter: "->".to_string(),
        }
    }
}

/// Release (commit/tag/push) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReleaseConfig {
    /// Remote the commit and tag are pushed to.
    pub remote: String,
    /// Conventional-commit type used as the commit subject prefix.
    pub commit_prefix: String,
    /// Push behaviour after the release commit.
    pub push: PushPolicy,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            commit_prefix: "chore".to_string(),
            push: PushPolicy::default(),
        }
    }
}
