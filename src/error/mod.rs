// packup-rs: Modpack Update & Release Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error types.
//!
//! Commands return `anyhow::Result` and attach context as they go. The
//! domain layers return [`PackResult`] so callers can match on what failed:
//!
//! ```text
//! PackError ── Git      (RepoNotFound, CommandFailed, Gix)
//!           ├─ Config   (ParseError, MissingKey, InvalidValue)
//!           ├─ Process  (ExecutableNotFound, SpawnFailed, OutputError)
//!           ├─ Marker   (DirectoryUnreadable, MalformedRecord, Conflict, Rename)
//!           ├─ Version  (InvalidVersion)
//!           ├─ Manifest (Read, Parse, MissingVersion, Write)
//!           └─ Io
//! ```
//!
//! Every variant holds a `Box`, so a `PackResult<()>` stays two words wide.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = anyhow::Result<T>;

pub type PackResult<T> = std::result::Result<T, PackError>;

#[derive(Debug, Error)]
pub enum PackError {
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    #[error("marker error: {0}")]
    Marker(#[from] Box<MarkerError>),

    #[error("version error: {0}")]
    Version(#[from] Box<VersionError>),

    #[error("manifest error: {0}")]
    Manifest(#[from] Box<ManifestError>),

    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

/// `From<E>` for each unboxed sub-error, so `?` works without `Box::new`.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for PackError {
                fn from(err: $error) -> Self {
                    Self::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    ConfigError => Config,
    ProcessError => Process,
    MarkerError => Marker,
    VersionError => Version,
    ManifestError => Manifest,
    std::io::Error => Io,
}

/// Failures reported by gix on the read side.
#[derive(Debug, Error)]
pub enum GixError {
    #[error("failed to discover repository: {0}")]
    Discover(#[from] Box<gix::discover::Error>),

    #[error("failed to access index: {0}")]
    Index(#[from] gix::worktree::open_index::Error),

    #[error("failed to get head reference: {0}")]
    Head(#[from] gix::reference::find::existing::Error),

    #[error("repository has no worktree (bare repository)")]
    BareRepository,
}

#[derive(Debug, Error)]
pub enum GitError {
    #[error("repository not found: {path}")]
    RepoNotFound { path: String },

    /// A `git` subprocess exited non-zero; `message` is its stderr.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    #[error("gix error: {0}")]
    Gix(#[from] GixError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    /// `path` names the file, or `override <key>` for a CLI override.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read output from process '{command}': {message}")]
    OutputError { command: String, message: String },
}

/// Errors from the outdated-marker store and the rename journal.
#[derive(Debug, Error)]
pub enum MarkerError {
    /// The mods directory could not be listed.
    #[error("cannot read mods directory '{path}': {source}")]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A marker file is not a valid record.
    #[error("malformed outdated marker '{path}': {message}")]
    MalformedRecord { path: PathBuf, message: String },

    /// Both the marked and the active form of an item exist.
    #[error("'{active}' already exists next to its outdated marker")]
    Conflict { active: PathBuf },

    /// Renaming between the marked and active forms failed.
    #[error("failed to rename '{from}' to '{to}': {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Semantic version errors.
#[derive(Debug, Error)]
pub enum VersionError {
    /// The leading `major.minor.patch` components did not match.
    #[error("invalid semantic version format: {0}")]
    InvalidVersion(String),
}

/// Pack manifest (`pack.toml`) errors.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Failed to read the manifest file.
    #[error("failed to read manifest '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest is not valid TOML.
    #[error("failed to parse manifest '{path}': {message}")]
    Parse { path: PathBuf, message: String },

    /// The manifest has no string `version` field.
    #[error("manifest '{path}' has no string 'version' field")]
    MissingVersion { path: PathBuf },

    /// Failed to write the manifest back.
    #[error("failed to write manifest '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests;
