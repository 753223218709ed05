// packup-rs: Modpack Update & Release Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git command operations using shell backend.
//!
//! ```text
//! cmd.rs --> ShellBackend --> git (add, rm --cached, commit, tag, push, ls-files, diff)
//! ```
//!
//! Paths are relative to `repo_path`, which should be the work tree root.

use crate::error::PackResult;
use std::path::{Path, PathBuf};

use super::backend::{GitMutation, ShellBackend};

/// Initialize a new repository.
///
/// # Errors
///
/// Returns a `GitError` if repository initialization fails.
pub fn init_repo(path: &Path) -> PackResult<()> {
    ShellBackend::init_repo(path)
}

/// Set git config value.
///
/// # Errors
///
/// Returns a `GitError` if the config value cannot be set.
pub fn set_config(repo_path: &Path, key: &str, value: &str) -> PackResult<()> {
    ShellBackend::set_config(repo_path, key, value)
}

/// Untracked files that are not ignored.
///
/// # Errors
///
/// Returns a `GitError` if `git ls-files` fails.
pub fn untracked_files(repo_path: &Path) -> PackResult<Vec<PathBuf>> {
    ShellBackend::git_paths(
        &["ls-files", "-z", "--others", "--exclude-standard"],
        repo_path,
    )
}

/// Tracked files whose working tree copy differs from the index.
///
/// Deleted files are included.
///
/// # Errors
///
/// Returns a `GitError` if `git diff` fails.
pub fn modified_files(repo_path: &Path) -> PackResult<Vec<PathBuf>> {
    ShellBackend::git_paths(&["diff", "-z", "--name-only"], repo_path)
}

/// Stage paths.
///
/// # Errors
///
/// Returns a `GitError` if `git add` fails.
pub fn add(repo_path: &Path, paths: &[PathBuf]) -> PackResult<()> {
    ShellBackend::add(repo_path, paths)
}

/// Remove paths from the index, keeping the working tree.
///
/// # Errors
///
/// Returns a `GitError` if `git rm --cached` fails.
pub fn remove_cached(repo_path: &Path, paths: &[PathBuf]) -> PackResult<()> {
    ShellBackend::remove_cached(repo_path, paths)
}

/// Commit the index; returns the new HEAD id.
///
/// # Errors
///
/// Returns a `GitError` if the commit fails.
pub fn commit(repo_path: &Path, message: &str) -> PackResult<String> {
    ShellBackend::commit(repo_path, message)
}

/// Create an annotated tag on HEAD.
///
/// # Errors
///
/// Returns a `GitError` if the tag cannot be created.
pub fn tag_annotated(repo_path: &Path, name: &str, message: &str) -> PackResult<()> {
    ShellBackend::tag_annotated(repo_path, name, message)
}

/// Push a refspec to a remote.
///
/// # Errors
///
/// Returns a `GitError` if the push fails.
pub fn push(repo_path: &Path, remote: &str, refspec: &str) -> PackResult<()> {
    ShellBackend::push(repo_path, remote, refspec)
}
