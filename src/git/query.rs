// packup-rs: Modpack Update & Release Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Read-only repository lookups. These go through gix and never spawn `git`.

use crate::error::PackResult;
use std::path::{Path, PathBuf};

use super::backend::{GitQuery, GixBackend};

#[must_use]
pub fn is_git_repo(path: &Path) -> bool {
    GixBackend::is_git_repo(path)
}

/// Top of the work tree containing `path`.
///
/// # Errors
///
/// `GitError` if no repository contains `path` or it is bare.
pub fn workdir(path: &Path) -> PackResult<PathBuf> {
    GixBackend::workdir(path)
}

/// `None` on a detached HEAD.
///
/// # Errors
///
/// `GitError` if discovery fails or HEAD cannot be read.
pub fn current_branch(path: &Path) -> PackResult<Option<String>> {
    GixBackend::current_branch(path)
}

/// Staged, unstaged and untracked changes all count.
///
/// # Errors
///
/// `GitError` if discovery or the status walk fails.
pub fn has_uncommitted_changes(path: &Path) -> PackResult<bool> {
    GixBackend::has_uncommitted_changes(path)
}
