// packup-rs: Modpack Update & Release Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The pack's git repository as a release target.
//!
//! ```text
//! GitRepository::discover(root)
//!   gix: root --> work tree top
//!
//! VersionControl
//!   untracked_files    ls-files -z --others --exclude-standard
//!   modified_files     diff -z --name-only
//!   stage              add -- <paths>
//!   remove_from_index  rm --cached --quiet --ignore-unmatch -- <paths>
//!   commit             commit -m, rev-parse HEAD
//!   create_tag         tag -a <name> -m <msg>
//!   push               push <remote> HEAD, push <remote> refs/tags/<tag>
//! ```
//!
//! Paths handed in are absolute or relative to the process directory; they
//! are rewritten relative to the work tree before reaching git. Listed paths
//! come back absolute.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use crate::error::{GitError, PackResult, Result};
use crate::release::VersionControl;

use super::{cmd, query};

/// A non-bare git work tree.
#[derive(Debug, Clone)]
pub struct GitRepository {
    workdir: PathBuf,
}

impl GitRepository {
    /// Finds the repository containing `path`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepoNotFound` if `path` is not inside a work tree.
    pub fn discover(path: &Path) -> PackResult<Self> {
        let canonical = std::fs::canonicalize(path)?;
        if !query::is_git_repo(&canonical) {
            return Err(GitError::RepoNotFound {
                path: path.display().to_string(),
            }
            .into());
        }
        let workdir = std::fs::canonicalize(query::workdir(&canonical)?)?;
        debug!(workdir = %workdir.display(), "found git repository");
        Ok(Self { workdir })
    }

    #[must_use]
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Whether the work tree has staged, unstaged or untracked changes.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the status check fails.
    pub fn has_uncommitted_changes(&self) -> PackResult<bool> {
        query::has_uncommitted_changes(&self.workdir)
    }

    /// Current branch name, `None` when HEAD is detached.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if HEAD cannot be read.
    pub fn current_branch(&self) -> PackResult<Option<String>> {
        query::current_branch(&self.workdir)
    }

    /// Rewrites `path` relative to the work tree.
    ///
    /// The parent is canonicalized so that deleted files still resolve.
    fn relative(&self, path: &Path) -> Result<PathBuf> {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };
        let parent = absolute
            .parent()
            .with_context(|| format!("'{}' has no parent directory", path.display()))?;
        let file_name = absolute
            .file_name()
            .with_context(|| format!("'{}' has no file name", path.display()))?;
        let parent = std::fs::canonicalize(parent)
            .with_context(|| format!("failed to resolve '{}'", parent.display()))?;
        let resolved = parent.join(file_name);
        let relative = resolved.strip_prefix(&self.workdir).with_context(|| {
            format!(
                "'{}' is outside the repository at '{}'",
                path.display(),
                self.workdir.display()
            )
        })?;
        Ok(relative.to_path_buf())
    }

    fn relative_all(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
        paths.iter().map(|p| self.relative(p)).collect()
    }

    fn absolute_all(&self, paths: Vec<PathBuf>) -> Vec<PathBuf> {
        paths.into_iter().map(|p| self.workdir.join(p)).collect()
    }
}

impl VersionControl for GitRepository {
    fn untracked_files(&self) -> Result<Vec<PathBuf>> {
        Ok(self.absolute_all(cmd::untracked_files(&self.workdir)?))
    }

    fn modified_files(&self) -> Result<Vec<PathBuf>> {
        Ok(self.absolute_all(cmd::modified_files(&self.workdir)?))
    }

    fn stage(&self, paths: &[PathBuf]) -> Result<()> {
        let relative = self.relative_all(paths)?;
        debug!(count = relative.len(), "staging files");
        cmd::add(&self.workdir, &relative)?;
        Ok(())
    }

    fn remove_from_index(&self, paths: &[PathBuf]) -> Result<()> {
        let relative = self.relative_all(paths)?;
        debug!(count = relative.len(), "removing files from index");
        cmd::remove_cached(&self.workdir, &relative)?;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<String> {
        Ok(cmd::commit(&self.workdir, message)?)
    }

    fn create_tag(&self, name: &str, message: &str) -> Result<()> {
        cmd::tag_annotated(&self.workdir, name, message)?;
        Ok(())
    }

    fn push(&self, remote: &str, tag: Option<&str>) -> Result<()> {
        cmd::push(&self.workdir, remote, "HEAD")
            .with_context(|| format!("failed to push HEAD to {remote}"))?;
        if let Some(tag) = tag {
            cmd::push(&self.workdir, remote, &format!("refs/tags/{tag}"))
                .with_context(|| format!("failed to push tag {tag} to {remote}"))?;
        }
        Ok(())
    }
}
