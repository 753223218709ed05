// packup-rs: Modpack Update & Release Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend abstraction layer.
//!
//! ```text
//! GitQuery (read)     --> GixBackend (pure Rust gix)
//! GitMutation (write) --> ShellBackend (git CLI)
//! ```

use crate::error::{GitError, GixError, PackResult};
use std::path::{Path, PathBuf};

// --- Query Trait (Read-only operations) ---

/// Read-only git query operations.
pub trait GitQuery {
    /// Check if path is inside a git work tree.
    fn is_git_repo(path: &Path) -> bool;

    /// Top-level directory of the work tree containing `path`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if no repository is found or it is bare.
    fn workdir(path: &Path) -> PackResult<PathBuf>;

    /// Get current branch name (None if HEAD is detached).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository discovery or head resolution fails.
    fn current_branch(path: &Path) -> PackResult<Option<String>>;

    /// Check for uncommitted changes (staged, unstaged, or untracked files).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository discovery or status check fails.
    fn has_uncommitted_changes(path: &Path) -> PackResult<bool>;
}

// --- Mutation Trait (Write operations) ---

/// Git operations that modify repository state.
pub trait GitMutation {
    /// Initialize a new repository.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository initialization fails.
    fn init_repo(path: &Path) -> PackResult<()>;

    /// Set git config value.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the config value cannot be set.
    fn set_config(repo_path: &Path, key: &str, value: &str) -> PackResult<()>;

    /// Stage paths (relative to `repo_path`).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `git add` fails.
    fn add(repo_path: &Path, paths: &[PathBuf]) -> PackResult<()>;

    /// Remove paths from the index only. Unknown paths are ignored.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `git rm --cached` fails.
    fn remove_cached(repo_path: &Path, paths: &[PathBuf]) -> PackResult<()>;

    /// Commit the index and return the new HEAD id.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the commit fails (e.g. nothing staged).
    fn commit(repo_path: &Path, message: &str) -> PackResult<String>;

    /// Create an annotated tag on HEAD.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the tag exists or cannot be created.
    fn tag_annotated(repo_path: &Path, name: &str, message: &str) -> PackResult<()>;

    /// Push a refspec to a remote.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the push fails.
    fn push(repo_path: &Path, remote: &str, refspec: &str) -> PackResult<()>;
}

// --- GixBackend Implementation (Pure Rust) ---

/// Pure Rust git backend using gix.
///
/// Read-only; no subprocesses.
pub struct GixBackend;

fn discover(path: &Path) -> PackResult<gix::Repository> {
    Ok(gix::discover(path).map_err(|e| GitError::Gix(GixError::Discover(Box::new(e))))?)
}

impl GitQuery for GixBackend {
    fn is_git_repo(path: &Path) -> bool {
        gix::discover(path).is_ok()
    }

    fn workdir(path: &Path) -> PackResult<PathBuf> {
        let repo = discover(path)?;
        let workdir = repo
            .workdir()
            .ok_or(GitError::Gix(GixError::BareRepository))?;
        Ok(workdir.to_path_buf())
    }

    fn current_branch(path: &Path) -> PackResult<Option<String>> {
        let repo = discover(path)?;
        let head = repo
            .head_name()
            .map_err(|e| GitError::Gix(GixError::Head(e)))?;
        Ok(head.map(|name| name.shorten().to_string()))
    }

    fn has_uncommitted_changes(path: &Path) -> PackResult<bool> {
        use gix::status::UntrackedFiles;

        let repo = discover(path)?;

        let has_changes = repo
            .status(gix::progress::Discard)
            .map_err(|_| GitError::CommandFailed {
                command: "status".to_string(),
                message: "failed to prepare status check".to_string(),
            })?
            .untracked_files(UntrackedFiles::Files)
            .into_iter(None)
            .map_err(|_| GitError::CommandFailed {
                command: "status".to_string(),
                message: "failed to check repository status".to_string(),
            })?
            .next()
            .is_some();

        Ok(has_changes)
    }
}

// --- ShellBackend Implementation (Git CLI) ---

/// Shell-based git backend using git CLI.
///
/// Used for every write, so hooks, signing and credential helpers behave
/// as they do for the user.
pub struct ShellBackend;

impl ShellBackend {
    /// Runs git and returns its trimmed stdout.
    pub(crate) fn git_command(args: &[&str], cwd: &Path) -> PackResult<String> {
        Self::git_command_raw(args, cwd).map(|out| out.trim().to_string())
    }

    /// Runs git and returns stdout untouched. Sets `GCM_INTERACTIVE=never`
    /// and `GIT_TERMINAL_PROMPT=0`.
    fn git_command_raw(args: &[&str], cwd: &Path) -> PackResult<String> {
        use std::process::Command;

        let output = Command::new("git")
            .args(args)
            .current_dir(cwd)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .map_err(|e| std::io::Error::new(e.kind(), format!("failed to execute git: {e}")))?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Runs a git command that prints NUL-separated paths (`-z`).
    ///
    /// Only NUL separates entries; whitespace is part of a path.
    pub(crate) fn git_paths(args: &[&str], cwd: &Path) -> PackResult<Vec<PathBuf>> {
        let output = Self::git_command_raw(args, cwd)?;
        Ok(output
            .split('\0')
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .collect())
    }

    /// Runs `git <command> [flags] -- <paths>`.
    fn git_with_paths(
        command: &[&str],
        repo_path: &Path,
        paths: &[PathBuf],
    ) -> PackResult<()> {
        let path_strs = paths
            .iter()
            .map(|p| {
                p.to_str().ok_or_else(|| GitError::CommandFailed {
                    command: format!("git {}", command.join(" ")),
                    message: format!("invalid path: {}", p.display()),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut args = command.to_vec();
        args.push("--");
        args.extend(path_strs);
        Self::git_command(&args, repo_path)?;
        Ok(())
    }
}

impl GitMutation for ShellBackend {
    fn init_repo(path: &Path) -> PackResult<()> {
        Self::git_command(&["init", "--quiet"], path)?;
        Ok(())
    }

    fn set_config(repo_path: &Path, key: &str, value: &str) -> PackResult<()> {
        Self::git_command(&["config", key, value], repo_path)?;
        Ok(())
    }

    fn add(repo_path: &Path, paths: &[PathBuf]) -> PackResult<()> {
        Self::git_with_paths(&["add"], repo_path, paths)
    }

    fn remove_cached(repo_path: &Path, paths: &[PathBuf]) -> PackResult<()> {
        Self::git_with_paths(
            &["rm", "--cached", "--quiet", "--ignore-unmatch"],
            repo_path,
            paths,
        )
    }

    fn commit(repo_path: &Path, message: &str) -> PackResult<String> {
        Self::git_command(&["commit", "--quiet", "-m", message], repo_path)?;
        Self::git_command(&["rev-parse", "HEAD"], repo_path)
    }

    fn tag_annotated(repo_path: &Path, name: &str, message: &str) -> PackResult<()> {
        Self::git_command(&["tag", "-a", name, "-m", message], repo_path)?;
        Ok(())
    }

    fn push(repo_path: &Path, remote: &str, refspec: &str) -> PackResult<()> {
        Self::git_command(&["push", "--quiet", remote, refspec], repo_path)?;
        Ok(())
    }
}
