// packup-rs: Modpack Update & Release Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations module.
//!
//! ```text
//!         repository.rs (VersionControl)
//!              /            \
//!        query.rs          cmd.rs
//!             |               |
//!      ,------+---------------+------,
//!      |      backend (traits)       |
//!      '------+---------------+------'
//!             |               |
//!             v               v
//!         GitQuery       GitMutation
//!       (gix, read)      (CLI, write)
//!             |               |
//!             v               v
//!        GixBackend      ShellBackend
//!        .workdir        .add / rm --cached
//!        .branch         .commit / tag -a
//!        .tracked        .push
//!        .uncommitted
//! ```
//!
//! **`GixBackend`**: pure Rust, no subprocess, read-only.
//! **`ShellBackend`**: git CLI for every write, so hooks and credentials apply.

pub mod backend;
pub mod cmd;
pub mod query;
pub mod repository;

pub use repository::GitRepository;

#[cfg(test)]
mod tests;
