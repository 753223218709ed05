// packup-rs: Modpack Update & Release Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |            update / list / config
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, layered settings  |
//!              '-------------+-------------'
//!                            v
//!                         release
//!                 coordinator, push prompt
//!                 /          |          \
//!                v           v           v
//!             update       pack         git
//!          engine and    markers,    gix/CLI,
//!          journal       pack.toml   VersionControl
//!                |
//!                v
//!             packwiz (PackTool)
//!
//!   +-----------------------------------------+
//!   |  core     process runner                |
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod git;
pub mod logging;
pub mod pack;
pub mod packwiz;
pub mod release;
pub mod update;

#[cfg(test)]
mod test_utils;
