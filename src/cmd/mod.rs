// packup-rs: Modpack Update & Release Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   update (default), list, config
//! ```

pub mod config;
pub mod list;
pub mod update;
