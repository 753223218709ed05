// packup-rs: Modpack Update & Release Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core process management.
//!
//! ```text
//!      core
//!       |
//!       v
//!    process
//!       |
//!    Builder --> run() --> ProcessOutput
//!    which cache
//! ```

pub mod process;
