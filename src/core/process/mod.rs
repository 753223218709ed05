// packup-rs: Modpack Update & Release Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async subprocesses.
//!
//! ```text
//! Invocation::new(packwiz).arg("update").capture_output()
//!   .run() --> tokio Command, stdin null
//!          --> one reader task per piped stream (io.rs)
//!          --> exit code check unless ALLOW_FAILURE
//!          --> ProcessOutput
//! ```

mod command;
mod io;
mod runner;

pub use command::{Invocation, ProcessOutput, RunFlags, StreamMode, locate};
