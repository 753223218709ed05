// packup-rs: Modpack Update & Release Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Single-item update attempt with rollback.
//!
//! ```text
//! attempt(marker)
//!   RenameJournal::begin      conflict check, marked --> active
//!   refresh_index()           best-effort
//!   update_one(identifier)
//!     Err  --> rollback, refresh, return Err (fatal)
//!     Ok   --> classify(stdout, record.filename)
//!                match    --> commit           Success
//!                no match --> rollback, refresh Failure { second-to-last line }
//! ```
//!
//! Whatever happens, the item ends up in exactly one form on disk and the
//! index has been refreshed after any rollback.

pub mod journal;


use std::path::PathBuf;

use anyhow::Context;
use tracing::{info, warn};

use crate::core::process::ProcessOutput;
use crate::error::Result;
use crate::pack::OutdatedMarker;
use crate::packwiz::PackTool;

pub use journal::{ItemState, RenameJournal};

/// Result of one update attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Last meaningful line of tool output, if there was one.
    Failure { diagnostic: Option<String> },
}

/// Per-item record kept by the release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateResult {
    /// Identifier passed to the package tool.
    pub identifier: String,
    /// Display name from the marker record.
    pub name: String,
    /// Path of the marker file before the attempt.
    pub marker: PathBuf,
    pub outcome: Outcome,
}

impl UpdateResult {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success)
    }
}

/// True if the tool reported the expected artifact.
///
/// The tool prints `old.jar -> new.jar` for applied updates and nothing for
/// unchanged items, so the new filename anywhere in stdout means success.
#[must_use]
pub fn classify(output: &ProcessOutput, expected_filename: &str) -> bool {
    output.stdout().contains(expected_filename)
}

/// Second-to-last line of right-trimmed output.
///
/// The final line is usually a prompt or summary; the one before it
/// carries the reason.
#[must_use]
pub fn second_to_last_line(stdout: &str) -> Option<String> {
    let lines: Vec<&str> = stdout.trim_end().split('\n').collect();
    (lines.len() >= 2).then(|| lines[lines.len() - 2].trim_end_matches('\r').to_string())
}

/// Drives update attempts through a package tool.
pub struct UpdateEngine<'a, T: PackTool + ?Sized> {
    tool: &'a T,
    manifest_suffixes: Vec<String>,
}

impl<'a, T: PackTool + ?Sized> UpdateEngine<'a, T> {
    pub fn new(tool: &'a T, manifest_suffixes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            tool,
            manifest_suffixes: manifest_suffixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Attempts to update one outdated item.
    ///
    /// A negative classification is an `Ok` with `Outcome::Failure`.
    ///
    /// # Errors
    ///
    /// - The active form already exists (nothing is touched).
    /// - The initial rename fails (nothing was mutated).
    /// - The tool could not be run, or the rollback rename failed. The item
    ///   is rolled back first where possible.
    pub async fn attempt(&self, marker: &OutdatedMarker) -> Result<UpdateResult> {
        let identifier = marker.identifier(&self.manifest_suffixes).to_string();
        let record = marker.record();

        let mut journal = RenameJournal::begin(marker)
            .with_context(|| format!("failed to activate {}", marker.file_name()))?;

        info!(name = %record.name, "updating");
        self.tool.refresh_index().await;

        let output = match self.tool.update_one(&identifier).await {
            Ok(output) => output,
            Err(e) => return Err(self.abort(&mut journal, &identifier, e).await),
        };

        journal.verifying();
        let outcome = if classify(&output, &record.filename) {
            journal.commit();
            info!(name = %record.name, filename = %record.filename, "updated");
            Outcome::Success
        } else {
            let diagnostic = second_to_last_line(output.stdout());
            match &diagnostic {
                Some(line) => warn!(name = %record.name, "update failed: {line}"),
                None => warn!(name = %record.name, "update failed"),
            }

            let rollback = journal.rollback();
            self.tool.refresh_index().await;
            rollback.with_context(|| format!("failed to roll back {identifier}"))?;
            Outcome::Failure { diagnostic }
        };

        if !journal.verify() {
            warn!(item = %identifier, state = %journal.state(), "mod files do not match the update state");
        }

        Ok(UpdateResult {
            identifier,
            name: record.name.clone(),
            marker: marker.marked_path(),
            outcome,
        })
    }

    /// Rolls back after a tool error and returns the error to propagate.
    async fn abort(
        &self,
        journal: &mut RenameJournal,
        identifier: &str,
        error: anyhow::Error,
    ) -> anyhow::Error {
        let rollback = journal.rollback();
        self.tool.refresh_index().await;

        let error = error.context(format!("{} update of {identifier} failed", self.tool.name()));
        match rollback {
            Ok(()) => error,
            Err(rollback_err) => {
                anyhow::anyhow!("{error:#}; rollback also failed: {rollback_err}")
            }
        }
    }
}
