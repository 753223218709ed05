// packup-rs: Modpack Update & Release Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-item state and the rename undo record.
//!
//! ```text
//!            begin()            update_one()        classify
//! Outdated ---------> Renamed -------------> Verifying --+--> Updated     (commit)
//!                        |                               |
//!                        +--------- error ---------------+--> RolledBack  (rollback)
//! ```
//!
//! Marked form on disk: Outdated, RolledBack.
//! Active form on disk: Renamed, Verifying, Updated.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::error::{MarkerError, PackResult};
use crate::pack::OutdatedMarker;

/// Where one item is in its update attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemState {
    Outdated,
    Renamed,
    Verifying,
    Updated,
    RolledBack,
}

impl ItemState {
    /// True if the item is expected in its active (unmarked) form.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Renamed | Self::Verifying | Self::Updated)
    }
}

impl fmt::Display for ItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Outdated => "outdated",
            Self::Renamed => "renamed",
            Self::Verifying => "verifying",
            Self::Updated => "updated",
            Self::RolledBack => "rolled back",
        };
        f.write_str(s)
    }
}

/// Undo record for the marked → active rename of one item.
#[derive(Debug)]
pub struct RenameJournal {
    marked: PathBuf,
    active: PathBuf,
    state: ItemState,
}

impl RenameJournal {
    /// Records an item without touching the filesystem.
    pub fn new(marked: impl AsRef<Path>, active: impl AsRef<Path>) -> Self {
        Self {
            marked: marked.as_ref().to_path_buf(),
            active: active.as_ref().to_path_buf(),
            state: ItemState::Outdated,
        }
    }

    /// Activates a marked item: `Outdated → Renamed`.
    ///
    /// # Errors
    ///
    /// - `MarkerError::Conflict` if the active form already exists. Nothing
    ///   is renamed.
    /// - `MarkerError::Rename` if the rename fails. Nothing was mutated.
    pub fn begin(marker: &OutdatedMarker) -> PackResult<Self> {
        let mut journal = Self::new(marker.marked_path(), marker.active_path());
        if journal.active.exists() {
            return Err(MarkerError::Conflict {
                active: journal.active,
            }
            .into());
        }

        rename(&journal.marked, &journal.active)?;
        journal.transition(ItemState::Renamed);
        Ok(journal)
    }

    /// The tool has run and its output is being classified.
    pub fn verifying(&mut self) {
        self.transition(ItemState::Verifying);
    }

    /// Keeps the item active for good: `→ Updated`.
    pub fn commit(&mut self) {
        self.transition(ItemState::Updated);
    }

    /// Restores the marked form: `→ RolledBack`.
    ///
    /// Does nothing if the item was never renamed or is already rolled back.
    ///
    /// # Errors
    ///
    /// Returns `MarkerError::Rename` if the file cannot be renamed back; the
    /// state is left unchanged.
    pub fn rollback(&mut self) -> PackResult<()> {
        if !self.state.is_active() {
            return Ok(());
        }
        rename(&self.active, &self.marked)?;
        self.transition(ItemState::RolledBack);
        Ok(())
    }

    #[must_use]
    pub const fn state(&self) -> ItemState {
        self.state
    }

    /// Checks that exactly one filename form exists and that it is the one
    /// the current state implies.
    #[must_use]
    pub fn verify(&self) -> bool {
        let marked = self.marked.is_file();
        let active = self.active.is_file();
        if self.state.is_active() {
            active && !marked
        } else {
            marked && !active
        }
    }

    fn transition(&mut self, next: ItemState) {
        trace!(item = %self.active.display(), from = %self.state, to = %next, "state");
        self.state = next;
    }
}

fn rename(from: &Path, to: &Path) -> PackResult<()> {
    std::fs::rename(from, to).map_err(|source| {
        MarkerError::Rename {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        }
        .into()
    })
}
