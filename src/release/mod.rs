// packup-rs: Modpack Update & Release Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Release coordination.
//!
//! ```text
//! run(vcs, decision)
//!   preflight       manifest version parses (unless skipping commit)
//!   markers         list_outdated() --> attempt() each, in order
//!   bulk pass       update_all(), lines with "->" --> "<id>: ..."
//!   summary
//!   skip_commit?    --> Skipped
//!   nothing?        --> NothingUpdated
//!   bump pack.toml
//!   stage           untracked + modified (existing) ; rm --cached removed markers
//!   commit          "<prefix>: updated N mods\n\nUpdated mods:\n- a\n- b\n"
//!   tag             "<version>"            (warn on failure)
//!   push            HEAD + tag, if decided (warn on failure)
//! ```

pub mod prompt;


use std::path::{Path, PathBuf};

use anyhow::Context;
use bon::Builder;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::pack::{MarkerStore, PackManifest, bump_manifest};
use crate::packwiz::PackTool;
use crate::update::{Outcome, UpdateEngine, UpdateResult};

pub use prompt::{ConsolePrompt, FixedDecision, PushDecision, decision_for};

/// Version control operations needed for a release.
///
/// Paths are absolute or relative to the process working directory.
pub trait VersionControl {
    /// Files not tracked and not ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be queried.
    fn untracked_files(&self) -> Result<Vec<PathBuf>>;

    /// Tracked files with unstaged changes, deleted ones included.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be queried.
    fn modified_files(&self) -> Result<Vec<PathBuf>>;

    /// Adds paths to the index.
    ///
    /// # Errors
    ///
    /// Returns an error if staging fails.
    fn stage(&self, paths: &[PathBuf]) -> Result<()>;

    /// Removes paths from the index, leaving the working tree alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the index cannot be updated.
    fn remove_from_index(&self, paths: &[PathBuf]) -> Result<()>;

    /// Commits the index and returns the new commit id.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit fails.
    fn commit(&self, message: &str) -> Result<String>;

    /// Creates an annotated tag on HEAD.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag cannot be created (e.g. it exists).
    fn create_tag(&self, name: &str, message: &str) -> Result<()>;

    /// Pushes HEAD and then the tag, if any, to `remote`.
    ///
    /// # Errors
    ///
    /// Returns an error if either push fails.
    fn push(&self, remote: &str, tag: Option<&str>) -> Result<()>;
}

/// Release settings.
#[derive(Debug, Clone, Builder)]
pub struct ReleaseOptions {
    /// Update only; no bump and no version control.
    #[builder(default)]
    pub skip_commit: bool,
    #[builder(into, default = "origin".to_string())]
    pub remote: String,
    #[builder(into, default = "chore".to_string())]
    pub commit_prefix: String,
    #[builder(into, default = "->".to_string())]
    pub change_delimiter: String,
    #[builder(default = vec![".pw.toml".to_string()])]
    pub manifest_suffixes: Vec<String>,
}

impl ReleaseOptions {
    #[must_use]
    pub fn from_config(config: &Config, skip_commit: bool) -> Self {
        Self::builder()
            .skip_commit(skip_commit)
            .remote(config.release.remote.clone())
            .commit_prefix(config.release.commit_prefix.clone())
            .change_delimiter(config.tool.change_delimiter.clone())
            .manifest_suffixes(config.tool.manifest_suffixes.clone())
            .build()
    }
}

/// Everything that was updated during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseRecord {
    /// Marker-driven attempts, in run order.
    pub items: Vec<UpdateResult>,
    /// Identifiers reported by the bulk pass.
    pub bulk: Vec<String>,
}

impl ReleaseRecord {
    /// Updated identifiers: marker successes first, then the bulk pass,
    /// without duplicates.
    #[must_use]
    pub fn updated_identifiers(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::new();
        let successes = self
            .items
            .iter()
            .filter(|r| r.is_success())
            .map(|r| r.identifier.as_str());
        for id in successes.chain(self.bulk.iter().map(String::as_str)) {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }

    #[must_use]
    pub fn updated_count(&self) -> usize {
        self.updated_identifiers().len()
    }

    /// Marker files renamed away by successful updates.
    pub fn removed_markers(&self) -> impl Iterator<Item = &Path> {
        self.items
            .iter()
            .filter(|r| r.is_success())
            .map(|r| r.marker.as_path())
    }

    pub fn failures(&self) -> impl Iterator<Item = &UpdateResult> {
        self.items.iter().filter(|r| !r.is_success())
    }
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// `skip_commit` was set.
    Skipped,
    /// Nothing was updated; nothing was written.
    NothingUpdated,
    Released {
        version: String,
        commit: String,
        tagged: bool,
        pushed: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseReport {
    pub record: ReleaseRecord,
    pub outcome: ReleaseOutcome,
}

/// Identifiers from bulk update output.
///
/// Each line containing `delimiter` contributes the trimmed text before its
/// first `:`. Empty names are skipped.
#[must_use]
pub fn parse_bulk_output(stdout: &str, delimiter: &str) -> Vec<String> {
    stdout
        .lines()
        .filter(|line| line.contains(delimiter))
        .filter_map(|line| line.split(':').next())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

/// Release commit message listing every updated identifier.
#[must_use]
pub fn commit_message<S: AsRef<str>>(prefix: &str, identifiers: &[S]) -> String {
    let list = identifiers
        .iter()
        .map(|id| format!("- {}", id.as_ref()))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "{prefix}: updated {} mods\n\nUpdated mods:\n{list}\n",
        identifiers.len()
    )
}

/// Drives a full update-and-release run.
pub struct ReleaseCoordinator<'a, T: PackTool + ?Sized> {
    tool: &'a T,
    store: MarkerStore,
    manifest: PathBuf,
    options: ReleaseOptions,
}

impl<'a, T: PackTool + ?Sized> ReleaseCoordinator<'a, T> {
    pub fn new(
        tool: &'a T,
        store: MarkerStore,
        manifest: impl AsRef<Path>,
        options: ReleaseOptions,
    ) -> Self {
        Self {
            tool,
            store,
            manifest: manifest.as_ref().to_path_buf(),
            options,
        }
    }

    /// Runs the updates and, unless skipped or empty, the release.
    ///
    /// `vcs` may be `None` only when `skip_commit` is set.
    ///
    /// # Errors
    ///
    /// - The manifest cannot be loaded or its version is invalid (checked
    ///   before any mutation when committing).
    /// - A marker is malformed.
    /// - An update attempt fails fatally.
    /// - Bumping, staging or committing fails.
    ///
    /// Tag, push and bulk-pass failures are logged, not returned.
    pub async fn run<V, D>(&self, vcs: Option<&V>, decision: &mut D) -> Result<ReleaseReport>
    where
        V: VersionControl + ?Sized,
        D: PushDecision + ?Sized,
    {
        let vcs = if self.options.skip_commit {
            None
        } else {
            let vcs = vcs.context("version control is required unless commits are skipped")?;
            self.preflight()?;
            Some(vcs)
        };

        let record = self.update_all_markers().await?;
        report(&record);

        let Some(vcs) = vcs else {
            info!("skipping commit");
            return Ok(ReleaseReport {
                record,
                outcome: ReleaseOutcome::Skipped,
            });
        };

        if record.updated_count() == 0 {
            info!("nothing updated; no release");
            return Ok(ReleaseReport {
                record,
                outcome: ReleaseOutcome::NothingUpdated,
            });
        }

        let outcome = self.release(&record, vcs, decision)?;
        Ok(ReleaseReport { record, outcome })
    }

    fn preflight(&self) -> Result<()> {
        let manifest = PackManifest::load(&self.manifest)?;
        let version = manifest
            .pack_version()
            .with_context(|| format!("invalid version in {}", self.manifest.display()))?;
        debug!(%version, "current pack version");
        Ok(())
    }

    async fn update_all_markers(&self) -> Result<ReleaseRecord> {
        let markers = self.store.list_outdated()?;
        info!(count = markers.len(), "outdated mods");

        let engine = UpdateEngine::new(self.tool, self.options.manifest_suffixes.iter().cloned());
        let mut record = ReleaseRecord::default();
        for marker in markers.values() {
            record.items.push(engine.attempt(marker).await?);
        }

        match self.tool.update_all().await {
            Ok(output) => {
                record.bulk = parse_bulk_output(output.stdout(), &self.options.change_delimiter);
            }
            Err(e) => warn!(error = %format!("{e:#}"), "bulk update failed"),
        }

        Ok(record)
    }

    fn release<V, D>(&self, record: &ReleaseRecord, vcs: &V, decision: &mut D) -> Result<ReleaseOutcome>
    where
        V: VersionControl + ?Sized,
        D: PushDecision + ?Sized,
    {
        let bump = bump_manifest(&self.manifest)?;
        let version = bump.to;

        stage_changes(record, vcs)?;

        let ids = record.updated_identifiers();
        let message = commit_message(&self.options.commit_prefix, &ids);
        let commit = vcs.commit(&message).context("failed to commit release")?;
        info!(%commit, %version, "committed release");

        let tagged = match vcs.create_tag(&version, &format!("Release version {version}")) {
            Ok(()) => {
                info!(tag = %version, "created tag");
                true
            }
            Err(e) => {
                warn!(tag = %version, error = %format!("{e:#}"), "failed to create tag");
                false
            }
        };

        let remote = &self.options.remote;
        let pushed = if decision.confirm_push(remote, &version) {
            let tag = tagged.then_some(version.as_str());
            match vcs.push(remote, tag) {
                Ok(()) => {
                    info!(%remote, "pushed release");
                    true
                }
                Err(e) => {
                    warn!(%remote, error = %format!("{e:#}"), "failed to push");
                    false
                }
            }
        } else {
            info!("not pushing");
            false
        };

        Ok(ReleaseOutcome::Released {
            version,
            commit,
            tagged,
            pushed,
        })
    }
}

/// Stages new and modified files and drops removed markers from the index.
fn stage_changes<V: VersionControl + ?Sized>(record: &ReleaseRecord, vcs: &V) -> Result<()> {
    let mut to_stage = vcs.untracked_files()?;
    to_stage.extend(vcs.modified_files()?.into_iter().filter(|p| p.exists()));
    if !to_stage.is_empty() {
        debug!(count = to_stage.len(), "staging");
        vcs.stage(&to_stage).context("failed to stage changes")?;
    }

    let removed: Vec<PathBuf> = record
        .removed_markers()
        .filter(|p| !p.exists())
        .map(Path::to_path_buf)
        .collect();
    if !removed.is_empty() {
        debug!(count = removed.len(), "removing markers from index");
        vcs.remove_from_index(&removed)
            .context("failed to remove markers from index")?;
    }
    Ok(())
}

fn report(record: &ReleaseRecord) {
    for failure in record.failures() {
        if let Outcome::Failure { diagnostic } = &failure.outcome {
            info!(
                name = %failure.name,
                reason = diagnostic.as_deref().unwrap_or("-"),
                "not updated"
            );
        }
    }

    let ids = record.updated_identifiers();
    info!(count = ids.len(), mods = %ids.join(", "), "updated mods");
}
