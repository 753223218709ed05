// packup-rs: Modpack Update & Release Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Update command: the default action.
//!
//! ```text
//! PackwizTool::resolve --> MarkerStore --> GitRepository (unless --skip-commit)
//!                              |
//!                              v
//!              ReleaseCoordinator::run(vcs, decision)
//! ```

use anyhow::Context;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::git::GitRepository;
use crate::pack::MarkerStore;
use crate::packwiz::PackwizTool;
use crate::release::{ReleaseCoordinator, ReleaseOptions, ReleaseOutcome, decision_for};

/// Updates outdated mods and, unless `skip_commit`, releases the result.
///
/// # Errors
///
/// Returns an error if the tool or the repository cannot be found, or if the
/// run fails fatally.
pub async fn run_update_command(config: &Config, skip_commit: bool) -> Result<()> {
    let root = config.paths.root()?;
    let tool = PackwizTool::resolve(&config.tool, root)?;
    debug!(packwiz = %tool.binary().display(), root = %root.display(), "resolved pack tool");
    let store = MarkerStore::new(config.paths.mods_dir()?, config.tool.marker_suffix.clone());
    let options = ReleaseOptions::from_config(config, skip_commit);

    let repo = if skip_commit {
        None
    } else {
        let repo = GitRepository::discover(root)
            .with_context(|| format!("pack root '{}' is not in a git repository", root.display()))?;
        match repo.current_branch()? {
            Some(branch) => info!(%branch, workdir = %repo.workdir().display(), "release target"),
            None => warn!("HEAD is detached; the release commit will not be on a branch"),
        }
        if repo.has_uncommitted_changes()? {
            warn!(
                workdir = %repo.workdir().display(),
                "repository has uncommitted changes; they will be part of the release commit"
            );
        }
        Some(repo)
    };

    let coordinator =
        ReleaseCoordinator::new(&tool, store, config.paths.manifest_path()?, options);
    let mut decision = decision_for(config.release.push);
    let report = coordinator
        .run(repo.as_ref(), decision.as_mut())
        .await?;

    match report.outcome {
        ReleaseOutcome::Skipped => info!(
            updated = report.record.updated_count(),
            "done (commit skipped)"
        ),
        ReleaseOutcome::NothingUpdated => info!("done (nothing to release)"),
        ReleaseOutcome::Released {
            version,
            commit,
            tagged,
            pushed,
        } => info!(%version, %commit, tagged, pushed, "released"),
    }
    Ok(())
}
