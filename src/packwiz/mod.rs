// packup-rs: Modpack Update & Release Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! External package tool adapter.
//!
//! ```text
//! PackTool (trait)
//!   refresh_index()     packwiz refresh              best-effort
//!   update_one(id)      packwiz update <id> -y       never fails on exit code
//!   update_all()        packwiz update --all -y      never fails on exit code
//!
//! PackwizTool::resolve(config, root)
//!   <root>/<tool.packwiz> --> PATH lookup --> ExecutableNotFound
//! ```

use std::path::{Path, PathBuf};

use futures_util::future::BoxFuture;
use tracing::debug;

use crate::config::types::ToolConfig;
use crate::core::process::{Invocation, ProcessOutput, RunFlags, locate};
use crate::error::{ProcessError, Result};

/// Operations the update engine needs from the package tool.
///
/// Update commands return the raw output for the caller to classify. A
/// non-zero exit status is not an error; only spawn and I/O failures are.
pub trait PackTool: Send + Sync {
    /// Returns the name of this tool (for logging).
    fn name(&self) -> &str;

    /// Rebuilds the tool's index. Failures are logged and swallowed.
    fn refresh_index(&self) -> BoxFuture<'_, ()>;

    /// Updates a single item non-interactively.
    fn update_one<'a>(&'a self, identifier: &'a str) -> BoxFuture<'a, Result<ProcessOutput>>;

    /// Updates every item non-interactively.
    fn update_all(&self) -> BoxFuture<'_, Result<ProcessOutput>>;
}

/// The packwiz command line tool.
#[derive(Debug, Clone)]
pub struct PackwizTool {
    binary: PathBuf,
    root: PathBuf,
}

impl PackwizTool {
    /// Creates a tool running `binary` inside the pack `root`.
    pub fn new(binary: impl AsRef<Path>, root: impl AsRef<Path>) -> Self {
        Self {
            binary: binary.as_ref().to_path_buf(),
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Locates the packwiz binary for a pack.
    ///
    /// Absolute paths are used as is. Otherwise the configured path is tried
    /// relative to the pack root first (packs often ship `./packwiz`), then
    /// looked up on PATH.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExecutableNotFound` if no candidate exists.
    pub fn resolve(config: &ToolConfig, root: &Path) -> Result<Self> {
        let configured = &config.packwiz;

        if configured.is_absolute() {
            if configured.is_file() {
                return Ok(Self::new(configured, root));
            }
        } else {
            let local = root.join(configured);
            if local.is_file() {
                debug!(path = %local.display(), "using pack-local packwiz");
                return Ok(Self::new(local, root));
            }
            if let Some(found) = locate(&configured.to_string_lossy()) {
                debug!(path = %found.display(), "using packwiz from PATH");
                return Ok(Self::new(found, root));
            }
        }

        Err(ProcessError::ExecutableNotFound {
            name: configured.display().to_string(),
        }
        .into())
    }

    /// Returns the resolved binary.
    #[must_use]
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> &Path {
        &self.root
    }

    fn command(&self) -> Invocation {
        Invocation::new(&self.binary)
            .label("packwiz")
            .cwd(&self.root)
    }

    async fn refresh(&self) {
        let result = self.command().arg("refresh").quiet().run().await;
        if let Err(e) = result {
            debug!(error = %e, "index refresh failed; continuing");
        }
    }

    async fn update(&self, args: &[&str]) -> Result<ProcessOutput> {
        self.command()
            .arg("update")
            .args(args)
            .arg("-y")
            .capture_output()
            .flag(RunFlags::ALLOW_FAILURE)
            .run()
            .await
    }
}

impl PackTool for PackwizTool {
    fn name(&self) -> &'static str {
        "packwiz"
    }

    fn refresh_index(&self) -> BoxFuture<'_, ()> {
        Box::pin(self.refresh())
    }

    fn update_one<'a>(&'a self, identifier: &'a str) -> BoxFuture<'a, Result<ProcessOutput>> {
        Box::pin(async move { self.update(&[identifier]).await })
    }

    fn update_all(&self) -> BoxFuture<'_, Result<ProcessOutput>> {
        Box::pin(async move { self.update(&["--all"]).await })
    }
}

#[cfg(test)]
mod tests;
