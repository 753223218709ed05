// packup-rs: Modpack Update & Release Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Spawning and exit code checks.

use crate::error::{ProcessError, Result};
use std::fmt::Write as _;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, error, trace};

use super::command::{Invocation, ProcessOutput, RunFlags, StreamMode};

fn stdio(mode: StreamMode) -> Stdio {
    if mode.contains(StreamMode::DISCARD) {
        Stdio::null()
    } else {
        Stdio::piped()
    }
}

impl Invocation {
    pub(super) fn display_name(&self) -> String {
        if let Some(label) = &self.label {
            return label.clone();
        }
        self.program
            .file_stem()
            .map_or_else(|| "process".to_string(), |s| s.to_string_lossy().into_owned())
    }

    /// Program and arguments as one line, arguments with spaces quoted.
    #[must_use]
    pub fn command_line(&self) -> String {
        self.args.iter().fold(
            self.program.display().to_string(),
            |mut line, arg| {
                let _ = if arg.contains(' ') {
                    write!(line, " \"{arg}\"")
                } else {
                    write!(line, " {arg}")
                };
                line
            },
        )
    }

    fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(stdio(self.stdout))
            .stderr(stdio(self.stderr))
            .kill_on_drop(true);
        if let Some(cwd) = &self.cwd {
            command.current_dir(cwd);
        }
        command
    }

    /// Runs to completion.
    ///
    /// # Errors
    ///
    /// Fails when the program cannot be spawned, its output cannot be
    /// collected, or it exits non-zero without [`RunFlags::ALLOW_FAILURE`].
    pub async fn run(self) -> Result<ProcessOutput> {
        let name = self.display_name();
        let line = self.command_line();
        match &self.cwd {
            Some(cwd) => debug!(cwd = %cwd.display(), cmd = %line, "exec"),
            None => debug!(cmd = %line, "exec"),
        }

        let mut child = self
            .to_command()
            .spawn()
            .map_err(|source| ProcessError::SpawnFailed {
                command: line.clone(),
                source,
            })?;
        trace!(process = %name, pid = ?child.id(), "spawned");

        let output = self.collect(&name, &line, &mut child).await?;
        trace!(process = %name, exit_code = output.exit_code(), "exited");

        if output.success() || self.flags.contains(RunFlags::ALLOW_FAILURE) {
            return Ok(output);
        }
        if !output.stderr().is_empty() {
            error!(process = %name, stderr = %output.stderr(), "process error output");
        }
        anyhow::bail!("{name} exited with code {}", output.exit_code())
    }
}
