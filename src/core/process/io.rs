// packup-rs: Modpack Update & Release Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Output streaming for child processes.
//!
//! ```text
//! collect()
//!   spawn read_stream(stdout) ─┐
//!   spawn read_stream(stderr) ─┤  each: line → trace!, keep if KEEP
//!   child.wait()               │
//!   join readers <─────────────┘
//!   └─> ProcessOutput
//! ```

use crate::error::{ProcessError, Result};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;
use tokio::task::JoinHandle;
use tracing::trace;

use super::command::{Invocation, ProcessOutput, StreamMode};

impl Invocation {
    /// Streams the child's output while waiting for it to exit.
    pub(super) async fn collect(
        &self,
        name: &str,
        cmd_line: &str,
        child: &mut Child,
    ) -> Result<ProcessOutput> {
        let stdout_reader = child
            .stdout
            .take()
            .map(|out| spawn_reader(out, name, "stdout", self.stdout));
        let stderr_reader = child
            .stderr
            .take()
            .map(|err| spawn_reader(err, name, "stderr", self.stderr));

        let status = child.wait().await.map_err(|e| ProcessError::OutputError {
            command: cmd_line.to_string(),
            message: e.to_string(),
        })?;

        let stdout = join_reader(stdout_reader, cmd_line).await?;
        let stderr = join_reader(stderr_reader, cmd_line).await?;

        // None means the process was terminated by a signal
        let exit_code = status.code().unwrap_or(-1);
        Ok(ProcessOutput::new(exit_code, stdout, stderr))
    }
}

fn spawn_reader<R>(
    reader: R,
    process: &str,
    stream: &'static str,
    flags: StreamMode,
) -> JoinHandle<String>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let process = process.to_string();
    tokio::spawn(async move { read_stream(reader, &process, stream, flags).await })
}

async fn join_reader(handle: Option<JoinHandle<String>>, cmd_line: &str) -> Result<String> {
    match handle {
        Some(handle) => handle.await.map_err(|e| {
            ProcessError::OutputError {
                command: cmd_line.to_string(),
                message: e.to_string(),
            }
            .into()
        }),
        None => Ok(String::new()),
    }
}

/// Reads a stream line by line until EOF.
///
/// Non-UTF-8 bytes are replaced rather than ending the read early. Kept lines
/// are joined with `\n`.
async fn read_stream<R>(reader: R, process: &str, stream: &str, flags: StreamMode) -> String
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    let mut kept: Vec<String> = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                let line = line.trim_end_matches(['\n', '\r']);

                if flags.contains(StreamMode::LOG) {
                    trace!(process, stream, line, "output");
                }
                if flags.contains(StreamMode::KEEP) {
                    kept.push(line.to_string());
                }
            }
            Err(e) => {
                trace!(process, stream, error = %e, "stream read failed");
                break;
            }
        }
    }

    kept.join("\n")
}
