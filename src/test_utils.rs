// packup-rs: Modpack Update & Release Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared test doubles.
//!
//! ```text
//! ScriptedTool   PackTool with canned outputs per identifier, records calls
//! RecordingVcs   VersionControl that records calls, optional failures
//! run_with_logs  capture tracing output of an async block
//! ```

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use futures_util::future::BoxFuture;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

use crate::core::process::ProcessOutput;
use crate::error::Result;
use crate::packwiz::PackTool;
use crate::release::VersionControl;

// --- PackTool double ---

/// Canned response for one tool invocation.
#[derive(Debug, Clone)]
pub(crate) enum Scripted {
    Stdout(String),
    Error(String),
    /// Deletes the active `<id>.pw.toml` (needs `watch`), then prints.
    Delete(String),
}

impl Scripted {
    pub(crate) fn stdout(s: &str) -> Self {
        Self::Stdout(s.to_string())
    }

    fn respond(&self) -> Result<ProcessOutput> {
        match self {
            Self::Stdout(s) | Self::Delete(s) => Ok(ProcessOutput::new(0, s.clone(), String::new())),
            Self::Error(e) => Err(anyhow::anyhow!("{e}")),
        }
    }
}

/// `PackTool` with scripted responses.
///
/// Unscripted identifiers get empty output. When a mods directory is set,
/// each `update_one` records whether `<id>.pw.toml` existed at call time.
#[derive(Debug, Default)]
pub(crate) struct ScriptedTool {
    updates: BTreeMap<String, Scripted>,
    bulk: Option<Scripted>,
    mods_dir: Option<PathBuf>,
    calls: Mutex<Vec<String>>,
    active_at_update: Mutex<Vec<bool>>,
}

impl ScriptedTool {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn update(mut self, identifier: &str, response: Scripted) -> Self {
        self.updates.insert(identifier.to_string(), response);
        self
    }

    pub(crate) fn bulk(mut self, response: Scripted) -> Self {
        self.bulk = Some(response);
        self
    }

    pub(crate) fn watch(mut self, mods_dir: &Path) -> Self {
        self.mods_dir = Some(mods_dir.to_path_buf());
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub(crate) fn active_at_update(&self) -> Vec<bool> {
        self.active_at_update
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }

    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

impl PackTool for ScriptedTool {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn refresh_index(&self) -> BoxFuture<'_, ()> {
        Box::pin(async move { self.record("refresh".to_string()) })
    }

    fn update_one<'a>(&'a self, identifier: &'a str) -> BoxFuture<'a, Result<ProcessOutput>> {
        Box::pin(async move {
            self.record(format!("update {identifier}"));
            let response = self.updates.get(identifier);
            if let Some(dir) = &self.mods_dir {
                let active = dir.join(format!("{identifier}.pw.toml"));
                if let Ok(mut seen) = self.active_at_update.lock() {
                    seen.push(active.is_file());
                }
                if matches!(response, Some(Scripted::Delete(_))) {
                    let _ = std::fs::remove_file(&active);
                }
            }
            response.map_or_else(|| Ok(ProcessOutput::default()), Scripted::respond)
        })
    }

    fn update_all(&self) -> BoxFuture<'_, Result<ProcessOutput>> {
        Box::pin(async move {
            self.record("update --all".to_string());
            self.bulk
                .as_ref()
                .map_or_else(|| Ok(ProcessOutput::default()), Scripted::respond)
        })
    }
}

// --- VersionControl double ---

/// `VersionControl` that records every call.
#[derive(Debug, Default)]
pub(crate) struct RecordingVcs {
    untracked: Vec<PathBuf>,
    modified: Vec<PathBuf>,
    fail_tag: bool,
    fail_push: bool,
    calls: Mutex<Vec<String>>,
}

impl RecordingVcs {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn untracked(mut self, paths: Vec<PathBuf>) -> Self {
        self.untracked = paths;
        self
    }

    pub(crate) fn modified(mut self, paths: Vec<PathBuf>) -> Self {
        self.modified = paths;
        self
    }

    pub(crate) const fn failing_tag(mut self) -> Self {
        self.fail_tag = true;
        self
    }

    pub(crate) const fn failing_push(mut self) -> Self {
        self.fail_push = true;
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

fn file_names(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| {
            p.file_name()
                .map_or_else(|| p.display().to_string(), |n| n.to_string_lossy().into_owned())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl VersionControl for RecordingVcs {
    fn untracked_files(&self) -> Result<Vec<PathBuf>> {
        self.record("untracked".to_string());
        Ok(self.untracked.clone())
    }

    fn modified_files(&self) -> Result<Vec<PathBuf>> {
        self.record("modified".to_string());
        Ok(self.modified.clone())
    }

    fn stage(&self, paths: &[PathBuf]) -> Result<()> {
        self.record(format!("add {}", file_names(paths)));
        Ok(())
    }

    fn remove_from_index(&self, paths: &[PathBuf]) -> Result<()> {
        self.record(format!("rm --cached {}", file_names(paths)));
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<String> {
        self.record(format!("commit {message:?}"));
        Ok("abc1234".to_string())
    }

    fn create_tag(&self, name: &str, message: &str) -> Result<()> {
        self.record(format!("tag {name} {message:?}"));
        if self.fail_tag {
            anyhow::bail!("tag '{name}' already exists");
        }
        Ok(())
    }

    fn push(&self, remote: &str, tag: Option<&str>) -> Result<()> {
        self.record(format!("push {remote} {}", tag.unwrap_or("-")));
        if self.fail_push {
            anyhow::bail!("could not read from remote repository");
        }
        Ok(())
    }
}

// --- Log capture ---

#[derive(Clone)]
struct BufferWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer
            .lock()
            .map_err(|_| std::io::Error::other("buffer poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[derive(Clone)]
struct BufferMakeWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl<'a> MakeWriter<'a> for BufferMakeWriter {
    type Writer = BufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        BufferWriter {
            buffer: self.buffer.clone(),
        }
    }
}

/// Runs an async closure while capturing INFO and above.
///
/// Returns the closure's value and the captured log output.
pub(crate) async fn run_with_logs<F, Fut, T>(f: F) -> (T, String)
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = T>,
{
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_writer(BufferMakeWriter {
            buffer: buffer.clone(),
        })
        .with_max_level(Level::INFO)
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .finish();

    let _guard = tracing::subscriber::set_default(subscriber);
    let value = f().await;

    let logs = buffer
        .lock()
        .map(|guard| String::from_utf8_lossy(&guard).to_string())
        .unwrap_or_default();
    (value, logs)
}
