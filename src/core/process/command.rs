// packup-rs: Modpack Update & Release Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Description of one external command run.

use bitflags::bitflags;
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::{OnceLock, PoisonError, RwLock};

static LOCATED: OnceLock<RwLock<BTreeMap<String, PathBuf>>> = OnceLock::new();

/// Resolves `program` on PATH, remembering hits for the life of the process.
///
/// Misses are not cached so a tool installed mid-run is still found.
#[must_use]
pub fn locate(program: &str) -> Option<PathBuf> {
    let cache = LOCATED.get_or_init(RwLock::default);

    if let Some(hit) = cache
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(program)
    {
        return Some(hit.clone());
    }

    let found = which::which(program).ok()?;
    cache
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(program.to_string(), found.clone());
    Some(found)
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct RunFlags: u8 {
        /// Return the output for any exit code instead of failing.
        const ALLOW_FAILURE = 1;
    }
}

bitflags! {
    /// What happens to each line a child writes on one stream.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StreamMode: u8 {
        /// Emit at trace level.
        const LOG = 1;
        /// Collect into [`ProcessOutput`].
        const KEEP = 1 << 1;
        /// Connect to the null device; nothing is read.
        const DISCARD = 1 << 2;
    }
}

/// Exit code plus whatever the streams kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    exit_code: i32,
    stdout: String,
    stderr: String,
}

impl ProcessOutput {
    #[must_use]
    pub const fn new(exit_code: i32, stdout: String, stderr: String) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
        }
    }

    /// `-1` when the child was killed by a signal.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.exit_code
    }

    #[must_use]
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    #[must_use]
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// A program, its arguments and how to treat its output.
///
/// Both streams are logged and dropped unless [`capture_output`] or
/// [`quiet`] says otherwise. Stdin is always the null device.
///
/// [`capture_output`]: Invocation::capture_output
/// [`quiet`]: Invocation::quiet
#[derive(Debug)]
pub struct Invocation {
    pub(super) program: PathBuf,
    pub(super) args: Vec<String>,
    pub(super) cwd: Option<PathBuf>,
    pub(super) flags: RunFlags,
    pub(super) stdout: StreamMode,
    pub(super) stderr: StreamMode,
    pub(super) label: Option<String>,
}

impl Invocation {
    /// A bare name is looked up on PATH by the OS at spawn time.
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
            flags: RunFlags::empty(),
            stdout: StreamMode::LOG,
            stderr: StreamMode::LOG,
            label: None,
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    #[must_use]
    pub fn args<I, S>(self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        args.into_iter().fold(self, Self::arg)
    }

    #[must_use]
    pub fn cwd(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn flag(mut self, flag: RunFlags) -> Self {
        self.flags |= flag;
        self
    }

    /// Keeps both streams in the output while still logging them.
    #[must_use]
    pub const fn capture_output(mut self) -> Self {
        self.stdout = StreamMode::LOG.union(StreamMode::KEEP);
        self.stderr = StreamMode::LOG.union(StreamMode::KEEP);
        self
    }

    #[must_use]
    pub const fn quiet(mut self) -> Self {
        self.stdout = StreamMode::DISCARD;
        self.stderr = StreamMode::DISCARD;
        self
    }

    /// Name used in logs and errors instead of the program's file stem.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}
