// packup-rs: Modpack Update & Release Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Push confirmation.
//!
//! ```text
//! PushPolicy::Ask    --> ConsolePrompt (y/yes/n/no, re-asks otherwise, EOF = no)
//! PushPolicy::Always --> FixedDecision(true)
//! PushPolicy::Never  --> FixedDecision(false)
//! ```

use std::io::{BufRead, Write};

use tokio::runtime::RuntimeFlavor;
use tracing::debug;

use crate::config::types::PushPolicy;

/// Decides whether the release commit and tag are pushed.
pub trait PushDecision {
    fn confirm_push(&mut self, remote: &str, version: &str) -> bool;
}

/// A decision made up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDecision(pub bool);

impl PushDecision for FixedDecision {
    fn confirm_push(&mut self, _remote: &str, _version: &str) -> bool {
        self.0
    }
}

/// Interactive yes/no prompt.
#[derive(Debug)]
pub struct ConsolePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consumes the prompt, returning its writer.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl ConsolePrompt<std::io::StdinLock<'static>, std::io::Stdout> {
    /// Prompt on the process's stdin and stdout.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

/// Parses one answer; `None` means ask again.
fn parse_answer(line: &str) -> Option<bool> {
    match line.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Runs blocking console I/O without stalling a tokio worker.
///
/// On a multi-thread runtime the worker hands its other tasks off first;
/// anywhere else `f` just runs.
fn blocking<T>(f: impl FnOnce() -> T) -> T {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(f)
        }
        _ => f(),
    }
}

impl<R: BufRead, W: Write> PushDecision for ConsolePrompt<R, W> {
    fn confirm_push(&mut self, remote: &str, version: &str) -> bool {
        blocking(|| self.ask(remote, version))
    }
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    fn ask(&mut self, remote: &str, version: &str) -> bool {
        let mut line = String::new();
        loop {
            // Console write failures only lose the prompt text.
            let _ = write!(
                self.output,
                "Push commit and tag {version} to {remote}? [y/n] "
            );
            let _ = self.output.flush();

            line.clear();
            match self.input.read_line(&mut line) {
                Ok(0) => {
                    debug!("no input; not pushing");
                    let _ = writeln!(self.output);
                    return false;
                }
                Ok(_) => {
                    if let Some(answer) = parse_answer(&line) {
                        return answer;
                    }
                    let _ = writeln!(self.output, "Please answer y/yes or n/no.");
                }
                Err(e) => {
                    debug!(error = %e, "failed to read answer; not pushing");
                    return false;
                }
            }
        }
    }
}

/// Builds the decision for a configured policy.
#[must_use]
pub fn decision_for(policy: PushPolicy) -> Box<dyn PushDecision> {
    match policy {
        PushPolicy::Ask => Box::new(ConsolePrompt::stdio()),
        PushPolicy::Always => Box::new(FixedDecision(true)),
        PushPolicy::Never => Box::new(FixedDecision(false)),
    }
}
