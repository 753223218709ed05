// packup-rs: Modpack Update & Release Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for packup-rs using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! packup [global options] [--skip-commit] [--push ask|always|never]
//!                              update outdated mods and release (default)
//! packup list [--json]         print outdated markers
//! packup options               print the effective configuration
//! packup configs               print the configuration files in use
//! packup version
//! ```

pub mod global;


use crate::cli::global::GlobalOptions;
use crate::config::types::PushPolicy;
use clap::{Parser, Subcommand};

/// Modpack Update & Release Tool
///
/// Updates every mod marked as outdated, bumps the pack version and commits,
/// tags and optionally pushes the result.
#[derive(Debug, Parser)]
#[command(
    name = "packup",
    author,
    version,
    about = "Modpack Update & Release Tool",
    long_about = "packup-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Updates the mods of a packwiz modpack that are marked as outdated.\n\n\
                  A mod is marked by renaming `mods/<name>.pw.toml` to\n\
                  `mods/<name>.pw.toml.outdated`. Running `packup` updates each\n\
                  marked mod, then every other mod, bumps the minor version in\n\
                  `pack.toml` and commits and tags the result.",
    after_help = "CONFIG FILES:\n\n\
                  packup reads `packup.toml` from the current directory if it\n\
                  exists, then every file given with --config, in order. Later\n\
                  files override earlier ones. PACKUP_<SECTION>__<KEY> environment\n\
                  variables override files; command-line flags override everything."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Update only: no version bump, commit, tag or push.
    #[arg(long = "skip-commit")]
    pub skip_commit: bool,

    /// Whether to push the release commit and tag (overrides release.push).
    #[arg(long, value_name = "POLICY", value_enum)]
    pub push: Option<PushPolicy>,

    /// Command to execute (updates the pack if omitted)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their effective values.
    Options,

    /// Lists the configuration files in use.
    Configs,

    /// Lists the mods marked as outdated.
    List(ListArgs),
}

/// Arguments for `list`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Print a JSON array instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
