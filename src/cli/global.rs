// packup-rs: Modpack Update & Release Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Options shared by every subcommand.
//!
//! Each one maps onto a config key and is applied as the last layer:
//!
//! ```text
//! -l/--log-level N      global.output_log_level
//! --file-log-level N    global.file_log_level  (defaults to -l)
//! --log-file FILE       global.log_file
//! -d/--root DIR         paths.root
//! -c/--config FILE      extra config layer, repeatable
//! ```

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Extra TOML config file, loaded after packup.toml. Repeatable.
    #[arg(short = 'c', long = "config", value_name = "FILE", action = clap::ArgAction::Append)]
    pub configs: Vec<PathBuf>,

    /// Console verbosity: 0 silent, 3 info, 5 trace, 6 includes dependencies.
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL",
          value_parser = clap::value_parser!(u8).range(0..=6))]
    pub log_level: Option<u8>,

    /// Log file verbosity, when it should differ from --log-level.
    #[arg(long = "file-log-level", value_name = "LEVEL",
          value_parser = clap::value_parser!(u8).range(0..=6))]
    pub file_log_level: Option<u8>,

    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Pack root holding pack.toml and the mods directory.
    #[arg(short = 'd', long = "root", value_name = "DIR")]
    pub root: Option<PathBuf>,
}

impl GlobalOptions {
    /// Dotted config keys set on the command line, in application order.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<(&'static str, String)> {
        [
            ("global.output_log_level", self.log_level.map(|l| l.to_string())),
            (
                "global.file_log_level",
                self.file_log_level.or(self.log_level).map(|l| l.to_string()),
            ),
            ("global.log_file", self.log_file.as_ref().map(|p| p.display().to_string())),
            ("paths.root", self.root.as_ref().map(|p| p.display().to_string())),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect()
    }
}
