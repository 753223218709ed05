// packup-rs: Modpack Update & Release Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config-related commands for packup-rs.

use std::path::PathBuf;

use crate::config::Config;

/// Display current configuration options.
pub fn run_options_command(config: &Config) {
    for line in config.format_options() {
        println!("{line}");
    }
}

/// Display loaded configuration files as `<kind>: <path>`.
pub fn run_configs_command(files: &[(String, PathBuf)]) {
    if files.is_empty() {
        println!("No configuration files loaded");
    } else {
        for (kind, path) in files {
            println!("{kind}: {}", path.display());
        }
    }
}
