// packup-rs: Modpack Update & Release Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! List command implementation for packup-rs.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::cli::ListArgs;
use crate::config::Config;
use crate::error::Result;
use crate::pack::{MarkerStore, OutdatedMarker};

/// One outdated mod, as printed by `list --json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListEntry {
    pub identifier: String,
    pub name: String,
    pub filename: String,
    pub marker: PathBuf,
}

/// Entries in update order.
#[must_use]
pub fn list_entries<S: AsRef<str>>(
    markers: &BTreeMap<String, OutdatedMarker>,
    manifest_suffixes: &[S],
) -> Vec<ListEntry> {
    markers
        .values()
        .map(|marker| ListEntry {
            identifier: marker.identifier(manifest_suffixes).to_string(),
            name: marker.record().name.clone(),
            filename: marker.record().filename.clone(),
            marker: marker.marked_path(),
        })
        .collect()
}

/// `<identifier>  <name>` lines with the identifier column aligned.
#[must_use]
pub fn format_table(entries: &[ListEntry]) -> Vec<String> {
    let width = entries.iter().map(|e| e.identifier.len()).max().unwrap_or(0);
    entries
        .iter()
        .map(|e| format!("{:<width$}  {}", e.identifier, e.name))
        .collect()
}

/// Prints every outdated marker, in update order.
///
/// # Errors
///
/// Returns an error if the mods directory cannot be read, a marker is
/// malformed, or JSON serialization fails.
pub fn run_list_command(args: &ListArgs, config: &Config) -> Result<()> {
    let store = MarkerStore::new(config.paths.mods_dir()?, config.tool.marker_suffix.clone());
    let entries = list_entries(&store.list_outdated()?, &config.tool.manifest_suffixes);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No outdated mods");
    } else {
        for line in format_table(&entries) {
            println!("{line}");
        }
    }
    Ok(())
}
