// packup-rs: Modpack Update & Release Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! On-disk pack state.
//!
//! ```text
//! <root>/
//!   pack.toml                       manifest   --> PackManifest / bump
//!   mods/*.pw.toml.outdated         markers    --> MarkerStore
//! ```

pub mod manifest;
pub mod marker;

pub use manifest::{PackManifest, PackVersion, VersionBump, bump, bump_manifest};
pub use marker::{MarkerRecord, MarkerStore, OutdatedMarker};
