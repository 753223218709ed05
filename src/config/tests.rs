// packup-rs: Modpack Update & Release Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Config, ConfigLoader, PathsConfig};
use crate::config::types::PushPolicy;
use crate::logging::LogLevel;
use std::path::{Path, PathBuf};

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.global.output_log_level, LogLevel::INFO);
    assert!(config.global.log_file.is_none());
    assert_eq!(config.tool.marker_suffix, ".outdated");
    assert_eq!(config.tool.manifest_suffixes, [".pw.toml"]);
    assert_eq!(config.tool.change_delimiter, "->");
    assert_eq!(config.release.remote, "origin");
    assert_eq!(config.release.push, PushPolicy::Ask);
}

#[test]
fn test_push_policy_parse() {
    assert_eq!("ASK".parse::<PushPolicy>().unwrap(), PushPolicy::Ask);
    assert_eq!("always".parse::<PushPolicy>().unwrap(), PushPolicy::Always);
    assert_eq!("Never".parse::<PushPolicy>().unwrap(), PushPolicy::Never);
    assert!("sometimes".parse::<PushPolicy>().is_err());
}

#[test]
fn test_paths_resolve_defaults() {
    let mut paths = PathsConfig {
        root: Some(PathBuf::from("/pack")),
        ..Default::default()
    };
    paths.resolve();

    assert_eq!(paths.mods_dir().unwrap(), Path::new("/pack/mods"));
    assert_eq!(paths.manifest_path().unwrap(), Path::new("/pack/pack.toml"));
}

#[test]
fn test_paths_resolve_relative_and_absolute() {
    let mut paths = PathsConfig {
        root: Some(PathBuf::from("/pack")),
        mods: Some(PathBuf::from("content/mods")),
        manifest: Some(PathBuf::from("/elsewhere/pack.toml")),
    };
    paths.resolve();

    assert_eq!(paths.mods_dir().unwrap(), Path::new("/pack/content/mods"));
    assert_eq!(
        paths.manifest_path().unwrap(),
        Path::new("/elsewhere/pack.toml")
    );
}

#[test]
fn test_paths_root_defaults_to_cwd() {
    let mut paths = PathsConfig::default();
    paths.resolve();

    assert_eq!(paths.root().unwrap(), Path::new("."));
    assert_eq!(paths.mods_dir().unwrap(), Path::new("./mods"));
}

#[test]
fn test_paths_unresolved_errors() {
    let paths = PathsConfig::default();
    let err = paths.manifest_path().unwrap_err().to_string();
    assert!(err.contains("manifest"), "unexpected error: {err}");
}

#[test]
fn test_config_parse() {
    let toml = r#"
[global]
output_log_level = 4

[paths]
root = "/srv/pack"

[tool]
packwiz = "/usr/local/bin/packwiz"
manifest_suffixes = [".pw.toml", ".toml"]

[release]
remote = "upstream"
push = "never"
"#;
    let config = Config::parse(toml).unwrap();

    assert_eq!(config.global.output_log_level, LogLevel::DEBUG);
    assert_eq!(
        config.paths.mods_dir().unwrap(),
        Path::new("/srv/pack/mods")
    );
    assert_eq!(config.tool.packwiz, PathBuf::from("/usr/local/bin/packwiz"));
    assert_eq!(config.tool.manifest_suffixes, [".pw.toml", ".toml"]);
    assert_eq!(config.tool.marker_suffix, ".outdated");
    assert_eq!(config.release.remote, "upstream");
    assert_eq!(config.release.push, PushPolicy::Never);
    assert_eq!(config.release.commit_prefix, "chore");
}

#[test]
fn test_config_rejects_empty_marker_suffix() {
    let result = Config::parse("[tool]\nmarker_suffix = \"\"\n");
    assert!(result.is_err());
}

#[test]
fn test_deny_unknown_fields_top_level() {
    let result = Config::parse("[bogus]\nkey = 1\n");
    assert!(result.is_err(), "unknown top-level section must be rejected");
}

#[test]
fn test_config_loader_set_override() {
    let config = ConfigLoader::new()
        .add_toml_str("[release]\nremote = \"origin\"\n")
        .set("release.remote", "mirror")
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(config.release.remote, "mirror");
}

#[test]
fn test_config_loader_tracks_files() {
    let loader = ConfigLoader::new()
        .add_toml_str("[release]\nremote = \"origin\"")
        .add_toml_file_optional("/nonexistent/packup.toml");
    let files = loader.loaded_files();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].0, "inline");
}

#[test]
fn test_format_options_deterministic() {
    let mut config = Config::default();
    config.resolve_and_validate().unwrap();

    let options = config.format_options();
    assert_eq!(options, config.format_options());
    assert!(options.iter().any(|line| line.starts_with("paths.mods")));
    assert!(options.iter().any(|line| line.ends_with("= ask")));

    let mut sorted = options.clone();
    sorted.sort();
    assert_eq!(options, sorted);
}

#[test]
fn test_config_loader_set_all_in_order() {
    let config = ConfigLoader::new()
        .set_all([
            ("release.remote", "first"),
            ("release.commit_prefix", "build"),
            ("release.remote", "second"),
        ])
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(config.release.remote, "second");
    assert_eq!(config.release.commit_prefix, "build");
}

#[test]
fn test_config_loader_optional_file_recorded_when_present() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("packup.toml");
    std::fs::write(&path, "[tool]\nmarker_suffix = \".stale\"\n").unwrap();

    let loader = ConfigLoader::new().add_toml_file_optional(&path);
    assert_eq!(loader.loaded_files(), [("optional".to_string(), path)]);
    assert_eq!(loader.build().unwrap().tool.marker_suffix, ".stale");
}
