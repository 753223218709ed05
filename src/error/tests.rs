// packup-rs: Modpack Update & Release Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use super::{ConfigError, GitError, MarkerError, PackError, PackResult, VersionError};

#[test]
fn test_config_error_display() {
    let err = ConfigError::MissingKey {
        section: "paths".to_string(),
        key: "root".to_string(),
    };
    insta::assert_snapshot!(err.to_string(), @"missing required config key 'root' in section '[paths]'");
}

#[test]
fn test_marker_error_wraps_into_pack_error() {
    let err: PackError = MarkerError::MalformedRecord {
        path: PathBuf::from("mods/sodium.pw.toml.outdated"),
        message: "expected `=`".to_string(),
    }
    .into();
    insta::assert_snapshot!(
        err.to_string(),
        @"marker error: malformed outdated marker 'mods/sodium.pw.toml.outdated': expected `=`"
    );
}

#[test]
fn test_version_error_display() {
    let err: PackError = VersionError::InvalidVersion("abc".to_string()).into();
    insta::assert_snapshot!(err.to_string(), @"version error: invalid semantic version format: abc");
}

#[test]
fn test_io_error_converts_with_question_mark() {
    fn open_missing() -> PackResult<std::fs::File> {
        Ok(std::fs::File::open("/nonexistent/packup/pack.toml")?)
    }
    assert!(matches!(open_missing(), Err(PackError::Io(_))));
}

#[test]
fn test_git_command_failure_display() {
    let err: PackError = GitError::CommandFailed {
        command: "git tag -a 1.0.0".to_string(),
        message: "fatal: tag '1.0.0' already exists".to_string(),
    }
    .into();
    insta::assert_snapshot!(
        err.to_string(),
        @"git error: git command failed: git tag -a 1.0.0 - fatal: tag '1.0.0' already exists"
    );
}

#[test]
fn test_pack_result_is_two_words() {
    assert_eq!(
        std::mem::size_of::<PackResult<()>>(),
        2 * std::mem::size_of::<usize>()
    );
}
