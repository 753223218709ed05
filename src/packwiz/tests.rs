// packup-rs: Modpack Update & Release Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use super::{PackTool, PackwizTool};
use crate::config::types::ToolConfig;

#[test]
fn test_resolve_missing_binary() {
    let dir = tempfile::tempdir().unwrap();
    let config = ToolConfig {
        packwiz: PathBuf::from("packwiz-does-not-exist-12345"),
        ..Default::default()
    };

    let err = PackwizTool::resolve(&config, dir.path()).unwrap_err();
    assert!(
        err.to_string().contains("packwiz-does-not-exist-12345"),
        "unexpected error: {err}"
    );
}

#[test]
fn test_resolve_missing_absolute_binary() {
    let dir = tempfile::tempdir().unwrap();
    let config = ToolConfig {
        packwiz: dir.path().join("nope"),
        ..Default::default()
    };
    assert!(PackwizTool::resolve(&config, dir.path()).is_err());
}

#[cfg(unix)]
mod script {
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    use super::{PackTool, PackwizTool, ToolConfig};

    /// Writes an executable fake packwiz that logs its arguments.
    fn fake_packwiz(root: &Path, body: &str) -> PathBuf {
        let path = root.join("packwiz");
        let script = format!("#!/bin/sh\necho \"$@\" >> \"$(dirname \"$0\")/calls.log\"\n{body}\n");
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn calls(root: &Path) -> String {
        std::fs::read_to_string(root.join("calls.log"))
            .unwrap_or_default()
            .trim_end()
            .to_string()
    }

    #[test]
    fn test_resolve_prefers_pack_local_binary() {
        let dir = tempfile::tempdir().unwrap();
        let local = fake_packwiz(dir.path(), "exit 0");

        let tool = PackwizTool::resolve(&ToolConfig::default(), dir.path()).unwrap();
        assert_eq!(tool.binary(), local);
        assert_eq!(tool.root(), dir.path());
        assert_eq!(tool.name(), "packwiz");
    }

    #[tokio::test]
    async fn test_update_one_returns_output_on_failure_exit() {
        let dir = tempfile::tempdir().unwrap();
        let bin = fake_packwiz(dir.path(), "echo 'no updates'\necho 'done'\nexit 1");
        let tool = PackwizTool::new(bin, dir.path());

        let output = tool.update_one("sodium").await.unwrap();
        assert_eq!(output.exit_code(), 1);
        assert_eq!(output.stdout(), "no updates\ndone");
        insta::assert_snapshot!(calls(dir.path()), @"update sodium -y");
    }

    #[tokio::test]
    async fn test_update_all_arguments() {
        let dir = tempfile::tempdir().unwrap();
        let bin = fake_packwiz(dir.path(), "echo 'lithium: a.jar -> b.jar'");
        let tool = PackwizTool::new(bin, dir.path());

        let output = tool.update_all().await.unwrap();
        assert!(output.success());
        assert_eq!(output.stdout(), "lithium: a.jar -> b.jar");
        insta::assert_snapshot!(calls(dir.path()), @"update --all -y");
    }

    #[tokio::test]
    async fn test_refresh_failure_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        let bin = fake_packwiz(dir.path(), "echo broken >&2\nexit 7");
        let tool = PackwizTool::new(bin, dir.path());

        tool.refresh_index().await;
        insta::assert_snapshot!(calls(dir.path()), @"refresh");
    }

    #[tokio::test]
    async fn test_refresh_spawn_failure_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        let tool = PackwizTool::new(dir.path().join("missing"), dir.path());
        tool.refresh_index().await;
    }

    #[tokio::test]
    async fn test_update_spawn_failure_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let tool = PackwizTool::new(dir.path().join("missing"), dir.path());
        assert!(tool.update_one("sodium").await.is_err());
    }
}
