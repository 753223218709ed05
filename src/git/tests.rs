// packup-rs: Modpack Update & Release Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::PackError;
use crate::git::GitRepository;
use crate::git::cmd;
use crate::release::VersionControl;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

/// Repository with a local identity and one commit holding `pack.toml`
/// and `mods/sodium.pw.toml.outdated`.
fn init_pack_repo(path: &Path) -> GitRepository {
    cmd::init_repo(path).expect("git init");
    cmd::set_config(path, "user.email", "test@example.com").unwrap();
    cmd::set_config(path, "user.name", "Test").unwrap();
    cmd::set_config(path, "commit.gpgsign", "false").unwrap();
    cmd::set_config(path, "tag.gpgsign", "false").unwrap();

    std::fs::create_dir(path.join("mods")).unwrap();
    std::fs::write(path.join("pack.toml"), "version = \"1.0.0\"\n").unwrap();
    std::fs::write(
        path.join("mods/sodium.pw.toml.outdated"),
        "name = \"Sodium\"\nfilename = \"sodium.jar\"\n",
    )
    .unwrap();
    cmd::add(
        path,
        &[
            PathBuf::from("pack.toml"),
            PathBuf::from("mods/sodium.pw.toml.outdated"),
        ],
    )
    .unwrap();
    cmd::commit(path, "initial").unwrap();

    GitRepository::discover(path).expect("discover repository")
}

fn git_stdout(args: &[&str], cwd: &Path) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("git runs");
    assert!(
        output.status.success(),
        "git {args:?}: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[test]
fn test_discover_outside_repository() {
    let temp = temp_dir();
    let err = GitRepository::discover(temp.path()).unwrap_err();
    assert!(matches!(err, PackError::Git(_)), "{err:?}");
    assert!(err.to_string().contains("repository not found"), "{err}");
}

#[test]
fn test_discover_from_subdirectory() {
    let temp = temp_dir();
    let repo = init_pack_repo(temp.path());
    let nested = GitRepository::discover(&temp.path().join("mods")).unwrap();
    assert_eq!(nested.workdir(), repo.workdir());
    assert_eq!(
        repo.workdir(),
        std::fs::canonicalize(temp.path()).unwrap()
    );
}

#[test]
fn test_untracked_and_modified_are_absolute() {
    let temp = temp_dir();
    let repo = init_pack_repo(temp.path());
    let root = repo.workdir().to_path_buf();

    assert!(repo.untracked_files().unwrap().is_empty());
    assert!(repo.modified_files().unwrap().is_empty());
    assert!(!repo.has_uncommitted_changes().unwrap());

    std::fs::rename(
        root.join("mods/sodium.pw.toml.outdated"),
        root.join("mods/sodium.pw.toml"),
    )
    .unwrap();
    std::fs::write(root.join("pack.toml"), "version = \"1.1.0\"\n").unwrap();

    assert_eq!(
        repo.untracked_files().unwrap(),
        [root.join("mods/sodium.pw.toml")]
    );
    let mut modified = repo.modified_files().unwrap();
    modified.sort();
    assert_eq!(
        modified,
        [root.join("mods/sodium.pw.toml.outdated"), root.join("pack.toml")]
    );
    assert!(repo.has_uncommitted_changes().unwrap());
}

#[test]
fn test_stage_untracked_name_with_leading_space() {
    let temp = temp_dir();
    let repo = init_pack_repo(temp.path());
    let root = repo.workdir().to_path_buf();
    std::fs::write(root.join(" lead.txt"), "x").unwrap();

    let untracked = repo.untracked_files().unwrap();
    assert_eq!(untracked, [root.join(" lead.txt")]);

    repo.stage(&untracked).unwrap();
    // fails unless the exact name is in the index
    git_stdout(&["ls-files", "--error-unmatch", "--", " lead.txt"], &root);
}

#[test]
fn test_stage_remove_commit_and_tag() {
    let temp = temp_dir();
    let repo = init_pack_repo(temp.path());
    let root = repo.workdir().to_path_buf();

    std::fs::rename(
        root.join("mods/sodium.pw.toml.outdated"),
        root.join("mods/sodium.pw.toml"),
    )
    .unwrap();
    std::fs::write(root.join("pack.toml"), "version = \"1.1.0\"\n").unwrap();

    repo.stage(&[root.join("mods/sodium.pw.toml"), root.join("pack.toml")])
        .unwrap();
    repo.remove_from_index(&[root.join("mods/sodium.pw.toml.outdated")])
        .unwrap();
    let commit = repo.commit("chore: updated 1 mods").unwrap();
    assert_eq!(commit, git_stdout(&["rev-parse", "HEAD"], &root));

    repo.create_tag("1.1.0", "Release version 1.1.0").unwrap();
    assert_eq!(git_stdout(&["tag", "--list"], &root), "1.1.0");
    assert_eq!(
        git_stdout(&["cat-file", "-t", "1.1.0"], &root),
        "tag",
        "tag should be annotated"
    );

    assert!(!repo.has_uncommitted_changes().unwrap());
    assert_eq!(
        git_stdout(&["ls-files", "mods"], &root),
        "mods/sodium.pw.toml"
    );
}

#[test]
fn test_stage_rejects_paths_outside_repository() {
    let temp = temp_dir();
    let repo = init_pack_repo(temp.path());
    let outside = temp_dir();
    let stray = outside.path().join("stray.toml");
    std::fs::write(&stray, "").unwrap();

    let err = repo.stage(&[stray]).unwrap_err();
    assert!(err.to_string().contains("is outside the repository"), "{err}");
}

#[test]
fn test_push_head_and_tag_to_bare_remote() {
    let temp = temp_dir();
    let repo = init_pack_repo(temp.path());
    let root = repo.workdir().to_path_buf();

    let remote = temp_dir();
    git_stdout(&["init", "--bare", "--quiet"], remote.path());
    let remote_url = remote.path().display().to_string();
    git_stdout(&["remote", "add", "origin", &remote_url], &root);
    let branch = repo.current_branch().unwrap().expect("on a branch");
    git_stdout(&["push", "--quiet", "-u", "origin", &branch], &root);

    std::fs::write(root.join("pack.toml"), "version = \"1.1.0\"\n").unwrap();
    repo.stage(&[root.join("pack.toml")]).unwrap();
    let commit = repo.commit("bump").unwrap();
    repo.create_tag("1.1.0", "Release version 1.1.0").unwrap();

    repo.push("origin", Some("1.1.0")).unwrap();

    assert_eq!(
        git_stdout(&["rev-parse", &format!("refs/heads/{branch}")], remote.path()),
        commit
    );
    assert_eq!(
        git_stdout(&["rev-parse", "1.1.0^{commit}"], remote.path()),
        commit
    );
}

#[test]
fn test_push_to_unknown_remote_fails() {
    let temp = temp_dir();
    let repo = init_pack_repo(temp.path());
    let err = repo.push("nowhere", None).unwrap_err();
    assert!(
        format!("{err:#}").contains("failed to push HEAD to nowhere"),
        "{err:#}"
    );
}
