//! Shared fixtures for release tests.

#![allow(dead_code)]

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

fn git_in(dir: &Path) -> Command {
    let mut cmd = Command::new("git");
    cmd.env_remove("GIT_DIR")
        .env_remove("GIT_WORK_TREE")
        .current_dir(dir);
    cmd
}

pub fn git_out(dir: &Path, args: &[&str]) -> String {
    let out = git_in(dir).args(args).output().expect("spawn git");
    assert!(
        out.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8_lossy(&out.stdout).into_owned()
}

pub fn git_ok(dir: &Path, args: &[&str]) {
    git_out(dir, args);
}

/// Fresh repository on `main`, or `None` when git is unavailable.
pub fn init_repo() -> Option<TempDir> {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    if !xlr8_git::git_available() {
        return None;
    }
    let dir = tempfile::tempdir().ok()?;
    git_ok(dir.path(), &["init", "-b", "main"]);
    git_ok(dir.path(), &["config", "user.email", "release@test.com"]);
    git_ok(dir.path(), &["config", "user.name", "Release Tester"]);
    git_ok(dir.path(), &["config", "tag.gpgSign", "false"]);
    git_ok(dir.path(), &["config", "commit.gpgSign", "false"]);
    Some(dir)
}

/// Commit a change with `subject` as the whole message.
pub fn commit(dir: &Path, subject: &str) {
    let file = dir.join("history.txt");
    let mut content = std::fs::read_to_string(&file).unwrap_or_default();
    content.push_str(subject);
    content.push('\n');
    std::fs::write(&file, content).unwrap();
    git_ok(dir, &["add", "."]);
    git_ok(dir, &["commit", "-m", subject]);
}

/// Annotated tag on `HEAD`, as releases create.
pub fn tag(dir: &Path, name: &str) {
    git_ok(dir, &["tag", "-a", name, "-m", &format!("Release {name}")]);
}
