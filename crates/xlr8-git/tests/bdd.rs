//! BDD-style scenario tests for xlr8-git.
//!
//! Each test follows Given/When/Then structure to document behaviour
//! in a human-readable way.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;
use xlr8_git::{
    commit_count_since, create_annotated_tag, git_available, last_commit_message, latest_tag,
    log_subjects,
};

// ============================================================================
// Helpers
// ============================================================================

fn git_in(dir: &Path) -> Command {
    let mut cmd = Command::new("git");
    cmd.env_remove("GIT_DIR")
        .env_remove("GIT_WORK_TREE")
        .current_dir(dir);
    cmd
}

fn git_ok(dir: &Path, args: &[&str]) {
    let out = git_in(dir).args(args).output().expect("spawn git");
    assert!(
        out.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
}

/// Empty repository on `main`, or `None` when git is unavailable.
fn make_repo() -> Option<TempDir> {
    if !git_available() {
        return None;
    }
    let dir = tempfile::tempdir().ok()?;
    git_ok(dir.path(), &["init", "-b", "main"]);
    git_ok(dir.path(), &["config", "user.email", "bdd@test.com"]);
    git_ok(dir.path(), &["config", "user.name", "BDD Tester"]);
    git_ok(dir.path(), &["config", "tag.gpgSign", "false"]);
    git_ok(dir.path(), &["config", "commit.gpgSign", "false"]);
    Some(dir)
}

fn commit(dir: &Path, subject: &str) {
    git_ok(dir, &["commit", "--allow-empty", "-m", subject]);
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn scenario_work_after_release_tag_then_count_and_subjects_follow_tag() {
    // Given a repository released as 0.3.0
    let Some(repo) = make_repo() else { return };
    let path = repo.path();
    commit(path, "feat: first cut");
    create_annotated_tag(path, "0.3.0", "Release 0.3.0").unwrap();
    // And two commits on top of it
    commit(path, "fix: rounding");
    commit(path, "feat(grid): borders");

    // When the tag, count and subjects are read
    let tag = latest_tag(path).unwrap();
    let count = commit_count_since(path, &tag).unwrap();
    let subjects = log_subjects(path, Some(&tag)).unwrap();

    // Then only the work after the tag is reported, newest first
    assert_eq!(tag, "0.3.0");
    assert_eq!(count, 2);
    assert_eq!(subjects, ["feat(grid): borders", "fix: rounding"]);
    assert_eq!(last_commit_message(path).unwrap(), "feat(grid): borders");
}

#[test]
fn scenario_checkout_on_tag_then_nothing_since() {
    // Given a repository whose HEAD is the tagged commit
    let Some(repo) = make_repo() else { return };
    let path = repo.path();
    commit(path, "chore: init");
    create_annotated_tag(path, "1.0.0", "Release 1.0.0").unwrap();

    // When history since the tag is read
    let count = commit_count_since(path, "1.0.0").unwrap();
    let subjects = log_subjects(path, Some("1.0.0")).unwrap();

    // Then it is empty
    assert_eq!(count, 0);
    assert!(subjects.is_empty());
}

#[test]
fn scenario_untagged_repository_then_tag_lookup_explains_format() {
    // Given commits but no tag
    let Some(repo) = make_repo() else { return };
    commit(repo.path(), "chore: init");

    // When the latest tag is requested
    let err = latest_tag(repo.path()).unwrap_err();

    // Then the error names the expected tag format
    assert!(err.to_string().contains("MAJOR.MINOR.PATCH"));
}
