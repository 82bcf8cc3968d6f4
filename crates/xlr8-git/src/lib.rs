//! # xlr8-git
//!
//! **Tier 2 (Utilities)**
//!
//! Git process adapter for release automation. Every call shells out to the
//! `git` executable on `PATH`, scoped to a repository with `-C`.
//!
//! ## What belongs here
//! * Tag discovery and commit counting
//! * Commit subject history
//! * Tag and branch side effects used by a release
//!
//! ## What does NOT belong here
//! * Deciding what version comes next (use xlr8-version)
//! * Release orchestration (use xlr8-release)

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

/// Create a `Command` for git with process-environment isolation.
///
/// Strips `GIT_DIR` and `GIT_WORK_TREE` so that inherited environment
/// variables cannot override the explicit `-C` path used by all
/// functions in this crate.
fn git_cmd() -> Command {
    let mut cmd = Command::new("git");
    cmd.env_remove("GIT_DIR").env_remove("GIT_WORK_TREE");
    cmd
}

/// Run `git -C <repo> <args>` and return trimmed stdout.
fn run_git(repo: &Path, args: &[&str]) -> Result<String> {
    debug!(repo = %repo.display(), ?args, "running git");
    let output = git_cmd()
        .arg("-C")
        .arg(repo)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .with_context(|| format!("Failed to spawn git {}", args.join(" ")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("git {} failed: {}", args.join(" "), stderr.trim());
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

pub fn git_available() -> bool {
    git_cmd()
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

pub fn repo_root(path: &Path) -> Option<PathBuf> {
    let root = run_git(path, &["rev-parse", "--show-toplevel"]).ok()?;
    if root.is_empty() {
        None
    } else {
        Some(PathBuf::from(root))
    }
}

/// Check whether a git revision resolves to a valid commit.
pub fn rev_exists(repo: &Path, rev: &str) -> bool {
    git_cmd()
        .arg("-C")
        .arg(repo)
        .args(["rev-parse", "--verify", "--quiet"])
        .arg(format!("{rev}^{{commit}}"))
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// The most recent tag reachable from `HEAD`.
pub fn latest_tag(repo: &Path) -> Result<String> {
    let tag = run_git(repo, &["describe", "--tags", "--abbrev=0"])
        .context("No release tag found; tags must follow MAJOR.MINOR.PATCH")?;
    if tag.is_empty() {
        bail!("git describe returned an empty tag");
    }
    Ok(tag)
}

/// Parse the output of `git rev-list --count`.
pub fn parse_commit_count(raw: &str) -> Result<u64> {
    let raw = raw.trim();
    raw.parse::<u64>()
        .with_context(|| format!("Unexpected commit count '{raw}'"))
}

/// Number of commits on `HEAD` that are not reachable from `rev`.
pub fn commit_count_since(repo: &Path, rev: &str) -> Result<u64> {
    let range = format!("{rev}..HEAD");
    let raw = run_git(repo, &["rev-list", &range, "--count"])?;
    parse_commit_count(&raw)
}

/// Full message of the `HEAD` commit.
pub fn last_commit_message(repo: &Path) -> Result<String> {
    run_git(repo, &["log", "HEAD", "-1", "--pretty=%B"])
}

/// Split `git log --pretty=format:%s` output into subjects.
pub fn split_subjects(raw: &str) -> Vec<String> {
    raw.lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Commit subjects on `HEAD`, newest first.
///
/// With `since`, only commits after that revision are listed.
pub fn log_subjects(repo: &Path, since: Option<&str>) -> Result<Vec<String>> {
    let range = since.map(|rev| format!("{rev}..HEAD"));
    let mut args = vec!["log"];
    if let Some(range) = range.as_deref() {
        args.push(range);
    }
    args.push("--pretty=format:%s");
    let raw = run_git(repo, &args)?;
    Ok(split_subjects(&raw))
}

/// Create an annotated tag on `HEAD`.
pub fn create_annotated_tag(repo: &Path, name: &str, message: &str) -> Result<()> {
    run_git(repo, &["tag", "-a", name, "-m", message])?;
    info!(tag = name, "created annotated tag");
    Ok(())
}

pub fn current_branch(repo: &Path) -> Result<String> {
    let raw = run_git(repo, &["rev-parse", "--abbrev-ref", "HEAD"])?;
    raw.lines()
        .next()
        .map(str::to_string)
        .context("git rev-parse returned no branch name")
}

/// Create `branch` from `HEAD` and switch to it.
pub fn checkout_new_branch(repo: &Path, branch: &str) -> Result<()> {
    run_git(repo, &["checkout", "-b", branch])?;
    info!(branch, "created branch");
    Ok(())
}

pub fn checkout(repo: &Path, branch: &str) -> Result<()> {
    run_git(repo, &["checkout", branch]).map(|_| ())
}

/// Push `branch` to `remote` and set it as upstream.
pub fn push_upstream(repo: &Path, remote: &str, branch: &str) -> Result<()> {
    run_git(repo, &["push", "-u", remote, branch])?;
    info!(remote, branch, "pushed branch");
    Ok(())
}

pub fn delete_branch(repo: &Path, branch: &str) -> Result<()> {
    run_git(repo, &["branch", "-d", branch]).map(|_| ())
}
