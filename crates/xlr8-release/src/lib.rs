//! # xlr8-release
//!
//! **Tier 3 (Orchestration)**
//!
//! Semantic versioning driven by git tags. The latest `MAJOR.MINOR.PATCH`
//! tag is the base version; conventional commits since that tag decide the
//! next one.
//!
//! ## Responsibilities
//! * Resolve the base version and commit count (git or frozen overrides)
//! * Label unstable builds
//! * Bump, changelog and release-branch workflows
//!
//! This crate should contain minimal business logic; rules live in
//! xlr8-version and git access in xlr8-git.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{debug, info};
use xlr8_project::VersionOverrides;
use xlr8_version::{ChangeLog, Version, VersionLabel, next_version};

/// Remote that release branches are pushed to.
pub const DEFAULT_REMOTE: &str = "origin";

/// Prefix of release branch names; the version follows.
pub const RELEASE_BRANCH_PREFIX: &str = "release/";

/// Release workflows for one repository.
#[derive(Debug, Clone)]
pub struct Release {
    repo: PathBuf,
    overrides: VersionOverrides,
    remote: String,
}

impl Release {
    /// Read everything from git.
    pub fn new(repo: impl Into<PathBuf>) -> Self {
        Self::with_overrides(repo, VersionOverrides::default())
    }

    pub fn with_overrides(repo: impl Into<PathBuf>, overrides: VersionOverrides) -> Self {
        Self {
            repo: repo.into(),
            overrides,
            remote: DEFAULT_REMOTE.to_string(),
        }
    }

    /// Pick up `XLR8_BASE_VERSION` / `XLR8_COMMIT_COUNT` from the process.
    pub fn from_env(repo: impl Into<PathBuf>) -> Result<Self> {
        let overrides = VersionOverrides::from_env().context("Invalid version override")?;
        Ok(Self::with_overrides(repo, overrides))
    }

    #[must_use]
    pub fn remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    pub fn repo(&self) -> &Path {
        &self.repo
    }

    /// The tag the base version comes from, verbatim.
    fn base_tag(&self) -> Result<String> {
        match self.overrides.base_version {
            Some(version) => Ok(version.to_string()),
            None => xlr8_git::latest_tag(&self.repo),
        }
    }

    pub fn base_version(&self) -> Result<Version> {
        let tag = self.base_tag()?;
        tag.parse::<Version>()
            .with_context(|| format!("Latest tag '{tag}' is not a release version"))
    }

    /// Commits on `HEAD` since the base tag.
    pub fn commit_count(&self) -> Result<u64> {
        if let Some(count) = self.overrides.commit_count {
            return Ok(count);
        }
        let tag = self.base_tag()?;
        xlr8_git::commit_count_since(&self.repo, &tag)
    }

    /// Version label for the current checkout.
    ///
    /// With `ignore_dirty`, commits after the tag are not reported.
    pub fn version(&self, ignore_dirty: bool) -> Result<VersionLabel> {
        let base = self.base_version()?;
        let commits = if ignore_dirty {
            0
        } else {
            self.commit_count()?
        };
        let label = VersionLabel::new(base, commits, ignore_dirty);
        debug!(%label, "resolved version");
        Ok(label)
    }

    pub fn current_tag(&self) -> Result<Version> {
        Ok(self.version(true)?.base())
    }

    /// Commit subjects since the current tag, newest first.
    ///
    /// The range uses the tag as written; `1.02.0` stays `1.02.0`.
    pub fn rolling_log_history(&self) -> Result<Vec<String>> {
        let tag = self.base_tag()?;
        xlr8_git::log_subjects(&self.repo, Some(&tag))
    }

    /// The next version, or `None` when no commit since the tag warrants one.
    pub fn increased_version(&self) -> Result<Option<Version>> {
        let base = self.current_tag()?;
        let logs = self.rolling_log_history()?;
        Self::next_after(base, &logs)
    }

    fn next_after(base: Version, logs: &[String]) -> Result<Option<Version>> {
        next_version(base, logs)
            .with_context(|| format!("Cannot compute the release after {base}"))
    }

    pub fn needs_build(&self) -> Result<bool> {
        Ok(self.increased_version()?.is_some())
    }

    /// Tag `HEAD` with the next version.
    pub fn bump_version(&self) -> Result<Version> {
        let Some(version) = self.increased_version()? else {
            bail!(
                "Cannot bump version: log history contains no conventional commits since the last tag"
            );
        };
        let name = version.to_string();
        xlr8_git::create_annotated_tag(&self.repo, &name, &format!("Release {name}"))?;
        info!(version = %name, "bumped version");
        Ok(version)
    }

    pub fn change_log(&self) -> Result<ChangeLog> {
        let base = self.current_tag()?;
        let logs = self.rolling_log_history()?;
        let next = Self::next_after(base, &logs)?;
        Ok(ChangeLog::from_subjects(next, &logs))
    }

    /// Publish `release/{next}` to the remote without leaving the current
    /// branch.
    ///
    /// The local release branch is removed afterwards, also when the push
    /// fails.
    pub fn release_branch(&self) -> Result<String> {
        let Some(version) = self.increased_version()? else {
            bail!("There is no need to build a release at this point");
        };
        let branch = format!("{RELEASE_BRANCH_PREFIX}{version}");
        let original = xlr8_git::current_branch(&self.repo)?;

        info!(%branch, "preparing release branch");
        xlr8_git::checkout_new_branch(&self.repo, &branch)?;
        let pushed = xlr8_git::push_upstream(&self.repo, &self.remote, &branch);
        xlr8_git::checkout(&self.repo, &original)
            .with_context(|| format!("Failed to return to branch '{original}'"))?;
        xlr8_git::delete_branch(&self.repo, &branch)?;
        pushed.with_context(|| format!("Failed to publish '{branch}'"))?;

        info!(%branch, "release branch published");
        Ok(branch)
    }
}
