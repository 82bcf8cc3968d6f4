use xlr8_version::Version;

use crate::ProjectError;

/// Freezes the base version used instead of `git describe`.
pub const BASE_VERSION_ENV: &str = "XLR8_BASE_VERSION";

/// Freezes the commit count used instead of `git rev-list --count`.
pub const COMMIT_COUNT_ENV: &str = "XLR8_COMMIT_COUNT";

/// Version inputs supplied by the environment rather than git.
///
/// Source archives are built outside a checkout, so the values git would
/// report are captured at packaging time and handed back through these.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VersionOverrides {
    pub base_version: Option<Version>,
    pub commit_count: Option<u64>,
}

impl VersionOverrides {
    pub fn from_env() -> Result<Self, ProjectError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve overrides through `lookup`; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ProjectError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let base_version = read(BASE_VERSION_ENV)
            .map(|raw| raw.parse::<Version>())
            .transpose()?;

        let commit_count = read(COMMIT_COUNT_ENV)
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ProjectError::InvalidOverride {
                        name: COMMIT_COUNT_ENV,
                        value: raw.clone(),
                    })
            })
            .transpose()?;

        Ok(Self {
            base_version,
            commit_count,
        })
    }
}

/// Whether a Python virtualenv is active in this process.
pub fn on_virtualenv() -> bool {
    std::env::var_os("VIRTUAL_ENV").is_some_and(|v| !v.is_empty())
}
