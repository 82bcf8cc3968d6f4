//! # xlr8-version
//!
//! **Tier 0 (Pure Logic)**
//!
//! Release-version arithmetic driven by conventional commits.
//!
//! ## What belongs here
//! * `MAJOR.MINOR.PATCH` parsing and bumping
//! * Conventional-commit subject classification
//! * Unstable build labels and changelog rendering
//!
//! ## What does NOT belong here
//! * Running git (use xlr8-git)
//! * Tagging or branching (use xlr8-release)

#![forbid(unsafe_code)]

mod changelog;
mod commit;
mod version;

pub use changelog::ChangeLog;
pub use commit::{CommitKind, classify_subject, next_version, required_bump};
pub use version::{Bump, Version, VersionError, VersionLabel};
