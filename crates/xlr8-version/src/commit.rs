use serde::{Deserialize, Serialize};

use crate::version::{Bump, Version, VersionError};

/// Release-relevant commit categories, in decreasing precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitKind {
    Breaking,
    Feature,
    Fix,
}

impl CommitKind {
    /// Subject prefixes that select this kind.
    pub fn prefixes(self) -> &'static [&'static str] {
        match self {
            CommitKind::Breaking => &["BREAKING CHANGE", "BREAKING CHANGES"],
            CommitKind::Feature => &["feat"],
            CommitKind::Fix => &["fix"],
        }
    }

    pub fn bump(self) -> Bump {
        match self {
            CommitKind::Breaking => Bump::Major,
            CommitKind::Feature => Bump::Minor,
            CommitKind::Fix => Bump::Patch,
        }
    }

    /// Changelog section heading.
    pub fn heading(self) -> &'static str {
        match self {
            CommitKind::Breaking => "Breaking Changes",
            CommitKind::Feature => "Features",
            CommitKind::Fix => "Fixes",
        }
    }

    pub const ALL: [CommitKind; 3] = [CommitKind::Breaking, CommitKind::Feature, CommitKind::Fix];
}

/// Classify a commit subject by its conventional-commit prefix.
///
/// A subject matches `prefix` when it is `prefix:` or `prefix(scope):` at the
/// very start, where `scope` is one or more word characters. Matching is
/// case-sensitive; `feat!:`, `feat():` and `Feat:` do not match.
pub fn classify_subject(subject: &str) -> Option<CommitKind> {
    CommitKind::ALL.into_iter().find(|kind| {
        kind.prefixes()
            .iter()
            .any(|prefix| matches_prefix(subject, prefix))
    })
}

fn matches_prefix(subject: &str, prefix: &str) -> bool {
    let Some(rest) = subject.strip_prefix(prefix) else {
        return false;
    };
    if rest.starts_with(':') {
        return true;
    }
    let Some(scoped) = rest.strip_prefix('(') else {
        return false;
    };
    let Some(close) = scoped.find(')') else {
        return false;
    };
    let scope = &scoped[..close];
    !scope.is_empty()
        && scope.chars().all(is_word_char)
        && scoped[close + 1..].starts_with(':')
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// The bump demanded by a run of commit subjects, if any.
///
/// Any breaking change wins over any feature, which wins over any fix.
pub fn required_bump<S: AsRef<str>>(subjects: &[S]) -> Option<Bump> {
    subjects
        .iter()
        .filter_map(|s| classify_subject(s.as_ref()))
        .min()
        .map(CommitKind::bump)
}

/// The version that should follow `base` given the commits since it.
///
/// `Ok(None)` means nothing since `base` warrants a release.
pub fn next_version<S: AsRef<str>>(
    base: Version,
    subjects: &[S],
) -> Result<Option<Version>, VersionError> {
    required_bump(subjects).map(|bump| base.bump(bump)).transpose()
}
