use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from parsing or bumping a release version.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("Version is empty; tags must follow MAJOR.MINOR.PATCH")]
    Empty,

    #[error("Version '{input}' has {parts} parts; tags must follow MAJOR.MINOR.PATCH")]
    WrongArity { input: String, parts: usize },

    #[error("Version '{input}' has a non-numeric component '{component}'")]
    InvalidComponent { input: String, component: String },

    #[error("Version {version} cannot be bumped: {component} is already at its maximum")]
    Overflow {
        version: Version,
        component: &'static str,
    },
}

/// Which component of a version to increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bump {
    Major,
    Minor,
    Patch,
}

/// A `MAJOR.MINOR.PATCH` release version.
///
/// Serializes as its dotted string form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Increment one component and reset every component after it.
    ///
    /// Fails rather than wrapping when the component is at `u64::MAX`.
    pub fn bump(self, bump: Bump) -> Result<Self, VersionError> {
        let overflow = |component| VersionError::Overflow {
            version: self,
            component,
        };
        match bump {
            Bump::Major => {
                let major = self.major.checked_add(1).ok_or_else(|| overflow("major"))?;
                Ok(Self::new(major, 0, 0))
            }
            Bump::Minor => {
                let minor = self.minor.checked_add(1).ok_or_else(|| overflow("minor"))?;
                Ok(Self::new(self.major, minor, 0))
            }
            Bump::Patch => {
                let patch = self.patch.checked_add(1).ok_or_else(|| overflow("patch"))?;
                Ok(Self::new(self.major, self.minor, patch))
            }
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(VersionError::Empty);
        }

        let parts: Vec<&str> = input.split('.').collect();
        if parts.len() != 3 {
            return Err(VersionError::WrongArity {
                input: input.to_string(),
                parts: parts.len(),
            });
        }

        let component = |raw: &str| -> Result<u64, VersionError> {
            let invalid = || VersionError::InvalidComponent {
                input: input.to_string(),
                component: raw.to_string(),
            };
            // u64::from_str accepts a leading '+', which tags never carry.
            if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            raw.parse::<u64>().map_err(|_| invalid())
        };

        Ok(Self::new(
            component(parts[0])?,
            component(parts[1])?,
            component(parts[2])?,
        ))
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}

impl TryFrom<String> for Version {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The version string published for a build.
///
/// A build sitting exactly on a tag is stable. Any commit after the tag
/// makes it unstable, labelled `{base}-unstable{commits:04}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionLabel {
    Stable(Version),
    Unstable { base: Version, commits: u64 },
}

impl VersionLabel {
    /// `ignore_dirty` reports the base version even when commits follow it.
    pub fn new(base: Version, commits: u64, ignore_dirty: bool) -> Self {
        if commits == 0 || ignore_dirty {
            VersionLabel::Stable(base)
        } else {
            VersionLabel::Unstable { base, commits }
        }
    }

    pub fn base(&self) -> Version {
        match self {
            VersionLabel::Stable(base) | VersionLabel::Unstable { base, .. } => *base,
        }
    }

    pub fn is_stable(&self) -> bool {
        matches!(self, VersionLabel::Stable(_))
    }
}

impl fmt::Display for VersionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionLabel::Stable(base) => write!(f, "{base}"),
            VersionLabel::Unstable { base, commits } => write!(f, "{base}-unstable{commits:04}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dotted_triple() {
        assert_eq!("1.2.3".parse::<Version>().unwrap(), Version::new(1, 2, 3));
        assert_eq!(" 0.10.0\n".parse::<Version>().unwrap(), Version::new(0, 10, 0));
    }

    #[test]
    fn rejects_malformed_tags() {
        assert_eq!("".parse::<Version>(), Err(VersionError::Empty));
        assert!(matches!(
            "1.2".parse::<Version>(),
            Err(VersionError::WrongArity { parts: 2, .. })
        ));
        assert!(matches!(
            "v1.2.3".parse::<Version>(),
            Err(VersionError::InvalidComponent { .. })
        ));
        assert!(matches!(
            "1.+2.3".parse::<Version>(),
            Err(VersionError::InvalidComponent { .. })
        ));
        assert!(matches!(
            "1..3".parse::<Version>(),
            Err(VersionError::InvalidComponent { .. })
        ));
    }

    #[test]
    fn bump_resets_lower_components() {
        let v = Version::new(1, 4, 7);
        assert_eq!(v.bump(Bump::Major), Ok(Version::new(2, 0, 0)));
        assert_eq!(v.bump(Bump::Minor), Ok(Version::new(1, 5, 0)));
        assert_eq!(v.bump(Bump::Patch), Ok(Version::new(1, 4, 8)));
    }

    #[test]
    fn bump_at_component_maximum_is_an_error() {
        let top: Version = "18446744073709551615.0.0".parse().unwrap();
        assert_eq!(top.major, u64::MAX);
        assert_eq!(
            top.bump(Bump::Major),
            Err(VersionError::Overflow {
                version: top,
                component: "major",
            })
        );
        assert_eq!(top.bump(Bump::Minor), Ok(Version::new(u64::MAX, 1, 0)));

        let v = Version::new(1, u64::MAX, u64::MAX);
        assert!(matches!(
            v.bump(Bump::Minor),
            Err(VersionError::Overflow { component: "minor", .. })
        ));
        assert!(matches!(
            v.bump(Bump::Patch),
            Err(VersionError::Overflow { component: "patch", .. })
        ));
        assert_eq!(v.bump(Bump::Major), Ok(Version::new(2, 0, 0)));
    }

    #[test]
    fn label_is_stable_on_tag_or_when_ignoring_dirty() {
        let base = Version::new(1, 0, 0);
        assert_eq!(VersionLabel::new(base, 0, false).to_string(), "1.0.0");
        assert_eq!(VersionLabel::new(base, 12, true).to_string(), "1.0.0");
        assert_eq!(
            VersionLabel::new(base, 12, false).to_string(),
            "1.0.0-unstable0012"
        );
    }

    #[test]
    fn label_does_not_truncate_large_counts() {
        let label = VersionLabel::new(Version::new(0, 1, 0), 123_456, false);
        assert_eq!(label.to_string(), "0.1.0-unstable123456");
        assert_eq!(label.base(), Version::new(0, 1, 0));
        assert!(!label.is_stable());
    }
}
