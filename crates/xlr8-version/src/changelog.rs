use std::fmt;

use crate::commit::{CommitKind, classify_subject};
use crate::version::Version;

/// Release notes grouped by commit kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeLog {
    pub version: Option<Version>,
    entries: Vec<(CommitKind, String)>,
}

impl ChangeLog {
    /// Collect the conventional commits among `subjects`, oldest order kept.
    ///
    /// The entry text is everything after the first colon, trimmed.
    pub fn from_subjects<S: AsRef<str>>(version: Option<Version>, subjects: &[S]) -> Self {
        let entries = subjects
            .iter()
            .filter_map(|subject| {
                let subject = subject.as_ref();
                let kind = classify_subject(subject)?;
                let message = subject
                    .split_once(':')
                    .map(|(_, rest)| rest.trim())
                    .unwrap_or_default();
                Some((kind, message.to_string()))
            })
            .collect();
        Self { version, entries }
    }

    pub fn entries(&self, kind: CommitKind) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(move |(k, _)| *k == kind)
            .map(|(_, message)| message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rendered Markdown, one element per line.
    pub fn lines(&self) -> Vec<String> {
        let title = match self.version {
            Some(version) => version.to_string(),
            None => "unreleased".to_string(),
        };

        let mut out = vec![format!("Version {title} changelog"), String::new()];
        for kind in CommitKind::ALL {
            let mut messages = self.entries(kind).peekable();
            if messages.peek().is_none() {
                continue;
            }
            out.push(format!("## {}", kind.heading()));
            out.extend(messages.map(|message| format!("  - {message}")));
            out.push(String::new());
        }
        out
    }
}

impl fmt::Display for ChangeLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
