//! Rewrite intents produced for a definition document

use std::fmt;

use chrono::NaiveDate;

use crate::bump::strategy::Strategy;
use crate::config::DATE_FORMAT;
use crate::definition::labels::{GIT_HASH, GITHUB_TAG};

/// Key of a definition document targeted by a rewrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyPath {
    /// Top-level `version`
    Version,
    /// `labels."<name>"`
    Label(String),
}

impl KeyPath {
    /// Mapping keys from the document root down to the value
    pub fn segments(&self) -> Vec<&str> {
        match self {
            KeyPath::Version => vec!["version"],
            KeyPath::Label(name) => vec!["labels", name.as_str()],
        }
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPath::Version => f.write_str("version"),
            KeyPath::Label(name) => write!(f, "labels.\"{}\"", name),
        }
    }
}

/// Set `key` to the string `value`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteIntent {
    pub key: KeyPath,
    pub value: String,
}

impl RewriteIntent {
    pub fn version(value: impl Into<String>) -> Self {
        Self {
            key: KeyPath::Version,
            value: value.into(),
        }
    }

    pub fn label(name: &str, value: impl Into<String>) -> Self {
        Self {
            key: KeyPath::Label(name.to_string()),
            value: value.into(),
        }
    }
}

impl fmt::Display for RewriteIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = \"{}\"", self.key, self.value)
    }
}

/// Rewrites for a bump decision
///
/// `candidate` is the untrimmed tag, `version` the trimmed value.
pub fn bump_intents(strategy: &Strategy, candidate: &str, version: &str) -> Vec<RewriteIntent> {
    let mut intents = Vec::with_capacity(2);
    if strategy.writes_tag_label() {
        intents.push(RewriteIntent::label(GITHUB_TAG, candidate));
    }
    intents.push(RewriteIntent::version(version));
    intents
}

/// Rewrites for a resolved `git_hash` head, independent of any comparison
pub fn git_hash_intents(today: NaiveDate, sha: &str) -> Vec<RewriteIntent> {
    vec![
        RewriteIntent::version(today.format(DATE_FORMAT).to_string()),
        RewriteIntent::label(GIT_HASH, sha),
    ]
}
