//! Normalization of a raw candidate before comparison and persistence

use indexmap::IndexMap;
use regex::Regex;
use tracing::debug;

use crate::bump::error::ConfigError;

/// One `autobump.string_replace` entry
#[derive(Debug, Clone)]
pub struct Replacement {
    pattern: Regex,
    with: String,
}

impl Replacement {
    pub fn new(pattern: &str, with: impl Into<String>) -> Result<Self, ConfigError> {
        let compiled = Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            pattern: compiled,
            with: with.into(),
        })
    }
}

/// Ordered transform pipeline: replace, skip filter, prefix trim
#[derive(Debug, Clone, Default)]
pub struct VersionTransform {
    replacements: Vec<Replacement>,
    skip_if_contains: Vec<String>,
    trim_prefix: Option<String>,
}

impl VersionTransform {
    pub fn new(
        replacements: Vec<Replacement>,
        skip_if_contains: Vec<String>,
        trim_prefix: Option<String>,
    ) -> Self {
        Self {
            replacements,
            skip_if_contains,
            trim_prefix: trim_prefix.filter(|p| !p.is_empty()),
        }
    }

    /// Build the replacements from a pattern → replacement map, keeping its order
    pub fn replacements_from_map(
        map: IndexMap<String, String>,
    ) -> Result<Vec<Replacement>, ConfigError> {
        map.into_iter()
            .map(|(pattern, with)| Replacement::new(&pattern, with))
            .collect()
    }

    /// Apply every replacement in order, each one globally
    pub fn replace(&self, candidate: &str) -> String {
        let mut version = candidate.to_string();
        for replacement in &self.replacements {
            debug!(
                "Replacing {} with {}",
                replacement.pattern.as_str(),
                replacement.with
            );
            version = replacement
                .pattern
                .replace_all(&version, replacement.with.as_str())
                .into_owned();
        }
        version
    }

    /// First configured needle contained in the candidate
    pub fn skip_match(&self, candidate: &str) -> Option<&str> {
        self.skip_if_contains
            .iter()
            .find(|needle| candidate.contains(needle.as_str()))
            .map(String::as_str)
    }

    /// Version written back to the definition
    ///
    /// Strips `trim_prefix` when configured, otherwise one leading `v`.
    pub fn trim(&self, candidate: &str) -> String {
        let trimmed = match &self.trim_prefix {
            Some(prefix) => candidate.strip_prefix(prefix.as_str()),
            None => candidate.strip_prefix('v'),
        };
        trimmed.unwrap_or(candidate).to_string()
    }

    pub fn trim_prefix(&self) -> Option<&str> {
        self.trim_prefix.as_deref()
    }
}
