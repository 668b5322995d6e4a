//! Payloads returned by the GitHub REST API

use std::fmt;

use serde::Deserialize;

/// Owner/repository pair identifying an upstream project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub repo: String,
}

impl Repository {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// `GET /repos/{owner}/{repo}/releases/...`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    pub tag_name: String,
}

/// `GET /repos/{owner}/{repo}/tags`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Tag {
    pub name: String,
}

/// `GET /repos/{owner}/{repo}/git/refs/...`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GitRef {
    #[serde(rename = "ref")]
    pub name: String,
    pub object: GitRefObject,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GitRefObject {
    pub sha: String,
}

impl GitRef {
    /// Ref name without the first `refs/tags/` occurrence
    pub fn tag_name(&self) -> String {
        self.name.replacen("refs/tags/", "", 1)
    }
}
