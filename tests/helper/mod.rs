//! Test utilities for tree runs

#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use tempfile::TempDir;

use autobump_github::report::{Reporter, RunEvent};
use autobump_github::upstream::{
    ApiError, GitRef, GitRefObject, Release, Repository, Tag, UpstreamSource,
};

/// Mock upstream keyed by `owner/repo`
#[derive(Default)]
pub struct MockSource {
    releases: HashMap<String, String>,
    tags: HashMap<String, Vec<String>>,
    heads: HashMap<String, String>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_release(mut self, repository: &str, tag: &str) -> Self {
        self.releases
            .insert(repository.to_string(), tag.to_string());
        self
    }

    pub fn with_tags(mut self, repository: &str, tags: Vec<&str>) -> Self {
        self.tags.insert(
            repository.to_string(),
            tags.into_iter().map(|t| t.to_string()).collect(),
        );
        self
    }

    pub fn with_head(mut self, repository: &str, sha: &str) -> Self {
        self.heads.insert(repository.to_string(), sha.to_string());
        self
    }

    fn lookup<'a, T>(map: &'a HashMap<String, T>, repository: &Repository) -> Result<&'a T, ApiError> {
        map.get(&repository.to_string())
            .ok_or(ApiError::Http { status: 404 })
    }
}

#[async_trait]
impl UpstreamSource for MockSource {
    async fn latest_release(&self, repository: &Repository) -> Result<Release, ApiError> {
        Self::lookup(&self.releases, repository).map(|tag| Release {
            tag_name: tag.clone(),
        })
    }

    async fn release_by_tag(
        &self,
        repository: &Repository,
        tag: &str,
    ) -> Result<Release, ApiError> {
        Self::lookup(&self.releases, repository)?;
        Ok(Release {
            tag_name: tag.to_string(),
        })
    }

    async fn tag_refs(&self, repository: &Repository) -> Result<Vec<GitRef>, ApiError> {
        Self::lookup(&self.tags, repository).map(|tags| {
            tags.iter()
                .map(|tag| GitRef {
                    name: format!("refs/tags/{}", tag),
                    object: GitRefObject {
                        sha: "0000000".to_string(),
                    },
                })
                .collect()
        })
    }

    async fn head_ref(&self, repository: &Repository, branch: &str) -> Result<GitRef, ApiError> {
        Self::lookup(&self.heads, repository).map(|sha| GitRef {
            name: format!("refs/heads/{}", branch),
            object: GitRefObject { sha: sha.clone() },
        })
    }

    async fn tags(&self, repository: &Repository) -> Result<Vec<Tag>, ApiError> {
        Self::lookup(&self.tags, repository).map(|tags| {
            tags.iter()
                .map(|name| Tag { name: name.clone() })
                .collect()
        })
    }
}

/// Reporter that keeps every event for assertions
#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<RunEvent>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<RunEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, event: RunEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Package tree in a temporary directory
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write `definition.yaml` for `relative` and return the package directory
    pub fn package(&self, relative: &str, content: &str) -> PathBuf {
        let dir = self.root().join(relative);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("definition.yaml"), content).unwrap();
        dir
    }

    pub fn collection(&self, relative: &str) -> PathBuf {
        let dir = self.root().join(relative);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("collection.yaml"), "packages: []\n").unwrap();
        dir
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.root().join(relative).join("definition.yaml")).unwrap()
    }
}
