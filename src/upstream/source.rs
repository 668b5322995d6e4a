//! Source trait for looking up releases, tags and refs of a repository

#[cfg(test)]
use mockall::automock;

use crate::upstream::error::ApiError;
use crate::upstream::types::{GitRef, Release, Repository, Tag};

/// Read-only view of a hosted repository
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait UpstreamSource: Send + Sync {
    /// Latest published release
    async fn latest_release(&self, repository: &Repository) -> Result<Release, ApiError>;

    /// Release published for one fixed tag
    async fn release_by_tag(&self, repository: &Repository, tag: &str)
    -> Result<Release, ApiError>;

    /// All tag refs (`refs/tags/*`), in API order
    async fn tag_refs(&self, repository: &Repository) -> Result<Vec<GitRef>, ApiError>;

    /// Ref of the head commit of a branch
    async fn head_ref(&self, repository: &Repository, branch: &str) -> Result<GitRef, ApiError>;

    /// All tags, in API order
    async fn tags(&self, repository: &Repository) -> Result<Vec<Tag>, ApiError>;
}
