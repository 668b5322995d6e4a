//! Strategies for discovering the upstream candidate of a package

use std::cmp::Ordering;
use std::fmt;

use crate::bump::error::ConfigError;
use crate::bump::semver::compare;
use crate::config::DEFAULT_BRANCH;
use crate::definition::labels::GITHUB_TAG;
use crate::upstream::error::ApiError;
use crate::upstream::source::UpstreamSource;
use crate::upstream::types::Repository;

/// How a package discovers its upstream candidate
///
/// Selected by the `autobump.strategy` label. Every value that is not one of
/// the named strategies maps to [`Strategy::Tags`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Tag name of the latest published release
    Release,
    /// Best tag among `refs/tags/*`
    Refs,
    /// Head commit SHA of a branch
    GitHash { branch: String },
    /// Tag name of the release published for one fixed tag
    ReleaseTag { tag: String },
    /// Best tag among the tag list
    ///
    /// `tracks_tag_label` is set for the `github_tag` marker, which also
    /// rewrites `labels."github.tag"` on a bump.
    Tags { tracks_tag_label: bool },
}

impl Strategy {
    /// Build the strategy from the `autobump.strategy` value and the labels
    /// the individual strategies need
    pub fn from_label(
        kind: Option<&str>,
        branch: Option<&str>,
        tag: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let strategy = match kind {
            Some("release") => Strategy::Release,
            Some("refs") => Strategy::Refs,
            Some("git_hash") => Strategy::GitHash {
                branch: branch
                    .filter(|b| !b.is_empty())
                    .unwrap_or(DEFAULT_BRANCH)
                    .to_string(),
            },
            Some("release_tag") => Strategy::ReleaseTag {
                tag: tag
                    .filter(|t| !t.is_empty())
                    .ok_or(ConfigError::MissingLabel(GITHUB_TAG))?
                    .to_string(),
            },
            Some("github_tag") => Strategy::Tags {
                tracks_tag_label: true,
            },
            _ => Strategy::Tags {
                tracks_tag_label: false,
            },
        };
        Ok(strategy)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Release => "release",
            Strategy::Refs => "refs",
            Strategy::GitHash { .. } => "git_hash",
            Strategy::ReleaseTag { .. } => "release_tag",
            Strategy::Tags {
                tracks_tag_label: true,
            } => "github_tag",
            Strategy::Tags {
                tracks_tag_label: false,
            } => "tags",
        }
    }

    /// Whether the candidate is a version that goes through the transform
    /// pipeline and the comparator
    pub fn updates_version(&self) -> bool {
        !matches!(self, Strategy::GitHash { .. })
    }

    /// Whether a bump also rewrites `labels."github.tag"`
    pub fn writes_tag_label(&self) -> bool {
        matches!(
            self,
            Strategy::ReleaseTag { .. }
                | Strategy::Tags {
                    tracks_tag_label: true
                }
        )
    }

    /// Ask the upstream source for this strategy's candidate
    pub async fn resolve<S: UpstreamSource + ?Sized>(
        &self,
        source: &S,
        repository: &Repository,
        version_contains: Option<&str>,
    ) -> Result<String, ApiError> {
        match self {
            Strategy::Release => Ok(source.latest_release(repository).await?.tag_name),
            Strategy::Refs => {
                let refs = source.tag_refs(repository).await?;
                let names: Vec<String> = refs.iter().map(|r| r.tag_name()).collect();
                Ok(select_tag(names.iter().map(String::as_str), version_contains))
            }
            Strategy::GitHash { branch } => {
                Ok(source.head_ref(repository, branch).await?.object.sha)
            }
            Strategy::ReleaseTag { tag } => {
                Ok(source.release_by_tag(repository, tag).await?.tag_name)
            }
            Strategy::Tags { .. } => {
                let tags = source.tags(repository).await?;
                Ok(select_tag(
                    tags.iter().map(|t| t.name.as_str()),
                    version_contains,
                ))
            }
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pick the candidate out of a tag list
///
/// With `version_contains`, the last name equal to it wins. Otherwise the
/// running semver maximum starting from `""` wins; ties keep the first
/// maximum, and unparseable names never replace the empty start value.
pub fn select_tag<'a>(
    names: impl IntoIterator<Item = &'a str>,
    version_contains: Option<&str>,
) -> String {
    let mut latest = "";
    for name in names {
        match version_contains {
            Some(wanted) => {
                if name == wanted {
                    latest = name;
                }
            }
            None => {
                if compare(name, latest) == Ordering::Greater {
                    latest = name;
                }
            }
        }
    }
    latest.to_string()
}
