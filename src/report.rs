//! Progress reporting for a run
//!
//! The runner never prints directly; it emits [`RunEvent`]s to a
//! [`Reporter`]. [`TracingReporter`] turns them into structured `tracing`
//! events, tests record them.

use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::bump::decision::Decision;

/// Package settings reported before it is checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    pub name: String,
    pub category: String,
    pub version: String,
    pub owner: String,
    pub repo: String,
    pub strategy: String,
    pub prefix: String,
    pub reverse_dependencies: bool,
    pub trim_prefix: String,
    pub string_replace: String,
    pub skip_if_contains: String,
    pub version_contains: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    SkippedCollection {
        path: PathBuf,
    },
    Checking(Box<PackageInfo>),
    Ignored {
        package: String,
    },
    /// `git_hash` resolved a head commit
    Pinned {
        package: String,
        sha: String,
    },
    Skipped {
        package: String,
        candidate: String,
        matched: String,
    },
    Resolved {
        package: String,
        version: String,
        current: String,
    },
    Decided {
        package: String,
        category: String,
        strategy: String,
        version: String,
        decision: Decision,
    },
    Failed {
        path: PathBuf,
        error: String,
    },
    MutationFailed {
        package: String,
        key: String,
        error: String,
    },
}

/// Sink for run progress
pub trait Reporter: Send + Sync {
    fn report(&self, event: RunEvent);
}

/// Reporter that logs every event through `tracing`
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, event: RunEvent) {
        match event {
            RunEvent::SkippedCollection { path } => {
                info!(path = %path.display(), "Skipping collection");
            }
            RunEvent::Checking(info) => {
                info!(
                    package = %info.name,
                    category = %info.category,
                    version = %info.version,
                    github = %format!("{} / {}", info.owner, info.repo),
                    strategy = %info.strategy,
                    prefix = %info.prefix,
                    reverse_dependencies = info.reverse_dependencies,
                    trim_prefix = %info.trim_prefix,
                    string_replace = %info.string_replace,
                    skip_if_contains = %info.skip_if_contains,
                    version_contains = %info.version_contains,
                    "Checking updates for package"
                );
            }
            RunEvent::Ignored { package } => {
                info!(package = %package, "Ignoring package");
            }
            RunEvent::Pinned { package, sha } => {
                info!(package = %package, sha = %sha, "Pinned to head commit");
            }
            RunEvent::Skipped {
                package,
                candidate,
                matched,
            } => {
                info!(
                    package = %package,
                    candidate = %candidate,
                    matched = %matched,
                    "Skipping because latest release contains excluded text"
                );
            }
            RunEvent::Resolved {
                package,
                version,
                current,
            } => {
                info!(
                    package = %package,
                    version = %version,
                    current = %current,
                    "Latest version found"
                );
            }
            RunEvent::Decided {
                package,
                category,
                strategy,
                version,
                decision,
            } => match decision {
                Decision::Bump => info!(
                    package = %package,
                    category = %category,
                    strategy = %strategy,
                    version = %version,
                    decision = %decision,
                    "Bumping {}/{} to {}", category, package, version
                ),
                Decision::UpToDate => {
                    info!(package = %package, strategy = %strategy, decision = %decision, "Up to date")
                }
                Decision::Ahead => info!(
                    package = %package,
                    strategy = %strategy,
                    decision = %decision,
                    "Newer version installed"
                ),
            },
            RunEvent::Failed { path, error } => {
                error!(path = %path.display(), "Error: {}", error);
            }
            RunEvent::MutationFailed {
                package,
                key,
                error,
            } => {
                warn!(package = %package, key = %key, "Failed to rewrite definition: {}", error);
            }
        }
    }
}
