//! Sequential reconciliation of every package in a tree

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info};

use crate::bump::decision::Decision;
use crate::bump::engine::{Outcome, reconcile};
use crate::bump::error::BumpError;
use crate::bump::mutation::RewriteIntent;
use crate::definition::error::DefinitionError;
use crate::definition::labels::{AutobumpConfig, SKIP_IF_CONTAINS, STRING_REPLACE};
use crate::definition::loader::{self, TreeEntry};
use crate::definition::patch::DefinitionWriter;
use crate::definition::types::{Definition, Package};
use crate::report::{PackageInfo, Reporter, RunEvent};
use crate::upstream::source::UpstreamSource;

#[derive(Debug, Error)]
pub enum PackageError {
    #[error(transparent)]
    Definition(#[from] DefinitionError),

    #[error(transparent)]
    Bump(#[from] BumpError),
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Tree(DefinitionError),

    #[error("Processing {} failed: {source}", .path.display())]
    Package {
        path: PathBuf,
        #[source]
        source: PackageError,
    },
}

/// Counters for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub bumped: usize,
    pub pinned: usize,
    pub up_to_date: usize,
    pub ahead: usize,
    pub skipped: usize,
    pub ignored: usize,
    pub collections: usize,
    pub failed: usize,
    pub mutation_failures: usize,
}

/// Walks a tree and reconciles one package at a time
pub struct Runner<'a> {
    source: &'a dyn UpstreamSource,
    writer: &'a dyn DefinitionWriter,
    reporter: &'a dyn Reporter,
    today: NaiveDate,
    fail_on_error: bool,
}

impl<'a> Runner<'a> {
    pub fn new(
        source: &'a dyn UpstreamSource,
        writer: &'a dyn DefinitionWriter,
        reporter: &'a dyn Reporter,
        today: NaiveDate,
        fail_on_error: bool,
    ) -> Self {
        Self {
            source,
            writer,
            reporter,
            today,
            fail_on_error,
        }
    }

    /// Process every package under `tree_dir`
    ///
    /// Package errors are reported and the walk continues, unless
    /// `fail_on_error` is set, in which case the first one is returned. A tree
    /// root that cannot be listed always fails the run.
    pub async fn run(&self, tree_dir: &Path) -> Result<RunSummary, RunError> {
        let mut summary = RunSummary::default();
        let entries = loader::discover(tree_dir).map_err(RunError::Tree)?;

        for entry in entries {
            match entry {
                TreeEntry::Collection(path) => {
                    summary.collections += 1;
                    self.reporter.report(RunEvent::SkippedCollection { path });
                }
                TreeEntry::Package(path) => {
                    if let Err(source) = self.process(&path, &mut summary).await {
                        summary.failed += 1;
                        self.reporter.report(RunEvent::Failed {
                            path: path.clone(),
                            error: source.to_string(),
                        });
                        if self.fail_on_error {
                            return Err(RunError::Package { path, source });
                        }
                    }
                }
            }
        }

        info!(
            bumped = summary.bumped,
            pinned = summary.pinned,
            up_to_date = summary.up_to_date,
            ahead = summary.ahead,
            skipped = summary.skipped,
            ignored = summary.ignored,
            failed = summary.failed,
            "Run finished"
        );
        Ok(summary)
    }

    async fn process(&self, path: &Path, summary: &mut RunSummary) -> Result<(), PackageError> {
        let definition = loader::load(path)?;
        let package = &definition.package;

        if package.is_ignored() {
            summary.ignored += 1;
            self.reporter.report(RunEvent::Ignored {
                package: package.name.clone(),
            });
            return Ok(());
        }

        let config = AutobumpConfig::from_package(package).map_err(BumpError::from)?;
        self.reporter
            .report(RunEvent::Checking(Box::new(package_info(package, &config))));
        let result = reconcile(self.source, package, &config, self.today).await?;

        match &result.outcome {
            Outcome::Pinned => {
                summary.pinned += 1;
                self.reporter.report(RunEvent::Pinned {
                    package: package.name.clone(),
                    sha: result.candidate.clone(),
                });
            }
            Outcome::Skipped { matched } => {
                summary.skipped += 1;
                self.reporter.report(RunEvent::Skipped {
                    package: package.name.clone(),
                    candidate: result.candidate.clone(),
                    matched: matched.clone(),
                });
            }
            Outcome::Decided(decision) => {
                let version = result.version.clone().unwrap_or_default();
                self.reporter.report(RunEvent::Resolved {
                    package: package.name.clone(),
                    version: version.clone(),
                    current: package.version.clone(),
                });
                match decision {
                    Decision::Bump => summary.bumped += 1,
                    Decision::UpToDate => summary.up_to_date += 1,
                    Decision::Ahead => summary.ahead += 1,
                }
                self.reporter.report(RunEvent::Decided {
                    package: package.name.clone(),
                    category: package.category.clone(),
                    strategy: config.strategy.name().to_string(),
                    version,
                    decision: *decision,
                });
            }
        }

        self.apply(&definition, &result.intents, summary);
        Ok(())
    }

    /// Write every intent; failures are reported and never stop the run
    fn apply(
        &self,
        definition: &Definition,
        intents: &[RewriteIntent],
        summary: &mut RunSummary,
    ) {
        let file = definition.file();
        for intent in intents {
            debug!("Rewriting {} in {:?}", intent, file);
            if let Err(e) = self.writer.write(&file, intent) {
                summary.mutation_failures += 1;
                self.reporter.report(RunEvent::MutationFailed {
                    package: definition.package.name.clone(),
                    key: intent.key.to_string(),
                    error: e.to_string(),
                });
            }
        }
    }
}

fn package_info(package: &Package, config: &AutobumpConfig) -> PackageInfo {
    let label = |key: &str| package.label(key).unwrap_or_default().to_string();
    PackageInfo {
        name: package.name.clone(),
        category: package.category.clone(),
        version: package.version.clone(),
        owner: config.repository.owner.clone(),
        repo: config.repository.repo.clone(),
        strategy: config.strategy.name().to_string(),
        prefix: config.prefix.clone().unwrap_or_default(),
        reverse_dependencies: config.reverse_dependencies,
        trim_prefix: config.transform.trim_prefix().unwrap_or_default().to_string(),
        string_replace: label(STRING_REPLACE),
        skip_if_contains: label(SKIP_IF_CONTAINS),
        version_contains: config.version_contains.clone().unwrap_or_default(),
    }
}
