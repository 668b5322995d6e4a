//! Reconciliation of one package against its upstream

use chrono::NaiveDate;
use tracing::debug;

use crate::bump::decision::Decision;
use crate::bump::error::BumpError;
use crate::bump::mutation::{RewriteIntent, bump_intents, git_hash_intents};
use crate::definition::labels::AutobumpConfig;
use crate::definition::types::Package;
use crate::upstream::source::UpstreamSource;

/// What happened to a package in this run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `git_hash`: version and hash rewritten without comparison
    Pinned,
    /// Candidate contained a `skip_if_contains` entry
    Skipped { matched: String },
    /// Candidate compared against the pinned version
    Decided(Decision),
}

/// Result of reconciling one package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// Candidate after string replacement (the comparison value)
    pub candidate: String,
    /// Trimmed candidate; `None` when the pipeline stopped before trimming
    pub version: Option<String>,
    pub outcome: Outcome,
    pub intents: Vec<RewriteIntent>,
}

/// Resolve, normalize and compare one package's upstream candidate
///
/// Never touches `package`; the result carries the rewrites to perform.
pub async fn reconcile<S: UpstreamSource + ?Sized>(
    source: &S,
    package: &Package,
    config: &AutobumpConfig,
    today: NaiveDate,
) -> Result<Reconciliation, BumpError> {
    let raw = config
        .strategy
        .resolve(
            source,
            &config.repository,
            config.version_contains.as_deref(),
        )
        .await
        .map_err(|source| BumpError::Strategy {
            strategy: config.strategy.name().to_string(),
            source,
        })?;

    if !config.strategy.updates_version() {
        return Ok(Reconciliation {
            intents: git_hash_intents(today, &raw),
            candidate: raw,
            version: None,
            outcome: Outcome::Pinned,
        });
    }

    let candidate = config.transform.replace(&raw);
    if let Some(matched) = config.transform.skip_match(&candidate) {
        debug!("Skipping {}: {} contains {}", package.name, candidate, matched);
        return Ok(Reconciliation {
            outcome: Outcome::Skipped {
                matched: matched.to_string(),
            },
            candidate,
            version: None,
            intents: Vec::new(),
        });
    }

    let version = config.transform.trim(&candidate);
    let decision = Decision::between(&package.version, &candidate);
    let intents = match decision {
        Decision::Bump => bump_intents(&config.strategy, &candidate, &version),
        Decision::UpToDate | Decision::Ahead => Vec::new(),
    };

    Ok(Reconciliation {
        candidate,
        version: Some(version),
        outcome: Outcome::Decided(decision),
        intents,
    })
}
