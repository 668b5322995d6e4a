//! Typed view over the autobump labels of a package

use indexmap::IndexMap;
use tracing::warn;

use crate::bump::error::ConfigError;
use crate::bump::strategy::Strategy;
use crate::bump::transform::VersionTransform;
use crate::definition::types::Package;
use crate::upstream::types::Repository;

pub const GITHUB_OWNER: &str = "github.owner";
pub const GITHUB_REPO: &str = "github.repo";
pub const GITHUB_BRANCH: &str = "github.branch";
pub const GITHUB_TAG: &str = "github.tag";
pub const GIT_HASH: &str = "git.hash";
pub const IGNORE: &str = "autobump.ignore";
pub const STRATEGY: &str = "autobump.strategy";
pub const REVERSE_DEPENDENCIES: &str = "autobump.reverse_dependencies";
pub const PREFIX: &str = "autobump.prefix";
pub const TRIM_PREFIX: &str = "autobump.trim_prefix";
pub const STRING_REPLACE: &str = "autobump.string_replace";
pub const SKIP_IF_CONTAINS: &str = "autobump.skip_if_contains";
pub const VERSION_CONTAINS: &str = "autobump.version_contains";

/// Autobump configuration of one package, built once from its labels
#[derive(Debug, Clone)]
pub struct AutobumpConfig {
    pub repository: Repository,
    pub strategy: Strategy,
    pub version_contains: Option<String>,
    pub transform: VersionTransform,
    /// Read and reported, not acted upon
    pub prefix: Option<String>,
    /// Read and reported, not acted upon
    pub reverse_dependencies: bool,
}

impl AutobumpConfig {
    pub fn from_package(package: &Package) -> Result<Self, ConfigError> {
        let owner = package
            .label(GITHUB_OWNER)
            .ok_or(ConfigError::MissingLabel(GITHUB_OWNER))?;
        let repo = package
            .label(GITHUB_REPO)
            .ok_or(ConfigError::MissingLabel(GITHUB_REPO))?;

        let strategy = Strategy::from_label(
            package.label(STRATEGY),
            package.label(GITHUB_BRANCH),
            package.label(GITHUB_TAG),
        )?;

        let replacements = match package.label(STRING_REPLACE) {
            Some(raw) => {
                let map: IndexMap<String, String> = parse_json(STRING_REPLACE, raw)?;
                VersionTransform::replacements_from_map(map)?
            }
            None => Vec::new(),
        };
        let skip_if_contains = package
            .label(SKIP_IF_CONTAINS)
            .map(|raw| skip_list(&package.name, raw))
            .unwrap_or_default();

        Ok(Self {
            repository: Repository::new(owner, repo),
            strategy,
            version_contains: package.label(VERSION_CONTAINS).map(str::to_string),
            transform: VersionTransform::new(
                replacements,
                skip_if_contains,
                package.label(TRIM_PREFIX).map(str::to_string),
            ),
            prefix: package.label(PREFIX).map(str::to_string),
            reverse_dependencies: reverse_dependencies(package),
        })
    }
}

/// `"true"` or unset enables reverse dependency bumps
fn reverse_dependencies(package: &Package) -> bool {
    matches!(package.label(REVERSE_DEPENDENCIES), None | Some("true"))
}

/// A list that is not a JSON string array disables the filter
fn skip_list(package: &str, raw: &str) -> Vec<String> {
    parse_json::<Vec<String>>(SKIP_IF_CONTAINS, raw)
        .inspect_err(|e| warn!(package = %package, "Ignoring skip filter: {}", e))
        .unwrap_or_default()
}

fn parse_json<T: serde::de::DeserializeOwned>(
    label: &'static str,
    raw: &str,
) -> Result<T, ConfigError> {
    serde_json::from_str(raw).map_err(|source| ConfigError::InvalidJson { label, source })
}
