use std::path::PathBuf;

// =============================================================================
// Tree layout
// =============================================================================

/// Definition document of a package directory
pub const DEFINITION_FILE: &str = "definition.yaml";

/// Marker of a collection directory, which is never bumped
pub const COLLECTION_FILE: &str = "collection.yaml";

// =============================================================================
// Upstream
// =============================================================================

/// Default base URL for GitHub API
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// User agent sent with every API request
pub const USER_AGENT: &str = "autobump-github";

/// Branch used by `git_hash` when `github.branch` is unset
pub const DEFAULT_BRANCH: &str = "master";

/// Format of the date written as version by `git_hash`
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Run configuration, fixed for the whole run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Root of the package tree
    pub tree_dir: Option<PathBuf>,
    /// API token; never empty
    pub token: Option<String>,
    /// Abort on the first package error
    pub fail_on_error: bool,
    pub api_url: String,
}

impl RunConfig {
    pub fn new(
        tree_dir: Option<PathBuf>,
        token: Option<String>,
        fail_on_error: bool,
        api_url: Option<String>,
    ) -> Self {
        Self {
            tree_dir: tree_dir.filter(|dir| !dir.as_os_str().is_empty()),
            token: token.filter(|t| !t.is_empty()),
            fail_on_error,
            api_url: api_url
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new(None, None, false, None)
    }
}

/// `FAIL_ON_ERROR` is enabled only by the exact value `true`
pub fn parse_flag(value: &str) -> Result<bool, String> {
    Ok(value == "true")
}
