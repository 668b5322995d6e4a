//! GitHub REST API source implementation

use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::USER_AGENT;
use crate::upstream::error::ApiError;
use crate::upstream::source::UpstreamSource;
use crate::upstream::types::{GitRef, Release, Repository, Tag};

/// Source implementation backed by the GitHub REST API
pub struct GitHubSource {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubSource {
    /// Creates a new GitHubSource against `base_url`
    ///
    /// An empty token is treated as no token.
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
        })
    }

    /// Issues a GET request and returns the raw body
    ///
    /// Anything other than `200 OK` is an error. The response is consumed or
    /// dropped before returning, which releases the connection.
    pub async fn fetch(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Fetching {}", url);

        let mut request = self
            .client
            .get(&url)
            .header(ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("token {}", token));
        }

        let response = request.send().await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            warn!("GitHub API returned status {}: {}", status, url);
            return Err(ApiError::Http {
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let body = self.fetch(path).await?;
        serde_json::from_slice(&body).map_err(|e| {
            warn!("Failed to parse GitHub response for {}: {}", path, e);
            ApiError::Parse(e)
        })
    }
}

/// Percent-encode each `/`-separated segment of a tag or branch name
fn encode_ref(name: &str) -> String {
    name.split('/')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("/")
}

#[async_trait::async_trait]
impl UpstreamSource for GitHubSource {
    async fn latest_release(&self, repository: &Repository) -> Result<Release, ApiError> {
        self.get_json(&format!("/repos/{}/releases/latest", repository))
            .await
    }

    async fn release_by_tag(
        &self,
        repository: &Repository,
        tag: &str,
    ) -> Result<Release, ApiError> {
        self.get_json(&format!(
            "/repos/{}/releases/tags/{}",
            repository,
            encode_ref(tag)
        ))
        .await
    }

    async fn tag_refs(&self, repository: &Repository) -> Result<Vec<GitRef>, ApiError> {
        self.get_json(&format!("/repos/{}/git/refs/tags", repository))
            .await
    }

    async fn head_ref(&self, repository: &Repository, branch: &str) -> Result<GitRef, ApiError> {
        self.get_json(&format!(
            "/repos/{}/git/refs/heads/{}",
            repository,
            encode_ref(branch)
        ))
        .await
    }

    async fn tags(&self, repository: &Repository) -> Result<Vec<Tag>, ApiError> {
        self.get_json(&format!("/repos/{}/tags", repository)).await
    }
}
