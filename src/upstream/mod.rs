//! Upstream layer for discovering released versions on GitHub
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────────┐
//! │  UpstreamSource  │◀────│   GitHubSource   │
//! │     (trait)      │     │  (reqwest, REST) │
//! └──────────────────┘     └──────────────────┘
//!          ▲
//!          │ latest_release / release_by_tag / tag_refs / head_ref / tags
//!          │
//! ┌──────────────────┐
//! │  bump::strategy  │
//! └──────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`source`]: `UpstreamSource` trait used by the strategies
//! - [`github`]: GitHub REST API implementation
//! - [`types`]: Response payloads and the `Repository` coordinate
//! - [`error`]: Error type for remote calls

pub mod error;
pub mod github;
pub mod source;
pub mod types;

pub use error::ApiError;
pub use github::GitHubSource;
pub use source::UpstreamSource;
pub use types::{GitRef, GitRefObject, Release, Repository, Tag};
