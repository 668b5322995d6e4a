//! Version resolution and reconciliation engine
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Strategy   │────▶│  Transform  │────▶│  Decision   │────▶│  Mutation   │
//! │  (resolve)  │     │ (normalize) │     │  (compare)  │     │  (intents)  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`strategy`]: The five ways of discovering a candidate
//! - [`transform`]: String replace, skip filter and prefix trim
//! - [`semver`]: Tolerant semver ordering
//! - [`decision`]: Bump / up-to-date / ahead classification
//! - [`mutation`]: Rewrite intents for the definition document
//! - [`engine`]: Runs the pipeline for one package
//! - [`error`]: Configuration and strategy errors

pub mod decision;
pub mod engine;
pub mod error;
pub mod mutation;
pub mod semver;
pub mod strategy;
pub mod transform;
