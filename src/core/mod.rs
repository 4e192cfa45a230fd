//! Core engine for monorail
//!
//! - **config**: monorail.toml parsing and validation
//! - **context**: Per-invocation repository context (root, config, modules)
//! - **error**: Error types with contextual help messages and exit codes
//! - **vcs**: History-query port and its system git implementation

pub mod config;
pub mod context;
pub mod error;
pub mod vcs;
