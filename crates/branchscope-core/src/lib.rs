//! Core types, configuration, and error handling for branchscope.
//!
//! This crate provides the shared foundation used by the other branchscope
//! crates:
//! - [`ScopeError`] — unified error type using `thiserror`
//! - [`ScopeConfig`] — configuration loaded from `.branchscope.toml`
//! - Value types: [`Commit`], [`RepositorySummary`], [`BranchTree`]
//! - [`logging`] — one-shot tracing initialization from a [`LogConfig`]

mod config;
mod error;
pub mod logging;
mod types;

pub use config::{LogConfig, ScopeConfig};
pub use error::ScopeError;
pub use types::{BranchTree, Commit, RepositorySummary};

/// A convenience `Result` type for branchscope operations.
pub type Result<T> = std::result::Result<T, ScopeError>;
