//! Remote repository access for branchscope.
//!
//! [`RepoHost`] is the narrow read-only interface the report builders
//! depend on; [`GitHubHost`] is the octocrab-backed implementation bound to
//! a single `owner/repo`. Authentication, pagination, and rate limiting are
//! the client library's concern, not the builders'.

// RepoHost is only used with static dispatch (generic builders, in-memory
// fakes in tests), so plain async fns in the trait are fine.
#![allow(async_fn_in_trait)]

mod client;
mod host;
mod models;

pub use client::{parse_repo_name, GitHubHost};
pub use host::{PullState, RepoHost};
pub use models::{
    Account, BranchRef, Comparison, CommitRef, Contributor, PullRequest, Release, RepoMetadata,
};
