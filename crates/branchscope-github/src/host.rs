use branchscope_core::Result;

use crate::models::{Comparison, CommitRef, Contributor, PullRequest, Release, RepoMetadata};

/// State filter for listing pull requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullState {
    /// Open pull requests only.
    Open,
    /// Closed (including merged) pull requests only.
    Closed,
    /// All pull requests regardless of state.
    All,
}

impl PullState {
    /// The query-parameter value the platform expects.
    pub fn as_str(self) -> &'static str {
        match self {
            PullState::Open => "open",
            PullState::Closed => "closed",
            PullState::All => "all",
        }
    }
}

/// Read-only access to one remote repository.
///
/// This is the single seam between the report builders and the hosting
/// platform: the builders call these eight operations and nothing else, so
/// they can be exercised against an in-memory fake without network access.
/// Implementations own authentication, pagination, and rate limiting.
pub trait RepoHost {
    /// Fetch the repository's aggregate metadata.
    async fn repository(&self) -> Result<RepoMetadata>;

    /// Fetch a single pull request by number.
    async fn pull_request(&self, number: u64) -> Result<PullRequest>;

    /// List pull requests matching `state`.
    async fn pull_requests(&self, state: PullState) -> Result<Vec<PullRequest>>;

    /// List a pull request's own commits, chronological order.
    async fn pull_request_commits(&self, number: u64) -> Result<Vec<CommitRef>>;

    /// Compare two commits, yielding the merge-base and the commits
    /// reachable from `head` but not from `base`.
    async fn compare(&self, base: &str, head: &str) -> Result<Comparison>;

    /// Resolve a commit SHA to a full commit object.
    async fn commit(&self, sha: &str) -> Result<CommitRef>;

    /// List all-time contributors known to the platform.
    async fn contributors(&self) -> Result<Vec<Contributor>>;

    /// List up to `limit` releases, most recent first.
    async fn releases(&self, limit: usize) -> Result<Vec<Release>>;
}
