//! Serde models for the GitHub REST payloads branchscope reads.
//!
//! Only the fields the report builders consume are declared; everything
//! else in the API responses is ignored.

use serde::{Deserialize, Serialize};

/// Repository metadata used by the summary builder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoMetadata {
    /// Short repository name (without the owner).
    pub name: String,
    /// Number of forks.
    pub forks_count: u64,
    /// Number of stargazers.
    pub stargazers_count: u64,
}

/// A pull request, as returned by both the single-PR and list endpoints.
///
/// `merged_at` is the merge marker: the list endpoint does not carry the
/// `merged` boolean, but both endpoints carry `merged_at` for merged PRs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number within the repository.
    pub number: u64,
    /// PR title.
    #[serde(default)]
    pub title: Option<String>,
    /// Login of the PR author, absent for deleted accounts.
    #[serde(default)]
    pub user: Option<Account>,
    /// Merge timestamp; `None` while unmerged.
    #[serde(default)]
    pub merged_at: Option<String>,
    /// SHA of the merge commit recorded by the platform.
    #[serde(default)]
    pub merge_commit_sha: Option<String>,
    /// Head (feature) branch reference.
    pub head: BranchRef,
    /// Base branch reference.
    pub base: BranchRef,
}

impl PullRequest {
    /// Whether the platform recorded a merge for this PR.
    pub fn is_merged(&self) -> bool {
        self.merged_at.is_some()
    }

    /// Login of the author, if known.
    pub fn author(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.login.as_str())
    }
}

/// One side of a pull request: a branch name and the commit it points at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchRef {
    /// Branch name.
    #[serde(rename = "ref")]
    pub branch: String,
    /// Commit SHA the branch points at.
    pub sha: String,
}

/// A user account attached to a PR or a contributor entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Account login.
    pub login: String,
}

/// A repository contributor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contributor {
    /// Contributor login.
    pub login: String,
    /// Commit contributions counted by the platform.
    #[serde(default)]
    pub contributions: u64,
}

/// A published release.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Release {
    /// Git tag the release was cut from.
    pub tag_name: String,
}

/// A bare commit reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRef {
    /// Full commit SHA.
    pub sha: String,
}

/// Result of comparing two commits: the merge-base plus the commits
/// reachable from `head` but not from `base`, in chronological order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comparison {
    /// Common ancestor of the two compared commits.
    pub merge_base_commit: CommitRef,
    /// Commits between the two, order preserved as returned.
    #[serde(default)]
    pub commits: Vec<CommitRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pull_request_deserializes_from_api_shape() {
        let json = r#"{
            "number": 42,
            "title": "Add login flow",
            "user": { "login": "alice" },
            "merged_at": "2024-05-01T12:00:00Z",
            "merge_commit_sha": "e5f6",
            "head": { "ref": "feature/login", "sha": "c3d4" },
            "base": { "ref": "main", "sha": "a1b2" }
        }"#;
        let pr: PullRequest = serde_json::from_str(json).unwrap();
        assert!(pr.is_merged());
        assert_eq!(pr.author(), Some("alice"));
        assert_eq!(pr.head.branch, "feature/login");
        assert_eq!(pr.merge_commit_sha.as_deref(), Some("e5f6"));
    }

    #[test]
    fn unmerged_pull_request_has_no_merge_marker() {
        let json = r#"{
            "number": 7,
            "head": { "ref": "feature/wip", "sha": "c3d4" },
            "base": { "ref": "main", "sha": "a1b2" }
        }"#;
        let pr: PullRequest = serde_json::from_str(json).unwrap();
        assert!(!pr.is_merged());
        assert_eq!(pr.author(), None);
    }

    #[test]
    fn comparison_defaults_to_empty_commit_list() {
        let json = r#"{ "merge_base_commit": { "sha": "d0" } }"#;
        let cmp: Comparison = serde_json::from_str(json).unwrap();
        assert_eq!(cmp.merge_base_commit.sha, "d0");
        assert!(cmp.commits.is_empty());
    }
}
