use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ScopeError;

/// A single commit, identified by its full SHA.
///
/// Commits are opaque immutable values fetched from the remote platform;
/// equality is by SHA.
///
/// # Examples
///
/// ```
/// use branchscope_core::Commit;
///
/// let commit = Commit::new("a1b2c3d");
/// assert_eq!(commit.sha(), "a1b2c3d");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Commit {
    sha: String,
}

impl Commit {
    /// Wrap a commit SHA.
    pub fn new(sha: impl Into<String>) -> Self {
        Self { sha: sha.into() }
    }

    /// The full commit SHA.
    pub fn sha(&self) -> &str {
        &self.sha
    }
}

impl fmt::Display for Commit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sha)
    }
}

/// Aggregate popularity and contributor report for one repository.
///
/// Every field is optional: a failed fetch for any piece of the summary is
/// logged at the call site and leaves the corresponding field `None` rather
/// than aborting the whole report. Callers must tolerate missing fields.
///
/// # Examples
///
/// ```
/// use branchscope_core::RepositorySummary;
///
/// let summary = RepositorySummary {
///     name: Some("branchscope".into()),
///     releases: Some(vec!["v0.2.0".into(), "v0.1.0".into()]),
///     forks: Some(12),
///     stars: Some(340),
///     contributor_count: Some(4),
///     contributors_by_pull_requests: Some(vec!["alice".into(), "bob".into()]),
/// };
/// let report = summary.to_string();
/// assert!(report.contains("stars=340"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositorySummary {
    /// Repository name.
    pub name: Option<String>,
    /// Recent release tag names, most recent first.
    pub releases: Option<Vec<String>>,
    /// Number of forks.
    pub forks: Option<u64>,
    /// Number of stargazers.
    pub stars: Option<u64>,
    /// Number of all-time contributors.
    pub contributor_count: Option<usize>,
    /// Contributor logins ranked by total pull-request count, descending.
    /// Ties keep the platform's retrieval order.
    pub contributors_by_pull_requests: Option<Vec<String>>,
}

impl fmt::Display for RepositorySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn field<T: fmt::Debug>(value: &Option<T>) -> String {
            match value {
                Some(v) => format!("{v:?}"),
                None => "unavailable".into(),
            }
        }

        writeln!(
            f,
            "Repository ({}) Summary:",
            self.name.as_deref().unwrap_or("unknown")
        )?;
        writeln!(f, "  releases={},", field(&self.releases))?;
        writeln!(f, "  forks={},", field(&self.forks))?;
        writeln!(f, "  stars={},", field(&self.stars))?;
        writeln!(f, "  contributor_count={},", field(&self.contributor_count))?;
        writeln!(
            f,
            "  contributors_by_pull_requests={}",
            field(&self.contributors_by_pull_requests)
        )
    }
}

/// The reconstructed commit lineage of a merged feature branch.
///
/// Holds the feature branch's commits in chronological order and the main
/// (base) branch's commits between the divergence commit and the merge
/// commit inclusive, also chronological. The first main commit is the
/// divergence point and the last is the merge commit; the boundary
/// attachment to the feature branch is expressed as two explicit graph
/// edges rather than assumed from list order.
///
/// Construction validates that both commit lists are non-empty, since the
/// boundary edges need a first and a last commit on each side.
///
/// # Examples
///
/// ```
/// use branchscope_core::{BranchTree, Commit};
///
/// let tree = BranchTree::new(
///     "feature/login",
///     "main",
///     vec![Commit::new("a"), Commit::new("b")],
///     vec![Commit::new("d"), Commit::new("e")],
/// )
/// .unwrap();
/// assert_eq!(tree.feature_commits().len(), 2);
/// assert_eq!(tree.main_commits().last().unwrap().sha(), "e");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchTree {
    feature_branch: String,
    main_branch: String,
    feature_commits: Vec<Commit>,
    main_commits: Vec<Commit>,
}

impl BranchTree {
    /// Build a validated branch tree.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Validation`] if either commit list is empty.
    pub fn new(
        feature_branch: impl Into<String>,
        main_branch: impl Into<String>,
        feature_commits: Vec<Commit>,
        main_commits: Vec<Commit>,
    ) -> Result<Self, ScopeError> {
        let feature_branch = feature_branch.into();
        let main_branch = main_branch.into();
        if feature_commits.is_empty() {
            return Err(ScopeError::Validation(format!(
                "feature branch {feature_branch} has no commits"
            )));
        }
        if main_commits.is_empty() {
            return Err(ScopeError::Validation(format!(
                "main branch {main_branch} has no commits"
            )));
        }
        Ok(Self {
            feature_branch,
            main_branch,
            feature_commits,
            main_commits,
        })
    }

    /// Name of the feature branch.
    pub fn feature_branch(&self) -> &str {
        &self.feature_branch
    }

    /// Name of the main (base) branch the feature diverged from.
    pub fn main_branch(&self) -> &str {
        &self.main_branch
    }

    /// Feature branch commits, chronological order.
    pub fn feature_commits(&self) -> &[Commit] {
        &self.feature_commits
    }

    /// Main branch commits from divergence to merge inclusive,
    /// chronological order.
    pub fn main_commits(&self) -> &[Commit] {
        &self.main_commits
    }

    /// The commit where the feature branch diverged from the main branch.
    pub fn divergence_commit(&self) -> &Commit {
        // Non-empty by construction.
        &self.main_commits[0]
    }

    /// The commit on the main branch that merged the feature branch.
    pub fn merge_commit(&self) -> &Commit {
        &self.main_commits[self.main_commits.len() - 1]
    }
}
