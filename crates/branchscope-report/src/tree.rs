//! Reconstruction of a merged feature branch's commit lineage.
//!
//! Locates the divergence commit (merge-base of the pull request's base and
//! head), the merge commit recorded by the platform, and the base-branch
//! commits in between, then assembles them into a validated
//! [`BranchTree`].

use branchscope_core::{BranchTree, Commit, Result, ScopeError};
use branchscope_github::{CommitRef, PullRequest, RepoHost};
use tracing::{debug, info};

/// Reconstruct the lineage of `feature_branch`, merged via pull request
/// `pr_number`.
///
/// # Errors
///
/// Returns [`ScopeError::Validation`] if the pull request is not merged or
/// its head branch does not match `feature_branch` — both are caller
/// preconditions, not recoverable states. Remote failures surface as
/// [`ScopeError::Api`]; the caller is expected to log them and treat the
/// run as unreported but non-fatal.
pub async fn build_branch_tree<H: RepoHost>(
    host: &H,
    feature_branch: &str,
    pr_number: u64,
) -> Result<BranchTree> {
    let pull = host.pull_request(pr_number).await?;
    if !pull.is_merged() {
        return Err(ScopeError::Validation(format!(
            "pull request #{} for branch {} is not merged yet",
            pull.number, pull.head.branch
        )));
    }
    if pull.head.branch != feature_branch {
        return Err(ScopeError::Validation(format!(
            "branch {feature_branch} does not match pull request number {pr_number}"
        )));
    }

    let diverge = divergence_commit(host, &pull).await?;
    let merge = merge_commit(host, &pull).await?;
    let in_between = in_between_commits(host, &diverge, &merge).await?;

    let feature_commits: Vec<Commit> = host
        .pull_request_commits(pr_number)
        .await?
        .into_iter()
        .map(|c| Commit::new(c.sha))
        .collect();

    let mut main_commits = Vec::with_capacity(in_between.len() + 2);
    main_commits.push(Commit::new(diverge.sha));
    main_commits.extend(in_between.into_iter().map(|c| Commit::new(c.sha)));
    main_commits.push(Commit::new(merge.sha));

    BranchTree::new(
        feature_branch,
        pull.base.branch,
        feature_commits,
        main_commits,
    )
}

/// The commit where the feature branch separated from the base branch: the
/// merge-base of the pull request's base and head commits.
async fn divergence_commit<H: RepoHost>(host: &H, pull: &PullRequest) -> Result<CommitRef> {
    info!(
        branch = %pull.head.branch,
        pr = pull.number,
        "locating divergence commit"
    );
    let comparison = host.compare(&pull.base.sha, &pull.head.sha).await?;
    debug!(sha = %comparison.merge_base_commit.sha, "divergence commit located");
    Ok(comparison.merge_base_commit)
}

/// The merge commit the platform recorded for the pull request, resolved to
/// a full commit object.
async fn merge_commit<H: RepoHost>(host: &H, pull: &PullRequest) -> Result<CommitRef> {
    info!(
        branch = %pull.head.branch,
        pr = pull.number,
        "resolving merge commit"
    );
    let sha = pull.merge_commit_sha.as_deref().ok_or_else(|| {
        ScopeError::Validation(format!(
            "pull request #{} has no recorded merge commit",
            pull.number
        ))
    })?;
    let commit = host.commit(sha).await?;
    debug!(sha = %commit.sha, "merge commit resolved");
    Ok(commit)
}

/// Base-branch commits strictly between the divergence and merge commits.
/// The merge commit itself is filtered out; the caller appends it
/// separately.
async fn in_between_commits<H: RepoHost>(
    host: &H,
    base: &CommitRef,
    head: &CommitRef,
) -> Result<Vec<CommitRef>> {
    let comparison = host.compare(&base.sha, &head.sha).await?;
    let commits: Vec<CommitRef> = comparison
        .commits
        .into_iter()
        .filter(|c| c.sha != head.sha)
        .collect();
    debug!(
        base = %base.sha,
        head = %head.sha,
        count = commits.len(),
        "commits between divergence and merge"
    );
    Ok(commits)
}
