//! Repository popularity and contributor-activity summary.
//!
//! Every remote fetch in this module is caught at the call site: a failure
//! is logged with its full error context and degrades the corresponding
//! summary field to `None` instead of aborting the report.

use std::cmp::Reverse;
use std::collections::HashMap;

use branchscope_core::RepositorySummary;
use branchscope_github::{Contributor, PullRequest, PullState, RepoHost};
use tracing::{debug, error, info};

/// Default number of recent releases included in a summary.
pub const DEFAULT_RECENT_RELEASES: usize = 3;

/// Summarize a repository: name, recent releases, forks, stars, contributor
/// count, and contributors ranked by all-time pull-request count.
///
/// Never fails: each fetch error is logged and leaves its field `None`, so
/// callers must tolerate a partially populated summary.
pub async fn summarize_repository<H: RepoHost>(
    host: &H,
    recent_releases: usize,
) -> RepositorySummary {
    info!("summarizing repository");

    let (name, forks, stars) = match host.repository().await {
        Ok(meta) => (
            Some(meta.name),
            Some(meta.forks_count),
            Some(meta.stargazers_count),
        ),
        Err(e) => {
            error!(error = %e, "unable to fetch repository metadata");
            (None, None, None)
        }
    };

    let contributors = fetch_contributors(host).await;
    let ranked = match &contributors {
        Some(contributors) => rank_contributors(host, contributors).await,
        None => None,
    };

    let summary = RepositorySummary {
        name,
        releases: latest_releases(host, recent_releases).await,
        forks,
        stars,
        contributor_count: contributors.as_ref().map(Vec::len),
        contributors_by_pull_requests: ranked,
    };
    info!("repository summary has been completed");
    debug!(summary = %summary);
    summary
}

/// Fetch the all-time contributor list, or `None` on failure.
async fn fetch_contributors<H: RepoHost>(host: &H) -> Option<Vec<Contributor>> {
    match host.contributors().await {
        Ok(contributors) => {
            debug!(
                logins = ?contributors.iter().map(|c| c.login.as_str()).collect::<Vec<_>>(),
                "fetched contributors"
            );
            Some(contributors)
        }
        Err(e) => {
            error!(error = %e, "unable to fetch contributors");
            None
        }
    }
}

/// Fetch the most recent release tags, or `None` on failure.
async fn latest_releases<H: RepoHost>(host: &H, latest: usize) -> Option<Vec<String>> {
    match host.releases(latest).await {
        Ok(releases) => {
            let tags: Vec<String> = releases.into_iter().map(|r| r.tag_name).collect();
            debug!(count = latest, ?tags, "fetched latest releases");
            Some(tags)
        }
        Err(e) => {
            error!(error = %e, "unable to fetch releases");
            None
        }
    }
}

/// Rank contributors by the number of pull requests they authored, counting
/// every PR regardless of state. Returns `None` if the PR list cannot be
/// fetched.
async fn rank_contributors<H: RepoHost>(
    host: &H,
    contributors: &[Contributor],
) -> Option<Vec<String>> {
    match host.pull_requests(PullState::All).await {
        Ok(pulls) => Some(rank_by_pull_requests(contributors, &pulls)),
        Err(e) => {
            error!(error = %e, "unable to fetch pull requests for contributor ranking");
            None
        }
    }
}

/// Order contributor logins descending by authored-PR count.
///
/// The sort is stable, so contributors with equal counts keep the
/// platform's retrieval order and zero-PR contributors rank last.
fn rank_by_pull_requests(contributors: &[Contributor], pulls: &[PullRequest]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for pull in pulls {
        if let Some(author) = pull.author() {
            *counts.entry(author).or_default() += 1;
        }
    }
    debug!(?counts, "pull requests per author");

    let mut ranked: Vec<&Contributor> = contributors.iter().collect();
    ranked.sort_by_key(|c| Reverse(counts.get(c.login.as_str()).copied().unwrap_or(0)));
    ranked.into_iter().map(|c| c.login.clone()).collect()
}
