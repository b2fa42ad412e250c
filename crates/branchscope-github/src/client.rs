use branchscope_core::{Result, ScopeError};

use crate::host::{PullState, RepoHost};
use crate::models::{Comparison, CommitRef, Contributor, PullRequest, Release, RepoMetadata};

/// GitHub-backed [`RepoHost`] bound to a single `owner/repo`.
///
/// # Examples
///
/// ```no_run
/// use branchscope_github::GitHubHost;
///
/// let host = GitHubHost::new(Some("ghp_xxxx"), "rust-lang/rust").unwrap();
/// ```
pub struct GitHubHost {
    octocrab: octocrab::Octocrab,
    owner: String,
    repo: String,
}

impl GitHubHost {
    /// Create a host from an explicit token or the `GITHUB_TOKEN`
    /// environment variable, bound to the fully qualified `owner/repo`
    /// name.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Config`] if no token is available,
    /// [`ScopeError::Validation`] if `full_name` is not `owner/repo`, or
    /// [`ScopeError::Api`] if the client cannot be built.
    pub fn new(token: Option<&str>, full_name: &str) -> Result<Self> {
        Self::build(token, full_name, None)
    }

    /// Like [`GitHubHost::new`], but pointed at a custom API base URI, e.g.
    /// a GitHub Enterprise instance.
    ///
    /// # Errors
    ///
    /// As [`GitHubHost::new`], plus [`ScopeError::Api`] if `base_uri` is
    /// not a valid URI.
    pub fn with_base_uri(token: Option<&str>, full_name: &str, base_uri: &str) -> Result<Self> {
        Self::build(token, full_name, Some(base_uri))
    }

    fn build(token: Option<&str>, full_name: &str, base_uri: Option<&str>) -> Result<Self> {
        let token = match token {
            Some(t) => t.to_string(),
            None => std::env::var("GITHUB_TOKEN").map_err(|_| {
                ScopeError::Config(
                    "GITHUB_TOKEN not set. Pass --github-token or set GITHUB_TOKEN env var".into(),
                )
            })?,
        };
        let (owner, repo) = parse_repo_name(full_name)?;

        let mut builder = octocrab::Octocrab::builder().personal_token(token);
        if let Some(uri) = base_uri {
            builder = builder
                .base_uri(uri)
                .map_err(|e| ScopeError::Api(format!("invalid API base uri '{uri}': {e}")))?;
        }
        let octocrab = builder
            .build()
            .map_err(|e| ScopeError::Api(format!("failed to create GitHub client: {e}")))?;

        Ok(Self {
            octocrab,
            owner,
            repo,
        })
    }

    async fn get_json<T: octocrab::FromResponse>(&self, route: String) -> Result<T> {
        self.octocrab
            .get(&route, None::<&()>)
            .await
            .map_err(|e| ScopeError::Api(format!("GET {route} failed: {e}")))
    }

    /// Fetch a listing route exhaustively, following the platform's
    /// pagination links until the last page.
    async fn get_all_pages<T: serde::de::DeserializeOwned>(&self, route: String) -> Result<Vec<T>> {
        let first: octocrab::Page<T> = self
            .octocrab
            .get(&route, None::<&()>)
            .await
            .map_err(|e| ScopeError::Api(format!("GET {route} failed: {e}")))?;
        self.octocrab
            .all_pages(first)
            .await
            .map_err(|e| ScopeError::Api(format!("paging GET {route} failed: {e}")))
    }
}

impl RepoHost for GitHubHost {
    async fn repository(&self) -> Result<RepoMetadata> {
        let Self { owner, repo, .. } = self;
        self.get_json(format!("/repos/{owner}/{repo}")).await
    }

    async fn pull_request(&self, number: u64) -> Result<PullRequest> {
        let Self { owner, repo, .. } = self;
        self.get_json(format!("/repos/{owner}/{repo}/pulls/{number}"))
            .await
    }

    async fn pull_requests(&self, state: PullState) -> Result<Vec<PullRequest>> {
        let Self { owner, repo, .. } = self;
        let state = state.as_str();
        self.get_all_pages(format!(
            "/repos/{owner}/{repo}/pulls?state={state}&per_page=100"
        ))
        .await
    }

    async fn pull_request_commits(&self, number: u64) -> Result<Vec<CommitRef>> {
        let Self { owner, repo, .. } = self;
        self.get_all_pages(format!(
            "/repos/{owner}/{repo}/pulls/{number}/commits?per_page=100"
        ))
        .await
    }

    async fn compare(&self, base: &str, head: &str) -> Result<Comparison> {
        let Self { owner, repo, .. } = self;
        self.get_json(format!("/repos/{owner}/{repo}/compare/{base}...{head}"))
            .await
    }

    async fn commit(&self, sha: &str) -> Result<CommitRef> {
        let Self { owner, repo, .. } = self;
        self.get_json(format!("/repos/{owner}/{repo}/commits/{sha}"))
            .await
    }

    async fn contributors(&self) -> Result<Vec<Contributor>> {
        let Self { owner, repo, .. } = self;
        self.get_all_pages(format!("/repos/{owner}/{repo}/contributors?per_page=100"))
            .await
    }

    async fn releases(&self, limit: usize) -> Result<Vec<Release>> {
        let Self { owner, repo, .. } = self;
        self.get_json(format!("/repos/{owner}/{repo}/releases?per_page={limit}"))
            .await
    }
}

/// Parse a fully qualified repository name (`owner/repo`) into its
/// components.
///
/// # Errors
///
/// Returns [`ScopeError::Validation`] if the format is invalid.
///
/// # Examples
///
/// ```
/// use branchscope_github::parse_repo_name;
///
/// let (owner, repo) = parse_repo_name("octocat/hello-world").unwrap();
/// assert_eq!(owner, "octocat");
/// assert_eq!(repo, "hello-world");
/// ```
pub fn parse_repo_name(full_name: &str) -> Result<(String, String)> {
    let Some((owner, repo)) = full_name.split_once('/') else {
        return Err(ScopeError::Validation(format!(
            "invalid repository name '{full_name}', expected owner/repo"
        )));
    };
    if owner.is_empty() || repo.is_empty() || repo.contains('/') {
        return Err(ScopeError::Validation(format!(
            "invalid repository name '{full_name}', expected owner/repo"
        )));
    }
    Ok((owner.to_string(), repo.to_string()))
}
