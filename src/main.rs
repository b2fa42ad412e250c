use std::path::{Path, PathBuf};

use clap::Parser;
use miette::{IntoDiagnostic, Result};

use branchscope_core::ScopeConfig;
use branchscope_github::GitHubHost;
use branchscope_report::summary::DEFAULT_RECENT_RELEASES;
use branchscope_report::{build_branch_tree, summarize_repository, BranchGraph};

#[derive(Parser)]
#[command(
    name = "branchscope",
    version,
    about = "Repository popularity summaries and merged-branch lineage graphs",
    long_about = "Branchscope queries the GitHub API to print a popularity and\n\
                  contributor-activity summary for a repository, then reconstructs\n\
                  the commit lineage of a merged feature branch and writes it as a\n\
                  Graphviz DOT file named branch_<feature>_graph.dot.\n\n\
                  Example:\n  \
                    FEATURE_BRANCH=feature/login PR_NUMBER=42 \\\n  \
                    REPOSITORY_NAME=octocat/hello-world \\\n  \
                    branchscope --github-token ghp_xxxx"
)]
struct Cli {
    /// GitHub personal access token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: String,

    /// Enable debug-level logging
    #[arg(long)]
    debug_mode: bool,

    /// Write logs to the configured log file instead of the console
    #[arg(long)]
    log_to_file: bool,

    /// Number of recent releases to include in the summary
    #[arg(long, default_value_t = DEFAULT_RECENT_RELEASES)]
    recent_releases: usize,

    /// Path to configuration file (default: .branchscope.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Feature branch whose lineage to reconstruct
    #[arg(long, env = "FEATURE_BRANCH")]
    feature_branch: String,

    /// Number of the pull request that merged the feature branch
    #[arg(long, env = "PR_NUMBER")]
    pr_number: u64,

    /// Fully qualified repository name (owner/repo)
    #[arg(long, env = "REPOSITORY_NAME")]
    repository_name: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    human_panic::setup_panic!();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ScopeConfig::from_file(path).into_diagnostic()?,
        None => {
            let default_path = Path::new(".branchscope.toml");
            if default_path.exists() {
                ScopeConfig::from_file(default_path).into_diagnostic()?
            } else {
                ScopeConfig::default()
            }
        }
    };

    branchscope_core::logging::init(&config.log, cli.debug_mode, cli.log_to_file)
        .into_diagnostic()?;

    let host =
        GitHubHost::new(Some(&cli.github_token), &cli.repository_name).into_diagnostic()?;

    let summary = summarize_repository(&host, cli.recent_releases).await;
    print!("{summary}");

    match build_branch_tree(&host, &cli.feature_branch, cli.pr_number).await {
        Ok(tree) => {
            let output = graph_file_name(&cli.feature_branch);
            BranchGraph::from_tree(&tree).write(&output);
        }
        Err(e) => {
            tracing::error!(error = %e, "error while retrieving the branch tree; no graph written");
        }
    }

    Ok(())
}

/// File the lineage graph is written to, derived from the feature branch
/// name. Path separators in branch names are flattened so the file stays in
/// the working directory.
fn graph_file_name(feature_branch: &str) -> PathBuf {
    PathBuf::from(format!(
        "branch_{}_graph.dot",
        feature_branch.replace('/', "-")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_file_name_flattens_branch_separators() {
        assert_eq!(
            graph_file_name("feature/login"),
            PathBuf::from("branch_feature-login_graph.dot")
        );
    }

    #[test]
    fn graph_file_name_keeps_plain_names() {
        assert_eq!(
            graph_file_name("hotfix"),
            PathBuf::from("branch_hotfix_graph.dot")
        );
    }
}
