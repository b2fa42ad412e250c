//! DOT graph rendering and serialization for a [`BranchTree`].

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use branchscope_core::BranchTree;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::{debug, error, info};

/// File extension for the graph description files this module writes.
pub const DOT_EXTENSION: &str = "dot";

/// A node in the branch graph: one commit occurrence on one branch.
///
/// Occurrences are not deduplicated across branches. A commit appearing in
/// both the feature and main lists (the divergence and merge commits do, in
/// degenerate histories) produces one node per appearance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitNode {
    /// Name of the branch this occurrence belongs to.
    pub branch: String,
    /// Full commit SHA.
    pub sha: String,
}

/// Directed graph over the commits of a feature branch and its base branch.
///
/// Edges are the intra-branch successions of both commit lists plus the two
/// boundary edges: divergence commit → first feature commit, and last
/// feature commit → merge commit.
///
/// # Examples
///
/// ```
/// use branchscope_core::{BranchTree, Commit};
/// use branchscope_report::BranchGraph;
///
/// let tree = BranchTree::new(
///     "feature/x",
///     "main",
///     vec![Commit::new("a"), Commit::new("b"), Commit::new("c")],
///     vec![Commit::new("d"), Commit::new("f"), Commit::new("e")],
/// )
/// .unwrap();
/// let graph = BranchGraph::from_tree(&tree);
/// assert_eq!(graph.node_count(), 6);
/// assert_eq!(graph.edge_count(), 6);
/// ```
pub struct BranchGraph {
    graph: DiGraph<CommitNode, ()>,
}

impl BranchGraph {
    /// Build the graph from a validated branch tree.
    pub fn from_tree(tree: &BranchTree) -> Self {
        debug!(branch = %tree.feature_branch(), "building branch graph");
        let mut graph = DiGraph::new();

        let feature = add_branch_nodes(&mut graph, tree.feature_branch(), tree.feature_commits());
        let main = add_branch_nodes(&mut graph, tree.main_branch(), tree.main_commits());

        for pair in feature.windows(2) {
            graph.add_edge(pair[0], pair[1], ());
        }
        for pair in main.windows(2) {
            graph.add_edge(pair[0], pair[1], ());
        }

        // Boundary edges attach the feature branch to the base branch. The
        // lists are non-empty by BranchTree construction.
        if let (Some(&diverge), Some(&merge)) = (main.first(), main.last()) {
            if let (Some(&first), Some(&last)) = (feature.first(), feature.last()) {
                graph.add_edge(diverge, first, ());
                graph.add_edge(last, merge, ());
            }
        }

        Self { graph }
    }

    /// Number of commit occurrences in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Render the graph as DOT text: a `digraph` laid out left to right,
    /// with one circle-shaped node per commit occurrence.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph {\n    rankdir=LR;\n");
        for idx in self.graph.node_indices() {
            let node = &self.graph[idx];
            let _ = writeln!(
                out,
                "    n{} [label=\"commit {}\\n{}\", shape=circle];",
                idx.index(),
                escape(&node.sha),
                escape(&node.branch),
            );
        }
        for edge in self.graph.edge_indices() {
            if let Some((from, to)) = self.graph.edge_endpoints(edge) {
                let _ = writeln!(out, "    n{} -> n{};", from.index(), to.index());
            }
        }
        out.push_str("}\n");
        out
    }

    /// Write the DOT text to `output`, correcting the extension to `.dot`
    /// first if needed. I/O failures are logged and swallowed; they never
    /// terminate the run.
    pub fn write(&self, output: &Path) {
        let output = normalize_output_path(output);
        let dot = self.to_dot();
        info!(path = %output.display(), "writing branch graph");
        debug!(dot = %dot, "branch graph content");
        if let Err(e) = std::fs::write(&output, dot) {
            error!(error = %e, path = %output.display(), "error while writing the branch graph");
        }
    }
}

fn add_branch_nodes(
    graph: &mut DiGraph<CommitNode, ()>,
    branch: &str,
    commits: &[branchscope_core::Commit],
) -> Vec<NodeIndex> {
    commits
        .iter()
        .map(|commit| {
            graph.add_node(CommitNode {
                branch: branch.to_string(),
                sha: commit.sha().to_string(),
            })
        })
        .collect()
}

/// Force the graph-description extension on `path`.
pub fn normalize_output_path(path: &Path) -> PathBuf {
    if path.extension().and_then(|e| e.to_str()) == Some(DOT_EXTENSION) {
        path.to_path_buf()
    } else {
        path.with_extension(DOT_EXTENSION)
    }
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use branchscope_core::Commit;

    fn commits(shas: &[&str]) -> Vec<Commit> {
        shas.iter().map(|sha| Commit::new(*sha)).collect()
    }

    fn sample_tree() -> BranchTree {
        BranchTree::new(
            "feature/x",
            "main",
            commits(&["a", "b", "c"]),
            commits(&["d", "f", "e"]),
        )
        .unwrap()
    }

    #[test]
    fn node_and_edge_counts_follow_the_formulas() {
        let graph = BranchGraph::from_tree(&sample_tree());
        // len(feature) + len(main), and len(feature)-1 + len(main)-1 + 2.
        assert_eq!(graph.node_count(), 6);
        assert_eq!(graph.edge_count(), 6);
    }

    #[test]
    fn single_commit_branches_still_get_boundary_edges() {
        let tree =
            BranchTree::new("feature/x", "main", commits(&["a"]), commits(&["d"])).unwrap();
        let graph = BranchGraph::from_tree(&tree);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn shared_commits_keep_one_node_per_occurrence() {
        // Degenerate: divergence commit also listed on the feature branch.
        let tree =
            BranchTree::new("feature/x", "main", commits(&["d", "a"]), commits(&["d", "e"]))
                .unwrap();
        let graph = BranchGraph::from_tree(&tree);
        assert_eq!(graph.node_count(), 4);
    }

    #[test]
    fn dot_output_labels_nodes_with_sha_and_branch() {
        let dot = BranchGraph::from_tree(&sample_tree()).to_dot();
        assert!(dot.starts_with("digraph {"));
        assert!(dot.contains("rankdir=LR;"));
        assert!(dot.contains("[label=\"commit a\\nfeature/x\", shape=circle];"));
        assert!(dot.contains("[label=\"commit e\\nmain\", shape=circle];"));
    }

    #[test]
    fn dot_output_contains_the_expected_edges() {
        // Nodes: n0..n2 = feature a,b,c; n3..n5 = main d,f,e.
        let dot = BranchGraph::from_tree(&sample_tree()).to_dot();
        for edge in [
            "n0 -> n1;", // a -> b
            "n1 -> n2;", // b -> c
            "n3 -> n4;", // d -> f
            "n4 -> n5;", // f -> e
            "n3 -> n0;", // divergence -> first feature
            "n2 -> n5;", // last feature -> merge
        ] {
            assert!(dot.contains(edge), "missing edge statement: {edge}");
        }
    }

    #[test]
    fn dot_labels_escape_quotes() {
        let tree = BranchTree::new(
            "feat\"quoted\"",
            "main",
            commits(&["a"]),
            commits(&["d"]),
        )
        .unwrap();
        let dot = BranchGraph::from_tree(&tree).to_dot();
        assert!(dot.contains("feat\\\"quoted\\\""));
    }

    #[test]
    fn normalize_appends_dot_extension() {
        assert_eq!(
            normalize_output_path(Path::new("graph.txt")),
            PathBuf::from("graph.dot")
        );
        assert_eq!(
            normalize_output_path(Path::new("graph")),
            PathBuf::from("graph.dot")
        );
        assert_eq!(
            normalize_output_path(Path::new("graph.dot")),
            PathBuf::from("graph.dot")
        );
    }

    #[test]
    fn write_corrects_extension_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let wrong = dir.path().join("branch_feature_graph.txt");

        BranchGraph::from_tree(&sample_tree()).write(&wrong);

        let corrected = dir.path().join("branch_feature_graph.dot");
        assert!(corrected.exists(), "graph should land at the .dot path");
        assert!(!wrong.exists());
        let content = std::fs::read_to_string(&corrected).unwrap();
        assert!(content.contains("digraph {"));
    }

    #[test]
    fn write_to_unwritable_path_does_not_panic() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no/such/dir/graph.dot");

        // Only observable effect is a log record.
        BranchGraph::from_tree(&sample_tree()).write(&missing);
        assert!(!missing.exists());
    }
}
