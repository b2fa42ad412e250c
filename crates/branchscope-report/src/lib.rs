//! The two branchscope report builders and the graph renderer.
//!
//! [`summary::summarize_repository`] and [`tree::build_branch_tree`] are
//! independent peers: both read from a [`branchscope_github::RepoHost`] and
//! neither depends on the other. [`graph`] turns a finished
//! [`branchscope_core::BranchTree`] into a DOT file.

pub mod graph;
pub mod summary;
pub mod tree;

pub use graph::BranchGraph;
pub use summary::summarize_repository;
pub use tree::build_branch_tree;
