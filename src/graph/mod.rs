//! # Dependency Graph Module
//!
//! Turns a resolved dependency graph into the filtered views attached to
//! each deployable module.
//!
//! ## Components
//!
//! - **ResolvedGraph**: petgraph-backed graph handed over by a resolver
//! - **DependencyResolver**: source of resolved graphs. The manifest's own
//!   declarations ([`DeclaredDependencyResolver`]) or an exported JSON tree
//!   ([`JsonGraphResolver`])
//! - **DependencyTreeBuilder**: applies scope, optional and depth rules and
//!   breaks cycles along the current path
//!
//! ## Example
//!
//! ```
//! use deploy_descriptor::dependency_filter::DependencyFilter;
//! use deploy_descriptor::graph::{
//!     DependencyTreeBuilder, ResolvedArtifact, ResolvedGraph, summarize_tree,
//! };
//!
//! let mut graph = ResolvedGraph::new(ResolvedArtifact::new("com.acme", "api", "1.0"));
//! let root = graph.root();
//! let web = graph.add_dependency(root, ResolvedArtifact::new("org.acme", "web", "2.1"));
//! graph.add_dependency(web, ResolvedArtifact::new("org.acme", "core", "2.1"));
//! graph.add_dependency(root, ResolvedArtifact::new("junit", "junit", "4").with_scope("test"));
//!
//! let filter = DependencyFilter::default();
//! let tree = DependencyTreeBuilder::new(&filter).build_tree(&graph);
//! let summary = summarize_tree(&tree);
//!
//! assert_eq!(tree.len(), 1);
//! assert_eq!(summary.total, 2);
//! assert_eq!(summary.transitive, 1);
//! ```

mod builder;
mod resolver;
mod types;

pub use builder::{DependencyTreeBuilder, summarize_flat, summarize_tree};
pub use resolver::{DeclaredDependencyResolver, DependencyResolver, JsonGraphResolver};
pub use types::{
    DependencyNode, DependencySummary, DependencyView, FlatDependency, ResolvedArtifact,
    ResolvedGraph,
};
