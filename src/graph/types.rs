//! Dependency graph types
//!
//! [`ResolvedGraph`] is the unfiltered input handed over by a resolver;
//! [`DependencyNode`] trees and [`DependencySummary`] are the filtered,
//! serializable output.

use std::collections::BTreeMap;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::Serialize;

use crate::core::Coordinate;

/// Artifact as reported by dependency resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArtifact {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub scope: Option<String>,
    pub artifact_type: Option<String>,
    pub optional: bool,
}

impl ResolvedArtifact {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            scope: None,
            artifact_type: None,
            optional: false,
        }
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// `group:artifact:version` identity used for cycle suppression.
    pub fn key(&self) -> String {
        format!("{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

impl From<&Coordinate> for ResolvedArtifact {
    fn from(coordinate: &Coordinate) -> Self {
        Self::new(
            coordinate.group_id.clone(),
            coordinate.artifact_id.clone(),
            coordinate.version.clone(),
        )
    }
}

/// Directed dependency graph rooted at the analysed module.
///
/// Edges point from a dependent to its dependency. The same coordinate may
/// appear under several nodes, and hand-built graphs may contain cycles.
#[derive(Debug, Clone)]
pub struct ResolvedGraph {
    graph: DiGraph<ResolvedArtifact, ()>,
    root: NodeIndex,
}

impl ResolvedGraph {
    pub fn new(root: ResolvedArtifact) -> Self {
        let mut graph = DiGraph::new();
        let root = graph.add_node(root);
        Self { graph, root }
    }

    pub fn root(&self) -> NodeIndex {
        self.root
    }

    pub fn add_node(&mut self, artifact: ResolvedArtifact) -> NodeIndex {
        self.graph.add_node(artifact)
    }

    /// Link `from` to `to`. Repeated links are kept as repeated siblings.
    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex) {
        self.graph.add_edge(from, to, ());
    }

    /// Add `artifact` as a new dependency of `parent`.
    pub fn add_dependency(&mut self, parent: NodeIndex, artifact: ResolvedArtifact) -> NodeIndex {
        let index = self.add_node(artifact);
        self.add_edge(parent, index);
        index
    }

    pub fn artifact(&self, index: NodeIndex) -> &ResolvedArtifact {
        &self.graph[index]
    }

    /// Direct dependencies of a node, in the order they were linked.
    pub fn dependencies(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(index, Direction::Outgoing)
            .map(|edge| (edge.id(), edge.target()))
            .collect();
        edges.sort_by_key(|(id, _)| *id);
        edges.into_iter().map(|(_, target)| target).collect()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }
}

/// Filtered dependency tree node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyNode {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub scope: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub artifact_type: Option<String>,
    pub optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<DependencyNode>>,
}

impl DependencyNode {
    pub fn children(&self) -> &[DependencyNode] {
        self.children.as_deref().unwrap_or_default()
    }

    pub fn key(&self) -> String {
        format!("{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencySummary {
    pub total: usize,
    pub direct: usize,
    pub transitive: usize,
    pub optional: usize,
    pub scopes: BTreeMap<String, usize>,
}

/// Direct declaration from the manifest, no resolution involved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatDependency {
    pub group_id: String,
    pub artifact_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub scope: String,
    #[serde(rename = "type")]
    pub artifact_type: String,
    pub optional: bool,
}

/// Dependency views attached to a module
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyView {
    pub summary: DependencySummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flat: Option<Vec<FlatDependency>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<Vec<DependencyNode>>,
}
