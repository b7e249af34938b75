use std::collections::HashSet;

use petgraph::graph::NodeIndex;
use tracing::debug;

use super::types::{DependencyNode, DependencySummary, FlatDependency, ResolvedGraph};
use crate::constants::dependencies::DEFAULT_TYPE;
use crate::dependency_filter::DependencyFilter;
use crate::manifest::PomModel;

/// Builds filtered dependency views from a resolved graph
///
/// Each root-level dependency starts at depth 1 with its own empty path set.
/// The set of `group:artifact:version` keys on the current path is copied
/// into every recursive call, so siblings never share visited state and a
/// coordinate already on the path ends that branch.
pub struct DependencyTreeBuilder<'a> {
    filter: &'a DependencyFilter,
}

impl<'a> DependencyTreeBuilder<'a> {
    pub fn new(filter: &'a DependencyFilter) -> Self {
        Self { filter }
    }

    /// Root-level dependency nodes that survive filtering.
    pub fn build_tree(&self, graph: &ResolvedGraph) -> Vec<DependencyNode> {
        let tree: Vec<DependencyNode> = graph
            .dependencies(graph.root())
            .into_iter()
            .filter_map(|index| self.build_node(graph, index, 1, HashSet::new()))
            .collect();

        debug!(
            root = %graph.artifact(graph.root()).key(),
            direct = tree.len(),
            "built dependency tree"
        );
        tree
    }

    fn build_node(
        &self,
        graph: &ResolvedGraph,
        index: NodeIndex,
        depth: i32,
        mut path: HashSet<String>,
    ) -> Option<DependencyNode> {
        let artifact = graph.artifact(index);
        let scope = DependencyFilter::normalize_scope(artifact.scope.as_deref());

        if !self.filter.should_include(&scope, artifact.optional) {
            return None;
        }
        if !path.insert(artifact.key()) {
            return None;
        }

        let children = if self.filter.can_descend(depth) {
            let children: Vec<DependencyNode> = graph
                .dependencies(index)
                .into_iter()
                .filter_map(|child| self.build_node(graph, child, depth + 1, path.clone()))
                .collect();
            (!children.is_empty()).then_some(children)
        } else {
            None
        };

        Some(DependencyNode {
            group_id: artifact.group_id.clone(),
            artifact_id: artifact.artifact_id.clone(),
            version: artifact.version.clone(),
            scope,
            artifact_type: artifact.artifact_type.clone(),
            optional: artifact.optional,
            children,
        })
    }

    /// Direct manifest declarations under the same scope and optional rules.
    pub fn flat_dependencies(&self, model: &PomModel) -> Vec<FlatDependency> {
        model
            .dependencies
            .iter()
            .filter_map(|dep| {
                let scope = DependencyFilter::normalize_scope(dep.scope.as_deref());
                self.filter
                    .should_include(&scope, dep.optional)
                    .then(|| FlatDependency {
                        group_id: dep.group_id.clone(),
                        artifact_id: dep.artifact_id.clone(),
                        version: dep.version.clone(),
                        scope,
                        artifact_type: dep
                            .dep_type
                            .clone()
                            .unwrap_or_else(|| DEFAULT_TYPE.to_string()),
                        optional: dep.optional,
                    })
            })
            .collect()
    }
}

/// Count every node of the tree; `direct` is the number of root nodes.
pub fn summarize_tree(tree: &[DependencyNode]) -> DependencySummary {
    fn accumulate(node: &DependencyNode, summary: &mut DependencySummary) {
        summary.total += 1;
        if node.optional {
            summary.optional += 1;
        }
        *summary.scopes.entry(node.scope.clone()).or_insert(0) += 1;
        for child in node.children() {
            accumulate(child, summary);
        }
    }

    let mut summary = DependencySummary::default();
    for node in tree {
        accumulate(node, &mut summary);
    }
    summary.direct = tree.len();
    summary.transitive = summary.total.saturating_sub(summary.direct);
    summary
}

/// Summary of a flat view: every entry is direct.
pub fn summarize_flat(flat: &[FlatDependency]) -> DependencySummary {
    let mut summary = DependencySummary {
        total: flat.len(),
        direct: flat.len(),
        ..Default::default()
    };
    for dep in flat {
        if dep.optional {
            summary.optional += 1;
        }
        *summary.scopes.entry(dep.scope.clone()).or_insert(0) += 1;
    }
    summary
}
