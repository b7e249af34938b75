//! Sources of resolved dependency graphs
//!
//! Resolution itself happens outside this crate. A [`DependencyResolver`]
//! only hands over a graph that was already resolved, either the manifest's
//! own declarations or a tree exported to JSON by the build tool.

use std::path::Path;

use petgraph::graph::NodeIndex;
use serde::Deserialize;

use super::types::{ResolvedArtifact, ResolvedGraph};
use crate::core::Coordinate;
use crate::error::DescriptorError;
use crate::manifest::PomModel;

pub trait DependencyResolver: Send + Sync {
    fn resolve(
        &self,
        coordinate: &Coordinate,
        model: &PomModel,
        module_dir: &Path,
    ) -> Result<ResolvedGraph, DescriptorError>;
}

/// One-level graph built from the manifest's declared dependencies
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclaredDependencyResolver;

impl DependencyResolver for DeclaredDependencyResolver {
    fn resolve(
        &self,
        coordinate: &Coordinate,
        model: &PomModel,
        _module_dir: &Path,
    ) -> Result<ResolvedGraph, DescriptorError> {
        let mut graph = ResolvedGraph::new(coordinate.into());
        let root = graph.root();

        for dep in &model.dependencies {
            let mut artifact = ResolvedArtifact::new(
                dep.group_id.clone(),
                dep.artifact_id.clone(),
                dep.version.clone().unwrap_or_default(),
            )
            .with_optional(dep.optional);
            artifact.scope = dep.scope.clone();
            artifact.artifact_type = dep.dep_type.clone();
            graph.add_dependency(root, artifact);
        }

        Ok(graph)
    }
}

/// Reads a pre-resolved tree from a JSON file in each module directory
///
/// The file holds the module as root object; every object has `groupId`,
/// `artifactId`, `version` and optional `scope`, `type`, `optional` and
/// `children`. Every object becomes its own graph node so each occurrence
/// keeps the scope and optional flag the build tool reported for it.
#[derive(Debug, Clone)]
pub struct JsonGraphResolver {
    file_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonArtifact {
    group_id: String,
    artifact_id: String,
    #[serde(default)]
    version: String,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default, rename = "type")]
    artifact_type: Option<String>,
    #[serde(default)]
    optional: bool,
    #[serde(default)]
    children: Vec<JsonArtifact>,
}

impl JsonArtifact {
    fn to_artifact(&self) -> ResolvedArtifact {
        ResolvedArtifact {
            group_id: self.group_id.clone(),
            artifact_id: self.artifact_id.clone(),
            version: self.version.clone(),
            scope: self.scope.clone(),
            artifact_type: self.artifact_type.clone(),
            optional: self.optional,
        }
    }
}

impl JsonGraphResolver {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    fn link(graph: &mut ResolvedGraph, parent: NodeIndex, node: &JsonArtifact) {
        let child = graph.add_dependency(parent, node.to_artifact());
        for grandchild in &node.children {
            Self::link(graph, child, grandchild);
        }
    }
}

impl DependencyResolver for JsonGraphResolver {
    fn resolve(
        &self,
        coordinate: &Coordinate,
        _model: &PomModel,
        module_dir: &Path,
    ) -> Result<ResolvedGraph, DescriptorError> {
        let path = module_dir.join(&self.file_name);
        let graph_error = |message: String| DescriptorError::DependencyGraphError {
            module: coordinate.to_string(),
            message,
        };

        let content = std::fs::read_to_string(&path)
            .map_err(|err| graph_error(format!("cannot read {}: {err}", path.display())))?;
        let root: JsonArtifact = serde_json::from_str(&content)
            .map_err(|err| graph_error(format!("invalid graph in {}: {err}", path.display())))?;

        let mut graph = ResolvedGraph::new(root.to_artifact());
        let root_index = graph.root();

        for child in &root.children {
            Self::link(&mut graph, root_index, child);
        }

        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn model() -> PomModel {
        PomModel::parse_str(
            "<project><groupId>com.acme</groupId><artifactId>app</artifactId><version>1</version>\
             <dependencies><dependency><groupId>x</groupId><artifactId>lib</artifactId>\
             <scope>test</scope></dependency></dependencies></project>",
            Path::new("pom.xml"),
        )
        .unwrap()
    }

    #[test]
    fn test_declared_resolver() {
        let model = model();
        let coordinate = model.resolve_coordinate().unwrap();

        let graph = DeclaredDependencyResolver
            .resolve(&coordinate, &model, Path::new("."))
            .unwrap();

        let deps = graph.dependencies(graph.root());
        assert_eq!(deps.len(), 1);
        assert_eq!(graph.artifact(deps[0]).scope.as_deref(), Some("test"));
        assert_eq!(graph.artifact(deps[0]).version, "");
    }

    #[test]
    fn test_json_resolver_keeps_each_occurrence() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("deps.json"),
            r#"{
              "groupId": "com.acme", "artifactId": "app", "version": "1",
              "children": [
                {"groupId": "x", "artifactId": "a", "version": "1", "children": [
                  {"groupId": "x", "artifactId": "shared", "version": "2"}
                ]},
                {"groupId": "x", "artifactId": "b", "version": "1", "scope": "runtime", "children": [
                  {"groupId": "x", "artifactId": "shared", "version": "2"}
                ]}
              ]
            }"#,
        )
        .unwrap();

        let model = model();
        let coordinate = model.resolve_coordinate().unwrap();
        let graph = JsonGraphResolver::new("deps.json")
            .resolve(&coordinate, &model, temp.path())
            .unwrap();

        assert_eq!(graph.node_count(), 5);
        let top = graph.dependencies(graph.root());
        assert_eq!(graph.artifact(top[1]).scope.as_deref(), Some("runtime"));

        let under_a = graph.dependencies(top[0]);
        let under_b = graph.dependencies(top[1]);
        assert_ne!(under_a, under_b);
        assert_eq!(graph.artifact(under_a[0]).key(), "x:shared:2");
        assert_eq!(graph.artifact(under_b[0]).key(), "x:shared:2");
    }

    #[test]
    fn test_json_resolver_missing_file() {
        let temp = TempDir::new().unwrap();
        let model = model();
        let coordinate = model.resolve_coordinate().unwrap();

        let err = JsonGraphResolver::new("deps.json")
            .resolve(&coordinate, &model, temp.path())
            .unwrap_err();

        assert!(matches!(err, DescriptorError::DependencyGraphError { .. }));
    }
}
