//! Archives produced by `maven-assembly-plugin` executions

use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::constants::coordinates::ASSEMBLY_PLUGIN;
use crate::core::{ConfigNode, Coordinate};
use crate::error::{DescriptorError, XmlParseError};
use crate::manifest::PomModel;

const DEFAULT_ASSEMBLY_ID: &str = "assembly";
const DEFAULT_ASSEMBLY_FORMAT: &str = "zip";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyArtifact {
    pub assembly_id: String,
    pub format: String,
    pub repository_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
}

impl AssemblyArtifact {
    fn new(coordinate: &Coordinate, assembly_id: &str, format: &str, append_id: bool) -> Self {
        let classifier = append_id.then_some(assembly_id);
        Self {
            assembly_id: assembly_id.to_string(),
            format: format.to_string(),
            repository_path: coordinate.repository_path(classifier, format),
            repository_url: None,
        }
    }
}

/// Assemblies declared by the first `maven-assembly-plugin` in the build
/// plugins, one entry per descriptor format and descriptor ref.
pub fn detect_assemblies(
    model: &PomModel,
    coordinate: &Coordinate,
    module_dir: &Path,
) -> Vec<AssemblyArtifact> {
    let Some(plugin) = model
        .build_plugins()
        .iter()
        .find(|plugin| plugin.artifact_id == ASSEMBLY_PLUGIN)
    else {
        return Vec::new();
    };

    debug!(module = %coordinate, "found assembly plugin");

    plugin
        .executions
        .iter()
        .filter_map(|execution| execution.configuration.as_ref())
        .flat_map(|config| execution_assemblies(config, coordinate, module_dir))
        .collect()
}

fn execution_assemblies(
    config: &ConfigNode,
    coordinate: &Coordinate,
    module_dir: &Path,
) -> Vec<AssemblyArtifact> {
    let append_id = config.text_at("appendAssemblyId").as_deref() != Some("false");
    let mut assemblies = Vec::new();

    for descriptor in config.texts_at("descriptors/descriptor") {
        let path = module_dir.join(&descriptor);
        match read_descriptor(&path) {
            Ok(Some((id, formats))) => assemblies.extend(
                formats
                    .iter()
                    .map(|format| AssemblyArtifact::new(coordinate, &id, format, append_id)),
            ),
            Ok(None) => warn!(path = %path.display(), "assembly descriptor not found"),
            Err(err) => warn!(path = %path.display(), error = %err, "failed to parse assembly descriptor"),
        }
    }

    for reference in config.texts_at("descriptorRefs/descriptorRef") {
        assemblies.push(AssemblyArtifact::new(
            coordinate,
            &reference,
            DEFAULT_ASSEMBLY_FORMAT,
            append_id,
        ));
    }

    assemblies
}

/// Id and formats of an assembly descriptor, `None` when the file is absent.
fn read_descriptor(path: &Path) -> Result<Option<(String, Vec<String>)>, DescriptorError> {
    if !path.is_file() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|source| DescriptorError::FileReadError {
        path: path.to_path_buf(),
        source,
    })?;
    let doc = roxmltree::Document::parse(&content)
        .map_err(|err| XmlParseError::new(path, &content, err))?;
    let root = ConfigNode::from_element(doc.root_element());

    let id = root
        .text_at("id")
        .unwrap_or_else(|| DEFAULT_ASSEMBLY_ID.to_string());
    let mut formats = root.texts_at("formats/format");
    if root.at("formats").is_none() {
        formats.push(DEFAULT_ASSEMBLY_FORMAT.to_string());
    }

    Ok(Some((id, formats)))
}
