use std::path::Path;

use serde::Serialize;
use tracing::info;

use super::FrameworkExtension;
use crate::analyzer::ModuleEnrichment;
use crate::constants::coordinates::{QUARKUS_GROUP, QUARKUS_PLUGIN};
use crate::manifest::PomModel;
use crate::profiles::properties_profiles;

const NATIVE_PROFILE: &str = "native";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarkusMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub native_build: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub profiles: Vec<String>,
}

/// Quarkus applications: platform version, native build and
/// `application-*.properties` profiles
pub struct QuarkusExtension;

impl QuarkusExtension {
    fn version(model: &PomModel) -> Option<String> {
        model
            .dependencies
            .iter()
            .filter(|dep| dep.group_id == QUARKUS_GROUP)
            .find_map(|dep| dep.version.clone().filter(|v| !v.is_empty()))
    }
}

impl FrameworkExtension for QuarkusExtension {
    fn name(&self) -> &'static str {
        "Quarkus"
    }

    fn priority(&self) -> i32 {
        90
    }

    fn is_applicable(&self, model: &PomModel, _module_dir: &Path) -> bool {
        model
            .dependencies
            .iter()
            .any(|dep| dep.group_id == QUARKUS_GROUP)
            || model.build_plugins().iter().any(|plugin| {
                plugin.group_id.as_deref() == Some(QUARKUS_GROUP)
                    && plugin.artifact_id == QUARKUS_PLUGIN
            })
    }

    fn enrich(
        &self,
        enrichment: &mut ModuleEnrichment<'_>,
        model: &PomModel,
        module_dir: &Path,
        _project_root: &Path,
    ) {
        let metadata = QuarkusMetadata {
            version: Self::version(model),
            native_build: model.profiles.iter().any(|id| id == NATIVE_PROFILE),
            profiles: properties_profiles(module_dir),
        };
        info!(
            module = %model.artifact_id,
            version = ?metadata.version,
            native = metadata.native_build,
            "detected Quarkus application"
        );

        enrichment.add_build_plugin(QUARKUS_PLUGIN);
        enrichment.fill_quarkus(metadata);
    }
}
