//! Allowlist matcher for deployment-relevant build plugins

use crate::constants::coordinates::*;
use crate::constants::maven::DEFAULT_PLUGIN_GROUP;
use crate::manifest::PomModel;

/// Plugin artifact id and the groups it is accepted from
pub static PLUGIN_ALLOWLIST: &[(&str, &[&str])] = &[
    (SPRING_BOOT_PLUGIN, &[SPRING_BOOT_GROUP]),
    (QUARKUS_PLUGIN, &[QUARKUS_GROUP, QUARKUS_PLATFORM_GROUP]),
    (SHADE_PLUGIN, &[DEFAULT_PLUGIN_GROUP]),
    (ASSEMBLY_PLUGIN, &[DEFAULT_PLUGIN_GROUP]),
    (JIB_PLUGIN, &[JIB_GROUP]),
    (DOCKERFILE_PLUGIN, &[SPOTIFY_GROUP]),
];

/// Allowlisted plugins declared in build plugins or plugin management,
/// in first-seen order without duplicates.
pub fn detect_plugins(model: &PomModel) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();

    for plugin in model.all_plugins() {
        let group = plugin.effective_group_id();
        let allowed = PLUGIN_ALLOWLIST
            .iter()
            .any(|(name, groups)| *name == plugin.artifact_id && groups.contains(&group));

        if allowed && !found.contains(&plugin.artifact_id) {
            found.push(plugin.artifact_id.clone());
        }
    }

    found
}
