//! Plugin lookup helpers shared by the classifiers and detectors

use super::{Plugin, PomModel};
use crate::constants::maven::DEFAULT_PLUGIN_GROUP;
use crate::core::ConfigNode;

impl Plugin {
    /// Declared group, or the Maven default plugin group.
    pub fn effective_group_id(&self) -> &str {
        self.group_id.as_deref().unwrap_or(DEFAULT_PLUGIN_GROUP)
    }

    pub fn matches(&self, group_id: &str, artifact_id: &str) -> bool {
        self.artifact_id == artifact_id && self.effective_group_id() == group_id
    }

    /// A plugin without executions runs its default goals, so any goal counts.
    pub fn has_goal(&self, goal: &str) -> bool {
        self.executions.is_empty()
            || self
                .executions
                .iter()
                .any(|execution| execution.goals.iter().any(|g| g == goal))
    }

    pub fn config_text(&self, path: &str) -> Option<String> {
        self.configuration
            .as_ref()
            .and_then(|config| config.text_at(path))
    }

    /// Plugin-level configuration followed by each execution's configuration.
    pub fn configurations(&self) -> impl Iterator<Item = &ConfigNode> {
        self.configuration.iter().chain(
            self.executions
                .iter()
                .filter_map(|execution| execution.configuration.as_ref()),
        )
    }

    pub fn key(&self) -> String {
        format!(
            "{}:{}",
            self.group_id.as_deref().unwrap_or_default(),
            self.artifact_id
        )
    }
}

impl PomModel {
    pub fn build_plugins(&self) -> &[Plugin] {
        &self.build.plugins
    }

    pub fn managed_plugins(&self) -> &[Plugin] {
        &self.build.plugin_management
    }

    /// Build plugins followed by plugin-management declarations.
    pub fn all_plugins(&self) -> impl Iterator<Item = &Plugin> {
        self.build_plugins().iter().chain(self.managed_plugins())
    }

    /// First matching declaration across build plugins and plugin management.
    pub fn find_plugin(&self, group_id: &str, artifact_id: &str) -> Option<&Plugin> {
        self.all_plugins()
            .find(|plugin| plugin.matches(group_id, artifact_id))
    }

    /// First matching declaration in the build plugins only.
    pub fn find_build_plugin(&self, group_id: &str, artifact_id: &str) -> Option<&Plugin> {
        self.build_plugins()
            .iter()
            .find(|plugin| plugin.matches(group_id, artifact_id))
    }

    pub fn has_plugin(&self, group_id: &str, artifact_id: &str) -> bool {
        self.find_plugin(group_id, artifact_id).is_some()
    }
}
