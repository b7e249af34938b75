//! Build plugin inventory
//!
//! Lists the plugins a module actually builds with, versions filled in from
//! plugin management, and optionally their configuration rendered as JSON
//! with credential-like keys masked.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use serde_json::Value;

use crate::manifest::{Plugin, PomModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryOptions {
    pub include_configuration: bool,
    pub include_management: bool,
    pub mask_sensitive: bool,
}

impl Default for InventoryOptions {
    fn default() -> Self {
        Self {
            include_configuration: true,
            include_management: true,
            mask_sensitive: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginInventory {
    pub summary: PluginSummary,
    pub list: Vec<PluginDetail>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub management: Vec<ManagedPlugin>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginSummary {
    pub total: usize,
    pub with_configuration: usize,
    pub from_management: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    pub artifact_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub source: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub goals: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub executions: Vec<ExecutionDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    pub goals: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedPlugin {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    pub artifact_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub used_in_build: bool,
}

pub fn collect_plugins(model: &PomModel, options: InventoryOptions) -> PluginInventory {
    let managed_versions: HashMap<String, &str> = model
        .managed_plugins()
        .iter()
        .filter_map(|plugin| Some((plugin.key(), plugin.version.as_deref()?)))
        .collect();

    let list: Vec<PluginDetail> = model
        .build_plugins()
        .iter()
        .map(|plugin| plugin_detail(plugin, &managed_versions, options))
        .collect();

    let used: HashSet<String> = model.build_plugins().iter().map(Plugin::key).collect();
    let management: Vec<ManagedPlugin> = if options.include_management {
        model
            .managed_plugins()
            .iter()
            .map(|plugin| ManagedPlugin {
                group_id: plugin.group_id.clone(),
                artifact_id: plugin.artifact_id.clone(),
                version: plugin.version.clone(),
                used_in_build: used.contains(&plugin.key()),
            })
            .collect()
    } else {
        Vec::new()
    };

    PluginInventory {
        summary: PluginSummary {
            total: list.len(),
            with_configuration: list
                .iter()
                .filter(|detail| detail.configuration.is_some())
                .count(),
            from_management: management.len(),
        },
        list,
        management,
    }
}

fn plugin_detail(
    plugin: &Plugin,
    managed_versions: &HashMap<String, &str>,
    options: InventoryOptions,
) -> PluginDetail {
    let mut goals: Vec<String> = Vec::new();
    for goal in plugin.executions.iter().flat_map(|e| &e.goals) {
        if !goals.contains(goal) {
            goals.push(goal.clone());
        }
    }

    PluginDetail {
        group_id: plugin.group_id.clone(),
        artifact_id: plugin.artifact_id.clone(),
        version: plugin.version.clone().or_else(|| {
            managed_versions
                .get(&plugin.key())
                .map(|version| version.to_string())
        }),
        source: "effective",
        phase: plugin.executions.iter().find_map(|e| e.phase.clone()),
        goals,
        executions: plugin
            .executions
            .iter()
            .map(|execution| ExecutionDetail {
                id: execution.id.clone(),
                phase: execution.phase.clone(),
                goals: execution.goals.clone(),
            })
            .collect(),
        configuration: options
            .include_configuration
            .then(|| plugin.configuration.as_ref())
            .flatten()
            .map(|config| config.to_sanitized_json(options.mask_sensitive)),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    const POM: &str = "<project><groupId>g</groupId><artifactId>a</artifactId><version>1</version><build>\
        <plugins>\
          <plugin><groupId>org.apache.maven.plugins</groupId><artifactId>maven-deploy-plugin</artifactId>\
            <configuration><repositoryId>nexus</repositoryId><password>hunter2</password>\
            <authToken>abc</authToken></configuration></plugin>\
          <plugin><groupId>org.springframework.boot</groupId><artifactId>spring-boot-maven-plugin</artifactId>\
            <executions>\
              <execution><id>repackage</id><goals><goal>repackage</goal></goals></execution>\
              <execution><id>img</id><phase>package</phase><goals><goal>build-image</goal><goal>repackage</goal></goals></execution>\
            </executions></plugin>\
        </plugins>\
        <pluginManagement><plugins>\
          <plugin><groupId>org.springframework.boot</groupId><artifactId>spring-boot-maven-plugin</artifactId><version>3.3.0</version></plugin>\
          <plugin><groupId>org.apache.maven.plugins</groupId><artifactId>maven-site-plugin</artifactId><version>4.0</version></plugin>\
        </plugins></pluginManagement>\
      </build></project>";

    fn model() -> PomModel {
        PomModel::parse_str(POM, Path::new("pom.xml")).unwrap()
    }

    #[test]
    fn test_inventory() {
        let inventory = collect_plugins(&model(), InventoryOptions::default());

        assert_eq!(
            inventory.summary,
            PluginSummary {
                total: 2,
                with_configuration: 1,
                from_management: 2,
            }
        );

        let boot = &inventory.list[1];
        assert_eq!(boot.version.as_deref(), Some("3.3.0"));
        assert_eq!(boot.phase.as_deref(), Some("package"));
        assert_eq!(boot.goals, vec!["repackage", "build-image"]);
        assert_eq!(boot.executions.len(), 2);

        assert!(inventory.management[0].used_in_build);
        assert!(!inventory.management[1].used_in_build);
    }

    #[test]
    fn test_sensitive_values_are_masked() {
        let masked = collect_plugins(&model(), InventoryOptions::default());
        assert_eq!(
            masked.list[0].configuration,
            Some(json!({
                "repositoryId": "nexus",
                "password": "***MASKED***",
                "authToken": "***MASKED***",
            }))
        );

        let raw = collect_plugins(
            &model(),
            InventoryOptions {
                mask_sensitive: false,
                ..Default::default()
            },
        );
        assert_eq!(
            raw.list[0].configuration.as_ref().unwrap()["password"],
            json!("hunter2")
        );
    }

    #[test]
    fn test_configuration_and_management_can_be_left_out() {
        let inventory = collect_plugins(
            &model(),
            InventoryOptions {
                include_configuration: false,
                include_management: false,
                mask_sensitive: true,
            },
        );

        assert_eq!(inventory.summary.with_configuration, 0);
        assert_eq!(inventory.summary.from_management, 0);
        assert!(inventory.management.is_empty());
    }
}
