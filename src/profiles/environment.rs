//! Per-profile runtime settings merged from `application*.{yml,yaml,properties}`

use std::path::Path;

use serde::Serialize;
use serde_yaml::{Mapping, Value};
use tracing::{debug, warn};

use super::properties::parse_properties;
use crate::constants::maven::RESOURCES_DIR;

const DEFAULT_ACTUATOR_BASE_PATH: &str = "/actuator";
const CONFIG_EXTENSIONS: &[&str] = &["yml", "yaml", "properties"];

/// Runtime settings of one profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentConfig {
    pub profile: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_path: Option<String>,
    pub actuator_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actuator_base_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actuator_health_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actuator_info_path: Option<String>,
}

/// Build one [`EnvironmentConfig`] per profile.
///
/// Each profile starts from the common `application.*` settings and
/// deep-merges its own `application-{profile}.*` files on top. Returns an
/// empty list when the module has no resources directory.
pub fn detect_environment_configs(
    module_dir: &Path,
    profiles: &[String],
    actuator_enabled: bool,
) -> Vec<EnvironmentConfig> {
    let resources = module_dir.join(RESOURCES_DIR);
    if profiles.is_empty() || !resources.is_dir() {
        debug!(path = %resources.display(), "no resources to derive environments from");
        return Vec::new();
    }

    let common = read_configuration(&resources, "application");

    profiles
        .iter()
        .map(|profile| {
            let mut config = common.clone();
            deep_merge(
                &mut config,
                read_configuration(&resources, &format!("application-{profile}")),
            );
            environment_for(profile, &config, actuator_enabled)
        })
        .collect()
}

fn environment_for(profile: &str, config: &Mapping, actuator_enabled: bool) -> EnvironmentConfig {
    let actuator_base_path = actuator_enabled.then(|| {
        lookup(config, "management.endpoints.web.base-path")
            .and_then(scalar_to_string)
            .unwrap_or_else(|| DEFAULT_ACTUATOR_BASE_PATH.to_string())
    });

    EnvironmentConfig {
        profile: profile.to_string(),
        server_port: server_port(config),
        context_path: ["server.servlet.context-path", "spring.webflux.base-path"]
            .iter()
            .find_map(|key| lookup(config, key).and_then(scalar_to_string)),
        actuator_enabled,
        actuator_health_path: actuator_base_path.as_ref().map(|base| format!("{base}/health")),
        actuator_info_path: actuator_base_path.as_ref().map(|base| format!("{base}/info")),
        actuator_base_path,
    }
}

/// Read `{stem}.yml`, `{stem}.yaml` and `{stem}.properties`, later files
/// overriding top-level keys of earlier ones.
fn read_configuration(resources: &Path, stem: &str) -> Mapping {
    let mut config = Mapping::new();

    for extension in CONFIG_EXTENSIONS {
        let path = resources.join(format!("{stem}.{extension}"));
        if !path.is_file() {
            continue;
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to read configuration file");
                continue;
            }
        };

        let entries = if *extension == "properties" {
            parse_properties(&content)
                .into_iter()
                .map(|(key, value)| (Value::String(key), Value::String(value)))
                .collect()
        } else {
            match serde_yaml::from_str::<Value>(&content) {
                Ok(Value::Mapping(mapping)) => mapping,
                Ok(_) => Mapping::new(),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "failed to parse YAML file");
                    Mapping::new()
                }
            }
        };

        for (key, value) in entries {
            config.insert(key, value);
        }
    }

    config
}

fn deep_merge(target: &mut Mapping, source: Mapping) {
    for (key, value) in source {
        match value {
            Value::Mapping(incoming) => match target.get_mut(&key) {
                Some(Value::Mapping(existing)) => deep_merge(existing, incoming),
                _ => {
                    target.insert(key, Value::Mapping(incoming));
                }
            },
            other => {
                target.insert(key, other);
            }
        }
    }
}

/// Nested YAML path first, then the flat dotted key used by `.properties`.
fn lookup<'a>(config: &'a Mapping, key: &str) -> Option<&'a Value> {
    nested(config, key).or_else(|| config.get(key))
}

fn nested<'a>(config: &'a Mapping, key: &str) -> Option<&'a Value> {
    let mut segments = key.split('.');
    let first = config.get(segments.next()?)?;
    segments.try_fold(first, |value, segment| value.as_mapping()?.get(segment))
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn server_port(config: &Mapping) -> Option<u16> {
    [nested(config, "server.port"), config.get("server.port")]
        .into_iter()
        .flatten()
        .find_map(|value| {
            let parsed = match value {
                Value::Number(n) => n.as_u64().and_then(|port| u16::try_from(port).ok()),
                other => scalar_to_string(other).and_then(|s| s.trim().parse().ok()),
            };
            if parsed.is_none() {
                warn!(value = ?value, "invalid server port value");
            }
            parsed
        })
}
