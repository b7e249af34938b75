//! Container image detection
//!
//! Each supported build tool has an extractor that reads its own
//! configuration shape. Extractors are tried in a fixed order; a tool that is
//! declared but yields no usable image falls through to the next one.

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::constants::coordinates::*;
use crate::constants::maven::RESOURCES_DIR;
use crate::core::ConfigNode;
use crate::manifest::{Plugin, PomModel};
use crate::profiles::properties::parse_properties;

const QUARKUS_PROPERTY_PREFIX: &str = "quarkus.container-image.";

/// Image coordinates a module publishes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerImageSpec {
    pub tool: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry: Option<String>,
    #[serde(rename = "group", skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(rename = "tag", skip_serializing_if = "Option::is_none")]
    pub primary_tag: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional_tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub builder_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish: Option<bool>,
}

impl ContainerImageSpec {
    fn new(tool: &str, image: String) -> Self {
        Self {
            tool: tool.to_string(),
            image,
            ..Default::default()
        }
    }

    /// First tag is primary, the rest are additional.
    fn with_tags(mut self, mut tags: Vec<String>) -> Self {
        if !tags.is_empty() {
            self.primary_tag = Some(tags.remove(0));
            self.additional_tags = tags;
        }
        self
    }

    fn with_split_name(mut self) -> Self {
        let (registry, namespace) = split_image_name(&self.image);
        self.registry = registry;
        self.namespace = namespace;
        self
    }
}

type Extract = fn(&Plugin, &PomModel, &Path) -> Option<ContainerImageSpec>;

struct ContainerExtractor {
    group_id: &'static str,
    artifact_id: &'static str,
    extract: Extract,
}

static EXTRACTORS: &[ContainerExtractor] = &[
    ContainerExtractor {
        group_id: JIB_GROUP,
        artifact_id: JIB_PLUGIN,
        extract: jib,
    },
    ContainerExtractor {
        group_id: SPRING_BOOT_GROUP,
        artifact_id: SPRING_BOOT_PLUGIN,
        extract: spring_boot_build_image,
    },
    ContainerExtractor {
        group_id: QUARKUS_GROUP,
        artifact_id: QUARKUS_PLUGIN,
        extract: quarkus,
    },
    ContainerExtractor {
        group_id: FABRIC8_GROUP,
        artifact_id: DOCKER_PLUGIN,
        extract: |plugin, _, _| image_list(plugin, "fabric8"),
    },
    ContainerExtractor {
        group_id: MICRONAUT_GROUP,
        artifact_id: MICRONAUT_PLUGIN,
        extract: micronaut,
    },
    ContainerExtractor {
        group_id: JKUBE_GROUP,
        artifact_id: JKUBE_KUBERNETES_PLUGIN,
        extract: |plugin, _, _| image_list(plugin, "jkube"),
    },
    ContainerExtractor {
        group_id: JKUBE_GROUP,
        artifact_id: JKUBE_OPENSHIFT_PLUGIN,
        extract: |plugin, _, _| image_list(plugin, "jkube"),
    },
];

/// Image published by the first configured container tool, if any.
pub fn detect_container(model: &PomModel, module_dir: &Path) -> Option<ContainerImageSpec> {
    EXTRACTORS.iter().find_map(|extractor| {
        let plugin = model.find_plugin(extractor.group_id, extractor.artifact_id)?;
        let spec = (extractor.extract)(plugin, model, module_dir);
        if spec.is_none() {
            debug!(
                plugin = extractor.artifact_id,
                "container plugin declared without image configuration"
            );
        }
        spec
    })
}

/// Split `registry/namespace/name` or `namespace/name` references.
///
/// A registry is only recognised when there are at least three segments and
/// the first one looks like a host name.
pub fn split_image_name(image: &str) -> (Option<String>, Option<String>) {
    let parts: Vec<&str> = image.split('/').collect();
    match parts.as_slice() {
        [registry, namespace, _, ..] if registry.contains('.') => {
            (Some(registry.to_string()), Some(namespace.to_string()))
        }
        [namespace, _, ..] => (None, Some(namespace.to_string())),
        _ => (None, None),
    }
}

fn jib(plugin: &Plugin, _: &PomModel, _: &Path) -> Option<ContainerImageSpec> {
    let config = plugin.configuration.as_ref();
    let mut image = config.and_then(|c| c.text_at("to/image"));
    let mut base_image = config.and_then(|c| c.text_at("from/image"));
    let mut tags = config.map(|c| c.texts_at("to/tags/tag")).unwrap_or_default();

    if image.is_none() && base_image.is_none() {
        for execution in plugin.executions.iter().filter_map(|e| e.configuration.as_ref()) {
            image = image.or_else(|| execution.text_at("to/image"));
            base_image = base_image.or_else(|| execution.text_at("from/image"));
            if tags.is_empty() {
                tags = execution.texts_at("to/tags/tag");
            }
        }
    }

    if image.is_none() && tags.is_empty() {
        return None;
    }

    let mut spec = ContainerImageSpec::new("jib", image.unwrap_or_default())
        .with_split_name()
        .with_tags(tags);
    spec.base_image = base_image;
    Some(spec)
}

fn spring_boot_build_image(plugin: &Plugin, _: &PomModel, _: &Path) -> Option<ContainerImageSpec> {
    if !plugin.has_goal("build-image") {
        return None;
    }
    let config = plugin.configuration.as_ref()?;
    let name = config.text_at("image/name")?;

    let mut spec = ContainerImageSpec::new("spring-boot", name)
        .with_split_name()
        .with_tags(config.texts_at("image/tags/tag"));
    spec.builder_image = config.text_at("image/builder");
    spec.run_image = config.text_at("image/runImage");
    spec.publish = config
        .text_at("image/publish")
        .map(|value| value.trim().eq_ignore_ascii_case("true"));
    Some(spec)
}

#[derive(Default)]
struct QuarkusImage {
    registry: Option<String>,
    group: Option<String>,
    name: Option<String>,
    tag: Option<String>,
    additional_tags: Vec<String>,
}

impl QuarkusImage {
    fn from_config(config: Option<&ConfigNode>) -> Self {
        let Some(config) = config else {
            return Self::default();
        };
        Self {
            registry: config.text_at("containerImage/registry"),
            group: config.text_at("containerImage/group"),
            name: config.text_at("containerImage/name"),
            tag: config.text_at("containerImage/tag"),
            additional_tags: config.texts_at("containerImage/additionalTags/tag"),
        }
    }

    /// Fill whatever is still missing from `quarkus.container-image.*` keys.
    fn fill_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let key = |suffix: &str| lookup(&format!("{QUARKUS_PROPERTY_PREFIX}{suffix}"));

        self.registry = self.registry.take().or_else(|| key("registry"));
        self.group = self.group.take().or_else(|| key("group"));
        self.name = self.name.take().or_else(|| key("name"));
        self.tag = self.tag.take().or_else(|| key("tag"));
        if self.additional_tags.is_empty() {
            self.additional_tags = key("additional-tags")
                .map(|tags| {
                    tags.split(',')
                        .map(str::trim)
                        .filter(|tag| !tag.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
        }
    }

    fn into_spec(self) -> Option<ContainerImageSpec> {
        if self.name.is_none() && self.registry.is_none() && self.group.is_none() {
            return None;
        }

        let image = [&self.registry, &self.group, &self.name]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("/");

        let mut spec = ContainerImageSpec::new("quarkus", image);
        spec.registry = self.registry;
        spec.namespace = self.group;
        spec.primary_tag = self.tag;
        spec.additional_tags = self.additional_tags;
        Some(spec)
    }
}

fn quarkus(plugin: &Plugin, model: &PomModel, module_dir: &Path) -> Option<ContainerImageSpec> {
    let mut image = QuarkusImage::from_config(plugin.configuration.as_ref());

    if image.name.is_none() {
        image.fill_from(|key| model.property(key).map(str::to_string));
    }

    if image.name.is_none() {
        let path = module_dir.join(RESOURCES_DIR).join("application.properties");
        if let Ok(content) = std::fs::read_to_string(&path) {
            let properties = parse_properties(&content);
            image.fill_from(|key| {
                properties
                    .get(key)
                    .map(|value| value.trim().to_string())
                    .filter(|value| !value.is_empty())
            });
        }
    }

    image.into_spec()
}

/// Fabric8 and JKube share the `<images><image>` layout.
fn image_list(plugin: &Plugin, tool: &str) -> Option<ContainerImageSpec> {
    let image = plugin
        .configuration
        .as_ref()?
        .nodes_at("images/image")
        .into_iter()
        .next()?;
    let build = image.child("build")?;

    let mut spec = ContainerImageSpec::new(tool, image.text_at("name").unwrap_or_default())
        .with_split_name()
        .with_tags(build.texts_at("tags/tag"));
    spec.base_image = build.text_at("from");
    Some(spec)
}

fn micronaut(plugin: &Plugin, _: &PomModel, _: &Path) -> Option<ContainerImageSpec> {
    let config = plugin.configuration.as_ref()?;
    let image = QuarkusImage {
        registry: config.text_at("dockerRegistry"),
        group: config.text_at("dockerGroup"),
        name: config.text_at("dockerName"),
        tag: config.text_at("dockerTag"),
        additional_tags: config.texts_at("dockerExtraTags/tag"),
    };

    image.into_spec().map(|spec| ContainerImageSpec {
        tool: "micronaut".to_string(),
        ..spec
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn pom(body: &str) -> PomModel {
        PomModel::parse_str(
            &format!(
                "<project><groupId>g</groupId><artifactId>a</artifactId><version>1</version>{body}</project>"
            ),
            Path::new("pom.xml"),
        )
        .unwrap()
    }

    fn plugins(xml: &str) -> String {
        format!("<build><plugins>{xml}</plugins></build>")
    }

    #[test]
    fn test_split_image_name() {
        assert_eq!(
            split_image_name("ghcr.io/acme/api"),
            (Some("ghcr.io".to_string()), Some("acme".to_string()))
        );
        assert_eq!(split_image_name("acme/api"), (None, Some("acme".to_string())));
        assert_eq!(split_image_name("localhost/acme/api"), (None, Some("localhost".to_string())));
        assert_eq!(split_image_name("api"), (None, None));
    }

    #[test]
    fn test_jib() {
        let model = pom(&plugins(
            "<plugin><groupId>com.google.cloud.tools</groupId><artifactId>jib-maven-plugin</artifactId>\
             <configuration>\
               <from><image>eclipse-temurin:21-jre</image></from>\
               <to><image>registry.acme.io/shop/api</image><tags><tag>1.0</tag><tag>latest</tag></tags></to>\
             </configuration></plugin>",
        ));

        let spec = detect_container(&model, Path::new("/nonexistent")).unwrap();

        assert_eq!(spec.tool, "jib");
        assert_eq!(spec.image, "registry.acme.io/shop/api");
        assert_eq!(spec.registry.as_deref(), Some("registry.acme.io"));
        assert_eq!(spec.namespace.as_deref(), Some("shop"));
        assert_eq!(spec.primary_tag.as_deref(), Some("1.0"));
        assert_eq!(spec.additional_tags, vec!["latest"]);
        assert_eq!(spec.base_image.as_deref(), Some("eclipse-temurin:21-jre"));
    }

    #[test]
    fn test_jib_execution_configuration_fallback() {
        let model = pom(&plugins(
            "<plugin><groupId>com.google.cloud.tools</groupId><artifactId>jib-maven-plugin</artifactId>\
             <executions><execution><goals><goal>build</goal></goals>\
               <configuration><to><image>acme/worker</image></to></configuration>\
             </execution></executions></plugin>",
        ));

        let spec = detect_container(&model, Path::new("/nonexistent")).unwrap();
        assert_eq!(spec.image, "acme/worker");
        assert_eq!(spec.namespace.as_deref(), Some("acme"));
    }

    #[test]
    fn test_empty_jib_falls_through_to_next_tool() {
        let model = pom(&plugins(
            "<plugin><groupId>com.google.cloud.tools</groupId><artifactId>jib-maven-plugin</artifactId></plugin>\
             <plugin><groupId>io.micronaut.maven</groupId><artifactId>micronaut-maven-plugin</artifactId>\
               <configuration><dockerGroup>acme</dockerGroup><dockerName>edge</dockerName>\
               <dockerTag>2.1</dockerTag><dockerExtraTags><tag>stable</tag></dockerExtraTags></configuration>\
             </plugin>",
        ));

        let spec = detect_container(&model, Path::new("/nonexistent")).unwrap();
        assert_eq!(spec.tool, "micronaut");
        assert_eq!(spec.image, "acme/edge");
        assert_eq!(spec.primary_tag.as_deref(), Some("2.1"));
        assert_eq!(spec.additional_tags, vec!["stable"]);
    }

    #[test]
    fn test_spring_boot_build_image_requires_goal() {
        let config = "<configuration><image><name>docker.io/acme/app</name>\
                      <builder>paketobuildpacks/builder-jammy-base</builder>\
                      <publish>true</publish></image></configuration>";

        let with_goal = pom(&plugins(&format!(
            "<plugin><groupId>org.springframework.boot</groupId><artifactId>spring-boot-maven-plugin</artifactId>\
             {config}<executions><execution><goals><goal>build-image</goal></goals></execution></executions></plugin>"
        )));
        let without_goal = pom(&plugins(&format!(
            "<plugin><groupId>org.springframework.boot</groupId><artifactId>spring-boot-maven-plugin</artifactId>\
             {config}<executions><execution><goals><goal>repackage</goal></goals></execution></executions></plugin>"
        )));

        let spec = detect_container(&with_goal, Path::new("/nonexistent")).unwrap();
        assert_eq!(spec.tool, "spring-boot");
        assert_eq!(spec.registry.as_deref(), Some("docker.io"));
        assert_eq!(spec.builder_image.as_deref(), Some("paketobuildpacks/builder-jammy-base"));
        assert_eq!(spec.publish, Some(true));

        assert!(detect_container(&without_goal, Path::new("/nonexistent")).is_none());
    }

    #[test]
    fn test_quarkus_properties_fallback() {
        let model = pom(&format!(
            "<properties>\
               <quarkus.container-image.group>acme</quarkus.container-image.group>\
               <quarkus.container-image.name>orders</quarkus.container-image.name>\
               <quarkus.container-image.additional-tags>a, b,,c</quarkus.container-image.additional-tags>\
             </properties>{}",
            plugins("<plugin><groupId>io.quarkus</groupId><artifactId>quarkus-maven-plugin</artifactId></plugin>")
        ));

        let spec = detect_container(&model, Path::new("/nonexistent")).unwrap();
        assert_eq!(spec.tool, "quarkus");
        assert_eq!(spec.image, "acme/orders");
        assert_eq!(spec.additional_tags, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_quarkus_application_properties_fallback() {
        let temp = TempDir::new().unwrap();
        let resources = temp.path().join(RESOURCES_DIR);
        fs::create_dir_all(&resources).unwrap();
        fs::write(
            resources.join("application.properties"),
            "quarkus.container-image.registry=quay.io\nquarkus.container-image.name=billing\nquarkus.container-image.tag=3.0\n",
        )
        .unwrap();

        let model = pom(&plugins(
            "<plugin><groupId>io.quarkus</groupId><artifactId>quarkus-maven-plugin</artifactId></plugin>",
        ));

        let spec = detect_container(&model, temp.path()).unwrap();
        assert_eq!(spec.image, "quay.io/billing");
        assert_eq!(spec.registry.as_deref(), Some("quay.io"));
        assert_eq!(spec.primary_tag.as_deref(), Some("3.0"));
    }

    #[test]
    fn test_quarkus_platform_group_is_not_a_container_tool() {
        let model = pom(&format!(
            "<properties><quarkus.container-image.name>x</quarkus.container-image.name></properties>{}",
            plugins("<plugin><groupId>io.quarkus.platform</groupId><artifactId>quarkus-maven-plugin</artifactId></plugin>")
        ));

        assert!(detect_container(&model, Path::new("/nonexistent")).is_none());
    }

    #[test]
    fn test_fabric8_requires_build_section() {
        let with_build = pom(&plugins(
            "<plugin><groupId>io.fabric8</groupId><artifactId>docker-maven-plugin</artifactId><configuration>\
               <images><image><name>acme/gateway</name><build><from>alpine:3</from>\
               <tags><tag>1</tag></tags></build></image></images>\
             </configuration></plugin>",
        ));
        let without_build = pom(&plugins(
            "<plugin><groupId>io.fabric8</groupId><artifactId>docker-maven-plugin</artifactId><configuration>\
               <images><image><name>acme/gateway</name></image></images>\
             </configuration></plugin>",
        ));

        let spec = detect_container(&with_build, Path::new("/nonexistent")).unwrap();
        assert_eq!(spec.tool, "fabric8");
        assert_eq!(spec.base_image.as_deref(), Some("alpine:3"));
        assert_eq!(spec.primary_tag.as_deref(), Some("1"));

        assert!(detect_container(&without_build, Path::new("/nonexistent")).is_none());
    }

    #[test]
    fn test_jkube_openshift() {
        let model = pom(&plugins(
            "<plugin><groupId>org.eclipse.jkube</groupId><artifactId>openshift-maven-plugin</artifactId><configuration>\
               <images><image><name>quay.io/acme/ui</name><build/></image>\
               <image><name>ignored/second</name><build/></image></images>\
             </configuration></plugin>",
        ));

        let spec = detect_container(&model, Path::new("/nonexistent")).unwrap();
        assert_eq!(spec.tool, "jkube");
        assert_eq!(spec.image, "quay.io/acme/ui");
        assert_eq!(spec.registry.as_deref(), Some("quay.io"));
    }
}
