//! roxmltree based `pom.xml` reader

use std::collections::BTreeMap;
use std::path::Path;

use roxmltree::{Document, Node};

use super::{
    Build, Dependency, DistributionManagement, ParentRef, Plugin, PluginExecution, PomModel,
};
use crate::core::ConfigNode;
use crate::error::{DescriptorError, XmlParseError};

pub(super) fn parse_pom(content: &str, path: &Path) -> Result<PomModel, DescriptorError> {
    let doc = Document::parse(content).map_err(|err| XmlParseError::new(path, content, err))?;
    let project = doc.root_element();

    let artifact_id =
        child_text(project, "artifactId").ok_or_else(|| DescriptorError::UnresolvedCoordinate {
            field: "artifactId".to_string(),
            module: path.display().to_string(),
        })?;

    Ok(PomModel {
        path: path.to_path_buf(),
        group_id: child_text(project, "groupId"),
        artifact_id,
        version: child_text(project, "version"),
        packaging: child_text(project, "packaging"),
        name: child_text(project, "name"),
        description: child_text(project, "description"),
        parent: child(project, "parent").and_then(parse_parent),
        modules: child_texts(project, "modules", "module"),
        properties: parse_properties(project),
        dependencies: child(project, "dependencies")
            .map(parse_dependencies)
            .unwrap_or_default(),
        build: child(project, "build").map(parse_build).unwrap_or_default(),
        distribution: child(project, "distributionManagement")
            .map(parse_distribution)
            .unwrap_or_default(),
        profiles: child(project, "profiles")
            .map(|profiles| {
                elements(profiles, "profile")
                    .filter_map(|profile| child_text(profile, "id"))
                    .collect()
            })
            .unwrap_or_default(),
    })
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && child.tag_name().name() == name)
}

fn elements<'a, 'input>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children()
        .filter(move |child| child.is_element() && child.tag_name().name() == name)
}

fn text_of(node: Node<'_, '_>) -> Option<String> {
    node.text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

fn child_text(node: Node<'_, '_>, name: &str) -> Option<String> {
    child(node, name).and_then(text_of)
}

fn child_texts(node: Node<'_, '_>, container: &str, item: &str) -> Vec<String> {
    child(node, container)
        .map(|list| elements(list, item).filter_map(text_of).collect())
        .unwrap_or_default()
}

fn parse_parent(node: Node<'_, '_>) -> Option<ParentRef> {
    Some(ParentRef {
        group_id: child_text(node, "groupId"),
        artifact_id: child_text(node, "artifactId")?,
        version: child_text(node, "version"),
        relative_path: child_text(node, "relativePath"),
    })
}

fn parse_properties(project: Node<'_, '_>) -> BTreeMap<String, String> {
    child(project, "properties")
        .map(|props| {
            props
                .children()
                .filter(|node| node.is_element())
                .map(|node| {
                    (
                        node.tag_name().name().to_string(),
                        node.text().map(str::trim).unwrap_or_default().to_string(),
                    )
                })
                .collect()
        })
        .unwrap_or_default()
}

fn parse_dependencies(node: Node<'_, '_>) -> Vec<Dependency> {
    elements(node, "dependency")
        .filter_map(|dep| {
            Some(Dependency {
                group_id: child_text(dep, "groupId")?,
                artifact_id: child_text(dep, "artifactId")?,
                version: child_text(dep, "version"),
                scope: child_text(dep, "scope"),
                dep_type: child_text(dep, "type"),
                classifier: child_text(dep, "classifier"),
                optional: child_text(dep, "optional").is_some_and(|v| v.eq_ignore_ascii_case("true")),
            })
        })
        .collect()
}

fn parse_build(node: Node<'_, '_>) -> Build {
    Build {
        final_name: child_text(node, "finalName"),
        plugins: child(node, "plugins")
            .map(parse_plugins)
            .unwrap_or_default(),
        plugin_management: child(node, "pluginManagement")
            .and_then(|mgmt| child(mgmt, "plugins"))
            .map(parse_plugins)
            .unwrap_or_default(),
    }
}

fn parse_plugins(node: Node<'_, '_>) -> Vec<Plugin> {
    elements(node, "plugin")
        .filter_map(|plugin| {
            Some(Plugin {
                group_id: child_text(plugin, "groupId"),
                artifact_id: child_text(plugin, "artifactId")?,
                version: child_text(plugin, "version"),
                executions: child(plugin, "executions")
                    .map(|execs| elements(execs, "execution").map(parse_execution).collect())
                    .unwrap_or_default(),
                configuration: child(plugin, "configuration").map(ConfigNode::from_element),
            })
        })
        .collect()
}

fn parse_execution(node: Node<'_, '_>) -> PluginExecution {
    PluginExecution {
        id: child_text(node, "id"),
        phase: child_text(node, "phase"),
        goals: child_texts(node, "goals", "goal"),
        configuration: child(node, "configuration").map(ConfigNode::from_element),
    }
}

fn parse_distribution(node: Node<'_, '_>) -> DistributionManagement {
    DistributionManagement {
        repository_url: child(node, "repository").and_then(|repo| child_text(repo, "url")),
        snapshot_repository_url: child(node, "snapshotRepository")
            .and_then(|repo| child_text(repo, "url")),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;

    const FULL_POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <modelVersion>4.0.0</modelVersion>
  <parent>
    <groupId>com.acme</groupId>
    <artifactId>acme-parent</artifactId>
    <version>1.0.0</version>
    <relativePath>../pom.xml</relativePath>
  </parent>
  <artifactId>billing</artifactId>
  <packaging>jar</packaging>
  <name>Billing</name>
  <modules>
    <module>billing-api</module>
    <module>billing-core</module>
  </modules>
  <properties>
    <maven.compiler.release>21</maven.compiler.release>
    <empty.prop/>
  </properties>
  <dependencies>
    <dependency>
      <groupId>org.springframework.boot</groupId>
      <artifactId>spring-boot-starter-web</artifactId>
    </dependency>
    <dependency>
      <groupId>com.h2database</groupId>
      <artifactId>h2</artifactId>
      <version>2.2.224</version>
      <scope>Runtime</scope>
      <optional>true</optional>
    </dependency>
  </dependencies>
  <build>
    <finalName>billing-app</finalName>
    <plugins>
      <plugin>
        <artifactId>maven-shade-plugin</artifactId>
        <executions>
          <execution>
            <id>uber</id>
            <phase>package</phase>
            <goals><goal>shade</goal></goals>
          </execution>
        </executions>
      </plugin>
    </plugins>
    <pluginManagement>
      <plugins>
        <plugin>
          <groupId>org.springframework.boot</groupId>
          <artifactId>spring-boot-maven-plugin</artifactId>
          <version>3.2.0</version>
          <configuration><mainClass>com.acme.Billing</mainClass></configuration>
        </plugin>
      </plugins>
    </pluginManagement>
  </build>
  <distributionManagement>
    <snapshotRepository><url>https://repo.acme.com/snapshots</url></snapshotRepository>
  </distributionManagement>
  <profiles>
    <profile><id>native</id></profile>
  </profiles>
</project>"#;

    #[test]
    fn test_parse_full_pom() {
        let pom = parse_pom(FULL_POM, Path::new("billing/pom.xml")).unwrap();

        assert_eq!(pom.path, PathBuf::from("billing/pom.xml"));
        assert_eq!(pom.group_id, None);
        assert_eq!(pom.artifact_id, "billing");
        assert_eq!(pom.name.as_deref(), Some("Billing"));
        assert_eq!(pom.modules, vec!["billing-api", "billing-core"]);
        assert_eq!(pom.parent.as_ref().unwrap().artifact_id, "acme-parent");
        assert_eq!(pom.property("maven.compiler.release"), Some("21"));
        assert_eq!(pom.property("empty.prop"), None);
        assert_eq!(pom.dependencies.len(), 2);
        assert_eq!(pom.dependencies[1].scope.as_deref(), Some("Runtime"));
        assert!(pom.dependencies[1].optional);
        assert_eq!(pom.build.final_name.as_deref(), Some("billing-app"));
        assert_eq!(pom.build.plugins[0].executions[0].goals, vec!["shade"]);
        assert_eq!(pom.build.plugins[0].group_id, None);
        assert_eq!(
            pom.build.plugin_management[0]
                .configuration
                .as_ref()
                .and_then(|c| c.text_at("mainClass")),
            Some("com.acme.Billing".to_string())
        );
        assert_eq!(pom.distribution.repository_url, None);
        assert_eq!(
            pom.distribution.snapshot_repository_url.as_deref(),
            Some("https://repo.acme.com/snapshots")
        );
        assert_eq!(pom.profiles, vec!["native"]);
    }

    #[test]
    fn test_project_coordinates_are_not_taken_from_nested_elements() {
        let pom = parse_pom(
            "<project><parent><groupId>p</groupId><artifactId>pp</artifactId></parent><artifactId>a</artifactId></project>",
            Path::new("pom.xml"),
        )
        .unwrap();

        assert_eq!(pom.group_id, None);
        assert_eq!(pom.version, None);
    }

    #[test]
    fn test_malformed_xml_is_reported() {
        let err = parse_pom("<project><artifactId>a</project>", Path::new("bad/pom.xml")).unwrap_err();

        assert!(matches!(err, DescriptorError::XmlParseError(_)));
        assert_eq!(err.to_string(), "Invalid XML syntax in 'bad/pom.xml'");
    }

    #[test]
    fn test_missing_artifact_id_is_reported() {
        let err = parse_pom("<project><groupId>g</groupId></project>", Path::new("x/pom.xml")).unwrap_err();

        assert_eq!(err.to_string(), "Cannot resolve artifactId for module: x/pom.xml");
    }
}
