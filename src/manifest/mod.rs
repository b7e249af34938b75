//! # Manifest Module
//!
//! Parses `pom.xml` files into an owned [`PomModel`] and resolves module
//! coordinates through one level of `<parent>` inheritance.
//!
//! Only the fields the analysis needs are extracted: coordinates, packaging,
//! sub-modules, properties, dependencies, build plugins (with their raw
//! configuration kept as a [`ConfigNode`] tree), distribution repositories and
//! profile ids. Property placeholders are kept verbatim.
//!
//! ## Example
//!
//! ```
//! use std::path::Path;
//!
//! use deploy_descriptor::manifest::PomModel;
//!
//! # fn main() -> miette::Result<()> {
//! let pom = PomModel::parse_str(
//!     r#"<project>
//!          <parent>
//!            <groupId>com.acme</groupId>
//!            <artifactId>acme-parent</artifactId>
//!            <version>2.1.0</version>
//!          </parent>
//!          <artifactId>orders</artifactId>
//!          <packaging>war</packaging>
//!        </project>"#,
//!     Path::new("orders/pom.xml"),
//! )?;
//!
//! let coordinate = pom.resolve_coordinate()?;
//! assert_eq!(coordinate.to_string(), "com.acme:orders:2.1.0");
//! assert!(pom.packaging().is_deployable());
//! # Ok(())
//! # }
//! ```

mod parser;
mod plugins;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::constants::coordinates::{
    SPRING_BOOT_ARTIFACT, SPRING_BOOT_GROUP, SPRING_BOOT_STARTER_PREFIX,
};
use crate::constants::maven::DEFAULT_PACKAGING;
use crate::core::{ConfigNode, Coordinate, Packaging};
use crate::error::DescriptorError;

/// Parsed contents of a single `pom.xml`
#[derive(Debug, Clone, Default)]
pub struct PomModel {
    pub path: PathBuf,
    pub group_id: Option<String>,
    pub artifact_id: String,
    pub version: Option<String>,
    pub packaging: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub parent: Option<ParentRef>,
    pub modules: Vec<String>,
    pub properties: BTreeMap<String, String>,
    pub dependencies: Vec<Dependency>,
    pub build: Build,
    pub distribution: DistributionManagement,
    pub profiles: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentRef {
    pub group_id: Option<String>,
    pub artifact_id: String,
    pub version: Option<String>,
    pub relative_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dependency {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
    pub scope: Option<String>,
    pub dep_type: Option<String>,
    pub classifier: Option<String>,
    pub optional: bool,
}

impl Dependency {
    /// Framework starter artifacts that make a module a Spring Boot application
    pub fn is_spring_boot_starter(&self) -> bool {
        self.group_id == SPRING_BOOT_GROUP
            && (self.artifact_id.starts_with(SPRING_BOOT_STARTER_PREFIX)
                || self.artifact_id == SPRING_BOOT_ARTIFACT)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Build {
    pub final_name: Option<String>,
    pub plugins: Vec<Plugin>,
    pub plugin_management: Vec<Plugin>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plugin {
    pub group_id: Option<String>,
    pub artifact_id: String,
    pub version: Option<String>,
    pub executions: Vec<PluginExecution>,
    pub configuration: Option<ConfigNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginExecution {
    pub id: Option<String>,
    pub phase: Option<String>,
    pub goals: Vec<String>,
    pub configuration: Option<ConfigNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistributionManagement {
    pub repository_url: Option<String>,
    pub snapshot_repository_url: Option<String>,
}

impl PomModel {
    /// Read and parse a `pom.xml` from disk.
    pub fn parse_file(path: &Path) -> Result<Self, DescriptorError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| DescriptorError::FileReadError {
                path: path.to_path_buf(),
                source,
            })?;
        Self::parse_str(&content, path)
    }

    /// Parse manifest content; `path` is used for diagnostics and relative lookups.
    pub fn parse_str(content: &str, path: &Path) -> Result<Self, DescriptorError> {
        parser::parse_pom(content, path)
    }

    /// Directory holding this manifest.
    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    pub fn packaging(&self) -> Packaging {
        Packaging::from_declared(self.packaging.as_deref())
    }

    /// Declared packaging string, `jar` when absent.
    pub fn declared_packaging(&self) -> &str {
        self.packaging
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_PACKAGING)
    }

    /// Own groupId, else the parent's. Exactly one hop.
    pub fn resolve_group_id(&self) -> Result<String, DescriptorError> {
        self.group_id
            .clone()
            .or_else(|| self.parent.as_ref().and_then(|p| p.group_id.clone()))
            .ok_or_else(|| self.unresolved("groupId"))
    }

    /// Own version, else the parent's. Exactly one hop.
    pub fn resolve_version(&self) -> Result<String, DescriptorError> {
        self.version
            .clone()
            .or_else(|| self.parent.as_ref().and_then(|p| p.version.clone()))
            .ok_or_else(|| self.unresolved("version"))
    }

    pub fn resolve_coordinate(&self) -> Result<Coordinate, DescriptorError> {
        Ok(Coordinate::new(
            self.resolve_group_id()?,
            self.artifact_id.clone(),
            self.resolve_version()?,
        ))
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    pub fn has_spring_boot_starters(&self) -> bool {
        self.dependencies
            .iter()
            .any(Dependency::is_spring_boot_starter)
    }

    pub fn has_dependency_artifact(&self, artifact_id: &str) -> bool {
        self.dependencies
            .iter()
            .any(|dep| dep.artifact_id == artifact_id)
    }

    fn unresolved(&self, field: &str) -> DescriptorError {
        DescriptorError::UnresolvedCoordinate {
            field: field.to_string(),
            module: self.artifact_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn model(group: Option<&str>, version: Option<&str>, parent: Option<ParentRef>) -> PomModel {
        PomModel {
            path: PathBuf::from("svc/pom.xml"),
            group_id: group.map(str::to_string),
            artifact_id: "svc".to_string(),
            version: version.map(str::to_string),
            parent,
            ..Default::default()
        }
    }

    fn parent_ref() -> ParentRef {
        ParentRef {
            group_id: Some("com.acme".to_string()),
            artifact_id: "acme-parent".to_string(),
            version: Some("3.0.0".to_string()),
            relative_path: None,
        }
    }

    #[test]
    fn test_own_coordinates_win() {
        let pom = model(Some("org.own"), Some("1.0"), Some(parent_ref()));
        assert_eq!(
            pom.resolve_coordinate().unwrap(),
            Coordinate::new("org.own", "svc", "1.0")
        );
    }

    #[test]
    fn test_inherits_from_parent_reference() {
        let pom = model(None, None, Some(parent_ref()));
        assert_eq!(
            pom.resolve_coordinate().unwrap(),
            Coordinate::new("com.acme", "svc", "3.0.0")
        );
    }

    #[test]
    fn test_missing_group_is_fatal() {
        let pom = model(None, Some("1.0"), None);
        let err = pom.resolve_group_id().unwrap_err();
        assert_eq!(err.to_string(), "Cannot resolve groupId for module: svc");
    }

    #[test]
    fn test_missing_version_is_fatal() {
        let mut parent = parent_ref();
        parent.version = None;
        let pom = model(None, None, Some(parent));
        let err = pom.resolve_version().unwrap_err();
        assert_eq!(err.to_string(), "Cannot resolve version for module: svc");
    }

    #[test]
    fn test_spring_boot_starter_detection() {
        let starter = Dependency {
            group_id: "org.springframework.boot".to_string(),
            artifact_id: "spring-boot-starter-web".to_string(),
            ..Default::default()
        };
        let core = Dependency {
            artifact_id: "spring-boot".to_string(),
            ..starter.clone()
        };
        let other = Dependency {
            group_id: "org.springframework".to_string(),
            ..starter.clone()
        };

        assert!(starter.is_spring_boot_starter());
        assert!(core.is_spring_boot_starter());
        assert!(!other.is_spring_boot_starter());
    }

    #[test]
    fn test_declared_packaging_default() {
        let pom = model(None, None, None);
        assert_eq!(pom.declared_packaging(), "jar");
        assert_eq!(pom.packaging(), Packaging::Jar);
    }
}
