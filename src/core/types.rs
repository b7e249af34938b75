//! Core type definitions
//!
//! Maven coordinates and packaging kinds, with minimal logic.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Resolved `groupId:artifactId:version` of a module
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl Coordinate {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        }
    }

    /// Path of an artifact inside a Maven repository layout.
    pub fn repository_path(&self, classifier: Option<&str>, extension: &str) -> String {
        let classifier = classifier
            .filter(|c| !c.is_empty())
            .map(|c| format!("-{c}"))
            .unwrap_or_default();

        format!(
            "{}/{}/{}/{}-{}{}.{}",
            self.group_id.replace('.', "/"),
            self.artifact_id,
            self.version,
            self.artifact_id,
            self.version,
            classifier,
            extension
        )
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

/// Packaging kind declared by a module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Packaging {
    Jar,
    War,
    Ear,
    Ejb,
    Rar,
    Pom,
    MavenPlugin,
}

impl Packaging {
    /// Aggregators and build plugins never produce a deployable artifact.
    pub fn is_deployable(&self) -> bool {
        !matches!(self, Packaging::Pom | Packaging::MavenPlugin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Packaging::Jar => "jar",
            Packaging::War => "war",
            Packaging::Ear => "ear",
            Packaging::Ejb => "ejb",
            Packaging::Rar => "rar",
            Packaging::Pom => "pom",
            Packaging::MavenPlugin => "maven-plugin",
        }
    }

    /// Parse a declared packaging, treating absent and unknown values as `jar`.
    pub fn from_declared(value: Option<&str>) -> Self {
        value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .and_then(|v| v.parse().ok())
            .unwrap_or(Packaging::Jar)
    }
}

impl FromStr for Packaging {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jar" => Ok(Packaging::Jar),
            "war" => Ok(Packaging::War),
            "ear" => Ok(Packaging::Ear),
            "ejb" => Ok(Packaging::Ejb),
            "rar" => Ok(Packaging::Rar),
            "pom" => Ok(Packaging::Pom),
            "maven-plugin" => Ok(Packaging::MavenPlugin),
            other => Err(format!("unknown packaging '{other}'")),
        }
    }
}

impl fmt::Display for Packaging {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packaging_deployability() {
        assert!(Packaging::Jar.is_deployable());
        assert!(Packaging::War.is_deployable());
        assert!(Packaging::Ear.is_deployable());
        assert!(!Packaging::Pom.is_deployable());
        assert!(!Packaging::MavenPlugin.is_deployable());
    }

    #[test]
    fn test_packaging_defaults_to_jar() {
        assert_eq!(Packaging::from_declared(None), Packaging::Jar);
        assert_eq!(Packaging::from_declared(Some("  ")), Packaging::Jar);
        assert_eq!(Packaging::from_declared(Some("bundle")), Packaging::Jar);
        assert_eq!(Packaging::from_declared(Some("WAR")), Packaging::War);
        assert_eq!(Packaging::from_declared(Some("maven-plugin")), Packaging::MavenPlugin);
    }

    #[test]
    fn test_repository_path() {
        let coordinate = Coordinate::new("com.acme.shop", "orders", "1.2.0-SNAPSHOT");

        assert_eq!(
            coordinate.repository_path(None, "jar"),
            "com/acme/shop/orders/1.2.0-SNAPSHOT/orders-1.2.0-SNAPSHOT.jar"
        );
        assert_eq!(
            coordinate.repository_path(Some("exec"), "jar"),
            "com/acme/shop/orders/1.2.0-SNAPSHOT/orders-1.2.0-SNAPSHOT-exec.jar"
        );
        assert_eq!(coordinate.to_string(), "com.acme.shop:orders:1.2.0-SNAPSHOT");
    }
}
