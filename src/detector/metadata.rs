//! Deployment facts read straight from the manifest

use crate::constants::coordinates::{
    COMPILER_PLUGIN, SPRING_BOOT_ACTUATOR, SPRING_BOOT_GROUP, SPRING_BOOT_PLUGIN,
};
use crate::core::Coordinate;
use crate::manifest::PomModel;

const JAVA_VERSION_PROPERTIES: &[&str] = &[
    "maven.compiler.release",
    "maven.compiler.source",
    "maven.compiler.target",
];
const COMPILER_VERSION_KEYS: &[&str] = &["release", "source", "target"];

/// Target Java version.
///
/// Compiler properties are checked first (module, then parent), then the
/// `maven-compiler-plugin` configuration (module, then parent). The compiler
/// plugin is matched on its artifact id whatever group it declares.
pub fn detect_java_version(model: &PomModel, parent: Option<&PomModel>) -> Option<String> {
    let models = || std::iter::once(model).chain(parent);

    JAVA_VERSION_PROPERTIES
        .iter()
        .find_map(|key| models().find_map(|m| m.property(key)).map(str::to_string))
        .or_else(|| {
            models().find_map(|m| {
                let compiler = m
                    .build_plugins()
                    .iter()
                    .find(|plugin| plugin.artifact_id == COMPILER_PLUGIN)?;
                COMPILER_VERSION_KEYS
                    .iter()
                    .find_map(|key| compiler.config_text(key))
            })
        })
}

/// Artifact ids of dependencies sharing the module's group, sorted.
pub fn local_dependencies(model: &PomModel, group_id: &str) -> Vec<String> {
    let mut local: Vec<String> = model
        .dependencies
        .iter()
        .filter(|dep| dep.group_id == group_id)
        .map(|dep| dep.artifact_id.clone())
        .collect();
    local.sort();
    local
}

pub fn actuator_enabled(model: &PomModel) -> bool {
    model.has_dependency_artifact(SPRING_BOOT_ACTUATOR)
}

/// `build.finalName`, else `{artifactId}-{version}`.
pub fn final_name(model: &PomModel, coordinate: &Coordinate) -> String {
    model
        .build
        .final_name
        .clone()
        .unwrap_or_else(|| format!("{}-{}", coordinate.artifact_id, coordinate.version))
}

/// Classifier set on a build-level Spring Boot plugin.
pub fn artifact_classifier(model: &PomModel) -> Option<String> {
    model
        .find_build_plugin(SPRING_BOOT_GROUP, SPRING_BOOT_PLUGIN)?
        .config_text("classifier")
}

/// Release repository, else snapshot repository, of the root manifest.
pub fn repository_base_url(root: &PomModel) -> Option<String> {
    root.distribution
        .repository_url
        .clone()
        .or_else(|| root.distribution.snapshot_repository_url.clone())
}

pub fn repository_url(base: Option<&str>, repository_path: &str) -> Option<String> {
    base.map(|base| format!("{}/{}", base.trim_end_matches('/'), repository_path))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;

    fn pom(body: &str) -> PomModel {
        PomModel::parse_str(
            &format!(
                "<project><groupId>com.acme</groupId><artifactId>svc</artifactId><version>1.0</version>{body}</project>"
            ),
            Path::new("pom.xml"),
        )
        .unwrap()
    }

    #[test]
    fn test_java_version_property_order() {
        let module = pom("<properties><maven.compiler.source>11</maven.compiler.source></properties>");
        let parent = pom("<properties><maven.compiler.release>17</maven.compiler.release></properties>");

        // release is looked up on both models before source
        assert_eq!(detect_java_version(&module, Some(&parent)).as_deref(), Some("17"));
        assert_eq!(detect_java_version(&module, None).as_deref(), Some("11"));
    }

    #[test]
    fn test_java_version_from_compiler_plugin() {
        let module = pom("");
        let parent = pom(
            "<build><plugins><plugin><artifactId>maven-compiler-plugin</artifactId>\
             <configuration><source>1.8</source><target>1.8</target></configuration></plugin></plugins></build>",
        );

        assert_eq!(detect_java_version(&module, Some(&parent)).as_deref(), Some("1.8"));
        assert_eq!(detect_java_version(&module, None), None);
    }

    #[test]
    fn test_compiler_plugin_matched_by_artifact_id() {
        let module = pom(
            "<build><plugins><plugin><groupId>org.acme.mirror</groupId>\
             <artifactId>maven-compiler-plugin</artifactId>\
             <configuration><release>21</release></configuration></plugin></plugins></build>",
        );

        assert_eq!(detect_java_version(&module, None).as_deref(), Some("21"));
    }

    #[test]
    fn test_local_dependencies_are_sorted() {
        let model = pom(
            "<dependencies>\
               <dependency><groupId>com.acme</groupId><artifactId>zeta</artifactId></dependency>\
               <dependency><groupId>org.other</groupId><artifactId>lib</artifactId></dependency>\
               <dependency><groupId>com.acme</groupId><artifactId>alpha</artifactId></dependency>\
             </dependencies>",
        );

        assert_eq!(local_dependencies(&model, "com.acme"), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_final_name_and_classifier() {
        let plain = pom("");
        let custom = pom(
            "<build><finalName>app</finalName><plugins><plugin>\
               <groupId>org.springframework.boot</groupId><artifactId>spring-boot-maven-plugin</artifactId>\
               <configuration><classifier>exec</classifier></configuration>\
             </plugin></plugins></build>",
        );
        let managed_only = pom(
            "<build><pluginManagement><plugins><plugin>\
               <groupId>org.springframework.boot</groupId><artifactId>spring-boot-maven-plugin</artifactId>\
               <configuration><classifier>exec</classifier></configuration>\
             </plugin></plugins></pluginManagement></build>",
        );
        let coordinate = plain.resolve_coordinate().unwrap();

        assert_eq!(final_name(&plain, &coordinate), "svc-1.0");
        assert_eq!(final_name(&custom, &coordinate), "app");
        assert_eq!(artifact_classifier(&custom).as_deref(), Some("exec"));
        assert_eq!(artifact_classifier(&managed_only), None);
    }

    #[test]
    fn test_repository_url() {
        let root = pom(
            "<distributionManagement>\
               <repository><url>https://repo.acme.com/releases/</url></repository>\
               <snapshotRepository><url>https://repo.acme.com/snapshots</url></snapshotRepository>\
             </distributionManagement>",
        );
        let base = repository_base_url(&root);

        assert_eq!(
            repository_url(base.as_deref(), "com/acme/svc/1.0/svc-1.0.jar").as_deref(),
            Some("https://repo.acme.com/releases/com/acme/svc/1.0/svc-1.0.jar")
        );
        assert_eq!(repository_url(None, "x"), None);
    }

    #[test]
    fn test_actuator() {
        assert!(actuator_enabled(&pom(
            "<dependencies><dependency><groupId>org.springframework.boot</groupId>\
             <artifactId>spring-boot-starter-actuator</artifactId></dependency></dependencies>"
        )));
        assert!(!actuator_enabled(&pom("")));
    }
}
