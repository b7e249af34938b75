//! Integration tests for deploy-descriptor using the library interface

use std::fs;
use std::path::Path;

use deploy_descriptor::analyzer::{AnalyzerOptions, ProjectAnalyzer};
use deploy_descriptor::detector::InventoryOptions;
use deploy_descriptor::reports::{
    HumanReportGenerator, JsonReportGenerator, ReportGenerator, ReportScope,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn write_pom(dir: &Path, body: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(
        dir.join("pom.xml"),
        format!("<?xml version=\"1.0\"?>\n<project>\n{body}\n</project>\n"),
    )
    .unwrap();
}

const PARENT: &str = "<parent><groupId>com.acme</groupId><artifactId>platform</artifactId>\
                      <version>2.0</version></parent>";

/// Aggregator with a library, a Spring Boot service, a WAR without plugin,
/// a Maven plugin module and a distribution module.
fn create_platform(temp: &TempDir) -> &Path {
    let root = temp.path();

    write_pom(
        root,
        r#"<groupId>com.acme</groupId>
<artifactId>platform</artifactId>
<version>2.0</version>
<packaging>pom</packaging>
<name>Acme Platform</name>
<properties><maven.compiler.release>17</maven.compiler.release></properties>
<modules>
  <module>core</module>
  <module>app</module>
  <module>web</module>
  <module>tooling</module>
  <module>dist</module>
  <module>not-a-module</module>
</modules>
<distributionManagement>
  <repository><id>releases</id><url>https://repo.acme.io/releases/</url></repository>
</distributionManagement>"#,
    );

    write_pom(
        &root.join("core"),
        &format!("{PARENT}<artifactId>core</artifactId>"),
    );

    write_pom(
        &root.join("app"),
        &format!(
            r#"{PARENT}
<artifactId>app</artifactId>
<dependencies>
  <dependency><groupId>com.acme</groupId><artifactId>core</artifactId><version>2.0</version></dependency>
  <dependency><groupId>org.springframework.boot</groupId><artifactId>spring-boot-starter-web</artifactId><version>3.2.0</version></dependency>
  <dependency><groupId>org.projectlombok</groupId><artifactId>lombok</artifactId><version>1.18.30</version><optional>true</optional></dependency>
</dependencies>
<build>
  <plugins>
    <plugin>
      <groupId>org.springframework.boot</groupId>
      <artifactId>spring-boot-maven-plugin</artifactId>
      <configuration><mainClass>com.acme.app.Application</mainClass></configuration>
      <executions><execution><goals><goal>repackage</goal></goals></execution></executions>
    </plugin>
    <plugin>
      <groupId>com.google.cloud.tools</groupId>
      <artifactId>jib-maven-plugin</artifactId>
      <configuration>
        <from><image>eclipse-temurin:17-jre</image></from>
        <to>
          <image>registry.acme.io/platform/app</image>
          <tags><tag>2.0</tag><tag>latest</tag></tags>
        </to>
      </configuration>
    </plugin>
  </plugins>
</build>"#
        ),
    );

    write_pom(
        &root.join("web"),
        &format!(
            r#"{PARENT}
<artifactId>web</artifactId>
<packaging>war</packaging>
<dependencies>
  <dependency><groupId>org.springframework.boot</groupId><artifactId>spring-boot-starter-web</artifactId><version>3.2.0</version></dependency>
</dependencies>"#
        ),
    );

    write_pom(
        &root.join("tooling"),
        &format!("{PARENT}<artifactId>tooling</artifactId><packaging>maven-plugin</packaging>"),
    );

    write_pom(
        &root.join("dist"),
        &format!(
            r#"{PARENT}
<artifactId>dist</artifactId>
<build>
  <plugins>
    <plugin>
      <artifactId>maven-assembly-plugin</artifactId>
      <executions>
        <execution>
          <id>bundle</id>
          <configuration><descriptorRefs><descriptorRef>bin</descriptorRef></descriptorRefs></configuration>
        </execution>
        <execution>
          <id>plain</id>
          <configuration>
            <appendAssemblyId>false</appendAssemblyId>
            <descriptorRefs><descriptorRef>src</descriptorRef></descriptorRefs>
          </configuration>
        </execution>
      </executions>
    </plugin>
  </plugins>
</build>"#
        ),
    );

    fs::create_dir_all(root.join("not-a-module")).unwrap();
    root
}

#[test]
fn test_deployable_modules_in_discovery_order() {
    let temp = TempDir::new().unwrap();
    let root = create_platform(&temp);

    let analysis = ProjectAnalyzer::new(AnalyzerOptions::default())
        .analyze(root, None)
        .unwrap();

    assert_eq!(analysis.artifact_id, "platform");
    assert_eq!(analysis.name.as_deref(), Some("Acme Platform"));
    assert_eq!(analysis.total_modules, 6);
    assert_eq!(analysis.deployable_modules_count, 4);

    let names: Vec<&str> = analysis
        .deployable_modules
        .iter()
        .map(|m| m.artifact_id.as_str())
        .collect();
    assert_eq!(names, vec!["core", "app", "web", "dist"]);
    assert!(analysis.module("tooling").is_none());
    assert_eq!(
        analysis.repository_url.as_deref(),
        Some("https://repo.acme.io/releases/")
    );
}

#[test]
fn test_inherited_coordinates_and_repository_location() {
    let temp = TempDir::new().unwrap();
    let root = create_platform(&temp);

    let analysis = ProjectAnalyzer::new(AnalyzerOptions::default())
        .analyze(root, None)
        .unwrap();
    let core = analysis.module("core").unwrap();

    assert_eq!(core.group_id, "com.acme");
    assert_eq!(core.version, "2.0");
    assert_eq!(core.module_path, "core");
    assert_eq!(core.final_name, "core-2.0");
    assert_eq!(core.repository_path, "com/acme/core/2.0/core-2.0.jar");
    assert_eq!(
        core.repository_url.as_deref(),
        Some("https://repo.acme.io/releases/com/acme/core/2.0/core-2.0.jar")
    );
    assert_eq!(core.java_version.as_deref(), Some("17"));
    assert!(core.executable.is_none());
}

#[test]
fn test_spring_boot_service() {
    let temp = TempDir::new().unwrap();
    let root = create_platform(&temp);

    let analysis = ProjectAnalyzer::new(AnalyzerOptions::default())
        .analyze(root, None)
        .unwrap();
    let app = analysis.module("app").unwrap();

    assert!(app.is_executable());
    assert!(app.spring_boot_executable);
    assert_eq!(app.main_class.as_deref(), Some("com.acme.app.Application"));
    assert_eq!(app.local_dependencies, vec!["core"]);
    assert!(app.build_plugins.contains(&"spring-boot-maven-plugin".to_string()));

    let image = app.container.as_ref().unwrap();
    assert_eq!(image.tool, "jib");
    assert_eq!(image.image, "registry.acme.io/platform/app");
    assert_eq!(image.registry.as_deref(), Some("registry.acme.io"));
    assert_eq!(image.primary_tag.as_deref(), Some("2.0"));
    assert_eq!(image.additional_tags, vec!["latest"]);
    assert_eq!(image.base_image.as_deref(), Some("eclipse-temurin:17-jre"));
}

#[test]
fn test_war_with_starters_but_no_plugin() {
    let temp = TempDir::new().unwrap();
    let root = create_platform(&temp);

    let analysis = ProjectAnalyzer::new(AnalyzerOptions::default())
        .analyze(root, None)
        .unwrap();
    let web = analysis.module("web").unwrap();

    assert_eq!(web.packaging, "war");
    assert_eq!(web.repository_path, "com/acme/web/2.0/web-2.0.war");
    assert!(!web.is_executable());

    let info = web.executable.as_ref().unwrap();
    assert!(info.deployment_only);
    assert!(info.warning.is_some());
}

#[test]
fn test_assembly_classifiers() {
    let temp = TempDir::new().unwrap();
    let root = create_platform(&temp);

    let analysis = ProjectAnalyzer::new(AnalyzerOptions::default())
        .analyze(root, None)
        .unwrap();
    let dist = analysis.module("dist").unwrap();

    let paths: Vec<&str> = dist
        .assemblies
        .iter()
        .map(|a| a.repository_path.as_str())
        .collect();
    assert_eq!(
        paths,
        vec![
            "com/acme/dist/2.0/dist-2.0-bin.zip",
            "com/acme/dist/2.0/dist-2.0.zip"
        ]
    );
    assert_eq!(
        dist.assemblies[0].repository_url.as_deref(),
        Some("https://repo.acme.io/releases/com/acme/dist/2.0/dist-2.0-bin.zip")
    );
}

#[test]
fn test_repeated_analysis_is_identical() {
    let temp = TempDir::new().unwrap();
    let root = create_platform(&temp);
    let analyzer = ProjectAnalyzer::new(
        AnalyzerOptions::default().with_inventory(Some(InventoryOptions::default())),
    );

    let first = JsonReportGenerator::default()
        .generate_report(&analyzer.analyze(root, None).unwrap())
        .unwrap();
    let second = JsonReportGenerator::default()
        .generate_report(&analyzer.analyze(root, None).unwrap())
        .unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_build_info_from_enclosing_checkout() {
    let temp = TempDir::new().unwrap();
    let root = create_platform(&temp);

    let repo = git2::Repository::init(root).unwrap();
    let mut index = repo.index().unwrap();
    index.add_path(Path::new("pom.xml")).unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let signature = git2::Signature::now("Release Bot", "bot@acme.io").unwrap();
    let commit = repo
        .commit(Some("HEAD"), &signature, &signature, "Release 2.0", &tree, &[])
        .unwrap();

    let analysis = ProjectAnalyzer::new(AnalyzerOptions::default().with_build_info(true))
        .analyze(root, None)
        .unwrap();
    let info = analysis.build_info.as_ref().unwrap();
    assert_eq!(info.git_commit_sha, Some(commit.to_string()));
    assert_eq!(info.git_commit_author.as_deref(), Some("Release Bot"));
    // module manifests were never committed
    assert_eq!(info.git_dirty, Some(true));

    let json = JsonReportGenerator::default()
        .generate_report(&analysis)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["buildInfo"]["gitCommitMessage"], "Release 2.0");
    assert!(value["buildInfo"]["buildTimestamp"].is_string());

    let without = ProjectAnalyzer::new(AnalyzerOptions::default())
        .analyze(root, None)
        .unwrap();
    assert!(without.build_info.is_none());
}

#[test]
fn test_json_descriptor_shape() {
    let temp = TempDir::new().unwrap();
    let root = create_platform(&temp);

    let analysis = ProjectAnalyzer::new(AnalyzerOptions::default())
        .analyze(root, None)
        .unwrap();
    let json = JsonReportGenerator::default()
        .generate_report(&analysis)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["totalModules"], 6);
    assert_eq!(value["deployableModulesCount"], 4);
    assert_eq!(
        value["mavenRepositoryUrl"],
        "https://repo.acme.io/releases/"
    );
    let app = &value["deployableModules"][1];
    assert_eq!(app["artifactId"], "app");
    assert_eq!(app["springBootExecutable"], true);
    assert!(app.get("dependencies").is_none());
}

#[test]
fn test_dependency_report_lists_every_deployable_module() {
    console::set_colors_enabled(false);
    let temp = TempDir::new().unwrap();
    let root = create_platform(&temp);

    let analysis = ProjectAnalyzer::new(AnalyzerOptions::default())
        .analyze(root, None)
        .unwrap();
    let report = HumanReportGenerator::new(ReportScope::Dependencies)
        .generate_report(&analysis)
        .unwrap();

    assert!(report.contains("4 of 6 modules deployable"));
    assert!(report.contains("com.acme:app:2.0"));
    assert!(!report.contains("com.acme:tooling:2.0"));
}
