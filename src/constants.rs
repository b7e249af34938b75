//! Configuration constants for deploy-descriptor
//!
//! This module contains the constants used throughout the application:
//! terminal presentation, Maven conventions and well-known plugin
//! coordinates.

use std::time::Duration;

/// Progress bar configuration
pub mod progress {
    use super::*;

    /// Duration between progress bar updates
    pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

    /// Spinner frames shown while modules are discovered
    pub const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];
}

/// Output formatting configuration
pub mod output {
    /// Default output format when not specified
    pub const DEFAULT_FORMAT: &str = "human";
}

/// Logging configuration
pub mod logging {
    /// Environment variable consulted when no level flag is given
    pub const LEVEL_ENV: &str = "DEPLOY_DESCRIPTOR_LOG_LEVEL";

    pub const DEFAULT_LEVEL: &str = "info";
}

/// Maven layout conventions
pub mod maven {
    pub const MANIFEST_FILE: &str = "pom.xml";

    pub const DEFAULT_PACKAGING: &str = "jar";

    /// Group assumed for plugins declared without one
    pub const DEFAULT_PLUGIN_GROUP: &str = "org.apache.maven.plugins";

    pub const RESOURCES_DIR: &str = "src/main/resources";

    /// Parent directories searched for sibling modules of the same group
    pub const LOCAL_MODULE_DIRS: &[&str] = &["", "modules", "libs"];
}

/// Dependency tree defaults
pub mod dependencies {
    pub const DEFAULT_SCOPES: &[&str] = &["compile", "runtime"];

    pub const DEFAULT_SCOPE: &str = "compile";

    pub const DEFAULT_TYPE: &str = "jar";

    /// Depth value meaning "no limit"
    pub const UNLIMITED_DEPTH: i32 = -1;
}

/// Build plugin inventory settings
pub mod plugin_inventory {
    pub const MASKED_VALUE: &str = "***MASKED***";

    /// Configuration keys containing any of these fragments are masked
    pub const SENSITIVE_KEY_FRAGMENTS: &[&str] = &[
        "password",
        "pwd",
        "secret",
        "token",
        "apikey",
        "api-key",
        "api_key",
        "key",
        "credentials",
        "auth",
        "username",
    ];
}

/// Well-known plugin and dependency coordinates
pub mod coordinates {
    pub const SPRING_BOOT_GROUP: &str = "org.springframework.boot";
    pub const SPRING_BOOT_PLUGIN: &str = "spring-boot-maven-plugin";
    pub const SPRING_BOOT_STARTER_PREFIX: &str = "spring-boot-starter-";
    pub const SPRING_BOOT_ARTIFACT: &str = "spring-boot";
    pub const SPRING_BOOT_ACTUATOR: &str = "spring-boot-starter-actuator";

    pub const SHADE_PLUGIN: &str = "maven-shade-plugin";
    pub const ASSEMBLY_PLUGIN: &str = "maven-assembly-plugin";
    pub const JAR_PLUGIN: &str = "maven-jar-plugin";
    pub const DEPENDENCY_PLUGIN: &str = "maven-dependency-plugin";
    pub const WAR_PLUGIN: &str = "maven-war-plugin";
    pub const EAR_PLUGIN: &str = "maven-ear-plugin";
    pub const COMPILER_PLUGIN: &str = "maven-compiler-plugin";

    pub const ONEJAR_GROUP: &str = "com.jolira";
    pub const ONEJAR_PLUGIN: &str = "onejar-maven-plugin";

    pub const JETTY_GROUP: &str = "org.eclipse.jetty";
    pub const JETTY_PLUGIN: &str = "jetty-maven-plugin";
    pub const TOMCAT_GROUP: &str = "org.apache.tomcat.maven";
    pub const TOMCAT7_PLUGIN: &str = "tomcat7-maven-plugin";
    pub const TOMCAT8_PLUGIN: &str = "tomcat8-maven-plugin";

    pub const JIB_GROUP: &str = "com.google.cloud.tools";
    pub const JIB_PLUGIN: &str = "jib-maven-plugin";
    pub const QUARKUS_GROUP: &str = "io.quarkus";
    pub const QUARKUS_PLATFORM_GROUP: &str = "io.quarkus.platform";
    pub const QUARKUS_PLUGIN: &str = "quarkus-maven-plugin";
    pub const FABRIC8_GROUP: &str = "io.fabric8";
    pub const DOCKER_PLUGIN: &str = "docker-maven-plugin";
    pub const MICRONAUT_GROUP: &str = "io.micronaut.maven";
    pub const MICRONAUT_PLUGIN: &str = "micronaut-maven-plugin";
    pub const JKUBE_GROUP: &str = "org.eclipse.jkube";
    pub const JKUBE_KUBERNETES_PLUGIN: &str = "kubernetes-maven-plugin";
    pub const JKUBE_OPENSHIFT_PLUGIN: &str = "openshift-maven-plugin";
    pub const SPOTIFY_GROUP: &str = "com.spotify";
    pub const DOCKERFILE_PLUGIN: &str = "dockerfile-maven-plugin";
}
