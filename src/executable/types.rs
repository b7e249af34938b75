//! Classification outcomes and their serializable view

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ArchiveType {
    Jar,
    War,
    Ear,
}

/// Internal layout of an executable JAR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum JarStructure {
    JarInJar,
    FlatJar,
    RequiresPlugin,
}

impl JarStructure {
    pub fn as_str(&self) -> &'static str {
        match self {
            JarStructure::JarInJar => "jar-in-jar",
            JarStructure::FlatJar => "flat-jar",
            JarStructure::RequiresPlugin => "requires-plugin",
        }
    }
}

/// How, if at all, a module produces a runnable artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutableClassification {
    NotExecutable,
    ExecutableJar {
        method: String,
        structure: JarStructure,
        main_class: Option<String>,
        launcher_class: Option<String>,
        run_command: String,
        transformers: Vec<String>,
        descriptors: Vec<String>,
        obsolete: bool,
    },
    ExecutableWar {
        method: String,
        main_class: Option<String>,
        launcher_class: String,
        embedded_server: String,
        run_command: String,
    },
    /// Runs through a build-tool goal rather than standalone.
    PluginRunnable {
        method: String,
        embedded_server: String,
        run_command: String,
    },
    /// Needs a packaging plugin before it can run standalone.
    RequiresPlugin {
        kind: ArchiveType,
        method: String,
        run_command: String,
    },
    DeploymentOnly {
        kind: ArchiveType,
        method: String,
    },
    EnterpriseArchive {
        method: String,
        modules: Vec<String>,
        spec_version: Option<String>,
    },
}

/// A classification plus the framework facts gathered while classifying
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    pub classification: ExecutableClassification,
    pub warning: Option<String>,
    pub spring_boot_application: bool,
    pub profiles: Vec<String>,
}

impl ClassificationResult {
    pub fn new(classification: ExecutableClassification) -> Self {
        Self {
            classification,
            warning: None,
            spring_boot_application: false,
            profiles: Vec::new(),
        }
    }

    pub fn not_executable() -> Self {
        Self::new(ExecutableClassification::NotExecutable)
    }

    pub fn deployable_only(kind: ArchiveType, method: &str) -> Self {
        Self::new(ExecutableClassification::DeploymentOnly {
            kind,
            method: method.to_string(),
        })
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warning = Some(warning.into());
        self
    }

    pub fn with_spring_boot(mut self, spring_boot_application: bool) -> Self {
        self.spring_boot_application = spring_boot_application;
        self
    }

    pub fn with_profiles(mut self, profiles: Vec<String>) -> Self {
        self.profiles = profiles;
        self
    }

    pub fn is_executable(&self) -> bool {
        matches!(
            self.classification,
            ExecutableClassification::ExecutableJar { .. }
                | ExecutableClassification::ExecutableWar { .. }
        )
    }

    pub fn archive_type(&self) -> Option<ArchiveType> {
        match &self.classification {
            ExecutableClassification::NotExecutable => None,
            ExecutableClassification::ExecutableJar { .. } => Some(ArchiveType::Jar),
            ExecutableClassification::ExecutableWar { .. }
            | ExecutableClassification::PluginRunnable { .. } => Some(ArchiveType::War),
            ExecutableClassification::RequiresPlugin { kind, .. }
            | ExecutableClassification::DeploymentOnly { kind, .. } => Some(*kind),
            ExecutableClassification::EnterpriseArchive { .. } => Some(ArchiveType::Ear),
        }
    }

    /// Flatten into the record emitted in reports.
    pub fn to_info(&self) -> ExecutableInfo {
        let mut info = ExecutableInfo {
            archive_type: self.archive_type(),
            executable: self.is_executable(),
            warning: self.warning.clone(),
            spring_boot_application: self.spring_boot_application,
            spring_boot_profiles: self.profiles.clone(),
            ..Default::default()
        };

        match &self.classification {
            ExecutableClassification::NotExecutable => {}
            ExecutableClassification::ExecutableJar {
                method,
                structure,
                main_class,
                launcher_class,
                run_command,
                transformers,
                descriptors,
                obsolete,
            } => {
                info.method = Some(method.clone());
                info.structure = Some(structure.as_str().to_string());
                info.main_class = main_class.clone();
                info.launcher_class = launcher_class.clone();
                info.run_command = Some(run_command.clone());
                info.transformers = transformers.clone();
                info.descriptors = descriptors.clone();
                info.obsolete = *obsolete;
            }
            ExecutableClassification::ExecutableWar {
                method,
                main_class,
                launcher_class,
                embedded_server,
                run_command,
            } => {
                info.method = Some(method.clone());
                info.main_class = main_class.clone();
                info.launcher_class = Some(launcher_class.clone());
                info.embedded_server = Some(embedded_server.clone());
                info.servlet_initializer = true;
                info.run_command = Some(run_command.clone());
            }
            ExecutableClassification::PluginRunnable {
                method,
                embedded_server,
                run_command,
            } => {
                info.method = Some(method.clone());
                info.embedded_server = Some(embedded_server.clone());
                info.run_command = Some(run_command.clone());
            }
            ExecutableClassification::RequiresPlugin {
                method,
                run_command,
                ..
            } => {
                info.method = Some(method.clone());
                info.structure = Some(JarStructure::RequiresPlugin.as_str().to_string());
                info.run_command = Some(run_command.clone());
            }
            ExecutableClassification::DeploymentOnly { method, .. } => {
                info.method = Some(method.clone());
                info.deployment_only = true;
                info.requires_external_server = true;
            }
            ExecutableClassification::EnterpriseArchive {
                method,
                modules,
                spec_version,
            } => {
                info.method = Some(method.clone());
                info.deployment_only = true;
                info.requires_external_server = true;
                info.modules = modules.clone();
                info.java_ee_version = spec_version.clone();
            }
        }

        info
    }
}

/// Flat, serializable description of a module's executable artifact
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutableInfo {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub archive_type: Option<ArchiveType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    pub executable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launcher_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedded_server: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_command: Option<String>,
    pub requires_external_server: bool,
    pub deployment_only: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub modules: Vec<String>,
    #[serde(rename = "javaEEVersion", skip_serializing_if = "Option::is_none")]
    pub java_ee_version: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub transformers: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub descriptors: Vec<String>,
    pub servlet_initializer: bool,
    pub obsolete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub spring_boot_application: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub spring_boot_profiles: Vec<String>,
}
