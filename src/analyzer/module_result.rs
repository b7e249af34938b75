use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;

use crate::core::Coordinate;
use crate::detector::{AssemblyArtifact, ContainerImageSpec, PluginInventory};
use crate::executable::ExecutableInfo;
use crate::extensions::QuarkusMetadata;
use crate::graph::DependencyView;
use crate::profiles::EnvironmentConfig;

/// Everything known about one deployable module
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleResult {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub packaging: String,
    pub module_path: String,
    pub final_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
    pub repository_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executable: Option<ExecutableInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<ContainerImageSpec>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub build_plugins: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub assemblies: Vec<AssemblyArtifact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub java_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_class: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub local_dependencies: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub profiles: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub environments: Vec<EnvironmentConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<DependencyView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugins: Option<PluginInventory>,
    pub spring_boot_executable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quarkus: Option<QuarkusMetadata>,
}

impl ModuleResult {
    pub fn builder() -> ModuleResultBuilder {
        ModuleResultBuilder::default()
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(
            self.group_id.clone(),
            self.artifact_id.clone(),
            self.version.clone(),
        )
    }

    /// Whether the module's artifact runs standalone.
    pub fn is_executable(&self) -> bool {
        self.executable.as_ref().is_some_and(|info| info.executable)
    }
}

#[derive(Error, Debug, Diagnostic)]
pub enum ModuleResultBuilderError {
    #[error("Module coordinate is required")]
    #[diagnostic(
        code(deploy_descriptor::analyzer::missing_coordinate),
        help("Provide the resolved coordinate using with_coordinate()")
    )]
    MissingCoordinate,

    #[error("Module packaging is required")]
    #[diagnostic(
        code(deploy_descriptor::analyzer::missing_packaging),
        help("Provide the packaging using with_packaging()")
    )]
    MissingPackaging,

    #[error("Module repository path is required")]
    #[diagnostic(
        code(deploy_descriptor::analyzer::missing_repository_path),
        help("Provide the repository path using with_repository_path()")
    )]
    MissingRepositoryPath,
}

#[derive(Debug, Default)]
pub struct ModuleResultBuilder {
    coordinate: Option<Coordinate>,
    packaging: Option<String>,
    module_path: Option<String>,
    final_name: Option<String>,
    classifier: Option<String>,
    repository_path: Option<String>,
    repository_url: Option<String>,
    executable: Option<ExecutableInfo>,
    container: Option<ContainerImageSpec>,
    build_plugins: Vec<String>,
    assemblies: Vec<AssemblyArtifact>,
    java_version: Option<String>,
    main_class: Option<String>,
    local_dependencies: Vec<String>,
    profiles: Vec<String>,
    environments: Vec<EnvironmentConfig>,
    dependencies: Option<DependencyView>,
    plugins: Option<PluginInventory>,
    spring_boot_executable: bool,
    quarkus: Option<QuarkusMetadata>,
}

impl ModuleResultBuilder {
    pub fn with_coordinate(mut self, coordinate: Coordinate) -> Self {
        self.coordinate = Some(coordinate);
        self
    }

    pub fn with_packaging(mut self, packaging: impl Into<String>) -> Self {
        self.packaging = Some(packaging.into());
        self
    }

    pub fn with_module_path(mut self, module_path: impl Into<String>) -> Self {
        self.module_path = Some(module_path.into());
        self
    }

    pub fn with_final_name(mut self, final_name: impl Into<String>) -> Self {
        self.final_name = Some(final_name.into());
        self
    }

    pub fn with_classifier(mut self, classifier: Option<String>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_repository_path(mut self, repository_path: impl Into<String>) -> Self {
        self.repository_path = Some(repository_path.into());
        self
    }

    pub fn with_repository_url(mut self, repository_url: Option<String>) -> Self {
        self.repository_url = repository_url;
        self
    }

    pub fn with_executable(mut self, executable: Option<ExecutableInfo>) -> Self {
        self.executable = executable;
        self
    }

    pub fn with_container(mut self, container: Option<ContainerImageSpec>) -> Self {
        self.container = container;
        self
    }

    pub fn with_build_plugins(mut self, build_plugins: Vec<String>) -> Self {
        self.build_plugins = build_plugins;
        self
    }

    pub fn with_assemblies(mut self, assemblies: Vec<AssemblyArtifact>) -> Self {
        self.assemblies = assemblies;
        self
    }

    pub fn with_java_version(mut self, java_version: Option<String>) -> Self {
        self.java_version = java_version;
        self
    }

    pub fn with_main_class(mut self, main_class: Option<String>) -> Self {
        self.main_class = main_class;
        self
    }

    pub fn with_local_dependencies(mut self, local_dependencies: Vec<String>) -> Self {
        self.local_dependencies = local_dependencies;
        self
    }

    pub fn with_profiles(mut self, profiles: Vec<String>) -> Self {
        self.profiles = profiles;
        self
    }

    pub fn with_dependencies(mut self, dependencies: Option<DependencyView>) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn with_plugins(mut self, plugins: Option<PluginInventory>) -> Self {
        self.plugins = plugins;
        self
    }

    /// Add-only view handed to framework extensions.
    pub fn enrichment(&mut self) -> ModuleEnrichment<'_> {
        ModuleEnrichment { builder: self }
    }

    pub fn build(self) -> Result<ModuleResult, ModuleResultBuilderError> {
        let coordinate = self
            .coordinate
            .ok_or(ModuleResultBuilderError::MissingCoordinate)?;
        let final_name = self
            .final_name
            .unwrap_or_else(|| format!("{}-{}", coordinate.artifact_id, coordinate.version));

        Ok(ModuleResult {
            group_id: coordinate.group_id,
            artifact_id: coordinate.artifact_id,
            version: coordinate.version,
            packaging: self
                .packaging
                .ok_or(ModuleResultBuilderError::MissingPackaging)?,
            module_path: self.module_path.unwrap_or_else(|| ".".to_string()),
            final_name,
            classifier: self.classifier,
            repository_path: self
                .repository_path
                .ok_or(ModuleResultBuilderError::MissingRepositoryPath)?,
            repository_url: self.repository_url,
            executable: self.executable,
            container: self.container,
            build_plugins: self.build_plugins,
            assemblies: self.assemblies,
            java_version: self.java_version,
            main_class: self.main_class,
            local_dependencies: self.local_dependencies,
            profiles: self.profiles,
            environments: self.environments,
            dependencies: self.dependencies,
            plugins: self.plugins,
            spring_boot_executable: self.spring_boot_executable,
            quarkus: self.quarkus,
        })
    }
}

/// Add-only access to a module under construction
///
/// Absent values may be filled and lists may grow, but nothing the core
/// analysis already set can be replaced or removed.
pub struct ModuleEnrichment<'a> {
    builder: &'a mut ModuleResultBuilder,
}

impl ModuleEnrichment<'_> {
    pub fn mark_spring_boot_executable(&mut self) {
        self.builder.spring_boot_executable = true;
    }

    pub fn fill_main_class(&mut self, main_class: impl Into<String>) {
        self.builder.main_class.get_or_insert_with(|| main_class.into());
    }

    pub fn add_profiles<I>(&mut self, profiles: I)
    where
        I: IntoIterator<Item = String>,
    {
        for profile in profiles {
            if !self.builder.profiles.contains(&profile) {
                self.builder.profiles.push(profile);
            }
        }
    }

    /// Environments for profiles that have none yet.
    pub fn add_environments(&mut self, environments: Vec<EnvironmentConfig>) {
        for environment in environments {
            let known = self
                .builder
                .environments
                .iter()
                .any(|existing| existing.profile == environment.profile);
            if !known {
                self.builder.environments.push(environment);
            }
        }
    }

    pub fn add_build_plugin(&mut self, plugin: &str) {
        if !self.builder.build_plugins.iter().any(|p| p == plugin) {
            self.builder.build_plugins.push(plugin.to_string());
        }
    }

    pub fn fill_quarkus(&mut self, metadata: QuarkusMetadata) {
        self.builder.quarkus.get_or_insert(metadata);
    }

    pub fn build_plugins(&self) -> &[String] {
        &self.builder.build_plugins
    }

    pub fn main_class(&self) -> Option<&str> {
        self.builder.main_class.as_deref()
    }
}
