use std::path::Path;
use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::module_result::ModuleResult;
use crate::core::Coordinate;
use crate::dependency_filter::DependencyFilter;
use crate::detector::metadata::{
    artifact_classifier, detect_java_version, final_name, local_dependencies, repository_base_url,
    repository_url,
};
use crate::detector::{
    BuildInfo, InventoryOptions, collect_build_info, collect_plugins, detect_assemblies,
    detect_container, detect_plugins,
};
use crate::error::DescriptorError;
use crate::executable::ExecutableClassifier;
use crate::extensions::ExtensionRegistry;
use crate::graph::{
    DeclaredDependencyResolver, DependencyResolver, DependencyTreeBuilder, DependencyView,
    summarize_flat, summarize_tree,
};
use crate::manifest::PomModel;
use crate::module_walker::{ModuleWalker, WalkedModule};
use crate::progress::ProgressReporter;
use crate::utils::string::slash_path;

/// Result of analysing a whole project
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAnalysis {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Every module reached by the walk, deployable or not.
    pub total_modules: usize,
    pub deployable_modules_count: usize,
    pub deployable_modules: Vec<ModuleResult>,
    #[serde(
        rename = "mavenRepositoryUrl",
        skip_serializing_if = "Option::is_none"
    )]
    pub repository_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_info: Option<BuildInfo>,
}

impl ProjectAnalysis {
    pub fn module(&self, artifact_id: &str) -> Option<&ModuleResult> {
        self.deployable_modules
            .iter()
            .find(|module| module.artifact_id == artifact_id)
    }

    pub fn executable_count(&self) -> usize {
        self.deployable_modules
            .iter()
            .filter(|module| module.is_executable())
            .count()
    }
}

/// Knobs of a project analysis
#[derive(Clone)]
pub struct AnalyzerOptions {
    pub filter: DependencyFilter,
    /// Plugin inventory is collected only when set.
    pub inventory: Option<InventoryOptions>,
    /// Git and CI metadata is collected only when set.
    pub build_info: bool,
    pub resolver: Arc<dyn DependencyResolver>,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            filter: DependencyFilter::default(),
            inventory: None,
            build_info: false,
            resolver: Arc::new(DeclaredDependencyResolver),
        }
    }
}

impl AnalyzerOptions {
    pub fn with_filter(mut self, filter: DependencyFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_inventory(mut self, inventory: Option<InventoryOptions>) -> Self {
        self.inventory = inventory;
        self
    }

    pub fn with_build_info(mut self, build_info: bool) -> Self {
        self.build_info = build_info;
        self
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn DependencyResolver>) -> Self {
        self.resolver = resolver;
        self
    }
}

pub struct ProjectAnalyzer {
    options: AnalyzerOptions,
    registry: ExtensionRegistry,
}

impl Default for ProjectAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerOptions::default())
    }
}

/// Values shared by every module of one analysis run
struct ProjectContext<'a> {
    root: &'a Path,
    root_model: &'a PomModel,
    repository_base: Option<String>,
}

impl ProjectAnalyzer {
    pub fn new(options: AnalyzerOptions) -> Self {
        Self::with_registry(options, ExtensionRegistry::builtin())
    }

    pub fn with_registry(options: AnalyzerOptions, registry: ExtensionRegistry) -> Self {
        Self { options, registry }
    }

    /// Walk the project rooted at `project_root` and analyse every module.
    ///
    /// Any hard error (unreadable or malformed manifest, unresolvable
    /// coordinate) aborts the whole run.
    pub fn analyze(
        &self,
        project_root: &Path,
        mut progress: Option<&mut ProgressReporter>,
    ) -> Result<ProjectAnalysis, DescriptorError> {
        if let Some(p) = progress.as_mut() {
            p.start_discovery();
        }
        let modules = ModuleWalker::walk(project_root, progress.as_deref())?;
        if let Some(p) = progress.as_mut() {
            p.finish_discovery(modules.len());
        }

        let Some(root) = modules.first() else {
            return Err(DescriptorError::MissingManifest {
                path: project_root.to_path_buf(),
            });
        };
        let root_coordinate = root.model.resolve_coordinate()?;
        let context = ProjectContext {
            root: project_root,
            root_model: &root.model,
            repository_base: repository_base_url(&root.model),
        };

        let bar = progress.as_mut().map(|p| p.start_analysis(modules.len()));
        let results = modules
            .par_iter()
            .map(|module| {
                let result = self.analyze_module(module, &context);
                if let Some(bar) = &bar {
                    bar.inc(1);
                }
                result
            })
            .collect::<Result<Vec<_>, DescriptorError>>()?;

        let deployable_modules: Vec<ModuleResult> = results.into_iter().flatten().collect();
        if let Some(p) = progress.as_mut() {
            p.finish_analysis(deployable_modules.len());
        }

        info!(
            project = %root_coordinate,
            total = modules.len(),
            deployable = deployable_modules.len(),
            "project analysis complete"
        );

        Ok(ProjectAnalysis {
            group_id: root_coordinate.group_id,
            artifact_id: root_coordinate.artifact_id,
            version: root_coordinate.version,
            name: root.model.name.clone(),
            description: root.model.description.clone(),
            total_modules: modules.len(),
            deployable_modules_count: deployable_modules.len(),
            deployable_modules,
            repository_url: context.repository_base.clone(),
            build_info: self
                .options
                .build_info
                .then(|| collect_build_info(project_root))
                .flatten(),
        })
    }

    fn analyze_module(
        &self,
        module: &WalkedModule,
        context: &ProjectContext<'_>,
    ) -> Result<Option<ModuleResult>, DescriptorError> {
        let model = &module.model;
        let packaging = model.packaging();
        if !packaging.is_deployable() {
            debug!(
                module = %model.artifact_id,
                packaging = packaging.as_str(),
                "not deployable, skipping"
            );
            return Ok(None);
        }

        let coordinate = model.resolve_coordinate()?;
        let module_dir = module.module_dir.as_path();
        let parent = (!module.is_root()).then_some(context.root_model);
        let base = context.repository_base.as_deref();

        let classifier = artifact_classifier(model);
        let repository_path =
            coordinate.repository_path(classifier.as_deref(), model.declared_packaging());

        let mut assemblies = detect_assemblies(model, &coordinate, module_dir);
        for assembly in &mut assemblies {
            assembly.repository_url = repository_url(base, &assembly.repository_path);
        }

        let classification = ExecutableClassifier::classify(model, &coordinate, module_dir);
        let executable = Some(classification.to_info())
            .filter(|info| info.executable || info.archive_type.is_some());
        let main_class = executable.as_ref().and_then(|info| info.main_class.clone());

        let mut builder = ModuleResult::builder()
            .with_coordinate(coordinate.clone())
            .with_packaging(model.declared_packaging())
            .with_module_path(slash_path(&module.relative_path))
            .with_final_name(final_name(model, &coordinate))
            .with_repository_url(repository_url(base, &repository_path))
            .with_repository_path(repository_path)
            .with_classifier(classifier)
            .with_assemblies(assemblies)
            .with_java_version(detect_java_version(model, parent))
            .with_local_dependencies(local_dependencies(model, &coordinate.group_id))
            .with_build_plugins(detect_plugins(model))
            .with_executable(executable)
            .with_main_class(main_class)
            .with_container(detect_container(model, module_dir))
            .with_plugins(
                self.options
                    .inventory
                    .map(|options| collect_plugins(model, options)),
            )
            .with_dependencies(
                self.options
                    .filter
                    .enabled()
                    .then(|| self.dependency_view(model, &coordinate, module_dir)),
            );

        self.registry
            .enrich(&mut builder.enrichment(), model, module_dir, context.root);

        let result = builder
            .build()
            .map_err(|err| DescriptorError::ConfigurationError {
                message: err.to_string(),
            })?;
        Ok(Some(result))
    }

    /// Flat and/or tree views under the configured filter.
    ///
    /// A resolver failure only costs the tree: the flat view is attached in
    /// its place and the summary is computed from it.
    fn dependency_view(
        &self,
        model: &PomModel,
        coordinate: &Coordinate,
        module_dir: &Path,
    ) -> DependencyView {
        let filter = &self.options.filter;
        let builder = DependencyTreeBuilder::new(filter);

        let tree = if filter.wants_tree() {
            match self.options.resolver.resolve(coordinate, model, module_dir) {
                Ok(graph) => Some(builder.build_tree(&graph)),
                Err(err) => {
                    warn!(
                        module = %coordinate,
                        error = %err,
                        "dependency resolution failed, keeping the flat view"
                    );
                    None
                }
            }
        } else {
            None
        };

        let flat = (filter.wants_flat() || tree.is_none())
            .then(|| builder.flat_dependencies(model));

        let summary = match (&tree, &flat) {
            (Some(tree), _) => summarize_tree(tree),
            (None, Some(flat)) => summarize_flat(flat),
            (None, None) => Default::default(),
        };

        DependencyView {
            summary,
            flat,
            tree,
        }
    }
}
