//! Analyze command configuration

use std::path::PathBuf;

use crate::analyzer::AnalyzerOptions;
use crate::cli::OutputFormat;
use crate::dependency_filter::DependencyFilter;
use crate::detector::InventoryOptions;
use crate::impl_builder;

#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    pub project_root: PathBuf,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub filter: DependencyFilter,
    pub resolved_graph: Option<String>,
    pub include_plugins: bool,
    pub mask_plugin_config: bool,
    pub build_info: bool,
}

impl AnalyzeConfig {
    pub fn builder() -> AnalyzeConfigBuilder {
        AnalyzeConfigBuilder::new()
    }

    pub fn analyzer_options(&self) -> AnalyzerOptions {
        let inventory = self.include_plugins.then(|| InventoryOptions {
            mask_sensitive: self.mask_plugin_config,
            ..InventoryOptions::default()
        });

        AnalyzerOptions::default()
            .with_filter(self.filter.clone())
            .with_inventory(inventory)
            .with_build_info(self.build_info)
            .with_resolver(super::resolver_for(self.resolved_graph.as_deref()))
    }
}

impl_builder! {
    AnalyzeConfigBuilder => AnalyzeConfig {
        project_root: PathBuf => with_project_root,
        format: OutputFormat => with_format,
        output: Option<PathBuf> => with_output,
        filter: DependencyFilter => with_filter,
        resolved_graph: Option<String> => with_resolved_graph,
        include_plugins: bool => with_include_plugins,
        mask_plugin_config: bool => with_mask_plugin_config,
        build_info: bool => with_build_info,
    }
}
