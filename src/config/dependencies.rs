//! Dependencies command configuration

use std::path::PathBuf;

use crate::analyzer::AnalyzerOptions;
use crate::cli::OutputFormat;
use crate::dependency_filter::DependencyFilter;
use crate::impl_builder;

#[derive(Debug, Clone)]
pub struct DependenciesConfig {
    pub project_root: PathBuf,
    pub format: OutputFormat,
    /// Always has dependency views switched on.
    pub filter: DependencyFilter,
    pub resolved_graph: Option<String>,
}

impl DependenciesConfig {
    pub fn builder() -> DependenciesConfigBuilder {
        DependenciesConfigBuilder::new()
    }

    pub fn analyzer_options(&self) -> AnalyzerOptions {
        AnalyzerOptions::default()
            .with_filter(self.filter.clone().with_include_tree(true))
            .with_resolver(super::resolver_for(self.resolved_graph.as_deref()))
    }
}

impl_builder! {
    DependenciesConfigBuilder => DependenciesConfig {
        project_root: PathBuf => with_project_root,
        format: OutputFormat => with_format,
        filter: DependencyFilter => with_filter,
        resolved_graph: Option<String> => with_resolved_graph,
    }
}
