//! Analyze command implementation

use miette::{Result, WrapErr};

use crate::cli::Commands;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::AnalyzeConfig;
use crate::dependency_filter::DependencyFilter;
use crate::error::DescriptorError;

impl FromCommand for AnalyzeConfig {
    fn from_command(command: Commands) -> Result<Self, DescriptorError> {
        match command {
            Commands::Analyze {
                project,
                format,
                output,
                deps,
                include_plugins,
                no_mask_plugin_config,
                no_build_info,
            } => AnalyzeConfig::builder()
                .with_project_root(project.project_root())
                .with_format(format.format)
                .with_output(output)
                .with_filter(DependencyFilter::from(&deps))
                .with_resolved_graph(deps.resolved_graph)
                .with_include_plugins(include_plugins)
                .with_mask_plugin_config(!no_mask_plugin_config)
                .with_build_info(!no_build_info)
                .build(),
            _ => Err(DescriptorError::ConfigurationError {
                message: "Invalid command type for AnalyzeConfig".to_string(),
            }),
        }
    }
}

crate::impl_try_from_command!(AnalyzeConfig);

/// Execute the analyze command
pub fn execute_analyze_command(command: Commands) -> Result<()> {
    let config = AnalyzeConfig::from_command(command)
        .wrap_err("Failed to parse analyze command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::analyze::AnalyzeExecutor;
    AnalyzeExecutor::execute(config)
}
