//! Dependencies command implementation

use miette::{Result, WrapErr};

use crate::cli::Commands;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::DependenciesConfig;
use crate::dependency_filter::DependencyFilter;
use crate::error::DescriptorError;

impl FromCommand for DependenciesConfig {
    fn from_command(command: Commands) -> Result<Self, DescriptorError> {
        match command {
            Commands::Dependencies {
                project,
                deps,
                format,
            } => DependenciesConfig::builder()
                .with_project_root(project.project_root())
                .with_format(format.format)
                .with_filter(DependencyFilter::from(&deps))
                .with_resolved_graph(deps.resolved_graph)
                .build(),
            _ => Err(DescriptorError::ConfigurationError {
                message: "Invalid command type for DependenciesConfig".to_string(),
            }),
        }
    }
}

crate::impl_try_from_command!(DependenciesConfig);

/// Execute the dependencies command
pub fn execute_dependencies_command(command: Commands) -> Result<()> {
    let config = DependenciesConfig::from_command(command)
        .wrap_err("Failed to parse dependencies command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::dependencies::DependenciesExecutor;
    DependenciesExecutor::execute(config)
}
