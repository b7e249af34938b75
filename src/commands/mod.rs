//! Command implementations for deploy-descriptor CLI
//!
//! This module contains the implementations for each CLI command:
//! - analyze: describe every deployable module of a project
//! - dependencies: show the filtered dependency views of every module

pub mod analyze;
pub mod dependencies;

use miette::Result;

use crate::cli::Commands;

/// Execute a command based on CLI input
pub fn execute_command(command: Commands) -> Result<()> {
    match &command {
        Commands::Analyze { .. } => analyze::execute_analyze_command(command),
        Commands::Dependencies { .. } => dependencies::execute_dependencies_command(command),
    }
}
