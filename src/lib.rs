//! # Deploy Descriptor - Describe How Maven Modules Are Deployed
//!
//! Deploy Descriptor reads a Maven multi-module project starting at its root
//! `pom.xml` and reports, for every deployable module, the artifact it
//! produces, whether that artifact runs on its own (and how), the container
//! image it builds, its runtime profiles and a filtered view of its
//! dependencies.
//!
//! ## Main Components
//!
//! - **Manifest**: parses `pom.xml` files with one-hop parent inheritance
//! - **Executable**: ordered rule chains that decide if an archive runs
//!   standalone
//! - **Detector**: build plugins, container images, assemblies and module
//!   metadata
//! - **Graph**: dependency trees and flat lists shaped by a
//!   [`DependencyFilter`](dependency_filter::DependencyFilter)
//! - **Extensions**: framework enrichment (Spring Boot, Quarkus) applied
//!   after the core analysis
//! - **Reports**: human-readable and JSON descriptors
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//!
//! use deploy_descriptor::analyzer::{AnalyzerOptions, ProjectAnalyzer};
//! use deploy_descriptor::reports::{JsonReportGenerator, ReportGenerator};
//!
//! # fn main() -> miette::Result<()> {
//! let analyzer = ProjectAnalyzer::new(AnalyzerOptions::default());
//! let analysis = analyzer.analyze(Path::new("/path/to/project"), None)?;
//!
//! println!(
//!     "{} of {} modules are deployable",
//!     analysis.deployable_modules_count, analysis.total_modules
//! );
//!
//! for module in &analysis.deployable_modules {
//!     if module.is_executable() {
//!         println!("{} runs standalone", module.artifact_id);
//!     }
//! }
//!
//! let json = JsonReportGenerator::default().generate_report(&analysis)?;
//! std::fs::write("descriptor.json", json).map_err(|e| miette::miette!("{e}"))?;
//! # Ok(())
//! # }
//! ```

// Private modules
mod module_walker;
mod utils;

// Public modules
pub mod analyzer;
pub mod cli;
pub mod commands;
pub mod common;
pub mod config;
pub mod constants;
pub mod core;
pub mod dependency_filter;
pub mod detector;
pub mod error;
pub mod executable;
pub mod executors;
pub mod extensions;
pub mod graph;
pub mod logging;
pub mod manifest;
pub mod profiles;
pub mod progress;
pub mod reports;

// Main entry point for the library
pub fn run() -> miette::Result<()> {
    use clap::Parser;

    use crate::cli::Cli;
    use crate::commands::execute_command;
    use crate::logging::{LoggingConfig, init_logging};

    let cli = Cli::parse();
    init_logging(LoggingConfig::from_flags(
        cli.log_level.as_deref(),
        cli.verbose,
        cli.quiet,
    ));

    execute_command(cli.command)
}
