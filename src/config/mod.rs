//! # Configuration Module
//!
//! Configuration structures for the deploy-descriptor commands. Each command
//! has its own config module with a builder generated by `impl_builder!`.
//!
//! ## Command Configurations
//!
//! - **AnalyzeConfig**: Configuration for the `analyze` command
//! - **DependenciesConfig**: Configuration for the `dependencies` command
//!
//! ## Example
//!
//! ```
//! use deploy_descriptor::cli::OutputFormat;
//! use deploy_descriptor::common::ConfigBuilder;
//! use deploy_descriptor::config::DependenciesConfig;
//! use deploy_descriptor::dependency_filter::DependencyFilter;
//!
//! let config = DependenciesConfig::builder()
//!     .with_project_root(".")
//!     .with_format(OutputFormat::Json)
//!     .with_filter(DependencyFilter::default())
//!     .with_resolved_graph(None::<String>)
//!     .build()
//!     .unwrap();
//!
//! assert!(config.analyzer_options().filter.enabled());
//! ```

pub mod analyze;
pub mod dependencies;

use std::sync::Arc;

pub use analyze::AnalyzeConfig;
pub use dependencies::DependenciesConfig;

use crate::graph::{DeclaredDependencyResolver, DependencyResolver, JsonGraphResolver};

/// Resolver for an optional `--resolved-graph` file name.
pub(crate) fn resolver_for(resolved_graph: Option<&str>) -> Arc<dyn DependencyResolver> {
    match resolved_graph {
        Some(file_name) => Arc::new(JsonGraphResolver::new(file_name)),
        None => Arc::new(DeclaredDependencyResolver),
    }
}
