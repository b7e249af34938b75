//! # Project Analysis Module
//!
//! Walks a Maven project and turns every deployable module into a
//! [`ModuleResult`]. Core detectors run first; framework extensions then
//! add what they know through [`ModuleEnrichment`].
//!
//! ## Key Components
//!
//! - **ProjectAnalyzer**: walks the module tree and analyses modules in
//!   parallel, keeping discovery order
//! - **AnalyzerOptions**: dependency filter, plugin inventory switch and the
//!   dependency resolver to use
//! - **ModuleResultBuilder**: assembles a module result, frozen by `build()`
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use deploy_descriptor::analyzer::{AnalyzerOptions, ProjectAnalyzer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let analyzer = ProjectAnalyzer::new(AnalyzerOptions::default());
//! let analysis = analyzer.analyze(Path::new("path/to/project"), None)?;
//!
//! for module in &analysis.deployable_modules {
//!     println!("{} -> {}", module.artifact_id, module.repository_path);
//! }
//! # Ok(())
//! # }
//! ```

mod analyzer_impl;
mod module_result;

pub use analyzer_impl::{AnalyzerOptions, ProjectAnalysis, ProjectAnalyzer};
pub use module_result::{
    ModuleEnrichment, ModuleResult, ModuleResultBuilder, ModuleResultBuilderError,
};
