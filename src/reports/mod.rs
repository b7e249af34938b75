//! Report generation modules for different output formats
//!
//! This module contains report generators for the supported output formats:
//! - human: styled console summary per deployable module
//! - json: the analysis serialized for programmatic use

pub mod human;
pub mod json;

use crate::analyzer::ProjectAnalysis;
use crate::error::DescriptorError;

/// Common trait for all report generators
pub trait ReportGenerator {
    /// Generate a report from a finished project analysis
    fn generate_report(&self, analysis: &ProjectAnalysis) -> Result<String, DescriptorError>;
}

pub use human::HumanReportGenerator;
pub use json::JsonReportGenerator;

/// What a report covers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportScope {
    /// Everything known about each module
    #[default]
    Full,
    /// Only the dependency views of each module
    Dependencies,
}
