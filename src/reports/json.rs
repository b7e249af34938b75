//! JSON format report generation

use serde_json::json;

use super::{ReportGenerator, ReportScope};
use crate::analyzer::ProjectAnalysis;
use crate::error::DescriptorError;

#[derive(Default)]
pub struct JsonReportGenerator {
    scope: ReportScope,
}

impl JsonReportGenerator {
    pub fn new(scope: ReportScope) -> Self {
        Self { scope }
    }
}

impl ReportGenerator for JsonReportGenerator {
    fn generate_report(&self, analysis: &ProjectAnalysis) -> Result<String, DescriptorError> {
        match self.scope {
            ReportScope::Full => {
                serde_json::to_string_pretty(analysis).map_err(DescriptorError::Json)
            }
            ReportScope::Dependencies => {
                let modules: Vec<_> = analysis
                    .deployable_modules
                    .iter()
                    .map(|module| {
                        json!({
                            "groupId": module.group_id,
                            "artifactId": module.artifact_id,
                            "version": module.version,
                            "modulePath": module.module_path,
                            "dependencies": module.dependencies,
                        })
                    })
                    .collect();

                let report = json!({
                    "groupId": analysis.group_id,
                    "artifactId": analysis.artifact_id,
                    "version": analysis.version,
                    "modules": modules,
                });
                serde_json::to_string_pretty(&report).map_err(DescriptorError::Json)
            }
        }
    }
}
