//! # Framework Extensions
//!
//! Framework-specific enrichment applied after the core analysis of a
//! module. Extensions are registered once, ordered by descending priority
//! (registration order breaks ties), and can only add information through a
//! [`ModuleEnrichment`] view.
//!
//! | Extension   | Priority | Applies when                                      |
//! |-------------|----------|---------------------------------------------------|
//! | Spring Boot | 100      | `spring-boot-maven-plugin` is declared            |
//! | Quarkus     | 90       | an `io.quarkus` dependency or the Quarkus plugin  |

mod quarkus;
mod spring_boot;

use std::cmp::Reverse;
use std::path::Path;

use tracing::debug;

pub use quarkus::{QuarkusExtension, QuarkusMetadata};
pub use spring_boot::SpringBootExtension;

use crate::analyzer::ModuleEnrichment;
use crate::manifest::PomModel;

pub trait FrameworkExtension: Send + Sync {
    fn name(&self) -> &'static str;

    /// Higher runs first.
    fn priority(&self) -> i32;

    fn is_applicable(&self, model: &PomModel, module_dir: &Path) -> bool;

    fn enrich(
        &self,
        enrichment: &mut ModuleEnrichment<'_>,
        model: &PomModel,
        module_dir: &Path,
        project_root: &Path,
    );
}

pub struct ExtensionRegistry {
    extensions: Vec<Box<dyn FrameworkExtension>>,
}

impl Default for ExtensionRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ExtensionRegistry {
    pub fn new(mut extensions: Vec<Box<dyn FrameworkExtension>>) -> Self {
        extensions.sort_by_key(|extension| Reverse(extension.priority()));
        Self { extensions }
    }

    /// Spring Boot and Quarkus.
    pub fn builtin() -> Self {
        Self::new(vec![
            Box::new(SpringBootExtension),
            Box::new(QuarkusExtension),
        ])
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.extensions.iter().map(|e| e.name()).collect()
    }

    /// Run every applicable extension in priority order.
    pub fn enrich(
        &self,
        enrichment: &mut ModuleEnrichment<'_>,
        model: &PomModel,
        module_dir: &Path,
        project_root: &Path,
    ) {
        for extension in &self.extensions {
            if extension.is_applicable(model, module_dir) {
                debug!(
                    extension = extension.name(),
                    module = %model.artifact_id,
                    "applying framework extension"
                );
                extension.enrich(enrichment, model, module_dir, project_root);
            }
        }
    }
}
