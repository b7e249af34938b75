//! # Executable Classification
//!
//! Decides whether a module's artifact can run standalone, needs an external
//! server, or is not executable at all. Each packaging kind has an ordered
//! rule table in [`rules`]; the first matching rule wins and a per-packaging
//! fallback applies when none match.
//!
//! | Packaging | Fallback                                   |
//! |-----------|--------------------------------------------|
//! | `jar`     | not executable                             |
//! | `war`     | deployment only (`maven-war-plugin`)       |
//! | `ear`     | deployment only (`maven-ear-plugin`)       |
//! | other     | not executable                             |

pub mod rules;
pub mod types;

use std::path::Path;

use tracing::debug;

pub use rules::{ClassificationRule, RuleContext};
pub use types::{
    ArchiveType, ClassificationResult, ExecutableClassification, ExecutableInfo, JarStructure,
};

use crate::constants::coordinates::{EAR_PLUGIN, WAR_PLUGIN};
use crate::core::{Coordinate, Packaging};
use crate::manifest::PomModel;

pub struct ExecutableClassifier;

impl ExecutableClassifier {
    /// Classify a module whose coordinate is already resolved.
    pub fn classify(
        model: &PomModel,
        coordinate: &Coordinate,
        module_dir: &Path,
    ) -> ClassificationResult {
        let ctx = RuleContext::new(model, coordinate, module_dir);
        let packaging = model.packaging();

        let matched = Self::rules_for(packaging)
            .iter()
            .find(|rule| (rule.applies)(&ctx))
            .map(|rule| {
                debug!(module = %coordinate, rule = rule.name, "classification rule matched");
                (rule.classify)(&ctx)
            });

        matched.unwrap_or_else(|| match packaging {
            Packaging::War => ClassificationResult::deployable_only(ArchiveType::War, WAR_PLUGIN),
            Packaging::Ear => ClassificationResult::deployable_only(ArchiveType::Ear, EAR_PLUGIN),
            _ => ClassificationResult::not_executable(),
        })
    }

    /// Rule table evaluated for a packaging kind.
    pub fn rules_for(packaging: Packaging) -> &'static [ClassificationRule] {
        match packaging {
            Packaging::Jar => rules::JAR_RULES,
            Packaging::War => rules::WAR_RULES,
            Packaging::Ear => rules::EAR_RULES,
            _ => &[],
        }
    }
}
