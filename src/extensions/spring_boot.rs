use std::path::Path;

use super::FrameworkExtension;
use crate::analyzer::ModuleEnrichment;
use crate::constants::coordinates::{SPRING_BOOT_GROUP, SPRING_BOOT_PLUGIN};
use crate::detector::metadata::actuator_enabled;
use crate::manifest::PomModel;
use crate::profiles::{detect_environment_configs, detect_profiles};

/// Spring Boot applications: main class, profiles and per-profile
/// environment settings
pub struct SpringBootExtension;

impl SpringBootExtension {
    fn main_class(model: &PomModel) -> Option<String> {
        model
            .build_plugins()
            .iter()
            .filter(|plugin| plugin.artifact_id == SPRING_BOOT_PLUGIN)
            .find_map(|plugin| plugin.config_text("mainClass"))
    }
}

impl FrameworkExtension for SpringBootExtension {
    fn name(&self) -> &'static str {
        "Spring Boot"
    }

    fn priority(&self) -> i32 {
        100
    }

    fn is_applicable(&self, model: &PomModel, _module_dir: &Path) -> bool {
        model.has_plugin(SPRING_BOOT_GROUP, SPRING_BOOT_PLUGIN)
    }

    fn enrich(
        &self,
        enrichment: &mut ModuleEnrichment<'_>,
        model: &PomModel,
        module_dir: &Path,
        project_root: &Path,
    ) {
        enrichment.mark_spring_boot_executable();

        if let Some(main_class) = Self::main_class(model) {
            enrichment.fill_main_class(main_class);
        }

        let profiles = detect_profiles(module_dir, &model.dependencies, project_root);
        if profiles.is_empty() {
            return;
        }

        let environments =
            detect_environment_configs(module_dir, &profiles, actuator_enabled(model));
        enrichment.add_profiles(profiles);
        enrichment.add_environments(environments);
    }
}
