//! # Runtime Profiles
//!
//! Best-effort, read-only probing of `src/main/resources` for
//! `application-{profile}.{properties,yml,yaml}` files, plus the per-profile
//! environment settings derived from them. Missing directories or unreadable
//! files never fail the analysis.

pub mod environment;
pub mod properties;

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;
use walkdir::WalkDir;

pub use environment::{EnvironmentConfig, detect_environment_configs};

use crate::constants::maven::{LOCAL_MODULE_DIRS, MANIFEST_FILE, RESOURCES_DIR};
use crate::manifest::Dependency;

static PROFILE_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^application-([a-zA-Z0-9_-]+)\.(properties|yml|yaml)$")
        .expect("profile file pattern should be valid")
});

/// Profile name and extension encoded in a resource file name.
pub fn parse_profile_file(file_name: &str) -> Option<(&str, &str)> {
    let captures = PROFILE_FILE.captures(file_name)?;
    Some((captures.get(1)?.as_str(), captures.get(2)?.as_str()))
}

/// Profiles declared directly under a module's resources directory.
pub fn module_profiles(module_dir: &Path) -> Vec<String> {
    scan_resources(module_dir, |_| true).into_iter().collect()
}

/// Profiles backed by `.properties` files only.
pub fn properties_profiles(module_dir: &Path) -> Vec<String> {
    scan_resources(module_dir, |ext| ext == "properties")
        .into_iter()
        .collect()
}

/// Profiles of the module and of any dependency that lives in the project
/// tree as a local module.
pub fn detect_profiles(
    module_dir: &Path,
    dependencies: &[Dependency],
    project_root: &Path,
) -> Vec<String> {
    let mut profiles = scan_resources(module_dir, |_| true);

    for dependency in dependencies {
        if let Some(local) = local_module_dir(project_root, &dependency.artifact_id) {
            debug!(
                artifact = %dependency.artifact_id,
                "scanning local dependency module for profiles"
            );
            profiles.extend(scan_resources(&local, |_| true));
        }
    }

    let profiles: Vec<String> = profiles.into_iter().collect();
    debug!(module = %module_dir.display(), ?profiles, "detected profiles");
    profiles
}

/// First of `{root}/{artifact}`, `{root}/modules/{artifact}` or
/// `{root}/libs/{artifact}` that holds a manifest.
fn local_module_dir(project_root: &Path, artifact_id: &str) -> Option<std::path::PathBuf> {
    LOCAL_MODULE_DIRS
        .iter()
        .map(|prefix| project_root.join(prefix).join(artifact_id))
        .find(|candidate| candidate.is_dir() && candidate.join(MANIFEST_FILE).is_file())
}

fn scan_resources(module_dir: &Path, accept_extension: impl Fn(&str) -> bool) -> BTreeSet<String> {
    let resources = module_dir.join(RESOURCES_DIR);
    if !resources.is_dir() {
        return BTreeSet::new();
    }

    WalkDir::new(&resources)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let name = entry.file_name().to_str()?;
            let (profile, extension) = parse_profile_file(name)?;
            accept_extension(extension).then(|| profile.to_string())
        })
        .collect()
}
