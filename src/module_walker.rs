use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::constants::maven::MANIFEST_FILE;
use crate::error::DescriptorError;
use crate::manifest::PomModel;
use crate::progress::ProgressReporter;

/// Module found while walking the `<modules>` tree
#[derive(Debug, Clone)]
pub struct WalkedModule {
    pub model: PomModel,
    pub module_dir: PathBuf,
    /// Path relative to the project root; empty for the root itself.
    pub relative_path: PathBuf,
}

impl WalkedModule {
    pub fn is_root(&self) -> bool {
        self.relative_path.as_os_str().is_empty()
    }
}

/// Depth-first walk of a multi-module project
///
/// The root manifest comes first, then every `<modules>` entry in
/// declaration order with its own sub-modules right after it. Entries whose
/// directory holds no `pom.xml` are skipped and do not count as modules.
pub struct ModuleWalker<'a> {
    visited: HashSet<PathBuf>,
    modules: Vec<WalkedModule>,
    progress: Option<&'a ProgressReporter>,
}

impl<'a> ModuleWalker<'a> {
    pub fn walk(
        project_root: &Path,
        progress: Option<&'a ProgressReporter>,
    ) -> Result<Vec<WalkedModule>, DescriptorError> {
        if !project_root.is_dir() {
            return Err(DescriptorError::InvalidProjectPath {
                path: project_root.to_path_buf(),
            });
        }
        let manifest = project_root.join(MANIFEST_FILE);
        if !manifest.is_file() {
            return Err(DescriptorError::MissingManifest { path: manifest });
        }

        let mut walker = Self {
            visited: HashSet::new(),
            modules: Vec::new(),
            progress,
        };
        walker.visit(project_root, PathBuf::new())?;

        debug!(
            root = %project_root.display(),
            modules = walker.modules.len(),
            "module walk complete"
        );
        Ok(walker.modules)
    }

    fn visit(&mut self, module_dir: &Path, relative_path: PathBuf) -> Result<(), DescriptorError> {
        let key = module_dir
            .canonicalize()
            .unwrap_or_else(|_| module_dir.to_path_buf());
        if !self.visited.insert(key) {
            warn!(module = %module_dir.display(), "module listed twice, skipping");
            return Ok(());
        }

        let manifest = module_dir.join(MANIFEST_FILE);
        if let Some(progress) = self.progress {
            progress.reading_manifest(&manifest);
        }
        let model = PomModel::parse_file(&manifest)?;
        let children = model.modules.clone();

        self.modules.push(WalkedModule {
            model,
            module_dir: module_dir.to_path_buf(),
            relative_path: relative_path.clone(),
        });

        for name in &children {
            let child_dir = module_dir.join(name);
            if !child_dir.join(MANIFEST_FILE).is_file() {
                debug!(module = %name, parent = %module_dir.display(), "no pom.xml, skipping");
                continue;
            }
            self.visit(&child_dir, relative_path.join(name))?;
        }

        Ok(())
    }
}
