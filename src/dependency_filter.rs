//! Dependency filtering functionality

use std::collections::BTreeSet;

use crate::cli::TreeFormat;
use crate::constants::dependencies::{DEFAULT_SCOPE, DEFAULT_SCOPES, UNLIMITED_DEPTH};

/// Scope, optionality and depth rules applied to dependency views
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyFilter {
    scopes: BTreeSet<String>,
    include_optional: bool,
    depth: i32,
    format: TreeFormat,
    exclude_transitive: bool,
    include_tree: bool,
}

impl Default for DependencyFilter {
    fn default() -> Self {
        Self::new(&[], false, UNLIMITED_DEPTH)
    }
}

impl DependencyFilter {
    /// Create a filter; an empty scope list means `compile,runtime`.
    pub fn new(scopes: &[String], include_optional: bool, depth: i32) -> Self {
        let mut normalized: BTreeSet<String> = scopes
            .iter()
            .map(|scope| scope.trim().to_lowercase())
            .filter(|scope| !scope.is_empty())
            .collect();
        if normalized.is_empty() {
            normalized = DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect();
        }

        Self {
            scopes: normalized,
            include_optional,
            depth,
            format: TreeFormat::Flat,
            exclude_transitive: false,
            include_tree: false,
        }
    }

    pub fn with_format(mut self, format: TreeFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_exclude_transitive(mut self, exclude_transitive: bool) -> Self {
        self.exclude_transitive = exclude_transitive;
        self
    }

    pub fn with_include_tree(mut self, include_tree: bool) -> Self {
        self.include_tree = include_tree;
        self
    }

    pub fn scopes(&self) -> &BTreeSet<String> {
        &self.scopes
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub fn include_optional(&self) -> bool {
        self.include_optional
    }

    /// Dependency views are only attached when requested.
    pub fn enabled(&self) -> bool {
        self.include_tree
    }

    pub fn wants_flat(&self) -> bool {
        matches!(self.format, TreeFormat::Flat | TreeFormat::Both)
    }

    /// The transitive tree is built for `tree`/`both` unless transitive
    /// resolution is switched off.
    pub fn wants_tree(&self) -> bool {
        matches!(self.format, TreeFormat::Tree | TreeFormat::Both) && !self.exclude_transitive
    }

    /// Lowercased scope, `compile` when missing or blank.
    pub fn normalize_scope(scope: Option<&str>) -> String {
        scope
            .map(str::trim)
            .filter(|scope| !scope.is_empty())
            .map(str::to_lowercase)
            .unwrap_or_else(|| DEFAULT_SCOPE.to_string())
    }

    /// Whether a dependency with this (normalized) scope and optional flag
    /// survives filtering.
    pub fn should_include(&self, scope: &str, optional: bool) -> bool {
        self.scopes.contains(scope) && (self.include_optional || !optional)
    }

    /// Children are materialized while `current_depth < depth`, or always
    /// for a negative depth.
    pub fn can_descend(&self, current_depth: i32) -> bool {
        self.depth < 0 || current_depth < self.depth
    }
}

impl From<&crate::common::DependencyArgs> for DependencyFilter {
    fn from(args: &crate::common::DependencyArgs) -> Self {
        Self::new(&args.scopes, args.include_optional, args.depth)
            .with_format(args.tree_format)
            .with_exclude_transitive(args.exclude_transitive)
            .with_include_tree(args.dependency_tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scopes() {
        let filter = DependencyFilter::new(&["  ".to_string()], false, -1);

        assert!(filter.should_include("compile", false));
        assert!(filter.should_include("runtime", false));
        assert!(!filter.should_include("test", false));
        assert!(!filter.should_include("compile", true));
    }

    #[test]
    fn test_scopes_are_lowercased() {
        let filter = DependencyFilter::new(&["Test".to_string(), "PROVIDED".to_string()], true, -1);

        assert!(filter.should_include("test", true));
        assert!(filter.should_include("provided", false));
        assert!(!filter.should_include("compile", false));
    }

    #[test]
    fn test_normalize_scope() {
        assert_eq!(DependencyFilter::normalize_scope(None), "compile");
        assert_eq!(DependencyFilter::normalize_scope(Some("")), "compile");
        assert_eq!(DependencyFilter::normalize_scope(Some("Runtime")), "runtime");
    }

    #[test]
    fn test_depth_gate() {
        let unlimited = DependencyFilter::new(&[], false, -1);
        let direct = DependencyFilter::new(&[], false, 1);
        let zero = DependencyFilter::new(&[], false, 0);
        let two = DependencyFilter::new(&[], false, 2);

        assert!(unlimited.can_descend(50));
        assert!(!direct.can_descend(1));
        assert!(!zero.can_descend(1));
        assert!(two.can_descend(1));
        assert!(!two.can_descend(2));
    }

    #[test]
    fn test_views() {
        let flat = DependencyFilter::default();
        let both = DependencyFilter::default().with_format(TreeFormat::Both);
        let excluded = DependencyFilter::default()
            .with_format(TreeFormat::Tree)
            .with_exclude_transitive(true);

        assert!(flat.wants_flat() && !flat.wants_tree());
        assert!(both.wants_flat() && both.wants_tree());
        assert!(!excluded.wants_tree() && !excluded.wants_flat());
        assert!(!flat.enabled());
    }
}
