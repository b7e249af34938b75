//! String manipulation utilities

use std::path::{Component, Path};

/// Pluralize a word based on count
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

/// Render a relative path with `/` separators, `.` when empty.
pub fn slash_path(path: &Path) -> String {
    let parts: Vec<String> = path
        .components()
        .filter_map(|component| match component {
            Component::CurDir => None,
            other => Some(other.as_os_str().to_string_lossy().into_owned()),
        })
        .collect();

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}
