use std::path::{Path, PathBuf};

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
#[error("Invalid XML syntax in '{file}'")]
#[diagnostic(
    code(deploy_descriptor::xml_parse_error),
    help("Check the XML syntax near the highlighted position")
)]
pub struct XmlParseError {
    pub file: String,
    #[source_code]
    pub source_code: NamedSource<String>,
    #[label("syntax error here")]
    pub span: Option<SourceSpan>,
    #[source]
    pub source: roxmltree::Error,
}

impl XmlParseError {
    pub fn new(path: &Path, content: &str, source: roxmltree::Error) -> Self {
        let file = path.display().to_string();
        let pos = source.pos();
        let span = byte_offset(content, pos.row as usize, pos.col as usize)
            .map(|offset| SourceSpan::from((offset, 1)));

        Self {
            source_code: NamedSource::new(&file, content.to_string()),
            file,
            span,
            source,
        }
    }
}

/// Translate a 1-based row/column position into a byte offset.
fn byte_offset(content: &str, row: usize, col: usize) -> Option<usize> {
    if row == 0 {
        return None;
    }

    let mut offset = 0;
    for (index, line) in content.split_inclusive('\n').enumerate() {
        if index + 1 == row {
            let column = line
                .char_indices()
                .nth(col.saturating_sub(1))
                .map(|(i, _)| i)
                .unwrap_or(line.len());
            return Some((offset + column).min(content.len().saturating_sub(1)));
        }
        offset += line.len();
    }

    None
}

#[derive(Error, Debug, Diagnostic)]
pub enum DescriptorError {
    #[error("Failed to read file '{path}'")]
    #[diagnostic(
        code(deploy_descriptor::io_error),
        help("Check if the file exists and you have read permissions")
    )]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    XmlParseError(Box<XmlParseError>),

    #[error("Invalid project path: {path}")]
    #[diagnostic(
        code(deploy_descriptor::invalid_project_path),
        help("Point the command at the directory that contains the root pom.xml")
    )]
    InvalidProjectPath { path: PathBuf },

    #[error("No pom.xml found at: {path}")]
    #[diagnostic(
        code(deploy_descriptor::missing_manifest),
        help("The project root must contain a pom.xml")
    )]
    MissingManifest { path: PathBuf },

    #[error("Cannot resolve {field} for module: {module}")]
    #[diagnostic(
        code(deploy_descriptor::unresolved_coordinate),
        help("Declare the coordinate in the module or in its <parent> section")
    )]
    UnresolvedCoordinate { field: String, module: String },

    #[error("Dependency graph error for '{module}': {message}")]
    #[diagnostic(
        code(deploy_descriptor::dependency_graph_error),
        help("Check that the resolved dependency graph file is valid JSON")
    )]
    DependencyGraphError { module: String, message: String },

    #[error("JSON serialization error")]
    #[diagnostic(
        code(deploy_descriptor::json_error),
        help("This is likely an internal error - please report it")
    )]
    Json(#[from] serde_json::Error),

    #[error("String formatting error")]
    #[diagnostic(
        code(deploy_descriptor::fmt_error),
        help("This is likely an internal error - please report it")
    )]
    Fmt(#[from] std::fmt::Error),

    #[error("IO error")]
    #[diagnostic(
        code(deploy_descriptor::io_error),
        help("Check file permissions and disk space")
    )]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(deploy_descriptor::config_error),
        help("Check your command arguments and configuration")
    )]
    ConfigurationError { message: String },
}

impl From<XmlParseError> for DescriptorError {
    fn from(err: XmlParseError) -> Self {
        DescriptorError::XmlParseError(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn test_xml_parse_error_display() {
        let source_code = "<project>\n  <artifactId>app</artifact>\n</project>";
        let xml_err = roxmltree::Document::parse(source_code).unwrap_err();

        let error = XmlParseError::new(Path::new("pom.xml"), source_code, xml_err);

        assert_eq!(error.to_string(), "Invalid XML syntax in 'pom.xml'");
        assert!(error.span.is_some());
    }

    #[test]
    fn test_byte_offset() {
        let content = "ab\ncd\nef";
        assert_eq!(byte_offset(content, 1, 1), Some(0));
        assert_eq!(byte_offset(content, 2, 2), Some(4));
        assert_eq!(byte_offset(content, 3, 1), Some(6));
        assert_eq!(byte_offset(content, 0, 1), None);
        assert_eq!(byte_offset(content, 9, 1), None);
    }

    #[test]
    fn test_file_read_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error = DescriptorError::FileReadError {
            path: PathBuf::from("/tmp/missing.xml"),
            source: io_err,
        };

        assert_eq!(error.to_string(), "Failed to read file '/tmp/missing.xml'");
    }

    #[test]
    fn test_unresolved_coordinate() {
        let error = DescriptorError::UnresolvedCoordinate {
            field: "groupId".to_string(),
            module: "orders-service".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Cannot resolve groupId for module: orders-service"
        );
    }

    #[test]
    fn test_configuration_error() {
        let error = DescriptorError::ConfigurationError {
            message: "Invalid configuration value".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Configuration error: Invalid configuration value"
        );
    }

    #[test]
    fn test_error_codes() {
        use miette::Diagnostic;

        let error = DescriptorError::MissingManifest {
            path: PathBuf::from("/srv/project"),
        };
        assert!(error.code().is_some());
        assert!(error.help().is_some());
    }

    #[test]
    fn test_error_conversion_from_io() {
        let io_err = io::Error::other("some io error");
        let err: DescriptorError = io_err.into();

        match err {
            DescriptorError::Io(_) => {}
            _ => panic!("Expected Io variant"),
        }
    }

    #[test]
    fn test_error_conversion_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid json}").unwrap_err();
        let err: DescriptorError = json_err.into();

        match err {
            DescriptorError::Json(_) => {}
            _ => panic!("Expected Json variant"),
        }
    }
}
