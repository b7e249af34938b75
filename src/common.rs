//! Common functionality shared across commands

use std::path::PathBuf;

use clap::Args;

use crate::cli::TreeFormat;

/// Project location shared by every command
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Project root containing pom.xml (defaults to current directory)
    #[arg(value_name = "PATH", env = "DEPLOY_DESCRIPTOR_PROJECT")]
    pub path: Option<PathBuf>,
}

impl ProjectArgs {
    /// Get the project root, using the current directory if none provided
    pub fn project_root(&self) -> PathBuf {
        match &self.path {
            Some(path) => path.clone(),
            None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}

/// Dependency view arguments
#[derive(Args, Debug, Clone)]
pub struct DependencyArgs {
    /// Attach dependency views to every deployable module
    #[arg(long, env = "DEPLOY_DESCRIPTOR_DEPENDENCY_TREE")]
    pub dependency_tree: bool,

    /// Maximum tree depth; negative means unlimited
    #[arg(
        long,
        default_value_t = crate::constants::dependencies::UNLIMITED_DEPTH,
        allow_negative_numbers = true,
        env = "DEPLOY_DESCRIPTOR_DEPTH"
    )]
    pub depth: i32,

    /// Scopes kept in the views
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "compile,runtime",
        env = "DEPLOY_DESCRIPTOR_SCOPES"
    )]
    pub scopes: Vec<String>,

    /// Which views to attach
    #[arg(
        long,
        value_enum,
        default_value = "flat",
        env = "DEPLOY_DESCRIPTOR_TREE_FORMAT"
    )]
    pub tree_format: TreeFormat,

    /// Skip the transitive tree entirely
    #[arg(long, env = "DEPLOY_DESCRIPTOR_EXCLUDE_TRANSITIVE")]
    pub exclude_transitive: bool,

    /// Keep optional dependencies
    #[arg(long, env = "DEPLOY_DESCRIPTOR_INCLUDE_OPTIONAL")]
    pub include_optional: bool,

    /// JSON file with a resolved dependency tree, looked up in each module
    /// directory (declared dependencies are used when absent)
    #[arg(long, value_name = "FILE", env = "DEPLOY_DESCRIPTOR_RESOLVED_GRAPH")]
    pub resolved_graph: Option<String>,
}

/// Common output format arguments
#[derive(Args, Debug, Clone)]
pub struct FormatArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = crate::constants::output::DEFAULT_FORMAT, env = "DEPLOY_DESCRIPTOR_FORMAT")]
    pub format: crate::cli::OutputFormat,
}

/// Generic builder trait for configuration objects
pub trait ConfigBuilder: Sized {
    type Config;

    /// Build the configuration, returning an error if validation fails
    fn build(self) -> Result<Self::Config, crate::error::DescriptorError>;
}

/// Trait for configurations that can be created from CLI commands
/// This trait simplifies command-to-config conversions
pub trait FromCommand: Sized {
    /// The command variant that this config can be created from
    fn from_command(command: crate::cli::Commands)
    -> Result<Self, crate::error::DescriptorError>;
}

/// Macro to implement `TryFrom<Commands>` using [`FromCommand`] trait
#[macro_export]
macro_rules! impl_try_from_command {
    ($config:ty) => {
        impl std::convert::TryFrom<$crate::cli::Commands> for $config {
            type Error = $crate::error::DescriptorError;

            fn try_from(command: $crate::cli::Commands) -> Result<Self, Self::Error> {
                <$config as $crate::common::FromCommand>::from_command(command)
            }
        }
    };
}

/// Generates a builder whose fields are all required
///
/// Every field is listed with the name of its setter. Setters accept
/// anything convertible into the field type, so optional fields take either
/// a value or an `Option`. A field left unset fails
/// [`ConfigBuilder::build`] with a configuration error naming it.
#[macro_export]
macro_rules! impl_builder {
    ($builder:ident => $target:ident {
        $($field:ident: $ty:ty => $setter:ident),* $(,)?
    }) => {
        #[derive(Debug, Clone, Default)]
        pub struct $builder {
            $($field: Option<$ty>,)*
        }

        impl $builder {
            pub fn new() -> Self {
                Self::default()
            }

            $(
                pub fn $setter(mut self, value: impl Into<$ty>) -> Self {
                    self.$field = Some(value.into());
                    self
                }
            )*
        }

        impl $crate::common::ConfigBuilder for $builder {
            type Config = $target;

            fn build(self) -> Result<$target, $crate::error::DescriptorError> {
                Ok($target {
                    $(
                        $field: self.$field.ok_or_else(|| {
                            $crate::error::DescriptorError::ConfigurationError {
                                message: format!("Missing required field: {}", stringify!($field)),
                            }
                        })?,
                    )*
                })
            }
        }
    };
}
