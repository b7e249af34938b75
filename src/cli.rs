use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::common::{DependencyArgs, FormatArgs, ProjectArgs};

#[derive(Parser)]
#[command(
    name = "deploy-descriptor",
    about = "📦 Describe how the modules of a Maven project are deployed",
    long_about = "deploy-descriptor walks a Maven multi-module project from its root pom.xml, \
                  keeps the deployable modules and reports how each one becomes a runnable \
                  artifact: executable packaging, container image, build plugins, runtime \
                  profiles and filtered dependency views.",
    version
)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error); falls back to DEPLOY_DESCRIPTOR_LOG_LEVEL
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze every deployable module of a project
    ///
    /// Produces one entry per deployable module with its coordinates,
    /// repository location, executable classification, container image,
    /// build plugins and framework metadata.
    #[command(
        long_about = "Analyze a Maven project starting at its root pom.xml. Every module listed \
                      under <modules> is visited depth-first; modules with pom or maven-plugin \
                      packaging are counted but not reported. Dependency views are attached \
                      with --dependency-tree."
    )]
    Analyze {
        #[command(flatten)]
        project: ProjectArgs,

        #[command(flatten)]
        format: FormatArgs,

        /// Output file (stdout if not specified)
        #[arg(short, long, env = "DEPLOY_DESCRIPTOR_OUTPUT")]
        output: Option<PathBuf>,

        #[command(flatten)]
        deps: DependencyArgs,

        /// Attach the build plugin inventory to every module
        #[arg(long, env = "DEPLOY_DESCRIPTOR_INCLUDE_PLUGINS")]
        include_plugins: bool,

        /// Show sensitive plugin configuration values unmasked
        #[arg(long, env = "DEPLOY_DESCRIPTOR_NO_MASK_PLUGIN_CONFIG")]
        no_mask_plugin_config: bool,

        /// Leave out git commit and CI metadata
        #[arg(long, env = "DEPLOY_DESCRIPTOR_NO_BUILD_INFO")]
        no_build_info: bool,
    },

    /// Show the dependency views of every deployable module
    #[command(
        long_about = "Print the filtered dependency views of every deployable module. Views are \
                      always attached for this command; --tree-format selects flat, tree or \
                      both."
    )]
    Dependencies {
        #[command(flatten)]
        project: ProjectArgs,

        #[command(flatten)]
        deps: DependencyArgs,

        #[command(flatten)]
        format: FormatArgs,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Dependency views attached to a module
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum TreeFormat {
    Flat,
    Tree,
    Both,
}
