//! Dependencies command executor

use console::style;
use miette::{Result, WrapErr};

use crate::analyzer::ProjectAnalyzer;
use crate::cli::OutputFormat;
use crate::config::DependenciesConfig;
use crate::executors::CommandExecutor;
use crate::progress::ProgressReporter;
use crate::reports::{HumanReportGenerator, JsonReportGenerator, ReportGenerator, ReportScope};

pub struct DependenciesExecutor;

impl CommandExecutor for DependenciesExecutor {
    type Config = DependenciesConfig;

    fn execute(config: Self::Config) -> Result<()> {
        eprintln!(
            "{} Collecting dependency views for {}...\n",
            style("🔗").cyan(),
            style(config.project_root.display()).bold()
        );

        let mut progress = ProgressReporter::for_terminal();

        let analysis = ProjectAnalyzer::new(config.analyzer_options())
            .analyze(&config.project_root, progress.as_mut())
            .wrap_err("Failed to collect dependency views")?;

        let report = match config.format {
            OutputFormat::Human => {
                HumanReportGenerator::new(ReportScope::Dependencies).generate_report(&analysis)
            }
            OutputFormat::Json => {
                JsonReportGenerator::new(ReportScope::Dependencies).generate_report(&analysis)
            }
        }
        .wrap_err("Failed to generate dependency report")?;

        println!("{report}");
        Ok(())
    }
}
