//! Analyze command executor

use std::fs::File;
use std::io::{self, BufWriter, Write};

use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};

use crate::analyzer::ProjectAnalyzer;
use crate::cli::OutputFormat;
use crate::config::AnalyzeConfig;
use crate::executors::CommandExecutor;
use crate::progress::ProgressReporter;
use crate::reports::{HumanReportGenerator, JsonReportGenerator, ReportGenerator, ReportScope};

pub struct AnalyzeExecutor;

impl CommandExecutor for AnalyzeExecutor {
    type Config = AnalyzeConfig;

    fn execute(config: Self::Config) -> Result<()> {
        eprintln!(
            "{} Analyzing Maven project at {}...\n",
            style("🔍").cyan(),
            style(config.project_root.display()).bold()
        );

        let mut progress = ProgressReporter::for_terminal();

        let analyzer = ProjectAnalyzer::new(config.analyzer_options());
        let analysis = analyzer
            .analyze(&config.project_root, progress.as_mut())
            .wrap_err_with(|| {
                format!(
                    "Failed to analyze project at '{}'",
                    config.project_root.display()
                )
            })?;

        let report = match config.format {
            OutputFormat::Human => {
                HumanReportGenerator::new(ReportScope::Full).generate_report(&analysis)
            }
            OutputFormat::Json => {
                JsonReportGenerator::new(ReportScope::Full).generate_report(&analysis)
            }
        }
        .wrap_err("Failed to generate analysis report")?;

        let mut output_writer: Box<dyn Write> = if let Some(output_path) = config.output.as_ref()
        {
            Box::new(BufWriter::new(
                File::create(output_path)
                    .into_diagnostic()
                    .wrap_err_with(|| {
                        format!("Failed to create output file '{}'", output_path.display())
                    })?,
            ))
        } else {
            Box::new(io::stdout())
        };

        writeln!(output_writer, "{report}")
            .and_then(|_| output_writer.flush())
            .into_diagnostic()
            .wrap_err("Failed to write analysis report")?;

        if let Some(output_path) = config.output {
            eprintln!(
                "{} Descriptor written to {}",
                style("✓").green(),
                style(output_path.display()).bold()
            );
        }

        Ok(())
    }
}
