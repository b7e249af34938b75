//! Human-readable console report generation

use std::fmt::Write;

use console::style;

use super::{ReportGenerator, ReportScope};
use crate::analyzer::{ModuleResult, ProjectAnalysis};
use crate::detector::BuildInfo;
use crate::error::DescriptorError;
use crate::graph::{DependencyNode, DependencySummary};
use crate::utils::string::pluralize;

#[derive(Default)]
pub struct HumanReportGenerator {
    scope: ReportScope,
}

impl HumanReportGenerator {
    pub fn new(scope: ReportScope) -> Self {
        Self { scope }
    }

    fn write_module(&self, output: &mut String, module: &ModuleResult) -> std::fmt::Result {
        writeln!(
            output,
            "{} {} {}",
            style("📦").blue(),
            style(module.coordinate()).bold(),
            style(format!("({}, {})", module.packaging, module.module_path)).dim()
        )?;

        if self.scope == ReportScope::Full {
            write_deployment(output, module)?;
        }

        match &module.dependencies {
            Some(view) => {
                write_summary(output, &view.summary)?;
                if self.scope == ReportScope::Dependencies {
                    for node in view.tree.iter().flatten() {
                        write_node(output, node, 2)?;
                    }
                    if view.tree.is_none() {
                        for dep in view.flat.iter().flatten() {
                            writeln!(
                                output,
                                "    {} {}:{}:{} {}",
                                style("•").dim(),
                                dep.group_id,
                                dep.artifact_id,
                                dep.version.as_deref().unwrap_or("?"),
                                style(format!("[{}]", dep.scope)).dim()
                            )?;
                        }
                    }
                }
            }
            None if self.scope == ReportScope::Dependencies => {
                writeln!(output, "  {} no dependency view", style("ℹ").blue())?;
            }
            None => {}
        }

        writeln!(output)
    }
}

fn write_deployment(output: &mut String, module: &ModuleResult) -> std::fmt::Result {
    writeln!(output, "  {} {}", style("artifact").dim(), module.repository_path)?;

    match &module.executable {
        Some(info) if info.executable => {
            writeln!(
                output,
                "  {} executable via {}",
                style("▶").green(),
                info.method.as_deref().unwrap_or("unknown")
            )?;
            if let Some(command) = &info.run_command {
                writeln!(output, "    {} {}", style("$").dim(), command)?;
            }
        }
        Some(info) => {
            let kind = info
                .archive_type
                .map(|kind| format!("{kind:?}").to_uppercase())
                .unwrap_or_default();
            writeln!(
                output,
                "  {} {} not executable ({})",
                style("■").yellow(),
                kind,
                info.method.as_deref().unwrap_or("unknown")
            )?;
        }
        None => writeln!(output, "  {} library", style("■").dim())?,
    }

    if let Some(main_class) = &module.main_class {
        writeln!(output, "  {} {}", style("main").dim(), main_class)?;
    }
    if let Some(java) = &module.java_version {
        writeln!(output, "  {} {}", style("java").dim(), java)?;
    }
    if let Some(image) = &module.container {
        let tag = image
            .primary_tag
            .as_deref()
            .map(|tag| format!(":{tag}"))
            .unwrap_or_default();
        writeln!(
            output,
            "  {} {}{} {}",
            style("🐳").cyan(),
            image.image,
            tag,
            style(format!("({})", image.tool)).dim()
        )?;
    }
    if !module.build_plugins.is_empty() {
        writeln!(
            output,
            "  {} {}",
            style("plugins").dim(),
            module.build_plugins.join(", ")
        )?;
    }
    if !module.profiles.is_empty() {
        writeln!(
            output,
            "  {} {}",
            style("profiles").dim(),
            module.profiles.join(", ")
        )?;
    }
    for assembly in &module.assemblies {
        writeln!(
            output,
            "  {} {} ({})",
            style("assembly").dim(),
            assembly.assembly_id,
            assembly.format
        )?;
    }
    if let Some(warning) = module.executable.as_ref().and_then(|i| i.warning.as_ref()) {
        writeln!(output, "  {} {}", style("⚠").yellow(), warning)?;
    }
    Ok(())
}

fn write_build_info(output: &mut String, info: &BuildInfo) -> std::fmt::Result {
    let Some(sha) = &info.git_commit_short_sha else {
        return Ok(());
    };
    let mut refs: Vec<&str> = info
        .git_branch
        .iter()
        .chain(&info.git_tag)
        .map(String::as_str)
        .collect();
    if info.git_dirty == Some(true) {
        refs.push("dirty");
    }
    writeln!(
        output,
        "{} {} {}",
        style("git").dim(),
        sha,
        style(format!("({})", refs.join(", "))).dim()
    )
}

fn write_summary(output: &mut String, summary: &DependencySummary) -> std::fmt::Result {
    let scopes: Vec<String> = summary
        .scopes
        .iter()
        .map(|(scope, count)| format!("{scope}={count}"))
        .collect();
    writeln!(
        output,
        "  {} {} {} ({} direct, {} transitive, {} optional) {}",
        style("🔗").cyan(),
        style(summary.total).yellow().bold(),
        if summary.total == 1 { "dependency" } else { "dependencies" },
        summary.direct,
        summary.transitive,
        summary.optional,
        style(scopes.join(" ")).dim()
    )
}

fn write_node(output: &mut String, node: &DependencyNode, indent: usize) -> std::fmt::Result {
    writeln!(
        output,
        "{:indent$}{} {} {}",
        "",
        style("└─").dim(),
        node.key(),
        style(format!("[{}]", node.scope)).dim(),
        indent = indent * 2
    )?;
    for child in node.children() {
        write_node(output, child, indent + 1)?;
    }
    Ok(())
}

impl ReportGenerator for HumanReportGenerator {
    fn generate_report(&self, analysis: &ProjectAnalysis) -> Result<String, DescriptorError> {
        let mut output = String::new();

        let title = analysis.name.as_deref().unwrap_or(&analysis.artifact_id);
        writeln!(
            output,
            "\n{} {} {}",
            style("🏗").blue(),
            style(title).bold(),
            style(format!(
                "{}:{}:{}",
                analysis.group_id, analysis.artifact_id, analysis.version
            ))
            .dim()
        )?;
        writeln!(
            output,
            "{} of {} {} deployable\n",
            style(analysis.deployable_modules_count).yellow().bold(),
            analysis.total_modules,
            pluralize("module", analysis.total_modules)
        )?;
        let build_info = analysis
            .build_info
            .as_ref()
            .filter(|_| self.scope == ReportScope::Full);
        if let Some(info) = build_info {
            write_build_info(&mut output, info)?;
            writeln!(output)?;
        }

        if analysis.deployable_modules.is_empty() {
            writeln!(
                output,
                "{} Nothing to deploy: every module is an aggregator or a build plugin.",
                style("ℹ").blue()
            )?;
            return Ok(output);
        }

        for module in &analysis.deployable_modules {
            self.write_module(&mut output, module)?;
        }

        if self.scope == ReportScope::Full {
            writeln!(
                output,
                "{} {} executable {}",
                style("✓").green().bold(),
                analysis.executable_count(),
                pluralize("module", analysis.executable_count())
            )?;
        }

        Ok(output)
    }
}
