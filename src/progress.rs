use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use console::{Term, style};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::constants::progress::{SPINNER_FRAMES, TICK_INTERVAL};
use crate::utils::string::pluralize;

const PROGRESS_BAR_TEMPLATE: &str =
    "{msg} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {per_sec}";
const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg}";

/// Interactive status lines on stderr
///
/// Only created when stderr is a terminal; every caller takes an
/// `Option<&ProgressReporter>` and stays silent without one.
pub struct ProgressReporter {
    term: Term,
    spinner_position: AtomicUsize,
    multi_progress: MultiProgress,
    current_bar: Option<ProgressBar>,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
            spinner_position: AtomicUsize::new(0),
            multi_progress: MultiProgress::new(),
            current_bar: None,
        }
    }

    /// Reporter for interactive sessions only.
    pub fn for_terminal() -> Option<Self> {
        Term::stderr().is_term().then(Self::new)
    }

    pub fn create_progress_bar(&mut self, len: u64, message: &str) -> ProgressBar {
        let pb = self.multi_progress.add(ProgressBar::new(len));
        pb.set_style(
            ProgressStyle::default_bar()
                .template(PROGRESS_BAR_TEMPLATE)
                .expect("Progress bar template should be valid")
                .progress_chars("█▉▊▋▌▍▎▏ "),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(TICK_INTERVAL);
        pb
    }

    pub fn create_spinner(&mut self, message: &str) -> ProgressBar {
        let pb = self.multi_progress.add(ProgressBar::new_spinner());
        pb.set_style(
            ProgressStyle::default_spinner()
                .template(SPINNER_TEMPLATE)
                .expect("Spinner template should be valid")
                .tick_strings(&["📦 ", "📦◐", "📦◓", "📦◑", "📦◒", "✓"]),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(TICK_INTERVAL);
        pb
    }

    fn next_frame(&self) -> &'static str {
        let pos = self.spinner_position.fetch_add(1, Ordering::Relaxed) % SPINNER_FRAMES.len();
        SPINNER_FRAMES[pos]
    }

    pub fn start_discovery(&mut self) {
        let _ = self.term.clear_line();
        eprintln!("{} Walking Maven modules...", style("🔍").cyan());
        let spinner = self.create_spinner("Reading root pom.xml...");
        self.current_bar = Some(spinner);
    }

    pub fn reading_manifest(&self, path: &Path) {
        if let Some(ref pb) = self.current_bar {
            pb.set_message(format!("Reading: {}...", path.display()));
        } else {
            let _ = self.term.clear_line();
            eprint!(
                "\r{} Reading: {}... ",
                style(self.next_frame()).cyan(),
                style(path.display()).dim()
            );
        }
    }

    pub fn finish_discovery(&mut self, count: usize) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_and_clear();
        }
        let _ = self.term.clear_line();
        eprintln!(
            "\r{} Discovery complete: found {} {}",
            style("✓").green(),
            style(count).yellow().bold(),
            pluralize("module", count)
        );
    }

    /// Bar advanced once per analysed module; safe to clone into workers.
    pub fn start_analysis(&mut self, total_modules: usize) -> ProgressBar {
        let pb = self.create_progress_bar(total_modules as u64, "Analyzing modules");
        self.current_bar = Some(pb.clone());
        pb
    }

    pub fn finish_analysis(&mut self, deployable: usize) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_and_clear();
        }
        if deployable == 0 {
            eprintln!("{} No deployable modules found", style("ℹ").blue());
        } else {
            eprintln!(
                "{} Found {} deployable {}",
                style("✓").green().bold(),
                style(deployable).yellow().bold(),
                pluralize("module", deployable)
            );
        }
    }
}
