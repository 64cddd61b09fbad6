//! Progress reporting for validation runs

use colored::Colorize;
use crossval_application::ValidationProgress;
use crossval_domain::{Role, ValidationReport};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports progress with an indicatif bar, one tick per roster position
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock()
            && let Some(bar) = guard.as_ref()
        {
            f(bar);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationProgress for ProgressReporter {
    fn on_run_start(&self, roster_size: usize) {
        let bar = ProgressBar::new(roster_size as u64);
        bar.set_style(Self::bar_style());
        bar.set_prefix("Validating");
        bar.enable_steady_tick(std::time::Duration::from_millis(120));
        if let Ok(mut guard) = self.bar.lock() {
            *guard = Some(bar);
        }
    }

    fn on_stage_start(&self, _position: usize, role: Role, model: &str) {
        self.with_bar(|bar| bar.set_message(format!("{} {}...", role.action(), model)));
    }

    fn on_stage_complete(&self, _position: usize, _role: Role, model: &str, success: bool) {
        self.with_bar(|bar| {
            let status = if success {
                format!("{} {}", "v".green(), model)
            } else {
                format!("{} {}", "x".red(), model)
            };
            bar.println(format!("  {status}"));
            bar.inc(1);
        });
    }

    fn on_run_complete(&self, report: &ValidationReport) {
        if let Ok(mut guard) = self.bar.lock()
            && let Some(bar) = guard.take()
        {
            bar.finish_and_clear();
            eprintln!(
                "{} {}/{} models answered",
                "Done:".green().bold(),
                report.results.len(),
                report.roster.len()
            );
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ValidationProgress for SimpleProgress {
    fn on_run_start(&self, roster_size: usize) {
        eprintln!("{} {} ({} models)", "->".cyan(), "Validating".bold(), roster_size);
    }

    fn on_stage_start(&self, position: usize, role: Role, model: &str) {
        eprintln!("  {}. {} {}...", position + 1, role.action(), model);
    }

    fn on_stage_complete(&self, _position: usize, _role: Role, model: &str, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), model);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), model);
        }
    }
}
