//! CLI result presenter and progress spinner.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use pibench_core::registry::Algorithm;
use pibench_orchestration::interfaces::{
    BenchmarkReport, CalculationResult, Phase, ProgressReporter, ResultPresenter,
};

use crate::output::{format_duration, format_number, preview, report_json, result_json};
use crate::ui;

/// CLI result presenter.
pub struct CLIResultPresenter {
    verbose: bool,
    quiet: bool,
    json: bool,
}

impl CLIResultPresenter {
    #[must_use]
    pub fn new(verbose: bool, quiet: bool, json: bool) -> Self {
        Self {
            verbose,
            quiet,
            json,
        }
    }

    fn shown<'a>(&self, value: &'a str) -> &'a str {
        if self.verbose {
            value
        } else {
            preview(value)
        }
    }
}

impl ResultPresenter for CLIResultPresenter {
    fn present_result(&self, result: &CalculationResult, details: bool) {
        if self.json {
            println!("{}", result_json(result));
            return;
        }

        let value = match &result.outcome {
            Ok(value) => value,
            Err(e) => {
                self.present_error(&format!("{} ({}): {e}", result.algorithm, result.mode));
                return;
            }
        };

        if self.quiet {
            println!("{value}");
            return;
        }

        println!(
            "{}",
            ui::header(&format!(
                "{} {}, {} digits",
                result.algorithm,
                result.mode,
                format_number(u64::from(result.digits))
            ))
        );
        println!("Duration: {}", format_duration(result.duration));
        if details {
            println!("Length: {} characters", value.len());
        }
        println!("Result: {}", self.shown(value));
    }

    fn present_report(&self, report: &BenchmarkReport) {
        if self.json {
            println!("{}", report_json(report));
            return;
        }

        if self.quiet {
            println!("{}", report.parallel.value);
            return;
        }

        println!(
            "{}",
            ui::header(&format!(
                "{}, {} digits",
                report.algorithm,
                format_number(u64::from(report.digits))
            ))
        );
        println!(
            "Serial:   {:>10}  {}",
            format_duration(report.serial.duration),
            self.shown(&report.serial.value)
        );
        println!(
            "Parallel: {:>10}  {}",
            format_duration(report.parallel.duration),
            self.shown(&report.parallel.value)
        );
        if report.retried {
            ui::print_warning("parallel result differed from serial and was recomputed");
        }
        println!("{}", ui::verdict_line(&report.verdict));
    }

    fn present_error(&self, error: &str) {
        ui::print_error(error);
    }
}

/// Spinner showing the current benchmark phase or calibration step.
#[derive(Clone)]
pub struct CLIProgressReporter {
    bar: ProgressBar,
}

impl CLIProgressReporter {
    /// Spinner on stderr; hidden when `quiet`.
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        if quiet {
            return Self {
                bar: ProgressBar::hidden(),
            };
        }
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} [{elapsed}]") {
            bar.set_style(style);
        }
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    /// Show step `current` of `total`.
    pub fn step(&self, step: &str, current: usize, total: usize) {
        self.bar.set_message(format!("[{current}/{total}] {step}"));
    }

    /// Text currently shown next to the spinner.
    #[must_use]
    pub fn message(&self) -> String {
        self.bar.message()
    }
}

impl ProgressReporter for CLIProgressReporter {
    fn phase(&self, algorithm: Algorithm, phase: Phase) {
        self.bar.set_message(format!("{algorithm}: {phase}"));
    }

    fn complete(&self) {
        self.bar.finish_and_clear();
    }
}
