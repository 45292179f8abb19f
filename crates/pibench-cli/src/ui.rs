//! UI helpers for CLI display.

use console::{style, StyledObject};

use pibench_core::calculator::ExecutionMode;
use pibench_orchestration::interfaces::Verdict;

/// Check if color output is disabled via `NO_COLOR` env var.
#[must_use]
pub fn is_color_disabled() -> bool {
    std::env::var("NO_COLOR").is_ok()
}

fn paint<F>(text: String, f: F) -> String
where
    F: FnOnce(StyledObject<String>) -> StyledObject<String>,
{
    if is_color_disabled() {
        text
    } else {
        f(style(text)).to_string()
    }
}

/// Section header, e.g. `=== BBP, 1000 digits ===`.
#[must_use]
pub fn header(text: &str) -> String {
    paint(format!("=== {text} ==="), |s| s.bold().cyan())
}

/// Verdict line, green when the parallel variant won.
#[must_use]
pub fn verdict_line(verdict: &Verdict) -> String {
    let text = format!("Verdict: {verdict}");
    match verdict.faster {
        ExecutionMode::Parallel => paint(text, |s| s.green().bold()),
        ExecutionMode::Serial => paint(text, |s| s.yellow().bold()),
    }
}

/// Print a warning message.
pub fn print_warning(text: &str) {
    eprintln!("{} {text}", paint("[WARN]".into(), |s| s.yellow().bold()));
}

/// Print an error message.
pub fn print_error(text: &str) {
    eprintln!("{} {text}", paint("[ERROR]".into(), |s| s.red().bold()));
}
