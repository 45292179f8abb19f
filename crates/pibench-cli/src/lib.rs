//! # pibench-cli
//!
//! Terminal output, result files, timing history, progress display, and
//! shell completion.

pub mod completion;
pub mod history;
pub mod output;
pub mod presenter;
pub mod timing_log;
pub mod ui;

pub use presenter::{CLIProgressReporter, CLIResultPresenter};
