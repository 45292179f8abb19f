//! Error handling and exit codes.

use pibench_core::calculator::PiError;
use pibench_core::constants::exit_codes;

/// Exit code for a calculation error.
#[must_use]
pub fn handle_error(err: &PiError) -> i32 {
    match err {
        PiError::Calculation(_) => exit_codes::ERROR_GENERIC,
        PiError::Config(_) | PiError::InvalidInput(_) => exit_codes::ERROR_CONFIG,
        PiError::WorkerFailed { .. } => exit_codes::ERROR_WORKER,
        PiError::Mismatch => exit_codes::ERROR_MISMATCH,
    }
}

/// Exit code for any application error.
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<PiError>()
        .map_or(exit_codes::ERROR_GENERIC, handle_error)
}
