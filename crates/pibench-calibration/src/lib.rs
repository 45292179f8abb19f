//! # pibench-calibration
//!
//! Chunk-size calibration and persisted calibration profiles.

pub mod calibration;
pub mod io;
pub mod profile;
pub mod runner;

pub use calibration::{CalibrationEngine, CalibrationMode, CalibrationPlan};
pub use profile::CalibrationProfile;
