//! PiBench library: application logic for the π benchmark.

pub mod app;
pub mod config;
pub mod errors;
