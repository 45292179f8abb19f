//! Shared fixtures for the workspace integration tests.

use serde::Deserialize;

/// Reference expansions of π.
#[derive(Debug, Deserialize)]
pub struct GoldenData {
    pub description: String,
    /// π truncated to the longest fixture length.
    pub pi: String,
    pub values: Vec<GoldenValue>,
}

/// π truncated to `digits` fractional digits.
#[derive(Debug, Deserialize)]
pub struct GoldenValue {
    pub digits: u32,
    pub expected: String,
}

/// Read `tests/testdata/pi_golden.json`.
pub fn load_golden_data() -> Result<GoldenData, Box<dyn std::error::Error>> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/testdata/pi_golden.json");
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}
