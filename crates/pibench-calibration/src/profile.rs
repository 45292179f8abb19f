//! Calibration profile (serializable).

use serde::{Deserialize, Serialize};

use pibench_core::constants::{DEFAULT_SAMPLING_CHUNK_SIZE, DEFAULT_SERIES_CHUNK_SIZE};
use pibench_core::worker::available_cores;

/// Current profile format version.
pub const PROFILE_VERSION: u32 = 1;

/// Calibration profile containing the fastest chunk sizes found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalibrationProfile {
    /// Profile format version for compatibility checking.
    pub version: u32,
    /// Series terms per chunk.
    pub series_chunk_size: u64,
    /// Monte Carlo samples per chunk.
    pub sampling_chunk_size: u64,
    /// CPU model used for calibration.
    pub cpu_model: String,
    /// Number of CPU cores.
    pub num_cores: usize,
    /// CPU fingerprint for invalidation.
    pub cpu_fingerprint: String,
    /// Calibration timestamp (RFC 3339, UTC).
    pub timestamp: String,
}

impl Default for CalibrationProfile {
    fn default() -> Self {
        Self {
            version: PROFILE_VERSION,
            series_chunk_size: DEFAULT_SERIES_CHUNK_SIZE,
            sampling_chunk_size: DEFAULT_SAMPLING_CHUNK_SIZE,
            cpu_model: String::new(),
            num_cores: available_cores(),
            cpu_fingerprint: String::new(),
            timestamp: String::new(),
        }
    }
}

impl CalibrationProfile {
    /// Check if this profile is compatible with the current version.
    #[must_use]
    pub fn is_compatible(&self) -> bool {
        self.version == PROFILE_VERSION
    }

    /// Check if this profile matches the current CPU.
    #[must_use]
    pub fn matches_cpu(&self, current_fingerprint: &str) -> bool {
        if self.cpu_fingerprint.is_empty() || current_fingerprint.is_empty() {
            return true;
        }
        self.cpu_fingerprint == current_fingerprint
    }

    /// Both chunk sizes are positive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.series_chunk_size > 0 && self.sampling_chunk_size > 0
    }
}

/// CPU fingerprint based on the core count.
#[must_use]
pub fn cpu_fingerprint() -> String {
    format!("cores={}", available_cores())
}

/// Get the current CPU model string.
#[must_use]
pub fn cpu_model() -> String {
    use sysinfo::System;
    let sys = System::new_all();
    sys.cpus()
        .first()
        .map(|cpu| cpu.brand().trim().to_string())
        .unwrap_or_default()
}

/// Current UTC time in RFC 3339.
#[must_use]
pub fn current_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}
