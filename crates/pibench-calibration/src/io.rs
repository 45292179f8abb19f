//! Profile persistence (load/save).

use std::io;
use std::path::{Path, PathBuf};

use crate::profile::{self, CalibrationProfile};

const PROFILE_FILENAME: &str = "pibench_calibration.json";
const CONFIG_DIR_NAME: &str = "pibench";

/// Load the calibration profile from the standard location.
/// Tries the XDG config dir first, then the working directory.
#[must_use]
pub fn load_profile() -> Option<CalibrationProfile> {
    if let Some(path) = xdg_profile_path() {
        if let Some(p) = load_from_path(&path) {
            return Some(p);
        }
    }
    load_from_path(&cwd_profile_path())
}

/// Load a profile and check it against the current machine.
#[must_use]
pub fn load_validated_profile() -> Option<CalibrationProfile> {
    validate(load_profile()?, &profile::cpu_fingerprint())
}

/// Keep `p` only if it has the current version, positive chunk sizes, and
/// the same CPU fingerprint.
#[must_use]
pub fn validate(p: CalibrationProfile, current_fingerprint: &str) -> Option<CalibrationProfile> {
    if !p.is_compatible() {
        tracing::warn!(version = p.version, "calibration profile version mismatch, ignoring it");
        return None;
    }
    if !p.is_valid() {
        tracing::warn!("calibration profile has a zero chunk size, ignoring it");
        return None;
    }
    if !p.matches_cpu(current_fingerprint) {
        tracing::info!(
            saved = %p.cpu_fingerprint,
            current = current_fingerprint,
            "calibration profile was made on another CPU, ignoring it"
        );
        return None;
    }
    Some(p)
}

/// Save the profile to the XDG config directory, or to the working
/// directory when no config directory is known. Returns the path written.
pub fn save_profile(p: &CalibrationProfile) -> io::Result<PathBuf> {
    let path = if let Some(xdg_path) = xdg_profile_path() {
        if let Some(parent) = xdg_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        xdg_path
    } else {
        cwd_profile_path()
    };

    save_to_path(p, &path)?;
    Ok(path)
}

/// Save profile to a specific path.
pub fn save_to_path(p: &CalibrationProfile, path: &Path) -> io::Result<()> {
    let content = serde_json::to_string_pretty(p).map_err(io::Error::other)?;
    std::fs::write(path, content)
}

/// Read a profile from `path`; `None` if missing or unreadable.
#[must_use]
pub fn load_from_path(path: &Path) -> Option<CalibrationProfile> {
    let content = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(p) => Some(p),
        Err(e) => {
            tracing::warn!(path = %path.display(), "unreadable calibration profile: {e}");
            None
        }
    }
}

fn xdg_profile_path() -> Option<PathBuf> {
    let config_dir = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;

    Some(config_dir.join(CONFIG_DIR_NAME).join(PROFILE_FILENAME))
}

fn cwd_profile_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(format!(".{PROFILE_FILENAME}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn saved(p: &CalibrationProfile) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(PROFILE_FILENAME);
        save_to_path(p, &path).unwrap();
        (dir, path)
    }

    #[test]
    fn save_and_load_to_path() {
        let p = CalibrationProfile {
            series_chunk_size: 32,
            ..CalibrationProfile::default()
        };
        let (_dir, path) = saved(&p);
        assert_eq!(load_from_path(&path), Some(p));
    }

    #[test]
    fn load_missing_returns_none() {
        let dir = TempDir::new().unwrap();
        assert!(load_from_path(&dir.path().join("absent.json")).is_none());
    }

    #[test]
    fn load_invalid_json_returns_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(PROFILE_FILENAME);
        std::fs::write(&path, b"not json").unwrap();
        assert!(load_from_path(&path).is_none());
    }

    #[test]
    fn validate_rejects_other_version() {
        let p = CalibrationProfile {
            version: 999,
            ..CalibrationProfile::default()
        };
        assert!(validate(p, "cores=4").is_none());
    }

    #[test]
    fn validate_rejects_zero_chunk() {
        let p = CalibrationProfile {
            series_chunk_size: 0,
            ..CalibrationProfile::default()
        };
        assert!(validate(p, "cores=4").is_none());
    }

    #[test]
    fn validate_rejects_other_cpu() {
        let p = CalibrationProfile {
            cpu_fingerprint: "cores=64".into(),
            ..CalibrationProfile::default()
        };
        assert!(validate(p.clone(), "cores=4").is_none());
        assert_eq!(validate(p.clone(), "cores=64"), Some(p));
    }

    #[test]
    fn xdg_profile_path_contains_config_dir() {
        if let Some(path) = xdg_profile_path() {
            let path_str = path.to_string_lossy();
            assert!(path_str.contains(CONFIG_DIR_NAME));
            assert!(path_str.ends_with(PROFILE_FILENAME));
        }
    }

    #[test]
    fn cwd_profile_path_is_hidden_file() {
        let path = cwd_profile_path();
        let name = path.file_name().unwrap().to_string_lossy();
        assert_eq!(name, format!(".{PROFILE_FILENAME}"));
    }
}
