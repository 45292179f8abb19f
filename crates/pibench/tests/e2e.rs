//! End-to-end CLI integration tests.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn pibench(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pibench").expect("binary not found");
    cmd.current_dir(dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .env_remove("PIBENCH_DIGITS")
        .env_remove("RUST_LOG");
    cmd
}

fn files_starting_with(dir: &TempDir, prefix: &str) -> Vec<String> {
    std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with(prefix))
        .collect()
}

#[test]
fn help_flag() {
    let dir = TempDir::new().unwrap();
    pibench(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("PiBench"));
}

#[test]
fn version_flag() {
    let dir = TempDir::new().unwrap();
    pibench(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pibench"));
}

#[test]
fn serial_series_quiet() {
    let dir = TempDir::new().unwrap();
    pibench(&dir)
        .args(["-n", "10", "--mode", "serial", "-q"])
        .assert()
        .success()
        .stdout("3.1415926535\n");
}

#[test]
fn parallel_series_matches_serial() {
    let dir = TempDir::new().unwrap();
    pibench(&dir)
        .args(["-n", "50", "--mode", "parallel", "--chunk-size", "7", "-q"])
        .assert()
        .success()
        .stdout("3.14159265358979323846264338327950288419716939937510\n");
}

#[test]
fn digits_from_environment() {
    let dir = TempDir::new().unwrap();
    pibench(&dir)
        .env("PIBENCH_DIGITS", "5")
        .args(["--mode", "serial", "-q"])
        .assert()
        .success()
        .stdout("3.14159\n");
}

#[test]
fn benchmark_writes_log_and_result_file() {
    let dir = TempDir::new().unwrap();
    pibench(&dir)
        .args(["-n", "30", "--no-warmup"])
        .assert()
        .success()
        .stdout(predicate::str::contains("faster by"));

    let log = std::fs::read_to_string(dir.path().join("bbpCompare.txt")).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("30,"));
    assert_eq!(lines[0].split(',').count(), 3);

    let results = files_starting_with(&dir, "BBP_30_result_");
    assert_eq!(results.len(), 1);
    let body = std::fs::read_to_string(dir.path().join(&results[0])).unwrap();
    assert!(body.contains("Digits: 30"));
    assert!(body.contains("3.141592653589793238462643383279"));
}

#[test]
fn repeated_benchmarks_append_to_log() {
    let dir = TempDir::new().unwrap();
    for digits in ["12", "8"] {
        pibench(&dir)
            .args(["-n", digits, "--no-warmup", "-q"])
            .assert()
            .success();
    }
    let log = std::fs::read_to_string(dir.path().join("bbpCompare.txt")).unwrap();
    let firsts: Vec<&str> = log.lines().map(|l| l.split(',').next().unwrap()).collect();
    assert_eq!(firsts, ["12", "8"]);
}

#[test]
fn no_log_writes_nothing() {
    let dir = TempDir::new().unwrap();
    pibench(&dir)
        .args(["-n", "10", "--no-log", "-q"])
        .assert()
        .success()
        .stdout("3.1415926535\n");
    assert!(!dir.path().join("bbpCompare.txt").exists());
    assert!(files_starting_with(&dir, "BBP_").is_empty());
}

#[test]
fn explicit_output_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("pi.txt");
    pibench(&dir)
        .args(["-n", "10", "--mode", "serial", "-q", "-o"])
        .arg(&out)
        .assert()
        .success();
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "3.1415926535\n");
}

#[test]
fn log_dir_flag() {
    let dir = TempDir::new().unwrap();
    let logs = TempDir::new().unwrap();
    pibench(&dir)
        .args(["-n", "10", "--no-warmup", "-q", "--log-dir"])
        .arg(logs.path())
        .assert()
        .success();
    assert!(logs.path().join("bbpCompare.txt").exists());
    assert!(!dir.path().join("bbpCompare.txt").exists());
}

#[test]
fn json_report_parses() {
    let dir = TempDir::new().unwrap();
    let output = pibench(&dir)
        .args(["-n", "15", "--no-warmup", "--no-log", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let report: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(report["algorithm"], "BBP");
    assert_eq!(report["digits"], 15);
    assert_eq!(report["serial"], "3.141592653589793");
    assert_eq!(report["parallel"], report["serial"]);
}

#[test]
fn monte_carlo_seeded_is_reproducible() {
    let dir = TempDir::new().unwrap();
    let run = || {
        let output = pibench(&dir)
            .args(["-n", "4", "--algo", "monte-carlo", "--mode", "parallel"])
            .args(["--seed", "1", "--chunk-size", "1000", "-q"])
            .output()
            .unwrap();
        assert!(output.status.success());
        String::from_utf8(output.stdout).unwrap()
    };
    let first = run();
    assert_eq!(first, run());
    assert!(first.starts_with("3."));
    assert_eq!(first.trim().len(), 6);
}

#[test]
fn all_algorithms_benchmark() {
    let dir = TempDir::new().unwrap();
    pibench(&dir)
        .args(["-n", "5", "--algo", "all", "--no-warmup", "-q"])
        .assert()
        .success();
    assert!(dir.path().join("bbpCompare.txt").exists());
    assert!(dir.path().join("montecarloCompare.txt").exists());
}

#[test]
fn zero_digits_is_config_error() {
    let dir = TempDir::new().unwrap();
    pibench(&dir)
        .args(["-n", "0", "--mode", "serial"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("digits"));
}

#[test]
fn too_many_digits_is_config_error() {
    let dir = TempDir::new().unwrap();
    pibench(&dir).args(["-n", "100001"]).assert().code(4);
}

#[test]
fn unknown_algorithm_is_config_error() {
    let dir = TempDir::new().unwrap();
    pibench(&dir).args(["--algo", "chudnovsky"]).assert().code(4);
}

#[test]
fn history_without_logs() {
    let dir = TempDir::new().unwrap();
    pibench(&dir)
        .args(["--history", "--algo", "all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bbpCompare: no data"))
        .stdout(predicate::str::contains("montecarloCompare: no data"));
}

#[test]
fn history_after_benchmark() {
    let dir = TempDir::new().unwrap();
    pibench(&dir)
        .args(["-n", "20", "--no-warmup", "-q"])
        .assert()
        .success();
    pibench(&dir)
        .arg("--history")
        .assert()
        .success()
        .stdout(predicate::str::contains("20"))
        .stdout(predicate::str::contains("no data").not());
}

#[test]
fn completion_bash() {
    let dir = TempDir::new().unwrap();
    pibench(&dir)
        .args(["--completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pibench"));
}

#[test]
fn quiet_and_verbose_conflict() {
    let dir = TempDir::new().unwrap();
    pibench(&dir).args(["-q", "-v"]).assert().failure();
}

#[test]
fn history_reads_existing_compare_log() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("bbpCompare.txt"),
        "1000,120.500,40.250\n600,30.000,15.000\n",
    )
    .unwrap();
    pibench(&dir)
        .arg("--history")
        .assert()
        .success()
        .stdout(predicate::str::contains("1000"))
        .stdout(predicate::str::contains("2.99x"))
        .stdout(predicate::str::contains("no data").not());
}

#[test]
fn oversized_guard_digits_is_config_error() {
    let dir = TempDir::new().unwrap();
    pibench(&dir)
        .args(["-n", "5", "--guard-digits", "4000000000", "--mode", "serial"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("guard digits"));
}

#[test]
fn oversized_samples_per_digit_is_config_error() {
    let dir = TempDir::new().unwrap();
    pibench(&dir)
        .args(["-n", "5", "--algo", "mc", "--samples-per-digit", "1000000000000000"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("samples per digit"));
}

#[test]
fn per_algorithm_chunk_sizes() {
    let dir = TempDir::new().unwrap();
    pibench(&dir)
        .args(["-n", "5", "--algo", "all", "--mode", "parallel", "-q"])
        .args(["--series-chunk-size", "2", "--sampling-chunk-size", "3000", "--seed", "4"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("3.14159\n3."));
}

#[test]
fn quick_calibration_saves_profile() {
    let dir = TempDir::new().unwrap();
    pibench(&dir)
        .arg("--calibrate-quick")
        .assert()
        .success()
        .stdout(predicate::str::contains("Calibration complete"));
    let saved = dir.path().join("pibench").join("pibench_calibration.json");
    let profile: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(saved).unwrap()).unwrap();
    assert!(profile["series_chunk_size"].as_u64().unwrap() > 0);
    assert!(profile["sampling_chunk_size"].as_u64().unwrap() > 0);
}
