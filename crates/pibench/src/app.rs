//! Application entry point and dispatch.

use anyhow::{Context, Result};

use pibench_calibration::{io as profile_io, CalibrationEngine, CalibrationMode};
use pibench_cli::history::render_history;
use pibench_cli::output::{
    default_result_path, render_result_file, write_result_file, write_to_file,
};
use pibench_cli::presenter::{CLIProgressReporter, CLIResultPresenter};
use pibench_cli::timing_log::{append_record, log_path, read_records, TimingRecord};
use pibench_core::calculator::{ExecutionMode, PiError};
use pibench_core::guard::ConsistencyGuard;
use pibench_core::registry::DefaultFactory;
use pibench_orchestration::benchmark::BenchmarkConfig;
use pibench_orchestration::calculator_selection::{
    get_calculators_to_run, get_pairs_to_run, AlgorithmChoice,
};
use pibench_orchestration::interfaces::{BenchmarkReport, ProgressReporter, ResultPresenter};
use pibench_orchestration::orchestrator::execute_calculations;
use pibench_orchestration::runner::spawn_benchmark;

use crate::config::{AppConfig, RunMode};

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        pibench_cli::completion::generate_completion(&mut cmd, shell, &mut std::io::stdout());
        return Ok(());
    }

    if let Some(mode) = config.calibration_mode() {
        return run_calibration(config, mode);
    }

    let choice: AlgorithmChoice = config.algo.parse()?;

    if config.history {
        return show_history(config, choice);
    }

    config.validate_tuning()?;
    let digits = config.resolve_digits(&mut rand::thread_rng())?;

    let profile = if config.needs_profile() {
        profile_io::load_validated_profile()
    } else {
        None
    };
    let factory = DefaultFactory::with_options(
        config.series_options(profile.as_ref()),
        config.sampling_options(profile.as_ref()),
    );

    match config.mode {
        RunMode::Benchmark => run_benchmarks(config, choice, digits, &factory),
        RunMode::Serial => run_single(config, choice, ExecutionMode::Serial, digits, &factory),
        RunMode::Parallel => run_single(config, choice, ExecutionMode::Parallel, digits, &factory),
    }
}

fn run_benchmarks(
    config: &AppConfig,
    choice: AlgorithmChoice,
    digits: u32,
    factory: &DefaultFactory,
) -> Result<()> {
    let pairs = get_pairs_to_run(choice, factory)?;
    let bench_config = BenchmarkConfig {
        digits,
        warmup: !config.no_warmup,
        guard: ConsistencyGuard::default().strict(config.strict),
    };

    let reporter = CLIProgressReporter::new(config.quiet || config.json);
    let outcomes = spawn_benchmark(pairs, bench_config)?.wait(|algorithm, phase| {
        reporter.phase(algorithm, phase);
    });
    reporter.complete();
    let outcomes = outcomes?;

    let presenter = CLIResultPresenter::new(config.verbose, config.quiet, config.json);
    let mut reports = Vec::new();
    let mut first_error: Option<PiError> = None;
    for outcome in outcomes {
        match outcome {
            Ok(report) => {
                presenter.present_report(&report);
                reports.push(report);
            }
            Err(e) => {
                presenter.present_error(&e.to_string());
                first_error.get_or_insert(e);
            }
        }
    }

    persist_reports(config, &reports)?;

    match first_error {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

fn persist_reports(config: &AppConfig, reports: &[BenchmarkReport]) -> Result<()> {
    if let Some(path) = &config.output {
        let text: Vec<String> = reports.iter().map(render_result_file).collect();
        std::fs::write(path, text.join("\n"))
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    if config.no_log {
        return Ok(());
    }

    for report in reports {
        if config.output.is_none() {
            let path = default_result_path(&config.log_dir, report.algorithm, report.digits);
            write_result_file(&path, report)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "result file written");
        }
        append_record(&config.log_dir, report.algorithm, &TimingRecord::from_report(report))
            .with_context(|| format!("failed to append timing log in {}", config.log_dir.display()))?;
    }
    Ok(())
}

fn run_single(
    config: &AppConfig,
    choice: AlgorithmChoice,
    mode: ExecutionMode,
    digits: u32,
    factory: &DefaultFactory,
) -> Result<()> {
    let calculators = get_calculators_to_run(choice, mode, factory)?;
    let results = execute_calculations(&calculators, digits);

    let presenter = CLIResultPresenter::new(config.verbose, config.quiet, config.json);
    for result in &results {
        presenter.present_result(result, config.details);
    }

    if let Some(path) = &config.output {
        if let Some(value) = results.iter().find_map(|r| r.outcome.as_ref().ok()) {
            write_to_file(path, value)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
    }

    match results.into_iter().find_map(|r| r.outcome.err()) {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

fn show_history(config: &AppConfig, choice: AlgorithmChoice) -> Result<()> {
    for algorithm in choice.algorithms() {
        let path = log_path(&config.log_dir, algorithm);
        let records = read_records(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        print!("{}", render_history(algorithm.log_stem(), records));
    }
    Ok(())
}

fn run_calibration(config: &AppConfig, mode: CalibrationMode) -> Result<()> {
    let spinner = CLIProgressReporter::new(config.quiet);
    let sink = spinner.clone();
    let engine = CalibrationEngine::new(mode).with_progress(Box::new(move |progress| {
        sink.step(&progress.step, progress.current, progress.total);
    }));
    let profile = engine.calibrate();
    spinner.complete();
    let profile = profile?;

    let path = profile_io::save_profile(&profile).context("failed to save calibration profile")?;

    if !config.quiet {
        println!("Calibration complete:");
        println!("  Series chunk size: {} terms", profile.series_chunk_size);
        println!("  Sampling chunk size: {} samples", profile.sampling_chunk_size);
        println!("  CPU: {} ({} cores)", profile.cpu_model, profile.num_cores);
        println!("  Saved to {}", path.display());
    }
    Ok(())
}
