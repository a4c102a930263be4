use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::Context;
use clap::Parser;
use tracing::info;

use psirun::config::Config;
use psirun::dataset;
use psirun::domain::IndicatorCode;
use psirun::driver::{run_analysis, CancelToken, LogProgress};
use psirun::engine::TableEngine;
use psirun::observability::init_tracing;
use psirun::report::{self, Summary};

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    init_tracing(&config.log_level);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting psirun PSI analyzer"
    );

    let encounters = dataset::load_csv(&config.input)
        .with_context(|| format!("failed to load dataset from {}", config.input.display()))?;

    let columns = encounters.first().map(|e| e.len()).unwrap_or(0);
    info!(
        rows = encounters.len(),
        columns,
        path = %config.input.display(),
        "Dataset loaded"
    );

    let engine = TableEngine::from_files(&config.codes_path, &config.definitions_path)
        .context("failed to initialize PSI engine")?;
    info!(
        definitions = engine.definition_count(),
        "PSI engine initialized"
    );

    let cancel = CancelToken::new();
    let mut progress = LogProgress::new();
    let run = run_analysis(
        &encounters,
        &IndicatorCode::ALL,
        &engine,
        &mut progress,
        &cancel,
    );

    let summary = Summary::of(&run.results);
    info!(
        total = summary.total,
        inclusions = summary.inclusions,
        exclusions = summary.exclusions,
        errors = summary.errors,
        faults = run.errors.len(),
        "Analysis complete"
    );

    let results_file = File::create(&config.results_out).with_context(|| {
        format!("failed to create results file {}", config.results_out.display())
    })?;
    let mut writer = BufWriter::new(results_file);
    if config.inclusions_only {
        report::write_results_csv(&mut writer, report::inclusions_only(&run.results))?;
    } else {
        report::write_results_csv(&mut writer, &run.results)?;
    }
    writer.flush()?;
    info!(path = %config.results_out.display(), "Results written");

    if run.has_errors() {
        let errors_file = File::create(&config.errors_out).with_context(|| {
            format!("failed to create error log {}", config.errors_out.display())
        })?;
        let mut writer = BufWriter::new(errors_file);
        report::write_errors_csv(&mut writer, &run.errors)?;
        writer.flush()?;
        info!(
            path = %config.errors_out.display(),
            count = run.errors.len(),
            "Error log written"
        );
    }

    Ok(())
}
