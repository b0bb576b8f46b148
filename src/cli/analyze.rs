//! File, class and method analysis commands

use crate::analyzer::ReadabilityAnalyzer;
use crate::config::Settings;
use crate::engine::RsmEngine;
use crate::models::ReadabilityReport;
use crate::parsers::language_for_extension;
use crate::reporters::{self, OutputFormat};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::warn;

pub fn run_file(settings: &Settings, path: &Path, format: OutputFormat, strict: bool) -> Result<()> {
    if !path.is_file() {
        anyhow::bail!("Not a file: {}", path.display());
    }
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    if language_for_extension(ext).is_none() {
        warn!("{} does not look like a Java file", path.display());
    }

    let report = analyzer(settings)?
        .analyze_file(path)
        .with_context(|| format!("Failed to analyze {}", path.display()))?;
    finish(&report, format, strict)
}

pub fn run_class(settings: &Settings, source: &str, format: OutputFormat, strict: bool) -> Result<()> {
    let report = analyzer(settings)?
        .analyze_class(source)
        .context("Failed to analyze class")?;
    finish(&report, format, strict)
}

pub fn run_method(settings: &Settings, source: &str, format: OutputFormat, strict: bool) -> Result<()> {
    let report = analyzer(settings)?
        .analyze_method(source)
        .context("Failed to analyze method")?;
    finish(&report, format, strict)
}

fn analyzer(settings: &Settings) -> Result<ReadabilityAnalyzer<RsmEngine>> {
    let engine = RsmEngine::new(&settings.engine)?;
    if !engine.jar().is_file() {
        anyhow::bail!("RSM jar not found: {}", engine.jar().display());
    }
    Ok(ReadabilityAnalyzer::new(engine, &settings.engine.temp_dir)
        .with_brace_strategy(settings.extraction.brace_strategy))
}

fn finish(report: &ReadabilityReport, format: OutputFormat, strict: bool) -> Result<()> {
    println!("{}", reporters::report(report, format)?);
    check_strict(strict, report);
    Ok(())
}

/// Exit with code 1 under `--strict` when any derived score failed
fn check_strict(strict: bool, report: &ReadabilityReport) {
    if strict && report.has_errors() {
        eprintln!(
            "Failing due to --strict: {} derived score(s) could not be computed",
            report.errors.len()
        );
        std::process::exit(1);
    }
}
