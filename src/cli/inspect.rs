//! Engine-free commands: span extraction and output classification

use crate::config::Settings;
use crate::error::ReadabilityError;
use crate::models::{MethodSpan, MetricTree, ReadabilityReport};
use crate::parsers;
use crate::reporters::{self, OutputFormat};
use crate::spans::extract_method_spans;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::warn;

/// Print every method span of a Java file.
///
/// Unlike a full analysis, a malformed method is reported and skipped.
pub fn spans(settings: &Settings, path: &Path, format: OutputFormat) -> Result<()> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let starts = parsers::method_start_lines(&source)?;

    let mut found: Vec<MethodSpan> = Vec::new();
    let mut malformed = 0usize;
    for span in extract_method_spans(&source, starts, settings.extraction.brace_strategy) {
        match span {
            Ok(span) => found.push(span),
            Err(e @ ReadabilityError::MalformedSource { .. }) => {
                warn!("{}: {}", path.display(), e);
                malformed += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    print!("{}", reporters::spans(&found, format)?);
    if format == OutputFormat::Json {
        println!();
    }
    if malformed > 0 {
        anyhow::bail!("{} method(s) could not be extracted", malformed);
    }
    Ok(())
}

/// Classify captured multi-metric output and print the resulting tree
pub fn classify(output: &str, format: OutputFormat) -> Result<()> {
    let report = ReadabilityReport {
        metrics: MetricTree::from_output(output),
        errors: Vec::new(),
    };
    println!("{}", reporters::report(&report, format)?);
    Ok(())
}
