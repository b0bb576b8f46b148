//! Output reporters for readability results
//!
//! Supports two output formats:
//! - `text` - Terminal tables, styled when stdout is a terminal
//! - `json` - Machine-readable JSON

mod json;
mod text;

use crate::models::{MethodSpan, ReadabilityReport};
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: text, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render a readability report
pub fn report(report: &ReadabilityReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render(report)),
        OutputFormat::Json => json::render(report),
    }
}

/// Render extracted method spans
pub fn spans(spans: &[MethodSpan], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render_spans(spans)),
        OutputFormat::Json => json::render_spans(spans),
    }
}
