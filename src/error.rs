//! Error types for readability analysis

use crate::models::MetricFamily;
use thiserror::Error;

/// Why a method body could not be delimited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    /// No `{` follows the declaration (abstract or interface method)
    NoOpeningBrace,
    /// Brace balance never returns to zero before end of text
    UnbalancedBraces,
}

impl std::fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MalformedReason::NoOpeningBrace => write!(f, "has no opening brace"),
            MalformedReason::UnbalancedBraces => write!(f, "has unbalanced braces"),
        }
    }
}

/// Errors that can occur while analyzing a source file
#[derive(Error, Debug)]
pub enum ReadabilityError {
    /// `line` is 0-based; the message shows it 1-based
    #[error("Malformed source: method declared on line {line_no} {reason}", line_no = .line + 1)]
    MalformedSource { line: usize, reason: MalformedReason },

    #[error("{family} readability requires `{metric}`, which is missing or not a number")]
    MissingDependency {
        family: MetricFamily,
        metric: &'static str,
    },

    #[error("{operation} failed: {message}")]
    Engine {
        operation: &'static str,
        message: String,
    },

    #[error("Failed to parse Java source: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ReadabilityResult<T> = Result<T, ReadabilityError>;
