//! rsm-readability - readability metrics for Java source
//!
//! Extracts method bodies from Java source, drives the RSM readability
//! engine over them and normalizes its output into a [`MetricTree`] of
//! Scalabrino, BW and Posnett metrics with a derived score per family.
//!
//! [`MetricTree`]: models::MetricTree

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod models;
pub mod parsers;
pub mod reporters;
pub mod spans;
pub mod staging;

pub use analyzer::ReadabilityAnalyzer;
pub use error::{ReadabilityError, ReadabilityResult};
