//! Readability analysis of Java files, classes and methods
//!
//! Runs the three engine passes in order and merges their output into one
//! [`MetricTree`]:
//! 1. multi-metric extraction, classified line by line
//! 2. method score extraction over the extracted method spans (BW readability)
//! 3. single score extraction (Scalabrino readability)
//!
//! Posnett readability is derived from the merged tree at the end.

use crate::engine::ScoringEngine;
use crate::error::ReadabilityResult;
use crate::metrics::DerivedScores;
use crate::models::{MethodSpan, MetricTree, ReadabilityReport};
use crate::parsers;
use crate::spans::{extract_method_spans, join_for_engine, BraceStrategy};
use crate::staging::StagedSource;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub struct ReadabilityAnalyzer<E> {
    engine: E,
    temp_dir: PathBuf,
    brace_strategy: BraceStrategy,
}

impl<E: ScoringEngine> ReadabilityAnalyzer<E> {
    pub fn new(engine: E, temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            engine,
            temp_dir: temp_dir.into(),
            brace_strategy: BraceStrategy::default(),
        }
    }

    pub fn with_brace_strategy(mut self, strategy: BraceStrategy) -> Self {
        self.brace_strategy = strategy;
        self
    }

    /// Analyze a Java file on disk
    pub fn analyze_file(&self, path: &Path) -> ReadabilityResult<ReadabilityReport> {
        let staged = StagedSource::file(path, &self.temp_dir)?;
        self.run_analysis(staged.path())
    }

    /// Analyze a class given as source text
    pub fn analyze_class(&self, source: &str) -> ReadabilityResult<ReadabilityReport> {
        let staged = StagedSource::class(source, &self.temp_dir)?;
        self.run_analysis(staged.path())
    }

    /// Analyze a single method given as source text
    pub fn analyze_method(&self, source: &str) -> ReadabilityResult<ReadabilityReport> {
        let staged = StagedSource::method(source, &self.temp_dir)?;
        self.run_analysis(staged.path())
    }

    /// Spans of every method with a body, in declaration order
    pub fn method_spans(&self, source: &str) -> ReadabilityResult<Vec<MethodSpan>> {
        let starts = parsers::method_start_lines(source)?;
        extract_method_spans(source, starts, self.brace_strategy).collect()
    }

    /// Run all engine passes on a staged Java file
    pub fn run_analysis(&self, path: &Path) -> ReadabilityResult<ReadabilityReport> {
        info!("Extracting readability metrics from {}", path.display());
        let output = self.engine.multi_metric_extract(path)?;
        let mut metrics = MetricTree::from_output(&output);
        debug!("Classified {} metrics", metrics.len());

        let source = std::fs::read_to_string(path)?;
        let spans = self.method_spans(&source)?;
        let method_scores = if spans.is_empty() {
            debug!("No method bodies found; skipping method scores");
            String::new()
        } else {
            info!("Scoring {} methods", spans.len());
            self.engine.method_score_extract(&join_for_engine(&spans))?
        };

        info!("Computing overall readability score");
        let single_score = self.engine.single_score_extract(path)?;

        let mut report = ReadabilityReport::default();
        if let Err(e) =
            DerivedScores::from_outputs(&method_scores, &single_score).apply(&mut metrics)
        {
            report.errors.push(e.to_string());
        }
        report.metrics = metrics;
        Ok(report)
    }
}
