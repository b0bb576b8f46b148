//! End-to-end analysis through the library API with a canned engine
//!
//! The engine is replaced by fixed outputs, so these tests cover staging,
//! span extraction, classification and derived scores without a JVM.

use indoc::indoc;
use rsm_readability::engine::ScoringEngine;
use rsm_readability::models::{MetricFamily, READABILITY_KEY};
use rsm_readability::spans::{BraceStrategy, METHOD_DELIMITER};
use rsm_readability::{ReadabilityAnalyzer, ReadabilityError, ReadabilityResult};
use std::cell::RefCell;
use std::path::{Path, PathBuf};

const MULTI_METRIC_OUTPUT: &str = indoc! {"
    Loading model...
    New Comments readability MIN: 0.1
    New Comments readability MAX: 0.9
    New Text Coherence MIN: 0.5
    NewCOMPLEXITYAVG: 4.0
    BW Avg indentation length: 3.25
    BW Max line length: 88
    BW Avg identifiers: NaN-ish
    Posnett volume: 120.5
    Posnett lines: 14
    Posnett entropy: 4.2
    Done.
"};

const LAMP: &str = indoc! {r#"
    package demo;

    public class Lamp {
        private boolean on;

        @Override
        public String toString() {
            return "Lamp{" + on + "}";
        }

        void toggle() {
            if (on) {
                on = false;
            } else {
                on = true;
            }
        }

        abstract static class Base {
            abstract void reset();
        }
    }
"#};

#[derive(Default)]
struct RecordingEngine {
    metrics: String,
    method_scores: String,
    single_score: String,
    staged_paths: RefCell<Vec<PathBuf>>,
    methods: RefCell<Option<String>>,
}

impl ScoringEngine for RecordingEngine {
    fn multi_metric_extract(&self, path: &Path) -> ReadabilityResult<String> {
        self.staged_paths.borrow_mut().push(path.to_path_buf());
        Ok(self.metrics.clone())
    }

    fn method_score_extract(&self, methods: &str) -> ReadabilityResult<String> {
        *self.methods.borrow_mut() = Some(methods.to_string());
        Ok(self.method_scores.clone())
    }

    fn single_score_extract(&self, path: &Path) -> ReadabilityResult<String> {
        self.staged_paths.borrow_mut().push(path.to_path_buf());
        Ok(self.single_score.clone())
    }
}

fn engine() -> RecordingEngine {
    RecordingEngine {
        metrics: MULTI_METRIC_OUTPUT.to_string(),
        method_scores: "0.2\n0.8\n".to_string(),
        single_score: "Lamp.java\t0.61\nother.java\t0.99\n".to_string(),
        ..RecordingEngine::default()
    }
}

#[test]
fn test_file_analysis_builds_full_tree() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("Lamp.java");
    std::fs::write(&input, LAMP).unwrap();

    let engine = engine();
    let analyzer = ReadabilityAnalyzer::new(&engine, dir.path().join("staging"));
    let report = analyzer.analyze_file(&input).unwrap();
    let tree = &report.metrics;

    assert!(!report.has_errors());
    assert_eq!(tree.value(MetricFamily::Scalabrino, "comments_readability_minimum"), Some(0.1));
    assert_eq!(tree.value(MetricFamily::Scalabrino, "comments_readability_maximum"), Some(0.9));
    assert_eq!(tree.value(MetricFamily::Scalabrino, "complexity_average"), Some(4.0));
    assert!(!tree
        .family(MetricFamily::Scalabrino)
        .keys()
        .any(|id| id.starts_with("text_coherence")));

    assert_eq!(tree.value(MetricFamily::BW, "indentation_average"), Some(3.25));
    assert_eq!(tree.value(MetricFamily::BW, "line_length_maximum"), Some(88.0));
    assert_eq!(tree.get(MetricFamily::BW, "identifiers_average"), Some(None));

    assert!((tree.readability(MetricFamily::BW).unwrap() - 0.5).abs() < 1e-12);
    assert_eq!(tree.readability(MetricFamily::Scalabrino), Some(0.61));
    let z: f64 = 8.87 - 0.033 * 120.5 + 0.4 * 14.0 - 1.5 * 4.2;
    let posnett = tree.readability(MetricFamily::Posnett).unwrap();
    assert!((posnett - 1.0 / (1.0 + z.exp())).abs() < 1e-12);

    // Both file passes see the same staged copy, which is gone afterwards
    let staged = engine.staged_paths.borrow();
    assert_eq!(staged.len(), 2);
    assert_eq!(staged[0], staged[1]);
    assert!(staged[0].starts_with(dir.path().join("staging")));
    assert!(!staged[0].exists());
}

#[test]
fn test_method_bodies_sent_in_document_order() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine();
    let analyzer = ReadabilityAnalyzer::new(&engine, dir.path());
    analyzer.analyze_class(LAMP).unwrap();

    let sent = engine.methods.borrow().clone().unwrap();
    let methods: Vec<&str> = sent
        .split(METHOD_DELIMITER)
        .filter(|m| !m.is_empty())
        .collect();
    assert_eq!(methods.len(), 2);
    assert!(methods[0].starts_with("    public String toString() {"));
    assert!(methods[0].ends_with("    }"));
    assert!(methods[1].starts_with("    void toggle() {"));
    assert_eq!(methods[1].lines().count(), 7);
    assert!(!sent.contains("reset"));
}

#[test]
fn test_method_analysis_wraps_snippet() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine();
    let analyzer = ReadabilityAnalyzer::new(&engine, dir.path());
    let report = analyzer
        .analyze_method("int twice(int x) {\n\treturn x * 2;\n}")
        .unwrap();

    let sent = engine.methods.borrow().clone().unwrap();
    assert_eq!(
        sent,
        format!("int twice(int x) {{\n    return x * 2;\n}}{}", METHOD_DELIMITER)
    );
    assert!(report.metrics.readability(MetricFamily::Posnett).is_some());
}

#[test]
fn test_missing_posnett_metric_is_reported_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let engine = RecordingEngine {
        metrics: "Posnett volume: 1\nPosnett entropy: 2\nBW Max line length: 40\n".to_string(),
        ..RecordingEngine::default()
    };
    let analyzer = ReadabilityAnalyzer::new(&engine, dir.path());
    let report = analyzer.analyze_class(LAMP).unwrap();

    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("lines"));
    assert_eq!(report.metrics.value(MetricFamily::BW, "line_length_maximum"), Some(40.0));
    assert_eq!(report.metrics.get(MetricFamily::Posnett, READABILITY_KEY), None);
    assert_eq!(report.metrics.get(MetricFamily::Scalabrino, READABILITY_KEY), Some(None));
    assert_eq!(report.metrics.get(MetricFamily::BW, READABILITY_KEY), Some(None));

    let json = serde_json::to_value(&report).unwrap();
    assert!(json["metrics"]["Scalabrino"]["readability"].is_null());
    assert_eq!(json["errors"].as_array().unwrap().len(), 1);
}

#[test]
fn test_literal_strategy_trips_on_brace_in_comment() {
    let source = indoc! {"
        class Commented {
            void open() { // {
                run();
            }
        }
    "};
    let dir = tempfile::tempdir().unwrap();
    let engine = engine();

    let literal = ReadabilityAnalyzer::new(&engine, dir.path());
    let spans = literal.method_spans(source).unwrap();
    assert_eq!(spans[0].end_line, 4);

    let aware = ReadabilityAnalyzer::new(&engine, dir.path())
        .with_brace_strategy(BraceStrategy::TokenAware);
    let spans = aware.method_spans(source).unwrap();
    assert_eq!(spans[0].end_line, 3);
}

#[test]
fn test_engine_error_aborts_analysis() {
    struct FailingSingleScore;
    impl ScoringEngine for FailingSingleScore {
        fn multi_metric_extract(&self, _path: &Path) -> ReadabilityResult<String> {
            Ok(String::new())
        }
        fn method_score_extract(&self, _methods: &str) -> ReadabilityResult<String> {
            Ok(String::new())
        }
        fn single_score_extract(&self, _path: &Path) -> ReadabilityResult<String> {
            Err(ReadabilityError::Engine {
                operation: "single score extraction",
                message: "timed out".to_string(),
            })
        }
    }

    let dir = tempfile::tempdir().unwrap();
    let analyzer = ReadabilityAnalyzer::new(FailingSingleScore, dir.path());
    let err = analyzer.analyze_class(LAMP).unwrap_err();
    assert!(err.to_string().contains("single score extraction"));
}
