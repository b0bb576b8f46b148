//! JSON reporter
//!
//! Outputs results as pretty-printed JSON, for piping to jq or further
//! processing. Missing metric values serialize as `null`.

use crate::models::{MethodSpan, ReadabilityReport};
use anyhow::Result;

/// Render report as JSON
pub fn render(report: &ReadabilityReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Render spans as a JSON array
pub fn render_spans(spans: &[MethodSpan]) -> Result<String> {
    Ok(serde_json::to_string_pretty(spans)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::{test_report, test_spans};

    #[test]
    fn test_json_render_valid() {
        let json_str = render(&test_report()).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed["metrics"]["Scalabrino"]["complexity_minimum"], 3.5);
        assert!(parsed["metrics"]["BW"]["readability"].is_null());
        assert_eq!(parsed["errors"].as_array().expect("errors array").len(), 1);
    }

    #[test]
    fn test_json_omits_empty_errors() {
        let mut report = test_report();
        report.errors.clear();
        let json_str = render(&report).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert!(parsed.get("errors").is_none());
        assert!(parsed["metrics"]["Posnett"].is_object());
    }

    #[test]
    fn test_json_spans() {
        let json_str = render_spans(&test_spans()).expect("render spans");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed[0]["start_line"], 3);
        assert_eq!(parsed[0]["end_line"], 5);
    }
}
