//! Readability scoring engine
//!
//! The engine is the RSM jar, driven through three entry points with
//! different I/O shapes. [`ScoringEngine`] names those three operations so
//! the analyzer can be exercised with canned output.
//!
//! | Operation              | Invocation                                          |
//! |------------------------|-----------------------------------------------------|
//! | multi-metric extract   | `java -cp rsm.jar ...runnable.ExtractMetrics FILE`  |
//! | method score extract   | `java -cp rsm.jar raykernel...eval.Main` (stdin)    |
//! | single score extract   | `java -jar rsm.jar FILE`                            |

pub mod process;

use crate::config::EngineSettings;
use crate::error::{ReadabilityError, ReadabilityResult};
use crate::metrics::{classify_output, parse_method_scores};
use process::{is_tool_installed, run_tool, ToolOutput};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const MULTI_METRIC_OPERATION: &str = "multi-metric extraction";
pub const METHOD_SCORE_OPERATION: &str = "method score extraction";
pub const SINGLE_SCORE_OPERATION: &str = "single score extraction";

const MULTI_METRIC_CLASS: &str = "it.unimol.readability.metric.runnable.ExtractMetrics";
const METHOD_SCORE_CLASS: &str = "raykernel.apps.readability.eval.Main";

/// The three engine operations; each returns the raw line-oriented output
pub trait ScoringEngine {
    /// Family-tagged metric lines for a Java file
    fn multi_metric_extract(&self, path: &Path) -> ReadabilityResult<String>;

    /// One score per method, for method texts each followed by `"\n###\n"`
    fn method_score_extract(&self, methods: &str) -> ReadabilityResult<String>;

    /// Tab-separated file/score lines for a Java file
    fn single_score_extract(&self, path: &Path) -> ReadabilityResult<String>;
}

impl<E: ScoringEngine + ?Sized> ScoringEngine for &E {
    fn multi_metric_extract(&self, path: &Path) -> ReadabilityResult<String> {
        (**self).multi_metric_extract(path)
    }

    fn method_score_extract(&self, methods: &str) -> ReadabilityResult<String> {
        (**self).method_score_extract(methods)
    }

    fn single_score_extract(&self, path: &Path) -> ReadabilityResult<String> {
        (**self).single_score_extract(path)
    }
}

/// The RSM jar run through a Java executable
#[derive(Debug, Clone)]
pub struct RsmEngine {
    java: String,
    jar: PathBuf,
    workdir: PathBuf,
    timeout_secs: u64,
}

impl RsmEngine {
    /// Resolve the jar to an absolute path; the engine runs from its directory
    pub fn new(settings: &EngineSettings) -> ReadabilityResult<Self> {
        let jar = settings.jar.as_deref().ok_or_else(|| ReadabilityError::Engine {
            operation: "engine setup",
            message: "no RSM jar configured (set --jar, RSM_JAR or engine.jar)".to_string(),
        })?;
        let jar = std::path::absolute(jar)?;
        let workdir = jar
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            java: settings.java.clone(),
            jar,
            workdir,
            timeout_secs: settings.timeout_secs,
        })
    }

    pub fn jar(&self) -> &Path {
        &self.jar
    }

    /// Whether the Java executable runs and the jar exists
    pub fn is_available(&self) -> bool {
        self.jar.is_file() && is_tool_installed(&self.java, "-version")
    }

    fn jar_arg(&self) -> String {
        self.jar.to_string_lossy().into_owned()
    }

    fn run(
        &self,
        operation: &'static str,
        args: Vec<String>,
        stdin: Option<&str>,
        recognized: fn(&str) -> bool,
    ) -> ReadabilityResult<String> {
        let mut cmd = vec![self.java.clone()];
        cmd.extend(args);
        let result = run_tool(&cmd, operation, self.timeout_secs, Some(&self.workdir), stdin);
        check_output(operation, result, recognized)
    }
}

/// Output of a non-zero exit is kept only when `recognized` finds a line the
/// pass can parse
fn check_output(
    operation: &'static str,
    result: ToolOutput,
    recognized: impl Fn(&str) -> bool,
) -> ReadabilityResult<String> {
    if !result.success {
        let message = match result.error {
            Some(e) if result.timed_out => {
                format!("{} (raise --timeout or engine.timeout_secs)", e)
            }
            Some(e) => e,
            None => "engine did not complete".to_string(),
        };
        return Err(ReadabilityError::Engine { operation, message });
    }

    let output = result.combined_output();
    if !result.exited_cleanly() {
        let code = result.return_code.unwrap_or(-1);
        if !recognized(&output) {
            return Err(ReadabilityError::Engine {
                operation,
                message: format!("exited with code {}: {}", code, first_line(&output)),
            });
        }
        warn!("{} exited with code {}; using partial output", operation, code);
    }

    debug!("{} produced {} lines", operation, output.lines().count());
    Ok(output)
}

fn first_line(output: &str) -> &str {
    output
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("no output")
}

fn has_metric_lines(output: &str) -> bool {
    classify_output(output).next().is_some()
}

fn has_method_scores(output: &str) -> bool {
    !parse_method_scores(output).is_empty()
}

fn has_score_rows(output: &str) -> bool {
    output.lines().any(|line| line.trim().split('\t').nth(1).is_some())
}

impl ScoringEngine for RsmEngine {
    fn multi_metric_extract(&self, path: &Path) -> ReadabilityResult<String> {
        self.run(
            MULTI_METRIC_OPERATION,
            vec![
                "-cp".to_string(),
                self.jar_arg(),
                MULTI_METRIC_CLASS.to_string(),
                path.to_string_lossy().into_owned(),
            ],
            None,
            has_metric_lines,
        )
    }

    fn method_score_extract(&self, methods: &str) -> ReadabilityResult<String> {
        self.run(
            METHOD_SCORE_OPERATION,
            vec![
                "-cp".to_string(),
                self.jar_arg(),
                METHOD_SCORE_CLASS.to_string(),
            ],
            Some(methods),
            has_method_scores,
        )
    }

    fn single_score_extract(&self, path: &Path) -> ReadabilityResult<String> {
        self.run(
            SINGLE_SCORE_OPERATION,
            vec![
                "-jar".to_string(),
                self.jar_arg(),
                path.to_string_lossy().into_owned(),
            ],
            None,
            has_score_rows,
        )
    }
}
