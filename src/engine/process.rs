//! Subprocess runner for the scoring engine
//!
//! Runs a command with piped stdio, optionally feeds it stdin, drains
//! stdout and stderr on reader threads and enforces a timeout.

use std::io::{Read, Write};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Result from running an external tool
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Whether the tool ran to completion (exit code may still be non-zero)
    pub success: bool,
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
    /// Process exit code
    pub return_code: Option<i32>,
    /// Whether the tool timed out
    pub timed_out: bool,
    /// Error message if failed
    pub error: Option<String>,
}

impl ToolOutput {
    /// Create a completed result
    pub fn success(stdout: String, stderr: String, return_code: i32) -> Self {
        Self {
            success: true,
            stdout,
            stderr,
            return_code: Some(return_code),
            timed_out: false,
            error: None,
        }
    }

    /// Create a failed result
    pub fn failure(error: String) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: String::new(),
            return_code: None,
            timed_out: false,
            error: Some(error),
        }
    }

    /// Create a timeout result
    pub fn timeout(tool_name: &str, timeout_secs: u64) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: String::new(),
            return_code: None,
            timed_out: true,
            error: Some(format!("{} timed out after {}s", tool_name, timeout_secs)),
        }
    }

    /// Stdout followed by stderr; the engine prints results on both
    pub fn combined_output(&self) -> String {
        match (self.stdout.is_empty(), self.stderr.is_empty()) {
            (_, true) => self.stdout.clone(),
            (true, false) => self.stderr.clone(),
            (false, false) => format!("{}\n{}", self.stdout.trim_end_matches('\n'), self.stderr),
        }
    }

    pub fn exited_cleanly(&self) -> bool {
        self.success && self.return_code == Some(0)
    }
}

/// Run an external tool
///
/// # Arguments
/// * `cmd` - Command and arguments to run
/// * `tool_name` - Human-readable tool name for error messages
/// * `timeout_secs` - Timeout in seconds (0 = no timeout)
/// * `cwd` - Working directory for the tool
/// * `stdin` - Text written to the tool's standard input, then closed
pub fn run_tool(
    cmd: &[String],
    tool_name: &str,
    timeout_secs: u64,
    cwd: Option<&Path>,
    stdin: Option<&str>,
) -> ToolOutput {
    let Some((program, args)) = cmd.split_first() else {
        return ToolOutput::failure("Empty command".to_string());
    };

    debug!("Running {}: {} {:?}", tool_name, program, args);

    let mut command = Command::new(program);
    command.args(args);

    if let Some(dir) = cwd {
        command.current_dir(dir);
    }

    command.stdin(if stdin.is_some() {
        Stdio::piped()
    } else {
        Stdio::null()
    });
    command.stdout(Stdio::piped());
    command.stderr(Stdio::piped());

    let mut child = match command.spawn() {
        Ok(child) => child,
        Err(e) => {
            if e.kind() == std::io::ErrorKind::NotFound {
                return ToolOutput::failure(format!(
                    "{} not found. Please install it first.",
                    program
                ));
            }
            return ToolOutput::failure(format!("Failed to run {}: {}", tool_name, e));
        }
    };

    let writer = stdin.and_then(|text| {
        let mut pipe = child.stdin.take()?;
        let text = text.to_owned();
        Some(thread::spawn(move || {
            // A tool that exits early closes the pipe; its output still counts
            if let Err(e) = pipe.write_all(text.as_bytes()) {
                debug!("stdin write ended early: {}", e);
            }
        }))
    });
    let stdout = child.stdout.take().map(drain);
    let stderr = child.stderr.take().map(drain);

    let status = wait(&mut child, tool_name, timeout_secs);

    if let Some(handle) = writer {
        let _ = handle.join();
    }
    let stdout = collect(stdout);
    let stderr = collect(stderr);

    match status {
        Wait::Exited(code) => ToolOutput::success(stdout, stderr, code),
        Wait::TimedOut => ToolOutput::timeout(tool_name, timeout_secs),
        Wait::Failed(e) => ToolOutput::failure(format!("Failed to wait for {}: {}", tool_name, e)),
    }
}

enum Wait {
    Exited(i32),
    TimedOut,
    Failed(std::io::Error),
}

/// Poll for completion with small sleep intervals
fn wait(child: &mut Child, tool_name: &str, timeout_secs: u64) -> Wait {
    if timeout_secs == 0 {
        return match child.wait() {
            Ok(status) => Wait::Exited(status.code().unwrap_or(-1)),
            Err(e) => Wait::Failed(e),
        };
    }

    let start = Instant::now();
    let timeout = Duration::from_secs(timeout_secs);
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Wait::Exited(status.code().unwrap_or(-1)),
            Ok(None) => {
                if start.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    warn!("{} timed out after {}s", tool_name, timeout_secs);
                    return Wait::TimedOut;
                }
                thread::sleep(Duration::from_millis(50));
            }
            Err(e) => return Wait::Failed(e),
        }
    }
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn collect(handle: Option<JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}

/// Check if a tool is installed
pub fn is_tool_installed(tool: &str, version_flag: &str) -> bool {
    Command::new(tool)
        .arg(version_flag)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}
