//! Engine and extraction settings
//!
//! Supports loading config from:
//! - Environment variables
//! - An explicit `--config` file, or ~/.config/rsm-readability/config.toml

use crate::spans::BraceStrategy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const ENV_JAVA: &str = "RSM_JAVA";
pub const ENV_JAR: &str = "RSM_JAR";
pub const ENV_TEMP_DIR: &str = "RSM_TEMP_DIR";
pub const ENV_TIMEOUT: &str = "RSM_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub engine: EngineSettings,
    #[serde(default)]
    pub extraction: ExtractionSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Java executable used to run the engine
    pub java: String,

    /// Path to the RSM jar
    pub jar: Option<PathBuf>,

    /// Directory for staged `.java` inputs
    pub temp_dir: PathBuf,

    /// Per-invocation timeout (0 = none)
    pub timeout_secs: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            java: "java".to_string(),
            jar: None,
            temp_dir: std::env::temp_dir().join("rsm-readability"),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractionSettings {
    pub brace_strategy: BraceStrategy,
}

/// Values given on the command line; `None` leaves the loaded value alone
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub java: Option<String>,
    pub jar: Option<PathBuf>,
    pub temp_dir: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub brace_strategy: Option<BraceStrategy>,
}

impl Settings {
    /// Load settings, with priority:
    /// 1. Environment variables (highest; CLI flags are applied afterwards)
    /// 2. Explicit config file, or the user config file
    /// 3. Defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut settings = match explicit {
            Some(path) => Self::from_file(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
            None => Self::user_config_path()
                .filter(|p| p.exists())
                .and_then(|p| match Self::from_file(&p) {
                    Ok(settings) => {
                        debug!("Loaded user config from {}", p.display());
                        Some(settings)
                    }
                    Err(e) => {
                        warn!("Ignoring {}: {:#}", p.display(), e);
                        None
                    }
                })
                .unwrap_or_default(),
        };

        settings.apply_env(|key| std::env::var(key).ok());
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Get the user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("rsm-readability").join("config.toml"))
    }

    /// Apply environment variables through `lookup`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(java) = lookup(ENV_JAVA) {
            self.engine.java = java;
        }
        if let Some(jar) = lookup(ENV_JAR) {
            self.engine.jar = Some(PathBuf::from(jar));
        }
        if let Some(dir) = lookup(ENV_TEMP_DIR) {
            self.engine.temp_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup(ENV_TIMEOUT) {
            match raw.trim().parse() {
                Ok(secs) => self.engine.timeout_secs = secs,
                Err(_) => warn!("Ignoring {}={:?}: not a number of seconds", ENV_TIMEOUT, raw),
            }
        }
    }

    /// Apply command-line values (they take priority over everything)
    pub fn apply_overrides(&mut self, overrides: SettingsOverrides) {
        if let Some(java) = overrides.java {
            self.engine.java = java;
        }
        if let Some(jar) = overrides.jar {
            self.engine.jar = Some(jar);
        }
        if let Some(dir) = overrides.temp_dir {
            self.engine.temp_dir = dir;
        }
        if let Some(secs) = overrides.timeout_secs {
            self.engine.timeout_secs = secs;
        }
        if let Some(strategy) = overrides.brace_strategy {
            self.extraction.brace_strategy = strategy;
        }
    }

    /// Create the user config file with commented examples; the flag is
    /// false when a file was already there
    pub fn init_user_config() -> Result<(PathBuf, bool)> {
        let config_path = Self::user_config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        let created = write_example_config(&config_path)?;
        Ok((config_path, created))
    }
}

/// Write the example config unless a file already exists; returns whether it wrote
pub fn write_example_config(config_path: &Path) -> Result<bool> {
    if config_path.exists() {
        return Ok(false);
    }
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let example = r#"# rsm-readability configuration

[engine]
# Java executable used to run the readability engine
java = "java"

# Path to the RSM jar (also: RSM_JAR or --jar)
# jar = "/opt/rsm/rsm.jar"

# Directory for staged .java files
# temp_dir = "/tmp/rsm-readability"

# Seconds before an engine invocation is killed (0 = no limit)
timeout_secs = 120

[extraction]
# "literal" counts every brace; "token-aware" skips braces in strings and comments
brace_strategy = "literal"
"#;
    std::fs::write(config_path, example)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(true)
}
