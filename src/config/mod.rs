//! Configuration module for rsm-readability
//!
//! This module handles:
//! - Engine location (java executable, RSM jar, staging directory)
//! - Engine timeouts
//! - Brace counting strategy for span extraction

mod settings;

pub use settings::{
    write_example_config, EngineSettings, ExtractionSettings, Settings, SettingsOverrides,
    ENV_JAR, ENV_JAVA, ENV_TEMP_DIR, ENV_TIMEOUT,
};
