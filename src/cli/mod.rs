//! CLI command definitions and handlers

mod analyze;
mod doctor;
mod init;
mod inspect;

use crate::config::{Settings, SettingsOverrides};
use crate::reporters::OutputFormat;
use crate::spans::BraceStrategy;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};

/// rsm-readability - readability metrics for Java source
#[derive(Parser, Debug)]
#[command(name = "rsm-readability")]
#[command(
    version,
    about = "Readability metrics for Java files, classes and methods",
    long_about = "Runs the RSM readability engine on Java source and collects its \
Scalabrino, BW and Posnett metrics into one tree, with a derived readability \
score per family.\n\n\
The engine needs a Java runtime and the RSM jar (--jar, RSM_JAR or the config file).",
    after_help = "\
Examples:
  rsm-readability file src/Lamp.java               Analyze a Java file
  rsm-readability class < Lamp.java                Analyze a class read from stdin
  rsm-readability method Snippet.java -f json      JSON output for scripting
  rsm-readability spans src/Lamp.java              Show the method bodies sent to the engine
  rsm-readability classify metrics.txt             Classify captured engine output
  rsm-readability doctor                           Check java and the RSM jar"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Output format: text, json
    #[arg(long, short = 'f', global = true, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Config file (default: <config dir>/rsm-readability/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// How braces are counted when extracting method bodies
    #[arg(long, global = true, value_enum)]
    pub brace_strategy: Option<BraceStrategy>,

    /// Java executable used to run the engine
    #[arg(long, global = true)]
    pub java: Option<String>,

    /// Path to the RSM jar
    #[arg(long, global = true)]
    pub jar: Option<PathBuf>,

    /// Directory for staged .java files
    #[arg(long, global = true)]
    pub temp_dir: Option<PathBuf>,

    /// Seconds before an engine invocation is killed (0 = no limit)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Exit with code 1 when a derived score could not be computed
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a Java file
    File {
        /// Java source file
        path: PathBuf,
    },

    /// Analyze a class (reads stdin when PATH is omitted or `-`)
    Class { path: Option<PathBuf> },

    /// Analyze a single method; it is wrapped in a class first
    Method { path: Option<PathBuf> },

    /// Print the method bodies that would be scored (no engine needed)
    Spans {
        /// Java source file
        path: PathBuf,
    },

    /// Classify captured multi-metric engine output into a metric tree
    Classify { path: Option<PathBuf> },

    /// Write an example config file
    Init,

    /// Check that java and the RSM jar are usable
    Doctor,
}

impl Cli {
    /// Load settings and apply the command-line overrides
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::load(self.config.as_deref())?;
        settings.apply_overrides(SettingsOverrides {
            java: self.java.clone(),
            jar: self.jar.clone(),
            temp_dir: self.temp_dir.clone(),
            timeout_secs: self.timeout,
            brace_strategy: self.brace_strategy,
        });
        Ok(settings)
    }

    fn output_format(&self) -> Result<OutputFormat> {
        self.format.parse()
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let format = cli.output_format()?;
    match &cli.command {
        Commands::Init => init::run(cli.config.as_deref()),

        Commands::Doctor => doctor::run(&cli.settings()?),

        Commands::File { path } => {
            analyze::run_file(&cli.settings()?, path, format, cli.strict)
        }

        Commands::Class { path } => {
            let source = read_input(path.as_deref())?;
            analyze::run_class(&cli.settings()?, &source, format, cli.strict)
        }

        Commands::Method { path } => {
            let source = read_input(path.as_deref())?;
            analyze::run_method(&cli.settings()?, &source, format, cli.strict)
        }

        Commands::Spans { path } => inspect::spans(&cli.settings()?, path, format),

        Commands::Classify { path } => {
            let output = read_input(path.as_deref())?;
            inspect::classify(&output, format)
        }
    }
}

/// Read a file, or stdin when no path (or `-`) is given
fn read_input(path: Option<&Path>) -> Result<String> {
    use anyhow::Context;

    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("Failed to read {}", p.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}
