//! Init command - write an example config file

use crate::config::{write_example_config, Settings};
use anyhow::Result;
use console::style;
use std::path::Path;

/// Run the init command; `target` overrides the user config location
pub fn run(target: Option<&Path>) -> Result<()> {
    println!("\n{} Initializing rsm-readability\n", style("☕").bold());

    let (config_path, created) = match target {
        Some(path) => (path.to_path_buf(), write_example_config(path)?),
        None => Settings::init_user_config()?,
    };

    if created {
        println!(
            "{} Created {}",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
    } else {
        println!(
            "{} Already initialized at {}",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
    }

    println!("\nNext steps:");
    println!("  {} Point engine.jar at the RSM jar", style("1.").dim());
    println!("  {} Check the setup", style("rsm-readability doctor").cyan());
    println!(
        "  {} Analyze a file",
        style("rsm-readability file Lamp.java").cyan()
    );

    Ok(())
}
