//! Doctor command - check the engine environment

use crate::config::Settings;
use crate::engine::process::is_tool_installed;
use anyhow::Result;

pub fn run(settings: &Settings) -> Result<()> {
    println!("🩺 rsm-readability doctor\n");
    let mut ok = true;

    let java = &settings.engine.java;
    if is_tool_installed(java, "-version") {
        println!("✓ Java: {}", java);
    } else {
        println!("✗ Java: '{}' did not run", java);
        println!("  Install a JRE or set --java / RSM_JAVA");
        ok = false;
    }

    match &settings.engine.jar {
        Some(jar) if jar.is_file() => println!("✓ RSM jar: {}", jar.display()),
        Some(jar) => {
            println!("✗ RSM jar: {} does not exist", jar.display());
            ok = false;
        }
        None => {
            println!("✗ RSM jar: not configured");
            println!("  Set --jar, RSM_JAR or engine.jar in the config file");
            ok = false;
        }
    }

    println!("✓ Staging directory: {}", settings.engine.temp_dir.display());
    println!(
        "✓ Brace strategy: {}",
        settings.extraction.brace_strategy
    );

    if ok {
        println!("\n✅ All checks passed!");
        Ok(())
    } else {
        anyhow::bail!("Engine is not usable")
    }
}
