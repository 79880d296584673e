//! Config command implementation

use std::path::Path;

use anyhow::Result;
use tally_core::config::default_config_path;

use super::load_config;

pub fn cmd_config(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;

    println!();
    println!("⚙️  Analysis Configuration");
    println!("   ─────────────────────────────────────────────────────────────");

    match config_path {
        Some(path) if path.exists() => println!("   Source: {}", path.display()),
        Some(path) => println!("   Source: built-in defaults ({} not found)", path.display()),
        None => match default_config_path() {
            Some(path) if path.exists() => println!("   Source: {}", path.display()),
            Some(path) => {
                println!("   Source: built-in defaults");
                println!("   Override: {}", path.display());
            }
            None => println!("   Source: built-in defaults"),
        },
    }

    println!();
    print!("{}", config.to_toml_string()?);

    Ok(())
}
