//! Configuration management commands.
//!
//! Provides init, show, schema and validate subcommands for
//! `catalogue.json` files.

use anyhow::{Context, Result};
use catalogue_config::{
    CatalogueSettings,
    loader::{global_config_path, load_merged, local_config_path},
    writer::{write_new_pretty_json_atomic, write_pretty_json_atomic},
};
use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init {
        /// Create global config instead of local
        #[arg(long)]
        global: bool,

        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Show the merged configuration
    Show {
        /// Output as raw JSON (no formatting)
        #[arg(long)]
        raw: bool,

        /// Path to use as local directory (defaults to current dir)
        #[arg(long)]
        path: Option<PathBuf>,
    },

    /// Output the JSON Schema for catalogue.json
    Schema,

    /// Validate configuration and show warnings
    Validate {
        /// Path to use as local directory (defaults to current dir)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

pub fn execute(cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Init { global, force } => cmd_init(global, force),
        ConfigCommands::Show { raw, path } => cmd_show(raw, path),
        ConfigCommands::Schema => cmd_schema(),
        ConfigCommands::Validate { path } => cmd_validate(path),
    }
}

fn local_dir(path: Option<PathBuf>) -> Result<PathBuf> {
    match path {
        Some(p) => Ok(p),
        None => Ok(std::env::current_dir()?),
    }
}

fn cmd_init(global: bool, force: bool) -> Result<()> {
    let path = if global {
        global_config_path()?
    } else {
        local_config_path(&std::env::current_dir()?)
    };

    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists: {}\nUse --force to overwrite",
            path.display()
        );
    }

    let value = serde_json::to_value(CatalogueSettings::default())?;
    if force {
        write_pretty_json_atomic(&path, &value)
    } else {
        write_new_pretty_json_atomic(&path, &value)
    }
    .with_context(|| format!("Failed to write config to {}", path.display()))?;

    println!(
        "{} Created {}",
        "OK".green(),
        path.display().to_string().cyan()
    );
    Ok(())
}

fn cmd_show(raw: bool, path: Option<PathBuf>) -> Result<()> {
    let loaded = load_merged(&local_dir(path)?)?;

    for warning in &loaded.warnings {
        eprintln!("{} {warning}", "WARN".yellow());
    }

    if raw {
        println!("{}", serde_json::to_string(&loaded.config)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&loaded.config)?);
    }
    Ok(())
}

fn cmd_schema() -> Result<()> {
    println!("{}", catalogue_config::schema_json_pretty()?);
    Ok(())
}

fn cmd_validate(path: Option<PathBuf>) -> Result<()> {
    let loaded = load_merged(&local_dir(path)?)?;

    if loaded.warnings.is_empty() {
        println!("{} Configuration is valid", "OK".green());
    } else {
        println!(
            "{} Configuration has {} warning(s):",
            "WARN".yellow(),
            loaded.warnings.len()
        );
        for w in &loaded.warnings {
            println!("  - {w}");
        }
    }
    println!("\nConfig files:");
    println!("  Global: {}", loaded.paths.global.display());
    println!("  Local:  {}", loaded.paths.local.display());
    Ok(())
}
