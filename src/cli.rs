// CLI module - command-line argument parsing and handlers
//
// Subcommands:
// - config --show/--reset/--edit/--update/--path: configuration management
// - url <NAME>: print the lookup link for a display name
// - replay <SCRIPT>: run a recorded session through the plugin

use crate::config::{Config, VERSION};
use crate::logging::LogBuffer;
use crate::plugin::{LinkBuilder, LookupPlugin};
use crate::replay::{self, ReplayScript, Replayer};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

/// Platinum Lookup - price lookups from in-game menus
#[derive(Parser)]
#[command(name = "platinum-lookup")]
#[command(version = VERSION)]
#[command(about = "Price lookup tool for game client menus", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Open config file in $EDITOR
        #[arg(long)]
        edit: bool,

        /// Update config with new defaults (preserves user values)
        #[arg(long)]
        update: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },

    /// Print the lookup URL for an item, NPC or object name
    Url {
        /// Display name, markup allowed (e.g. "Amulet of glory(4)")
        name: String,
    },

    /// Replay a recorded session and report what the plugin did
    Replay {
        /// JSON script: {"world": {...}, "events": [...]}
        script: PathBuf,

        /// Write JSON Lines here instead of stdout
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
}

/// Handle `config` subcommands. These run before config is loaded so a
/// broken config file can still be located, reset or edited.
pub fn handle_config(show: bool, reset: bool, edit: bool, update: bool, path: bool) -> Result<()> {
    if path {
        handle_config_path()
    } else if show {
        handle_config_show()
    } else if reset {
        handle_config_reset()
    } else if edit {
        handle_config_edit()
    } else if update {
        handle_config_update()
    } else {
        println!("Usage: platinum-lookup config [--show|--reset|--edit|--update|--path]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --reset   Reset config file to defaults");
        println!("  --edit    Open config file in $EDITOR");
        println!("  --update  Update config with new defaults (preserves user values)");
        println!("  --path    Show config file path");
        Ok(())
    }
}

/// Handle `url`
pub fn handle_url(config: &Config, name: &str) -> Result<()> {
    let links = LinkBuilder::new(config.lookup_base_url.clone());
    println!("{}", links.build_lookup_url(name));
    Ok(())
}

/// Handle `replay`
pub fn handle_replay(
    config: &Config,
    script: &std::path::Path,
    out: Option<&std::path::Path>,
    notes: &LogBuffer,
) -> Result<()> {
    let script = ReplayScript::load(script)?;
    tracing::info!(events = script.events.len(), "Replaying session");

    let records = Replayer::new(LookupPlugin::from_config(config))
        .with_notes(notes)
        .run(script);

    match out {
        Some(path) => {
            replay::write_report(&records, path)?;
            eprintln!("Wrote {} records to {}", records.len(), path.display());
            Ok(())
        }
        None => replay::write_jsonl(&records, std::io::stdout().lock()),
    }
}

fn config_path() -> Result<PathBuf> {
    Config::config_path().context("Could not determine config path")
}

fn handle_config_path() -> Result<()> {
    println!("{}", config_path()?.display());
    Ok(())
}

fn handle_config_show() -> Result<()> {
    let config = Config::from_env()?;

    println!("# Effective configuration (env > file > defaults)");
    println!();
    println!("lookup_base_url = {:?}", config.lookup_base_url);
    println!();
    println!("[augmentation]");
    println!("quest_guides = {}", config.augmentation.quest_guides);
    println!("diary_prices = {}", config.augmentation.diary_prices);
    println!("skill_prices = {}", config.augmentation.skill_prices);
    println!(
        "suppress_unsupported_widgets = {}",
        config.augmentation.suppress_unsupported_widgets
    );
    println!();
    println!("[logging]");
    println!("level = {:?}", config.logging.level);
    println!("file_enabled = {}", config.logging.file_enabled);
    println!("file_dir = {:?}", config.logging.file_dir.display().to_string());
    println!("file_rotation = {:?}", config.logging.file_rotation.as_str());
    println!("file_prefix = {:?}", config.logging.file_prefix);

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
    Ok(())
}

fn handle_config_reset() -> Result<()> {
    let path = config_path()?;

    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    Config::default()
        .save()
        .with_context(|| format!("Error writing config {}", path.display()))?;

    println!("Config reset to defaults: {}", path.display());
    Ok(())
}

fn handle_config_edit() -> Result<()> {
    let path = config_path()?;

    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
    }

    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(windows) {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    println!("Opening {} with {}", path.display(), editor);

    let status = Command::new(&editor).arg(&path).status().with_context(|| {
        format!(
            "Failed to launch editor '{}'. Set $EDITOR to your preferred editor",
            editor
        )
    })?;

    if !status.success() {
        bail!("Editor exited with status: {}", status);
    }
    Ok(())
}

fn handle_config_update() -> Result<()> {
    let path = config_path()?;

    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
        return Ok(());
    }

    // Regenerate from the effective config so user values survive
    let updated = Config::from_env()?.to_toml();

    let backup_path = path.with_extension("toml.bak");
    match std::fs::copy(&path, &backup_path) {
        Ok(_) => println!("Backup created: {}", backup_path.display()),
        Err(e) => eprintln!("Warning: Could not create backup: {}", e),
    }

    std::fs::write(&path, updated)
        .with_context(|| format!("Error writing config {}", path.display()))?;

    println!("Config updated with latest structure: {}", path.display());
    println!("Your values have been preserved.");
    Ok(())
}
