//! Config command - manage configuration.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;

use intake_core::IntakeConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Write a configuration file with default values
    Init {
        /// Output path (default: the platform config directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print one value, addressed by dotted key (e.g. "server.port")
    Get {
        key: String,
    },

    /// Show the configuration file path
    Path,
}

pub fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let config = load_config(config_path)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigCommand::Init { output, force } => {
            let path = output
                .or_else(|| config_path.map(PathBuf::from))
                .unwrap_or_else(default_config_path);
            init_config(&path, force)?;
        }
        ConfigCommand::Get { key } => {
            let config = load_config(config_path)?;
            println!("{}", lookup_key(&config, &key)?);
        }
        ConfigCommand::Path => show_path(config_path),
    }

    Ok(())
}

/// Platform location of the config file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("intake")
        .join("config.json")
}

/// Load configuration. An explicit path must exist; the default path falls
/// back to built-in defaults when absent.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<IntakeConfig> {
    let config = match config_path {
        Some(path) => IntakeConfig::from_file(Path::new(path))?,
        None => IntakeConfig::load_or_default(&default_config_path())?,
    };
    Ok(config)
}

fn init_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    IntakeConfig::default().save(path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        path.display()
    );
    Ok(())
}

fn lookup_key(config: &IntakeConfig, key: &str) -> anyhow::Result<String> {
    let json = serde_json::to_value(config)?;
    let pointer = format!("/{}", key.replace('.', "/"));

    let value = json
        .pointer(&pointer)
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;

    Ok(match value {
        serde_json::Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other)?,
    })
}

fn show_path(config_path: Option<&str>) {
    let path = config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    println!("Configuration file: {}", path.display());
    if path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'intake config init' to create a configuration file.");
    }
}
