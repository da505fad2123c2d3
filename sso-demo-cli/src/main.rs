//! SSO Demo CLI
//!
//! Command-line host for the SSO application registry: registers applications
//! from a manifest and prints the callback URLs a login broadcaster would call.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sso_registry::RegistryConfig;
use std::path::{Path, PathBuf};

mod commands;
mod ui;

#[derive(Parser)]
#[command(name = "sso-demo")]
#[command(about = "SSO Demo CLI - register federation apps and list broadcast URLs", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Registry configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Accept the legacy `http://` and `https//` prefixes instead of the defaults
    #[arg(long, global = true, conflicts_with = "config")]
    legacy_schemes: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate one application and print its token
    Token {
        /// Application name
        #[arg(short, long)]
        name: String,

        /// Callback API URL
        #[arg(short, long)]
        api_url: String,
    },

    /// Register every application in a manifest and report the outcome
    Register {
        /// JSON array of `{"name": ..., "apiUrl": ...}` records
        #[arg(short, long)]
        manifest: PathBuf,
    },

    /// Register a manifest and print the broadcast URLs
    Broadcast {
        /// JSON array of `{"name": ..., "apiUrl": ...}` records
        #[arg(short, long)]
        manifest: PathBuf,

        /// Print the URLs as a JSON array
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("sso_demo_cli=debug,sso_registry=debug")
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("sso_demo_cli=info,sso_registry=warn")
            .with_writer(std::io::stderr)
            .init();
    }

    let config = load_config(cli.config.as_deref(), cli.legacy_schemes)?;
    tracing::debug!(?config, "registry configuration");

    // Dispatch commands
    match cli.command {
        Commands::Token { name, api_url } => {
            commands::token::run(config, name, api_url, cli.verbose)?;
        }
        Commands::Register { manifest } => {
            commands::register::run(config, &manifest, cli.verbose)?;
        }
        Commands::Broadcast { manifest, json } => {
            commands::broadcast::run(config, &manifest, json, cli.verbose)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>, legacy_schemes: bool) -> Result<RegistryConfig> {
    if legacy_schemes {
        return Ok(RegistryConfig::legacy());
    }
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            RegistryConfig::from_json(&raw)
                .with_context(|| format!("Invalid config {}", path.display()))
        }
        None => Ok(RegistryConfig::default()),
    }
}
