//! Wrenfield Antiques CLI - catalog seeding and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Seed the CMS from a YAML fixture
//! wrenfield-cli seed -f crates/cli/seed/catalog.yaml
//!
//! # Verify the CMS is reachable and the catalog is sane
//! wrenfield-cli check
//!
//! # Delete media records and their stored files
//! wrenfield-cli purge-media 66f1a2b3c4d5e6f7a8b9c0d1
//! ```
//!
//! # Commands
//!
//! - `seed` - Load demo catalog data into the CMS
//! - `check` - Ping the CMS and print catalog counts
//! - `purge-media` - Delete media records and their files from object storage

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "wrenfield-cli")]
#[command(author, version, about = "Wrenfield Antiques CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the CMS with catalog data from a YAML fixture
    Seed {
        /// Path to the YAML fixture file
        #[arg(short, long, default_value = "crates/cli/seed/catalog.yaml")]
        file: String,
    },
    /// Verify CMS connectivity and print catalog counts
    Check,
    /// Delete media records and their stored files
    PurgeMedia {
        /// Media record ids to purge
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed { file } => commands::seed::catalog(&file).await?,
        Commands::Check => commands::check::run().await?,
        Commands::PurgeMedia { ids } => commands::purge::run(&ids).await?,
    }
    Ok(())
}
