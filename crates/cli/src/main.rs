//! MacPrice CLI - Database migrations and seeding.
//!
//! # Usage
//!
//! ```bash
//! # Create the documents table
//! macprice migrate
//!
//! # Insert the starter retailers
//! macprice seed retailers
//!
//! # Insert the starter MacBook models
//! macprice seed macbooks
//!
//! # Insert both
//! macprice seed all
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Insert starter catalogue data

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use commands::seed::SeedTarget;

mod commands;

#[derive(Parser)]
#[command(name = "macprice")]
#[command(author, version, about = "MacPrice CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Insert starter data
    Seed {
        #[command(subcommand)]
        target: SeedCommand,
    },
}

#[derive(Subcommand)]
enum SeedCommand {
    /// Seed Dutch and Belgian retailers
    Retailers,
    /// Seed the MacBook catalogue
    Macbooks,
    /// Seed retailers and MacBooks
    All,
}

impl From<SeedCommand> for SeedTarget {
    fn from(command: SeedCommand) -> Self {
        match command {
            SeedCommand::Retailers => Self::Retailers,
            SeedCommand::Macbooks => Self::Macbooks,
            SeedCommand::All => Self::All,
        }
    }
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
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { target } => {
            commands::seed::run(target.into()).await?;
        }
    }
    Ok(())
}
