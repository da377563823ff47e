//! Dealerdesk CLI - database migrations and operator directory tools.
//!
//! # Usage
//!
//! ```bash
//! # Run shell database migrations
//! dealerdesk-cli migrate
//!
//! # Validate an operator directory
//! dealerdesk-cli operators check operators.yaml
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "dealerdesk-cli")]
#[command(author, version, about = "Dealerdesk CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage the operator directory
    Operators {
        #[command(subcommand)]
        action: OperatorsAction,
    },
}

#[derive(Subcommand)]
enum OperatorsAction {
    /// Validate a directory file and summarise it by role
    Check {
        /// Path to the YAML directory
        #[arg(default_value = "operators.yaml")]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
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
        Commands::Operators { action } => match action {
            OperatorsAction::Check { file } => {
                commands::operators::check(&file)?;
            }
        },
    }
    Ok(())
}
