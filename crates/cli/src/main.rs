//! Packed CLI — the main entry point.
//!
//! Commands:
//! - `onboard` — Write a starter config file
//! - `status`  — Show the effective configuration
//! - `suggest` — Show suggested items for a temperature
//! - `lists`   — Show saved packing lists
//! - `items`   — Show the items of a saved list
//! - `create`  — Build a packing list for a trip and save it

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "packed",
    about = "Packed — plan and save travel packing lists",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file to ~/.packed/config.toml
    Onboard,

    /// Show the effective configuration
    Status,

    /// Show suggested items for a destination temperature (°F)
    Suggest {
        #[arg(short, long, allow_negative_numbers = true)]
        temperature: f64,
    },

    /// List your saved packing lists
    Lists,

    /// Show the items of a saved packing list
    Items {
        /// Packing list id
        id: i64,
    },

    /// Build a packing list for a trip and save it
    Create {
        #[arg(long)]
        city: String,

        #[arg(long)]
        country: String,

        /// Departure date (YYYY-MM-DD)
        #[arg(long)]
        departure: NaiveDate,

        /// Return date (YYYY-MM-DD)
        #[arg(long = "return")]
        return_date: NaiveDate,

        /// Country you are travelling from
        #[arg(long)]
        origin: Option<String>,

        /// Destination temperature (°F); links items to suggestions
        #[arg(short, long, allow_negative_numbers = true)]
        temperature: Option<f64>,

        /// Item to pack, as NAME or NAME:QTY (repeatable)
        #[arg(short, long = "item", value_name = "NAME[:QTY]")]
        items: Vec<String>,

        /// Delete the list again if its items cannot be saved
        #[arg(long)]
        rollback: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Status => commands::status::run().await?,
        Commands::Suggest { temperature } => commands::suggest::run(temperature).await?,
        Commands::Lists => commands::lists::run().await?,
        Commands::Items { id } => commands::lists::run_items(id).await?,
        Commands::Create {
            city,
            country,
            departure,
            return_date,
            origin,
            temperature,
            items,
            rollback,
        } => {
            commands::create::run(commands::create::CreateArgs {
                city,
                country,
                departure,
                return_date,
                origin,
                temperature,
                items,
                rollback,
            })
            .await?
        }
    }

    Ok(())
}
