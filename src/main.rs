use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use invctl::config::{self, Config};
use invctl::inventory;

#[derive(Parser)]
#[command(name = "invctl")]
#[command(
    about = "Cross-region EC2 inventory with hardware specs and on-demand pricing",
    long_about = "invctl inventories EC2 instances across every enabled region of an AWS account.\n\nEach instance is enriched with:\n  - Hardware spec (vCPU count, memory)\n  - Attached EBS storage total\n  - On-demand hourly price and projected annual cost\n\nOutput as a grouped report, a table, a cost summary, or a CSV/JSON export."
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(long, global = true, default_value = "text")]
    output: String,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Inventory(inventory::InventoryCommands),
    /// Initialize configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = ".invctl.toml")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Suppress INFO by default, only show warnings and errors
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Inventory(subcommand) => {
            inventory::handle_command(subcommand, &config, &cli.output).await?;
        }
        Commands::Init { output } => {
            config::init_config(&output)?;
        }
    }

    Ok(())
}
