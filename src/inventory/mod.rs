//! Inventory module
//!
//! Command surface and the enrichment pipeline behind it: collect every
//! enabled region's instances, join against spec and price lookups, and
//! render or export the result.

pub mod collector;
pub mod export;
pub mod summary;
pub mod types;

pub use collector::InventoryCollector;

use crate::aws::AwsCatalog;
use crate::config::Config;
use crate::error::Result;
use clap::Subcommand;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;

use types::{ExportOptions, ListOptions, ResourceRecord};

#[derive(Subcommand, Clone)]
pub enum InventoryCommands {
    /// Scan all enabled regions and list enriched instances
    Scan {
        /// Output format (compact, table)
        #[arg(long, default_value = "compact")]
        format: String,
        /// Sort by field (price, type, region, state)
        #[arg(long)]
        sort: Option<String>,
        /// Limit number of results
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Export the inventory (csv, json)
    Export {
        /// Export format
        #[arg(long, default_value = "csv")]
        format: String,
        /// Output file (stdout if omitted)
        #[arg(long)]
        file: Option<String>,
    },
    /// Show inventory totals and cost summary
    Summary,
}

pub async fn handle_command(
    cmd: InventoryCommands,
    config: &Config,
    output_format: &str,
) -> Result<()> {
    let records = collect(config).await?;

    match cmd {
        InventoryCommands::Scan {
            format,
            sort,
            limit,
        } => {
            let options = ListOptions {
                format,
                sort,
                limit,
                output_format: output_format.to_string(),
            };
            summary::render_records(&records, &options)
        }
        InventoryCommands::Export { format, file } => {
            let options = ExportOptions { format, file };
            export::export_records(&records, &options.format, options.file.as_deref())
        }
        InventoryCommands::Summary => summary::show_summary(&records, output_format),
    }
}

/// Run the full collection behind a spinner.
async fn collect(config: &Config) -> Result<Vec<ResourceRecord>> {
    let catalog = Arc::new(AwsCatalog::new(&config.aws.name_tag).await);
    let collector = InventoryCollector::new(catalog, &config.aws.os, config.aws.page_size);

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.set_message("Scanning enabled regions...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = collector.collect_all().await;
    match &result {
        Ok(records) => pb.finish_with_message(format!("Collected {} instances", records.len())),
        Err(_) => pb.finish_with_message("Collection failed"),
    }

    result
}
