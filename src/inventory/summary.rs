//! Inventory rendering: grouped listing, table format, and summary totals

use crate::error::Result;
use crate::pricing::round2;
use chrono::Utc;
use comfy_table::{Cell, Table};
use console::{style, Style};
use std::collections::HashMap;

use super::types::{ListOptions, ResourceRecord};

/// Render the scan output in the requested format.
pub fn render_records(records: &[ResourceRecord], options: &ListOptions) -> Result<()> {
    if options.output_format == "json" {
        println!("{}", serde_json::to_string_pretty(records)?);
        return Ok(());
    }

    let mut view: Vec<&ResourceRecord> = records.iter().collect();

    if let Some(sort_field) = &options.sort {
        match sort_field.as_str() {
            "price" | "cost" => {
                view.sort_by(|a, b| {
                    b.hourly_price
                        .partial_cmp(&a.hourly_price)
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
            }
            "type" | "instance_type" => {
                view.sort_by(|a, b| a.instance_type.cmp(&b.instance_type));
            }
            "region" => {
                view.sort_by(|a, b| a.region.cmp(&b.region));
            }
            "state" => {
                view.sort_by(|a, b| a.state.cmp(&b.state));
            }
            _ => {}
        }
    }

    if let Some(limit) = options.limit {
        view.truncate(limit);
    }

    if options.format == "table" {
        return display_table_format(&view);
    }

    display_grouped(&view);
    Ok(())
}

fn state_style(state: &str) -> Style {
    match state {
        "running" => Style::new().green(),
        "stopped" => Style::new().yellow(),
        "terminated" => Style::new().red(),
        _ => Style::new(),
    }
}

/// Compact listing grouped by region, then instance type
fn display_grouped(records: &[&ResourceRecord]) {
    println!("{}", "=".repeat(80));
    println!("INVENTORY OVERVIEW");
    println!("{}", "=".repeat(80));

    let mut regions: Vec<&str> = Vec::new();
    for rec in records {
        if !regions.contains(&rec.region.as_str()) {
            regions.push(&rec.region);
        }
    }

    for region in &regions {
        let region_records: Vec<_> = records.iter().filter(|r| r.region == *region).collect();
        let region_hourly: f64 = region_records.iter().map(|r| r.hourly_price).sum();
        println!(
            "\n{} ({} instances, ${:.4}/hr)",
            style(region).bold().cyan(),
            region_records.len(),
            region_hourly
        );

        for rec in &region_records {
            println!(
                "  {}  {}  {}  {} vCPU / {:.2} GB / {} GB disk  ${:.4}/hr (${:.2}/yr)",
                rec.id,
                style(&rec.display_name).cyan(),
                state_style(&rec.state).apply_to(&rec.state),
                rec.cpu_count,
                rec.memory_gb,
                rec.disk_gb,
                rec.hourly_price,
                rec.annual_cost,
            );
            println!(
                "      {} {}  {} {}",
                style("type:").dim(),
                rec.instance_type,
                style("arch:").dim(),
                rec.cpu_architecture
            );
        }
    }

    let total_hourly: f64 = records.iter().map(|r| r.hourly_price).sum();
    let total_annual: f64 = records.iter().map(|r| r.annual_cost).sum();
    let running = records.iter().filter(|r| r.state == "running").count();

    println!("\n{}", "-".repeat(80));
    println!(
        "  {} {} instances across {} region(s) ({} running)",
        style("Total:").bold(),
        records.len(),
        regions.len(),
        running
    );
    println!(
        "  {} ${:.2}/hour  {} ${:.2}",
        style("Hourly cost:").dim(),
        total_hourly,
        style("Annual (24/7):").dim(),
        total_annual
    );
}

/// One comfy-table row per record
fn display_table_format(records: &[&ResourceRecord]) -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec![
        "Name", "ID", "Region", "Type", "vCPU", "Arch", "Mem GB", "Disk GB", "State", "$/hr",
        "$/yr",
    ]);

    for rec in records {
        let state_cell = match rec.state.as_str() {
            "running" => Cell::new(&rec.state).fg(comfy_table::Color::Green),
            "stopped" => Cell::new(&rec.state).fg(comfy_table::Color::Yellow),
            "terminated" => Cell::new(&rec.state).fg(comfy_table::Color::Red),
            _ => Cell::new(&rec.state),
        };

        table.add_row(vec![
            Cell::new(&rec.display_name),
            Cell::new(&rec.id),
            Cell::new(&rec.region),
            Cell::new(&rec.instance_type),
            Cell::new(rec.cpu_count),
            Cell::new(&rec.cpu_architecture),
            Cell::new(format!("{:.2}", rec.memory_gb)),
            Cell::new(rec.disk_gb),
            state_cell,
            Cell::new(format!("{:.4}", rec.hourly_price)),
            Cell::new(format!("{:.2}", rec.annual_cost)),
        ]);
    }

    println!("{}", table);
    Ok(())
}

/// Summary totals: counts by state, costs all vs running-only, type breakdown
pub fn show_summary(records: &[ResourceRecord], output_format: &str) -> Result<()> {
    let total_hourly: f64 = records.iter().map(|r| r.hourly_price).sum();
    let total_annual: f64 = records.iter().map(|r| r.annual_cost).sum();
    let running: Vec<_> = records.iter().filter(|r| r.state == "running").collect();
    let running_hourly: f64 = running.iter().map(|r| r.hourly_price).sum();
    let running_annual: f64 = running.iter().map(|r| r.annual_cost).sum();

    let mut state_counts: HashMap<&str, usize> = HashMap::new();
    for rec in records {
        *state_counts.entry(rec.state.as_str()).or_default() += 1;
    }

    if output_format == "json" {
        let summary = serde_json::json!({
            "timestamp": Utc::now().to_rfc3339(),
            "instance_count": records.len(),
            "running_count": running.len(),
            "hourly_cost_all": round2(total_hourly),
            "annual_cost_all": round2(total_annual),
            "hourly_cost_running": round2(running_hourly),
            "annual_cost_running": round2(running_annual),
            "states": state_counts,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", "=".repeat(80));
    println!("Inventory Summary");
    println!("{}", "=".repeat(80));
    println!("Timestamp: {}", Utc::now().format("%Y-%m-%d %H:%M:%S UTC"));
    println!();
    println!("Instances: {} total", records.len());

    let mut states: Vec<_> = state_counts.iter().collect();
    states.sort();
    for (state, count) in states {
        println!("  {}: {}", state_style(state).apply_to(state), count);
    }

    println!();
    println!("COST (all instances, 24/7):");
    println!("  hourly: ${:.2}/hour", total_hourly);
    println!("  annual: ${:.2}", total_annual);
    println!("COST (running only, 24/7):");
    println!("  hourly: ${:.2}/hour", running_hourly);
    println!("  annual: ${:.2}", running_annual);

    let mut type_breakdown: HashMap<String, (usize, f64)> = HashMap::new();
    for rec in records {
        let entry = type_breakdown
            .entry(rec.instance_type.clone())
            .or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += rec.hourly_price;
    }

    if !type_breakdown.is_empty() {
        println!();
        println!("Breakdown by Instance Type:");
        let mut type_keys: Vec<_> = type_breakdown.keys().collect();
        type_keys.sort();
        for instance_type in type_keys {
            let (count, hourly) = &type_breakdown[instance_type];
            println!(
                "  {}: {} instance(s), ${:.4}/hr",
                style(instance_type).cyan(),
                count,
                hourly
            );
        }
    }

    Ok(())
}
