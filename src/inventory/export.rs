//! Export functions for inventory records

use crate::error::{InvctlError, Result};
use tracing::info;

use super::types::ResourceRecord;

const CSV_HEADER: &str = "InstanceId,Name,Region,InstanceType,vCPUs,Architecture,MemoryGB,DiskGB,State,HourlyPriceUSD,AnnualCostUSD";

/// Export records to file or stdout
pub fn export_records(
    records: &[ResourceRecord],
    format: &str,
    file: Option<&str>,
) -> Result<()> {
    let rendered = match format {
        "csv" => generate_csv(records),
        "json" => serde_json::to_string_pretty(records)?,
        _ => {
            return Err(InvctlError::Validation {
                field: "format".to_string(),
                reason: format!("Unsupported export format: {}. Use 'csv' or 'json'", format),
            });
        }
    };

    if let Some(path) = file {
        std::fs::write(path, rendered)?;
        info!("Exported {} records to {}", records.len(), path);
        println!("Exported to {}", path);
    } else {
        print!("{}", rendered);
    }

    Ok(())
}

/// Quote a CSV field when it contains a comma, quote, or newline; internal
/// quotes are doubled.
pub fn escape_csv(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

pub fn generate_csv(records: &[ResourceRecord]) -> String {
    let mut csv = String::from(CSV_HEADER);
    csv.push('\n');

    for rec in records {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{:.2},{},{},{},{:.2}\n",
            escape_csv(&rec.id),
            escape_csv(&rec.display_name),
            escape_csv(&rec.region),
            escape_csv(&rec.instance_type),
            rec.cpu_count,
            escape_csv(&rec.cpu_architecture),
            rec.memory_gb,
            rec.disk_gb,
            escape_csv(&rec.state),
            rec.hourly_price,
            rec.annual_cost,
        ));
    }

    csv
}
