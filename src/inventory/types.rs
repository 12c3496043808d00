//! Type definitions for the inventory pipeline
//!
//! The enriched record every collector produces, and the option structs the
//! CLI passes down to listing and export.

use serde::{Deserialize, Serialize};

/// Fully-enriched inventory record, immutable after construction.
///
/// Every field has a defined fallback (`"N/A"`, `"unknown"`, `0`); a record
/// is never dropped for partial data. A zero price or vCPU count is
/// indistinguishable from a failed lookup; that ambiguity is part of the
/// record format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub id: String,
    pub display_name: String,
    pub region: String,
    pub instance_type: String,
    pub cpu_count: i32,
    pub cpu_architecture: String,
    pub memory_gb: f64,
    pub disk_gb: i64,
    pub state: String,
    pub hourly_price: f64,
    pub annual_cost: f64,
}

/// Options for the scan listing
#[derive(Debug, Clone)]
pub struct ListOptions {
    pub format: String,
    pub sort: Option<String>,
    pub limit: Option<usize>,
    pub output_format: String,
}

/// Options for export
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub format: String,
    pub file: Option<String>,
}
