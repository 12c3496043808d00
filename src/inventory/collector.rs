//! Per-region collection and cross-region fan-out
//!
//! The enrichment pipeline: page through a region's resource listing, join
//! each resource against the spec and price caches plus an attached-volume
//! lookup, and emit fully-populated records. Region enumeration failure is
//! the only error that escapes; everything below it degrades to sentinel
//! values and keeps going.

use crate::catalog::{CloudCatalog, RawResource};
use crate::error::Result;
use crate::pricing::{annual_cost, PriceCache};
use crate::specs::SpecCache;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{info, warn};

use super::types::ResourceRecord;

/// Sentinel for absent identifiers and labels
const NOT_AVAILABLE: &str = "N/A";
/// Sentinel for absent type, state, and architecture
const UNKNOWN: &str = "unknown";

pub struct InventoryCollector {
    catalog: Arc<dyn CloudCatalog>,
    specs: SpecCache,
    prices: PriceCache,
    os: String,
    page_size: i32,
}

impl InventoryCollector {
    pub fn new(catalog: Arc<dyn CloudCatalog>, os: &str, page_size: i32) -> Self {
        Self {
            catalog,
            specs: SpecCache::new(),
            prices: PriceCache::new(),
            os: os.to_string(),
            page_size: page_size.clamp(1, 1000),
        }
    }

    /// Collect enriched records for every enabled region.
    ///
    /// One concurrent task per region, joined before returning; output order
    /// is region-listing order, then intra-region listing order. Only region
    /// enumeration failure propagates.
    pub async fn collect_all(&self) -> Result<Vec<ResourceRecord>> {
        let regions = self.catalog.list_enabled_regions().await?;
        info!("Collecting inventory across {} regions", regions.len());

        let tasks = regions.iter().map(|region| self.collect_region(region));
        let per_region = join_all(tasks).await;

        Ok(per_region.into_iter().flatten().collect())
    }

    /// Collect enriched records for one region.
    ///
    /// Infallible by contract: a listing-page failure truncates this
    /// region's output to whatever was accumulated; per-resource lookup
    /// failures degrade the affected field only.
    pub async fn collect_region(&self, region: &str) -> Vec<ResourceRecord> {
        let mut records = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let page = match self
                .catalog
                .list_resources_page(region, next_token.take(), self.page_size)
                .await
            {
                Ok(page) => page,
                Err(e) => {
                    warn!("Listing failed in {}, keeping partial results: {}", region, e);
                    return records;
                }
            };

            for raw in &page.resources {
                records.push(self.enrich(region, raw).await);
            }

            match page.next_token {
                Some(token) => next_token = Some(token),
                None => break,
            }
        }

        records
    }

    /// Resolve one raw resource into a fully-populated record.
    async fn enrich(&self, region: &str, raw: &RawResource) -> ResourceRecord {
        let id = raw.id.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string());
        let display_name = raw.name.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string());
        let instance_type = raw
            .instance_type
            .clone()
            .unwrap_or_else(|| UNKNOWN.to_string());
        let state = raw.state.clone().unwrap_or_else(|| UNKNOWN.to_string());
        let cpu_architecture = raw
            .architecture
            .clone()
            .unwrap_or_else(|| UNKNOWN.to_string());

        let spec = self.specs.get(self.catalog.as_ref(), &instance_type).await;

        // A resource with no id cannot be the subject of an attachment
        // filter; it gets the same zero a failed lookup would produce.
        let disk_gb = if id == NOT_AVAILABLE {
            0
        } else {
            match self.catalog.list_attached_volumes(region, &id).await {
                Ok(sizes) => sizes.iter().sum(),
                Err(e) => {
                    warn!("Volume lookup failed for {}: {}", id, e);
                    0
                }
            }
        };

        let hourly_price = self
            .prices
            .get(self.catalog.as_ref(), region, &instance_type, &self.os)
            .await;

        ResourceRecord {
            annual_cost: annual_cost(hourly_price),
            id,
            display_name,
            region: region.to_string(),
            instance_type,
            cpu_count: spec.vcpus,
            cpu_architecture,
            memory_gb: spec.memory_gb,
            disk_gb,
            state,
            hourly_price,
        }
    }
}
