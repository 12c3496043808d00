//! On-demand pricing: price cache, catalog region names, cost derivation
//!
//! The price catalog indexes regions by human location name rather than
//! region code, so lookups go through `price_region_name` first. Prices are
//! memoized per (region, instance type, OS) for the process's duration.

use crate::catalog::CloudCatalog;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::warn;

/// Hours in a year under the continuous-operation assumption
const HOURS_PER_YEAR: f64 = 24.0 * 365.0;

/// Round to 2 decimal places
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// MiB as reported by the provider, converted to GB with 2-place rounding
pub fn mib_to_gb(mib: i64) -> f64 {
    round2(mib as f64 / 1024.0)
}

/// Annual cost of a resource assuming 24/7 operation regardless of state.
///
/// The summary renderer separates "all" vs "running only" totals; this
/// function does not.
pub fn annual_cost(hourly_price: f64) -> f64 {
    round2(hourly_price * HOURS_PER_YEAR)
}

/// Map a region code to the price catalog's location name.
///
/// Unknown codes pass through unchanged so an unmapped region still attempts
/// a catalog query with the raw code rather than failing closed.
pub fn price_region_name(region: &str) -> &str {
    match region {
        "us-east-1" => "US East (N. Virginia)",
        "us-east-2" => "US East (Ohio)",
        "us-west-1" => "US West (N. California)",
        "us-west-2" => "US West (Oregon)",
        "af-south-1" => "Africa (Cape Town)",
        "ap-east-1" => "Asia Pacific (Hong Kong)",
        "ap-south-1" => "Asia Pacific (Mumbai)",
        "ap-northeast-1" => "Asia Pacific (Tokyo)",
        "ap-northeast-2" => "Asia Pacific (Seoul)",
        "ap-northeast-3" => "Asia Pacific (Osaka)",
        "ap-southeast-1" => "Asia Pacific (Singapore)",
        "ap-southeast-2" => "Asia Pacific (Sydney)",
        "ap-southeast-3" => "Asia Pacific (Jakarta)",
        "ca-central-1" => "Canada (Central)",
        "eu-central-1" => "EU (Frankfurt)",
        "eu-west-1" => "EU (Ireland)",
        "eu-west-2" => "EU (London)",
        "eu-west-3" => "EU (Paris)",
        "eu-north-1" => "EU (Stockholm)",
        "eu-south-1" => "EU (Milan)",
        "me-south-1" => "Middle East (Bahrain)",
        "sa-east-1" => "South America (Sao Paulo)",
        other => other,
    }
}

/// Fetch-on-miss cache over [`CloudCatalog::lookup_price`].
///
/// Keyed by `region:instance_type:os`. Same locking discipline as
/// [`crate::specs::SpecCache`]: concurrent misses may duplicate a lookup,
/// failures are returned as `0.0` and never cached.
#[derive(Default)]
pub struct PriceCache {
    entries: Mutex<HashMap<String, f64>>,
}

impl PriceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// On-demand hourly USD price, fetching on miss. `0.0` signals not found.
    pub async fn get(
        &self,
        catalog: &dyn CloudCatalog,
        region: &str,
        instance_type: &str,
        os: &str,
    ) -> f64 {
        let key = format!("{}:{}:{}", region, instance_type, os);
        if let Some(price) = self.entries.lock().unwrap().get(&key) {
            return *price;
        }

        let location = price_region_name(region);
        match catalog.lookup_price(location, instance_type, os).await {
            Ok(Some(price)) => {
                self.entries.lock().unwrap().insert(key, price);
                price
            }
            Ok(None) => {
                warn!(
                    "No price found for {} in {} ({})",
                    instance_type, region, os
                );
                0.0
            }
            Err(e) => {
                warn!(
                    "Price lookup failed for {} in {}: {}",
                    instance_type, region, e
                );
                0.0
            }
        }
    }

    /// Number of cached prices (test hook).
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
