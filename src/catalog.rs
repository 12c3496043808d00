//! Cloud catalog trait: the external service contracts the pipeline depends on
//!
//! Everything the collector needs from the provider goes through this trait:
//! region enumeration, paginated resource listing, attached-volume sizing,
//! instance-type specs, and the on-demand price catalog. The production
//! implementation lives in `src/aws.rs`; tests inject hand-written fakes.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One resource as it appears in the listing payload.
///
/// Every field is optional; the collector substitutes sentinel values
/// (`"N/A"`, `"unknown"`) for anything absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawResource {
    pub id: Option<String>,
    pub name: Option<String>,
    pub instance_type: Option<String>,
    pub state: Option<String>,
    pub architecture: Option<String>,
}

/// One page of a resource listing.
///
/// A `Some` continuation token means more pages exist; the collector stops
/// only when the token is absent.
#[derive(Debug, Clone, Default)]
pub struct ResourcePage {
    pub resources: Vec<RawResource>,
    pub next_token: Option<String>,
}

/// Hardware specification for an instance type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HardwareSpec {
    pub vcpus: i32,
    pub memory_gb: f64,
}

/// Trait abstracting the cloud provider's listing and catalog APIs
#[async_trait]
pub trait CloudCatalog: Send + Sync {
    /// List the regions enabled for this account, in the provider's order.
    ///
    /// An error here is fatal to the whole collection; there is no
    /// meaningful partial result without knowing which regions exist.
    async fn list_enabled_regions(&self) -> Result<Vec<String>>;

    /// Fetch one page of resources for a region.
    async fn list_resources_page(
        &self,
        region: &str,
        next_token: Option<String>,
        page_size: i32,
    ) -> Result<ResourcePage>;

    /// Sizes (GiB) of all volumes attached to a resource.
    async fn list_attached_volumes(&self, region: &str, resource_id: &str) -> Result<Vec<i64>>;

    /// Hardware spec for an instance type; `Ok(None)` when the catalog has
    /// no entry for it.
    async fn lookup_spec(&self, instance_type: &str) -> Result<Option<HardwareSpec>>;

    /// On-demand hourly USD price for (price-catalog region name, instance
    /// type, operating system); `Ok(None)` when no priced product matches.
    async fn lookup_price(
        &self,
        price_region: &str,
        instance_type: &str,
        os: &str,
    ) -> Result<Option<f64>>;
}
