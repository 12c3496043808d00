//! AWS implementation of the cloud catalog
//!
//! EC2 clients are derived per region from one shared `SdkConfig`; the
//! pricing client is pinned to us-east-1 because the price catalog is only
//! served from there; the region being scanned enters the query as the
//! `location` filter, not as the endpoint.

use crate::catalog::{CloudCatalog, HardwareSpec, RawResource, ResourcePage};
use crate::error::{InvctlError, Result};
use crate::pricing::mib_to_gb;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_ec2::config::Region;
use aws_sdk_ec2::Client as Ec2Client;
use aws_sdk_pricing::types::{Filter as PricingFilter, FilterType};
use aws_sdk_pricing::Client as PricingClient;
use tracing::debug;

/// The price catalog lives in us-east-1 regardless of the scanned region
const PRICING_ENDPOINT_REGION: &str = "us-east-1";

pub struct AwsCatalog {
    base: aws_config::SdkConfig,
    ec2: Ec2Client,
    pricing: PricingClient,
    name_tag: String,
}

impl AwsCatalog {
    /// Build a catalog from the default credential/region chain.
    pub async fn new(name_tag: &str) -> Self {
        let base = aws_config::load_defaults(BehaviorVersion::latest()).await;
        Self::from_config(base, name_tag)
    }

    pub fn from_config(base: aws_config::SdkConfig, name_tag: &str) -> Self {
        let ec2 = Ec2Client::new(&base);
        let pricing_conf = aws_sdk_pricing::config::Builder::from(&base)
            .region(Region::new(PRICING_ENDPOINT_REGION))
            .build();
        let pricing = PricingClient::from_conf(pricing_conf);
        Self {
            base,
            ec2,
            pricing,
            name_tag: name_tag.to_string(),
        }
    }

    /// EC2 client scoped to a specific region
    fn ec2_for_region(&self, region: &str) -> Ec2Client {
        let conf = aws_sdk_ec2::config::Builder::from(&self.base)
            .region(Region::new(region.to_string()))
            .build();
        Ec2Client::from_conf(conf)
    }

    fn term_match(field: &str, value: &str) -> Result<PricingFilter> {
        PricingFilter::builder()
            .r#type(FilterType::TermMatch)
            .field(field)
            .value(value)
            .build()
            .map_err(|e| InvctlError::Aws(format!("Failed to build pricing filter: {}", e)))
    }
}

/// Walk a priced product document down to its on-demand USD rate.
///
/// The structure is terms -> OnDemand -> price dimensions -> price per unit,
/// with opaque SKU-derived keys at two levels; the first key is taken at
/// each level with no disambiguation.
pub(crate) fn extract_on_demand_usd(doc: &serde_json::Value) -> Option<f64> {
    let on_demand = doc.get("terms")?.get("OnDemand")?.as_object()?;
    let (_, term) = on_demand.iter().next()?;
    let dimensions = term.get("priceDimensions")?.as_object()?;
    let (_, dimension) = dimensions.iter().next()?;
    let usd = dimension.get("pricePerUnit")?.get("USD")?.as_str()?;
    usd.parse::<f64>().ok()
}

#[async_trait]
impl CloudCatalog for AwsCatalog {
    async fn list_enabled_regions(&self) -> Result<Vec<String>> {
        // The default call shape returns only account-enabled regions
        let response = self
            .ec2
            .describe_regions()
            .send()
            .await
            .map_err(|e| InvctlError::Aws(format!("Failed to list regions: {}", e)))?;

        Ok(response
            .regions()
            .iter()
            .filter_map(|r| r.region_name().map(|s| s.to_string()))
            .collect())
    }

    async fn list_resources_page(
        &self,
        region: &str,
        next_token: Option<String>,
        page_size: i32,
    ) -> Result<ResourcePage> {
        let client = self.ec2_for_region(region);
        let response = client
            .describe_instances()
            .max_results(page_size)
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| {
                InvctlError::Aws(format!("Failed to list instances in {}: {}", region, e))
            })?;

        let mut resources = Vec::new();
        for reservation in response.reservations() {
            for instance in reservation.instances() {
                let name = instance
                    .tags()
                    .iter()
                    .find(|t| t.key() == Some(self.name_tag.as_str()))
                    .and_then(|t| t.value())
                    .map(|v| v.to_string());

                resources.push(RawResource {
                    id: instance.instance_id().map(|s| s.to_string()),
                    name,
                    instance_type: instance.instance_type().map(|t| t.as_str().to_string()),
                    state: instance
                        .state()
                        .and_then(|s| s.name())
                        .map(|s| s.as_str().to_string()),
                    architecture: instance.architecture().map(|a| a.as_str().to_string()),
                });
            }
        }

        Ok(ResourcePage {
            resources,
            next_token: response.next_token().map(|s| s.to_string()),
        })
    }

    async fn list_attached_volumes(&self, region: &str, resource_id: &str) -> Result<Vec<i64>> {
        let client = self.ec2_for_region(region);
        let response = client
            .describe_volumes()
            .filters(
                aws_sdk_ec2::types::Filter::builder()
                    .name("attachment.instance-id")
                    .values(resource_id)
                    .build(),
            )
            .send()
            .await
            .map_err(|e| {
                InvctlError::Aws(format!("Failed to list volumes for {}: {}", resource_id, e))
            })?;

        Ok(response
            .volumes()
            .iter()
            .filter_map(|v| v.size().map(|s| s as i64))
            .collect())
    }

    async fn lookup_spec(&self, instance_type: &str) -> Result<Option<HardwareSpec>> {
        let response = self
            .ec2
            .describe_instance_types()
            .instance_types(instance_type.into())
            .send()
            .await
            .map_err(|e| {
                InvctlError::Aws(format!("Failed to describe type {}: {}", instance_type, e))
            })?;

        let Some(info) = response.instance_types().first() else {
            return Ok(None);
        };

        let vcpus = info
            .v_cpu_info()
            .and_then(|v| v.default_v_cpus())
            .unwrap_or(0);
        let memory_gb = info
            .memory_info()
            .and_then(|m| m.size_in_mi_b())
            .map(mib_to_gb)
            .unwrap_or(0.0);

        Ok(Some(HardwareSpec { vcpus, memory_gb }))
    }

    async fn lookup_price(
        &self,
        price_region: &str,
        instance_type: &str,
        os: &str,
    ) -> Result<Option<f64>> {
        let response = self
            .pricing
            .get_products()
            .service_code("AmazonEC2")
            .filters(Self::term_match("instanceType", instance_type)?)
            .filters(Self::term_match("location", price_region)?)
            .filters(Self::term_match("operatingSystem", os)?)
            .filters(Self::term_match("tenancy", "Shared")?)
            .filters(Self::term_match("preInstalledSw", "NA")?)
            .filters(Self::term_match("capacityStatus", "Used")?)
            .max_results(1)
            .send()
            .await
            .map_err(|e| {
                InvctlError::Aws(format!(
                    "Failed to query price for {} in {}: {}",
                    instance_type, price_region, e
                ))
            })?;

        let Some(product) = response.price_list().first() else {
            debug!("No priced product for {} in {}", instance_type, price_region);
            return Ok(None);
        };

        let doc: serde_json::Value = serde_json::from_str(product)?;
        Ok(extract_on_demand_usd(&doc))
    }
}
