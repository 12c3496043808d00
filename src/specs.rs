//! Instance-type specification cache
//!
//! Memoizes hardware specs (vCPU count, memory) keyed by instance type.
//! Entries live for the process's duration and are never evicted; the key
//! space is the provider's finite instance-type catalog.

use crate::catalog::{CloudCatalog, HardwareSpec};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::warn;

/// Fetch-on-miss cache over [`CloudCatalog::lookup_spec`].
///
/// The lock is never held across an await, so two collectors racing on the
/// same type may both miss and both issue the lookup. The stored value is
/// idempotent and last-write-wins, which is acceptable.
#[derive(Default)]
pub struct SpecCache {
    entries: Mutex<HashMap<String, HardwareSpec>>,
}

impl SpecCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spec for an instance type, fetching on miss.
    ///
    /// A failed or empty lookup returns `{0, 0.0}` without caching it, so a
    /// later call for the same type retries the catalog.
    pub async fn get(&self, catalog: &dyn CloudCatalog, instance_type: &str) -> HardwareSpec {
        if let Some(spec) = self.entries.lock().unwrap().get(instance_type) {
            return *spec;
        }

        match catalog.lookup_spec(instance_type).await {
            Ok(Some(spec)) => {
                self.entries
                    .lock()
                    .unwrap()
                    .insert(instance_type.to_string(), spec);
                spec
            }
            Ok(None) => {
                warn!("No spec entry for instance type {}", instance_type);
                HardwareSpec {
                    vcpus: 0,
                    memory_gb: 0.0,
                }
            }
            Err(e) => {
                warn!("Spec lookup failed for {}: {}", instance_type, e);
                HardwareSpec {
                    vcpus: 0,
                    memory_gb: 0.0,
                }
            }
        }
    }

    /// Number of cached types (test hook).
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
