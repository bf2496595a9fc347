//! Test support utilities shared across unit and integration tests.

use std::sync::Mutex;

use crate::claim::{Volume, VolumeClaim};
use crate::error::ProvisionError;
use crate::provider::{
    NetworkCapability, OrchestrationProvider, PropertyMap, StorageCapability,
};

/// In-memory orchestration provider with scriptable topology, properties,
/// and capability toggles.
///
/// Placement calls echo the claim back as a volume and record it so tests
/// can assert on exactly what the backend was handed.
#[derive(Debug)]
pub struct FakeProvider {
    name: String,
    region: String,
    datacenter: String,
    storage_properties: PropertyMap,
    network_properties: PropertyMap,
    storage_supported: bool,
    network_supported: bool,
    placed: Mutex<Vec<VolumeClaim>>,
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeProvider {
    /// Creates a provider named `fake` in region `global` with datacenter
    /// `dc-1`, supporting both capabilities and exposing no properties.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: String::from("fake"),
            region: String::from("global"),
            datacenter: String::from("dc-1"),
            storage_properties: PropertyMap::new(),
            network_properties: PropertyMap::new(),
            storage_supported: true,
            network_supported: true,
            placed: Mutex::new(Vec::new()),
        }
    }

    /// Overrides the provider name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Overrides the region. An empty string simulates an unknown region.
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Overrides the default datacenter. An empty string simulates an
    /// unknown datacenter.
    #[must_use]
    pub fn with_datacenter(mut self, datacenter: impl Into<String>) -> Self {
        self.datacenter = datacenter.into();
        self
    }

    /// Adds a storage property returned for every datacenter.
    #[must_use]
    pub fn with_storage_property(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.storage_properties.insert(key.into(), value.into());
        self
    }

    /// Adds a network property returned for every datacenter.
    #[must_use]
    pub fn with_network_property(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.network_properties.insert(key.into(), value.into());
        self
    }

    /// Withdraws the storage capability.
    #[must_use]
    pub const fn without_storage(mut self) -> Self {
        self.storage_supported = false;
        self
    }

    /// Withdraws the network capability.
    #[must_use]
    pub const fn without_network(mut self) -> Self {
        self.network_supported = false;
        self
    }

    /// Returns a snapshot of every claim handed to placement so far.
    #[must_use]
    pub fn placed_claims(&self) -> Vec<VolumeClaim> {
        self.placed
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl OrchestrationProvider for FakeProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn region(&self) -> String {
        self.region.clone()
    }

    fn default_datacenter(&self) -> Result<String, ProvisionError> {
        Ok(self.datacenter.clone())
    }

    fn network_capability(&self) -> Option<&dyn NetworkCapability> {
        self.network_supported
            .then_some(self as &dyn NetworkCapability)
    }

    fn storage_capability(&self) -> Option<&dyn StorageCapability> {
        self.storage_supported
            .then_some(self as &dyn StorageCapability)
    }
}

impl NetworkCapability for FakeProvider {
    fn network_properties(&self, _datacenter: &str) -> Result<PropertyMap, ProvisionError> {
        Ok(self.network_properties.clone())
    }
}

impl StorageCapability for FakeProvider {
    fn storage_properties(&self, _datacenter: &str) -> Result<PropertyMap, ProvisionError> {
        Ok(self.storage_properties.clone())
    }

    fn place_volume(&self, claim: &VolumeClaim) -> Result<Volume, ProvisionError> {
        self.placed
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(claim.clone());
        Ok(Volume {
            name: claim.name.clone(),
            labels: claim.labels.clone(),
        })
    }

    fn describe_volume(&self, claim: &VolumeClaim) -> Result<Volume, ProvisionError> {
        Ok(Volume {
            name: claim.name.clone(),
            labels: claim.labels.clone(),
        })
    }

    fn remove_volume(&self, volume: &Volume) -> Result<Volume, ProvisionError> {
        Ok(volume.clone())
    }
}
