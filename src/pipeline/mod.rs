//! Provisioning pipeline: sequences the enrichment stages and forwards the
//! completed claim to the orchestration backend.
//!
//! Stages run in a fixed order — defaulting, topology, storage properties,
//! network properties, address assignment — and data flows strictly forward:
//! no stage reads the output of a later one. The pipeline is single-pass and
//! fail-fast; retrying a failed provisioning attempt is the caller's job.

pub mod addresses;
pub mod defaults;
pub mod properties;
pub mod topology;

use std::sync::Arc;

use tracing::info;

use crate::allocator::AddressAllocator;
use crate::claim::{Volume, VolumeClaim};
use crate::error::ProvisionError;
use crate::provider::{OrchestrationProvider, StorageCapability};

/// Provisions jiva-style replicated volumes through a bound provider.
///
/// Exactly one provider is bound for the pipeline's lifetime and never
/// mutated afterwards. The allocator is shared so that concurrent pipelines
/// drawing from the same address space cannot double-assign; pass the same
/// `Arc` to every pipeline that shares a network.
#[derive(Debug)]
pub struct JivaProvisioner<P> {
    provider: P,
    allocator: Arc<AddressAllocator>,
}

impl<P: OrchestrationProvider> JivaProvisioner<P> {
    /// Creates a pipeline with its own private address allocator.
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self::with_allocator(provider, Arc::new(AddressAllocator::new()))
    }

    /// Creates a pipeline sharing an existing allocator.
    #[must_use]
    pub const fn with_allocator(provider: P, allocator: Arc<AddressAllocator>) -> Self {
        Self {
            provider,
            allocator,
        }
    }

    /// Returns the bound provider.
    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Returns the allocator this pipeline reserves addresses from.
    #[must_use]
    pub fn allocator(&self) -> Arc<AddressAllocator> {
        Arc::clone(&self.allocator)
    }

    /// Enriches `claim` in place and places it with the backend.
    ///
    /// The first stage failure aborts the pipeline and is returned
    /// unchanged; on success the backend's placement result is returned
    /// verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError::UnsupportedOperation`] when the provider
    /// lacks the storage capability, any stage error from enrichment, or
    /// the backend's placement failure.
    pub fn provision(&self, claim: &mut VolumeClaim) -> Result<Volume, ProvisionError> {
        let storage = self.storage_capability()?;

        defaults::apply_defaults(claim)?;
        let datacenter = topology::resolve_topology(&self.provider, claim)?;
        properties::merge_storage_properties(&self.provider, &datacenter, claim)?;
        properties::merge_network_properties(&self.provider, &datacenter, claim)?;
        addresses::assign_addresses(&self.allocator, claim)?;

        info!(claim = %claim.name, %datacenter, "placing enriched claim");
        storage.place_volume(claim)
    }

    /// Looks up the volume a claim refers to. No enrichment is performed.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError::UnsupportedOperation`] when the provider
    /// lacks the storage capability, or the backend's lookup failure.
    pub fn describe(&self, claim: &VolumeClaim) -> Result<Volume, ProvisionError> {
        self.storage_capability()?.describe_volume(claim)
    }

    /// Removes a placed volume. No enrichment is performed.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError::UnsupportedOperation`] when the provider
    /// lacks the storage capability, or the backend's removal failure.
    pub fn deprovision(&self, volume: &Volume) -> Result<Volume, ProvisionError> {
        self.storage_capability()?.remove_volume(volume)
    }

    fn storage_capability(&self) -> Result<&dyn StorageCapability, ProvisionError> {
        self.provider
            .storage_capability()
            .ok_or_else(|| ProvisionError::UnsupportedOperation {
                operation: String::from("storage"),
                provider: self.provider.name().to_owned(),
            })
    }
}
