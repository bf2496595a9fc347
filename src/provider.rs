//! Orchestration provider contracts consumed by the pipeline.
//!
//! A provider may or may not support network and storage placement.
//! Capability lookup returns `Option` so "provider does not support X" is a
//! first-class, testable outcome rather than a panic waiting to happen; the
//! pipeline converts an absent capability into
//! [`ProvisionError::UnsupportedOperation`].

use std::collections::BTreeMap;

use crate::claim::{Volume, VolumeClaim};
use crate::error::ProvisionError;

/// Datacenter-scoped property map returned by capability queries.
pub type PropertyMap = BTreeMap<String, String>;

/// An orchestration backend the pipeline is bound to for its lifetime.
///
/// The binding is read-only shared state set once at pipeline construction;
/// implementations must therefore take `&self` on every call and tolerate
/// concurrent callers.
pub trait OrchestrationProvider {
    /// Name of the provider, used in diagnostics.
    fn name(&self) -> &str;

    /// Region this provider operates in. Empty when unknown.
    fn region(&self) -> String;

    /// Default datacenter for claims that do not name one.
    ///
    /// # Errors
    ///
    /// Returns a provider-specific [`ProvisionError`] when the datacenter
    /// cannot be looked up.
    fn default_datacenter(&self) -> Result<String, ProvisionError>;

    /// Network placement capability, when supported.
    fn network_capability(&self) -> Option<&dyn NetworkCapability>;

    /// Storage placement capability, when supported.
    fn storage_capability(&self) -> Option<&dyn StorageCapability>;
}

/// Network-side operations a provider may support.
pub trait NetworkCapability {
    /// Fetches datacenter-scoped network configuration.
    ///
    /// # Errors
    ///
    /// Returns a provider-specific [`ProvisionError`] when the lookup fails.
    fn network_properties(&self, datacenter: &str) -> Result<PropertyMap, ProvisionError>;
}

/// Storage-side operations a provider may support.
pub trait StorageCapability {
    /// Fetches datacenter-scoped storage configuration.
    ///
    /// # Errors
    ///
    /// Returns a provider-specific [`ProvisionError`] when the lookup fails.
    fn storage_properties(&self, datacenter: &str) -> Result<PropertyMap, ProvisionError>;

    /// Places a fully-enriched claim and returns the resulting volume.
    ///
    /// # Errors
    ///
    /// Returns a provider-specific [`ProvisionError`] when placement fails.
    fn place_volume(&self, claim: &VolumeClaim) -> Result<Volume, ProvisionError>;

    /// Looks up the volume a claim refers to.
    ///
    /// # Errors
    ///
    /// Returns a provider-specific [`ProvisionError`] when the lookup fails.
    fn describe_volume(&self, claim: &VolumeClaim) -> Result<Volume, ProvisionError>;

    /// Removes a placed volume and returns its final state.
    ///
    /// # Errors
    ///
    /// Returns a provider-specific [`ProvisionError`] when removal fails.
    fn remove_volume(&self, volume: &Volume) -> Result<Volume, ProvisionError>;
}
