//! Claim enrichment and address allocation for jiva-style replicated
//! storage.
//!
//! The crate turns a sparse [`VolumeClaim`] into a complete provisioning
//! request through a staged, idempotent pipeline (defaulting → topology →
//! property merge → address assignment) and hands the result to a pluggable
//! [`OrchestrationProvider`] that performs actual placement. Network
//! addresses for the front-end controller and its back-end replicas are
//! drawn from a CIDR block through a concurrency-safe
//! [`AddressAllocator`].

pub mod allocator;
pub mod claim;
pub mod error;
pub mod keys;
pub mod nethelper;
pub mod pipeline;
pub mod provider;
pub mod test_support;

pub use allocator::AddressAllocator;
pub use claim::{Labels, ParseQuantityError, Quantity, Volume, VolumeClaim};
pub use error::ProvisionError;
pub use pipeline::JivaProvisioner;
pub use provider::{
    NetworkCapability, OrchestrationProvider, PropertyMap, StorageCapability,
};
