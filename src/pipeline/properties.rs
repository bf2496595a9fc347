//! Property merge: folds datacenter-scoped provider configuration into the
//! claim's labels.
//!
//! Both merges follow the same first-write-wins rule: user-supplied and
//! earlier-stage values always score over orchestrator configuration. The
//! network merge must run after the storage merge because address assignment
//! depends on a replica-count label the storage configuration may set.

use tracing::debug;

use crate::claim::VolumeClaim;
use crate::error::ProvisionError;
use crate::provider::{OrchestrationProvider, PropertyMap};

/// Merges datacenter-scoped storage configuration into the claim.
///
/// # Errors
///
/// Returns [`ProvisionError::DatacenterRequired`] when `datacenter` is
/// empty, [`ProvisionError::UnsupportedOperation`] when the provider lacks
/// the storage capability, and propagates lookup failures unchanged. No
/// labels are mutated on failure.
pub fn merge_storage_properties<P: OrchestrationProvider + ?Sized>(
    provider: &P,
    datacenter: &str,
    claim: &mut VolumeClaim,
) -> Result<(), ProvisionError> {
    if datacenter.is_empty() {
        return Err(ProvisionError::DatacenterRequired);
    }

    let capability =
        provider
            .storage_capability()
            .ok_or_else(|| ProvisionError::UnsupportedOperation {
                operation: String::from("storage"),
                provider: provider.name().to_owned(),
            })?;

    let properties = capability.storage_properties(datacenter)?;
    merge(claim, &properties);
    debug!(datacenter, count = properties.len(), "merged storage properties");
    Ok(())
}

/// Merges datacenter-scoped network configuration into the claim.
///
/// # Errors
///
/// Returns [`ProvisionError::DatacenterRequired`] when `datacenter` is
/// empty, [`ProvisionError::UnsupportedOperation`] when the provider lacks
/// the network capability, and propagates lookup failures unchanged. No
/// labels are mutated on failure.
pub fn merge_network_properties<P: OrchestrationProvider + ?Sized>(
    provider: &P,
    datacenter: &str,
    claim: &mut VolumeClaim,
) -> Result<(), ProvisionError> {
    if datacenter.is_empty() {
        return Err(ProvisionError::DatacenterRequired);
    }

    let capability =
        provider
            .network_capability()
            .ok_or_else(|| ProvisionError::UnsupportedOperation {
                operation: String::from("network"),
                provider: provider.name().to_owned(),
            })?;

    let properties = capability.network_properties(datacenter)?;
    merge(claim, &properties);
    debug!(datacenter, count = properties.len(), "merged network properties");
    Ok(())
}

fn merge(claim: &mut VolumeClaim, properties: &PropertyMap) {
    for (key, value) in properties {
        claim.labels.set_if_absent(key.clone(), value.clone());
    }
}
