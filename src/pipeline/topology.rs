//! Topology resolution: pins the claim to a region and datacenter.

use crate::claim::VolumeClaim;
use crate::error::ProvisionError;
use crate::keys;
use crate::provider::OrchestrationProvider;

/// Resolves region and datacenter, returning the datacenter.
///
/// Labels already set on the claim win over anything the provider reports;
/// the provider is only consulted for values the claim leaves blank.
///
/// # Errors
///
/// Returns [`ProvisionError::RegionUnavailable`] or
/// [`ProvisionError::DatacenterUnavailable`] when the provider cannot name
/// the missing value, and propagates provider failures from the default
/// datacenter lookup unchanged.
pub fn resolve_topology<P: OrchestrationProvider + ?Sized>(
    provider: &P,
    claim: &mut VolumeClaim,
) -> Result<String, ProvisionError> {
    resolve_region(provider, claim)?;
    resolve_datacenter(provider, claim)
}

fn resolve_region<P: OrchestrationProvider + ?Sized>(
    provider: &P,
    claim: &mut VolumeClaim,
) -> Result<(), ProvisionError> {
    if claim.labels.is_set(keys::REGION) {
        return Ok(());
    }

    let region = provider.region();
    if region.is_empty() {
        return Err(ProvisionError::RegionUnavailable {
            provider: provider.name().to_owned(),
        });
    }

    claim.labels.set(keys::REGION, region);
    Ok(())
}

fn resolve_datacenter<P: OrchestrationProvider + ?Sized>(
    provider: &P,
    claim: &mut VolumeClaim,
) -> Result<String, ProvisionError> {
    if let Some(datacenter) = claim.labels.get(keys::DATACENTER)
        && !datacenter.is_empty()
    {
        return Ok(datacenter.to_owned());
    }

    let datacenter = provider.default_datacenter()?;
    if datacenter.is_empty() {
        return Err(ProvisionError::DatacenterUnavailable {
            provider: provider.name().to_owned(),
        });
    }

    claim.labels.set(keys::DATACENTER, datacenter.clone());
    Ok(datacenter)
}
