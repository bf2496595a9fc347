//! Address assignment: reserves front-end and back-end addresses from the
//! claim's network block.

use std::net::IpAddr;

use tracing::debug;

use crate::allocator::AddressAllocator;
use crate::claim::VolumeClaim;
use crate::error::ProvisionError;
use crate::keys;
use crate::nethelper;

/// Assigns one front-end address and `replica-count` back-end addresses.
///
/// Runs after the network property merge has populated the network CIDR
/// label. Assignment is idempotent over four mutually exclusive cases:
/// both address labels set is a no-op, neither set reserves front-end then
/// back-end, and a single missing side reserves only that side. The replica
/// count is validated before any reservation so a malformed count never
/// consumes addresses.
///
/// # Errors
///
/// Returns [`ProvisionError::MissingNetworkCidr`] when the CIDR label is
/// empty, [`ProvisionError::InvalidReplicaCount`] when the replica-count
/// label is not a positive integer, and propagates allocator failures
/// unchanged.
pub fn assign_addresses(
    allocator: &AddressAllocator,
    claim: &mut VolumeClaim,
) -> Result<(), ProvisionError> {
    let cidr = claim
        .labels
        .get(keys::NETWORK_CIDR)
        .filter(|value| !value.is_empty())
        .ok_or(ProvisionError::MissingNetworkCidr)?
        .to_owned();

    let subnet = nethelper::subnet_of(&cidr)?;
    claim.labels.set_if_absent(keys::SUBNET, subnet);

    let frontend_set = claim.labels.is_set(keys::FRONTEND_IP);
    let backend_set = claim.labels.is_set(keys::BACKEND_IPS);

    if frontend_set && backend_set {
        return Ok(());
    }

    // Validate the count before touching the allocator so a malformed label
    // never consumes addresses.
    let replicas = if backend_set {
        None
    } else {
        Some(replica_count(claim)?)
    };

    if !frontend_set {
        let address = allocator.reserve_one(&cidr)?;
        claim.labels.set(keys::FRONTEND_IP, address.to_string());
        debug!(claim = %claim.name, %address, "assigned front-end address");
    }

    if let Some(count) = replicas {
        let addresses = allocator.reserve(&cidr, count)?;
        claim.labels.set(keys::BACKEND_IPS, join(&addresses));
        debug!(claim = %claim.name, replicas = count, "assigned back-end addresses");
    }

    Ok(())
}

/// Reads the replica count label as a positive integer.
fn replica_count(claim: &VolumeClaim) -> Result<usize, ProvisionError> {
    let raw = claim.labels.get(keys::REPLICA_COUNT).unwrap_or_default();
    raw.parse::<usize>()
        .ok()
        .filter(|&count| count > 0)
        .ok_or_else(|| ProvisionError::InvalidReplicaCount {
            value: raw.to_owned(),
        })
}

fn join(addresses: &[IpAddr]) -> String {
    addresses
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
