//! Concurrency-safe address reservation over CIDR blocks.

use std::collections::{BTreeSet, HashMap};
use std::net::IpAddr;
use std::sync::{Mutex, PoisonError};

use ipnet::IpNet;
use tracing::debug;

use crate::error::ProvisionError;
use crate::nethelper;

/// Reserves distinct addresses from CIDR blocks for in-flight claims.
///
/// The allocator is the one piece of shared mutable state in the crate:
/// concurrent provisioning calls may target the same block, so the
/// check-then-reserve step runs under a single mutex, trading cross-block
/// contention for a simple atomicity guarantee. Reservations are keyed by
/// the truncated network, so `10.0.0.5/24` and `10.0.0.0/24` draw from one
/// pool.
///
/// There is no release path: address reclamation after deprovisioning
/// belongs to the orchestration backend, not this core.
#[derive(Debug, Default)]
pub struct AddressAllocator {
    reserved: Mutex<HashMap<IpNet, BTreeSet<IpAddr>>>,
}

impl AddressAllocator {
    /// Creates an allocator with no reservations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves `count` distinct, currently-unused addresses from `cidr`.
    ///
    /// Addresses are returned in ascending order and committed atomically:
    /// either all `count` are reserved or none are.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError::InvalidBlock`] when `cidr` is malformed and
    /// [`ProvisionError::PoolExhausted`] when fewer than `count` free
    /// addresses remain, in which case nothing is reserved.
    pub fn reserve(&self, cidr: &str, count: usize) -> Result<Vec<IpAddr>, ProvisionError> {
        let block = nethelper::parse_block(cidr)?;
        if count == 0 {
            return Ok(Vec::new());
        }

        let mut pools = self
            .reserved
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let taken = pools.entry(block).or_default();

        let mut granted = Vec::with_capacity(count);
        for address in block.hosts() {
            if taken.contains(&address) {
                continue;
            }
            granted.push(address);
            if granted.len() == count {
                break;
            }
        }

        if granted.len() < count {
            return Err(ProvisionError::PoolExhausted {
                cidr: block.to_string(),
                requested: count,
                free: granted.len(),
            });
        }

        taken.extend(granted.iter().copied());
        debug!(block = %block, count, "reserved addresses");
        Ok(granted)
    }

    /// Reserves a single address from `cidr`.
    ///
    /// # Errors
    ///
    /// Propagates the same errors as [`Self::reserve`].
    pub fn reserve_one(&self, cidr: &str) -> Result<IpAddr, ProvisionError> {
        let mut granted = self.reserve(cidr, 1)?;
        granted.pop().ok_or(ProvisionError::PoolExhausted {
            cidr: cidr.to_owned(),
            requested: 1,
            free: 0,
        })
    }

    /// Returns the number of addresses currently reserved in `cidr`.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError::InvalidBlock`] when `cidr` is malformed.
    pub fn reserved_count(&self, cidr: &str) -> Result<usize, ProvisionError> {
        let block = nethelper::parse_block(cidr)?;
        let pools = self
            .reserved
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(pools.get(&block).map_or(0, BTreeSet::len))
    }
}
