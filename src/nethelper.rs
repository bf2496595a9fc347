//! Pure CIDR helpers underlying address assignment.
//!
//! These functions hold no state and know nothing about reservations; the
//! [`crate::allocator::AddressAllocator`] wraps them with the concurrency
//! safety a shared address space needs.

use std::net::IpAddr;

use ipnet::IpNet;

use crate::error::ProvisionError;

/// Parses `cidr` into a network block, normalised to its network address.
///
/// # Errors
///
/// Returns [`ProvisionError::InvalidBlock`] when the text is not a valid
/// CIDR expression.
pub fn parse_block(cidr: &str) -> Result<IpNet, ProvisionError> {
    cidr.trim()
        .parse::<IpNet>()
        .map(|block| block.trunc())
        .map_err(|err| ProvisionError::InvalidBlock {
            cidr: cidr.to_owned(),
            message: err.to_string(),
        })
}

/// Derives the subnet prefix from a CIDR block, as a decimal string.
///
/// The prefix length is what downstream consumers combine with an assigned
/// address to form `addr/prefix` interface configuration.
///
/// # Errors
///
/// Returns [`ProvisionError::InvalidBlock`] when `cidr` cannot be parsed.
pub fn subnet_of(cidr: &str) -> Result<String, ProvisionError> {
    parse_block(cidr).map(|block| block.prefix_len().to_string())
}

/// Iterates the usable host addresses of a block in ascending order.
///
/// Network and broadcast addresses are excluded for IPv4 prefixes shorter
/// than /31.
///
/// # Errors
///
/// Returns [`ProvisionError::InvalidBlock`] when `cidr` cannot be parsed.
pub fn host_addresses(cidr: &str) -> Result<impl Iterator<Item = IpAddr>, ProvisionError> {
    parse_block(cidr).map(|block| block.hosts())
}

/// Returns the first `count` usable host addresses of a block.
///
/// This is the stateless primitive behind the allocator: it has no notion of
/// prior reservations and always starts from the beginning of the block.
///
/// # Errors
///
/// Returns [`ProvisionError::InvalidBlock`] when `cidr` cannot be parsed and
/// [`ProvisionError::PoolExhausted`] when the block holds fewer than `count`
/// usable addresses.
pub fn available_addresses(cidr: &str, count: usize) -> Result<Vec<IpAddr>, ProvisionError> {
    let addresses: Vec<IpAddr> = host_addresses(cidr)?.take(count).collect();
    if addresses.len() < count {
        return Err(ProvisionError::PoolExhausted {
            cidr: cidr.trim().to_owned(),
            requested: count,
            free: addresses.len(),
        });
    }
    Ok(addresses)
}
