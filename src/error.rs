//! Error taxonomy for the provisioning pipeline.

use thiserror::Error;

/// Errors raised while enriching a claim or reserving addresses.
///
/// Every pipeline stage fails fast; the orchestrator propagates the first
/// error unchanged with no local recovery or retry. Variants carry the
/// offending key, value, or provider name so callers can surface them
/// verbatim.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ProvisionError {
    /// Raised when a CIDR block cannot be parsed.
    #[error("invalid CIDR block '{cidr}': {message}")]
    InvalidBlock {
        /// The CIDR string as supplied by the caller.
        cidr: String,
        /// Parser message describing the defect.
        message: String,
    },
    /// Raised when a block has fewer free addresses than requested.
    #[error("address pool '{cidr}' exhausted: requested {requested}, found {free} free")]
    PoolExhausted {
        /// Block the reservation targeted.
        cidr: String,
        /// Number of addresses requested.
        requested: usize,
        /// Number of free addresses found before the pool ran out.
        free: usize,
    },
    /// Raised when a claim carries no base storage request.
    #[error("storage specs missing in claim")]
    MissingSpec,
    /// Raised when a requested size resolves to a non-positive quantity.
    #[error("invalid storage size '{value}' for dimension '{dimension}'")]
    InvalidSize {
        /// Size dimension that failed validation.
        dimension: String,
        /// Offending quantity rendered as text.
        value: String,
    },
    /// Raised when the provider cannot name a region.
    #[error("region could not be determined from provider '{provider}'")]
    RegionUnavailable {
        /// Provider that returned an empty region.
        provider: String,
    },
    /// Raised when the provider cannot name a default datacenter.
    #[error("datacenter could not be determined from provider '{provider}'")]
    DatacenterUnavailable {
        /// Provider that returned an empty datacenter.
        provider: String,
    },
    /// Raised when the provider lacks the capability an operation needs.
    #[error("{operation} operations not supported by provider '{provider}'")]
    UnsupportedOperation {
        /// Operation that was requested (`storage` or `network`).
        operation: String,
        /// Provider that lacks the capability.
        provider: String,
    },
    /// Raised when a datacenter-scoped stage is invoked without one.
    #[error("datacenter not provided")]
    DatacenterRequired,
    /// Raised when the network CIDR label is missing or empty.
    #[error("network CIDR could not be determined")]
    MissingNetworkCidr,
    /// Raised when the replica-count label is not a positive integer.
    #[error("invalid replica count '{value}'")]
    InvalidReplicaCount {
        /// Label value that failed to parse.
        value: String,
    },
    /// Wrapper for provider-level failures.
    #[error("provider error: {message}")]
    Provider {
        /// Message reported by the provider implementation.
        message: String,
    },
}
