//! Well-known label keys and size dimensions shared by the pipeline stages.
//!
//! The label map is the single channel through which stages communicate, so
//! every key a stage reads or writes is named here rather than inlined at the
//! call sites.

/// Label holding the front-end controller container image reference.
pub const FRONTEND_IMAGE: &str = "jiva/frontend-image";

/// Label holding the front-end controller IP address.
pub const FRONTEND_IP: &str = "jiva/frontend-ip";

/// Label holding the comma-joined back-end replica IP addresses.
pub const BACKEND_IPS: &str = "jiva/backend-ips";

/// Label holding the number of back-end replicas, as a decimal integer.
pub const REPLICA_COUNT: &str = "storage/replica-count";

/// Label holding the region the claim is scoped to.
pub const REGION: &str = "topology/region";

/// Label holding the datacenter the claim is scoped to.
pub const DATACENTER: &str = "topology/datacenter";

/// Label holding the CIDR block addresses are assigned from.
pub const NETWORK_CIDR: &str = "network/cidr";

/// Label holding the subnet prefix derived from the network CIDR.
pub const SUBNET: &str = "network/subnet";

/// Base size dimension every claim must request.
pub const STORAGE_SIZE: &str = "storage";

/// Size dimension for the front-end controller volume.
pub const FRONTEND_SIZE: &str = "frontend-size";

/// Size dimension for each back-end replica volume.
pub const BACKEND_SIZE: &str = "backend-size";

/// Image used for the front-end controller when the claim names none.
pub const DEFAULT_FRONTEND_IMAGE: &str = "openebs/jiva:latest";
