//! Various common constants used by the multishare control plane.

/// The product domain used to namespace controller-owned instance labels.
pub const PRODUCT_DOMAIN_NAME: &str = "multishare.io";

/// The label key tying an instance to the storage-class fingerprint it was
/// provisioned for.
pub fn sc_fingerprint_key() -> String {
    format!("{PRODUCT_DOMAIN_NAME}/sc-fingerprint")
}

/// The label key recording the location of the owning cluster.
pub fn cluster_location_key() -> String {
    format!("{PRODUCT_DOMAIN_NAME}/cluster-location")
}

/// The label key recording the name of the owning cluster.
pub fn cluster_name_key() -> String {
    format!("{PRODUCT_DOMAIN_NAME}/cluster-name")
}

/// The capability tier provisioned when a request does not name one.
pub const DEFAULT_TIER: &str = "tier-1";

/// The VPC network used when a request does not name one.
pub const DEFAULT_NETWORK: &str = "default";

/// The share-count ceiling applied to an instance when no per-instance
/// ceiling is configured.
pub const DEFAULT_MAX_SHARES_PER_INSTANCE: u64 = 10;

/// One gibibyte.
pub const GIB: u64 = 1024 * 1024 * 1024;

/// One tebibyte.
pub const TIB: u64 = 1024 * GIB;
