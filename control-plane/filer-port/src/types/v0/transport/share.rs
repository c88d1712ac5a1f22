use super::{instance::MultishareInstance, resource::SharePath};

use serde::{Deserialize, Serialize};

/// A logical volume hosted on exactly one multishare instance.
#[derive(Serialize, Deserialize, Debug, Clone, Default, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Share {
    /// Share name, unique within its parent instance.
    pub name: String,
    /// The instance hosting this share.
    pub parent: MultishareInstance,
    /// Provisioned size of the share.
    pub capacity_bytes: u64,
}

impl Share {
    /// Typed identity, available only when the share name and the parent
    /// instance identity are complete.
    pub fn share_path(&self) -> Option<SharePath> {
        let instance = self.parent.instance_path()?;
        if self.name.is_empty() {
            return None;
        }
        Some(SharePath::new(instance, &self.name))
    }
}

/// Create share request payload consumed by the placement core.
#[derive(Serialize, Deserialize, Debug, Clone, Default, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateShare {
    /// Name of the share to create.
    pub name: String,
    /// Requested share capacity.
    pub capacity_bytes: u64,
    /// Optional IPv4 CIDR literal the hosting instance address must fall
    /// within.
    pub reserved_ipv4_cidr: Option<String>,
}
