//! Capacity planning for placing a share onto an existing instance.

use super::{ops, MultishareOpsManager};
use crate::errors::SvcError;
use filer_port::types::v0::transport::{MultishareInstance, Share};

impl MultishareOpsManager {
    /// Whether `share`'s parent instance must grow to fit `needed_bytes`,
    /// and the provisioned size it must grow to.
    ///
    /// The target size is the minimum increment that brings the free
    /// capacity up to `needed_bytes`. The used capacity is summed over the
    /// shares the backend currently lists on the parent, which includes
    /// in-flight creations.
    pub async fn instance_needs_expand(
        &self,
        share: &Share,
        needed_bytes: u64,
    ) -> Result<(bool, u64), SvcError> {
        let parent = ops::instance_path(&share.parent)?;
        let resident = self.filer().list_shares(&parent).await?;
        Ok(expansion_target(&share.parent, &resident, needed_bytes))
    }
}

/// Expansion decision over the shares already resident on `instance`.
///
/// An instance overcommitted beyond its provisioned size reports no free
/// capacity, so the expansion grows it by the full requested size.
pub(crate) fn expansion_target(
    instance: &MultishareInstance,
    resident: &[Share],
    needed_bytes: u64,
) -> (bool, u64) {
    let used = resident.iter().map(|share| share.capacity_bytes).sum::<u64>();
    let free = instance.capacity_bytes.saturating_sub(used);
    if needed_bytes <= free {
        (false, 0)
    } else {
        (true, instance.capacity_bytes + (needed_bytes - free))
    }
}
