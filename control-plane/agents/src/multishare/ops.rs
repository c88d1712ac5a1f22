//! Snapshot and query the running backend operations.
//!
//! The snapshot handed to the query helpers is a captured value: helpers
//! never re-query the backend mid-decision.

use super::MultishareOpsManager;
use crate::errors::SvcError;
use filer_port::types::v0::transport::{
    InstancePath, MultishareInstance, OpInfo, OperationType, ResourcePath, Share, SharePath,
};

impl MultishareOpsManager {
    /// Snapshot the running operations that target instances or shares.
    ///
    /// Completed operations and operations on other resource collections
    /// (backups, snapshots, ...) are dropped at parse time.
    pub async fn list_multishare_resource_running_ops(
        &self,
    ) -> Result<Vec<OpInfo>, SvcError> {
        let raw = self.filer().list_operations().await?;
        Ok(raw.iter().filter_map(OpInfo::try_from_raw).collect())
    }

    /// Fail with `Conflict` iff an operation targets `instance` exactly.
    ///
    /// Share operations beneath the instance do not trip this check.
    pub fn verify_no_running_instance_ops(
        &self,
        instance: &MultishareInstance,
        ops: &[OpInfo],
    ) -> Result<(), SvcError> {
        let path = instance_path(instance)?;
        match ops.iter().find(|op| op.target.is_instance_exactly(&path)) {
            Some(op) => Err(conflict(op)),
            None => Ok(()),
        }
    }

    /// Fail with `Conflict` iff an operation targets `instance` or any
    /// share beneath it.
    pub fn verify_no_running_instance_or_share_ops_for_instance(
        &self,
        instance: &MultishareInstance,
        ops: &[OpInfo],
    ) -> Result<(), SvcError> {
        match contains_op_with_instance_target_prefix(instance, ops)? {
            Some(op) => Err(conflict(op)),
            None => Ok(()),
        }
    }

    /// Fail with `Conflict` iff an operation targets this specific share.
    pub fn verify_no_running_share_ops(
        &self,
        share: &Share,
        ops: &[OpInfo],
    ) -> Result<(), SvcError> {
        let path = share_path(share)?;
        let running = ops
            .iter()
            .find(|op| matches!(&op.target, ResourcePath::Share(this) if this == &path));
        match running {
            Some(op) => Err(conflict(op)),
            None => Ok(()),
        }
    }
}

/// The first operation whose target is `instance` itself or a share
/// beneath it.
pub fn contains_op_with_instance_target_prefix<'a>(
    instance: &MultishareInstance,
    ops: &'a [OpInfo],
) -> Result<Option<&'a OpInfo>, SvcError> {
    let path = instance_path(instance)?;
    Ok(ops.iter().find(|op| op.target.is_on_instance(&path)))
}

/// The first operation of `op_type` whose target's last path segment is
/// `share_name`.
pub fn contains_op_with_share_name<'a>(
    share_name: &str,
    op_type: OperationType,
    ops: &'a [OpInfo],
) -> Option<&'a OpInfo> {
    ops.iter()
        .find(|op| op.op_type == op_type && op.target.share_name() == Some(share_name))
}

/// Typed identity of an instance, failing when incomplete.
pub(crate) fn instance_path(instance: &MultishareInstance) -> Result<InstancePath, SvcError> {
    instance
        .instance_path()
        .ok_or_else(|| SvcError::InvalidInstance {
            instance: format!(
                "projects/{}/locations/{}/instances/{}",
                instance.project, instance.location, instance.name
            ),
        })
}

/// Typed identity of a share, failing when it or its parent is incomplete.
pub(crate) fn share_path(share: &Share) -> Result<SharePath, SvcError> {
    share.share_path().ok_or_else(|| SvcError::InvalidShare {
        share: share.name.clone(),
    })
}

fn conflict(op: &OpInfo) -> SvcError {
    SvcError::Conflict {
        op_id: op.id.clone(),
        op_type: op.op_type,
        target: op.target.to_string(),
    }
}
