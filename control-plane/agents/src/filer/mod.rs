use crate::errors::SvcError;
use filer_port::types::v0::transport::{
    InstancePath, MultishareInstance, RawOperation, Share,
};

use async_trait::async_trait;

#[cfg(test)]
pub(crate) mod fake;

/// Abstract managed-filer backend consumed by the placement core.
///
/// Every call is a blocking I/O boundary. Implementations surface backend
/// failures as [`SvcError::FilerRequest`] and cooperative cancellation as
/// [`SvcError::Cancelled`]; the core propagates both without retrying.
/// The backend serially rejects concurrent mutations on the same resource,
/// which is the single-operation-per-resource invariant the placement
/// logic leans on.
#[async_trait]
pub trait FilerService: Send + Sync {
    /// List the multishare instances across the given regions.
    async fn list_instances(
        &self,
        regions: &[String],
    ) -> Result<Vec<MultishareInstance>, SvcError>;

    /// List the shares resident on an instance.
    async fn list_shares(&self, instance: &InstancePath) -> Result<Vec<Share>, SvcError>;

    /// Enumerate the backend long-running operations.
    async fn list_operations(&self) -> Result<Vec<RawOperation>, SvcError>;

    /// Start provisioning an instance, returning the operation handle.
    async fn start_create_instance(
        &self,
        instance: &MultishareInstance,
    ) -> Result<RawOperation, SvcError>;

    /// Start growing an instance to the given provisioned size.
    async fn start_update_instance(
        &self,
        instance: &MultishareInstance,
        new_bytes: u64,
    ) -> Result<RawOperation, SvcError>;

    /// Start tearing down an instance.
    async fn start_delete_instance(
        &self,
        instance: &MultishareInstance,
    ) -> Result<RawOperation, SvcError>;

    /// Start creating a share on its parent instance.
    async fn start_create_share(&self, share: &Share) -> Result<RawOperation, SvcError>;

    /// Start resizing a share.
    async fn start_update_share(&self, share: &Share) -> Result<RawOperation, SvcError>;

    /// Start deleting a share.
    async fn start_delete_share(&self, share: &Share) -> Result<RawOperation, SvcError>;
}
