use super::FilerService;
use crate::errors::SvcError;
use filer_port::types::v0::transport::{
    InstancePath, InstanceState, MultishareInstance, OperationMetadata, RawOperation, Share,
};

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// In-memory filer backend used by the unit tests.
///
/// Listing returns the seeded resources as-is; start-* calls record an
/// operation handle and apply the mutation immediately.
pub(crate) struct FakeFilerService {
    instances: Mutex<Vec<MultishareInstance>>,
    shares: Mutex<Vec<Share>>,
    operations: Mutex<Vec<RawOperation>>,
    op_counter: AtomicU64,
}

impl FakeFilerService {
    /// New fake backend seeded with the given resources and operations.
    pub(crate) fn new(
        instances: Vec<MultishareInstance>,
        shares: Vec<Share>,
        operations: Vec<RawOperation>,
    ) -> Self {
        Self {
            instances: Mutex::new(instances),
            shares: Mutex::new(shares),
            operations: Mutex::new(operations),
            op_counter: AtomicU64::new(0),
        }
    }

    fn start_op(&self, target: String, verb: &str) -> RawOperation {
        let id = self.op_counter.fetch_add(1, Ordering::Relaxed);
        let operation = RawOperation {
            name: format!("operation-{id}"),
            done: false,
            metadata: Some(OperationMetadata {
                target,
                verb: verb.to_string(),
            }),
        };
        self.operations.lock().push(operation.clone());
        operation
    }

    fn instance_target(instance: &MultishareInstance) -> Result<InstancePath, SvcError> {
        instance
            .instance_path()
            .ok_or_else(|| SvcError::InvalidInstance {
                instance: instance.name.clone(),
            })
    }
}

#[async_trait]
impl FilerService for FakeFilerService {
    async fn list_instances(
        &self,
        _regions: &[String],
    ) -> Result<Vec<MultishareInstance>, SvcError> {
        // the fake holds a single flat view over every region
        Ok(self.instances.lock().clone())
    }

    async fn list_shares(&self, instance: &InstancePath) -> Result<Vec<Share>, SvcError> {
        Ok(self
            .shares
            .lock()
            .iter()
            .filter(|share| share.parent.instance_path().as_ref() == Some(instance))
            .cloned()
            .collect())
    }

    async fn list_operations(&self) -> Result<Vec<RawOperation>, SvcError> {
        Ok(self.operations.lock().clone())
    }

    async fn start_create_instance(
        &self,
        instance: &MultishareInstance,
    ) -> Result<RawOperation, SvcError> {
        let target = Self::instance_target(instance)?;
        let mut created = instance.clone();
        created.state = InstanceState::Creating;
        self.instances.lock().push(created);
        Ok(self.start_op(target.to_string(), "create"))
    }

    async fn start_update_instance(
        &self,
        instance: &MultishareInstance,
        new_bytes: u64,
    ) -> Result<RawOperation, SvcError> {
        let target = Self::instance_target(instance)?;
        if let Some(existing) = self
            .instances
            .lock()
            .iter_mut()
            .find(|i| i.instance_path().as_ref() == Some(&target))
        {
            existing.capacity_bytes = new_bytes;
        }
        Ok(self.start_op(target.to_string(), "update"))
    }

    async fn start_delete_instance(
        &self,
        instance: &MultishareInstance,
    ) -> Result<RawOperation, SvcError> {
        let target = Self::instance_target(instance)?;
        self.instances
            .lock()
            .retain(|i| i.instance_path().as_ref() != Some(&target));
        Ok(self.start_op(target.to_string(), "delete"))
    }

    async fn start_create_share(&self, share: &Share) -> Result<RawOperation, SvcError> {
        let target = share.share_path().ok_or_else(|| SvcError::InvalidShare {
            share: share.name.clone(),
        })?;
        self.shares.lock().push(share.clone());
        Ok(self.start_op(target.to_string(), "create"))
    }

    async fn start_update_share(&self, share: &Share) -> Result<RawOperation, SvcError> {
        let target = share.share_path().ok_or_else(|| SvcError::InvalidShare {
            share: share.name.clone(),
        })?;
        if let Some(existing) = self
            .shares
            .lock()
            .iter_mut()
            .find(|s| s.share_path().as_ref() == Some(&target))
        {
            existing.capacity_bytes = share.capacity_bytes;
        }
        Ok(self.start_op(target.to_string(), "update"))
    }

    async fn start_delete_share(&self, share: &Share) -> Result<RawOperation, SvcError> {
        let target = share.share_path().ok_or_else(|| SvcError::InvalidShare {
            share: share.name.clone(),
        })?;
        self.shares
            .lock()
            .retain(|s| s.share_path().as_ref() != Some(&target));
        Ok(self.start_op(target.to_string(), "delete"))
    }
}
