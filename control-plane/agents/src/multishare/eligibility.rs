//! Classification of matched instances into ready, non-ready and
//! ineligible candidates.

use super::{
    ops,
    scheduling::{self, AddShareToInstance, ResourceFilter},
    MultishareOpsManager,
};
use crate::errors::SvcError;
use filer_port::types::v0::transport::{
    CreateShare, InstanceState, MultishareInstance, OpInfo, OperationType,
};
use utils::DEFAULT_MAX_SHARES_PER_INSTANCE;

/// Outcome of the eligibility pass over matched instances.
///
/// Non-ready means wait and retry: a mutation is in flight and its outcome
/// is observable later. Ineligible instances are never candidates for this
/// request and are excluded silently so their teardown does not stall new
/// placements.
#[derive(Debug, Default, Clone)]
pub struct EligibleInstanceCheck {
    /// Instances a new share may be placed on right now.
    pub ready: Vec<MultishareInstance>,
    /// Matched instances whose mutations must settle before they can be
    /// classified.
    pub non_ready_count: usize,
}

impl EligibleInstanceCheck {
    /// The back-pressure error, when any matched instance is still
    /// mutating. The ready list is carried alongside so callers may choose
    /// to proceed with a ready instance rather than wait.
    pub fn unavailable(&self) -> Option<SvcError> {
        (self.non_ready_count > 0).then(|| SvcError::Unavailable {
            non_ready: self.non_ready_count,
        })
    }
}

impl MultishareOpsManager {
    /// List the instances, across the enumerated regions, whose attributes
    /// are compatible with the target descriptor.
    pub async fn list_matched_instances(
        &self,
        request: &CreateShare,
        target: &MultishareInstance,
        regions: &[String],
    ) -> Result<Vec<MultishareInstance>, SvcError> {
        let reserved_cidr = scheduling::parse_reserved_cidr(request)?;
        let candidates = self.filer().list_instances(regions).await?;
        Ok(AddShareToInstance::builder_with_defaults(candidates, target, reserved_cidr).collect())
    }

    /// Classify every matched instance against the operations snapshot.
    ///
    /// The snapshot must be captured before the instances are listed;
    /// helpers never re-query the backend mid-decision.
    pub async fn run_eligible_instance_check(
        &self,
        request: &CreateShare,
        ops: &[OpInfo],
        target: &MultishareInstance,
        regions: &[String],
    ) -> Result<EligibleInstanceCheck, SvcError> {
        let matched = self.list_matched_instances(request, target, regions).await?;
        let mut check = EligibleInstanceCheck::default();

        for instance in matched {
            match instance.state {
                InstanceState::Ready => {
                    match ops::contains_op_with_instance_target_prefix(&instance, ops)? {
                        Some(op) if op.op_type == OperationType::InstanceDelete => {
                            tracing::debug!(
                                instance = %instance.name,
                                "instance is being deleted, skipped"
                            );
                        }
                        Some(op) => {
                            tracing::debug!(
                                instance = %instance.name,
                                op = %op.id,
                                op_type = %op.op_type,
                                "instance has a mutation in flight"
                            );
                            check.non_ready_count += 1;
                        }
                        None => {
                            if self.below_share_cap(&instance).await? {
                                check.ready.push(instance);
                            } else {
                                tracing::debug!(
                                    instance = %instance.name,
                                    "instance is at its share ceiling, skipped"
                                );
                            }
                        }
                    }
                }
                InstanceState::Creating | InstanceState::Repairing => {
                    check.non_ready_count += 1;
                }
                InstanceState::Deleting
                | InstanceState::Error
                | InstanceState::Suspended
                | InstanceState::Unknown => {
                    tracing::debug!(
                        instance = %instance.name,
                        state = %instance.state,
                        "instance cannot host new shares, skipped"
                    );
                }
            }
        }

        if let Some(error) = check.unavailable() {
            tracing::warn!(error = %error, "matched instances have not settled");
        }
        Ok(check)
    }

    /// Whether the instance hosts fewer shares than its ceiling.
    async fn below_share_cap(&self, instance: &MultishareInstance) -> Result<bool, SvcError> {
        let path = ops::instance_path(instance)?;
        let resident = self.filer().list_shares(&path).await?.len() as u64;
        Ok(resident < self.share_cap(instance))
    }

    /// The share-count ceiling for an instance under the current feature
    /// options.
    fn share_cap(&self, instance: &MultishareInstance) -> u64 {
        match &self.features().max_shares_per_instance {
            Some(feature) if feature.enabled => {
                if instance.max_share_count > 0 {
                    instance.max_share_count
                } else {
                    feature.default_cap
                }
            }
            _ => DEFAULT_MAX_SHARES_PER_INSTANCE,
        }
    }
}
