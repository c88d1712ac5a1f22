//! Placement and operations management for multishare filer instances.
//!
//! Many logical shares are packed onto a smaller pool of backing filer
//! instances. For every new share the [`MultishareOpsManager`] decides
//! whether to place it on an existing instance, grow an instance to fit
//! it, provision a new instance, or wait for in-flight backend mutations
//! to settle. The backend exposes no transactions: resource listing and
//! long-running operation discovery are the only synchronisation
//! primitives, so correctness hinges on taking an operations snapshot
//! before classifying candidates and never creating an instance while a
//! matched instance is still mutating.

use crate::{errors::SvcError, filer::FilerService};
use filer_port::types::v0::transport::{CreateShare, MultishareInstance, Share};

use std::sync::Arc;

pub mod capacity;
pub mod eligibility;
pub mod ops;
pub(crate) mod scheduling;

pub use eligibility::EligibleInstanceCheck;

/// Feature toggle for honouring per-instance share-count ceilings.
#[derive(Debug, Clone)]
pub struct FeatureMaxSharesPerInstance {
    /// Whether per-instance `max_share_count` values are honoured.
    pub enabled: bool,
    /// Ceiling applied to instances which do not carry their own.
    pub default_cap: u64,
}

impl Default for FeatureMaxSharesPerInstance {
    fn default() -> Self {
        Self {
            enabled: false,
            default_cap: utils::DEFAULT_MAX_SHARES_PER_INSTANCE,
        }
    }
}

/// Feature options consumed by the placement core.
#[derive(Debug, Clone, Default)]
pub struct FeatureOptions {
    /// Per-instance share-count ceilings.
    pub max_shares_per_instance: Option<FeatureMaxSharesPerInstance>,
}

/// The outcome of a placement decision for one new share.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum PlacementDecision {
    /// Create the share on this instance as-is.
    PlaceOn(MultishareInstance),
    /// Grow the instance to `target_bytes`, then create the share on it.
    ExpandThenPlace {
        /// The instance to grow.
        instance: MultishareInstance,
        /// The provisioned size the instance must reach first.
        target_bytes: u64,
    },
    /// No matched instance can host the share; provision a new instance.
    CreateInstance,
    /// A matched instance is still mutating; retry later.
    Wait,
}

/// Drives the multishare placement state machine against the filer backend.
///
/// The manager holds no mutable state of its own: the backend is the sole
/// authority and every decision starts from a fresh snapshot of it.
pub struct MultishareOpsManager {
    filer: Arc<dyn FilerService>,
    features: FeatureOptions,
}

impl MultishareOpsManager {
    /// New manager over the given filer backend.
    pub fn new(filer: Arc<dyn FilerService>, features: FeatureOptions) -> Self {
        Self { filer, features }
    }

    pub(crate) fn filer(&self) -> &Arc<dyn FilerService> {
        &self.filer
    }

    pub(crate) fn features(&self) -> &FeatureOptions {
        &self.features
    }

    /// Decide where a new share goes.
    ///
    /// Takes an operations snapshot, classifies the matched instances and
    /// returns exactly one decision. A new instance is never requested
    /// while any matched instance has a mutation in flight; when a ready
    /// instance exists it is preferred over waiting out the mutations on
    /// its siblings.
    pub async fn plan_share_placement(
        &self,
        request: &CreateShare,
        target: &MultishareInstance,
        regions: &[String],
    ) -> Result<PlacementDecision, SvcError> {
        let ops = self.list_multishare_resource_running_ops().await?;
        let check = self
            .run_eligible_instance_check(request, &ops, target, regions)
            .await?;

        if let Some(instance) = self.pick_best_fit(&check.ready).await? {
            let share = Share {
                name: request.name.clone(),
                parent: instance.clone(),
                capacity_bytes: request.capacity_bytes,
            };
            let (needs_expand, target_bytes) = self
                .instance_needs_expand(&share, request.capacity_bytes)
                .await?;
            if needs_expand {
                tracing::debug!(
                    instance = %instance.name,
                    target_bytes,
                    "instance must grow before hosting the share"
                );
                return Ok(PlacementDecision::ExpandThenPlace {
                    instance,
                    target_bytes,
                });
            }
            return Ok(PlacementDecision::PlaceOn(instance));
        }

        if check.non_ready_count > 0 {
            tracing::debug!(
                non_ready = check.non_ready_count,
                "matched instances are still mutating, waiting"
            );
            return Ok(PlacementDecision::Wait);
        }

        Ok(PlacementDecision::CreateInstance)
    }

    /// Best-fit choice among ready instances: least used bytes first, then
    /// lexicographic name for determinism.
    async fn pick_best_fit(
        &self,
        ready: &[MultishareInstance],
    ) -> Result<Option<MultishareInstance>, SvcError> {
        let mut scored = Vec::with_capacity(ready.len());
        for instance in ready {
            let path = ops::instance_path(instance)?;
            let used = self
                .filer
                .list_shares(&path)
                .await?
                .iter()
                .map(|share| share.capacity_bytes)
                .sum::<u64>();
            scored.push((used, instance.clone()));
        }
        scored.sort_by(|(used_a, a), (used_b, b)| {
            used_a.cmp(used_b).then_with(|| a.name.cmp(&b.name))
        });
        Ok(scored.into_iter().next().map(|(_, instance)| instance))
    }
}
