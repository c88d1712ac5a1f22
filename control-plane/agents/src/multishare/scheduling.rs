//! Candidate-instance selection for a new share, in filter-pipeline form.
//!
//! The candidate list is filtered down through a chain of compatibility
//! predicates; each predicate sees the request context and one candidate.

use crate::errors::SvcError;
use filer_port::types::v0::transport::{CreateShare, MultishareInstance};

use ipnetwork::Ipv4Network;
use std::net::Ipv4Addr;

/// Container of context and a list of items to be filtered down.
pub(crate) struct ResourceData<C, I> {
    context: C,
    list: Vec<I>,
}

impl<C, I> ResourceData<C, I> {
    /// Create a new `Self`.
    pub(crate) fn new(context: C, list: Vec<I>) -> Self {
        Self { context, list }
    }
}

/// A filter pipeline over a list of candidate items.
pub(crate) trait ResourceFilter: Sized {
    type Request;
    type Item;

    fn data(&mut self) -> &mut ResourceData<Self::Request, Self::Item>;

    fn filter<F: FnMut(&Self::Request, &Self::Item) -> bool>(mut self, mut filter: F) -> Self {
        let data = self.data();
        data.list.retain(|v| filter(&data.context, v));
        self
    }
    fn sort<F: FnMut(&Self::Item, &Self::Item) -> std::cmp::Ordering>(mut self, sort: F) -> Self {
        let data = self.data();
        data.list.sort_by(sort);
        self
    }
    fn collect(self) -> Vec<Self::Item>;
}

/// Request context when matching candidate instances for a new share: the
/// target prototype the request describes, plus the reserved range the
/// candidates' addresses must fall within.
pub(crate) struct AddShareContext {
    target: MultishareInstance,
    reserved_cidr: Option<Ipv4Network>,
}

impl AddShareContext {
    /// The prototype instance the request describes.
    pub(crate) fn target(&self) -> &MultishareInstance {
        &self.target
    }
    /// The reserved range constraint, when the request carries one.
    pub(crate) fn reserved_cidr(&self) -> Option<Ipv4Network> {
        self.reserved_cidr
    }
}

/// Filter pipeline over candidate instances for a new share.
pub(crate) struct AddShareToInstance {
    data: ResourceData<AddShareContext, MultishareInstance>,
}

impl ResourceFilter for AddShareToInstance {
    type Request = AddShareContext;
    type Item = MultishareInstance;

    fn data(&mut self) -> &mut ResourceData<Self::Request, Self::Item> {
        &mut self.data
    }

    fn collect(self) -> Vec<Self::Item> {
        self.data.list
    }
}

impl AddShareToInstance {
    fn builder(
        candidates: Vec<MultishareInstance>,
        target: &MultishareInstance,
        reserved_cidr: Option<Ipv4Network>,
    ) -> Self {
        Self {
            data: ResourceData::new(
                AddShareContext {
                    target: target.clone(),
                    reserved_cidr,
                },
                candidates,
            ),
        }
    }

    /// Builder with every compatibility predicate applied.
    pub(crate) fn builder_with_defaults(
        candidates: Vec<MultishareInstance>,
        target: &MultishareInstance,
        reserved_cidr: Option<Ipv4Network>,
    ) -> Self {
        Self::builder(candidates, target, reserved_cidr)
            .filter(InstanceFilters::owned)
            .filter(InstanceFilters::location)
            .filter(InstanceFilters::tier)
            .filter(InstanceFilters::network)
            .filter(InstanceFilters::cmek)
            .filter(InstanceFilters::reserved_cidr)
    }
}

/// Filter the candidate instances when placing a new share.
pub(crate) struct InstanceFilters {}
impl InstanceFilters {
    /// Should only allow instances carrying this controller's fingerprint
    /// and cluster identity labels.
    pub(crate) fn owned(request: &AddShareContext, item: &MultishareInstance) -> bool {
        item.matches_ownership(request.target())
    }

    /// Should only allow instances in the target location.
    pub(crate) fn location(request: &AddShareContext, item: &MultishareInstance) -> bool {
        item.location == request.target().location
    }

    /// Should only allow instances of the requested capability tier.
    pub(crate) fn tier(request: &AddShareContext, item: &MultishareInstance) -> bool {
        item.tier == request.target().tier
    }

    /// Should only allow instances attached to the requested network with
    /// the requested connect mode.
    pub(crate) fn network(request: &AddShareContext, item: &MultishareInstance) -> bool {
        item.network.name == request.target().network.name
            && item.network.connect_mode == request.target().network.connect_mode
    }

    /// Should only allow instances with the requested CMEK configuration;
    /// both sides empty means backend-managed keys on both.
    pub(crate) fn cmek(request: &AddShareContext, item: &MultishareInstance) -> bool {
        item.kms_key_name == request.target().kms_key_name
    }

    /// Should only allow instances addressed within the reserved range,
    /// when the request carries one.
    pub(crate) fn reserved_cidr(request: &AddShareContext, item: &MultishareInstance) -> bool {
        match request.reserved_cidr() {
            None => true,
            Some(cidr) => item
                .network
                .ip
                .parse::<Ipv4Addr>()
                .map(|ip| cidr.contains(ip))
                .unwrap_or(false),
        }
    }
}

/// Parse the request's reserved CIDR literal, when supplied.
pub(crate) fn parse_reserved_cidr(
    request: &CreateShare,
) -> Result<Option<Ipv4Network>, SvcError> {
    match &request.reserved_ipv4_cidr {
        None => Ok(None),
        Some(cidr) => cidr
            .parse::<Ipv4Network>()
            .map(Some)
            .map_err(|error| SvcError::InvalidArguments {
                detail: format!("invalid reserved-ipv4-cidr '{cidr}': {error}"),
            }),
    }
}
