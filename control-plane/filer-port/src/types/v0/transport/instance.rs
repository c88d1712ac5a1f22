use super::resource::InstancePath;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum_macros::{Display, EnumString};
use utils::{cluster_location_key, cluster_name_key, sc_fingerprint_key};

/// Connection mode between the consumer VPC network and a filer instance.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ConnectMode {
    /// The consumer network is peered directly with the filer service network.
    DirectPeering,
    /// Access goes through a private service connection.
    PrivateServiceAccess,
}

impl Default for ConnectMode {
    fn default() -> Self {
        Self::DirectPeering
    }
}

/// Observed lifecycle state of a multishare instance.
///
/// Transitions are observed, not commanded: the backend owns the state
/// machine and the control plane only reads it. Only `Ready` instances
/// accept share operations.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstanceState {
    /// The instance is being provisioned.
    Creating,
    /// The instance accepts share operations.
    Ready,
    /// The backend is repairing the instance; it will return to `Ready`.
    Repairing,
    /// The instance is being torn down.
    Deleting,
    /// The instance is unusable until external intervention.
    Error,
    /// The instance is suspended until external intervention.
    Suspended,
    /// Any state this control plane does not recognise.
    Unknown,
}

impl Default for InstanceState {
    fn default() -> Self {
        Self::Unknown
    }
}

impl InstanceState {
    /// Parse a backend state string, mapping unrecognised states to `Unknown`.
    pub fn from_backend(state: &str) -> Self {
        state.parse().unwrap_or(Self::Unknown)
    }
}

/// Network attachment of a multishare instance.
#[derive(Serialize, Deserialize, Debug, Clone, Default, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InstanceNetwork {
    /// Name of the consumer VPC network.
    pub name: String,
    /// How the consumer network reaches the filer.
    pub connect_mode: ConnectMode,
    /// Address range reserved for the instance, as reported by the backend.
    pub reserved_ip_range: String,
    /// Address assigned to the instance within the reserved range.
    pub ip: String,
}

/// A backing filer hosting multiple logical shares.
#[derive(Serialize, Deserialize, Debug, Clone, Default, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MultishareInstance {
    /// The project the instance lives in.
    pub project: String,
    /// The location the instance lives in.
    pub location: String,
    /// Instance name, unique within `(project, location)`.
    pub name: String,
    /// Capability class of the instance.
    pub tier: String,
    /// Network attachment.
    pub network: InstanceNetwork,
    /// Customer-managed encryption key, empty when the backend manages keys.
    pub kms_key_name: String,
    /// Backend labels; controller-owned instances carry the fingerprint and
    /// cluster identity labels.
    pub labels: HashMap<String, String>,
    /// Currently provisioned size.
    pub capacity_bytes: u64,
    /// Policy-configured share ceiling, 0 meaning the default applies.
    pub max_share_count: u64,
    /// Observed lifecycle state.
    pub state: InstanceState,
}

impl MultishareInstance {
    /// Typed identity, available only when project, location and name are
    /// all set.
    pub fn instance_path(&self) -> Option<InstancePath> {
        if self.project.is_empty() || self.location.is_empty() || self.name.is_empty() {
            return None;
        }
        Some(InstancePath::new(&self.project, &self.location, &self.name))
    }

    /// The label value under `key`, when present.
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    /// Whether this instance carries the same storage-class fingerprint and
    /// cluster identity labels as `target`. A missing label on either side
    /// is a mismatch.
    pub fn matches_ownership(&self, target: &Self) -> bool {
        [
            sc_fingerprint_key(),
            cluster_location_key(),
            cluster_name_key(),
        ]
        .iter()
        .all(
            |key| matches!((self.labels.get(key), target.labels.get(key)), (Some(ours), Some(theirs)) if ours == theirs),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_state_parsing() {
        assert_eq!(InstanceState::from_backend("READY"), InstanceState::Ready);
        assert_eq!(
            InstanceState::from_backend("REPAIRING"),
            InstanceState::Repairing
        );
        assert_eq!(
            InstanceState::from_backend("RESTORING"),
            InstanceState::Unknown
        );
        assert_eq!(InstanceState::Creating.to_string(), "CREATING");
    }

    #[test]
    fn identity_requires_all_segments() {
        let mut instance = MultishareInstance {
            project: "p".into(),
            location: "l".into(),
            name: "i".into(),
            ..Default::default()
        };
        assert!(instance.instance_path().is_some());
        instance.location = String::new();
        assert!(instance.instance_path().is_none());
    }

    #[test]
    fn ownership_requires_all_three_labels() {
        let target = MultishareInstance {
            labels: HashMap::from([
                (sc_fingerprint_key(), "fp".to_string()),
                (cluster_location_key(), "loc".to_string()),
                (cluster_name_key(), "cluster".to_string()),
            ]),
            ..Default::default()
        };
        let mut instance = target.clone();
        assert!(instance.matches_ownership(&target));
        instance.labels.remove(&cluster_name_key());
        assert!(!instance.matches_ownership(&target));
    }
}
