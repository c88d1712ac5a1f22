use agents::errors::SvcError;
use filer_port::types::v0::transport::{
    ConnectMode, CreateShare, InstanceNetwork, MultishareInstance,
};
use utils::{cluster_location_key, cluster_name_key, sc_fingerprint_key};

use std::collections::HashMap;
use strum_macros::{AsRefStr, Display, EnumString};

/// The various volume context parameters.
#[derive(AsRefStr, EnumString, Display)]
pub enum Parameters {
    /// The storage-class fingerprint instances are packed by. Required.
    #[strum(serialize = "multishare-instance-sc-label")]
    MultishareInstanceScLabel,
    /// Capability tier of the hosting instance.
    #[strum(serialize = "tier")]
    Tier,
    /// Consumer VPC network of the hosting instance.
    #[strum(serialize = "network")]
    Network,
    /// How the consumer network reaches the filer.
    #[strum(serialize = "connect-mode")]
    ConnectMode,
    /// Customer-managed encryption key for the hosting instance.
    #[strum(serialize = "instance-encryption-kms-key")]
    InstanceEncryptionKmsKey,
    /// IPv4 CIDR literal the instance address must fall within.
    #[strum(serialize = "reserved-ipv4-cidr")]
    ReservedIpv4Cidr,
}

/// Share creation parameters decoded from a `CreateVolume` parameter map,
/// with the documented defaults applied.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CreateParams {
    sc_fingerprint: String,
    tier: String,
    network: String,
    connect_mode: ConnectMode,
    kms_key_name: Option<String>,
    reserved_ipv4_cidr: Option<String>,
}

impl CreateParams {
    /// Get the `Parameters::MultishareInstanceScLabel` value.
    pub fn sc_fingerprint(&self) -> &str {
        &self.sc_fingerprint
    }
    /// Get the `Parameters::Tier` value.
    pub fn tier(&self) -> &str {
        &self.tier
    }
    /// Get the `Parameters::Network` value.
    pub fn network(&self) -> &str {
        &self.network
    }
    /// Get the `Parameters::ConnectMode` value.
    pub fn connect_mode(&self) -> ConnectMode {
        self.connect_mode
    }
    /// Get the `Parameters::InstanceEncryptionKmsKey` value.
    pub fn kms_key_name(&self) -> &Option<String> {
        &self.kms_key_name
    }
    /// Get the `Parameters::ReservedIpv4Cidr` value.
    pub fn reserved_ipv4_cidr(&self) -> &Option<String> {
        &self.reserved_ipv4_cidr
    }

    /// The prototype instance a request asks candidates to match, carrying
    /// the storage-class fingerprint and cluster identity labels.
    pub fn target_instance(
        &self,
        name: &str,
        project: &str,
        location: &str,
        cluster_location: &str,
        cluster_name: &str,
    ) -> MultishareInstance {
        MultishareInstance {
            project: project.to_string(),
            location: location.to_string(),
            name: name.to_string(),
            tier: self.tier.clone(),
            network: InstanceNetwork {
                name: self.network.clone(),
                connect_mode: self.connect_mode,
                reserved_ip_range: self.reserved_ipv4_cidr.clone().unwrap_or_default(),
                ip: String::new(),
            },
            kms_key_name: self.kms_key_name.clone().unwrap_or_default(),
            labels: HashMap::from([
                (sc_fingerprint_key(), self.sc_fingerprint.clone()),
                (cluster_location_key(), cluster_location.to_string()),
                (cluster_name_key(), cluster_name.to_string()),
            ]),
            ..Default::default()
        }
    }

    /// The transport payload handed to the placement core.
    pub fn create_share(&self, name: &str, capacity_bytes: u64) -> CreateShare {
        CreateShare {
            name: name.to_string(),
            capacity_bytes,
            reserved_ipv4_cidr: self.reserved_ipv4_cidr.clone(),
        }
    }
}

impl TryFrom<&HashMap<String, String>> for CreateParams {
    type Error = SvcError;

    fn try_from(args: &HashMap<String, String>) -> Result<Self, Self::Error> {
        let sc_fingerprint = args
            .get(Parameters::MultishareInstanceScLabel.as_ref())
            .cloned()
            .ok_or_else(|| SvcError::InvalidArguments {
                detail: format!(
                    "the '{}' parameter is required",
                    Parameters::MultishareInstanceScLabel
                ),
            })?;

        let tier = args
            .get(Parameters::Tier.as_ref())
            .cloned()
            .unwrap_or_else(|| utils::DEFAULT_TIER.to_string());

        let network = args
            .get(Parameters::Network.as_ref())
            .cloned()
            .unwrap_or_else(|| utils::DEFAULT_NETWORK.to_string());

        let connect_mode = match args.get(Parameters::ConnectMode.as_ref()) {
            Some(mode) => mode
                .parse::<ConnectMode>()
                .map_err(|_| SvcError::InvalidArguments {
                    detail: format!("invalid connect-mode '{mode}'"),
                })?,
            None => ConnectMode::default(),
        };

        let kms_key_name = args
            .get(Parameters::InstanceEncryptionKmsKey.as_ref())
            .cloned();

        let reserved_ipv4_cidr = args.get(Parameters::ReservedIpv4Cidr.as_ref()).cloned();

        Ok(Self {
            sc_fingerprint,
            tier,
            network,
            connect_mode,
            kms_key_name,
            reserved_ipv4_cidr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn defaults_are_applied() {
        let args = params(&[("multishare-instance-sc-label", "test-fingerprint")]);
        let decoded = CreateParams::try_from(&args).unwrap();
        assert_eq!(decoded.sc_fingerprint(), "test-fingerprint");
        assert_eq!(decoded.tier(), utils::DEFAULT_TIER);
        assert_eq!(decoded.network(), utils::DEFAULT_NETWORK);
        assert_eq!(decoded.connect_mode(), ConnectMode::DirectPeering);
        assert_eq!(decoded.kms_key_name(), &None);
        assert_eq!(decoded.reserved_ipv4_cidr(), &None);
    }

    #[test]
    fn missing_fingerprint_is_rejected() {
        let args = params(&[("tier", "enterprise")]);
        let error = CreateParams::try_from(&args).unwrap_err();
        assert!(matches!(error, SvcError::InvalidArguments { .. }));
    }

    #[test]
    fn explicit_values_are_decoded() {
        let args = params(&[
            ("multishare-instance-sc-label", "test-fingerprint"),
            ("tier", "enterprise"),
            ("network", "test-vpc-network"),
            ("connect-mode", "private-service-access"),
            ("instance-encryption-kms-key", "projects/p/locations/l/keyRings/r/cryptoKeys/k"),
            ("reserved-ipv4-cidr", "10.0.0.0/24"),
        ]);
        let decoded = CreateParams::try_from(&args).unwrap();
        assert_eq!(decoded.tier(), "enterprise");
        assert_eq!(decoded.network(), "test-vpc-network");
        assert_eq!(decoded.connect_mode(), ConnectMode::PrivateServiceAccess);
        assert_eq!(
            decoded.kms_key_name().as_deref(),
            Some("projects/p/locations/l/keyRings/r/cryptoKeys/k")
        );
        assert_eq!(decoded.reserved_ipv4_cidr().as_deref(), Some("10.0.0.0/24"));
    }

    #[test]
    fn invalid_connect_mode_is_rejected() {
        let args = params(&[
            ("multishare-instance-sc-label", "test-fingerprint"),
            ("connect-mode", "vpn"),
        ]);
        let error = CreateParams::try_from(&args).unwrap_err();
        assert!(matches!(error, SvcError::InvalidArguments { .. }));
    }

    #[test]
    fn target_instance_carries_the_ownership_labels() {
        let args = params(&[
            ("multishare-instance-sc-label", "test-fingerprint"),
            ("reserved-ipv4-cidr", "10.0.0.0/24"),
        ]);
        let decoded = CreateParams::try_from(&args).unwrap();
        let target = decoded.target_instance(
            "test-target-instance",
            "test-project",
            "us-central1",
            "us-central1-c",
            "test-cluster",
        );
        assert_eq!(
            target.label(&sc_fingerprint_key()),
            Some("test-fingerprint")
        );
        assert_eq!(target.label(&cluster_location_key()), Some("us-central1-c"));
        assert_eq!(target.label(&cluster_name_key()), Some("test-cluster"));
        assert_eq!(target.network.reserved_ip_range, "10.0.0.0/24");
        assert_eq!(target.tier, utils::DEFAULT_TIER);

        let share = decoded.create_share("test-share", 100 * utils::GIB);
        assert_eq!(share.capacity_bytes, 100 * utils::GIB);
        assert_eq!(share.reserved_ipv4_cidr.as_deref(), Some("10.0.0.0/24"));
    }
}
