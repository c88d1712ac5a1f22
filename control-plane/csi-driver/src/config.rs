use agents::multishare::{FeatureMaxSharesPerInstance, FeatureOptions};

use anyhow::Context;
use clap::ArgMatches;
use once_cell::sync::OnceCell;

static CONFIG: OnceCell<CsiControllerConfig> = OnceCell::new();

/// Global CSI controller config.
pub struct CsiControllerConfig {
    /// The project instances are provisioned in.
    project: String,
    /// The regions instances are looked up across.
    regions: Vec<String>,
    /// Location of the cluster this controller runs for.
    cluster_location: String,
    /// Name of the cluster this controller runs for.
    cluster_name: String,
    /// Feature options handed to the placement core.
    features: FeatureOptions,
}

impl CsiControllerConfig {
    /// Initialize global instance of the CSI config. Must be called prior
    /// to using the config.
    pub fn initialize(args: &ArgMatches) -> anyhow::Result<()> {
        assert!(
            CONFIG.get().is_none(),
            "CSI Controller config already initialized"
        );

        let project = args
            .value_of("project")
            .context("project must be specified")?
            .to_string();

        let regions = args
            .values_of("regions")
            .context("at least one region must be specified")?
            .map(ToString::to_string)
            .collect::<Vec<_>>();

        let cluster_location = args
            .value_of("cluster-location")
            .context("cluster location must be specified")?
            .to_string();

        let cluster_name = args
            .value_of("cluster-name")
            .context("cluster name must be specified")?
            .to_string();

        let max_shares_per_instance = if args.is_present("max-shares-per-instance") {
            let default_cap = match args.value_of("max-shares-default-cap") {
                Some(cap) => cap
                    .parse::<u64>()
                    .context("max-shares-default-cap must be a positive integer")?,
                None => utils::DEFAULT_MAX_SHARES_PER_INSTANCE,
            };
            Some(FeatureMaxSharesPerInstance {
                enabled: true,
                default_cap,
            })
        } else {
            None
        };

        CONFIG.get_or_init(|| Self {
            project,
            regions,
            cluster_location,
            cluster_name,
            features: FeatureOptions {
                max_shares_per_instance,
            },
        });
        Ok(())
    }

    /// Get global instance of CSI controller config.
    pub fn get_config() -> &'static CsiControllerConfig {
        CONFIG
            .get()
            .expect("CSI Controller config is not initialized")
    }

    /// The project instances are provisioned in.
    pub fn project(&self) -> &str {
        &self.project
    }

    /// The regions instances are looked up across.
    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    /// Location of the cluster this controller runs for.
    pub fn cluster_location(&self) -> &str {
        &self.cluster_location
    }

    /// Name of the cluster this controller runs for.
    pub fn cluster_name(&self) -> &str {
        &self.cluster_name
    }

    /// Feature options handed to the placement core.
    pub fn features(&self) -> FeatureOptions {
        self.features.clone()
    }
}
