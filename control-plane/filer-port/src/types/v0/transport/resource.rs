use snafu::Snafu;
use std::{fmt, str::FromStr};

/// Error returned when a backend resource path does not name an instance
/// or a share.
#[derive(Debug, Snafu)]
#[snafu(display("'{}' is not an instance or share resource path", path))]
pub struct ResourcePathError {
    /// The offending path.
    pub path: String,
}

/// Fully qualified identity of a multishare instance.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct InstancePath {
    project: String,
    location: String,
    instance: String,
}

impl InstancePath {
    /// New instance identity from its path segments.
    pub fn new(
        project: impl Into<String>,
        location: impl Into<String>,
        instance: impl Into<String>,
    ) -> Self {
        Self {
            project: project.into(),
            location: location.into(),
            instance: instance.into(),
        }
    }
    /// The project the instance lives in.
    pub fn project(&self) -> &str {
        &self.project
    }
    /// The location the instance lives in.
    pub fn location(&self) -> &str {
        &self.location
    }
    /// The instance name.
    pub fn instance(&self) -> &str {
        &self.instance
    }
}

impl fmt::Display for InstancePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "projects/{}/locations/{}/instances/{}",
            self.project, self.location, self.instance
        )
    }
}

/// Fully qualified identity of a share, embedding its parent instance.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SharePath {
    instance: InstancePath,
    share: String,
}

impl SharePath {
    /// New share identity beneath the given instance.
    pub fn new(instance: InstancePath, share: impl Into<String>) -> Self {
        Self {
            instance,
            share: share.into(),
        }
    }
    /// The instance hosting the share.
    pub fn instance(&self) -> &InstancePath {
        &self.instance
    }
    /// The share name.
    pub fn share(&self) -> &str {
        &self.share
    }
}

impl fmt::Display for SharePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/shares/{}", self.instance, self.share)
    }
}

/// Typed identity parsed from a canonical backend resource path.
///
/// Parsing is total over the two collections the control plane tracks:
/// any other collection (backups, snapshots, ...) is an error. A share
/// path embeds its instance path, so the instance-prefix relation is
/// structural rather than textual.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ResourcePath {
    /// A multishare instance.
    Instance(InstancePath),
    /// A share hosted on a multishare instance.
    Share(SharePath),
}

impl ResourcePath {
    /// Parse a canonical resource path of either form:
    /// `projects/{P}/locations/{L}/instances/{I}` or
    /// `projects/{P}/locations/{L}/instances/{I}/shares/{S}`.
    pub fn parse(path: &str) -> Result<Self, ResourcePathError> {
        let error = || ResourcePathError {
            path: path.to_string(),
        };
        let segments = path.split('/').collect::<Vec<_>>();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(error());
        }
        match segments.as_slice() {
            ["projects", project, "locations", location, "instances", instance] => Ok(
                Self::Instance(InstancePath::new(*project, *location, *instance)),
            ),
            ["projects", project, "locations", location, "instances", instance, "shares", share] => {
                Ok(Self::Share(SharePath::new(
                    InstancePath::new(*project, *location, *instance),
                    *share,
                )))
            }
            _ => Err(error()),
        }
    }

    /// The instance this path refers to, directly or as a share's parent.
    pub fn instance(&self) -> &InstancePath {
        match self {
            Self::Instance(instance) => instance,
            Self::Share(share) => share.instance(),
        }
    }

    /// The share name, for share paths.
    pub fn share_name(&self) -> Option<&str> {
        match self {
            Self::Instance(_) => None,
            Self::Share(share) => Some(share.share()),
        }
    }

    /// True when the path targets `instance` itself or any share beneath it.
    pub fn is_on_instance(&self, instance: &InstancePath) -> bool {
        self.instance() == instance
    }

    /// True only when the path targets `instance` itself.
    pub fn is_instance_exactly(&self, instance: &InstancePath) -> bool {
        matches!(self, Self::Instance(this) if this == instance)
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instance(instance) => instance.fmt(f),
            Self::Share(share) => share.fmt(f),
        }
    }
}

impl FromStr for ResourcePath {
    type Err = ResourcePathError;
    fn from_str(path: &str) -> Result<Self, Self::Err> {
        Self::parse(path)
    }
}
