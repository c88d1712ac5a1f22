use super::resource::ResourcePath;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// The kind of backend mutation a long-running operation performs.
///
/// Exhaustive over the verbs the control plane recognises; anything else
/// degrades to `Unknown` and is tracked only when it targets an instance
/// or a share.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq, Display, EnumString)]
pub enum OperationType {
    /// An instance is being provisioned.
    InstanceCreate,
    /// An instance is being reconfigured or grown.
    InstanceUpdate,
    /// An instance is being torn down.
    InstanceDelete,
    /// A share is being created.
    ShareCreate,
    /// A share is being reconfigured or resized.
    ShareUpdate,
    /// A share is being deleted.
    ShareDelete,
    /// A verb this control plane does not recognise.
    Unknown,
}

impl OperationType {
    /// Classify a backend verb against the resource the operation targets.
    pub fn classify(verb: &str, target: &ResourcePath) -> Self {
        match (verb, target) {
            ("create", ResourcePath::Instance(_)) => Self::InstanceCreate,
            ("update", ResourcePath::Instance(_)) => Self::InstanceUpdate,
            ("delete", ResourcePath::Instance(_)) => Self::InstanceDelete,
            ("create", ResourcePath::Share(_)) => Self::ShareCreate,
            ("update", ResourcePath::Share(_)) => Self::ShareUpdate,
            ("delete", ResourcePath::Share(_)) => Self::ShareDelete,
            _ => Self::Unknown,
        }
    }
}

/// Metadata attached to a backend long-running operation.
#[derive(Serialize, Deserialize, Debug, Clone, Default, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OperationMetadata {
    /// Resource path the operation mutates.
    pub target: String,
    /// Backend verb, e.g. `create`.
    pub verb: String,
}

/// A backend long-running operation as returned by the filer API.
#[derive(Serialize, Deserialize, Debug, Clone, Default, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawOperation {
    /// Operation name, unique within the backend.
    pub name: String,
    /// Whether the operation has completed.
    pub done: bool,
    /// Operation metadata; absent on malformed backend responses.
    pub metadata: Option<OperationMetadata>,
}

/// A running backend operation, narrowed to instance and share mutations.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct OpInfo {
    /// Operation identifier.
    pub id: String,
    /// Typed identity of the mutated resource.
    pub target: ResourcePath,
    /// The kind of mutation in flight.
    pub op_type: OperationType,
}

impl OpInfo {
    /// Build from a raw backend operation.
    ///
    /// Completed operations and operations targeting resources other than
    /// instances and shares are dropped here, at parse time.
    pub fn try_from_raw(raw: &RawOperation) -> Option<Self> {
        if raw.done {
            return None;
        }
        let metadata = raw.metadata.as_ref()?;
        let target = ResourcePath::parse(&metadata.target).ok()?;
        let op_type = OperationType::classify(&metadata.verb, &target);
        Some(Self {
            id: raw.name.clone(),
            target,
            op_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, target: &str, verb: &str, done: bool) -> RawOperation {
        RawOperation {
            name: name.to_string(),
            done,
            metadata: Some(OperationMetadata {
                target: target.to_string(),
                verb: verb.to_string(),
            }),
        }
    }

    #[test]
    fn verb_classification_is_exhaustive() {
        let instance =
            ResourcePath::parse("projects/p/locations/l/instances/i").unwrap();
        let share =
            ResourcePath::parse("projects/p/locations/l/instances/i/shares/s").unwrap();
        assert_eq!(
            OperationType::classify("create", &instance),
            OperationType::InstanceCreate
        );
        assert_eq!(
            OperationType::classify("update", &instance),
            OperationType::InstanceUpdate
        );
        assert_eq!(
            OperationType::classify("delete", &instance),
            OperationType::InstanceDelete
        );
        assert_eq!(
            OperationType::classify("create", &share),
            OperationType::ShareCreate
        );
        assert_eq!(
            OperationType::classify("update", &share),
            OperationType::ShareUpdate
        );
        assert_eq!(
            OperationType::classify("delete", &share),
            OperationType::ShareDelete
        );
        assert_eq!(
            OperationType::classify("restore", &instance),
            OperationType::Unknown
        );
    }

    #[test]
    fn done_and_foreign_operations_are_dropped() {
        let done = raw("op1", "projects/p/locations/l/instances/i", "create", true);
        assert_eq!(OpInfo::try_from_raw(&done), None);

        let backup = raw("op2", "projects/p/locations/l/backups/b", "create", false);
        assert_eq!(OpInfo::try_from_raw(&backup), None);

        let headless = RawOperation {
            name: "op3".to_string(),
            done: false,
            metadata: None,
        };
        assert_eq!(OpInfo::try_from_raw(&headless), None);

        let live = raw("op4", "projects/p/locations/l/instances/i", "update", false);
        let info = OpInfo::try_from_raw(&live).unwrap();
        assert_eq!(info.id, "op4");
        assert_eq!(info.op_type, OperationType::InstanceUpdate);
    }
}
