use filer_port::types::v0::transport::OperationType;
use snafu::Snafu;

/// Common error type for the multishare control plane agents.
///
/// The core performs no local recovery: every error bubbles up to the
/// caller unchanged.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub), context(suffix(false)))]
#[allow(missing_docs)]
pub enum SvcError {
    #[snafu(display("Invalid arguments: {}", detail))]
    InvalidArguments { detail: String },
    #[snafu(display(
        "Instance '{}' is missing its project, location or name",
        instance
    ))]
    InvalidInstance { instance: String },
    #[snafu(display("Share '{}' is missing its name or parent identity", share))]
    InvalidShare { share: String },
    #[snafu(display(
        "Operation '{}' ({}) is still running on '{}' - please retry",
        op_id,
        op_type,
        target
    ))]
    Conflict {
        op_id: String,
        op_type: OperationType,
        target: String,
    },
    #[snafu(display(
        "{} matched instance(s) have mutations in flight - please retry",
        non_ready
    ))]
    Unavailable { non_ready: usize },
    #[snafu(display("Request was cancelled before completion"))]
    Cancelled {},
    #[snafu(display("Filer request '{}' failed: {}", request, detail))]
    FilerRequest { request: String, detail: String },
}
