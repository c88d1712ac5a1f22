#![warn(missing_docs)]
//! CSI-facing shell of the multishare control plane: decodes the
//! `CreateVolume` parameter map into the typed requests the placement
//! core consumes, and holds the controller configuration.
//!
//! The gRPC surface itself lives outside this crate; it hands the raw
//! parameter map to [`context::CreateParams`] and forwards the resulting
//! request and target descriptor to the agents.

/// Controller configuration.
pub mod config;
/// Volume context and parameter handling.
pub mod context;
