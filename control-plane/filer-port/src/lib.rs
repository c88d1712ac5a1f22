#![warn(missing_docs)]
//! Typed data model shared across the multishare control plane: instances,
//! shares, backend operations and the canonical resource paths that tie
//! them together.

/// Types which represent the multishare resources and operations.
pub mod types;
