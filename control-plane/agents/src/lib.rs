#![warn(missing_docs)]
//! Multishare control plane agents library.
//!
//! Hosts the placement and operations manager: the subsystem deciding, for
//! every new share, whether to place it on an existing filer instance,
//! grow an instance to fit it, provision a new instance, or wait for
//! in-flight backend mutations to settle.

/// Agent level errors.
pub mod errors;
/// The abstract filer backend consumed by the placement core.
pub mod filer;
/// Placement and operations management for multishare instances.
pub mod multishare;
