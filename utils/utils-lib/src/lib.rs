//! Various common constants and helpers used by the multishare control plane.

/// Constants shared between the control plane components.
pub mod constants;

pub use constants::*;
