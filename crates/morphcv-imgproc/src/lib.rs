#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// morphological dilation and erosion module.
pub mod morphology;

/// module containing parallization utilities.
pub mod parallel;
