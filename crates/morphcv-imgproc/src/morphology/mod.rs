//! Morphological extremum filters.
//!
//! Dilation and erosion over 2-D images with an arbitrary structuring element,
//! two border policies, `u8`/`f32` pixels and 1, 3 or 4 interleaved channels.

/// Error types used for morphological operations.
pub mod error;
pub use error::MorphologyError;

/// Border handling for out-of-bounds reads.
pub mod border;
pub use border::{BorderSampler, BorderType};

/// Structuring elements.
pub mod element;
pub use element::StructuringElement;

/// Supported pixel types and reduction operators.
pub mod pixel;
pub use pixel::{Extremum, Max, Min, MorphPixel};

/// Window reduction for a single output pixel or row.
pub mod reduce;
pub use reduce::WindowReducer;

/// Dilation and erosion entry points.
mod ops;
pub use ops::*;
