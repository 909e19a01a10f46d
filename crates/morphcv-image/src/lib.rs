#![deny(missing_docs)]
//! Image buffers and strided views for morphological filtering

/// image representation for computer vision purposes.
pub mod image;

/// Error types for the image module.
pub mod error;

/// non-owning strided views over pixel buffers.
pub mod view;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
pub use crate::view::{ImageView, ImageViewMut};
