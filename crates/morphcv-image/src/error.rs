use crate::image::ImageSize;

/// An error type for the image module.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the row stride cannot hold one row of pixels.
    #[error("Row stride ({stride}) is smaller than width * channels ({min})")]
    InvalidStride {
        /// The requested stride in elements.
        stride: usize,
        /// The minimum stride for the image width and channel count.
        min: usize,
    },

    /// Error when the buffer is too short for the declared shape and stride.
    #[error("Buffer length ({len}) is smaller than the required length ({required})")]
    BufferTooSmall {
        /// The length of the provided buffer.
        len: usize,
        /// The number of elements the view needs to address.
        required: usize,
    },

    /// Error when the element count of the declared shape does not fit in `usize`.
    #[error("Image size {0} with {1} channels overflows the addressable length")]
    SizeOverflow(ImageSize, usize),

    /// Error when a value cannot be cast to the target pixel type.
    #[error("Failed to cast image data")]
    CastError,
}
