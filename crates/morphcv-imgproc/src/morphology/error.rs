use morphcv_image::{ImageError, ImageSize};

use crate::parallel::ParallelError;

/// Errors related to morphological operations.
///
/// Every variant is raised before any destination element is written.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MorphologyError {
    /// The kernel has a zero dimension.
    #[error("kernel size must be positive, got {0}x{1}")]
    InvalidKernelSize(usize, usize),

    /// The kernel must have odd dimensions so its anchor is the center cell.
    #[error("kernel size must be odd, got {0}x{1}")]
    EvenKernelSize(usize, usize),

    /// The mask does not have one entry per kernel cell.
    #[error("mask length ({got}) does not match the kernel area ({expected})")]
    MaskLengthMismatch {
        /// `ksize_x * ksize_y`.
        expected: usize,
        /// The length of the provided mask.
        got: usize,
    },

    /// All elements in the kernel are inactive (false).
    #[error("all kernel elements are inactive")]
    AllKernelElementsInactive,

    /// Only 1, 3 and 4 channel images are supported.
    #[error("unsupported channel count {0}, expected 1, 3 or 4")]
    UnsupportedChannelCount(usize),

    /// The input image has zero width or height.
    #[error("image must not be empty, got {0}")]
    EmptyImage(ImageSize),

    /// Source and destination images have different sizes.
    #[error("source size {0} does not match destination size {1}")]
    SizeMismatch(ImageSize, ImageSize),

    /// The requested rows are not a valid range of the image.
    #[error("row range {start}..{end} is invalid for an image with {rows} rows")]
    InvalidRowRange {
        /// First requested row.
        start: usize,
        /// One past the last requested row.
        end: usize,
        /// Number of rows in the image.
        rows: usize,
    },

    /// The buffer layout is invalid.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// The execution strategy could not be set up.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}
