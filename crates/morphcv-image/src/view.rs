use crate::error::ImageError;
use crate::image::ImageSize;

/// Number of elements a strided buffer must hold to address every pixel.
fn required_len(size: ImageSize, stride: usize, row_len: usize) -> Option<usize> {
    if size.height == 0 {
        return Some(0);
    }
    (size.height - 1).checked_mul(stride)?.checked_add(row_len)
}

fn check_layout(
    size: ImageSize,
    stride: usize,
    channels: usize,
    len: usize,
) -> Result<(), ImageError> {
    let overflow = || ImageError::SizeOverflow(size, channels);

    let min = size.width.checked_mul(channels).ok_or_else(overflow)?;
    if stride < min {
        return Err(ImageError::InvalidStride { stride, min });
    }
    let required = required_len(size, stride, min).ok_or_else(overflow)?;
    if len < required {
        return Err(ImageError::BufferTooSmall { len, required });
    }
    Ok(())
}

/// A read-only view over caller-owned interleaved pixels.
///
/// Rows start every `stride` elements; the `stride - width * CHANNELS` trailing
/// elements of each row are padding and never read.
///
/// # Examples
///
/// ```
/// use morphcv_image::{ImageSize, ImageView};
///
/// // 2x2 single channel image with one padding element per row
/// let data = [1u8, 2, 0, 3, 4, 0];
/// let view = ImageView::<u8, 1>::new(ImageSize { width: 2, height: 2 }, 3, &data).unwrap();
///
/// assert_eq!(view.row(1), &[3, 4]);
/// assert_eq!(view.get([0, 1, 0]), Some(&2));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a, T, const CHANNELS: usize> {
    data: &'a [T],
    size: ImageSize,
    stride: usize,
}

impl<'a, T, const CHANNELS: usize> ImageView<'a, T, CHANNELS> {
    /// Create a view over `data` with a row stride given in elements.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::SizeOverflow`] if the shape cannot be addressed,
    /// [`ImageError::InvalidStride`] if a row does not fit in `stride` and
    /// [`ImageError::BufferTooSmall`] if `data` cannot hold every row.
    pub fn new(size: ImageSize, stride: usize, data: &'a [T]) -> Result<Self, ImageError> {
        check_layout(size, stride, CHANNELS, data.len())?;
        Ok(Self { data, size, stride })
    }

    pub(crate) fn from_contiguous(size: ImageSize, data: &'a [T]) -> Self {
        Self {
            data,
            size,
            stride: size.width * CHANNELS,
        }
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        CHANNELS
    }

    /// Get the row stride in elements.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Get the underlying buffer, padding included.
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Get the `width * CHANNELS` elements of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= rows`.
    #[inline]
    pub fn row(&self, y: usize) -> &'a [T] {
        assert!(y < self.size.height, "row {y} out of bounds");
        let start = y * self.stride;
        &self.data[start..start + self.size.width * CHANNELS]
    }

    /// Get a reference to the element at `[y, x, c]`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, index: [usize; 3]) -> Option<&'a T> {
        let [y, x, c] = index;
        if y >= self.size.height || x >= self.size.width || c >= CHANNELS {
            return None;
        }
        self.data.get(y * self.stride + x * CHANNELS + c)
    }
}

/// A mutable view over caller-owned interleaved pixels.
///
/// Same layout rules as [`ImageView`]. Padding elements are never written.
#[derive(Debug)]
pub struct ImageViewMut<'a, T, const CHANNELS: usize> {
    data: &'a mut [T],
    size: ImageSize,
    stride: usize,
}

impl<'a, T, const CHANNELS: usize> ImageViewMut<'a, T, CHANNELS> {
    /// Create a mutable view over `data` with a row stride given in elements.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::SizeOverflow`] if the shape cannot be addressed,
    /// [`ImageError::InvalidStride`] if a row does not fit in `stride` and
    /// [`ImageError::BufferTooSmall`] if `data` cannot hold every row.
    pub fn new(size: ImageSize, stride: usize, data: &'a mut [T]) -> Result<Self, ImageError> {
        check_layout(size, stride, CHANNELS, data.len())?;
        Ok(Self { data, size, stride })
    }

    pub(crate) fn from_contiguous(size: ImageSize, data: &'a mut [T]) -> Self {
        Self {
            data,
            size,
            stride: size.width * CHANNELS,
        }
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        CHANNELS
    }

    /// Get the row stride in elements.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Reborrow as a read-only view.
    pub fn as_view(&self) -> ImageView<'_, T, CHANNELS> {
        ImageView {
            data: &*self.data,
            size: self.size,
            stride: self.stride,
        }
    }

    /// Get the underlying buffer, padding included.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut *self.data
    }

    /// Get the `width * CHANNELS` elements of row `y` mutably.
    ///
    /// # Panics
    ///
    /// Panics if `y >= rows`.
    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [T] {
        assert!(y < self.size.height, "row {y} out of bounds");
        let start = y * self.stride;
        &mut self.data[start..start + self.size.width * CHANNELS]
    }

    /// Get a mutable reference to the element at `[y, x, c]`, or `None` if out of bounds.
    #[inline]
    pub fn get_mut(&mut self, index: [usize; 3]) -> Option<&mut T> {
        let [y, x, c] = index;
        if y >= self.size.height || x >= self.size.width || c >= CHANNELS {
            return None;
        }
        self.data.get_mut(y * self.stride + x * CHANNELS + c)
    }
}
