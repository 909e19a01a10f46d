use morphcv_image::ImageView;

use super::MorphologyError;

/// Border handling modes for morphological operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BorderType<T> {
    /// Replicate the value of the nearest border pixel.
    ///
    /// This is the default policy. Example: `...d c b a | a a a a...`
    Replicate,

    /// Fill all out-of-bounds pixels with a constant value, applied to every channel.
    ///
    /// Example: `...d c b a | v v v v...`
    Constant(T),
}

impl<T> Default for BorderType<T> {
    fn default() -> Self {
        BorderType::Replicate
    }
}

/// Reads pixels at arbitrary, possibly out-of-bounds, coordinates.
///
/// In-bounds coordinates read the image directly. Out-of-bounds coordinates are
/// resolved with the [`BorderType`] against the true image dimensions.
///
/// # Examples
///
/// ```
/// use morphcv_image::Image;
/// use morphcv_imgproc::morphology::{BorderSampler, BorderType};
///
/// let image = Image::<u8, 1>::new([2, 2].into(), vec![1, 2, 3, 4]).unwrap();
///
/// let replicate = BorderSampler::new(image.view(), BorderType::Replicate).unwrap();
/// assert_eq!(replicate.sample(-5, 9, 0), 2);
///
/// let constant = BorderSampler::new(image.view(), BorderType::Constant(9)).unwrap();
/// assert_eq!(constant.sample(-1, 0, 0), 9);
/// assert_eq!(constant.sample(1, 0, 0), 3);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BorderSampler<'a, T, const C: usize> {
    src: ImageView<'a, T, C>,
    border: BorderType<T>,
    rows: isize,
    cols: isize,
}

impl<'a, T: Copy, const C: usize> BorderSampler<'a, T, C> {
    /// Create a sampler over `src`.
    ///
    /// # Errors
    ///
    /// Returns [`MorphologyError::EmptyImage`] if the image has no pixels to replicate.
    pub fn new(src: ImageView<'a, T, C>, border: BorderType<T>) -> Result<Self, MorphologyError> {
        if src.size().is_empty() {
            return Err(MorphologyError::EmptyImage(src.size()));
        }

        Ok(Self {
            src,
            border,
            rows: src.rows() as isize,
            cols: src.cols() as isize,
        })
    }

    /// The image the sampler reads from.
    #[inline]
    pub fn view(&self) -> &ImageView<'a, T, C> {
        &self.src
    }

    /// Returns true if `(y, x)` lies inside the image.
    #[inline]
    pub fn is_inside(&self, y: isize, x: isize) -> bool {
        y >= 0 && y < self.rows && x >= 0 && x < self.cols
    }

    /// Get the value of channel `c` at `(y, x)` under the border policy.
    #[inline]
    pub fn sample(&self, y: isize, x: isize, c: usize) -> T {
        let (y, x) = if self.is_inside(y, x) {
            (y, x)
        } else {
            match self.border {
                BorderType::Constant(value) => return value,
                BorderType::Replicate => (y.clamp(0, self.rows - 1), x.clamp(0, self.cols - 1)),
            }
        };

        self.read(y as usize, x as usize, c)
    }

    #[inline(always)]
    fn read(&self, y: usize, x: usize, c: usize) -> T {
        self.src.as_slice()[y * self.src.stride() + x * C + c]
    }
}
