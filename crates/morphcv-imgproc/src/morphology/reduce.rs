use std::ops::Range;

use morphcv_image::ImageView;

use super::{BorderSampler, BorderType, Extremum, MorphPixel, MorphologyError, StructuringElement};

/// Reduces the active neighborhood of output pixels to a single extremum.
///
/// The same reducer is shared read-only by every row task of a call.
#[derive(Debug, Clone, Copy)]
pub struct WindowReducer<'a, T, const C: usize> {
    sampler: BorderSampler<'a, T, C>,
    element: &'a StructuringElement,
}

impl<'a, T: MorphPixel, const C: usize> WindowReducer<'a, T, C> {
    /// Create a reducer over `src` for the given element and border policy.
    ///
    /// # Errors
    ///
    /// Returns [`MorphologyError::EmptyImage`] if `src` has no pixels.
    pub fn new(
        src: ImageView<'a, T, C>,
        element: &'a StructuringElement,
        border: BorderType<T>,
    ) -> Result<Self, MorphologyError> {
        Ok(Self {
            sampler: BorderSampler::new(src, border)?,
            element,
        })
    }

    /// Compute channel `c` of the output pixel `(y, x)`.
    ///
    /// Every active cell at `(dy, dx)` reads the source at
    /// `(y + dy - radius_y, x + dx - radius_x)` through the border sampler.
    pub fn reduce_at<E: Extremum>(&self, y: usize, x: usize, c: usize) -> T {
        let (ry, rx) = self.element.radius();
        let y0 = y as isize - ry as isize;
        let x0 = x as isize - rx as isize;

        let mut acc = E::identity::<T>();
        self.element.for_each_active(|dy, dx| {
            let value = self.sampler.sample(y0 + dy as isize, x0 + dx as isize, c);
            acc = E::fold(acc, value);
        });
        acc
    }

    /// Compute every pixel of output row `y` into `dst_row`.
    ///
    /// `dst_row` holds exactly `cols * C` elements. Pixels whose window lies fully
    /// inside the image read the source rows directly; the others go through the
    /// border sampler.
    pub fn reduce_row<E: Extremum>(&self, y: usize, dst_row: &mut [T]) {
        debug_assert_eq!(dst_row.len(), self.sampler.view().cols() * C);

        let interior = self.interior_cols(y);
        let cols = self.sampler.view().cols();
        log::trace!("row {y}: interior columns {interior:?} of {cols}");

        for x in (0..interior.start).chain(interior.end..cols) {
            for c in 0..C {
                dst_row[x * C + c] = self.reduce_at::<E>(y, x, c);
            }
        }

        self.reduce_interior::<E>(y, interior, dst_row);
    }

    /// Columns of row `y` whose window never leaves the image.
    ///
    /// Returns an empty range at `0..0` when the row itself is near the border.
    fn interior_cols(&self, y: usize) -> Range<usize> {
        let (ry, rx) = self.element.radius();
        let src = self.sampler.view();
        let (rows, cols) = (src.rows(), src.cols());

        if y < ry || y + ry >= rows || cols <= 2 * rx {
            return 0..0;
        }
        rx..cols - rx
    }

    fn reduce_interior<E: Extremum>(&self, y: usize, xs: Range<usize>, dst_row: &mut [T]) {
        if xs.is_empty() {
            return;
        }

        let (ry, rx) = self.element.radius();
        let src = self.sampler.view();
        let dst = &mut dst_row[xs.start * C..xs.end * C];
        dst.fill(E::identity::<T>());

        // offset-major so that each source row is streamed once per active cell
        self.element.for_each_active(|dy, dx| {
            let src_row = src.row(y + dy - ry);
            let start = (xs.start + dx - rx) * C;
            let window = &src_row[start..start + dst.len()];
            dst.iter_mut()
                .zip(window.iter())
                .for_each(|(acc, &value)| *acc = E::fold(*acc, value));
        });
    }
}
