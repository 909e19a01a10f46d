use std::ops::Range;

use morphcv_image::{Image, ImageSize, ImageView, ImageViewMut};

use super::{
    BorderType, Extremum, Max, Min, MorphPixel, MorphologyError, StructuringElement,
    WindowReducer,
};
use crate::parallel::{par_rows_mut, ExecutionStrategy};

/// The extremum filter to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorphOp {
    /// Replace each pixel with the maximum over the active neighborhood.
    Dilate,
    /// Replace each pixel with the minimum over the active neighborhood.
    Erode,
}

/// Options controlling which rows are computed and how the work is scheduled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MorphConfig {
    /// Rows of the destination to compute; `None` computes the whole image.
    ///
    /// Border handling always uses the full image, so tiles computed with
    /// different ranges stitch into the same result as a single call.
    pub row_range: Option<Range<usize>>,

    /// How rows are distributed across threads.
    pub strategy: ExecutionStrategy,
}

fn check_channels<const C: usize>() -> Result<(), MorphologyError> {
    match C {
        1 | 3 | 4 => Ok(()),
        _ => Err(MorphologyError::UnsupportedChannelCount(C)),
    }
}

fn check_row_range(range: &Range<usize>, rows: usize) -> Result<(), MorphologyError> {
    if range.start > range.end || range.end > rows {
        return Err(MorphologyError::InvalidRowRange {
            start: range.start,
            end: range.end,
            rows,
        });
    }
    Ok(())
}

/// Dilate an image using a [`StructuringElement`].
///
/// Dilation expands bright regions in the image. Each pixel is replaced by the
/// maximum value in the neighborhood defined by the element.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image (will be overwritten).
/// * `element` - The morphological structuring element.
/// * `border` - The border handling mode ([`BorderType`]).
///
/// # Returns
///
/// Ok(()) on success, or [`MorphologyError`] if the inputs are invalid.
///
/// # Examples
///
/// ```
/// use morphcv_image::Image;
/// use morphcv_imgproc::morphology::{dilate, BorderType, StructuringElement};
///
/// let src = Image::<u8, 1>::new([3, 3].into(), vec![0, 0, 0, 0, 9, 0, 0, 0, 0]).unwrap();
/// let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0).unwrap();
///
/// let element = StructuringElement::rect(3, 3).unwrap();
/// dilate(&src, &mut dst, &element, BorderType::Replicate).unwrap();
///
/// assert_eq!(dst.as_slice(), &[9; 9]);
/// ```
pub fn dilate<T: MorphPixel, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    element: &StructuringElement,
    border: BorderType<T>,
) -> Result<(), MorphologyError> {
    dilate_view(
        src.view(),
        &mut dst.view_mut(),
        element,
        border,
        &MorphConfig::default(),
    )
}

/// Erode an image using a [`StructuringElement`].
///
/// Erosion shrinks bright regions in the image. Each pixel is replaced by the
/// minimum value in the neighborhood defined by the element.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image (will be overwritten).
/// * `element` - The morphological structuring element.
/// * `border` - The border handling mode ([`BorderType`]).
///
/// # Returns
///
/// Ok(()) on success, or [`MorphologyError`] if the inputs are invalid.
pub fn erode<T: MorphPixel, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    element: &StructuringElement,
    border: BorderType<T>,
) -> Result<(), MorphologyError> {
    erode_view(
        src.view(),
        &mut dst.view_mut(),
        element,
        border,
        &MorphConfig::default(),
    )
}

/// Dilate a strided view, optionally restricted to a range of rows.
pub fn dilate_view<T: MorphPixel, const C: usize>(
    src: ImageView<'_, T, C>,
    dst: &mut ImageViewMut<'_, T, C>,
    element: &StructuringElement,
    border: BorderType<T>,
    config: &MorphConfig,
) -> Result<(), MorphologyError> {
    morphology(MorphOp::Dilate, src, dst, element, border, config)
}

/// Erode a strided view, optionally restricted to a range of rows.
pub fn erode_view<T: MorphPixel, const C: usize>(
    src: ImageView<'_, T, C>,
    dst: &mut ImageViewMut<'_, T, C>,
    element: &StructuringElement,
    border: BorderType<T>,
    config: &MorphConfig,
) -> Result<(), MorphologyError> {
    morphology(MorphOp::Erode, src, dst, element, border, config)
}

/// Apply a morphological extremum filter.
///
/// All inputs are validated before the destination is touched. Only the rows in
/// `config.row_range` are written; every other element of `dst`, stride padding
/// included, is left as is.
///
/// # Errors
///
/// * [`MorphologyError::UnsupportedChannelCount`] if `C` is not 1, 3 or 4.
/// * [`MorphologyError::EmptyImage`] if the source has no pixels.
/// * [`MorphologyError::SizeMismatch`] if `src` and `dst` differ in size.
/// * [`MorphologyError::InvalidRowRange`] if the row range exceeds the image.
/// * [`MorphologyError::Parallel`] if the execution strategy cannot be set up.
pub fn morphology<T: MorphPixel, const C: usize>(
    op: MorphOp,
    src: ImageView<'_, T, C>,
    dst: &mut ImageViewMut<'_, T, C>,
    element: &StructuringElement,
    border: BorderType<T>,
    config: &MorphConfig,
) -> Result<(), MorphologyError> {
    match op {
        MorphOp::Dilate => run::<Max, T, C>(op, src, dst, element, border, config),
        MorphOp::Erode => run::<Min, T, C>(op, src, dst, element, border, config),
    }
}

fn run<E: Extremum, T: MorphPixel, const C: usize>(
    op: MorphOp,
    src: ImageView<'_, T, C>,
    dst: &mut ImageViewMut<'_, T, C>,
    element: &StructuringElement,
    border: BorderType<T>,
    config: &MorphConfig,
) -> Result<(), MorphologyError> {
    check_channels::<C>()?;

    if src.size().is_empty() {
        return Err(MorphologyError::EmptyImage(src.size()));
    }

    if src.size() != dst.size() {
        return Err(MorphologyError::SizeMismatch(src.size(), dst.size()));
    }

    let rows = config.row_range.clone().unwrap_or(0..src.rows());
    check_row_range(&rows, src.rows())?;

    log::debug!(
        "{:?}: {} x {} channels, ksize {:?}, {} active cells, border {:?}, rows {:?}, {:?}",
        op,
        src.size(),
        C,
        element.ksize(),
        element.num_active(),
        border,
        rows,
        config.strategy,
    );

    let reducer = WindowReducer::new(src, element, border)?;
    let row_len = dst.cols() * C;
    let stride = dst.stride();

    par_rows_mut(
        config.strategy,
        dst.as_slice_mut(),
        stride,
        rows,
        |y, row| reducer.reduce_row::<E>(y, &mut row[..row_len]),
    )?;

    Ok(())
}

/// Dilate raw strided buffers.
///
/// Mirrors the flat interface of device morphology engines: the mask is a
/// row-major byte grid of `ksize_x * ksize_y` entries (nonzero = active) and
/// `None` selects the full rectangle. Strides are given in elements.
///
/// # Examples
///
/// ```
/// use morphcv_imgproc::morphology::{dilate_slice, BorderType};
///
/// // 3x2 single channel image with a stride of 4
/// let src = [1u8, 5, 2, 0, 3, 1, 4, 0];
/// let mut dst = [0u8; 8];
///
/// dilate_slice::<u8, 1>(0..2, 2, 3, 4, &src, 3, 1, None, 4, &mut dst, BorderType::Replicate)
///     .unwrap();
///
/// assert_eq!(dst, [5, 5, 5, 0, 3, 4, 4, 0]);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn dilate_slice<T: MorphPixel, const C: usize>(
    row_range: Range<usize>,
    rows: usize,
    cols: usize,
    src_stride: usize,
    src: &[T],
    ksize_x: usize,
    ksize_y: usize,
    mask: Option<&[u8]>,
    dst_stride: usize,
    dst: &mut [T],
    border: BorderType<T>,
) -> Result<(), MorphologyError> {
    morphology_slice::<T, C>(
        MorphOp::Dilate,
        row_range,
        [rows, cols, src_stride, dst_stride],
        src,
        [ksize_x, ksize_y],
        mask,
        dst,
        border,
    )
}

/// Erode raw strided buffers.
///
/// See [`dilate_slice`] for the buffer conventions.
#[allow(clippy::too_many_arguments)]
pub fn erode_slice<T: MorphPixel, const C: usize>(
    row_range: Range<usize>,
    rows: usize,
    cols: usize,
    src_stride: usize,
    src: &[T],
    ksize_x: usize,
    ksize_y: usize,
    mask: Option<&[u8]>,
    dst_stride: usize,
    dst: &mut [T],
    border: BorderType<T>,
) -> Result<(), MorphologyError> {
    morphology_slice::<T, C>(
        MorphOp::Erode,
        row_range,
        [rows, cols, src_stride, dst_stride],
        src,
        [ksize_x, ksize_y],
        mask,
        dst,
        border,
    )
}

#[allow(clippy::too_many_arguments)]
fn morphology_slice<T: MorphPixel, const C: usize>(
    op: MorphOp,
    row_range: Range<usize>,
    [rows, cols, src_stride, dst_stride]: [usize; 4],
    src: &[T],
    [ksize_x, ksize_y]: [usize; 2],
    mask: Option<&[u8]>,
    dst: &mut [T],
    border: BorderType<T>,
) -> Result<(), MorphologyError> {
    let size = ImageSize {
        width: cols,
        height: rows,
    };
    let src = ImageView::<T, C>::new(size, src_stride, src)?;
    let mut dst = ImageViewMut::<T, C>::new(size, dst_stride, dst)?;

    let element = match mask {
        Some(mask) => StructuringElement::from_mask_u8(ksize_x, ksize_y, mask)?,
        None => StructuringElement::rect(ksize_x, ksize_y)?,
    };

    let config = MorphConfig {
        row_range: Some(row_range),
        ..Default::default()
    };

    morphology(op, src, &mut dst, &element, border, &config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parallel::ParallelError;
    use morphcv_image::ImageError;

    fn cross() -> Result<StructuringElement, MorphologyError> {
        StructuringElement::from_mask(3, 3, &[false, true, false, true, true, true, false, true, false])
    }

    #[test]
    fn test_dilate_point() -> Result<(), Box<dyn std::error::Error>> {
        #[rustfmt::skip]
        let src = Image::<u8, 1>::new([5, 5].into(), vec![
            0, 0, 0, 0, 0,
            0, 0, 0, 0, 0,
            0, 0, 9, 0, 0,
            0, 0, 0, 0, 0,
            0, 0, 0, 0, 0,
        ])?;
        let mut dst = Image::from_size_val(src.size(), 0)?;

        dilate(&src, &mut dst, &cross()?, BorderType::Replicate)?;

        #[rustfmt::skip]
        let expected = [
            0, 0, 0, 0, 0,
            0, 0, 9, 0, 0,
            0, 9, 9, 9, 0,
            0, 0, 9, 0, 0,
            0, 0, 0, 0, 0,
        ];
        assert_eq!(dst.as_slice(), &expected);

        Ok(())
    }

    #[test]
    fn test_erode_hole() -> Result<(), Box<dyn std::error::Error>> {
        let mut data = vec![1.0f32; 25];
        data[12] = -4.0;
        let src = Image::<f32, 1>::new([5, 5].into(), data)?;
        let mut dst = Image::from_size_val(src.size(), 0.0)?;

        erode(&src, &mut dst, &StructuringElement::rect(3, 3)?, BorderType::Replicate)?;

        for y in 0..5 {
            for x in 0..5 {
                let expected = if (1..=3).contains(&y) && (1..=3).contains(&x) {
                    -4.0
                } else {
                    1.0
                };
                assert_eq!(dst.get([y, x, 0]), Some(&expected));
            }
        }

        Ok(())
    }

    #[test]
    fn test_constant_border_dominates() -> Result<(), Box<dyn std::error::Error>> {
        let src = Image::<u8, 3>::from_size_val([4, 4].into(), 100)?;
        let mut dst = Image::from_size_val(src.size(), 0)?;

        dilate(&src, &mut dst, &StructuringElement::rect(3, 3)?, BorderType::Constant(253))?;

        for y in 0..4 {
            for x in 0..4 {
                let on_edge = y == 0 || y == 3 || x == 0 || x == 3;
                let expected = if on_edge { 253 } else { 100 };
                for c in 0..3 {
                    assert_eq!(dst.get([y, x, c]), Some(&expected));
                }
            }
        }

        Ok(())
    }

    #[test]
    fn test_row_range_writes_only_requested_rows() -> Result<(), Box<dyn std::error::Error>> {
        let src = Image::<u8, 1>::from_size_fn([4, 6].into(), |y, x, _| (y * 4 + x) as u8)?;
        let mut full = Image::from_size_val(src.size(), 0)?;
        dilate(&src, &mut full, &StructuringElement::rect(3, 3)?, BorderType::Replicate)?;

        let mut tiled = Image::from_size_val(src.size(), 77)?;
        let config = MorphConfig {
            row_range: Some(2..4),
            strategy: ExecutionStrategy::Serial,
        };
        dilate_view(
            src.view(),
            &mut tiled.view_mut(),
            &StructuringElement::rect(3, 3)?,
            BorderType::Replicate,
            &config,
        )?;

        for y in 0..6 {
            let row = &tiled.as_slice()[y * 4..(y + 1) * 4];
            if (2..4).contains(&y) {
                assert_eq!(row, &full.as_slice()[y * 4..(y + 1) * 4]);
            } else {
                assert_eq!(row, &[77; 4]);
            }
        }

        Ok(())
    }

    #[test]
    fn test_stride_padding_untouched() -> Result<(), Box<dyn std::error::Error>> {
        let src = [1u8, 2, 0, 3, 4, 0];
        let mut dst = [99u8; 6];
        erode_slice::<u8, 1>(0..2, 2, 2, 3, &src, 3, 3, None, 3, &mut dst, BorderType::Replicate)?;
        assert_eq!(dst, [1, 1, 99, 1, 1, 99]);
        Ok(())
    }

    #[test]
    fn test_slice_mask() -> Result<(), Box<dyn std::error::Error>> {
        // vertical 1x3 line: only the rows above and below matter
        let src = [1u8, 9, 1, 5, 1, 1, 2, 1, 1];
        let mut dst = [0u8; 9];
        let mask = [0u8, 1, 0, 0, 1, 0, 0, 1, 0];
        dilate_slice::<u8, 1>(0..3, 3, 3, 3, &src, 3, 3, Some(&mask[..]), 3, &mut dst, BorderType::Constant(0))?;
        assert_eq!(dst, [5, 9, 1, 5, 9, 1, 5, 1, 1]);
        Ok(())
    }

    #[test]
    fn test_unsupported_channels() -> Result<(), Box<dyn std::error::Error>> {
        let src = Image::<u8, 2>::from_size_val([2, 2].into(), 0)?;
        let mut dst = src.clone();
        let res = dilate(&src, &mut dst, &StructuringElement::rect(1, 1)?, BorderType::Replicate);
        assert_eq!(res, Err(MorphologyError::UnsupportedChannelCount(2)));
        Ok(())
    }

    #[test]
    fn test_size_mismatch() -> Result<(), Box<dyn std::error::Error>> {
        let src = Image::<f32, 1>::from_size_val([2, 2].into(), 0.0)?;
        let mut dst = Image::<f32, 1>::from_size_val([2, 3].into(), 5.0)?;
        let res = erode(&src, &mut dst, &StructuringElement::rect(3, 3)?, BorderType::Replicate);
        assert_eq!(
            res,
            Err(MorphologyError::SizeMismatch(src.size(), dst.size()))
        );
        assert!(dst.as_slice().iter().all(|&v| v == 5.0));
        Ok(())
    }

    #[test]
    fn test_empty_image() -> Result<(), Box<dyn std::error::Error>> {
        let src = Image::<u8, 1>::new([0, 3].into(), vec![])?;
        let mut dst = src.clone();
        let res = dilate(&src, &mut dst, &StructuringElement::rect(3, 3)?, BorderType::Replicate);
        assert!(matches!(res, Err(MorphologyError::EmptyImage(_))));
        Ok(())
    }

    #[test]
    fn test_invalid_row_range() -> Result<(), Box<dyn std::error::Error>> {
        let src = Image::<u8, 1>::from_size_val([3, 3].into(), 4)?;
        let mut dst = Image::from_size_val(src.size(), 0)?;
        let config = MorphConfig {
            row_range: Some(1..4),
            ..Default::default()
        };
        let res = erode_view(
            src.view(),
            &mut dst.view_mut(),
            &StructuringElement::rect(3, 3)?,
            BorderType::Replicate,
            &config,
        );
        assert_eq!(
            res,
            Err(MorphologyError::InvalidRowRange {
                start: 1,
                end: 4,
                rows: 3
            })
        );
        assert!(dst.as_slice().iter().all(|&v| v == 0));
        Ok(())
    }

    #[test]
    fn test_invalid_strategy_writes_nothing() -> Result<(), Box<dyn std::error::Error>> {
        let src = Image::<u8, 1>::from_size_val([3, 3].into(), 4)?;
        let mut dst = Image::from_size_val(src.size(), 0)?;
        let config = MorphConfig {
            row_range: None,
            strategy: ExecutionStrategy::Fixed(0),
        };
        let res = dilate_view(
            src.view(),
            &mut dst.view_mut(),
            &StructuringElement::rect(3, 3)?,
            BorderType::Replicate,
            &config,
        );
        assert_eq!(
            res,
            Err(MorphologyError::Parallel(ParallelError::InvalidThreadCount(0)))
        );
        assert!(dst.as_slice().iter().all(|&v| v == 0));
        Ok(())
    }

    #[test]
    fn test_slice_rejects_degenerate_mask() {
        let src = [1u8; 9];
        let mut dst = [0u8; 9];
        let res = dilate_slice::<u8, 1>(
            0..3,
            3,
            3,
            3,
            &src,
            3,
            3,
            Some(&[0u8; 9][..]),
            3,
            &mut dst,
            BorderType::Replicate,
        );
        assert_eq!(res, Err(MorphologyError::AllKernelElementsInactive));
        assert_eq!(dst, [0; 9]);
    }

    #[test]
    fn test_slice_rejects_short_buffer() {
        let src = [1u8; 8];
        let mut dst = [0u8; 9];
        let res = erode_slice::<u8, 1>(
            0..3,
            3,
            3,
            3,
            &src,
            1,
            1,
            None,
            3,
            &mut dst,
            BorderType::Replicate,
        );
        assert!(matches!(res, Err(MorphologyError::Image(_))));
    }

    #[test]
    fn test_slice_rejects_overflowing_dimensions() {
        let src = [0u8; 16];
        let mut dst = [9u8; 16];

        let res = dilate_slice::<u8, 1>(
            0..1,
            usize::MAX / 2,
            4,
            4,
            &src,
            3,
            3,
            None,
            4,
            &mut dst,
            BorderType::Replicate,
        );
        assert!(matches!(
            res,
            Err(MorphologyError::Image(ImageError::SizeOverflow(..)))
        ));

        let res = erode_slice::<u8, 4>(
            0..1,
            1,
            usize::MAX / 4 + 1,
            4,
            &src,
            3,
            3,
            None,
            4,
            &mut dst,
            BorderType::Replicate,
        );
        assert!(matches!(
            res,
            Err(MorphologyError::Image(ImageError::SizeOverflow(..)))
        ));
        assert_eq!(dst, [9; 16]);
    }
}
