use super::MorphologyError;

/// Which cells of the window take part in the reduction.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ElementShape {
    /// Every cell of the window is active.
    Full,
    /// Only the cells flagged in `mask` are active.
    Partial {
        mask: Vec<bool>,
        /// `(dy, dx)` of each active cell, row-major.
        active: Vec<(usize, usize)>,
    },
}

/// A morphological structuring element.
///
/// The element is a `ksize_x x ksize_y` window anchored at its center cell. It is
/// either fully masked (rectangular, every cell participates) or partially masked
/// (an explicit row-major mask selects the participating cells).
///
/// # Example
///
/// ```rust
/// use morphcv_imgproc::morphology::StructuringElement;
///
/// // 3x3 cross
/// let cross = StructuringElement::from_mask(
///     3,
///     3,
///     &[false, true, false, true, true, true, false, true, false],
/// )
/// .unwrap();
/// assert_eq!(cross.ksize(), (3, 3));
/// assert_eq!(cross.radius(), (1, 1));
/// assert_eq!(cross.num_active(), 5);
/// assert!(!cross.is_active(0, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuringElement {
    ksize_x: usize,
    ksize_y: usize,
    shape: ElementShape,
}

fn check_ksize(ksize_x: usize, ksize_y: usize) -> Result<(), MorphologyError> {
    if ksize_x == 0 || ksize_y == 0 {
        return Err(MorphologyError::InvalidKernelSize(ksize_x, ksize_y));
    }
    if ksize_x % 2 == 0 || ksize_y % 2 == 0 {
        return Err(MorphologyError::EvenKernelSize(ksize_x, ksize_y));
    }
    Ok(())
}

impl StructuringElement {
    /// Create a rectangular element where every cell is active.
    ///
    /// # Errors
    ///
    /// Fails if a dimension is zero or even.
    pub fn rect(ksize_x: usize, ksize_y: usize) -> Result<Self, MorphologyError> {
        check_ksize(ksize_x, ksize_y)?;
        Ok(Self {
            ksize_x,
            ksize_y,
            shape: ElementShape::Full,
        })
    }

    /// Create an element from a row-major boolean mask of `ksize_x * ksize_y` cells.
    ///
    /// A mask with every cell set is stored as a rectangular element.
    ///
    /// # Errors
    ///
    /// Fails if a dimension is zero or even, if the mask length does not match the
    /// window area, or if no cell is active.
    pub fn from_mask(ksize_x: usize, ksize_y: usize, mask: &[bool]) -> Result<Self, MorphologyError> {
        check_ksize(ksize_x, ksize_y)?;

        let expected = ksize_x * ksize_y;
        if mask.len() != expected {
            return Err(MorphologyError::MaskLengthMismatch {
                expected,
                got: mask.len(),
            });
        }

        let active = mask
            .chunks_exact(ksize_x)
            .enumerate()
            .flat_map(|(dy, row)| {
                row.iter()
                    .enumerate()
                    .filter(|&(_, &on)| on)
                    .map(move |(dx, _)| (dy, dx))
            })
            .collect::<Vec<_>>();

        let shape = match active.len() {
            0 => return Err(MorphologyError::AllKernelElementsInactive),
            n if n == expected => ElementShape::Full,
            _ => ElementShape::Partial {
                mask: mask.to_vec(),
                active,
            },
        };

        Ok(Self {
            ksize_x,
            ksize_y,
            shape,
        })
    }

    /// Create an element from a row-major byte mask; any nonzero byte is active.
    pub fn from_mask_u8(
        ksize_x: usize,
        ksize_y: usize,
        mask: &[u8],
    ) -> Result<Self, MorphologyError> {
        let mask = mask.iter().map(|&v| v != 0).collect::<Vec<_>>();
        Self::from_mask(ksize_x, ksize_y, &mask)
    }

    /// The window size as `(ksize_x, ksize_y)`.
    pub fn ksize(&self) -> (usize, usize) {
        (self.ksize_x, self.ksize_y)
    }

    /// The anchor offset as `(radius_y, radius_x)`.
    pub fn radius(&self) -> (usize, usize) {
        ((self.ksize_y - 1) / 2, (self.ksize_x - 1) / 2)
    }

    /// Returns true if every cell of the window is active.
    pub fn is_fully_masked(&self) -> bool {
        matches!(self.shape, ElementShape::Full)
    }

    /// The mask of a partially masked element, `None` for rectangular elements.
    pub fn mask(&self) -> Option<&[bool]> {
        match &self.shape {
            ElementShape::Full => None,
            ElementShape::Partial { mask, .. } => Some(mask.as_slice()),
        }
    }

    /// Number of active cells.
    pub fn num_active(&self) -> usize {
        match &self.shape {
            ElementShape::Full => self.ksize_x * self.ksize_y,
            ElementShape::Partial { active, .. } => active.len(),
        }
    }

    /// Whether the cell at `(dy, dx)` from the window's top-left takes part.
    ///
    /// Offsets outside the window are never active.
    pub fn is_active(&self, dy: usize, dx: usize) -> bool {
        if dy >= self.ksize_y || dx >= self.ksize_x {
            return false;
        }
        match &self.shape {
            ElementShape::Full => true,
            ElementShape::Partial { mask, .. } => mask[dy * self.ksize_x + dx],
        }
    }

    /// Call `f(dy, dx)` for every active cell in row-major order.
    #[inline]
    pub fn for_each_active(&self, mut f: impl FnMut(usize, usize)) {
        match &self.shape {
            ElementShape::Full => {
                for dy in 0..self.ksize_y {
                    for dx in 0..self.ksize_x {
                        f(dy, dx);
                    }
                }
            }
            ElementShape::Partial { active, .. } => {
                active.iter().for_each(|&(dy, dx)| f(dy, dx));
            }
        }
    }
}
