mod sealed {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for f32 {}
}

/// Pixel types accepted by the morphology operators.
///
/// The set is closed: only `u8` and `f32` implement this trait.
pub trait MorphPixel:
    sealed::Sealed + Copy + PartialOrd + Send + Sync + std::fmt::Debug + 'static
{
    /// The smallest value of the type, the identity of `max`.
    const MIN_VALUE: Self;

    /// The largest value of the type, the identity of `min`.
    const MAX_VALUE: Self;

    /// The larger of two values.
    fn max_of(self, other: Self) -> Self;

    /// The smaller of two values.
    fn min_of(self, other: Self) -> Self;
}

impl MorphPixel for u8 {
    const MIN_VALUE: Self = u8::MIN;
    const MAX_VALUE: Self = u8::MAX;

    #[inline(always)]
    fn max_of(self, other: Self) -> Self {
        Ord::max(self, other)
    }

    #[inline(always)]
    fn min_of(self, other: Self) -> Self {
        Ord::min(self, other)
    }
}

// NOTE: infinities instead of f32::MIN/MAX so that infinite inputs survive the fold.
// f32::max/min return the non-NaN operand, so NaN samples never win.
impl MorphPixel for f32 {
    const MIN_VALUE: Self = f32::NEG_INFINITY;
    const MAX_VALUE: Self = f32::INFINITY;

    #[inline(always)]
    fn max_of(self, other: Self) -> Self {
        f32::max(self, other)
    }

    #[inline(always)]
    fn min_of(self, other: Self) -> Self {
        f32::min(self, other)
    }
}

/// A commutative and associative reduction over a window of pixels.
pub trait Extremum: Copy + Send + Sync {
    /// The value the accumulator starts from.
    fn identity<T: MorphPixel>() -> T;

    /// Fold one sample into the accumulator.
    fn fold<T: MorphPixel>(acc: T, value: T) -> T;
}

/// The `max` reduction used by dilation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Max;

/// The `min` reduction used by erosion.
#[derive(Debug, Clone, Copy, Default)]
pub struct Min;

impl Extremum for Max {
    #[inline(always)]
    fn identity<T: MorphPixel>() -> T {
        T::MIN_VALUE
    }

    #[inline(always)]
    fn fold<T: MorphPixel>(acc: T, value: T) -> T {
        acc.max_of(value)
    }
}

impl Extremum for Min {
    #[inline(always)]
    fn identity<T: MorphPixel>() -> T {
        T::MAX_VALUE
    }

    #[inline(always)]
    fn fold<T: MorphPixel>(acc: T, value: T) -> T {
        acc.min_of(value)
    }
}
