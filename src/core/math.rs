//=========================================================================
// Math Utilities
//=========================================================================
//
// Interpolation helpers shared by the loop, the overlay and game code.
//
//   lerp(start, end, t) = start + (end - start) * t
//
// `t` is not clamped: values outside [0, 1] extrapolate past the
// endpoints. Non-finite inputs propagate through the arithmetic.
//
//=========================================================================

//=== Free Functions ======================================================

/// Linearly interpolates between `start` and `end` by `t`.
///
/// `t == 0.0` yields `start`, `t == 1.0` yields `end`. Values outside the
/// unit range extrapolate; they are not an error.
///
/// ```
/// use lumen_engine::core::math::lerp;
///
/// assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
/// assert_eq!(lerp(-10.0, 10.0, 0.25), -5.0);
/// assert_eq!(lerp(0.0, 10.0, 1.5), 15.0);
/// ```
#[inline]
pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t
}

//=== Lerp Trait ==========================================================

/// Types that can be blended toward another value of the same type.
///
/// Implemented for the float primitives and for [`Color`](crate::core::render::Color),
/// which blends component-wise.
pub trait Lerp<T = f32> {
    /// Returns the value `t` of the way from `self` to `other`.
    fn lerp(&self, other: &Self, t: T) -> Self;
}

impl Lerp<f64> for f64 {
    #[inline]
    fn lerp(&self, other: &Self, t: f64) -> Self {
        lerp(*self, *other, t)
    }
}

impl Lerp<f32> for f32 {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
