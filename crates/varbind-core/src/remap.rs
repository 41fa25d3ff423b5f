#![forbid(unsafe_code)]

//! Linear interpolation and range remapping.
//!
//! All arithmetic runs in `f64`; integer results truncate toward zero.
//!
//! # Invariants
//!
//! 1. `remap(from_min, from_max, to_min, to_max, from_min) == to_min` and
//!    likewise for `from_max`/`to_max` (both variants).
//! 2. `remap` output stays within `[to_min, to_max]` (or `[to_max, to_min]`
//!    for descending targets) for any input, including inputs outside the
//!    source range.
//! 3. A degenerate source range (`from_min == from_max`) maps every input
//!    to `to_min` instead of dividing by zero.
//!
//! # Example
//!
//! ```
//! use varbind_core::remap::{remap, remap_unclamped};
//!
//! assert_eq!(remap(0.0f32, 10.0, 0.0, 1.0, 5.0), 0.5);
//! assert_eq!(remap(0.0f32, 10.0, 0.0, 1.0, 20.0), 1.0);
//! assert_eq!(remap_unclamped(0.0f32, 10.0, 0.0, 1.0, 20.0), 2.0);
//! ```

/// A scalar that can take part in remapping.
pub trait RemapScalar: Copy + PartialOrd {
    fn to_f64(self) -> f64;
    fn from_f64(value: f64) -> Self;
}

macro_rules! impl_remap_scalar {
    ($($t:ty),*) => {
        $(
            impl RemapScalar for $t {
                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn from_f64(value: f64) -> Self {
                    value as $t
                }
            }
        )*
    };
}

impl_remap_scalar!(f32, f64, i32, i64);

/// Clamp `value` to `[0, 1]`.
#[inline]
#[must_use]
pub fn saturate(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Position of `value` between `a` and `b` as a fraction, not clamped.
///
/// Returns `0.0` when `a == b`.
#[inline]
#[must_use]
pub fn inverse_lerp_unclamped<T: RemapScalar>(a: T, b: T, value: T) -> f64 {
    let (a, b, value) = (a.to_f64(), b.to_f64(), value.to_f64());
    let span = b - a;
    if span == 0.0 {
        return 0.0;
    }
    (value - a) / span
}

/// Interpolate from `a` to `b`, with `t` clamped to `[0, 1]`.
#[inline]
#[must_use]
pub fn lerp<T: RemapScalar>(a: T, b: T, t: f64) -> T {
    lerp_unclamped(a, b, saturate(t))
}

/// Interpolate from `a` to `b` without clamping `t`.
#[inline]
#[must_use]
pub fn lerp_unclamped<T: RemapScalar>(a: T, b: T, t: f64) -> T {
    let (a, b) = (a.to_f64(), b.to_f64());
    T::from_f64(a + (b - a) * t)
}

/// Map `value` from the source range onto the target range, extrapolating
/// linearly outside the source range.
#[inline]
#[must_use]
pub fn remap_unclamped<T: RemapScalar>(from_min: T, from_max: T, to_min: T, to_max: T, value: T) -> T {
    let t = inverse_lerp_unclamped(from_min, from_max, value);
    lerp_unclamped(to_min, to_max, t)
}

/// Map `value` from the source range onto the target range, clamping the
/// input to the source range first.
#[inline]
#[must_use]
pub fn remap<T: RemapScalar>(from_min: T, from_max: T, to_min: T, to_max: T, value: T) -> T {
    let t = saturate(inverse_lerp_unclamped(from_min, from_max, value));
    lerp_unclamped(to_min, to_max, t)
}

/// A stored source/target range pair.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RemapSettings<T> {
    pub from_min: T,
    pub from_max: T,
    pub to_min: T,
    pub to_max: T,
}

impl<T: RemapScalar> RemapSettings<T> {
    /// Create settings for `[from_min, from_max] -> [to_min, to_max]`.
    #[must_use]
    pub const fn new(from_min: T, from_max: T, to_min: T, to_max: T) -> Self {
        Self {
            from_min,
            from_max,
            to_min,
            to_max,
        }
    }

    /// See [`remap`].
    #[must_use]
    pub fn remap(&self, value: T) -> T {
        remap(self.from_min, self.from_max, self.to_min, self.to_max, value)
    }

    /// See [`remap_unclamped`].
    #[must_use]
    pub fn remap_unclamped(&self, value: T) -> T {
        remap_unclamped(self.from_min, self.from_max, self.to_min, self.to_max, value)
    }

    /// Fraction of the source range covered by `value`, clamped to `[0, 1]`.
    #[must_use]
    pub fn fraction(&self, value: T) -> f64 {
        saturate(inverse_lerp_unclamped(self.from_min, self.from_max, value))
    }
}

impl Default for RemapSettings<f32> {
    fn default() -> Self {
        Self::new(0.0, 1.0, 0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_map_to_endpoints() {
        assert_eq!(remap(2.0f32, 4.0, 10.0, 20.0, 2.0), 10.0);
        assert_eq!(remap(2.0f32, 4.0, 10.0, 20.0, 4.0), 20.0);
        assert_eq!(remap_unclamped(2i32, 4, 10, 20, 2), 10);
        assert_eq!(remap_unclamped(2i64, 4, 10, 20, 4), 20);
    }

    #[test]
    fn integer_inverse_lerp_is_fractional() {
        assert_eq!(inverse_lerp_unclamped(0i32, 4, 1), 0.25);
        assert_eq!(remap(0i64, 100, 0, 10, 55), 5);
    }

    #[test]
    fn clamped_remap_stays_in_target() {
        assert_eq!(remap(0.0f64, 1.0, -1.0, 1.0, 7.0), 1.0);
        assert_eq!(remap(0.0f64, 1.0, -1.0, 1.0, -7.0), -1.0);
        assert_eq!(remap_unclamped(0.0f64, 1.0, -1.0, 1.0, 2.0), 3.0);
    }

    #[test]
    fn descending_target_range() {
        assert_eq!(remap(0.0f32, 1.0, 1.0, 0.0, 0.25), 0.75);
        assert_eq!(remap(0.0f32, 1.0, 1.0, 0.0, 5.0), 0.0);
    }

    #[test]
    fn degenerate_source_maps_to_target_min() {
        assert_eq!(remap(3.0f32, 3.0, 0.0, 1.0, 3.0), 0.0);
        assert_eq!(remap_unclamped(3i32, 3, 5, 9, 100), 5);
    }

    #[test]
    fn lerp_clamps_t() {
        assert_eq!(lerp(0.0f32, 10.0, 2.0), 10.0);
        assert_eq!(lerp(0.0f32, 10.0, -1.0), 0.0);
        assert_eq!(lerp_unclamped(0.0f32, 10.0, 2.0), 20.0);
    }

    #[test]
    fn settings_delegate() {
        let settings = RemapSettings::new(0.0f32, 50.0, 0.0, 1.0);
        assert_eq!(settings.remap(25.0), 0.5);
        assert_eq!(settings.remap(75.0), 1.0);
        assert_eq!(settings.remap_unclamped(75.0), 1.5);
        assert_eq!(settings.fraction(100.0), 1.0);
        assert_eq!(RemapSettings::<f32>::default().remap(0.3), 0.3);
    }

    #[test]
    fn saturate_bounds() {
        assert_eq!(saturate(1.5), 1.0);
        assert_eq!(saturate(-0.1), 0.0);
        assert_eq!(saturate(0.4), 0.4);
    }
}
