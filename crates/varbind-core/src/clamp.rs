#![forbid(unsafe_code)]

//! Per-kind clamp strategies.
//!
//! Clamping is a capability of a value kind, not a universal trait of
//! variables: numeric scalars clamp with a standard min/max, vectors clamp
//! componentwise, and `bool` has no ordering at all. A variable configured
//! to clamp a kind with `CAN_CLAMP == false` is rejected when its
//! configuration is validated, so [`Clampable::clamp_between`] is never
//! reached for such kinds at write time.
//!
//! # Invariants
//!
//! 1. For ordered bounds, `min <= clamp_between(v, min, max) <= max`
//!    (componentwise for vectors).
//! 2. `clamp_between(v, min, max) == v` whenever `v` is already in range.
//! 3. `is_ordered(min, max)` is false for inverted or NaN bounds.

use crate::vector::{Vec2, Vec3};

/// Clamp strategy for a value kind.
pub trait Clampable: Copy {
    /// Whether values of this kind can be constrained to a range.
    const CAN_CLAMP: bool;

    /// Constrain `self` to `[min, max]`.
    ///
    /// Callers must only pass bounds for which [`Clampable::is_ordered`]
    /// holds.
    #[must_use]
    fn clamp_between(self, min: Self, max: Self) -> Self;

    /// Whether `[min, max]` is a valid, non-inverted range.
    fn is_ordered(min: &Self, max: &Self) -> bool;
}

impl Clampable for bool {
    const CAN_CLAMP: bool = false;

    #[inline]
    fn clamp_between(self, _min: Self, _max: Self) -> Self {
        self
    }

    #[inline]
    fn is_ordered(_min: &Self, _max: &Self) -> bool {
        false
    }
}

macro_rules! impl_clampable_ord {
    ($($t:ty),*) => {
        $(
            impl Clampable for $t {
                const CAN_CLAMP: bool = true;

                #[inline]
                fn clamp_between(self, min: Self, max: Self) -> Self {
                    self.clamp(min, max)
                }

                #[inline]
                fn is_ordered(min: &Self, max: &Self) -> bool {
                    min <= max
                }
            }
        )*
    };
}

impl_clampable_ord!(i32, i64);

impl Clampable for f32 {
    const CAN_CLAMP: bool = true;

    #[inline]
    fn clamp_between(self, min: Self, max: Self) -> Self {
        // NaN input stays NaN; bounds are validated beforehand.
        self.clamp(min, max)
    }

    #[inline]
    fn is_ordered(min: &Self, max: &Self) -> bool {
        min <= max
    }
}

impl Clampable for Vec2 {
    const CAN_CLAMP: bool = true;

    #[inline]
    fn clamp_between(self, min: Self, max: Self) -> Self {
        self.zip3(min, max, f32::clamp)
    }

    #[inline]
    fn is_ordered(min: &Self, max: &Self) -> bool {
        min.x <= max.x && min.y <= max.y
    }
}

impl Clampable for Vec3 {
    const CAN_CLAMP: bool = true;

    #[inline]
    fn clamp_between(self, min: Self, max: Self) -> Self {
        self.zip3(min, max, f32::clamp)
    }

    #[inline]
    fn is_ordered(min: &Self, max: &Self) -> bool {
        min.x <= max.x && min.y <= max.y && min.z <= max.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_clamp() {
        assert_eq!(15i32.clamp_between(0, 10), 10);
        assert_eq!((-3i32).clamp_between(0, 10), 0);
        assert_eq!(7i64.clamp_between(0, 10), 7);
    }

    #[test]
    fn float_clamp() {
        assert_eq!(1.5f32.clamp_between(0.0, 1.0), 1.0);
        assert_eq!((-0.5f32).clamp_between(0.0, 1.0), 0.0);
    }

    #[test]
    fn vector_clamp_is_componentwise() {
        let v = Vec3::new(-5.0, 0.5, 9.0);
        let clamped = v.clamp_between(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(clamped, Vec3::new(0.0, 0.5, 1.0));

        let v2 = Vec2::new(3.0, -3.0).clamp_between(Vec2::new(-1.0, -1.0), Vec2::new(1.0, 1.0));
        assert_eq!(v2, Vec2::new(1.0, -1.0));
    }

    #[test]
    fn ordering_checks() {
        assert!(i32::is_ordered(&0, &0));
        assert!(!i32::is_ordered(&1, &0));
        assert!(!f32::is_ordered(&f32::NAN, &1.0));
        assert!(!Vec2::is_ordered(&Vec2::new(0.0, 2.0), &Vec2::new(1.0, 1.0)));
        assert!(Vec3::is_ordered(&Vec3::ZERO, &Vec3::ZERO));
    }

    #[test]
    fn bool_cannot_clamp() {
        const { assert!(!<bool as Clampable>::CAN_CLAMP) };
        assert!(!bool::is_ordered(&false, &true));
        assert!(true.clamp_between(false, false));
    }
}
