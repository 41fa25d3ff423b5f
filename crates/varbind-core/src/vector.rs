#![forbid(unsafe_code)]

//! Small float vectors used as variable value kinds.

use std::fmt;

/// A two-component float vector.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a vector from its components.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Apply `f` to each component pair of `self`, `a` and `b`.
    #[inline]
    #[must_use]
    pub fn zip3(self, a: Self, b: Self, f: impl Fn(f32, f32, f32) -> f32) -> Self {
        Self::new(f(self.x, a.x, b.x), f(self.y, a.y, b.y))
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(f32, f32)> for Vec2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

/// A three-component float vector.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a vector from its components.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Apply `f` to each component triple of `self`, `a` and `b`.
    #[inline]
    #[must_use]
    pub fn zip3(self, a: Self, b: Self, f: impl Fn(f32, f32, f32) -> f32) -> Self {
        Self::new(f(self.x, a.x, b.x), f(self.y, a.y, b.y), f(self.z, a.z, b.z))
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl From<(f32, f32, f32)> for Vec3 {
    fn from((x, y, z): (f32, f32, f32)) -> Self {
        Self::new(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_components() {
        assert_eq!(Vec2::new(1.0, 2.5).to_string(), "(1, 2.5)");
        assert_eq!(Vec3::new(0.0, -1.0, 3.0).to_string(), "(0, -1, 3)");
    }

    #[test]
    fn zip3_is_componentwise() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        let sum = v.zip3(Vec3::new(10.0, 20.0, 30.0), Vec3::ZERO, |a, b, _| a + b);
        assert_eq!(sum, Vec3::new(11.0, 22.0, 33.0));
    }

    #[test]
    fn default_is_zero() {
        assert_eq!(Vec2::default(), Vec2::ZERO);
        assert_eq!(Vec3::default(), Vec3::ZERO);
    }
}
