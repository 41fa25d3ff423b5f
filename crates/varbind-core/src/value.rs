#![forbid(unsafe_code)]

//! The closed set of value kinds a variable can hold.
//!
//! [`VariableValue`] is sealed: only `bool`, `i32`, `i64`, `f32`, [`Vec2`]
//! and [`Vec3`] implement it. [`AnyValue`] is the type-erased form used by
//! hosts that cannot name the concrete kind statically.

use std::fmt;

use crate::clamp::Clampable;
use crate::vector::{Vec2, Vec3};

mod sealed {
    pub trait Sealed {}
    impl Sealed for bool {}
    impl Sealed for i32 {}
    impl Sealed for i64 {}
    impl Sealed for f32 {}
    impl Sealed for crate::vector::Vec2 {}
    impl Sealed for crate::vector::Vec3 {}
}

/// Discriminant of a value kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueKind {
    Bool,
    Int,
    Long,
    Float,
    Vec2,
    Vec3,
}

impl ValueKind {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Vec2 => "vec2",
            Self::Vec3 => "vec3",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value a [`TypedVariable`](crate::TypedVariable) can hold.
///
/// `Default` is the kind's zero value, returned by unassigned references and
/// by text converters that fail to parse.
pub trait VariableValue:
    sealed::Sealed + Clampable + PartialEq + Default + fmt::Debug + fmt::Display + 'static
{
    /// Kind discriminant.
    const KIND: ValueKind;

    /// Wrap into the type-erased representation.
    fn into_any(self) -> AnyValue;

    /// Unwrap from the type-erased representation, if the kind matches.
    fn from_any(value: AnyValue) -> Option<Self>;

    /// Change-detection equality. Unlike `==`, NaN equals NaN, so rewriting
    /// a NaN is not a change.
    #[inline]
    fn same_value(&self, other: &Self) -> bool {
        self == other
    }
}

#[inline]
fn same_float(a: f32, b: f32) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

macro_rules! impl_variable_value {
    ($t:ty, $kind:ident) => {
        impl_variable_value!($t, $kind, {});
    };
    ($t:ty, $kind:ident, { $($extra:item)* }) => {
        impl VariableValue for $t {
            const KIND: ValueKind = ValueKind::$kind;

            $($extra)*

            #[inline]
            fn into_any(self) -> AnyValue {
                AnyValue::$kind(self)
            }

            #[inline]
            fn from_any(value: AnyValue) -> Option<Self> {
                match value {
                    AnyValue::$kind(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

impl_variable_value!(bool, Bool);
impl_variable_value!(i32, Int);
impl_variable_value!(i64, Long);
impl_variable_value!(f32, Float, {
    #[inline]
    fn same_value(&self, other: &Self) -> bool {
        same_float(*self, *other)
    }
});
impl_variable_value!(Vec2, Vec2, {
    #[inline]
    fn same_value(&self, other: &Self) -> bool {
        same_float(self.x, other.x) && same_float(self.y, other.y)
    }
});
impl_variable_value!(Vec3, Vec3, {
    #[inline]
    fn same_value(&self, other: &Self) -> bool {
        same_float(self.x, other.x) && same_float(self.y, other.y) && same_float(self.z, other.z)
    }
});

/// A value of any supported kind.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnyValue {
    Bool(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
}

impl AnyValue {
    /// Kind of the wrapped value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Long(_) => ValueKind::Long,
            Self::Float(_) => ValueKind::Float,
            Self::Vec2(_) => ValueKind::Vec2,
            Self::Vec3(_) => ValueKind::Vec3,
        }
    }
}

impl fmt::Display for AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => fmt::Display::fmt(v, f),
            Self::Int(v) => fmt::Display::fmt(v, f),
            Self::Long(v) => fmt::Display::fmt(v, f),
            Self::Float(v) => fmt::Display::fmt(v, f),
            Self::Vec2(v) => fmt::Display::fmt(v, f),
            Self::Vec3(v) => fmt::Display::fmt(v, f),
        }
    }
}
