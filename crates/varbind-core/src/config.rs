#![forbid(unsafe_code)]

//! Variable configuration as supplied by an asset loader.
//!
//! A [`VariableConfig`] captures everything that is fixed when the owning
//! asset is loaded: initial value, mutability, clamp range and debugging
//! instrumentation. [`VariableConfig::validate`] rejects configurations the
//! runtime cannot honor, so per-write code never has to re-check them.

use crate::clamp::Clampable;
use crate::error::ConfigError;
use crate::value::VariableValue;

/// A closed clamp range `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClampRange<T> {
    pub min: T,
    pub max: T,
}

impl<T: VariableValue> ClampRange<T> {
    /// Create a range. Ordering is checked by [`VariableConfig::validate`].
    #[must_use]
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// Constrain `value` to this range.
    #[inline]
    #[must_use]
    pub fn apply(&self, value: T) -> T {
        value.clamp_between(self.min, self.max)
    }
}

/// Debugging instrumentation flags.
///
/// The flags are layered: change tracking requires `debug`, call tracing
/// requires change tracking, and all of them require a mutable variable.
/// The effective values are exposed by [`VariableConfig::logs_changes`],
/// [`VariableConfig::tracks_changes`] and [`VariableConfig::traces_calls`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instrumentation {
    /// Log a debug record on every effective change.
    pub debug: bool,
    /// Keep a bounded history of changes.
    pub track_changes: bool,
    /// Capture a backtrace with every history entry. Expensive.
    pub trace_calls: bool,
}

/// Configuration for a [`TypedVariable`](crate::TypedVariable).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariableConfig<T> {
    /// Human-readable name used in log records.
    pub name: String,
    /// Value seeded on activation and reset.
    pub initial_value: T,
    /// Whether runtime writes are accepted.
    pub mutable: bool,
    /// Optional clamp range.
    pub clamp: Option<ClampRange<T>>,
    /// Debugging instrumentation.
    pub instrumentation: Instrumentation,
}

impl<T: VariableValue> Default for VariableConfig<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: VariableValue> VariableConfig<T> {
    /// Create a configuration with the given initial value.
    ///
    /// Defaults: unnamed, immutable, unclamped, no instrumentation. These
    /// match a freshly created variable asset.
    #[must_use]
    pub fn new(initial_value: T) -> Self {
        Self {
            name: String::new(),
            initial_value,
            mutable: false,
            clamp: None,
            instrumentation: Instrumentation::default(),
        }
    }

    /// Set the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set mutability.
    #[must_use]
    pub fn with_mutable(mut self, mutable: bool) -> Self {
        self.mutable = mutable;
        self
    }

    /// Clamp to `[min, max]`.
    #[must_use]
    pub fn with_clamp(mut self, min: T, max: T) -> Self {
        self.clamp = Some(ClampRange::new(min, max));
        self
    }

    /// Set instrumentation flags.
    #[must_use]
    pub fn with_instrumentation(mut self, instrumentation: Instrumentation) -> Self {
        self.instrumentation = instrumentation;
        self
    }

    /// Check that clamping is supported for `T` and the bounds are ordered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Some(range) = &self.clamp else {
            return Ok(());
        };
        if !T::CAN_CLAMP {
            return Err(ConfigError::UnsupportedClamp { kind: T::KIND });
        }
        if !T::is_ordered(&range.min, &range.max) {
            return Err(ConfigError::InvertedClampBounds {
                min: range.min.to_string(),
                max: range.max.to_string(),
            });
        }
        Ok(())
    }

    /// Whether effective changes are logged at debug level.
    #[must_use]
    pub fn logs_changes(&self) -> bool {
        self.mutable && self.instrumentation.debug
    }

    /// Whether a change history is kept.
    #[must_use]
    pub fn tracks_changes(&self) -> bool {
        self.logs_changes() && self.instrumentation.track_changes
    }

    /// Whether history entries capture a backtrace.
    #[must_use]
    pub fn traces_calls(&self) -> bool {
        self.tracks_changes() && self.instrumentation.trace_calls
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vec2;

    #[test]
    fn unclamped_config_is_valid() {
        assert_eq!(VariableConfig::new(true).validate(), Ok(()));
        assert_eq!(VariableConfig::new(3i32).validate(), Ok(()));
    }

    #[test]
    fn bool_clamp_is_rejected() {
        let cfg = VariableConfig::new(false).with_clamp(false, true);
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::UnsupportedClamp {
                kind: crate::ValueKind::Bool
            })
        );
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let cfg = VariableConfig::new(0i64).with_clamp(10, 0);
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvertedClampBounds { .. })
        ));

        let cfg = VariableConfig::new(Vec2::ZERO).with_clamp(Vec2::new(0.0, 1.0), Vec2::new(1.0, 0.0));
        assert!(cfg.validate().is_err());

        let cfg = VariableConfig::new(0.0f32).with_clamp(f32::NAN, 1.0);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn equal_bounds_are_valid() {
        let cfg = VariableConfig::new(0.0f32).with_clamp(1.0, 1.0);
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn instrumentation_is_layered() {
        let all = Instrumentation {
            debug: true,
            track_changes: true,
            trace_calls: true,
        };
        let immutable = VariableConfig::new(0i32).with_instrumentation(all);
        assert!(!immutable.logs_changes());
        assert!(!immutable.tracks_changes());

        let mutable = immutable.clone().with_mutable(true);
        assert!(mutable.logs_changes());
        assert!(mutable.tracks_changes());
        assert!(mutable.traces_calls());

        let no_debug = mutable.with_instrumentation(Instrumentation {
            debug: false,
            ..all
        });
        assert!(!no_debug.tracks_changes());
        assert!(!no_debug.traces_calls());
    }

    #[test]
    fn builder_sets_fields() {
        let cfg = VariableConfig::new(5i32)
            .with_name("score")
            .with_mutable(true)
            .with_clamp(0, 10);
        assert_eq!(cfg.name, "score");
        assert!(cfg.mutable);
        assert_eq!(cfg.clamp.map(|r| r.apply(42)), Some(10));
        assert_eq!(VariableConfig::<i32>::default().initial_value, 0);
    }
}
