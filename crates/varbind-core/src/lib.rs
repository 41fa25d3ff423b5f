#![forbid(unsafe_code)]

//! Core: observable typed variables, value references and remap helpers.
//!
//! # Role in varbind
//! `varbind-core` is the model layer. It owns the value holders that UI
//! bindings (`varbind-widgets`) observe and write, and the pure numeric
//! helpers those bindings use to map values onto widgets.
//!
//! # Primary responsibilities
//! - **TypedVariable**: shared value holder with mutability, clamping and
//!   exactly-once-per-change notification.
//! - **VariableReference**: "inline value or shared variable" indirection.
//! - **Remap**: lerp / inverse-lerp / clamped and unclamped range remapping.
//! - **Configuration**: validated, asset-loader-facing variable settings.
//! - **Registry**: host-owned, type-erased enumeration for lifecycle
//!   transitions.
//!
//! # Threading
//! Everything here is single-threaded (`Rc`/`RefCell`). Writes, clamping
//! and notification fan-out all run synchronously on the calling thread.

pub mod clamp;
pub mod clock;
pub mod config;
pub mod dynamic;
pub mod error;
pub mod history;
pub mod reference;
pub mod registry;
pub mod remap;
pub mod value;
pub mod variable;
pub mod vector;

pub use clamp::Clampable;
pub use config::{ClampRange, Instrumentation, VariableConfig};
pub use dynamic::DynVariable;
pub use error::{ConfigError, VariableError};
pub use history::{ChangeHistory, ChangeRecord, HISTORY_SIZE};
pub use reference::VariableReference;
pub use registry::VariableRegistry;
pub use remap::{RemapScalar, RemapSettings};
pub use value::{AnyValue, ValueKind, VariableValue};
pub use variable::{
    Change, Subscription, SubscriptionId, TypedVariable, VariableId, WeakVariable, WriteOutcome,
};
pub use vector::{Vec2, Vec3};

/// Variable holding a `bool`.
pub type BoolVariable = TypedVariable<bool>;
/// Variable holding an `i32`.
pub type IntVariable = TypedVariable<i32>;
/// Variable holding an `i64`.
pub type LongVariable = TypedVariable<i64>;
/// Variable holding an `f32`.
pub type FloatVariable = TypedVariable<f32>;
/// Variable holding a [`Vec2`].
pub type Vec2Variable = TypedVariable<Vec2>;
/// Variable holding a [`Vec3`].
pub type Vec3Variable = TypedVariable<Vec3>;
