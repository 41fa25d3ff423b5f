#![forbid(unsafe_code)]

//! Observable, optionally clamped, optionally mutable typed variables.
//!
//! # Design
//!
//! [`TypedVariable<T>`] wraps its state in shared, reference-counted storage
//! (`Rc<RefCell<..>>`). Cloning a handle shares the same value and the same
//! subscriber list. Consumers that must not keep the variable alive hold a
//! [`WeakVariable<T>`] instead.
//!
//! Every write goes through one path:
//!
//! ```text
//! set(v) ──► mutable? ──no──► warn, Rejected
//!              │yes
//!              ▼
//!     previous = current
//!     current  = clamp(v)          (when a clamp range is configured)
//!              │
//!     current != previous ? ──no──► Unchanged (no notification)
//!              │yes
//!              ▼
//!     debug log / history record   (when instrumented)
//!     notify subscribers in subscription order
//! ```
//!
//! `set_without_notify` stops before the notification step, and its `force`
//! flag skips the mutability check for seeding.
//!
//! # Invariants
//!
//! 1. After any accepted write, `get()` equals the clamped request when a
//!    clamp range is configured, else the request verbatim.
//! 2. `previous()` holds the value from just before the last accepted write,
//!    even when that write did not change anything.
//! 3. `set` notifies iff the post-clamp value differs from the value before
//!    the write, with NaN counted equal to NaN. Only `notify_observers`, `force_to_initial_value` and
//!    `activate` notify unconditionally.
//! 4. Subscribers run synchronously, in subscription order, with no
//!    `RefCell` borrow held, so they may read or write the variable.
//! 5. A subscriber removed during a notification cycle is not invoked for
//!    the remainder of that cycle.
//!
//! # Failure Modes
//!
//! - **Immutable write**: logged at warn level, state untouched, returns
//!   [`WriteOutcome::Rejected`]. Never panics.
//! - **Re-entrant write from a subscriber**: allowed. The nested write
//!   notifies immediately, so later subscribers of the outer cycle may see
//!   a stale `Change` payload. Subscribers that care should re-read
//!   [`TypedVariable::get`] rather than trust the payload.

use std::backtrace::Backtrace;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, warn};

use crate::clock;
use crate::config::{ClampRange, VariableConfig};
use crate::error::ConfigError;
use crate::history::{ChangeHistory, ChangeRecord};
use crate::value::VariableValue;

/// Process-unique identity of a variable, assigned once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId(u64);

impl VariableId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Variable({})", self.0)
    }
}

/// Handle identifying one subscription on one variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Result of a write attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The stored value changed.
    Changed,
    /// The write was applied but the (clamped) value equals the old one.
    Unchanged,
    /// The variable is immutable and the write was not forced.
    Rejected,
}

impl WriteOutcome {
    /// Whether the stored value changed.
    #[must_use]
    pub const fn is_changed(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// Payload delivered to subscribers.
pub struct Change<'a, T> {
    /// The variable that changed.
    pub source: &'a TypedVariable<T>,
    /// Value before the write.
    pub previous: T,
    /// Value after the write.
    pub current: T,
}

impl<T: fmt::Debug> fmt::Debug for Change<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Change")
            .field("source", &self.source.inner.borrow().id)
            .field("previous", &self.previous)
            .field("current", &self.current)
            .finish()
    }
}

type Callback<T> = Rc<dyn Fn(&Change<'_, T>)>;

struct Subscriber<T> {
    id: SubscriptionId,
    /// Cleared on unsubscribe so an in-flight notification skips it.
    live: Rc<Cell<bool>>,
    callback: Callback<T>,
}

struct VariableInner<T> {
    id: VariableId,
    config: VariableConfig<T>,
    value: T,
    previous: T,
    subscribers: Vec<Subscriber<T>>,
    next_subscription: u64,
    history: Option<ChangeHistory<T>>,
}

impl<T: VariableValue> VariableInner<T> {
    /// Apply a write without notifying. The caller decides about notification.
    fn write(&mut self, value: T, force: bool) -> WriteOutcome {
        if !force && !self.config.mutable {
            warn!(
                variable = self.config.name.as_str(),
                id = self.id.raw(),
                attempted = %value,
                "attempted to change immutable value"
            );
            return WriteOutcome::Rejected;
        }

        self.previous = self.value;
        let clamped = match &self.config.clamp {
            Some(range) => range.apply(value),
            None => value,
        };
        self.value = clamped;

        if self.previous.same_value(&self.value) {
            return WriteOutcome::Unchanged;
        }
        self.record_change();
        WriteOutcome::Changed
    }

    fn record_change(&mut self) {
        if self.config.logs_changes() {
            debug!(
                variable = self.config.name.as_str(),
                id = self.id.raw(),
                old = %self.previous,
                new = %self.value,
                "value changed"
            );
        }
        let traces = self.config.traces_calls();
        if let Some(history) = &mut self.history {
            let trace = traces.then(|| Backtrace::force_capture().to_string());
            history.push(ChangeRecord::new(
                clock::elapsed(),
                clock::current_frame(),
                self.value,
                trace,
            ));
        }
    }
}

/// A shared, observable value holder.
///
/// Cloning a `TypedVariable` creates a new handle to the **same** state.
pub struct TypedVariable<T> {
    inner: Rc<RefCell<VariableInner<T>>>,
}

impl<T> Clone for TypedVariable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for TypedVariable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("TypedVariable")
            .field("id", &inner.id)
            .field("name", &inner.config.name)
            .field("value", &inner.value)
            .field("previous", &inner.previous)
            .field("mutable", &inner.config.mutable)
            .field("clamp", &inner.config.clamp)
            .field("subscriber_count", &inner.subscribers.len())
            .finish()
    }
}

impl<T: VariableValue> TypedVariable<T> {
    /// Create a mutable, unclamped, uninstrumented variable seeded with
    /// `initial`.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self::build(VariableConfig::new(initial).with_mutable(true))
    }

    /// Create a variable from an asset configuration.
    ///
    /// The value is seeded silently (clamped if configured); call
    /// [`TypedVariable::activate`] to broadcast it.
    pub fn from_config(config: VariableConfig<T>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: VariableConfig<T>) -> Self {
        let seeded = match &config.clamp {
            Some(range) => range.apply(config.initial_value),
            None => config.initial_value,
        };
        let history = config.tracks_changes().then(ChangeHistory::new);
        Self {
            inner: Rc::new(RefCell::new(VariableInner {
                id: VariableId::next(),
                config,
                value: seeded,
                previous: seeded,
                subscribers: Vec::new(),
                next_subscription: 0,
                history,
            })),
        }
    }

    /// Current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value
    }

    /// Value before the last accepted write.
    #[must_use]
    pub fn previous(&self) -> T {
        self.inner.borrow().previous
    }

    /// Write `value` and notify subscribers if it changed.
    ///
    /// Immutable variables reject the write with a warning.
    pub fn set(&self, value: T) -> WriteOutcome {
        let outcome = self.inner.borrow_mut().write(value, false);
        if outcome.is_changed() {
            self.notify();
        }
        outcome
    }

    /// Write `value` without notifying subscribers.
    ///
    /// With `force`, the mutability check is skipped. Forcing is meant for
    /// seeding and resets only.
    pub fn set_without_notify(&self, value: T, force: bool) -> WriteOutcome {
        self.inner.borrow_mut().write(value, force)
    }

    /// Write the initial value through the normal, notifying path.
    pub fn reset_to_initial_value(&self) -> WriteOutcome {
        let initial = self.initial_value();
        self.set(initial)
    }

    /// Seed the initial value regardless of mutability, without notifying.
    pub fn force_to_initial_value_without_notify(&self) -> WriteOutcome {
        let initial = self.initial_value();
        self.set_without_notify(initial, true)
    }

    /// Seed the initial value regardless of mutability and notify
    /// unconditionally, even when nothing changed.
    pub fn force_to_initial_value(&self) {
        self.force_to_initial_value_without_notify();
        self.notify();
    }

    /// Activation hook: seed silently, then broadcast the canonical state
    /// once.
    pub fn activate(&self) {
        self.force_to_initial_value();
    }

    /// Re-deliver `(previous, current)` to every subscriber.
    pub fn notify_observers(&self) {
        self.notify();
    }

    /// Register a change callback. Callbacks run in subscription order.
    pub fn subscribe(&self, callback: impl Fn(&Change<'_, T>) + 'static) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        let id = SubscriptionId(inner.next_subscription);
        inner.next_subscription += 1;
        inner.subscribers.push(Subscriber {
            id,
            live: Rc::new(Cell::new(true)),
            callback: Rc::new(callback),
        });
        id
    }

    /// Like [`TypedVariable::subscribe`], but the returned guard
    /// unsubscribes when dropped.
    pub fn subscribe_scoped(&self, callback: impl Fn(&Change<'_, T>) + 'static) -> Subscription {
        let id = self.subscribe(callback);
        let weak = self.downgrade();
        Subscription {
            release: Some(Box::new(move || {
                if let Some(variable) = weak.upgrade() {
                    variable.unsubscribe(id);
                }
            })),
        }
    }

    /// Remove a subscription. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.borrow_mut();
        match inner.subscribers.iter().position(|s| s.id == id) {
            Some(index) => {
                let removed = inner.subscribers.remove(index);
                removed.live.set(false);
                true
            }
            None => false,
        }
    }

    /// Number of registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    fn notify(&self) {
        // Snapshot outside the borrow so callbacks may touch the variable.
        let (previous, current, subscribers) = {
            let inner = self.inner.borrow();
            let subscribers: Vec<(Rc<Cell<bool>>, Callback<T>)> = inner
                .subscribers
                .iter()
                .map(|s| (Rc::clone(&s.live), Rc::clone(&s.callback)))
                .collect();
            (inner.previous, inner.value, subscribers)
        };

        let change = Change {
            source: self,
            previous,
            current,
        };
        for (live, callback) in &subscribers {
            if live.get() {
                callback(&change);
            }
        }
    }

    /// Identity token.
    #[must_use]
    pub fn id(&self) -> VariableId {
        self.inner.borrow().id
    }

    /// Configured name.
    #[must_use]
    pub fn name(&self) -> String {
        self.inner.borrow().config.name.clone()
    }

    /// Configured initial value (before clamping).
    #[must_use]
    pub fn initial_value(&self) -> T {
        self.inner.borrow().config.initial_value
    }

    /// Whether runtime writes are accepted.
    #[must_use]
    pub fn is_mutable(&self) -> bool {
        self.inner.borrow().config.mutable
    }

    /// Whether writes are clamped.
    #[must_use]
    pub fn is_clamped(&self) -> bool {
        self.inner.borrow().config.clamp.is_some()
    }

    /// Configured clamp range, if any.
    #[must_use]
    pub fn clamp_range(&self) -> Option<ClampRange<T>> {
        self.inner.borrow().config.clamp
    }

    /// Lower clamp bound, if clamped.
    #[must_use]
    pub fn clamp_min(&self) -> Option<T> {
        self.clamp_range().map(|r| r.min)
    }

    /// Upper clamp bound, if clamped.
    #[must_use]
    pub fn clamp_max(&self) -> Option<T> {
        self.clamp_range().map(|r| r.max)
    }

    /// Copy of the configuration this variable was built from.
    #[must_use]
    pub fn config(&self) -> VariableConfig<T> {
        self.inner.borrow().config.clone()
    }

    /// Snapshot of the change history, when change tracking is enabled.
    #[must_use]
    pub fn history(&self) -> Option<ChangeHistory<T>> {
        self.inner.borrow().history.clone()
    }

    /// Create a non-owning handle.
    #[must_use]
    pub fn downgrade(&self) -> WeakVariable<T> {
        WeakVariable {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Whether two handles refer to the same variable.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Non-owning handle to a [`TypedVariable`].
pub struct WeakVariable<T> {
    inner: Weak<RefCell<VariableInner<T>>>,
}

impl<T> Clone for WeakVariable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for WeakVariable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakVariable")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

impl<T> WeakVariable<T> {
    /// Get a strong handle if the variable is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<TypedVariable<T>> {
        self.inner.upgrade().map(|inner| TypedVariable { inner })
    }

    /// Whether the variable is still alive.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

/// RAII guard for a variable subscription.
///
/// Dropping the guard unsubscribes the callback. If the variable is already
/// gone, dropping is a no-op.
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Keep the subscription for the variable's lifetime.
    pub fn detach(mut self) {
        self.release = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
