#![forbid(unsafe_code)]

//! Bidirectional synchronization between one variable and one widget.
//!
//! # Design
//!
//! A [`ComponentBinding<A>`] observes two change sources and updates each
//! from the other. The widget-specific parts (converters and event wiring)
//! live in a [`WidgetAdapter`]; the binding owns the lifecycle and the
//! loop-breaking rules.
//!
//! ```text
//!            on_view_changed                         set (notifying)
//! widget ───────────────────────► view_to_model ─────────────────────► variable
//!   ▲                                                                     │
//!   │  push_to_widget_without_notify                 on_variable_changed  │
//!   └──────────────────────────── model_to_view ◄─────────────────────────┘
//! ```
//!
//! The model-to-view direction always uses the widget's silent write path,
//! so a refresh never re-raises the widget event. The view-to-model
//! direction always uses the variable's notifying `set`, so every other
//! observer of the variable stays in sync.
//!
//! # State machine
//!
//! ```text
//! Inactive ──activate──► Active ──deactivate──► Inactive
//! ```
//!
//! Redundant `activate`/`deactivate` calls are no-ops. Every subscription
//! made by `activate` is undone by exactly one `deactivate`.
//!
//! # Invariants
//!
//! 1. While active, each effective change of the variable pushes exactly
//!    one view value to the widget.
//! 2. A widget-originated change writes the variable exactly once. If that
//!    write changes nothing (equal value, clamped away, or rejected), the
//!    widget is refreshed once so it shows the canonical model value.
//! 3. A view change raised while a widget-originated write is in flight is
//!    ignored.
//!
//! # Failure Modes
//!
//! - **Variable dropped while bound**: the binding holds it weakly and
//!   behaves as if none were bound. Widget changes are discarded.
//! - **Binding dropped while active**: deactivated on drop.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::trace;
use varbind_core::{SubscriptionId, TypedVariable, VariableValue, WeakVariable};

use crate::event::ListenerId;

/// Widget-specific half of a binding.
///
/// Converters must be pure and total: every possible view value, including
/// malformed text, maps to a defined model value.
pub trait WidgetAdapter: 'static {
    /// Value kind stored in the bound variable.
    type Model: VariableValue;
    /// Value the widget displays or raises.
    type View: 'static;
    /// Widget model the adapter drives.
    type Widget: 'static;

    /// Convert a model value into what the widget shows.
    fn model_to_view(&self, model: Self::Model) -> Self::View;

    /// Convert a raised view value. `current` is the variable's value before
    /// the write, for widgets whose events carry no payload.
    fn view_to_model(&self, view: Self::View, current: Self::Model) -> Self::Model;

    /// Route the widget's change event to `on_change`. Display-only widgets
    /// return `None`.
    fn subscribe_widget(
        &self,
        widget: &Self::Widget,
        on_change: Rc<dyn Fn(Self::View)>,
    ) -> Option<ListenerId>;

    /// Undo [`WidgetAdapter::subscribe_widget`].
    fn unsubscribe_widget(&self, widget: &Self::Widget, listener: ListenerId);

    /// Show `view` on the widget without raising its change event.
    fn push_to_widget_without_notify(&self, widget: &Self::Widget, view: Self::View);
}

/// Lifecycle state of a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BindingState {
    #[default]
    Inactive,
    Active,
}

/// Propagation counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BindingStats {
    /// Values pushed into the widget.
    pub view_pushes: u64,
    /// Widget-originated writes to the variable.
    pub model_writes: u64,
}

struct BindingCore<A: WidgetAdapter> {
    adapter: A,
    widget: RefCell<Option<Rc<A::Widget>>>,
    variable: RefCell<Option<WeakVariable<A::Model>>>,
    state: Cell<BindingState>,
    variable_subscription: Cell<Option<(WeakVariable<A::Model>, SubscriptionId)>>,
    widget_listener: Cell<Option<(Rc<A::Widget>, ListenerId)>>,
    /// Set while a widget-originated write is in flight.
    propagating: Cell<bool>,
    refreshed: Cell<bool>,
    stats: Cell<BindingStats>,
}

impl<A: WidgetAdapter> BindingCore<A> {
    fn widget(&self) -> Option<Rc<A::Widget>> {
        self.widget.borrow().clone()
    }

    fn live_variable(&self) -> Option<TypedVariable<A::Model>> {
        self.variable.borrow().as_ref().and_then(WeakVariable::upgrade)
    }

    fn refresh_view(&self) {
        let (Some(widget), Some(variable)) = (self.widget(), self.live_variable()) else {
            return;
        };
        let view = self.adapter.model_to_view(variable.get());
        self.adapter.push_to_widget_without_notify(&widget, view);
        self.refreshed.set(true);
        let mut stats = self.stats.get();
        stats.view_pushes += 1;
        self.stats.set(stats);
    }

    fn on_variable_changed(&self) {
        self.refresh_view();
    }

    fn on_view_changed(&self, view: A::View) {
        if self.propagating.get() {
            trace!(
                adapter = std::any::type_name::<A>(),
                "re-entrant view change ignored"
            );
            return;
        }
        let Some(variable) = self.live_variable() else {
            trace!(
                adapter = std::any::type_name::<A>(),
                "view change without a bound variable dropped"
            );
            return;
        };
        let model = self.adapter.view_to_model(view, variable.get());

        self.propagating.set(true);
        self.refreshed.set(false);
        let mut stats = self.stats.get();
        stats.model_writes += 1;
        self.stats.set(stats);
        let outcome = variable.set(model);
        self.propagating.set(false);

        if !self.refreshed.get() {
            trace!(
                adapter = std::any::type_name::<A>(),
                ?outcome,
                "write did not refresh the widget; re-syncing"
            );
            self.refresh_view();
        }
    }
}

/// Bidirectional binding between a [`TypedVariable`] and a widget.
///
/// The binding holds the variable weakly and the widget strongly. It starts
/// [`BindingState::Inactive`]; the host calls [`ComponentBinding::activate`]
/// and [`ComponentBinding::deactivate`] as the owning component is enabled
/// and disabled.
pub struct ComponentBinding<A: WidgetAdapter> {
    core: Rc<BindingCore<A>>,
}

impl<A: WidgetAdapter> fmt::Debug for ComponentBinding<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentBinding")
            .field("adapter", &std::any::type_name::<A>())
            .field("state", &self.core.state.get())
            .field("has_widget", &self.core.widget.borrow().is_some())
            .field("has_variable", &self.core.live_variable().is_some())
            .field("stats", &self.core.stats.get())
            .finish()
    }
}

impl<A: WidgetAdapter> ComponentBinding<A> {
    /// Create an inactive binding with no widget and no variable.
    #[must_use]
    pub fn new(adapter: A) -> Self {
        Self {
            core: Rc::new(BindingCore {
                adapter,
                widget: RefCell::new(None),
                variable: RefCell::new(None),
                state: Cell::new(BindingState::Inactive),
                variable_subscription: Cell::new(None),
                widget_listener: Cell::new(None),
                propagating: Cell::new(false),
                refreshed: Cell::new(false),
                stats: Cell::new(BindingStats::default()),
            }),
        }
    }

    /// Set the widget (builder).
    #[must_use]
    pub fn with_widget(self, widget: Rc<A::Widget>) -> Self {
        self.set_widget(Some(widget));
        self
    }

    /// Set the variable (builder).
    #[must_use]
    pub fn with_variable(self, variable: &TypedVariable<A::Model>) -> Self {
        self.set_variable(Some(variable));
        self
    }

    /// Replace the widget. An active binding is deactivated, rewired and
    /// reactivated.
    pub fn set_widget(&self, widget: Option<Rc<A::Widget>>) {
        self.rebind(|core| {
            core.widget.replace(widget);
        });
    }

    /// Replace the variable. An active binding is deactivated, rewired and
    /// reactivated.
    pub fn set_variable(&self, variable: Option<&TypedVariable<A::Model>>) {
        let weak = variable.map(TypedVariable::downgrade);
        self.rebind(|core| {
            core.variable.replace(weak);
        });
    }

    fn rebind(&self, swap: impl FnOnce(&BindingCore<A>)) {
        let was_active = self.is_active();
        if was_active {
            self.deactivate();
        }
        swap(&self.core);
        if was_active {
            self.activate();
        }
    }

    /// Subscribe to the variable and the widget, then refresh the view once.
    pub fn activate(&self) {
        let core = &self.core;
        if core.state.get() == BindingState::Active {
            trace!(
                adapter = std::any::type_name::<A>(),
                "redundant activate ignored"
            );
            return;
        }
        core.state.set(BindingState::Active);

        if let Some(variable) = core.live_variable() {
            let weak: Weak<BindingCore<A>> = Rc::downgrade(core);
            let id = variable.subscribe(move |_| {
                if let Some(core) = weak.upgrade() {
                    core.on_variable_changed();
                }
            });
            core.variable_subscription
                .set(Some((variable.downgrade(), id)));

            if let Some(widget) = core.widget() {
                let weak: Weak<BindingCore<A>> = Rc::downgrade(core);
                let on_change: Rc<dyn Fn(A::View)> = Rc::new(move |view: A::View| {
                    if let Some(core) = weak.upgrade() {
                        core.on_view_changed(view);
                    }
                });
                if let Some(listener) = core.adapter.subscribe_widget(&widget, on_change) {
                    core.widget_listener.set(Some((widget, listener)));
                }
            }
        }

        core.refresh_view();
        trace!(adapter = std::any::type_name::<A>(), "binding activated");
    }

    /// Undo every subscription made by [`ComponentBinding::activate`].
    pub fn deactivate(&self) {
        let core = &self.core;
        if core.state.get() == BindingState::Inactive {
            trace!(
                adapter = std::any::type_name::<A>(),
                "redundant deactivate ignored"
            );
            return;
        }
        core.state.set(BindingState::Inactive);

        if let Some((variable, id)) = core.variable_subscription.take() {
            if let Some(variable) = variable.upgrade() {
                variable.unsubscribe(id);
            }
        }
        if let Some((widget, listener)) = core.widget_listener.take() {
            core.adapter.unsubscribe_widget(&widget, listener);
        }
        trace!(adapter = std::any::type_name::<A>(), "binding deactivated");
    }

    /// Push the variable's current value to the widget without notifying.
    /// No-op unless both a widget and a live variable are bound.
    pub fn refresh_view(&self) {
        self.core.refresh_view();
    }

    /// Handle a view value as if the widget had raised it. Ignored while
    /// the binding is inactive.
    pub fn on_view_changed(&self, view: A::View) {
        if !self.is_active() {
            trace!(
                adapter = std::any::type_name::<A>(),
                "view change on inactive binding ignored"
            );
            return;
        }
        self.core.on_view_changed(view);
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> BindingState {
        self.core.state.get()
    }

    /// Whether the binding is currently syncing.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state() == BindingState::Active
    }

    /// Push and write counters since construction.
    #[must_use]
    pub fn stats(&self) -> BindingStats {
        self.core.stats.get()
    }

    /// The widget-specific adapter.
    #[must_use]
    pub fn adapter(&self) -> &A {
        &self.core.adapter
    }

    /// The bound widget, if any.
    #[must_use]
    pub fn widget(&self) -> Option<Rc<A::Widget>> {
        self.core.widget()
    }

    /// The bound variable, if one is bound and still alive.
    #[must_use]
    pub fn variable(&self) -> Option<TypedVariable<A::Model>> {
        self.core.live_variable()
    }
}

impl<A: WidgetAdapter> Drop for ComponentBinding<A> {
    fn drop(&mut self) {
        if self.is_active() {
            self.deactivate();
        }
    }
}
