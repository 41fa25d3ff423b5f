#![forbid(unsafe_code)]

//! Host-owned registry of live variables.
//!
//! Variables do not enumerate themselves. A host that needs to re-seed every
//! variable on a lifecycle transition (for example, entering play mode in an
//! editor) registers them here and drives the two-phase protocol:
//!
//! 1. [`VariableRegistry::seed_all_silently`] before any consumer
//!    initializes, so every variable holds its initial value.
//! 2. [`VariableRegistry::broadcast_all`] on the first frame, so every
//!    subscriber observes the canonical state once.
//!
//! The registry holds weak references. Dropped variables are skipped and
//! pruned.

use tracing::trace;

use crate::dynamic::DynVariable;
use crate::value::VariableValue;
use crate::variable::{TypedVariable, VariableId, WeakVariable};

/// Weak handle to a variable of any kind.
trait ErasedWeak {
    fn is_alive(&self) -> bool;
    fn with_live(&self, f: &mut dyn FnMut(&dyn DynVariable));
}

impl<T: VariableValue> ErasedWeak for WeakVariable<T> {
    fn is_alive(&self) -> bool {
        WeakVariable::is_alive(self)
    }

    fn with_live(&self, f: &mut dyn FnMut(&dyn DynVariable)) {
        if let Some(variable) = self.upgrade() {
            f(&variable);
        }
    }
}

struct Entry {
    id: VariableId,
    variable: Box<dyn ErasedWeak>,
}

/// Weak collection of type-erased variables.
#[derive(Default)]
pub struct VariableRegistry {
    entries: Vec<Entry>,
}

impl std::fmt::Debug for VariableRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VariableRegistry")
            .field("len", &self.entries.len())
            .finish()
    }
}

impl VariableRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a variable. Returns `false` if it was already registered.
    pub fn register<T: VariableValue>(&mut self, variable: &TypedVariable<T>) -> bool {
        let id = variable.id();
        if self.entries.iter().any(|e| e.id == id) {
            return false;
        }
        self.entries.push(Entry {
            id,
            variable: Box::new(variable.downgrade()),
        });
        trace!(id = id.raw(), "variable registered");
        true
    }

    /// Remove a variable. Returns `false` if it was not registered.
    pub fn unregister(&mut self, id: VariableId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        before != self.entries.len()
    }

    /// Number of entries, including dead ones not yet pruned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Seed every live variable with its initial value, without notifying.
    pub fn seed_all_silently(&mut self) {
        self.for_each_live(&mut |variable: &dyn DynVariable| variable.seed_silently());
    }

    /// Re-deliver current state to subscribers of every live variable.
    pub fn broadcast_all(&mut self) {
        self.for_each_live(&mut |variable: &dyn DynVariable| variable.broadcast());
    }

    /// Visit every live variable in registration order, pruning dead ones.
    pub fn for_each_live(&mut self, f: &mut dyn FnMut(&dyn DynVariable)) {
        self.entries.retain(|e| e.variable.is_alive());
        for entry in &self.entries {
            entry.variable.with_live(f);
        }
    }
}
