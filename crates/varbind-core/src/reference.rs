#![forbid(unsafe_code)]

//! Value-or-variable indirection.
//!
//! A [`VariableReference<T>`] lets a consumer declare "a `T`, either fixed
//! inline or driven by a shared variable" and read or write it without
//! branching at the call site.
//!
//! | Mode | Variable | Read | Write |
//! |------|----------|------|-------|
//! | inline | any | inline value | inline slot |
//! | variable | live | `variable.get()` | `variable.set()` |
//! | variable | missing or dropped | zero value | dropped |
//!
//! The referenced variable is held weakly: a reference never keeps a
//! variable alive.

use std::fmt;

use tracing::trace;

use crate::value::VariableValue;
use crate::variable::{TypedVariable, WeakVariable};

/// Either an inline value or a non-owning reference to a variable.
pub struct VariableReference<T> {
    use_variable: bool,
    variable: Option<WeakVariable<T>>,
    value: T,
}

impl<T: Clone> Clone for VariableReference<T> {
    fn clone(&self) -> Self {
        Self {
            use_variable: self.use_variable,
            variable: self.variable.clone(),
            value: self.value.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for VariableReference<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariableReference")
            .field("use_variable", &self.use_variable)
            .field("variable", &self.variable)
            .field("value", &self.value)
            .finish()
    }
}

impl<T: VariableValue> Default for VariableReference<T> {
    fn default() -> Self {
        Self::inline(T::default())
    }
}

impl<T: VariableValue> From<T> for VariableReference<T> {
    fn from(value: T) -> Self {
        Self::inline(value)
    }
}

impl<T: VariableValue> From<&TypedVariable<T>> for VariableReference<T> {
    fn from(variable: &TypedVariable<T>) -> Self {
        Self::variable(variable)
    }
}

impl<T: VariableValue> VariableReference<T> {
    /// A reference holding a plain inline value.
    #[must_use]
    pub fn inline(value: T) -> Self {
        Self {
            use_variable: false,
            variable: None,
            value,
        }
    }

    /// A reference driven by `variable`.
    #[must_use]
    pub fn variable(variable: &TypedVariable<T>) -> Self {
        Self {
            use_variable: true,
            variable: Some(variable.downgrade()),
            value: T::default(),
        }
    }

    /// A reference in variable mode with no variable assigned yet.
    #[must_use]
    pub fn unassigned() -> Self {
        Self {
            use_variable: true,
            variable: None,
            value: T::default(),
        }
    }

    /// Assign the variable. Does not switch modes.
    pub fn assign(&mut self, variable: &TypedVariable<T>) {
        self.variable = Some(variable.downgrade());
    }

    /// Clear the assigned variable.
    pub fn unassign(&mut self) {
        self.variable = None;
    }

    /// Switch between variable mode (`true`) and inline mode (`false`).
    pub fn set_use_variable(&mut self, use_variable: bool) {
        self.use_variable = use_variable;
    }

    /// Whether this reference reads from a variable rather than inline.
    #[must_use]
    pub fn is_variable(&self) -> bool {
        self.use_variable
    }

    /// Whether a live variable is assigned.
    #[must_use]
    pub fn is_variable_assigned(&self) -> bool {
        self.variable.as_ref().is_some_and(WeakVariable::is_alive)
    }

    /// Whether reading yields a defined value: inline mode, or a live
    /// variable in variable mode.
    #[must_use]
    pub fn has_value(&self) -> bool {
        !self.is_variable() || self.is_variable_assigned()
    }

    /// The assigned variable, if alive.
    #[must_use]
    pub fn get_variable(&self) -> Option<TypedVariable<T>> {
        self.variable.as_ref().and_then(WeakVariable::upgrade)
    }

    /// Current value. Yields `T::default()` in variable mode without a
    /// live variable.
    #[must_use]
    pub fn value(&self) -> T {
        if !self.use_variable {
            return self.value;
        }
        self.get_variable()
            .map_or_else(T::default, |variable| variable.get())
    }

    /// Write a value. In variable mode the write goes through the
    /// variable's notifying `set`; without a live variable it is dropped.
    pub fn set_value(&mut self, value: T) {
        if !self.use_variable {
            self.value = value;
            return;
        }
        match self.get_variable() {
            Some(variable) => {
                variable.set(value);
            }
            None => trace!(dropped = %value, "write to unassigned variable reference dropped"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VariableConfig;

    #[test]
    fn inline_reads_and_writes_inline() {
        let mut reference = VariableReference::inline(3.5f32);
        assert!(reference.has_value());
        assert!(!reference.is_variable());
        assert_eq!(reference.value(), 3.5);
        reference.set_value(1.0);
        assert_eq!(reference.value(), 1.0);
    }

    #[test]
    fn variable_mode_routes_to_variable() {
        let var = TypedVariable::new(10i32);
        let mut reference = VariableReference::variable(&var);
        assert!(reference.has_value());
        assert_eq!(reference.value(), 10);

        reference.set_value(20);
        assert_eq!(var.get(), 20);

        var.set(30);
        assert_eq!(reference.value(), 30);
    }

    #[test]
    fn variable_writes_notify() {
        let var = TypedVariable::new(0i32);
        let hits = std::rc::Rc::new(std::cell::Cell::new(0));
        let hits_clone = std::rc::Rc::clone(&hits);
        var.subscribe(move |_| hits_clone.set(hits_clone.get() + 1));
        VariableReference::variable(&var).set_value(4);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn unassigned_reads_zero_and_drops_writes() {
        let mut reference = VariableReference::<i64>::unassigned();
        assert!(!reference.has_value());
        assert_eq!(reference.value(), 0);
        reference.set_value(9);
        assert_eq!(reference.value(), 0);

        // The dropped write did not land in the inline slot either.
        reference.set_use_variable(false);
        assert_eq!(reference.value(), 0);
    }

    #[test]
    fn dropped_variable_behaves_as_unassigned() {
        let var = TypedVariable::new(true);
        let reference = VariableReference::variable(&var);
        drop(var);
        assert!(!reference.is_variable_assigned());
        assert!(!reference.has_value());
        assert!(!reference.value());
    }

    #[test]
    fn inline_mode_ignores_assigned_variable() {
        let var = TypedVariable::new(1i32);
        let mut reference = VariableReference::inline(5);
        reference.assign(&var);
        reference.set_value(7);
        assert_eq!(var.get(), 1);
        assert_eq!(reference.value(), 7);

        reference.set_use_variable(true);
        assert_eq!(reference.value(), 1);
        reference.unassign();
        assert_eq!(reference.value(), 0);
    }

    #[test]
    fn immutable_variable_rejects_through_reference() {
        let var = TypedVariable::from_config(VariableConfig::new(2i32)).unwrap();
        let mut reference = VariableReference::from(&var);
        reference.set_value(8);
        assert_eq!(reference.value(), 2);
    }

    #[test]
    fn conversions() {
        let reference: VariableReference<i32> = 4.into();
        assert_eq!(reference.value(), 4);
        assert_eq!(VariableReference::<f32>::default().value(), 0.0);
    }
}
