#![forbid(unsafe_code)]

//! Type-erased access to variables.
//!
//! Hosts that enumerate variables of mixed kinds (lifecycle registries,
//! debug inspectors, save systems) use [`DynVariable`] instead of naming
//! `TypedVariable<T>` for every `T`.

use crate::error::VariableError;
use crate::value::{AnyValue, ValueKind, VariableValue};
use crate::variable::{TypedVariable, VariableId, WriteOutcome};

/// Object-safe view of a variable of any kind.
pub trait DynVariable {
    /// Identity token.
    fn id(&self) -> VariableId;

    /// Configured name.
    fn name(&self) -> String;

    /// Kind of the stored value.
    fn kind(&self) -> ValueKind;

    /// Current value, type-erased.
    fn base_value(&self) -> AnyValue;

    /// Write a type-erased value through the normal, notifying path.
    fn set_base_value(&self, value: AnyValue) -> Result<WriteOutcome, VariableError>;

    /// Seed the initial value without notifying, ignoring mutability.
    fn seed_silently(&self);

    /// Re-deliver the current state to subscribers.
    fn broadcast(&self);
}

impl<T: VariableValue> DynVariable for TypedVariable<T> {
    fn id(&self) -> VariableId {
        TypedVariable::id(self)
    }

    fn name(&self) -> String {
        TypedVariable::name(self)
    }

    fn kind(&self) -> ValueKind {
        T::KIND
    }

    fn base_value(&self) -> AnyValue {
        self.get().into_any()
    }

    fn set_base_value(&self, value: AnyValue) -> Result<WriteOutcome, VariableError> {
        let typed = T::from_any(value).ok_or(VariableError::KindMismatch {
            expected: T::KIND,
            found: value.kind(),
        })?;
        Ok(self.set(typed))
    }

    fn seed_silently(&self) {
        self.force_to_initial_value_without_notify();
    }

    fn broadcast(&self) {
        self.notify_observers();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vec2;

    #[test]
    fn erased_read_write() {
        let var = TypedVariable::new(Vec2::new(1.0, 2.0));
        let erased: &dyn DynVariable = &var;
        assert_eq!(erased.kind(), ValueKind::Vec2);
        assert_eq!(erased.base_value(), AnyValue::Vec2(Vec2::new(1.0, 2.0)));

        let outcome = erased.set_base_value(AnyValue::Vec2(Vec2::ZERO));
        assert_eq!(outcome, Ok(WriteOutcome::Changed));
        assert_eq!(var.get(), Vec2::ZERO);
    }

    #[test]
    fn erased_write_rejects_wrong_kind() {
        let var = TypedVariable::new(1i32);
        let err = DynVariable::set_base_value(&var, AnyValue::Long(1));
        assert_eq!(
            err,
            Err(VariableError::KindMismatch {
                expected: ValueKind::Int,
                found: ValueKind::Long,
            })
        );
        assert_eq!(var.get(), 1);
    }

    #[test]
    fn seed_and_broadcast() {
        let var = TypedVariable::new(3i64);
        var.set(8);
        let hits = std::rc::Rc::new(std::cell::Cell::new(0));
        let hits_clone = std::rc::Rc::clone(&hits);
        var.subscribe(move |_| hits_clone.set(hits_clone.get() + 1));

        let erased: &dyn DynVariable = &var;
        erased.seed_silently();
        assert_eq!(var.get(), 3);
        assert_eq!(hits.get(), 0);
        erased.broadcast();
        assert_eq!(hits.get(), 1);
    }
}
