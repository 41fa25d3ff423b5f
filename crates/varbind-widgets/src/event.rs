#![forbid(unsafe_code)]

//! Ordered widget event listeners.
//!
//! [`EventSource<A>`] is the change event a widget raises when the user
//! interacts with it. Listeners are identified by [`ListenerId`] so a
//! binding can remove exactly the listener it added.
//!
//! # Failure Modes
//!
//! - **Re-entrant emit**: a listener may call back into the widget and
//!   trigger another `emit`. Listeners are snapshotted before the cycle,
//!   so no `RefCell` borrow is held while they run.
//! - **Removal during emit**: a removed listener is skipped for the rest
//!   of the in-flight cycle.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Handle identifying one listener on one event source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Get the raw value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

type Listener<A> = Rc<dyn Fn(&A)>;

struct Slot<A> {
    id: ListenerId,
    live: Rc<Cell<bool>>,
    listener: Listener<A>,
}

struct Listeners<A> {
    slots: Vec<Slot<A>>,
    next_id: u64,
}

/// A widget event with an ordered listener list.
pub struct EventSource<A> {
    inner: RefCell<Listeners<A>>,
}

impl<A> Default for EventSource<A> {
    fn default() -> Self {
        Self {
            inner: RefCell::new(Listeners {
                slots: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl<A> fmt::Debug for EventSource<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSource")
            .field("listener_count", &self.listener_count())
            .finish()
    }
}

impl<A> EventSource<A> {
    /// Create an event with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener. Listeners run in the order they were added.
    pub fn add_listener(&self, listener: impl Fn(&A) + 'static) -> ListenerId {
        let mut inner = self.inner.borrow_mut();
        let id = ListenerId(inner.next_id);
        inner.next_id += 1;
        inner.slots.push(Slot {
            id,
            live: Rc::new(Cell::new(true)),
            listener: Rc::new(listener),
        });
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let Some(pos) = inner.slots.iter().position(|slot| slot.id == id) else {
            return false;
        };
        let slot = inner.slots.remove(pos);
        slot.live.set(false);
        true
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().slots.len()
    }

    /// Invoke every listener with `arg`.
    pub fn emit(&self, arg: &A) {
        let snapshot: Vec<(Rc<Cell<bool>>, Listener<A>)> = self
            .inner
            .borrow()
            .slots
            .iter()
            .map(|slot| (Rc::clone(&slot.live), Rc::clone(&slot.listener)))
            .collect();
        for (live, listener) in &snapshot {
            if live.get() {
                listener(arg);
            }
        }
    }
}
