#![forbid(unsafe_code)]

//! Ordered listener lists with RAII unsubscription.
//!
//! # Design
//!
//! A [`Notifier<E>`] keeps `Weak` references to listener callbacks. The
//! strong reference is owned by the [`Subscription`] returned from
//! [`subscribe()`](Notifier::subscribe), so a subscriber controls the
//! listener's lifetime without the notifier ever keeping it alive.
//!
//! `E` may be unsized, which lets name-carrying channels use
//! `Notifier<str>` and dispatch `&str` without allocating.
//!
//! # Failure Modes
//!
//! - **Listener panics**: the panic propagates out of `notify()`; listeners
//!   later in the snapshot are not called for that event.
//! - **Subscription dropped mid-dispatch**: the listener was already
//!   captured in the dispatch snapshot and still receives the current event.
//!   It is pruned before the next event.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Listener<E> = dyn Fn(&E);

/// An ordered list of listeners for events of type `E`.
///
/// Cloning a `Notifier` creates a new handle to the **same** listener list.
pub struct Notifier<E: ?Sized + 'static> {
    listeners: Rc<RefCell<Vec<Weak<Listener<E>>>>>,
}

impl<E: ?Sized + 'static> Notifier<E> {
    /// Create a notifier with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Register a listener. It stays registered while the returned
    /// [`Subscription`] is alive.
    pub fn subscribe(&self, listener: impl Fn(&E) + 'static) -> Subscription {
        let listener: Rc<Listener<E>> = Rc::new(listener);
        self.listeners.borrow_mut().push(Rc::downgrade(&listener));
        Subscription::new(listener)
    }

    /// Dispatch `event` to every live listener in registration order.
    ///
    /// The listener list is snapshotted first; listeners registered during
    /// dispatch only see subsequent events.
    pub fn notify(&self, event: &E) {
        let snapshot: Vec<Rc<Listener<E>>> = {
            let mut listeners = self.listeners.borrow_mut();
            listeners.retain(|slot| slot.strong_count() > 0);
            listeners.iter().filter_map(Weak::upgrade).collect()
        };
        for listener in &snapshot {
            listener(event);
        }
    }

    /// Number of listeners whose subscription is still alive.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|slot| slot.strong_count() > 0)
            .count()
    }
}

impl<E: ?Sized + 'static> Default for Notifier<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ?Sized + 'static> Clone for Notifier<E> {
    fn clone(&self) -> Self {
        Self {
            listeners: Rc::clone(&self.listeners),
        }
    }
}

impl<E: ?Sized + 'static> fmt::Debug for Notifier<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// RAII guard for a registered listener.
///
/// Dropping the guard unsubscribes. Release is exactly-once by construction:
/// the guard owns the only strong reference to the listener.
#[must_use = "dropping a Subscription unsubscribes its listener immediately"]
pub struct Subscription {
    _listener: Box<dyn Any>,
}

impl Subscription {
    fn new<E: ?Sized + 'static>(listener: Rc<Listener<E>>) -> Self {
        Self {
            _listener: Box::new(listener),
        }
    }

    /// Unsubscribe now. Equivalent to dropping the guard.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
