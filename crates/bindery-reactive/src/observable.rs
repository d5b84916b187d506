#![forbid(unsafe_code)]

//! Shared, version-tracked values with change notification.
//!
//! # Design
//!
//! [`Observable<T>`] stores its value and version in shared,
//! reference-counted storage and owns a [`Notifier<T>`] for its subscribers.
//! A mutation commits the new value and bumps the version *before* any
//! subscriber runs, so subscribers always observe the committed state.
//!
//! # Invariants
//!
//! 1. `version()` increments by exactly 1 per value-changing `set()`.
//! 2. `set()` with a value equal to the current one changes nothing and
//!    notifies nobody.
//! 3. Subscribers receive the committed value and may read the observable
//!    (or set it again) from inside the callback.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::notifier::{Notifier, Subscription};

/// Shared interior for [`Observable<T>`].
struct ObservableInner<T> {
    /// Current value.
    value: T,
    /// Monotonically increasing version, bumped on each change.
    version: u64,
}

/// A shared value cell that notifies subscribers when it changes.
///
/// Cloning an `Observable` creates a new handle to the **same** value.
pub struct Observable<T: 'static> {
    inner: Rc<RefCell<ObservableInner<T>>>,
    changed: Notifier<T>,
}

impl<T: 'static> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
            changed: self.changed.clone(),
        }
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscribers", &self.changed.subscriber_count())
            .finish()
    }
}

impl<T: Default + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: 'static> Observable<T> {
    /// Create an observable holding `value` at version 0.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ObservableInner { value, version: 0 })),
            changed: Notifier::new(),
        }
    }

    /// Access the current value by reference without cloning.
    ///
    /// # Panics
    ///
    /// Panics if the closure calls `set()` on the same observable.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Current version. Starts at 0 and increments once per change.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Register a change callback. It receives the committed value.
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> Subscription {
        self.changed.subscribe(f)
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.changed.subscriber_count()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Replace the value, notifying subscribers if it changed.
    ///
    /// Returns `true` when the value changed.
    pub fn set(&self, value: T) -> bool {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return false;
            }
            inner.value = value.clone();
            inner.version += 1;
        }
        self.changed.notify(&value);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn get_and_set() {
        let obs = Observable::new(10);
        assert_eq!(obs.get(), 10);
        assert_eq!(obs.version(), 0);

        assert!(obs.set(20));
        assert_eq!(obs.get(), 20);
        assert_eq!(obs.version(), 1);
    }

    #[test]
    fn equal_set_is_noop() {
        let obs = Observable::new("Doe".to_string());
        let hits = Rc::new(Cell::new(0u32));
        let h = Rc::clone(&hits);
        let _sub = obs.subscribe(move |_| h.set(h.get() + 1));

        assert!(!obs.set("Doe".to_string()));
        assert_eq!(obs.version(), 0);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn subscriber_sees_committed_value() {
        let obs = Observable::new(1);
        let reader = obs.clone();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        let _sub = obs.subscribe(move |v: &i32| {
            s.borrow_mut().push((*v, reader.get(), reader.version()));
        });

        obs.set(7);
        assert_eq!(*seen.borrow(), vec![(7, 7, 1)]);
    }

    #[test]
    fn reentrant_set_same_value_terminates() {
        let obs = Observable::new(0);
        let writer = obs.clone();
        let hits = Rc::new(Cell::new(0u32));
        let h = Rc::clone(&hits);
        let _sub = obs.subscribe(move |v: &i32| {
            h.set(h.get() + 1);
            writer.set(*v);
        });

        obs.set(5);
        assert_eq!(hits.get(), 1);
        assert_eq!(obs.version(), 1);
    }

    #[test]
    fn clone_shares_state() {
        let a = Observable::new(1);
        let b = a.clone();
        a.set(2);
        assert_eq!(b.get(), 2);
        assert_eq!(b.version(), 1);
    }

    #[test]
    fn with_borrows_without_clone() {
        let obs = Observable::new(vec![1, 2, 3]);
        let sum: i32 = obs.with(|v| v.iter().sum());
        assert_eq!(sum, 6);
    }

    #[test]
    fn default_uses_type_default() {
        let obs: Observable<String> = Observable::default();
        assert_eq!(obs.get(), "");
        assert_eq!(obs.version(), 0);
    }

    #[test]
    fn debug_format() {
        let obs = Observable::new(42);
        let dbg = format!("{obs:?}");
        assert!(dbg.contains("Observable"));
        assert!(dbg.contains("42"));
    }
}
