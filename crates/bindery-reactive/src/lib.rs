#![forbid(unsafe_code)]

//! Change-notification primitives for bindery.
//!
//! - [`Notifier`]: an ordered listener list that dispatches borrowed events.
//! - [`Subscription`]: RAII guard that unsubscribes its listener on drop.
//! - [`Observable`]: a shared, version-tracked value cell that notifies its
//!   subscribers when the value changes.
//!
//! # Architecture
//!
//! Everything here uses `Rc<RefCell<..>>` for single-threaded shared
//! ownership. Listeners are stored as `Weak` callbacks; the strong reference
//! lives in the [`Subscription`] handed back to the subscriber. Dead entries
//! are pruned lazily during notification.
//!
//! # Invariants
//!
//! 1. Listeners are notified in registration order.
//! 2. No internal borrow is held while a listener runs, so listeners may
//!    re-enter (subscribe, notify, read, or write) freely.
//! 3. Dropping a [`Subscription`] removes the listener before the next
//!    notification cycle.
//! 4. `Observable` version increments exactly once per mutation that changes
//!    the value.
//! 5. Setting an `Observable` to a value equal to the current one is a no-op
//!    (no version bump, no notifications).

pub mod notifier;
pub mod observable;

pub use notifier::{Notifier, Subscription};
pub use observable::Observable;
