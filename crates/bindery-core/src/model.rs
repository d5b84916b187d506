#![forbid(unsafe_code)]

//! The model side of a binding.
//!
//! A model is any caller-owned object that announces property changes by
//! name. Models are shared as `Rc<M>` and mutate through `&self` (interior
//! mutability), so the container can read them from inside a notification
//! and write to them without taking ownership.
//!
//! A [`Property<M, T>`] is the accessor pair for one named property. It is
//! built once by the caller and reused for every sync in either direction.
//!
//! # Example
//!
//! ```
//! use std::cell::Cell;
//! use bindery_core::{Model, Property};
//! use bindery_reactive::Notifier;
//!
//! #[derive(Default)]
//! struct Person {
//!     age: Cell<i32>,
//!     changed: Notifier<str>,
//! }
//!
//! impl Person {
//!     fn set_age(&self, age: i32) {
//!         if self.age.replace(age) != age {
//!             self.changed.notify("age");
//!         }
//!     }
//! }
//!
//! impl Model for Person {
//!     fn property_changed(&self) -> &Notifier<str> {
//!         &self.changed
//!     }
//! }
//!
//! let age = Property::new("age", |p: &Person| p.age.get(), |p: &Person, v| p.age.set(v));
//! let person = Person::default();
//! person.set_age(30);
//! assert_eq!(age.read(&person), 30);
//! ```

use std::fmt;
use std::rc::Rc;

use bindery_reactive::Notifier;

/// An object whose properties can be bound to container fields.
///
/// Implementors must release any internal borrow of a property before
/// calling `notify` on the returned notifier: listeners read the property
/// back synchronously.
pub trait Model: 'static {
    /// Stream of property-changed notifications, keyed by property name.
    fn property_changed(&self) -> &Notifier<str>;
}

/// Getter/setter pair for one named property of `M`.
///
/// The setter may raise the model's own notification and may store
/// something other than what it was given (clamping, rejecting). After each
/// write the container reads the property back and, if it differs, moves
/// the field to the model's value.
pub struct Property<M, T> {
    name: String,
    get: Rc<dyn Fn(&M) -> T>,
    set: Rc<dyn Fn(&M, T)>,
}

impl<M, T> Property<M, T> {
    /// Build an accessor for the property announced as `name`.
    pub fn new(
        name: impl Into<String>,
        get: impl Fn(&M) -> T + 'static,
        set: impl Fn(&M, T) + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            get: Rc::new(get),
            set: Rc::new(set),
        }
    }

    /// Property name as announced by the model's notifications.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read the property from `model`.
    #[must_use]
    pub fn read(&self, model: &M) -> T {
        (self.get)(model)
    }

    /// Write `value` into the property of `model`.
    pub fn write(&self, model: &M, value: T) {
        (self.set)(model, value);
    }
}

impl<M, T> Clone for Property<M, T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            get: Rc::clone(&self.get),
            set: Rc::clone(&self.set),
        }
    }
}

impl<M, T> fmt::Debug for Property<M, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
