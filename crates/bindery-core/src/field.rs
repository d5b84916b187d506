#![forbid(unsafe_code)]

//! Named, typed value slots with constraint validation.
//!
//! # Design
//!
//! A [`Field<T>`] wraps an [`Observable<T>`] and adds an append-only list of
//! [`Constraint`]s plus the error messages produced by the last validation
//! pass. A value change runs in two phases: the value is committed and
//! subscribers are notified, then the constraints are re-evaluated.
//!
//! # Invariants
//!
//! 1. `errors()` is exactly the ordered subsequence of constraint messages
//!    whose predicate rejected the value at the last validation pass.
//! 2. `errors()` is empty after validating an absent value
//!    ([`FieldValue::is_absent`]).
//! 3. Setting a value equal to the current one neither notifies nor
//!    validates, even if constraints were added since the last pass.
//! 4. Adding a constraint never triggers validation.
//!
//! # Failure Modes
//!
//! - **Predicate panics**: the panic propagates out of `set()`/`validate()`;
//!   the value stays committed and the previous error list is kept.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use bindery_reactive::{Observable, Subscription};

use crate::value::FieldValue;

/// A predicate over a field value paired with its failure message.
pub struct Constraint<T> {
    predicate: Rc<dyn Fn(&T) -> bool>,
    message: String,
}

impl<T> Constraint<T> {
    /// Create a constraint. `predicate` returns `true` for valid values.
    pub fn new(predicate: impl Fn(&T) -> bool + 'static, message: impl Into<String>) -> Self {
        Self {
            predicate: Rc::new(predicate),
            message: message.into(),
        }
    }

    /// Message reported when the predicate rejects a value.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether `value` satisfies the constraint.
    #[must_use]
    pub fn check(&self, value: &T) -> bool {
        (self.predicate)(value)
    }
}

impl<T> Clone for Constraint<T> {
    fn clone(&self) -> Self {
        Self {
            predicate: Rc::clone(&self.predicate),
            message: self.message.clone(),
        }
    }
}

impl<T> fmt::Debug for Constraint<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constraint")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// A named, typed value slot with change notification and validation.
pub struct Field<T: FieldValue> {
    name: String,
    value: Observable<T>,
    constraints: RefCell<Vec<Constraint<T>>>,
    errors: RefCell<Vec<String>>,
}

impl<T: FieldValue> Field<T> {
    /// Create a field holding `T::default()` with no constraints.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Observable::default(),
            constraints: RefCell::new(Vec::new()),
            errors: RefCell::new(Vec::new()),
        }
    }

    /// The field's identity. Never changes.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.value.get()
    }

    /// Access the current value by reference.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.value.with(f)
    }

    /// Replace the value.
    ///
    /// If `value` differs from the current value (per
    /// [`FieldValue::same_value`]) it is committed, subscribers are
    /// notified, and the field is re-validated. Returns `true` in that case
    /// and `false` for a no-op.
    pub fn set(&self, value: T) -> bool {
        if self.value.with(|current| current.same_value(&value)) {
            return false;
        }
        if !self.value.set(value) {
            return false;
        }
        self.validate();
        true
    }

    /// Append a constraint. Does not validate.
    pub fn add_constraint(
        &self,
        predicate: impl Fn(&T) -> bool + 'static,
        message: impl Into<String>,
    ) {
        self.push_constraint(Constraint::new(predicate, message));
    }

    /// Append a prebuilt constraint. Does not validate.
    pub fn push_constraint(&self, constraint: Constraint<T>) {
        self.constraints.borrow_mut().push(constraint);
    }

    /// Number of registered constraints.
    #[must_use]
    pub fn constraint_count(&self) -> usize {
        self.constraints.borrow().len()
    }

    /// Recompute the error list from the current value.
    ///
    /// Absent values clear the list without consulting any constraint.
    ///
    /// # Panics
    ///
    /// Panics if a predicate adds a constraint to this same field.
    pub fn validate(&self) {
        let value = self.value.get();
        let errors = if value.is_absent() {
            Vec::new()
        } else {
            self.constraints
                .borrow()
                .iter()
                .filter(|c| !c.check(&value))
                .map(|c| c.message.clone())
                .collect()
        };
        *self.errors.borrow_mut() = errors;
    }

    /// Whether the last validation pass produced any message.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.borrow().is_empty()
    }

    /// Messages from the last validation pass, in constraint order.
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }

    /// Register a value-changed listener. It runs after the new value is
    /// committed and before validation.
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> Subscription {
        self.value.subscribe(f)
    }

    /// Number of value changes since creation.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.value.version()
    }
}

impl<T: FieldValue + fmt::Debug> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("value", &self.value.get())
            .field("constraints", &self.constraints.borrow().len())
            .field("errors", &self.errors.borrow())
            .finish()
    }
}

/// Type-erased view of a [`Field<T>`] for heterogeneous storage.
pub(crate) trait AnyField {
    fn name(&self) -> &str;
    fn value_type(&self) -> TypeId;
    fn type_name(&self) -> &'static str;
    fn validate(&self);
    fn has_errors(&self) -> bool;
    fn error_count(&self) -> usize;
    fn append_errors(&self, out: &mut Vec<String>);
    fn as_any(&self) -> &dyn Any;
}

impl<T: FieldValue> AnyField for Field<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn value_type(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn validate(&self) {
        Field::validate(self);
    }

    fn has_errors(&self) -> bool {
        Field::has_errors(self)
    }

    fn error_count(&self) -> usize {
        self.errors.borrow().len()
    }

    fn append_errors(&self, out: &mut Vec<String>) {
        out.extend(self.errors.borrow().iter().cloned());
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
