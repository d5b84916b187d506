#![forbid(unsafe_code)]

//! Named registry of heterogeneous fields with error aggregation and model
//! binding.
//!
//! # Design
//!
//! [`FieldContainer`] is a cheap handle over shared, reference-counted
//! state. Fields are stored type-erased in registration order; typed access
//! downcasts to `Field<T>` and reports [`FieldError::TypeMismatch`] on a
//! wrong `T`.
//!
//! Every public operation releases its internal borrows before dispatching
//! a notification, so listeners may call back into the container.
//!
//! # Invariants
//!
//! 1. Field names are unique; fields are never removed.
//! 2. `set_value` runs in a fixed order: field update (field-level
//!    notify + validate), container property-changed, explicit
//!    re-validation, errors-changed, then write-through to a bound model.
//!    If the model keeps a different value than the one written, that value
//!    is set on the field once more, in the same order.
//! 3. `errors(None)` is the concatenation of per-field errors in
//!    registration order.
//! 4. A field has at most one binding.
//!
//! # Failure Modes
//!
//! - **Unknown name on a value path** (`set_value`, `errors`,
//!   `unbind_from_model`): tolerated as a no-op or empty result.
//! - **Unknown or duplicate name on a structural path** (`add_field`,
//!   `bind_to_model`): reported as a [`FieldError`].

mod binding;
mod events;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use ahash::AHashMap;
use bindery_reactive::{Notifier, Subscription};

use crate::builder::FieldBuilder;
use crate::config::ContainerConfig;
use crate::error::{FieldError, Result};
use crate::field::{AnyField, Field};
use crate::registrar::PropertyRegistrar;
use crate::value::FieldValue;

use binding::BindingRecord;

/// Registration-ordered field storage with a name index.
#[derive(Default)]
struct Registry {
    fields: Vec<Rc<dyn AnyField>>,
    index: AHashMap<String, usize>,
}

impl Registry {
    fn get(&self, name: &str) -> Option<Rc<dyn AnyField>> {
        self.index.get(name).map(|&i| Rc::clone(&self.fields[i]))
    }
}

/// Shared interior for [`FieldContainer`].
struct ContainerInner {
    config: ContainerConfig,
    registry: RefCell<Registry>,
    bindings: RefCell<AHashMap<String, BindingRecord>>,
    property_changed: Notifier<str>,
    errors_changed: Notifier<str>,
}

/// A registry of named, typed, validated fields.
///
/// Cloning a `FieldContainer` creates a new handle to the **same** fields
/// and bindings.
#[derive(Clone)]
pub struct FieldContainer {
    inner: Rc<ContainerInner>,
}

impl Default for FieldContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FieldContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldContainer")
            .field("label", &self.inner.config.label)
            .field("fields", &self.field_names())
            .field("bindings", &self.inner.bindings.borrow().len())
            .finish()
    }
}

fn typed<T: FieldValue>(field: &dyn AnyField) -> Result<&Field<T>> {
    field
        .as_any()
        .downcast_ref::<Field<T>>()
        .ok_or_else(|| FieldError::type_mismatch::<T>(field.name(), field.type_name()))
}

impl FieldContainer {
    /// Create an empty container with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ContainerConfig::default())
    }

    /// Create an empty container with an explicit configuration.
    #[must_use]
    pub fn with_config(config: ContainerConfig) -> Self {
        Self {
            inner: Rc::new(ContainerInner {
                config,
                registry: RefCell::new(Registry::default()),
                bindings: RefCell::new(AHashMap::new()),
                property_changed: Notifier::new(),
                errors_changed: Notifier::new(),
            }),
        }
    }

    /// The configuration this container was built with.
    #[must_use]
    pub fn config(&self) -> &ContainerConfig {
        &self.inner.config
    }

    fn label(&self) -> &str {
        &self.inner.config.label
    }

    fn lookup(&self, name: &str) -> Option<Rc<dyn AnyField>> {
        self.inner.registry.borrow().get(name)
    }

    /// Register a new field holding `T::default()`.
    ///
    /// Emits property-changed for `name` and returns a builder for
    /// attaching constraints.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::DuplicateName`] if `name` is already taken.
    pub fn add_field<T: FieldValue>(&self, name: impl Into<String>) -> Result<FieldBuilder<T>> {
        let name = name.into();
        let field = {
            let mut registry = self.inner.registry.borrow_mut();
            if registry.index.contains_key(&name) {
                return Err(FieldError::DuplicateName { name });
            }
            let field = Rc::new(Field::<T>::new(name.clone()));
            let slot = registry.fields.len();
            registry.fields.push(Rc::clone(&field) as Rc<dyn AnyField>);
            registry.index.insert(name.clone(), slot);
            field
        };

        events::add_field(self.label(), &name, std::any::type_name::<T>());
        self.inner.property_changed.notify(&name);
        Ok(FieldBuilder::new(field))
    }

    /// Current value of `name`, or `T::default()` if no such field exists.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::TypeMismatch`] if the field holds another type.
    pub fn get_value<T: FieldValue>(&self, name: &str) -> Result<T> {
        let Some(field) = self.lookup(name) else {
            return Ok(T::default());
        };
        Ok(typed::<T>(&*field)?.get())
    }

    /// Set the value of `name`.
    ///
    /// Unknown names are ignored. Otherwise the field is updated, then
    /// property-changed and errors-changed are emitted for `name`, and a
    /// bound model property receives `value` even if the field did not
    /// change. If the model does not keep `value` (a clamping or rejecting
    /// setter), the field adopts the model's value.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::TypeMismatch`] if the field holds another type;
    /// nothing is changed or emitted in that case.
    pub fn set_value<T: FieldValue>(&self, name: &str, value: T) -> Result<()> {
        self.assign(name, value, true)
    }

    /// `set_value` body. `reconcile` allows one follow-up assignment when
    /// the bound model keeps a different value.
    fn assign<T: FieldValue>(&self, name: &str, value: T, reconcile: bool) -> Result<()> {
        let Some(field) = self.lookup(name) else {
            events::unknown_field(self.label(), name);
            return Ok(());
        };
        typed::<T>(&*field)?.set(value.clone());

        self.inner.property_changed.notify(name);
        field.validate();
        self.inner.errors_changed.notify(name);
        events::set_value(self.label(), name, field.error_count());

        self.write_through(name, value, reconcile);
        Ok(())
    }

    /// Whether a field named `name` exists.
    #[must_use]
    pub fn has_field(&self, name: &str) -> bool {
        self.inner.registry.borrow().index.contains_key(name)
    }

    /// Field names in registration order.
    #[must_use]
    pub fn field_names(&self) -> Vec<String> {
        self.inner
            .registry
            .borrow()
            .fields
            .iter()
            .map(|f| f.name().to_string())
            .collect()
    }

    /// Number of registered fields.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.inner.registry.borrow().fields.len()
    }

    /// Whether no field has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.field_count() == 0
    }

    /// Type name of the value held by `name`.
    #[must_use]
    pub fn field_type_name(&self, name: &str) -> Option<&'static str> {
        self.lookup(name).map(|f| f.type_name())
    }

    /// Whether any field currently has validation errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.inner
            .registry
            .borrow()
            .fields
            .iter()
            .any(|f| f.has_errors())
    }

    /// Validation messages.
    ///
    /// `None` or an empty name yields every field's messages in registration
    /// order. An unknown name yields an empty list.
    #[must_use]
    pub fn errors(&self, name: Option<&str>) -> Vec<String> {
        let mut out = Vec::new();
        match name.filter(|n| !n.is_empty()) {
            None => {
                for field in &self.inner.registry.borrow().fields {
                    field.append_errors(&mut out);
                }
            }
            Some(name) => {
                if let Some(field) = self.lookup(name) {
                    field.append_errors(&mut out);
                }
            }
        }
        out
    }

    /// Re-validate every field in registration order, emitting
    /// errors-changed for each.
    pub fn validate_all(&self) {
        let fields = self.inner.registry.borrow().fields.clone();
        for field in fields {
            field.validate();
            self.inner.errors_changed.notify(field.name());
        }
    }

    /// Listen for property-changed notifications (field added or set).
    pub fn subscribe_property_changed(&self, f: impl Fn(&str) + 'static) -> Subscription {
        self.inner.property_changed.subscribe(f)
    }

    /// Listen for errors-changed notifications (validation recomputed).
    pub fn subscribe_errors_changed(&self, f: impl Fn(&str) + 'static) -> Subscription {
        self.inner.errors_changed.subscribe(f)
    }

    /// Register every field name with an external property system.
    pub fn register_properties<R: PropertyRegistrar + ?Sized>(&self, registrar: &mut R) {
        for name in self.field_names() {
            registrar.register_property(&name);
        }
    }
}
