//! Bidirectional field/model property binding.
//!
//! A binding is a pair of one-way links:
//!
//! - **model → field**: a subscription on the model's property-changed
//!   notifier reads the property and routes it through `set_value`.
//! - **field → model**: every `set_value` on the bound field writes the
//!   value into the property, even when the field did not change.
//!
//! The model is held weakly. While a write into the model is in flight the
//! binding is marked as writing, and notifications the model raises for
//! that same property are dropped (see
//! [`ContainerConfig::suppress_model_echo`](crate::ContainerConfig)).
//!
//! After each write the property is read back. A setter that clamps,
//! rounds, or rejects leaves the model holding something other than the
//! written value; the field is then assigned the model's value so both
//! sides agree. That follow-up write is not reconciled again, so a setter
//! that never settles is logged instead of looping.

use std::any::{Any, TypeId};
use std::cell::Cell;
use std::rc::{Rc, Weak};

use bindery_reactive::Subscription;

use super::{ContainerInner, FieldContainer, events, typed};
use crate::error::{FieldError, Result};
use crate::model::{Model, Property};
use crate::value::FieldValue;

enum WriteOutcome {
    Written,
    /// The model holds this value instead of the one written.
    Coerced(Box<dyn Any>),
    ModelDropped,
    WrongType,
}

type Writer = dyn Fn(&dyn Any) -> WriteOutcome;

/// Live state of one binding. Dropping it detaches the model listener.
pub(super) struct BindingRecord {
    property: Rc<str>,
    write: Rc<Writer>,
    writing: Rc<Cell<bool>>,
    _subscription: Subscription,
}

/// Marks a binding as writing for the guard's lifetime.
struct EchoGuard {
    flag: Rc<Cell<bool>>,
    prev: bool,
}

impl EchoGuard {
    fn arm(flag: &Rc<Cell<bool>>) -> Self {
        let prev = flag.replace(true);
        Self {
            flag: Rc::clone(flag),
            prev,
        }
    }
}

impl Drop for EchoGuard {
    fn drop(&mut self) {
        self.flag.set(self.prev);
    }
}

impl FieldContainer {
    /// Bind field `field_name` to `property` of `model`.
    ///
    /// From now on, model notifications naming the property are pulled into
    /// the field and every `set_value` on the field is pushed into the
    /// model. When [`ContainerConfig::pull_on_bind`](crate::ContainerConfig)
    /// is set, the model's current value is pulled immediately.
    ///
    /// # Errors
    ///
    /// - [`FieldError::FieldNotFound`] if no field is named `field_name`.
    /// - [`FieldError::AlreadyBound`] if the field already has a binding;
    ///   the existing binding is left intact.
    /// - [`FieldError::TypeMismatch`] if the field does not hold `T`.
    pub fn bind_to_model<M: Model, T: FieldValue>(
        &self,
        field_name: &str,
        model: &Rc<M>,
        property: Property<M, T>,
    ) -> Result<()> {
        let Some(field) = self.lookup(field_name) else {
            return Err(FieldError::FieldNotFound {
                name: field_name.to_string(),
            });
        };
        if let Some(existing) = self.inner.bindings.borrow().get(field_name) {
            return Err(FieldError::AlreadyBound {
                name: field_name.to_string(),
                property: existing.property.to_string(),
            });
        }
        if field.value_type() != TypeId::of::<T>() {
            return Err(FieldError::type_mismatch::<T>(
                field_name,
                field.type_name(),
            ));
        }

        let writing = Rc::new(Cell::new(false));
        let subscription = {
            let inner: Weak<ContainerInner> = Rc::downgrade(&self.inner);
            let source: Weak<M> = Rc::downgrade(model);
            let property = property.clone();
            let field_name = field_name.to_string();
            let writing = Rc::clone(&writing);
            let suppress = self.inner.config.suppress_model_echo;
            model.property_changed().subscribe(move |changed: &str| {
                if changed != property.name() {
                    return;
                }
                let (Some(inner), Some(model)) = (inner.upgrade(), source.upgrade()) else {
                    return;
                };
                let container = FieldContainer { inner };
                if suppress && writing.get() {
                    events::echo_suppressed(container.label(), &field_name, changed);
                    return;
                }
                let value = property.read(&model);
                if let Err(err) = container.set_value(&field_name, value) {
                    events::model_sync_failed(container.label(), &field_name, changed, &err);
                }
            })
        };

        let write: Rc<Writer> = {
            let target: Weak<M> = Rc::downgrade(model);
            let property = property.clone();
            Rc::new(move |value: &dyn Any| {
                let Some(model) = target.upgrade() else {
                    return WriteOutcome::ModelDropped;
                };
                let Some(value) = value.downcast_ref::<T>() else {
                    return WriteOutcome::WrongType;
                };
                property.write(&model, value.clone());
                let current = property.read(&model);
                if current.same_value(value) {
                    WriteOutcome::Written
                } else {
                    WriteOutcome::Coerced(Box::new(current))
                }
            })
        };

        self.inner.bindings.borrow_mut().insert(
            field_name.to_string(),
            BindingRecord {
                property: Rc::from(property.name()),
                write,
                writing,
                _subscription: subscription,
            },
        );
        events::bind(self.label(), field_name, property.name());

        if self.inner.config.pull_on_bind {
            self.set_value(field_name, property.read(model))?;
        }
        Ok(())
    }

    /// Remove the binding of `field_name`, detaching from the model.
    ///
    /// Returns `false` if the field was not bound. The field keeps its value.
    pub fn unbind_from_model(&self, field_name: &str) -> bool {
        let removed = self.inner.bindings.borrow_mut().remove(field_name);
        let Some(record) = removed else {
            return false;
        };
        events::unbind(self.label(), field_name, &record.property);
        true
    }

    /// Whether `field_name` currently has a binding.
    #[must_use]
    pub fn is_bound(&self, field_name: &str) -> bool {
        self.inner.bindings.borrow().contains_key(field_name)
    }

    /// Model property bound to `field_name`, if any.
    #[must_use]
    pub fn bound_property(&self, field_name: &str) -> Option<String> {
        self.inner
            .bindings
            .borrow()
            .get(field_name)
            .map(|r| r.property.to_string())
    }

    /// Push `value` into the model bound to `field_name`, if any.
    ///
    /// With `reconcile` set, a value the model coerced is assigned back to
    /// the field.
    pub(super) fn write_through<T: FieldValue>(
        &self,
        field_name: &str,
        value: T,
        reconcile: bool,
    ) {
        let link = self
            .inner
            .bindings
            .borrow()
            .get(field_name)
            .map(|r| {
                (
                    Rc::clone(&r.write),
                    Rc::clone(&r.writing),
                    Rc::clone(&r.property),
                )
            });
        let Some((write, writing, property)) = link else {
            return;
        };

        let outcome = {
            let _guard = EchoGuard::arm(&writing);
            write(&value as &dyn Any)
        };
        match outcome {
            WriteOutcome::Written => {}
            WriteOutcome::Coerced(current) => match current.downcast::<T>() {
                Ok(current) => self.adopt_model_value(field_name, &property, *current, reconcile),
                Err(_) => events::model_sync_failed(
                    self.label(),
                    field_name,
                    &property,
                    &"model value type does not match bound property",
                ),
            },
            WriteOutcome::ModelDropped => events::model_dropped(self.label(), field_name, &property),
            WriteOutcome::WrongType => events::model_sync_failed(
                self.label(),
                field_name,
                &property,
                &"value type does not match bound property",
            ),
        }
    }

    fn adopt_model_value<T: FieldValue>(
        &self,
        field_name: &str,
        property: &str,
        current: T,
        reconcile: bool,
    ) {
        // A nested pull (echo suppression off) may already have synced it.
        let settled = self.lookup(field_name).is_some_and(|field| {
            typed::<T>(&*field).is_ok_and(|field| field.with(|v| v.same_value(&current)))
        });
        if settled {
            return;
        }
        if !reconcile {
            let reason = "model did not settle";
            events::model_sync_failed(self.label(), field_name, property, &reason);
            return;
        }
        events::model_coerced(self.label(), field_name, property);
        if let Err(err) = self.assign(field_name, current, false) {
            events::model_sync_failed(self.label(), field_name, property, &err);
        }
    }
}
