//! Fluent constraint attachment for freshly added fields.

use std::fmt;
use std::rc::Rc;

use crate::field::Field;
use crate::value::FieldValue;

/// Handle returned by [`FieldContainer::add_field`](crate::FieldContainer::add_field).
///
/// Shares the field with its container. Fields are never removed from a
/// container, so the handle stays meaningful for as long as it is held.
pub struct FieldBuilder<T: FieldValue> {
    field: Rc<Field<T>>,
}

impl<T: FieldValue> FieldBuilder<T> {
    pub(crate) fn new(field: Rc<Field<T>>) -> Self {
        Self { field }
    }

    /// Append a constraint and return the builder for chaining.
    pub fn with_constraint(
        self,
        predicate: impl Fn(&T) -> bool + 'static,
        message: impl Into<String>,
    ) -> Self {
        self.field.add_constraint(predicate, message);
        self
    }

    /// Name of the underlying field.
    #[must_use]
    pub fn name(&self) -> &str {
        self.field.name()
    }

    /// The typed field itself.
    #[must_use]
    pub fn field(&self) -> &Field<T> {
        &self.field
    }
}

impl<T: FieldValue> fmt::Debug for FieldBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldBuilder")
            .field("name", &self.field.name())
            .field("constraints", &self.field.constraint_count())
            .finish()
    }
}
