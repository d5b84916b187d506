use thiserror::Error;

pub type Result<T> = std::result::Result<T, FieldError>;

/// Structural misuse of a [`FieldContainer`](crate::FieldContainer).
///
/// Validation failures are never reported through this type; they surface
/// as messages from [`FieldContainer::errors`](crate::FieldContainer::errors).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("field already registered: {name}")]
    DuplicateName { name: String },

    #[error("type mismatch on field '{name}': requested {requested}, field holds {actual}")]
    TypeMismatch {
        name: String,
        requested: &'static str,
        actual: &'static str,
    },

    #[error("field not found: {name}")]
    FieldNotFound { name: String },

    #[error("field '{name}' is already bound to model property '{property}'")]
    AlreadyBound { name: String, property: String },
}

impl FieldError {
    /// Name of the field the error refers to.
    #[must_use]
    pub fn field_name(&self) -> &str {
        match self {
            Self::DuplicateName { name }
            | Self::TypeMismatch { name, .. }
            | Self::FieldNotFound { name }
            | Self::AlreadyBound { name, .. } => name,
        }
    }

    #[must_use]
    pub(crate) fn type_mismatch<T: 'static>(name: &str, actual: &'static str) -> Self {
        Self::TypeMismatch {
            name: name.to_string(),
            requested: std::any::type_name::<T>(),
            actual,
        }
    }
}
