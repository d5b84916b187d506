//! Structured log events for container operations.
//!
//! Every event carries the container label and the field name. Without the
//! `tracing` feature these compile to nothing.

use std::fmt;

pub(super) fn add_field(container: &str, field: &str, value_type: &'static str) {
    #[cfg(feature = "tracing")]
    tracing::debug!(message = "container.add_field", container, field, value_type);
    #[cfg(not(feature = "tracing"))]
    let _ = (container, field, value_type);
}

pub(super) fn unknown_field(container: &str, field: &str) {
    #[cfg(feature = "tracing")]
    tracing::trace!(message = "container.set_value.unknown_field", container, field);
    #[cfg(not(feature = "tracing"))]
    let _ = (container, field);
}

pub(super) fn set_value(container: &str, field: &str, error_count: usize) {
    #[cfg(feature = "tracing")]
    tracing::trace!(message = "container.set_value", container, field, error_count);
    #[cfg(not(feature = "tracing"))]
    let _ = (container, field, error_count);
}

pub(super) fn bind(container: &str, field: &str, property: &str) {
    #[cfg(feature = "tracing")]
    tracing::debug!(message = "container.bind", container, field, property);
    #[cfg(not(feature = "tracing"))]
    let _ = (container, field, property);
}

pub(super) fn unbind(container: &str, field: &str, property: &str) {
    #[cfg(feature = "tracing")]
    tracing::debug!(message = "container.unbind", container, field, property);
    #[cfg(not(feature = "tracing"))]
    let _ = (container, field, property);
}

pub(super) fn echo_suppressed(container: &str, field: &str, property: &str) {
    #[cfg(feature = "tracing")]
    tracing::trace!(message = "container.model_echo_suppressed", container, field, property);
    #[cfg(not(feature = "tracing"))]
    let _ = (container, field, property);
}

pub(super) fn model_dropped(container: &str, field: &str, property: &str) {
    #[cfg(feature = "tracing")]
    tracing::trace!(message = "container.model_dropped", container, field, property);
    #[cfg(not(feature = "tracing"))]
    let _ = (container, field, property);
}

/// The model kept a different value than the one written into it.
pub(super) fn model_coerced(container: &str, field: &str, property: &str) {
    #[cfg(feature = "tracing")]
    tracing::debug!(message = "container.model_coerced", container, field, property);
    #[cfg(not(feature = "tracing"))]
    let _ = (container, field, property);
}

pub(super) fn model_sync_failed(
    container: &str,
    field: &str,
    property: &str,
    error: &dyn fmt::Display,
) {
    #[cfg(feature = "tracing")]
    tracing::warn!(
        message = "container.model_sync_failed",
        container,
        field,
        property,
        error = %error
    );
    #[cfg(not(feature = "tracing"))]
    let _ = (container, field, property, error);
}
