//! Hook for exposing container fields to an external property system.

/// Receives one call per field name from
/// [`FieldContainer::register_properties`](crate::FieldContainer::register_properties).
///
/// Names arrive in registration order. The container does not track what a
/// registrar does with them.
pub trait PropertyRegistrar {
    /// Announce a property named `name`.
    fn register_property(&mut self, name: &str);
}

impl PropertyRegistrar for Vec<String> {
    fn register_property(&mut self, name: &str) {
        self.push(name.to_string());
    }
}
