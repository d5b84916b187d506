//! Container configuration.

/// Behavior knobs for a [`FieldContainer`](crate::FieldContainer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerConfig {
    /// Label recorded in tracing events as the `container` field.
    pub label: String,
    /// Pull the model's current property value into the field on bind.
    pub pull_on_bind: bool,
    /// Ignore model notifications for a bound property while the container
    /// itself is writing into that property. A value the setter coerced is
    /// still picked up by the read-back after the write.
    pub suppress_model_echo: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            label: "container".to_string(),
            pull_on_bind: true,
            suppress_model_echo: true,
        }
    }
}

impl ContainerConfig {
    /// Set the tracing label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Enable or disable the initial model-to-field sync on bind.
    #[must_use]
    pub fn with_pull_on_bind(mut self, pull: bool) -> Self {
        self.pull_on_bind = pull;
        self
    }

    /// Enable or disable echo suppression during write-through.
    #[must_use]
    pub fn with_suppress_model_echo(mut self, suppress: bool) -> Self {
        self.suppress_model_echo = suppress;
        self
    }
}
