#![forbid(unsafe_code)]

//! Bindery public facade crate.
//!
//! Re-exports the field container and its reactive primitives under one
//! name. Most users only need the [`prelude`].

pub use bindery_core::{
    Constraint, ContainerConfig, Field, FieldBuilder, FieldContainer, FieldError, FieldValue,
    Model, Property, PropertyRegistrar, Result,
};
pub use bindery_reactive::{Notifier, Observable, Subscription};

pub mod prelude {
    pub use bindery_core as core;
    pub use bindery_reactive as reactive;

    pub use bindery_core::{
        ContainerConfig, FieldContainer, FieldError, FieldValue, Model, Property,
        PropertyRegistrar,
    };
    pub use bindery_reactive::{Notifier, Subscription};
}
