#![forbid(unsafe_code)]

//! Reactive field containers with validation and model binding.
//!
//! A [`FieldContainer`] holds named, typed [`Field`]s. Each field carries an
//! ordered list of [`Constraint`]s; the container aggregates their failure
//! messages and announces value and error changes by field name. A field can
//! be bound to a property of a caller-owned [`Model`], keeping both sides in
//! sync.
//!
//! # Example
//!
//! ```
//! use bindery_core::FieldContainer;
//!
//! let form = FieldContainer::new();
//! form.add_field::<i32>("Age")?
//!     .with_constraint(|age| *age >= 0, "Age must be non-negative")
//!     .with_constraint(|age| *age < 150, "Age must be less than 150");
//!
//! form.set_value("Age", 200)?;
//! assert_eq!(form.errors(Some("Age")), vec!["Age must be less than 150"]);
//! # Ok::<(), bindery_core::FieldError>(())
//! ```

pub mod builder;
pub mod config;
pub mod container;
pub mod error;
pub mod field;
pub mod model;
pub mod registrar;
pub mod value;

pub use builder::FieldBuilder;
pub use config::ContainerConfig;
pub use container::FieldContainer;
pub use error::{FieldError, Result};
pub use field::{Constraint, Field};
pub use model::{Model, Property};
pub use registrar::PropertyRegistrar;
pub use value::FieldValue;

pub use bindery_reactive::{Notifier, Subscription};
