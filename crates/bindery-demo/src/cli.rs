use std::cell::{Cell, RefCell};
use std::rc::Rc;

use bindery::prelude::*;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "bindery-demo",
    about = "Bind a validated person form to a person model and watch both sides sync",
    version
)]
pub struct Cli {
    /// Age written through the form to trigger validation.
    #[arg(long, default_value_t = 200, allow_hyphen_values = true)]
    pub age: i32,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Model whose setters announce changes, like a typical view model.
#[derive(Default)]
struct Person {
    first_name: RefCell<String>,
    last_name: RefCell<String>,
    age: Cell<i32>,
    changed: Notifier<str>,
}

impl Person {
    fn set_text(&self, slot: &RefCell<String>, value: String, property: &str) {
        if *slot.borrow() == value {
            return;
        }
        *slot.borrow_mut() = value;
        self.changed.notify(property);
    }

    fn set_first_name(&self, value: impl Into<String>) {
        self.set_text(&self.first_name, value.into(), "first_name");
    }

    fn set_last_name(&self, value: impl Into<String>) {
        self.set_text(&self.last_name, value.into(), "last_name");
    }

    fn set_age(&self, value: i32) {
        if self.age.replace(value) != value {
            self.changed.notify("age");
        }
    }
}

impl Model for Person {
    fn property_changed(&self) -> &Notifier<str> {
        &self.changed
    }
}

fn person_form() -> bindery::Result<FieldContainer> {
    let form = FieldContainer::with_config(ContainerConfig::default().with_label("person"));
    form.add_field::<String>("FirstName")?
        .with_constraint(|v| !v.is_empty(), "First name cannot be empty");
    form.add_field::<String>("LastName")?
        .with_constraint(|v| !v.is_empty(), "Last name cannot be empty");
    form.add_field::<i32>("Age")?
        .with_constraint(|v| *v >= 0, "Age must be non-negative")
        .with_constraint(|v| *v < 150, "Age must be less than 150");
    Ok(form)
}

fn bind_person(form: &FieldContainer, person: &Rc<Person>) -> bindery::Result<()> {
    form.bind_to_model(
        "FirstName",
        person,
        Property::new(
            "first_name",
            |p: &Person| p.first_name.borrow().clone(),
            |p: &Person, v: String| p.set_first_name(v),
        ),
    )?;
    form.bind_to_model(
        "LastName",
        person,
        Property::new(
            "last_name",
            |p: &Person| p.last_name.borrow().clone(),
            |p: &Person, v: String| p.set_last_name(v),
        ),
    )?;
    form.bind_to_model(
        "Age",
        person,
        Property::new("age", |p: &Person| p.age.get(), |p: &Person, v| p.set_age(v)),
    )
}

fn print_values(form: &FieldContainer, person: &Person) -> bindery::Result<()> {
    println!(
        "  form:  FirstName={:?} LastName={:?} Age={}",
        form.get_value::<String>("FirstName")?,
        form.get_value::<String>("LastName")?,
        form.get_value::<i32>("Age")?
    );
    println!(
        "  model: first_name={:?} last_name={:?} age={}",
        person.first_name.borrow(),
        person.last_name.borrow(),
        person.age.get()
    );
    Ok(())
}

pub fn run(cli: Cli) -> bindery::Result<()> {
    let form = person_form()?;
    let person = Rc::new(Person::default());
    person.set_first_name("John");
    person.set_last_name("Doe");
    person.set_age(30);

    let _errors = form.subscribe_errors_changed(|name| {
        tracing::debug!(message = "demo.errors_changed", field = name);
    });

    bind_person(&form, &person)?;
    println!("Initial values:");
    print_values(&form, &person)?;

    form.set_value("FirstName", "Jane".to_string())?;
    form.set_value("Age", 31)?;
    println!("\nAfter updating through the form:");
    print_values(&form, &person)?;

    person.set_last_name("Smith");
    println!("\nAfter updating through the model:");
    print_values(&form, &person)?;

    form.set_value("Age", cli.age)?;
    println!("\nAfter setting Age={}:", cli.age);
    let errors = form.errors(Some("Age"));
    if errors.is_empty() {
        println!("  Age is valid");
    }
    for error in errors {
        println!("  Validation error: {error}");
    }

    form.unbind_from_model("FirstName");
    person.set_first_name("Alice");
    form.set_value("FirstName", "Bob".to_string())?;
    println!("\nAfter unbinding FirstName and updating separately:");
    print_values(&form, &person)?;

    let mut registered: Vec<String> = Vec::new();
    form.register_properties(&mut registered);
    println!("\nRegistered properties: {}", registered.join(", "));
    Ok(())
}
