//! End-to-end walkthrough: a person form bound to a person model.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use bindery_core::{
    ContainerConfig, FieldContainer, FieldError, Model, Notifier, Property, PropertyRegistrar,
};

#[derive(Default)]
struct Person {
    name: RefCell<String>,
    age: Cell<i32>,
    changed: Notifier<str>,
}

impl Person {
    fn set_name(&self, name: &str) {
        if *self.name.borrow() != name {
            *self.name.borrow_mut() = name.to_string();
            self.changed.notify("name");
        }
    }

    fn set_age(&self, age: i32) {
        if self.age.replace(age) != age {
            self.changed.notify("age");
        }
    }
}

impl Model for Person {
    fn property_changed(&self) -> &Notifier<str> {
        &self.changed
    }
}

fn person_form() -> FieldContainer {
    let form = FieldContainer::with_config(ContainerConfig::default().with_label("person"));
    form.add_field::<String>("Name")
        .expect("fresh name")
        .with_constraint(|v| !v.is_empty(), "Name is required");
    form.add_field::<i32>("Age")
        .expect("fresh name")
        .with_constraint(|v| *v >= 0, "Age must be non-negative")
        .with_constraint(|v| *v < 150, "Age must be less than 150");
    form
}

fn bind_person(form: &FieldContainer, person: &Rc<Person>) {
    form.bind_to_model(
        "Name",
        person,
        Property::new(
            "name",
            |p: &Person| p.name.borrow().clone(),
            |p: &Person, v| {
                *p.name.borrow_mut() = v;
            },
        ),
    )
    .expect("bind name");
    form.bind_to_model(
        "Age",
        person,
        Property::new("age", |p: &Person| p.age.get(), |p: &Person, v| p.age.set(v)),
    )
    .expect("bind age");
}

#[test]
fn person_walkthrough() {
    let form = person_form();
    let person = Rc::new(Person::default());
    person.set_name("Grace");
    person.set_age(40);
    bind_person(&form, &person);

    assert_eq!(form.get_value::<String>("Name").unwrap(), "Grace");
    assert_eq!(form.get_value::<i32>("Age").unwrap(), 40);
    assert!(!form.has_errors());

    form.set_value("Age", 200).unwrap();
    assert_eq!(person.age.get(), 200);
    assert_eq!(form.errors(Some("Age")), vec!["Age must be less than 150"]);

    person.set_name("");
    assert_eq!(
        form.errors(None),
        vec!["Name is required", "Age must be less than 150"]
    );

    person.set_age(41);
    person.set_name("Grace Hopper");
    assert!(!form.has_errors());
    assert_eq!(form.get_value::<i32>("Age").unwrap(), 41);
}

#[test]
fn error_stream_reports_each_field() {
    let form = person_form();
    let person = Rc::new(Person::default());
    bind_person(&form, &person);

    let changes = Rc::new(RefCell::new(Vec::new()));
    let c = Rc::clone(&changes);
    let reader = form.clone();
    let _sub = form.subscribe_errors_changed(move |name| {
        c.borrow_mut().push((name.to_string(), reader.errors(Some(name)).len()));
    });

    person.set_age(-4);
    person.set_name("Ada");
    assert_eq!(
        *changes.borrow(),
        vec![("Age".to_string(), 1), ("Name".to_string(), 0)]
    );
}

#[test]
fn unbind_then_rebind_another_model() {
    let form = person_form();
    let alice = Rc::new(Person::default());
    let bob = Rc::new(Person::default());
    alice.set_age(30);
    bob.set_age(50);

    bind_person(&form, &alice);
    assert!(form.unbind_from_model("Age"));
    assert!(form.unbind_from_model("Name"));
    assert_eq!(alice.changed.subscriber_count(), 0);

    bind_person(&form, &bob);
    assert_eq!(form.get_value::<i32>("Age").unwrap(), 50);
    alice.set_age(31);
    assert_eq!(form.get_value::<i32>("Age").unwrap(), 50);
    form.set_value("Age", 51).unwrap();
    assert_eq!(bob.age.get(), 51);
    assert_eq!(alice.age.get(), 31);
}

#[test]
fn structural_errors_surface() {
    let form = person_form();
    let person = Rc::new(Person::default());
    bind_person(&form, &person);

    let err = form
        .bind_to_model(
            "Age",
            &person,
            Property::new("age", |p: &Person| p.age.get(), |p: &Person, v| p.age.set(v)),
        )
        .unwrap_err();
    assert_eq!(err.field_name(), "Age");
    assert!(matches!(err, FieldError::AlreadyBound { .. }));
    assert!(err.to_string().contains("'age'"));

    assert!(matches!(
        form.add_field::<i32>("Age"),
        Err(FieldError::DuplicateName { .. })
    ));
    assert!(matches!(
        form.set_value("Age", 1.5f64),
        Err(FieldError::TypeMismatch { .. })
    ));
}

struct SchemaRecorder {
    seen: Vec<String>,
}

impl PropertyRegistrar for SchemaRecorder {
    fn register_property(&mut self, name: &str) {
        self.seen.push(format!("prop:{name}"));
    }
}

#[test]
fn registrar_sees_every_field() {
    let form = person_form();
    let mut recorder = SchemaRecorder { seen: Vec::new() };
    form.register_properties(&mut recorder);
    assert_eq!(recorder.seen, vec!["prop:Name", "prop:Age"]);
}
