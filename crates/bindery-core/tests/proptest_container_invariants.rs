//! Property-based invariant tests for `FieldContainer`.
//!
//! 1. `errors(None)` is the concatenation of per-field errors in
//!    registration order.
//! 2. Every known-name `set_value` emits exactly one property-changed and
//!    one errors-changed, in that order.
//! 3. A bound field and its model property agree after any interleaving of
//!    field-side and model-side writes, whether the setter is a raw store,
//!    announces the change, or clamps the value it is given.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use bindery_core::{ContainerConfig, FieldContainer, Model, Notifier, Property};
use proptest::prelude::*;

fn numbered_form(bounds: &[i32]) -> (FieldContainer, Vec<String>) {
    let form = FieldContainer::new();
    let names: Vec<String> = (0..bounds.len()).map(|i| format!("F{i}")).collect();
    for (name, &bound) in names.iter().zip(bounds) {
        form.add_field::<i32>(name.as_str())
            .expect("fresh name")
            .with_constraint(move |v| *v < bound, format!("{name} below {bound}"))
            .with_constraint(|v| v % 2 == 0, format!("{name} even"));
    }
    (form, names)
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Aggregation order
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn aggregate_is_concatenation(
        bounds in proptest::collection::vec(-20i32..20, 1..8),
        writes in proptest::collection::vec((0usize..8, -30i32..30), 0..32),
    ) {
        let (form, names) = numbered_form(&bounds);
        for (slot, value) in writes {
            let name = &names[slot % names.len()];
            form.set_value(name, value).expect("i32 field");
        }

        let concatenated: Vec<String> = names
            .iter()
            .flat_map(|n| form.errors(Some(n.as_str())))
            .collect();
        prop_assert_eq!(form.errors(None), concatenated.clone());
        prop_assert_eq!(form.has_errors(), !concatenated.is_empty());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Notification pairing
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn each_set_emits_one_pair(
        writes in proptest::collection::vec((any::<bool>(), -3i32..3), 0..32),
    ) {
        let form = FieldContainer::new();
        form.add_field::<i32>("Known").expect("fresh name");

        let log = Rc::new(RefCell::new(Vec::new()));
        let p = Rc::clone(&log);
        let e = Rc::clone(&log);
        let _p = form.subscribe_property_changed(move |n| p.borrow_mut().push(format!("p:{n}")));
        let _e = form.subscribe_errors_changed(move |n| e.borrow_mut().push(format!("e:{n}")));

        let mut expected = Vec::new();
        for (known, value) in writes {
            let name = if known { "Known" } else { "Unknown" };
            form.set_value(name, value).expect("i32 field");
            if known {
                expected.push("p:Known".to_string());
                expected.push("e:Known".to_string());
            }
        }
        prop_assert_eq!(log.borrow().clone(), expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Binding agreement
// ═════════════════════════════════════════════════════════════════════════

#[derive(Default)]
struct Counter {
    value: Cell<i64>,
    changed: Notifier<str>,
}

impl Counter {
    fn set(&self, value: i64) {
        if self.value.replace(value) != value {
            self.changed.notify("value");
        }
    }
}

impl Model for Counter {
    fn property_changed(&self) -> &Notifier<str> {
        &self.changed
    }
}

#[derive(Debug, Clone, Copy)]
enum Setter {
    Raw,
    Notifying,
    Clamping,
}

fn value_property(setter: Setter) -> Property<Counter, i64> {
    let read = |c: &Counter| c.value.get();
    match setter {
        Setter::Raw => Property::new("value", read, |c: &Counter, v| c.value.set(v)),
        Setter::Notifying => Property::new("value", read, |c: &Counter, v| c.set(v)),
        Setter::Clamping => Property::new("value", read, |c: &Counter, v: i64| {
            c.set(v.clamp(-50, 50));
        }),
    }
}

fn setter_strategy() -> impl Strategy<Value = Setter> {
    prop_oneof![
        Just(Setter::Raw),
        Just(Setter::Notifying),
        Just(Setter::Clamping),
    ]
}

proptest! {
    #[test]
    fn bound_sides_agree(
        setter in setter_strategy(),
        suppress in any::<bool>(),
        writes in proptest::collection::vec((any::<bool>(), -100i64..100), 0..48),
    ) {
        let form = FieldContainer::with_config(
            ContainerConfig::default().with_suppress_model_echo(suppress),
        );
        form.add_field::<i64>("Value").expect("fresh name");
        let counter = Rc::new(Counter::default());
        form.bind_to_model("Value", &counter, value_property(setter))
            .expect("bind");

        for (from_model, value) in writes {
            if from_model {
                counter.set(value);
            } else {
                form.set_value("Value", value).expect("i64 field");
            }
            prop_assert_eq!(form.get_value::<i64>("Value").expect("i64 field"), counter.value.get());
        }
    }
}
