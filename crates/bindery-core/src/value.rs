//! Value types a [`Field`](crate::Field) can hold.

/// A type that can live in a field.
///
/// Fields compare values with [`same_value`](FieldValue::same_value) to
/// suppress no-op updates and use `Default` for the initial value.
/// [`is_absent`](FieldValue::is_absent) marks the "no value" state in which
/// validation is skipped rather than failed; only `Option::None` is absent
/// among the built-in impls.
///
/// User types opt in with an empty impl:
///
/// ```
/// use bindery_core::FieldValue;
///
/// #[derive(Clone, PartialEq, Default)]
/// struct Email(String);
///
/// impl FieldValue for Email {}
/// ```
pub trait FieldValue: Clone + PartialEq + Default + 'static {
    /// Whether this value is the type's absent state.
    fn is_absent(&self) -> bool {
        false
    }

    /// Whether `other` counts as the same value for change detection.
    ///
    /// Defaults to `==`. Floats also treat NaN as equal to NaN, so storing
    /// NaN twice is a no-op.
    fn same_value(&self, other: &Self) -> bool {
        self == other
    }
}

macro_rules! impl_field_value {
    ($($ty:ty),* $(,)?) => {
        $(impl FieldValue for $ty {})*
    };
}

impl_field_value!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, String,
);

macro_rules! impl_float_field_value {
    ($($ty:ty),* $(,)?) => {
        $(impl FieldValue for $ty {
            fn same_value(&self, other: &Self) -> bool {
                self == other || (self.is_nan() && other.is_nan())
            }
        })*
    };
}

impl_float_field_value!(f32, f64);

impl<T: FieldValue> FieldValue for Option<T> {
    fn is_absent(&self) -> bool {
        self.is_none()
    }

    fn same_value(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.same_value(b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: Clone + PartialEq + 'static> FieldValue for Vec<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_are_never_absent() {
        assert!(!0i32.is_absent());
        assert!(!String::new().is_absent());
        assert!(!false.is_absent());
        assert!(!Vec::<u8>::new().is_absent());
    }

    #[test]
    fn none_is_absent() {
        assert!(None::<i32>.is_absent());
        assert!(!Some(0).is_absent());
        assert!(Option::<String>::default().is_absent());
    }

    #[test]
    fn nan_is_same_as_nan() {
        assert!(f64::NAN.same_value(&f64::NAN));
        assert!(f32::NAN.same_value(&f32::NAN));
        assert!(0.0f64.same_value(&-0.0));
        assert!(!1.0f64.same_value(&f64::NAN));
        assert!(Some(f64::NAN).same_value(&Some(f64::NAN)));
        assert!(!Some(1.0f64).same_value(&None));
    }
}
