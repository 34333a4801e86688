//! Value against property validation
//!
//! The dispatch is a plain `match` on the kind of the property and the shape of the value. Array
//! values are walked generically over their element type: each dimension checks the number of
//! items and then descends into the element property, down to the innermost items.
//!
//! Nothing in here fails loudly: every value that does not conform, whatever the reason, yields
//! `false`.

use std::collections::HashSet;

use crate::{
    model::ResourceModel,
    property::{
        ArrayProperty, AttributeProperty, BooleanProperty, DoubleProperty, IntegerProperty,
        ModelProperty, StringProperty,
    },
    value::{ArrayValue, AttributeValue, Nested, TypeInfo},
};

pub(crate) fn validate(property: &AttributeProperty, value: &AttributeValue) -> bool {
    match property {
        AttributeProperty::Integer(property) => validate_integer(property, value),
        AttributeProperty::Double(property) => validate_double(property, value),
        AttributeProperty::Boolean(property) => validate_boolean(property, value),
        AttributeProperty::String(property) => validate_string(property, value),
        AttributeProperty::Model(property) => property.validate(value),
        AttributeProperty::Array(property) => property.validate(value),
    }
}

pub(crate) fn validate_integer(property: &IntegerProperty, value: &AttributeValue) -> bool {
    matches!(value, AttributeValue::Integer(value) if property.is_valid(*value))
}

pub(crate) fn validate_double(property: &DoubleProperty, value: &AttributeValue) -> bool {
    matches!(value, AttributeValue::Double(value) if property.is_valid(*value))
}

pub(crate) fn validate_boolean(property: &BooleanProperty, value: &AttributeValue) -> bool {
    matches!(value, AttributeValue::Boolean(value) if property.is_valid(*value))
}

pub(crate) fn validate_string(property: &StringProperty, value: &AttributeValue) -> bool {
    matches!(value, AttributeValue::String(value) if property.is_valid(value))
}

/// Validates the attributes of `model` that are described by `property`.
///
/// Attributes unknown to the property are ignored, and so are required attributes missing from
/// the model.
pub(crate) fn validate_model(property: &ModelProperty, model: &ResourceModel) -> bool {
    model.iter().all(|(name, value)| {
        property
            .child_property(name)
            .map_or(true, |child| child.validate(value))
    })
}

/// Validates an array value, whose element kind and depth must match the property at every level
/// even when some dimension is empty.
pub(crate) fn validate_array(property: &ArrayProperty, array: &ArrayValue) -> bool {
    if property.type_info() != Some(TypeInfo::array(array.base_type(), array.depth())) {
        return false;
    }

    match array {
        ArrayValue::Integer(nested) => validate_nested(property, nested),
        ArrayValue::Double(nested) => validate_nested(property, nested),
        ArrayValue::Boolean(nested) => validate_nested(property, nested),
        ArrayValue::String(nested) => validate_nested(property, nested),
        ArrayValue::Model(nested) => validate_nested(property, nested),
    }
}

/// The key used to spot duplicated array items.
///
/// Doubles are compared by bit pattern.
#[derive(Debug, PartialEq, Eq, Hash)]
enum UniqueKey<'a> {
    Integer(i32),
    Double(u64),
    Boolean(bool),
    String(&'a str),
}

/// The innermost item of an array value.
trait Element {
    type Property;

    /// Narrows the element property of an array to the one matching this item type.
    fn narrow(property: &AttributeProperty) -> Option<&Self::Property>;

    fn check(property: &Self::Property, item: &Self) -> bool;

    /// `None` for items that do not take part in the uniqueness check.
    fn unique_key(&self) -> Option<UniqueKey<'_>>;
}

impl Element for i32 {
    type Property = IntegerProperty;

    fn narrow(property: &AttributeProperty) -> Option<&Self::Property> {
        property.as_integer()
    }

    fn check(property: &Self::Property, item: &Self) -> bool {
        property.is_valid(*item)
    }

    fn unique_key(&self) -> Option<UniqueKey<'_>> {
        Some(UniqueKey::Integer(*self))
    }
}

impl Element for f64 {
    type Property = DoubleProperty;

    fn narrow(property: &AttributeProperty) -> Option<&Self::Property> {
        property.as_double()
    }

    fn check(property: &Self::Property, item: &Self) -> bool {
        property.is_valid(*item)
    }

    fn unique_key(&self) -> Option<UniqueKey<'_>> {
        Some(UniqueKey::Double(self.to_bits()))
    }
}

impl Element for bool {
    type Property = BooleanProperty;

    fn narrow(property: &AttributeProperty) -> Option<&Self::Property> {
        property.as_boolean()
    }

    fn check(property: &Self::Property, item: &Self) -> bool {
        property.is_valid(*item)
    }

    fn unique_key(&self) -> Option<UniqueKey<'_>> {
        Some(UniqueKey::Boolean(*self))
    }
}

impl Element for String {
    type Property = StringProperty;

    fn narrow(property: &AttributeProperty) -> Option<&Self::Property> {
        property.as_string()
    }

    fn check(property: &Self::Property, item: &Self) -> bool {
        property.is_valid(item)
    }

    fn unique_key(&self) -> Option<UniqueKey<'_>> {
        Some(UniqueKey::String(self))
    }
}

impl Element for ResourceModel {
    type Property = ModelProperty;

    fn narrow(property: &AttributeProperty) -> Option<&Self::Property> {
        property.as_model()
    }

    fn check(property: &Self::Property, item: &Self) -> bool {
        validate_model(property, item)
    }

    // There is no equality defined for models as array items.
    fn unique_key(&self) -> Option<UniqueKey<'_>> {
        None
    }
}

fn validate_nested<T: Element>(property: &ArrayProperty, nested: &Nested<T>) -> bool {
    match nested {
        Nested::One(items) => validate_items(property, items),
        Nested::Two(rows) => validate_rows(property, rows),
        Nested::Three(planes) => validate_planes(property, planes),
    }
}

fn validate_items<T: Element>(property: &ArrayProperty, items: &[T]) -> bool {
    if !property.accepts_count(items.len()) {
        return false;
    }

    let Some(element) = T::narrow(property.element_property()) else {
        return false;
    };

    if property.is_unique() && has_duplicates(items) {
        return false;
    }

    items.iter().all(|item| T::check(element, item))
}

fn validate_rows<T: Element>(property: &ArrayProperty, rows: &[Vec<T>]) -> bool {
    if !property.accepts_count(rows.len()) {
        return false;
    }

    let Some(element) = property.element_property().as_array() else {
        return false;
    };

    rows.iter().all(|row| validate_items(element, row))
}

fn validate_planes<T: Element>(property: &ArrayProperty, planes: &[Vec<Vec<T>>]) -> bool {
    if !property.accepts_count(planes.len()) {
        return false;
    }

    let Some(element) = property.element_property().as_array() else {
        return false;
    };

    planes.iter().all(|plane| validate_rows(element, plane))
}

fn has_duplicates<T: Element>(items: &[T]) -> bool {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .filter_map(T::unique_key)
        .any(|key| !seen.insert(key))
}

#[cfg(test)]
mod tests {
    use crate::builder::PropertyBuilder;

    use super::*;

    fn model_with(name: &str, value: impl Into<AttributeValue>) -> ResourceModel {
        let mut model = ResourceModel::new();
        model.set(name, value).unwrap();
        model
    }

    #[test]
    fn integer_range_is_inclusive() {
        let property: AttributeProperty = PropertyBuilder.integer().range(1, 10).into();

        assert!(property.validate(&1.into()));
        assert!(property.validate(&10.into()));
        assert!(!property.validate(&0.into()));
        assert!(!property.validate(&11.into()));
    }

    #[test]
    fn unconstrained_integer() {
        let property: AttributeProperty = PropertyBuilder.integer().default_value(3).into();

        assert!(property.validate(&i32::MIN.into()));
        assert!(property.validate(&i32::MAX.into()));
    }

    #[test]
    fn double_values_in_any_order() {
        let property: AttributeProperty = PropertyBuilder.double().values([3.2, 1.5, 2.]).into();

        assert!(property.validate(&3.2.into()));
        assert!(property.validate(&1.5.into()));
        assert!(property.validate(&2.0.into()));
        assert!(!property.validate(&11.25.into()));
    }

    #[test]
    fn double_range() {
        let property: AttributeProperty = PropertyBuilder.double().range(-1.5, 1.5).into();

        assert!(property.validate(&(-1.5).into()));
        assert!(property.validate(&0.0.into()));
        assert!(!property.validate(&1.6.into()));
        assert!(!property.validate(&f64::NAN.into()));
    }

    #[test]
    fn boolean_is_always_valid() {
        let property: AttributeProperty = PropertyBuilder.boolean().default_value(true).into();

        assert!(property.validate(&true.into()));
        assert!(property.validate(&false.into()));
    }

    #[test]
    fn string_range_on_length() {
        let property: AttributeProperty = PropertyBuilder.string().range(1, 5).into();

        assert!(property.validate(&"12345".into()));
        assert!(property.validate(&"z".into()));
        assert!(!property.validate(&"".into()));
        assert!(!property.validate(&"123456".into()));
        // Only the length is compared
        assert!(property.validate(&"zzzzz".into()));
    }

    #[test]
    fn string_length_counts_characters() {
        let property: AttributeProperty = PropertyBuilder.string().range(0, 3).into();

        assert!(property.validate(&"àèì".into()));
        assert!(!property.validate(&"àèìò".into()));
    }

    #[test]
    fn string_values() {
        let property: AttributeProperty = PropertyBuilder
            .string()
            .values(["off", "low", "high"])
            .into();

        assert!(property.validate(&"low".into()));
        assert!(!property.validate(&"medium".into()));
    }

    #[test]
    fn kind_mismatch_is_invalid() {
        let integer: AttributeProperty = PropertyBuilder.integer().into();
        let double: AttributeProperty = PropertyBuilder.double().into();
        let boolean: AttributeProperty = PropertyBuilder.boolean().into();
        let string: AttributeProperty = PropertyBuilder.string().into();
        let model: AttributeProperty = PropertyBuilder.model().build().into();
        let array: AttributeProperty = PropertyBuilder
            .array()
            .element(PropertyBuilder.integer())
            .build()
            .unwrap()
            .into();

        assert!(!integer.validate(&1.5.into()));
        assert!(!double.validate(&"1.5".into()));
        assert!(!double.validate(&1.into()));
        assert!(!boolean.validate(&1.into()));
        assert!(!string.validate(&true.into()));
        assert!(!model.validate(&vec![1].into()));
        assert!(!array.validate(&1.into()));
        assert!(!integer.validate(&vec![1].into()));
    }

    #[test]
    fn model_recursion() {
        let property: AttributeProperty = PropertyBuilder
            .model()
            .property("string", true, PropertyBuilder.string().range(1, 5))
            .build()
            .into();

        assert!(!property.validate(&model_with("string", "123456").into()));
        assert!(property.validate(&model_with("string", "12345").into()));
    }

    #[test]
    fn model_ignores_unknown_and_missing_attributes() {
        let property: AttributeProperty = PropertyBuilder
            .model()
            .property("power", true, PropertyBuilder.integer().range(0, 10))
            .build()
            .into();

        assert!(property.validate(&model_with("color", "red").into()));
        assert!(property.validate(&ResourceModel::new().into()));
    }

    #[test]
    fn model_child_kind_mismatch() {
        let property: AttributeProperty = PropertyBuilder
            .model()
            .property("power", false, PropertyBuilder.integer())
            .build()
            .into();

        assert!(!property.validate(&model_with("power", "high").into()));
    }

    #[test]
    fn nested_models() {
        let inner = PropertyBuilder
            .model()
            .property("x", true, PropertyBuilder.double().range(0., 1.))
            .build();
        let property: AttributeProperty = PropertyBuilder
            .model()
            .property("point", true, inner)
            .build()
            .into();

        assert!(property.validate(&model_with("point", model_with("x", 0.5)).into()));
        assert!(!property.validate(&model_with("point", model_with("x", 1.5)).into()));
    }

    #[test]
    fn array_count_with_variable_size() {
        let variable: AttributeProperty = PropertyBuilder
            .array()
            .element(PropertyBuilder.integer())
            .range(1, 2)
            .variable(true)
            .build()
            .unwrap()
            .into();

        assert!(variable.validate(&vec![1].into()));
        assert!(variable.validate(&vec![1, 2].into()));
        assert!(variable.validate(&vec![1, 2, 3, 4, 5].into()));
        assert!(!variable.validate(&Vec::<i32>::new().into()));

        let fixed: AttributeProperty = PropertyBuilder
            .array()
            .element(PropertyBuilder.integer())
            .range(1, 2)
            .build()
            .unwrap()
            .into();

        assert!(fixed.validate(&vec![1].into()));
        assert!(fixed.validate(&vec![1, 2].into()));
        assert!(!fixed.validate(&vec![1, 2, 3, 4, 5].into()));
    }

    #[test]
    fn array_uniqueness() {
        let property: AttributeProperty = PropertyBuilder
            .array()
            .element(PropertyBuilder.integer())
            .unique(true)
            .build()
            .unwrap()
            .into();

        assert!(!property.validate(&vec![1, 1].into()));
        assert!(property.validate(&vec![1, 2].into()));
    }

    #[test]
    fn array_uniqueness_of_other_scalars() {
        let unique = |element: AttributeProperty| -> AttributeProperty {
            PropertyBuilder
                .array()
                .element(element)
                .unique(true)
                .build()
                .unwrap()
                .into()
        };

        let doubles = unique(PropertyBuilder.double().into());
        assert!(!doubles.validate(&vec![0.5, 0.5].into()));
        assert!(doubles.validate(&vec![0.5, -0.5].into()));

        let booleans = unique(PropertyBuilder.boolean().into());
        assert!(!booleans.validate(&vec![true, true].into()));
        assert!(booleans.validate(&vec![true, false].into()));

        let strings = unique(PropertyBuilder.string().into());
        assert!(!strings.validate(&vec!["a".to_string(), "a".to_string()].into()));
        assert!(strings.validate(&vec!["a".to_string(), "b".to_string()].into()));
    }

    #[test]
    fn array_uniqueness_skips_models() {
        let property: AttributeProperty = PropertyBuilder
            .array()
            .element(PropertyBuilder.model().build())
            .unique(true)
            .build()
            .unwrap()
            .into();

        let model = model_with("on", true);
        assert!(property.validate(&vec![model.clone(), model].into()));
    }

    #[test]
    fn array_element_kind_mismatch() {
        let property: AttributeProperty = PropertyBuilder
            .array()
            .element(PropertyBuilder.integer())
            .build()
            .unwrap()
            .into();

        assert!(!property.validate(&vec![1.5].into()));
        assert!(!property.validate(&vec!["1".to_string()].into()));
        // The kind is checked even when there is nothing to iterate
        assert!(!property.validate(&Vec::<bool>::new().into()));
    }

    #[test]
    fn empty_nested_arrays_of_another_shape() {
        let matrix: AttributeProperty = PropertyBuilder
            .array()
            .element(
                PropertyBuilder
                    .array()
                    .element(PropertyBuilder.integer())
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap()
            .into();

        assert!(matrix.validate(&Vec::<Vec<i32>>::new().into()));
        assert!(matrix.validate(&vec![Vec::<i32>::new()].into()));
        assert!(!matrix.validate(&Vec::<Vec<bool>>::new().into()));
        assert!(!matrix.validate(&Vec::<Vec<Vec<i32>>>::new().into()));
        assert!(!matrix.validate(&Vec::<i32>::new().into()));

        let cube: AttributeProperty = PropertyBuilder
            .array()
            .element(
                PropertyBuilder
                    .array()
                    .element(
                        PropertyBuilder
                            .array()
                            .element(PropertyBuilder.string())
                            .build()
                            .unwrap(),
                    )
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap()
            .into();

        assert!(cube.validate(&Vec::<Vec<Vec<String>>>::new().into()));
        assert!(!cube.validate(&Vec::<Vec<i32>>::new().into()));
        assert!(!cube.validate(&Vec::<Vec<Vec<f64>>>::new().into()));
        assert!(!cube.validate(&vec![Vec::<Vec<ResourceModel>>::new()].into()));
    }

    #[test]
    fn array_elements_are_validated() {
        let property: AttributeProperty = PropertyBuilder
            .array()
            .element(PropertyBuilder.string().values(["a", "b"]))
            .build()
            .unwrap()
            .into();

        assert!(property.validate(&vec!["a".to_string(), "b".to_string()].into()));
        assert!(!property.validate(&vec!["a".to_string(), "c".to_string()].into()));
    }

    #[test]
    fn array_of_models() {
        let property: AttributeProperty = PropertyBuilder
            .array()
            .element(
                PropertyBuilder
                    .model()
                    .property("level", true, PropertyBuilder.integer().range(0, 3))
                    .build(),
            )
            .build()
            .unwrap()
            .into();

        assert!(property.validate(&vec![model_with("level", 1), model_with("level", 3)].into()));
        assert!(!property.validate(&vec![model_with("level", 1), model_with("level", 4)].into()));
    }

    #[test]
    fn two_dimensional_recursion() {
        let inner = PropertyBuilder
            .array()
            .element(PropertyBuilder.integer().range(1, 10))
            .build()
            .unwrap();
        let property: AttributeProperty = PropertyBuilder
            .array()
            .element(inner)
            .range(1, 1)
            .build()
            .unwrap()
            .into();

        assert!(property.validate(&vec![vec![1]].into()));
        assert!(!property.validate(&vec![vec![15]].into()));
        assert!(!property.validate(&vec![vec![1], vec![2]].into()));
    }

    #[test]
    fn nested_array_needs_array_element() {
        let property: AttributeProperty = PropertyBuilder
            .array()
            .element(PropertyBuilder.integer())
            .build()
            .unwrap()
            .into();

        assert!(!property.validate(&vec![vec![1]].into()));
        assert!(!property.validate(&vec![vec![vec![1]]].into()));
    }

    #[test]
    fn uniqueness_applies_to_innermost_items() {
        let inner = PropertyBuilder
            .array()
            .element(PropertyBuilder.integer())
            .unique(true)
            .build()
            .unwrap();
        let property: AttributeProperty = PropertyBuilder
            .array()
            .element(inner)
            .unique(true)
            .build()
            .unwrap()
            .into();

        // Equal rows are not checked, repeated items inside a row are
        assert!(property.validate(&vec![vec![1, 2], vec![1, 2]].into()));
        assert!(!property.validate(&vec![vec![1, 1]].into()));
    }

    #[test]
    fn three_dimensional_recursion() {
        let innermost = PropertyBuilder
            .array()
            .element(PropertyBuilder.boolean())
            .range(2, 2)
            .build()
            .unwrap();
        let middle = PropertyBuilder
            .array()
            .element(innermost)
            .build()
            .unwrap();
        let property: AttributeProperty = PropertyBuilder
            .array()
            .element(middle)
            .range(0, 2)
            .build()
            .unwrap()
            .into();

        assert!(property.validate(&vec![vec![vec![true, false]], vec![]].into()));
        assert!(property.validate(&Vec::<Vec<Vec<bool>>>::new().into()));
        assert!(!property.validate(&vec![vec![vec![true]]].into()));
        assert!(!property.validate(&vec![vec![vec![true, true]]; 3].into()));
    }

    #[test]
    fn validation_is_idempotent() {
        let property: AttributeProperty = PropertyBuilder
            .array()
            .element(PropertyBuilder.integer().range(0, 5))
            .unique(true)
            .build()
            .unwrap()
            .into();
        let valid = AttributeValue::from(vec![0, 5]);
        let invalid = AttributeValue::from(vec![5, 5]);

        assert_eq!(property.validate(&valid), property.validate(&valid));
        assert_eq!(property.validate(&invalid), property.validate(&invalid));
        assert!(property.validate(&valid));
        assert!(!property.validate(&invalid));
    }

    #[test]
    fn concrete_properties_validate_values() {
        let integer = PropertyBuilder.integer().range(0, 1).build();
        assert!(integer.validate(&1.into()));
        assert!(!integer.validate(&2.into()));
        assert!(!integer.validate(&1.0.into()));

        let string = PropertyBuilder.string().values(["x"]).build();
        assert!(string.validate(&"x".into()));
        assert!(!string.validate(&1.into()));
    }
}
