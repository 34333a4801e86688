//! Attribute properties
//!
//! An [`AttributeProperty`] describes the values an attribute can hold. There is exactly one
//! variant for each kind of property, and a property tree exclusively owns its children: model
//! properties own the properties of their attributes, array properties own the property of their
//! elements.
//!
//! Properties are created with the [builders](crate::builder) and cannot be changed afterwards.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_with::skip_serializing_none;

use crate::{
    builder::{
        ArrayPropertyBuilder, BooleanPropertyBuilder, DoublePropertyBuilder,
        IntegerPropertyBuilder, ModelPropertyBuilder, StringPropertyBuilder,
    },
    model::ResourceModel,
    validation,
    value::{ArrayValue, AttributeValue, TypeInfo, ValueType, MAX_ARRAY_DEPTH},
};

/// The kind of an attribute property
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Integer,
    Double,
    Boolean,
    String,
    Model,
    Array,
}

/// A schema for the values of an attribute
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AttributeProperty {
    Integer(IntegerProperty),
    Double(DoubleProperty),
    Boolean(BooleanProperty),
    String(StringProperty),
    Model(ModelProperty),
    Array(ArrayProperty),
}

macro_rules! impl_property_variants {
    ($($variant:ident($ty:ty) => $is:ident, $as:ident);+ $(;)?) => {
        impl AttributeProperty {
            pub fn property_type(&self) -> PropertyType {
                match self {
                    $(
                        Self::$variant(_) => PropertyType::$variant,
                    )+
                }
            }

            $(
                #[inline]
                pub fn $is(&self) -> bool {
                    matches!(self, Self::$variant(_))
                }

                #[inline]
                pub fn $as(&self) -> Option<&$ty> {
                    match self {
                        Self::$variant(property) => Some(property),
                        _ => None,
                    }
                }
            )+
        }

        $(
            impl From<$ty> for AttributeProperty {
                #[inline]
                fn from(property: $ty) -> Self {
                    Self::$variant(property)
                }
            }
        )+
    };
}

impl_property_variants!(
    Integer(IntegerProperty) => is_integer, as_integer;
    Double(DoubleProperty) => is_double, as_double;
    Boolean(BooleanProperty) => is_boolean, as_boolean;
    String(StringProperty) => is_string, as_string;
    Model(ModelProperty) => is_model, as_model;
    Array(ArrayProperty) => is_array, as_array;
);

impl AttributeProperty {
    /// Checks whether `value` satisfies this property.
    ///
    /// Returns `false` both when the value has a shape this property does not describe and when
    /// it breaks one of the constraints.
    #[inline]
    pub fn validate(&self, value: &AttributeValue) -> bool {
        validation::validate(self, value)
    }

    /// The shape of the values described by this property.
    ///
    /// Returns `None` for array properties nested deeper than [`MAX_ARRAY_DEPTH`], which no value
    /// can satisfy.
    pub fn type_info(&self) -> Option<TypeInfo> {
        match self {
            Self::Integer(_) => Some(TypeInfo::scalar(ValueType::Integer)),
            Self::Double(_) => Some(TypeInfo::scalar(ValueType::Double)),
            Self::Boolean(_) => Some(TypeInfo::scalar(ValueType::Boolean)),
            Self::String(_) => Some(TypeInfo::scalar(ValueType::String)),
            Self::Model(_) => Some(TypeInfo::scalar(ValueType::ResourceModel)),
            Self::Array(property) => property.type_info(),
        }
    }

    /// Creates a value made of the defaults of this property.
    ///
    /// Arrays are filled with as many default elements as their minimum number of items.
    pub fn build_default_value(&self) -> Option<AttributeValue> {
        match self {
            Self::Integer(property) => Some(property.default_value().into()),
            Self::Double(property) => Some(property.default_value().into()),
            Self::Boolean(property) => Some(property.default_value().into()),
            Self::String(property) => Some(property.default_value().into()),
            Self::Model(property) => Some(property.build_default_value().into()),
            Self::Array(property) => property.build_default_value().map(Into::into),
        }
    }
}

/// An inclusive range of values
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValueRange<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd> ValueRange<T> {
    #[inline]
    pub fn contains(&self, value: &T) -> bool {
        self.min <= *value && *value <= self.max
    }
}

/// A sorted set of allowed values
///
/// The values are copied and sorted when the set is created, membership is checked with a binary
/// search.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AllowedValues<T>(Vec<T>);

impl<T> AllowedValues<T> {
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

macro_rules! impl_allowed_values {
    ($($ty:ty => $cmp:expr),+ $(,)?) => {
        $(
            impl AllowedValues<$ty> {
                pub fn new(values: impl IntoIterator<Item = $ty>) -> Self {
                    let mut values: Vec<$ty> = values.into_iter().collect();
                    values.sort_unstable_by($cmp);
                    Self(values)
                }

                pub fn contains(&self, value: &$ty) -> bool {
                    self.0
                        .binary_search_by(|probe| ($cmp)(probe, value))
                        .is_ok()
                }
            }

            impl<'de> Deserialize<'de> for AllowedValues<$ty> {
                fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
                where
                    D: Deserializer<'de>,
                {
                    Vec::<$ty>::deserialize(deserializer).map(Self::new)
                }
            }
        )+
    };
}

impl_allowed_values!(
    i32 => |a: &i32, b: &i32| a.cmp(b),
    f64 => |a: &f64, b: &f64| a.total_cmp(b),
    String => |a: &String, b: &String| a.cmp(b),
);

impl<T: Serialize> Serialize for AllowedValues<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

macro_rules! numeric_property {
    ($(#[$meta:meta])* $name:ident($ty:ty), $builder:ident, $validate:path) => {
        $(#[$meta])*
        #[skip_serializing_none]
        #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            #[serde(rename = "default", default)]
            pub(crate) default_value: $ty,

            pub(crate) range: Option<ValueRange<$ty>>,

            pub(crate) values: Option<AllowedValues<$ty>>,
        }

        impl $name {
            #[inline]
            pub fn builder() -> $builder {
                $builder::default()
            }

            #[inline]
            pub fn default_value(&self) -> $ty {
                self.default_value
            }

            #[inline]
            pub fn has_range(&self) -> bool {
                self.range.is_some()
            }

            #[inline]
            pub fn range(&self) -> Option<ValueRange<$ty>> {
                self.range
            }

            #[inline]
            pub fn min(&self) -> Option<$ty> {
                self.range.map(|range| range.min)
            }

            #[inline]
            pub fn max(&self) -> Option<$ty> {
                self.range.map(|range| range.max)
            }

            /// Whether the values are restricted to an enumerated set.
            ///
            /// A range takes precedence over the set.
            #[inline]
            pub fn has_values(&self) -> bool {
                self.range.is_none() && self.values.is_some()
            }

            /// The sorted set of allowed values, empty if there is none or a range is set.
            pub fn values(&self) -> &[$ty] {
                self.values
                    .as_ref()
                    .filter(|_| self.range.is_none())
                    .map(AllowedValues::as_slice)
                    .unwrap_or_default()
            }

            pub fn is_valid(&self, value: $ty) -> bool {
                match (&self.range, &self.values) {
                    (Some(range), _) => range.contains(&value),
                    (None, Some(values)) => values.contains(&value),
                    (None, None) => true,
                }
            }

            #[inline]
            pub fn validate(&self, value: &AttributeValue) -> bool {
                $validate(self, value)
            }
        }
    };
}

numeric_property!(
    /// Property of an integer attribute
    IntegerProperty(i32),
    IntegerPropertyBuilder,
    validation::validate_integer
);

numeric_property!(
    /// Property of a floating point attribute
    DoubleProperty(f64),
    DoublePropertyBuilder,
    validation::validate_double
);

/// Property of a boolean attribute
///
/// A boolean property has no constraint, any boolean value is valid.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BooleanProperty {
    #[serde(rename = "default", default)]
    pub(crate) default_value: bool,
}

impl BooleanProperty {
    #[inline]
    pub fn builder() -> BooleanPropertyBuilder {
        BooleanPropertyBuilder::default()
    }

    #[inline]
    pub fn default_value(&self) -> bool {
        self.default_value
    }

    #[inline]
    pub fn is_valid(&self, _value: bool) -> bool {
        true
    }

    #[inline]
    pub fn validate(&self, value: &AttributeValue) -> bool {
        validation::validate_boolean(self, value)
    }
}

/// Property of a string attribute
///
/// The range, if any, applies to the length of the string in characters.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StringProperty {
    #[serde(rename = "default", default)]
    pub(crate) default_value: String,

    pub(crate) range: Option<ValueRange<usize>>,

    pub(crate) values: Option<AllowedValues<String>>,
}

impl StringProperty {
    #[inline]
    pub fn builder() -> StringPropertyBuilder {
        StringPropertyBuilder::default()
    }

    #[inline]
    pub fn default_value(&self) -> &str {
        &self.default_value
    }

    #[inline]
    pub fn has_range(&self) -> bool {
        self.range.is_some()
    }

    #[inline]
    pub fn range(&self) -> Option<ValueRange<usize>> {
        self.range
    }

    #[inline]
    pub fn min(&self) -> Option<usize> {
        self.range.map(|range| range.min)
    }

    #[inline]
    pub fn max(&self) -> Option<usize> {
        self.range.map(|range| range.max)
    }

    #[inline]
    pub fn has_values(&self) -> bool {
        self.range.is_none() && self.values.is_some()
    }

    pub fn values(&self) -> &[String] {
        self.values
            .as_ref()
            .filter(|_| self.range.is_none())
            .map(AllowedValues::as_slice)
            .unwrap_or_default()
    }

    pub fn is_valid(&self, value: &str) -> bool {
        match (&self.range, &self.values) {
            (Some(range), _) => range.contains(&value.chars().count()),
            (None, Some(values)) => values
                .as_slice()
                .binary_search_by(|probe| probe.as_str().cmp(value))
                .is_ok(),
            (None, None) => true,
        }
    }

    #[inline]
    pub fn validate(&self, value: &AttributeValue) -> bool {
        validation::validate_string(self, value)
    }
}

/// The property of an attribute inside a model
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub(crate) property: AttributeProperty,

    #[serde(default)]
    pub(crate) required: bool,
}

impl ModelEntry {
    #[inline]
    pub fn property(&self) -> &AttributeProperty {
        &self.property
    }

    #[inline]
    pub fn is_required(&self) -> bool {
        self.required
    }
}

/// Property of a resource model attribute
///
/// The `required` flag of the children is descriptive: validation checks only the attributes a
/// model actually contains.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelProperty {
    #[serde(default)]
    pub(crate) properties: HashMap<String, ModelEntry>,
}

impl ModelProperty {
    #[inline]
    pub fn builder() -> ModelPropertyBuilder {
        ModelPropertyBuilder::default()
    }

    #[inline]
    pub fn child_property(&self, name: &str) -> Option<&AttributeProperty> {
        self.properties.get(name).map(ModelEntry::property)
    }

    /// Whether the child attribute is required. Unknown attributes are not.
    #[inline]
    pub fn is_required(&self, name: &str) -> bool {
        self.properties
            .get(name)
            .map_or(false, ModelEntry::is_required)
    }

    pub fn child_properties(&self) -> impl Iterator<Item = (&str, &ModelEntry)> {
        self.properties
            .iter()
            .map(|(name, entry)| (name.as_str(), entry))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Creates a model holding the default value of every child property.
    ///
    /// Children without a representable default are left out.
    pub fn build_default_value(&self) -> ResourceModel {
        let mut model = ResourceModel::new();
        for (name, entry) in &self.properties {
            if let Some(value) = entry.property.build_default_value() {
                model.insert(name.clone(), value);
            }
        }
        model
    }

    #[inline]
    pub fn validate(&self, value: &AttributeValue) -> bool {
        match value {
            AttributeValue::Model(model) => validation::validate_model(self, model),
            _ => false,
        }
    }
}

/// Property of an array attribute
///
/// The range, if any, applies to the number of items. A variable array only enforces the lower
/// bound.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArrayProperty {
    pub(crate) element: Box<AttributeProperty>,

    pub(crate) range: Option<ValueRange<usize>>,

    #[serde(default)]
    pub(crate) variable: bool,

    #[serde(default)]
    pub(crate) unique: bool,
}

impl ArrayProperty {
    #[inline]
    pub fn builder() -> ArrayPropertyBuilder {
        ArrayPropertyBuilder::default()
    }

    #[inline]
    pub fn element_property(&self) -> &AttributeProperty {
        &self.element
    }

    #[inline]
    pub fn has_range(&self) -> bool {
        self.range.is_some()
    }

    #[inline]
    pub fn range(&self) -> Option<ValueRange<usize>> {
        self.range
    }

    #[inline]
    pub fn min(&self) -> Option<usize> {
        self.range.map(|range| range.min)
    }

    #[inline]
    pub fn max(&self) -> Option<usize> {
        self.range.map(|range| range.max)
    }

    #[inline]
    pub fn is_variable(&self) -> bool {
        self.variable
    }

    #[inline]
    pub fn is_unique(&self) -> bool {
        self.unique
    }

    /// Whether an array with `count` items has an acceptable size.
    pub fn accepts_count(&self, count: usize) -> bool {
        match self.range {
            Some(ValueRange { min, max }) => {
                count >= min && (count <= max || self.variable)
            }
            None => true,
        }
    }

    pub fn type_info(&self) -> Option<TypeInfo> {
        let element = self.element.type_info()?;
        let depth = element.depth + 1;

        (depth <= MAX_ARRAY_DEPTH).then(|| TypeInfo::array(element.base_type, depth))
    }

    /// Creates an array with the minimum number of items, each one set to the default of the
    /// element property.
    pub fn build_default_value(&self) -> Option<ArrayValue> {
        let element = self.element.build_default_value()?;
        ArrayValue::filled(element, self.min().unwrap_or(0))
    }

    #[inline]
    pub fn validate(&self, value: &AttributeValue) -> bool {
        match value {
            AttributeValue::Array(array) => validation::validate_array(self, array),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::builder::PropertyBuilder;

    use super::*;

    #[test]
    fn serialize_scalar_properties() {
        let integer: AttributeProperty = PropertyBuilder
            .integer()
            .default_value(5)
            .range(1, 10)
            .into();
        assert_eq!(
            serde_json::to_value(&integer).unwrap(),
            json!({
                "type": "integer",
                "default": 5,
                "range": { "min": 1, "max": 10 },
            })
        );

        let string: AttributeProperty = PropertyBuilder
            .string()
            .default_value("eco")
            .values(["eco", "auto"])
            .into();
        assert_eq!(
            serde_json::to_value(&string).unwrap(),
            json!({
                "type": "string",
                "default": "eco",
                "values": ["auto", "eco"],
            })
        );

        let boolean: AttributeProperty = PropertyBuilder.boolean().into();
        assert_eq!(
            serde_json::to_value(&boolean).unwrap(),
            json!({ "type": "boolean", "default": false })
        );
    }

    #[test]
    fn serialize_composite_properties() {
        let property: AttributeProperty = PropertyBuilder
            .model()
            .property(
                "levels",
                true,
                PropertyBuilder
                    .array()
                    .element(PropertyBuilder.integer())
                    .unique(true)
                    .build()
                    .unwrap(),
            )
            .into();

        assert_eq!(
            serde_json::to_value(&property).unwrap(),
            json!({
                "type": "model",
                "properties": {
                    "levels": {
                        "property": {
                            "type": "array",
                            "element": { "type": "integer", "default": 0 },
                            "variable": false,
                            "unique": true,
                        },
                        "required": true,
                    },
                },
            })
        );
    }

    #[test]
    fn deserialize_sorts_values() {
        let property: AttributeProperty = serde_json::from_value(json!({
            "type": "double",
            "values": [3.2, 1.5, 2.0],
        }))
        .unwrap();

        let property = property.as_double().unwrap();
        assert_eq!(property.default_value(), 0.);
        assert_eq!(property.values(), [1.5, 2., 3.2]);
        assert!(property.is_valid(3.2));
        assert!(!property.is_valid(11.25));
    }

    #[test]
    fn deserialize_nested_array() {
        let property: AttributeProperty = serde_json::from_value(json!({
            "type": "array",
            "range": { "min": 1, "max": 1 },
            "element": {
                "type": "array",
                "element": { "type": "integer", "range": { "min": 1, "max": 10 } },
            },
        }))
        .unwrap();

        assert_eq!(
            property.type_info(),
            Some(TypeInfo::array(ValueType::Integer, 2))
        );
        assert!(property.validate(&vec![vec![1]].into()));
        assert!(!property.validate(&vec![vec![15]].into()));
        assert!(!property.validate(&vec![vec![1], vec![2]].into()));
    }

    #[test]
    fn range_takes_precedence() {
        let property = IntegerProperty {
            default_value: 0,
            range: Some(ValueRange { min: 0, max: 3 }),
            values: Some(AllowedValues::<i32>::new([7, 8])),
        };

        assert!(!property.has_values());
        assert!(property.values().is_empty());
        assert!(property.is_valid(3));
        assert!(!property.is_valid(7));
    }

    #[test]
    fn deserialize_range_and_values() {
        let property: AttributeProperty = serde_json::from_value(json!({
            "type": "integer",
            "range": { "min": 0, "max": 3 },
            "values": [7, 8],
        }))
        .unwrap();

        let integer = property.as_integer().unwrap();
        assert!(integer.has_range());
        assert!(!integer.has_values());
        assert!(integer.values().is_empty());
        assert!(property.validate(&2.into()));
        assert!(!property.validate(&7.into()));

        let property: AttributeProperty = serde_json::from_value(json!({
            "type": "string",
            "range": { "min": 1, "max": 2 },
            "values": ["long value"],
        }))
        .unwrap();

        let string = property.as_string().unwrap();
        assert!(!string.has_values());
        assert!(string.values().is_empty());
        assert!(property.validate(&"ok".into()));
        assert!(!property.validate(&"long value".into()));
    }

    #[test]
    fn string_values_lookup() {
        let property = StringProperty::builder().values(["b", "c", "a"]).build();

        assert!(property.is_valid("a"));
        assert!(property.is_valid("c"));
        assert!(!property.is_valid("d"));
        assert!(!property.is_valid(""));
    }

    #[test]
    fn model_children() {
        let property = ModelProperty::builder()
            .property("on", true, BooleanProperty::builder())
            .property("label", false, StringProperty::builder())
            .build();

        let mut names: Vec<_> = property
            .child_properties()
            .map(|(name, entry)| (name, entry.is_required()))
            .collect();
        names.sort_unstable();
        assert_eq!(names, [("label", false), ("on", true)]);
        assert!(!property.is_empty());
        assert!(!property.validate(&true.into()));
    }
}
