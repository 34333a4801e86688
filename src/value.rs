//! Typed attribute values
//!
//! An [`AttributeValue`] holds exactly one payload: a scalar, a nested [`ResourceModel`] or an
//! array of up to [`MAX_ARRAY_DEPTH`] dimensions of either. The shape of a value is described by
//! [`TypeInfo`], which is always derived from the payload itself.

use std::fmt;

use serde::Serialize;

use crate::model::ResourceModel;

/// The deepest array nesting an attribute value can hold.
pub const MAX_ARRAY_DEPTH: u8 = 3;

/// The kind of an attribute value
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueType {
    #[default]
    Unknown,
    Integer,
    Double,
    Boolean,
    String,
    ResourceModel,
    Array,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unknown => "unknown",
            Self::Integer => "integer",
            Self::Double => "double",
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::ResourceModel => "resource model",
            Self::Array => "array",
        };

        f.write_str(s)
    }
}

/// The full shape of an attribute value.
///
/// `depth` is greater than zero if and only if `value_type` is [`ValueType::Array`]; in that case
/// `base_type` is the kind of the innermost elements. Scalars and models have a `base_type` equal
/// to their `value_type`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeInfo {
    pub value_type: ValueType,
    pub base_type: ValueType,
    pub depth: u8,
}

impl TypeInfo {
    #[inline]
    pub const fn scalar(value_type: ValueType) -> Self {
        Self {
            value_type,
            base_type: value_type,
            depth: 0,
        }
    }

    #[inline]
    pub const fn array(base_type: ValueType, depth: u8) -> Self {
        Self {
            value_type: ValueType::Array,
            base_type,
            depth,
        }
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        self.depth > 0
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_array() {
            write!(f, "{}D array of {}", self.depth, self.base_type)
        } else {
            fmt::Display::fmt(&self.value_type, f)
        }
    }
}

/// An homogeneous array with one, two or three dimensions.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Nested<T> {
    One(Vec<T>),
    Two(Vec<Vec<T>>),
    Three(Vec<Vec<Vec<T>>>),
}

impl<T> Nested<T> {
    pub fn depth(&self) -> u8 {
        match self {
            Self::One(_) => 1,
            Self::Two(_) => 2,
            Self::Three(_) => 3,
        }
    }

    /// The number of items in the outermost dimension.
    pub fn len(&self) -> usize {
        match self {
            Self::One(items) => items.len(),
            Self::Two(rows) => rows.len(),
            Self::Three(planes) => planes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone> Nested<T> {
    /// Wraps `self` into an array one dimension deeper, holding `count` copies of it.
    ///
    /// Returns `None` if the result would exceed [`MAX_ARRAY_DEPTH`].
    fn repeated(self, count: usize) -> Option<Self> {
        match self {
            Self::One(items) => Some(Self::Two(vec![items; count])),
            Self::Two(rows) => Some(Self::Three(vec![rows; count])),
            Self::Three(_) => None,
        }
    }
}

/// An array attribute value, tagged by the kind of its elements
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArrayValue {
    Integer(Nested<i32>),
    Double(Nested<f64>),
    Boolean(Nested<bool>),
    String(Nested<String>),
    Model(Nested<ResourceModel>),
}

impl ArrayValue {
    pub fn base_type(&self) -> ValueType {
        match self {
            Self::Integer(_) => ValueType::Integer,
            Self::Double(_) => ValueType::Double,
            Self::Boolean(_) => ValueType::Boolean,
            Self::String(_) => ValueType::String,
            Self::Model(_) => ValueType::ResourceModel,
        }
    }

    pub fn depth(&self) -> u8 {
        match self {
            Self::Integer(nested) => nested.depth(),
            Self::Double(nested) => nested.depth(),
            Self::Boolean(nested) => nested.depth(),
            Self::String(nested) => nested.depth(),
            Self::Model(nested) => nested.depth(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Integer(nested) => nested.len(),
            Self::Double(nested) => nested.len(),
            Self::Boolean(nested) => nested.len(),
            Self::String(nested) => nested.len(),
            Self::Model(nested) => nested.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Creates an array holding `count` copies of `element`.
    ///
    /// An array element produces an array one dimension deeper; `None` is returned when that
    /// exceeds [`MAX_ARRAY_DEPTH`].
    pub(crate) fn filled(element: AttributeValue, count: usize) -> Option<Self> {
        let array = match element {
            AttributeValue::Integer(value) => Self::Integer(Nested::One(vec![value; count])),
            AttributeValue::Double(value) => Self::Double(Nested::One(vec![value; count])),
            AttributeValue::Boolean(value) => Self::Boolean(Nested::One(vec![value; count])),
            AttributeValue::String(value) => Self::String(Nested::One(vec![value; count])),
            AttributeValue::Model(value) => Self::Model(Nested::One(vec![value; count])),
            AttributeValue::Array(Self::Integer(nested)) => Self::Integer(nested.repeated(count)?),
            AttributeValue::Array(Self::Double(nested)) => Self::Double(nested.repeated(count)?),
            AttributeValue::Array(Self::Boolean(nested)) => Self::Boolean(nested.repeated(count)?),
            AttributeValue::Array(Self::String(nested)) => Self::String(nested.repeated(count)?),
            AttributeValue::Array(Self::Model(nested)) => Self::Model(nested.repeated(count)?),
        };

        Some(array)
    }
}

/// The value of a simulated resource attribute
///
/// The kind of the payload is fixed at construction time: every `From` conversion sets the kind
/// and the payload together, therefore an inconsistent [`TypeInfo`] cannot be represented.
///
/// ```
/// # use simulator_attributes::value::{AttributeValue, TypeInfo, ValueType};
/// let value = AttributeValue::from(vec![vec![1, 2], vec![3]]);
/// assert_eq!(value.type_info(), TypeInfo::array(ValueType::Integer, 2));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Integer(i32),
    Double(f64),
    Boolean(bool),
    String(String),
    Model(ResourceModel),
    Array(ArrayValue),
}

impl AttributeValue {
    pub fn type_info(&self) -> TypeInfo {
        match self {
            Self::Integer(_) => TypeInfo::scalar(ValueType::Integer),
            Self::Double(_) => TypeInfo::scalar(ValueType::Double),
            Self::Boolean(_) => TypeInfo::scalar(ValueType::Boolean),
            Self::String(_) => TypeInfo::scalar(ValueType::String),
            Self::Model(_) => TypeInfo::scalar(ValueType::ResourceModel),
            Self::Array(array) => TypeInfo::array(array.base_type(), array.depth()),
        }
    }

    #[inline]
    pub fn as_integer(&self) -> Option<i32> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Self::Double(value) => Some(*value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_model(&self) -> Option<&ResourceModel> {
        match self {
            Self::Model(model) => Some(model),
            _ => None,
        }
    }

    #[inline]
    pub fn as_array(&self) -> Option<&ArrayValue> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$ty> for AttributeValue {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )+
    };
}

impl_from_scalar!(
    i32 => Integer,
    f64 => Double,
    bool => Boolean,
    String => String,
    ResourceModel => Model,
    ArrayValue => Array,
);

impl From<&str> for AttributeValue {
    #[inline]
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

macro_rules! impl_from_array {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<Vec<$ty>> for ArrayValue {
                #[inline]
                fn from(items: Vec<$ty>) -> Self {
                    Self::$variant(Nested::One(items))
                }
            }

            impl From<&[$ty]> for ArrayValue {
                #[inline]
                fn from(items: &[$ty]) -> Self {
                    Self::$variant(Nested::One(items.to_vec()))
                }
            }

            impl From<Vec<Vec<$ty>>> for ArrayValue {
                #[inline]
                fn from(rows: Vec<Vec<$ty>>) -> Self {
                    Self::$variant(Nested::Two(rows))
                }
            }

            impl From<Vec<Vec<Vec<$ty>>>> for ArrayValue {
                #[inline]
                fn from(planes: Vec<Vec<Vec<$ty>>>) -> Self {
                    Self::$variant(Nested::Three(planes))
                }
            }

            impl From<Vec<$ty>> for AttributeValue {
                #[inline]
                fn from(items: Vec<$ty>) -> Self {
                    Self::Array(items.into())
                }
            }

            impl From<&[$ty]> for AttributeValue {
                #[inline]
                fn from(items: &[$ty]) -> Self {
                    Self::Array(items.into())
                }
            }

            impl From<Vec<Vec<$ty>>> for AttributeValue {
                #[inline]
                fn from(rows: Vec<Vec<$ty>>) -> Self {
                    Self::Array(rows.into())
                }
            }

            impl From<Vec<Vec<Vec<$ty>>>> for AttributeValue {
                #[inline]
                fn from(planes: Vec<Vec<Vec<$ty>>>) -> Self {
                    Self::Array(planes.into())
                }
            }
        )+
    };
}

impl_from_array!(
    i32 => Integer,
    f64 => Double,
    bool => Boolean,
    String => String,
    ResourceModel => Model,
);

fn write_seq<T>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    mut write_item: impl FnMut(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
) -> fmt::Result {
    f.write_str("[")?;
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        write_item(f, item)?;
    }
    f.write_str("]")
}

impl<T: fmt::Display> fmt::Display for Nested<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::One(items) => write_seq(f, items, |f, item| write!(f, "{item}")),
            Self::Two(rows) => write_seq(f, rows, |f, row| {
                write_seq(f, row, |f, item| write!(f, "{item}"))
            }),
            Self::Three(planes) => write_seq(f, planes, |f, plane| {
                write_seq(f, plane, |f, row| {
                    write_seq(f, row, |f, item| write!(f, "{item}"))
                })
            }),
        }
    }
}

impl fmt::Display for ArrayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(nested) => fmt::Display::fmt(nested, f),
            Self::Double(nested) => fmt::Display::fmt(nested, f),
            Self::Boolean(nested) => fmt::Display::fmt(nested, f),
            Self::String(nested) => fmt::Display::fmt(nested, f),
            Self::Model(nested) => fmt::Display::fmt(nested, f),
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => fmt::Display::fmt(value, f),
            Self::Double(value) => fmt::Display::fmt(value, f),
            Self::Boolean(value) => fmt::Display::fmt(value, f),
            Self::String(value) => f.write_str(value),
            Self::Model(model) => fmt::Display::fmt(model, f),
            Self::Array(array) => fmt::Display::fmt(array, f),
        }
    }
}
