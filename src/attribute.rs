//! Simulated resource attributes
//!
//! A [`SimulatorResourceAttribute`] binds a name to an [`AttributeValue`] and, optionally, to the
//! [`AttributeProperty`] describing the values it accepts.

use serde::Serialize;
use tracing::debug;

use crate::{
    property::{ArrayProperty, AttributeProperty},
    value::{AttributeValue, ValueType},
    Error,
};

/// The step used to list the allowed values of a double range.
const DOUBLE_STEP: f64 = 0.1;

/// Tolerance for the accumulated error when stepping through a double range.
const DOUBLE_STEP_TOLERANCE: f64 = 1e-9;

/// Ranges with more values than this are not listed, only the current value is.
pub const MAX_LISTED_VALUES: usize = 10_000;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimulatorResourceAttribute {
    name: String,
    value: AttributeValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    property: Option<AttributeProperty>,
}

impl SimulatorResourceAttribute {
    pub fn new(
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
        property: Option<AttributeProperty>,
    ) -> Result<Self, Error> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::InvalidArgs);
        }

        Ok(Self {
            name,
            value: value.into(),
            property,
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn value(&self) -> &AttributeValue {
        &self.value
    }

    #[inline]
    pub fn property(&self) -> Option<&AttributeProperty> {
        self.property.as_ref()
    }

    /// Whether the current value satisfies the property. Attributes without a property accept
    /// anything.
    pub fn is_valid(&self) -> bool {
        self.property
            .as_ref()
            .map_or(true, |property| property.validate(&self.value))
    }

    /// Replaces the value of a scalar attribute.
    ///
    /// The new value must have the same type of the current one and, if the attribute has a
    /// property, it must be valid. Models and arrays can only be replaced by creating a new
    /// attribute.
    pub fn set_value(&mut self, value: impl Into<AttributeValue>) -> Result<(), Error> {
        let value = value.into();
        let expected = self.value.type_info();

        if expected.is_array() || expected.value_type == ValueType::ResourceModel {
            debug!(attribute = %self.name, kind = %expected, "cannot re-assign non scalar attribute");
            return Err(Error::NotScalar(self.name.clone()));
        }

        let found = value.type_info();
        if found != expected {
            debug!(
                attribute = %self.name,
                %expected,
                %found,
                "rejected value of a different type"
            );
            return Err(Error::TypeMismatch {
                name: self.name.clone(),
                expected,
                found,
            });
        }

        if let Some(property) = &self.property {
            if !property.validate(&value) {
                debug!(attribute = %self.name, %value, "rejected value not allowed by the property");
                return Err(Error::ConstraintViolation(self.name.clone()));
            }
        }

        self.value = value;
        Ok(())
    }

    /// Lists the values that can be assigned to the attribute, rendered as strings.
    ///
    /// Only scalar attributes and one dimensional arrays of scalars are supported: for them the
    /// values allowed by the (element) property are listed. When the property does not enumerate
    /// anything, the current value is listed. Models and deeper arrays give an empty list.
    ///
    /// Ranges holding more than [`MAX_LISTED_VALUES`] values are not expanded: the current value
    /// is listed instead. Double ranges are listed in steps of `0.1` starting from the minimum.
    pub fn allowed_values(&self) -> Vec<String> {
        let type_info = self.value.type_info();
        if type_info.base_type == ValueType::ResourceModel {
            return Vec::new();
        }

        let Some(property) = &self.property else {
            return vec![self.value.to_string()];
        };

        let property = match type_info.depth {
            0 => Some(property),
            1 => property.as_array().map(ArrayProperty::element_property),
            _ => None,
        };

        property.map_or_else(Vec::new, |property| {
            allowed_values_of(property, &self.value)
        })
    }
}

fn allowed_values_of(property: &AttributeProperty, current: &AttributeValue) -> Vec<String> {
    match property {
        AttributeProperty::Integer(property) => {
            if let Some(range) = property.range() {
                let count = i64::from(range.max) - i64::from(range.min) + 1;
                if count > MAX_LISTED_VALUES as i64 {
                    return vec![current.to_string()];
                }
                (range.min..=range.max).map(|value| value.to_string()).collect()
            } else if property.has_values() {
                property.values().iter().map(ToString::to_string).collect()
            } else {
                vec![current.to_string()]
            }
        }
        AttributeProperty::Double(property) => match property.range() {
            Some(range) if range.min.is_finite() && range.max.is_finite() => {
                let steps =
                    ((range.max - range.min) / DOUBLE_STEP + DOUBLE_STEP_TOLERANCE).floor();
                if steps >= MAX_LISTED_VALUES as f64 {
                    return vec![current.to_string()];
                }
                if steps < 0. {
                    return Vec::new();
                }

                (0..=steps as u32)
                    .map(|step| format_double_step(range.min + f64::from(step) * DOUBLE_STEP))
                    .collect()
            }
            Some(_) => vec![current.to_string()],
            None if property.has_values() => {
                property.values().iter().map(ToString::to_string).collect()
            }
            None => vec![current.to_string()],
        },
        AttributeProperty::Boolean(_) => vec!["true".to_string(), "false".to_string()],
        AttributeProperty::String(property) => {
            if property.has_values() {
                property.values().to_vec()
            } else {
                vec![current.to_string()]
            }
        }
        AttributeProperty::Model(_) | AttributeProperty::Array(_) => Vec::new(),
    }
}

/// Renders a value of a double range, hiding the error accumulated by stepping.
///
/// Values on the `0.1` grid get one fraction digit, the others as many as they need.
fn format_double_step(value: f64) -> String {
    let snapped = (value * 1e9).round() / 1e9;
    let value = if snapped.is_finite() { snapped } else { value };
    if (value * 10.).round() / 10. == value {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
