//! Typed attribute values and constraint properties for simulated IoT resources
//!
//! A simulated resource exposes a set of attributes. Each attribute holds an
//! [`AttributeValue`](value::AttributeValue) (a scalar, a nested
//! [`ResourceModel`](model::ResourceModel) or an array of up to three dimensions of either) and
//! may be described by an [`AttributeProperty`](property::AttributeProperty): a schema stating
//! which values are acceptable.
//!
//! Properties are created through the [builders](builder) and are immutable afterwards.
//!
//! # Basic usage
//!
//! ```
//! use simulator_attributes::{
//!     builder::PropertyBuilder,
//!     model::ResourceModel,
//!     property::AttributeProperty,
//!     value::AttributeValue,
//! };
//!
//! let brightness = PropertyBuilder.integer().default_value(50).range(0, 100).build();
//! assert!(brightness.is_valid(100));
//! assert!(!brightness.is_valid(101));
//!
//! let levels = PropertyBuilder
//!     .array()
//!     .element(PropertyBuilder.integer().range(1, 10))
//!     .range(1, 4)
//!     .unique(true)
//!     .build()
//!     .expect("element property is set");
//!
//! let light: AttributeProperty = PropertyBuilder
//!     .model()
//!     .property("brightness", true, brightness)
//!     .property("levels", false, levels)
//!     .property("label", false, PropertyBuilder.string().range(1, 16))
//!     .build()
//!     .into();
//!
//! let mut value = ResourceModel::new();
//! value.set("brightness", 80).unwrap();
//! value.set("levels", vec![1, 5, 10]).unwrap();
//! assert!(light.validate(&AttributeValue::from(value.clone())));
//!
//! value.set("levels", vec![1, 1]).unwrap();
//! assert!(!light.validate(&AttributeValue::from(value)));
//! ```
//!
//! Validation never fails with an error: a value of the wrong shape and a value out of the
//! allowed constraints are both reported as `false`.

pub mod attribute;
pub mod builder;
pub mod model;
pub mod property;
pub mod value;

mod validation;

pub use crate::{
    attribute::SimulatorResourceAttribute, model::ResourceModel, property::AttributeProperty,
    value::AttributeValue,
};

use crate::value::TypeInfo;

/// Errors raised when building or mutating attributes
///
/// Validating a value against a property never produces an error, see
/// [`AttributeProperty::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
pub enum Error {
    /// Attribute names must not be empty
    #[error("Invalid arguments: attribute name is empty")]
    InvalidArgs,

    /// Only scalar attributes can be re-assigned in place
    #[error("Attribute \"{0}\" is not a scalar and cannot be re-assigned")]
    NotScalar(String),

    /// A new value must have the same shape of the current one
    #[error("Attribute \"{name}\" holds a value of type {expected}, got {found}")]
    TypeMismatch {
        name: String,
        expected: TypeInfo,
        found: TypeInfo,
    },

    /// The new value is not accepted by the property of the attribute
    #[error("Value is not valid for attribute \"{0}\"")]
    ConstraintViolation(String),
}
