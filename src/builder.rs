//! Attribute property builders
//!
//! The main entry point is [`PropertyBuilder`], which specializes into a builder for each kind of
//! property. Every concrete property exposes the same builder through its own `builder()`
//! function, e.g. [`IntegerProperty::builder`](crate::property::IntegerProperty::builder).
//!
//! Builders are consumed when the property is built: the resulting property tree cannot be
//! modified anymore. Building an array property is the only fallible step, because an array
//! property needs the property of its elements.
//!
//! # Example
//!
//! ```
//! use simulator_attributes::{builder::PropertyBuilder, property::AttributeProperty};
//!
//! let matrix: AttributeProperty = PropertyBuilder
//!     .array()
//!     .range(1, 4)
//!     .element(
//!         PropertyBuilder
//!             .array()
//!             .element(PropertyBuilder.double().range(0., 1.))
//!             .build()
//!             .expect("element property is set"),
//!     )
//!     .build()
//!     .expect("element property is set")
//!     .into();
//!
//! assert!(matrix.validate(&vec![vec![0.5, 1.], vec![0.]].into()));
//! ```

pub mod composite;
pub mod scalar;

pub use self::{
    composite::{ArrayPropertyBuilder, ModelPropertyBuilder},
    scalar::{
        BooleanPropertyBuilder, DoublePropertyBuilder, IntegerPropertyBuilder,
        StringPropertyBuilder,
    },
};

/// The entry point to build any kind of [`AttributeProperty`](crate::property::AttributeProperty)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyBuilder;

impl PropertyBuilder {
    #[inline]
    pub fn integer(self) -> IntegerPropertyBuilder {
        IntegerPropertyBuilder::default()
    }

    #[inline]
    pub fn double(self) -> DoublePropertyBuilder {
        DoublePropertyBuilder::default()
    }

    #[inline]
    pub fn boolean(self) -> BooleanPropertyBuilder {
        BooleanPropertyBuilder::default()
    }

    #[inline]
    pub fn string(self) -> StringPropertyBuilder {
        StringPropertyBuilder::default()
    }

    #[inline]
    pub fn model(self) -> ModelPropertyBuilder {
        ModelPropertyBuilder::default()
    }

    #[inline]
    pub fn array(self) -> ArrayPropertyBuilder {
        ArrayPropertyBuilder::default()
    }
}
