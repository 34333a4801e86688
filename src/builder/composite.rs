use std::{collections::HashMap, ops::Not};

use crate::property::{ArrayProperty, AttributeProperty, ModelEntry, ModelProperty, ValueRange};

macro_rules! flag_field_builder {
    ($($field:ident),* $(,)?) => {
        $(
            pub fn $field(mut self, value: bool) -> Self {
                self.$field = value;
                self
            }
        )*
    };
}

/// Builder for a [`ModelProperty`]
#[must_use]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ModelPropertyBuilder {
    properties: HashMap<String, ModelEntry>,
}

impl ModelPropertyBuilder {
    /// Describes the child attribute `name`, replacing any previous description.
    ///
    /// Empty names are ignored, a model cannot contain such an attribute.
    pub fn property(
        mut self,
        name: impl Into<String>,
        required: bool,
        property: impl Into<AttributeProperty>,
    ) -> Self {
        let name = name.into();
        if name.is_empty().not() {
            let property = property.into();
            self.properties
                .insert(name, ModelEntry { property, required });
        }
        self
    }

    pub fn build(self) -> ModelProperty {
        ModelProperty {
            properties: self.properties,
        }
    }
}

impl From<ModelPropertyBuilder> for ModelProperty {
    #[inline]
    fn from(builder: ModelPropertyBuilder) -> Self {
        builder.build()
    }
}

impl From<ModelPropertyBuilder> for AttributeProperty {
    #[inline]
    fn from(builder: ModelPropertyBuilder) -> Self {
        builder.build().into()
    }
}

/// Builder for an [`ArrayProperty`]
#[must_use]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ArrayPropertyBuilder {
    element: Option<AttributeProperty>,
    range: Option<ValueRange<usize>>,
    variable: bool,
    unique: bool,
}

impl ArrayPropertyBuilder {
    /// Sets the property of the array items.
    ///
    /// For arrays with more than one dimension this is the property of the inner arrays.
    pub fn element(mut self, property: impl Into<AttributeProperty>) -> Self {
        self.element = Some(property.into());
        self
    }

    /// Restricts the number of items to `min..=max`.
    pub fn range(mut self, min: usize, max: usize) -> Self {
        self.range = Some(ValueRange { min, max });
        self
    }

    flag_field_builder!(variable, unique);

    /// Builds the property, or returns `None` if the element property has not been set.
    pub fn build(self) -> Option<ArrayProperty> {
        let Self {
            element,
            range,
            variable,
            unique,
        } = self;

        let element = Box::new(element?);
        Some(ArrayProperty {
            element,
            range,
            variable,
            unique,
        })
    }
}
