use crate::property::{
    AllowedValues, AttributeProperty, BooleanProperty, DoubleProperty, IntegerProperty,
    StringProperty, ValueRange,
};

macro_rules! numeric_property_builder {
    ($(#[$meta:meta])* $name:ident => $property:ident($ty:ty)) => {
        $(#[$meta])*
        #[must_use]
        #[derive(Debug, Default, Clone, PartialEq)]
        pub struct $name {
            default_value: $ty,
            range: Option<ValueRange<$ty>>,
            values: Option<Vec<$ty>>,
        }

        impl $name {
            pub fn default_value(mut self, value: $ty) -> Self {
                self.default_value = value;
                self
            }

            /// Restricts the values to the inclusive range `min..=max`.
            ///
            /// A range takes precedence over [`values`](Self::values).
            pub fn range(mut self, min: $ty, max: $ty) -> Self {
                self.range = Some(ValueRange { min, max });
                self
            }

            /// Restricts the values to an enumerated set.
            pub fn values<I>(mut self, values: I) -> Self
            where
                I: IntoIterator,
                I::Item: Into<$ty>,
            {
                self.values = Some(values.into_iter().map(Into::into).collect());
                self
            }

            pub fn build(self) -> $property {
                let Self {
                    default_value,
                    range,
                    values,
                } = self;

                let values = match range {
                    Some(_) => None,
                    None => values.map(AllowedValues::<$ty>::new),
                };

                $property {
                    default_value,
                    range,
                    values,
                }
            }
        }

        impl From<$name> for $property {
            #[inline]
            fn from(builder: $name) -> Self {
                builder.build()
            }
        }

        impl From<$name> for AttributeProperty {
            #[inline]
            fn from(builder: $name) -> Self {
                builder.build().into()
            }
        }
    };
}

numeric_property_builder!(
    /// Builder for an [`IntegerProperty`]
    IntegerPropertyBuilder => IntegerProperty(i32)
);

numeric_property_builder!(
    /// Builder for a [`DoubleProperty`]
    DoublePropertyBuilder => DoubleProperty(f64)
);

/// Builder for a [`BooleanProperty`]
#[must_use]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BooleanPropertyBuilder {
    default_value: bool,
}

impl BooleanPropertyBuilder {
    pub fn default_value(mut self, value: bool) -> Self {
        self.default_value = value;
        self
    }

    pub fn build(self) -> BooleanProperty {
        BooleanProperty {
            default_value: self.default_value,
        }
    }
}

impl From<BooleanPropertyBuilder> for BooleanProperty {
    #[inline]
    fn from(builder: BooleanPropertyBuilder) -> Self {
        builder.build()
    }
}

impl From<BooleanPropertyBuilder> for AttributeProperty {
    #[inline]
    fn from(builder: BooleanPropertyBuilder) -> Self {
        builder.build().into()
    }
}

/// Builder for a [`StringProperty`]
#[must_use]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StringPropertyBuilder {
    default_value: String,
    range: Option<ValueRange<usize>>,
    values: Option<Vec<String>>,
}

impl StringPropertyBuilder {
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self
    }

    /// Restricts the length of the strings, in characters, to `min..=max`.
    ///
    /// A range takes precedence over [`values`](Self::values).
    pub fn range(mut self, min: usize, max: usize) -> Self {
        self.range = Some(ValueRange { min, max });
        self
    }

    pub fn values<I>(mut self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn build(self) -> StringProperty {
        let Self {
            default_value,
            range,
            values,
        } = self;

        let values = match range {
            Some(_) => None,
            None => values.map(AllowedValues::<String>::new),
        };

        StringProperty {
            default_value,
            range,
            values,
        }
    }
}

impl From<StringPropertyBuilder> for StringProperty {
    #[inline]
    fn from(builder: StringPropertyBuilder) -> Self {
        builder.build()
    }
}

impl From<StringPropertyBuilder> for AttributeProperty {
    #[inline]
    fn from(builder: StringPropertyBuilder) -> Self {
        builder.build().into()
    }
}
