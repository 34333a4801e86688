//! Nested resource models
//!
//! A [`ResourceModel`] is a structured attribute value: a mapping from attribute names to
//! [`AttributeValue`]s. It is not internally synchronized, sharing it across threads while it is
//! mutated requires the owner to hold a lock around both the mutation and any validation.

use std::{collections::HashMap, fmt, ops::Not};

use serde::Serialize;

use crate::{value::AttributeValue, Error};

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResourceModel {
    attributes: HashMap<String, AttributeValue>,
}

impl ResourceModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of an attribute, replacing any previous value with the same name.
    ///
    /// Attribute names must not be empty.
    pub fn set(
        &mut self,
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Result<(), Error> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::InvalidArgs);
        }

        self.attributes.insert(name, value.into());
        Ok(())
    }

    /// Inserts an attribute whose name is already known to be valid.
    pub(crate) fn insert(&mut self, name: String, value: AttributeValue) {
        debug_assert!(name.is_empty().not());
        self.attributes.insert(name, value);
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    #[inline]
    pub fn remove(&mut self, name: &str) -> Option<AttributeValue> {
        self.attributes.remove(name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Iterates over the attributes in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }
}

impl fmt::Display for ResourceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut attributes: Vec<_> = self.attributes.iter().collect();
        attributes.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));

        f.write_str("{")?;
        for (index, (name, value)) in attributes.into_iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        f.write_str("}")
    }
}
