//! Resource objects and the one-or-many resources container.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::Error;
use crate::model::{Attributes, Cardinality, Links, Meta, Relationships};

/// A resource object. The `(resource_type, id)` pair is its identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
    #[serde(default, skip_serializing_if = "Relationships::is_empty")]
    pub relationships: Relationships,
    #[serde(default, skip_serializing_if = "Links::is_empty")]
    pub links: Links,
    #[serde(default, skip_serializing_if = "Meta::is_empty")]
    pub meta: Meta,
}

impl Resource {
    /// Creates an empty resource with the given type and id.
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            resource_type: resource_type.into(),
            ..Self::default()
        }
    }
}

/// Primary data of a document: a single resource or a collection.
///
/// `One` always has its slot; an empty slot serializes as `null`. `Many`
/// serializes as an array, including the empty array.
#[derive(Debug, Clone, PartialEq)]
pub enum Resources {
    One(Option<Resource>),
    Many(Vec<Resource>),
}

impl Resources {
    /// Creates a single-resource container with an empty slot.
    pub fn one() -> Self {
        Resources::One(None)
    }

    /// Creates an empty collection.
    pub fn many() -> Self {
        Resources::Many(Vec::new())
    }

    pub fn cardinality(&self) -> Cardinality {
        match self {
            Resources::One(_) => Cardinality::One,
            Resources::Many(_) => Cardinality::Many,
        }
    }

    /// Sets the resource of a single-resource container.
    pub fn set(&mut self, resource: Resource) -> Result<(), Error> {
        match self {
            Resources::One(slot) => {
                *slot = Some(resource);
                Ok(())
            }
            Resources::Many(_) => Err(self.mismatch(Cardinality::One)),
        }
    }

    /// Appends a resource to a collection.
    pub fn add(&mut self, resource: Resource) -> Result<(), Error> {
        match self {
            Resources::Many(resources) => {
                resources.push(resource);
                Ok(())
            }
            Resources::One(_) => Err(self.mismatch(Cardinality::Many)),
        }
    }

    /// Returns the slot of a single-resource container.
    pub fn single(&self) -> Result<Option<&Resource>, Error> {
        match self {
            Resources::One(slot) => Ok(slot.as_ref()),
            Resources::Many(_) => Err(self.mismatch(Cardinality::One)),
        }
    }

    /// Returns the resources of a collection.
    pub fn collection(&self) -> Result<&[Resource], Error> {
        match self {
            Resources::Many(resources) => Ok(resources),
            Resources::One(_) => Err(self.mismatch(Cardinality::Many)),
        }
    }

    /// Iterates over every present resource regardless of cardinality.
    pub fn iter(&self) -> std::slice::Iter<'_, Resource> {
        match self {
            Resources::One(slot) => slot.as_slice().iter(),
            Resources::Many(resources) => resources.iter(),
        }
    }

    /// Interprets a raw value as primary data: a single resource object (or
    /// `null`) first, then an array of resource objects.
    pub fn from_value(value: Value) -> Result<Self, Error> {
        if let Ok(single) = serde_json::from_value::<Option<Resource>>(value.clone()) {
            return Ok(Resources::One(single));
        }
        if let Ok(many) = serde_json::from_value::<Vec<Resource>>(value) {
            return Ok(Resources::Many(many));
        }
        Err(Error::TypeMismatch {
            context: "primary data is neither a resource object nor an array of them",
        })
    }

    fn mismatch(&self, expected: Cardinality) -> Error {
        Error::CardinalityMismatch {
            expected,
            found: self.cardinality(),
        }
    }
}

impl Serialize for Resources {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Resources::One(slot) => slot.serialize(serializer),
            Resources::Many(resources) => resources.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Resources {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Resources::from_value(value).map_err(serde::de::Error::custom)
    }
}
