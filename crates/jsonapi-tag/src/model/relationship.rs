//! Relationships, resource linkages, and resource identifiers.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::Error;
use crate::model::{Cardinality, Links, Meta};

/// A lightweight reference to another resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Meta::is_empty")]
    pub meta: Meta,
}

impl ResourceIdentifier {
    /// Creates an identifier for the resource `(resource_type, id)`.
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            resource_type: resource_type.into(),
            meta: Meta::new(),
        }
    }
}

/// Resource linkage of a relationship: one identifier or many.
///
/// A to-one linkage always has its single slot; the slot is `None` for an
/// empty to-one relationship and serializes as `null`. A to-many linkage
/// serializes as an array, including the empty array.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceLinkage {
    ToOne(Option<ResourceIdentifier>),
    ToMany(Vec<ResourceIdentifier>),
}

impl ResourceLinkage {
    /// Creates a to-one linkage with an empty slot.
    pub fn to_one() -> Self {
        ResourceLinkage::ToOne(None)
    }

    /// Creates an empty to-many linkage.
    pub fn to_many() -> Self {
        ResourceLinkage::ToMany(Vec::new())
    }

    pub fn cardinality(&self) -> Cardinality {
        match self {
            ResourceLinkage::ToOne(_) => Cardinality::ToOne,
            ResourceLinkage::ToMany(_) => Cardinality::ToMany,
        }
    }

    /// Sets the identifier of a to-one linkage.
    pub fn set(&mut self, identifier: ResourceIdentifier) -> Result<(), Error> {
        match self {
            ResourceLinkage::ToOne(slot) => {
                *slot = Some(identifier);
                Ok(())
            }
            ResourceLinkage::ToMany(_) => Err(self.mismatch(Cardinality::ToOne)),
        }
    }

    /// Appends an identifier to a to-many linkage.
    pub fn add(&mut self, identifier: ResourceIdentifier) -> Result<(), Error> {
        match self {
            ResourceLinkage::ToMany(identifiers) => {
                identifiers.push(identifier);
                Ok(())
            }
            ResourceLinkage::ToOne(_) => Err(self.mismatch(Cardinality::ToMany)),
        }
    }

    /// Returns the slot of a to-one linkage.
    pub fn single(&self) -> Result<Option<&ResourceIdentifier>, Error> {
        match self {
            ResourceLinkage::ToOne(slot) => Ok(slot.as_ref()),
            ResourceLinkage::ToMany(_) => Err(self.mismatch(Cardinality::ToOne)),
        }
    }

    /// Returns the identifiers of a to-many linkage.
    ///
    /// A to-one linkage fails even though it could be viewed as a one-element
    /// slice: collection access is a to-many operation.
    pub fn collection(&self) -> Result<&[ResourceIdentifier], Error> {
        match self {
            ResourceLinkage::ToMany(identifiers) => Ok(identifiers),
            ResourceLinkage::ToOne(_) => Err(self.mismatch(Cardinality::ToMany)),
        }
    }

    /// Interprets a raw value as a linkage.
    ///
    /// The wire form does not declare its cardinality, so a single identifier
    /// (or `null`) is tried first, then an array of identifiers.
    pub fn from_value(value: Value) -> Result<Self, Error> {
        if let Ok(single) = serde_json::from_value::<Option<ResourceIdentifier>>(value.clone()) {
            return Ok(ResourceLinkage::ToOne(single));
        }
        if let Ok(many) = serde_json::from_value::<Vec<ResourceIdentifier>>(value) {
            return Ok(ResourceLinkage::ToMany(many));
        }
        Err(Error::TypeMismatch {
            context: "resource linkage is neither an identifier object nor an array of them",
        })
    }

    fn mismatch(&self, expected: Cardinality) -> Error {
        Error::CardinalityMismatch {
            expected,
            found: self.cardinality(),
        }
    }
}

impl Serialize for ResourceLinkage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ResourceLinkage::ToOne(slot) => slot.serialize(serializer),
            ResourceLinkage::ToMany(identifiers) => identifiers.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for ResourceLinkage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        ResourceLinkage::from_value(value).map_err(serde::de::Error::custom)
    }
}

/// Keeps an explicit `null` as an empty to-one linkage instead of collapsing
/// it into an absent member.
fn deserialize_present_linkage<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<ResourceLinkage>, D::Error> {
    ResourceLinkage::deserialize(deserializer).map(Some)
}

/// A relationship object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(default, skip_serializing_if = "Links::is_empty")]
    pub links: Links,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_present_linkage"
    )]
    pub data: Option<ResourceLinkage>,
    #[serde(default, skip_serializing_if = "Meta::is_empty")]
    pub meta: Meta,
}

impl Relationship {
    /// Creates a relationship with no links, data, or meta.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a relationship whose data is the given linkage.
    pub fn with_data(data: ResourceLinkage) -> Self {
        Self {
            data: Some(data),
            ..Self::default()
        }
    }
}

/// The relationships object of a resource, keyed by relationship name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Relationships(BTreeMap<String, Relationship>);

impl Relationships {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a relationship, replacing any previous one under `name`.
    pub fn insert(&mut self, name: impl Into<String>, relationship: Relationship) {
        self.0.insert(name.into(), relationship);
    }

    pub fn get(&self, name: &str) -> Option<&Relationship> {
        self.0.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Relationship> {
        self.0.get_mut(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over relationships in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Relationship)> {
        self.0.iter()
    }
}
