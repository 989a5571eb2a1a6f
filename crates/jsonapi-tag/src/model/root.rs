//! Top-level document.

use serde::{Deserialize, Deserializer, Serialize};

use crate::model::{Links, Meta, Resource, Resources};

/// Keeps `"data": null` as an empty single-resource container.
fn deserialize_present_data<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Resources>, D::Error> {
    Resources::deserialize(deserializer).map(Some)
}

/// The top-level object of a JSON:API document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Root {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_present_data"
    )]
    pub data: Option<Resources>,
    #[serde(default, skip_serializing_if = "Links::is_empty")]
    pub links: Links,
    #[serde(default, skip_serializing_if = "Meta::is_empty")]
    pub meta: Meta,
}

impl Root {
    /// Creates a document with no primary data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a document whose primary data is a single resource.
    pub fn one(resource: Resource) -> Self {
        Self {
            data: Some(Resources::One(Some(resource))),
            ..Self::default()
        }
    }

    /// Creates a document whose primary data is a collection.
    pub fn many(resources: Vec<Resource>) -> Self {
        Self {
            data: Some(Resources::Many(resources)),
            ..Self::default()
        }
    }

    /// Iterates over every resource of the primary data.
    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.data.iter().flat_map(Resources::iter)
    }
}
