//! Builder API for ergonomic Resource construction.
//!
//! Provides a fluent interface for building resources by hand. Mutations that
//! can fail (reserved attribute keys, unrepresentable values) are recorded and
//! the first failure is reported from `build()`.
//!
//! # Example
//!
//! ```rust
//! use jsonapi_tag::model::ResourceBuilder;
//!
//! let resource = ResourceBuilder::new("articles", "1")
//!     .attribute("title", "Rails is Omakase")
//!     .relationship("author", |r| r
//!         .to_one("people", "9")
//!         .link("self", "/articles/1/relationships/author")
//!     )
//!     .link("self", "/articles/1")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(resource.attributes.len(), 1);
//! ```

use crate::error::Error;
use crate::model::{Link, Relationship, Resource, ResourceIdentifier, ResourceLinkage};
use crate::record::FieldValue;

/// Builder for constructing a Resource.
#[derive(Debug, Clone)]
pub struct ResourceBuilder {
    resource: Resource,
    error: Option<Error>,
}

impl ResourceBuilder {
    /// Creates a new ResourceBuilder for the resource `(resource_type, id)`.
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            resource: Resource::new(resource_type, id),
            error: None,
        }
    }

    /// Adds an attribute.
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        if let Err(e) = self.resource.attributes.add(key, value) {
            self.error.get_or_insert(e);
        }
        self
    }

    /// Adds a meta member.
    pub fn meta(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        if let Err(e) = self.resource.meta.add(key, value) {
            self.error.get_or_insert(e);
        }
        self
    }

    /// Adds a plain href link.
    pub fn link(mut self, key: impl Into<String>, href: impl Into<String>) -> Self {
        self.resource.links.add(key, href);
        self
    }

    /// Adds a link object.
    pub fn link_object(mut self, key: impl Into<String>, link: Link) -> Self {
        self.resource.links.add_object(key, link);
        self
    }

    // =========================================================================
    // Relationships
    // =========================================================================

    /// Adds a relationship using a builder function.
    pub fn relationship<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(RelationshipBuilder) -> RelationshipBuilder,
    {
        let builder = f(RelationshipBuilder::new());
        match builder.build() {
            Ok(relationship) => self.resource.relationships.insert(name, relationship),
            Err(e) => {
                self.error.get_or_insert(e);
            }
        }
        self
    }

    /// Adds a ready-made relationship.
    pub fn relationship_object(mut self, name: impl Into<String>, relationship: Relationship) -> Self {
        self.resource.relationships.insert(name, relationship);
        self
    }

    // =========================================================================
    // Build
    // =========================================================================

    /// Builds the final Resource, or returns the first recorded failure.
    pub fn build(self) -> Result<Resource, Error> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.resource),
        }
    }
}

/// Builder for a relationship object.
#[derive(Debug, Clone, Default)]
pub struct RelationshipBuilder {
    relationship: Relationship,
    error: Option<Error>,
}

impl RelationshipBuilder {
    /// Creates a new empty RelationshipBuilder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a to-one linkage to `(resource_type, id)`.
    pub fn to_one(mut self, resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        self.relationship.data = Some(ResourceLinkage::ToOne(Some(ResourceIdentifier::new(
            resource_type,
            id,
        ))));
        self
    }

    /// Sets an empty to-one linkage (`"data": null`).
    pub fn empty_to_one(mut self) -> Self {
        self.relationship.data = Some(ResourceLinkage::to_one());
        self
    }

    /// Appends `(resource_type, id)` to a to-many linkage, creating it on
    /// first use. Fails at build time if the linkage is already to-one.
    pub fn to_many(mut self, resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        let linkage = self
            .relationship
            .data
            .get_or_insert_with(ResourceLinkage::to_many);
        if let Err(e) = linkage.add(ResourceIdentifier::new(resource_type, id)) {
            self.error.get_or_insert(e);
        }
        self
    }

    /// Sets an empty to-many linkage (`"data": []`).
    pub fn empty_to_many(mut self) -> Self {
        self.relationship.data = Some(ResourceLinkage::to_many());
        self
    }

    /// Adds a plain href link to the relationship.
    pub fn link(mut self, key: impl Into<String>, href: impl Into<String>) -> Self {
        self.relationship.links.add(key, href);
        self
    }

    /// Adds a meta member to the relationship.
    pub fn meta(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        if let Err(e) = self.relationship.meta.add(key, value) {
            self.error.get_or_insert(e);
        }
        self
    }

    /// Builds the relationship, or returns the first recorded failure.
    pub fn build(self) -> Result<Relationship, Error> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.relationship),
        }
    }
}
