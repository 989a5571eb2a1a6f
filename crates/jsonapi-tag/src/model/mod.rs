//! Document model types for JSON:API.
//!
//! This module contains the entities a JSON:API document is made of:
//! - Resources and resource identifiers
//! - Relationships and resource linkages
//! - Attributes, links, and meta objects
//! - The top-level root document
//! - Builders (ergonomic construction)

pub mod attributes;
pub mod builder;
pub mod cardinality;
pub mod links;
pub mod meta;
pub mod relationship;
pub mod resource;
pub mod root;

pub use attributes::Attributes;
pub use builder::{RelationshipBuilder, ResourceBuilder};
pub use cardinality::Cardinality;
pub use links::{Link, LinkValue, Links};
pub use meta::Meta;
pub use relationship::{Relationship, Relationships, ResourceIdentifier, ResourceLinkage};
pub use resource::{Resource, Resources};
pub use root::Root;
