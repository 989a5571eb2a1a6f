//! Value and document validation.
//!
//! Values are checked before they enter an attributes or meta object; the
//! document check covers what deserialization cannot enforce on its own
//! (typed members and reserved attribute names).

use crate::error::Error;
use crate::model::{Relationship, Resource, ResourceLinkage, Root, attributes};
use crate::record::FieldValue;

/// Returns true if the value has an attribute/meta representation.
///
/// Composites are accepted without looking at their elements; non-finite
/// floats nested inside them serialize as `null`.
pub fn is_representable(value: &FieldValue) -> bool {
    match value {
        FieldValue::Int(_)
        | FieldValue::Uint(_)
        | FieldValue::Bool(_)
        | FieldValue::Text(_)
        | FieldValue::Optional(_)
        | FieldValue::Sequence(_)
        | FieldValue::Json(_) => true,
        FieldValue::Float(v) => v.is_finite(),
        FieldValue::Relationship(_) => false,
    }
}

/// Fails with [`Error::UnsupportedType`] if the value is not representable.
pub fn validate_value(value: &FieldValue) -> Result<(), Error> {
    if is_representable(value) {
        Ok(())
    } else {
        Err(Error::UnsupportedType {
            kind: value.kind_name(),
        })
    }
}

/// Validates a parsed document.
///
/// Checks that every resource and resource identifier names a type and that
/// no attributes object carries a reserved member name.
pub fn validate_root(root: &Root) -> Result<(), Error> {
    for resource in root.resources() {
        validate_resource(resource)?;
    }
    Ok(())
}

fn validate_resource(resource: &Resource) -> Result<(), Error> {
    if resource.resource_type.is_empty() {
        return Err(Error::InvalidInput {
            context: "resource has an empty type",
        });
    }
    if let Some(key) = resource.attributes.keys().find(|key| attributes::is_reserved_key(key)) {
        return Err(Error::ReservedKey { key: key.clone() });
    }
    for (_, relationship) in resource.relationships.iter() {
        validate_relationship(relationship)?;
    }
    Ok(())
}

fn validate_relationship(relationship: &Relationship) -> Result<(), Error> {
    let identifiers = match &relationship.data {
        Some(ResourceLinkage::ToOne(slot)) => slot.as_slice(),
        Some(ResourceLinkage::ToMany(identifiers)) => identifiers.as_slice(),
        None => &[],
    };
    if identifiers.iter().any(|identifier| identifier.resource_type.is_empty()) {
        return Err(Error::InvalidInput {
            context: "resource identifier has an empty type",
        });
    }
    Ok(())
}
