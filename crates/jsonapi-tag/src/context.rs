//! Shared relationship and link templates.
//!
//! A [`Context`] holds named templates that records refer to with the
//! `relationship,<name>,context` and `link,<name>,context` annotations. A
//! template marks where the field value goes with string members equal to
//! [`VALUE_SLOT`]. Populating a template returns a fresh copy with every slot
//! replaced; the stored template is never touched.
//!
//! ```rust
//! use jsonapi_tag::context::{Context, VALUE_SLOT};
//! use jsonapi_tag::model::Link;
//!
//! let mut context = Context::new();
//! context.register_link("author", Link::new(VALUE_SLOT));
//!
//! let link = context.populate_link("author", &"/people/9".into()).unwrap();
//! assert_eq!(link.href, "/people/9");
//! assert_eq!(context.link("author").unwrap().href, VALUE_SLOT);
//! ```
//!
//! Slots match whole string members only; `"/people/{value}"` is left as is.

use rustc_hash::FxHashMap;
use serde_json::{Map, Value};

use crate::codec::coerce::value_to_text;
use crate::error::Error;
use crate::model::{Link, LinkValue, Links, Meta, Relationship, ResourceIdentifier, ResourceLinkage};
use crate::record::FieldValue;
use crate::validate::validate_value;

/// Marker for the place a field value is injected into a template.
pub const VALUE_SLOT: &str = "{value}";

/// Template types that can have a value injected into their slots.
pub trait Populate: Sized {
    /// Returns a copy of `self` with every value slot replaced by `value`.
    fn populate(&self, value: &FieldValue) -> Result<Self, Error>;
}

fn populate_text(template: &str, value: &FieldValue) -> Result<String, Error> {
    if template == VALUE_SLOT {
        value_to_text(value)
    } else {
        Ok(template.to_string())
    }
}

fn populate_json(template: &Value, value: &FieldValue) -> Result<Value, Error> {
    match template {
        Value::String(s) if s == VALUE_SLOT => {
            validate_value(value)?;
            Ok(value.clone().into_json())
        }
        Value::Array(items) => items
            .iter()
            .map(|item| populate_json(item, value))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Value::Object(members) => populate_map(members, value).map(Value::Object),
        other => Ok(other.clone()),
    }
}

fn populate_map(template: &Map<String, Value>, value: &FieldValue) -> Result<Map<String, Value>, Error> {
    template
        .iter()
        .map(|(key, member)| populate_json(member, value).map(|member| (key.clone(), member)))
        .collect()
}

impl Populate for Meta {
    fn populate(&self, value: &FieldValue) -> Result<Self, Error> {
        populate_map(self.as_map(), value).map(Meta::from_map)
    }
}

impl Populate for Link {
    fn populate(&self, value: &FieldValue) -> Result<Self, Error> {
        Ok(Link {
            href: populate_text(&self.href, value)?,
            meta: self.meta.populate(value)?,
        })
    }
}

impl Populate for LinkValue {
    fn populate(&self, value: &FieldValue) -> Result<Self, Error> {
        match self {
            LinkValue::Href(href) => populate_text(href, value).map(LinkValue::Href),
            LinkValue::Object(link) => link.populate(value).map(LinkValue::Object),
        }
    }
}

impl Populate for Links {
    fn populate(&self, value: &FieldValue) -> Result<Self, Error> {
        let mut links = Links::new();
        for (key, link) in self.iter() {
            links.insert(key.clone(), link.populate(value)?);
        }
        Ok(links)
    }
}

impl Populate for ResourceIdentifier {
    fn populate(&self, value: &FieldValue) -> Result<Self, Error> {
        Ok(ResourceIdentifier {
            id: populate_text(&self.id, value)?,
            resource_type: populate_text(&self.resource_type, value)?,
            meta: self.meta.populate(value)?,
        })
    }
}

impl Populate for ResourceLinkage {
    fn populate(&self, value: &FieldValue) -> Result<Self, Error> {
        match self {
            ResourceLinkage::ToOne(slot) => slot
                .as_ref()
                .map(|identifier| identifier.populate(value))
                .transpose()
                .map(ResourceLinkage::ToOne),
            ResourceLinkage::ToMany(identifiers) => identifiers
                .iter()
                .map(|identifier| identifier.populate(value))
                .collect::<Result<Vec<_>, _>>()
                .map(ResourceLinkage::ToMany),
        }
    }
}

impl Populate for Relationship {
    fn populate(&self, value: &FieldValue) -> Result<Self, Error> {
        Ok(Relationship {
            links: self.links.populate(value)?,
            data: self.data.as_ref().map(|data| data.populate(value)).transpose()?,
            meta: self.meta.populate(value)?,
        })
    }
}

/// Registry of named relationship and link templates.
///
/// Lookups take `&self`, so a populated context can be shared across threads
/// behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct Context {
    relationships: FxHashMap<String, Relationship>,
    links: FxHashMap<String, Link>,
}

impl Context {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a relationship template, replacing any previous one under
    /// `name`.
    pub fn register_relationship(&mut self, name: impl Into<String>, template: Relationship) {
        self.relationships.insert(name.into(), template);
    }

    /// Registers a link template, replacing any previous one under `name`.
    pub fn register_link(&mut self, name: impl Into<String>, template: Link) {
        self.links.insert(name.into(), template);
    }

    /// Returns the relationship template registered under `name`.
    pub fn relationship(&self, name: &str) -> Result<&Relationship, Error> {
        self.relationships.get(name).ok_or_else(|| Error::ContextNotFound {
            template: "relationship",
            name: name.to_string(),
        })
    }

    /// Returns the link template registered under `name`.
    pub fn link(&self, name: &str) -> Result<&Link, Error> {
        self.links.get(name).ok_or_else(|| Error::ContextNotFound {
            template: "link",
            name: name.to_string(),
        })
    }

    /// Returns a copy of the relationship template `name` populated with
    /// `value`.
    pub fn populate_relationship(&self, name: &str, value: &FieldValue) -> Result<Relationship, Error> {
        tracing::trace!(template = name, "populating relationship template");
        self.relationship(name)?.populate(value)
    }

    /// Returns a copy of the link template `name` populated with `value`.
    pub fn populate_link(&self, name: &str, value: &FieldValue) -> Result<Link, Error> {
        tracing::trace!(template = name, "populating link template");
        self.link(name)?.populate(value)
    }

    pub fn len(&self) -> usize {
        self.relationships.len() + self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty() && self.links.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RelationshipBuilder;
    use serde_json::json;

    fn owner_template() -> Relationship {
        RelationshipBuilder::new()
            .to_one("people", VALUE_SLOT)
            .link("related", VALUE_SLOT)
            .link("self", "/fixed")
            .meta("owner", VALUE_SLOT)
            .build()
            .unwrap()
    }

    #[test]
    fn test_lookup_missing() {
        let context = Context::new();
        assert_eq!(
            context.relationship("owner").unwrap_err(),
            Error::ContextNotFound {
                template: "relationship",
                name: "owner".to_string()
            }
        );
        assert_eq!(
            context.link("self").unwrap_err(),
            Error::ContextNotFound {
                template: "link",
                name: "self".to_string()
            }
        );
    }

    #[test]
    fn test_populate_relationship() {
        let mut context = Context::new();
        context.register_relationship("owner", owner_template());

        let populated = context.populate_relationship("owner", &FieldValue::Uint(42)).unwrap();
        let identifier = populated.data.as_ref().unwrap().single().unwrap().unwrap();
        assert_eq!(identifier, &ResourceIdentifier::new("people", "42"));
        assert_eq!(populated.links.href("related").unwrap(), "42");
        assert_eq!(populated.links.href("self").unwrap(), "/fixed");
        assert_eq!(populated.meta.get("owner").unwrap(), &json!(42));
    }

    #[test]
    fn test_populate_twice_is_independent() {
        let mut context = Context::new();
        context.register_relationship("owner", owner_template());

        let first = context.populate_relationship("owner", &FieldValue::from("a")).unwrap();
        let second = context.populate_relationship("owner", &FieldValue::from("b")).unwrap();

        assert_eq!(first.links.href("related").unwrap(), "a");
        assert_eq!(second.links.href("related").unwrap(), "b");
        assert_eq!(context.relationship("owner").unwrap(), &owner_template());
    }

    #[test]
    fn test_populate_nested_meta() {
        let mut link = Link::new("/static");
        link.meta.add("nested", json!({"ids": [VALUE_SLOT, "x"], "keep": 1})).unwrap();

        let populated = link.populate(&FieldValue::Bool(true)).unwrap();
        assert_eq!(populated.href, "/static");
        assert_eq!(
            populated.meta.get("nested").unwrap(),
            &json!({"ids": [true, "x"], "keep": 1})
        );
    }

    #[test]
    fn test_populate_link_context() {
        let mut context = Context::new();
        context.register_link("related", Link::new(VALUE_SLOT));
        assert_eq!(context.len(), 1);

        let link = context.populate_link("related", &FieldValue::from("/people/9")).unwrap();
        assert_eq!(link, Link::new("/people/9"));
    }

    #[test]
    fn test_populate_unsupported_values() {
        let template = Link::new(VALUE_SLOT);
        let err = template.populate(&FieldValue::from(vec![1, 2])).unwrap_err();
        assert_eq!(err, Error::UnsupportedType { kind: "sequence" });

        let mut meta = Meta::new();
        meta.add("v", VALUE_SLOT).unwrap();
        let err = meta.populate(&FieldValue::Float(f64::NAN)).unwrap_err();
        assert_eq!(err, Error::UnsupportedType { kind: "float" });
    }

    #[test]
    fn test_no_slot_ignores_value_kind() {
        let template = Link::new("/fixed");
        let link = template.populate(&FieldValue::from(vec![1, 2])).unwrap();
        assert_eq!(link.href, "/fixed");
    }
}
