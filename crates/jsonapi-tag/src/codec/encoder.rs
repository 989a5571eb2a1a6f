//! Record to document encoding.
//!
//! Fields are visited in declaration order and each is placed in the
//! resource according to its annotation. The first failing field aborts the
//! whole call; no partial document is returned.

use crate::codec::coerce::value_to_text;
use crate::context::Context;
use crate::error::Error;
use crate::model::{Relationship, Resource, ResourceIdentifier, ResourceLinkage, Root};
use crate::record::{FieldValue, Record};
use crate::tag::{LinkMode, RelationshipMode, Tag, parse_tags};

/// Options for encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodeOptions {
    /// Leave out attributes whose field is an absent optional instead of
    /// writing `null`.
    pub omit_null_attributes: bool,
}

impl EncodeOptions {
    /// Creates default encoding options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that drop `null` attributes.
    pub fn omit_null_attributes() -> Self {
        Self {
            omit_null_attributes: true,
        }
    }
}

/// Encodes records into JSON:API documents.
///
/// An encoder without a context fails on `context` annotations with
/// [`Error::ContextNotFound`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Encoder<'c> {
    context: Option<&'c Context>,
    options: EncodeOptions,
}

impl<'c> Encoder<'c> {
    /// Creates an encoder with default options and no context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `context` for templated relationships and links.
    pub fn with_context(mut self, context: &'c Context) -> Self {
        self.context = Some(context);
        self
    }

    pub fn options(mut self, options: EncodeOptions) -> Self {
        self.options = options;
        self
    }

    /// Encodes one record as a single-resource document.
    pub fn encode<R: Record>(&self, record: &R) -> Result<Root, Error> {
        let resource = self.encode_resource(record)?;
        Ok(Root::one(resource))
    }

    /// Encodes records as a collection document, preserving order.
    pub fn encode_many<R: Record>(&self, records: &[R]) -> Result<Root, Error> {
        let tags = parse_tags(R::tags())?;
        let resources = records
            .iter()
            .map(|record| self.encode_with_tags(&tags, record))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(count = resources.len(), "encoded resource collection");
        Ok(Root::many(resources))
    }

    /// Encodes one record as a bare resource.
    pub fn encode_resource<R: Record>(&self, record: &R) -> Result<Resource, Error> {
        let tags = parse_tags(R::tags())?;
        self.encode_with_tags(&tags, record)
    }

    fn encode_with_tags<R: Record>(&self, tags: &[Tag], record: &R) -> Result<Resource, Error> {
        let mut resource = Resource::default();

        for (index, tag) in tags.iter().enumerate() {
            if *tag == Tag::Skip {
                continue;
            }
            let field = record.field(index).ok_or(Error::InvalidInput {
                context: "record has fewer fields than annotations",
            })?;
            self.encode_field(&mut resource, tag, field.value()?)?;
        }

        tracing::trace!(
            resource_type = %resource.resource_type,
            id = %resource.id,
            "encoded resource"
        );
        Ok(resource)
    }

    fn encode_field(&self, resource: &mut Resource, tag: &Tag, value: FieldValue) -> Result<(), Error> {
        match tag {
            Tag::Identifier { resource_type } => {
                resource.id = value_to_text(&value)?;
                resource.resource_type = resource_type.clone();
            }
            Tag::Attribute { name } => {
                if !(self.options.omit_null_attributes && value.is_null()) {
                    resource.attributes.add(name.as_str(), value)?;
                }
            }
            Tag::Meta { name } => resource.meta.add(name.as_str(), value)?,
            Tag::Relationship { name, mode } => {
                if let Some(relationship) = self.encode_relationship(name, mode, value)? {
                    resource.relationships.insert(name.as_str(), relationship);
                }
            }
            Tag::Link { name, mode } => match mode {
                LinkMode::Plain => resource.links.add(name.as_str(), value_to_text(&value)?),
                LinkMode::Context => {
                    let link = self.context(name, "link")?.populate_link(name, &value)?;
                    resource.links.add_object(name.as_str(), link);
                }
            },
            Tag::Skip => {}
        }
        Ok(())
    }

    fn encode_relationship(
        &self,
        name: &str,
        mode: &RelationshipMode,
        value: FieldValue,
    ) -> Result<Option<Relationship>, Error> {
        let relationship = match mode {
            RelationshipMode::Inline => match value {
                FieldValue::Relationship(relationship) => *relationship,
                FieldValue::Optional(None) => return Ok(None),
                FieldValue::Optional(Some(inner)) => match *inner {
                    FieldValue::Relationship(relationship) => *relationship,
                    other => return Err(Error::UnsupportedType { kind: other.kind_name() }),
                },
                other => return Err(Error::UnsupportedType { kind: other.kind_name() }),
            },
            RelationshipMode::Context => self
                .context(name, "relationship")?
                .populate_relationship(name, &value)?,
            RelationshipMode::Link => {
                let mut relationship = Relationship::new();
                relationship.links.add("self", value_to_text(&value)?);
                relationship
            }
            RelationshipMode::Data { target_type } => {
                Relationship::with_data(linkage(target_type, &value)?)
            }
        };
        Ok(Some(relationship))
    }

    fn context(&self, name: &str, template: &'static str) -> Result<&'c Context, Error> {
        self.context.ok_or_else(|| Error::ContextNotFound {
            template,
            name: name.to_string(),
        })
    }
}

/// Builds the linkage for a `data` relationship: a sequence becomes a
/// to-many linkage, an absent optional an empty to-one slot.
fn linkage(target_type: &str, value: &FieldValue) -> Result<ResourceLinkage, Error> {
    match value {
        FieldValue::Sequence(items) => items
            .iter()
            .map(|item| Ok(ResourceIdentifier::new(target_type, value_to_text(item)?)))
            .collect::<Result<Vec<_>, Error>>()
            .map(ResourceLinkage::ToMany),
        FieldValue::Optional(None) => Ok(ResourceLinkage::ToOne(None)),
        other => Ok(ResourceLinkage::ToOne(Some(ResourceIdentifier::new(
            target_type,
            value_to_text(other)?,
        )))),
    }
}

/// Encodes one record with default options and no context.
pub fn encode<R: Record>(record: &R) -> Result<Root, Error> {
    Encoder::new().encode(record)
}

/// Encodes a slice of records with default options and no context.
pub fn encode_many<R: Record>(records: &[R]) -> Result<Root, Error> {
    Encoder::new().encode_many(records)
}
