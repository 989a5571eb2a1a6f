//! Document to record decoding.
//!
//! Decoding mirrors encoding field by field. Members that are absent from
//! the document leave their field untouched; values that cannot be parsed
//! leave the zero value and are listed in the [`DecodeReport`]. The document
//! itself is never modified.

use crate::codec::coerce::Outcome;
use crate::error::Error;
use crate::model::{Resource, ResourceLinkage, Resources, Root};
use crate::record::{Field, Record};
use crate::tag::{LinkMode, RelationshipMode, Tag, parse_tags};

/// Options for decoding.
#[derive(Debug, Clone, Copy)]
pub struct DecodeOptions {
    /// Accept a resource type that is the annotated type plus one trailing
    /// `s` (`"articles"` for `"article"`).
    pub permissive_plural: bool,
    /// Fail with [`Error::Coercion`] instead of leaving a zero value when a
    /// member cannot be parsed.
    pub strict: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            permissive_plural: true,
            strict: false,
        }
    }
}

impl DecodeOptions {
    /// Creates default decoding options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that reject unparseable members.
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }
}

/// Members whose value could not be parsed during a decode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeReport {
    defaulted: Vec<String>,
}

impl DecodeReport {
    /// Members left at their zero value, as `id`, `attributes.<name>`,
    /// `meta.<name>`, `links.<name>`, or `relationships.<name>`. Collection
    /// decodes prefix each with the resource index (`[2].attributes.age`).
    pub fn defaulted(&self) -> &[String] {
        &self.defaulted
    }

    /// Returns true if every member was parsed.
    pub fn is_clean(&self) -> bool {
        self.defaulted.is_empty()
    }
}

/// Returns true if `actual` names the `expected` resource type.
///
/// With `permissive` set, exactly one trailing `s` is stripped from `actual`
/// when the plain comparison fails.
pub fn type_matches(expected: &str, actual: &str, permissive: bool) -> bool {
    actual == expected || (permissive && actual.strip_suffix('s') == Some(expected))
}

/// Decodes JSON:API documents into records.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder {
    options: DecodeOptions,
}

impl Decoder {
    /// Creates a decoder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    /// Decodes a single-resource document into `record`.
    ///
    /// Fails with [`Error::InvalidInput`] unless the document's primary data
    /// is exactly one resource.
    pub fn decode<R: Record>(&self, root: &Root, record: &mut R) -> Result<DecodeReport, Error> {
        let resource = match &root.data {
            Some(Resources::One(Some(resource))) => resource,
            Some(Resources::One(None)) => {
                return Err(Error::InvalidInput {
                    context: "document has no primary resource",
                });
            }
            Some(Resources::Many(_)) => {
                return Err(Error::InvalidInput {
                    context: "cannot decode a resource collection into a single record",
                });
            }
            None => {
                return Err(Error::InvalidInput {
                    context: "document has no primary data",
                });
            }
        };

        let tags = parse_tags(R::tags())?;
        let mut report = DecodeReport::default();
        self.decode_resource(&tags, resource, record, "", &mut report)?;
        Ok(report)
    }

    /// Decodes a collection document into `records`.
    ///
    /// `records` is cleared and receives one record per resource, in order.
    /// On error the records decoded so far (including the failing one) stay
    /// in the vector.
    pub fn decode_many<R: Record>(&self, root: &Root, records: &mut Vec<R>) -> Result<DecodeReport, Error> {
        let resources = match &root.data {
            Some(Resources::Many(resources)) => resources,
            Some(Resources::One(_)) => {
                return Err(Error::InvalidInput {
                    context: "cannot decode a single resource into a record collection",
                });
            }
            None => {
                return Err(Error::InvalidInput {
                    context: "document has no primary data",
                });
            }
        };

        let tags = parse_tags(R::tags())?;
        let mut report = DecodeReport::default();
        records.clear();
        records.reserve(resources.len());

        for (index, resource) in resources.iter().enumerate() {
            let mut record = R::default();
            let prefix = format!("[{index}].");
            let result = self.decode_resource(&tags, resource, &mut record, &prefix, &mut report);
            records.push(record);
            result?;
        }

        tracing::debug!(count = records.len(), defaulted = report.defaulted.len(), "decoded resource collection");
        Ok(report)
    }

    fn decode_resource<R: Record>(
        &self,
        tags: &[Tag],
        resource: &Resource,
        record: &mut R,
        prefix: &str,
        report: &mut DecodeReport,
    ) -> Result<(), Error> {
        for (index, tag) in tags.iter().enumerate() {
            if *tag == Tag::Skip {
                continue;
            }
            let field = record.field_mut(index).ok_or(Error::InvalidInput {
                context: "record has fewer fields than annotations",
            })?;
            self.decode_field(resource, tag, field, prefix, report)?;
        }
        Ok(())
    }

    fn decode_field(
        &self,
        resource: &Resource,
        tag: &Tag,
        field: &mut dyn Field,
        prefix: &str,
        report: &mut DecodeReport,
    ) -> Result<(), Error> {
        let permissive = self.options.permissive_plural;

        let (member, outcome) = match tag {
            Tag::Identifier { resource_type } => {
                if !type_matches(resource_type, &resource.resource_type, permissive) {
                    return Err(Error::IdentifierTypeMismatch {
                        expected: resource_type.clone(),
                        found: resource.resource_type.clone(),
                    });
                }
                ("id".to_string(), field.assign_text(&resource.id)?)
            }
            Tag::Attribute { name } => match resource.attributes.get_value(name) {
                Some(value) => (format!("attributes.{name}"), field.assign_json(value)?),
                None => return Ok(()),
            },
            Tag::Meta { name } => match resource.meta.get_value(name) {
                Some(value) => (format!("meta.{name}"), field.assign_json(value)?),
                None => return Ok(()),
            },
            Tag::Link {
                name,
                mode: LinkMode::Plain,
            } => match resource.links.get(name) {
                Some(link) => (format!("links.{name}"), field.assign_text(link.href())?),
                None => return Ok(()),
            },
            Tag::Relationship {
                name,
                mode: RelationshipMode::Data { target_type },
            } => {
                let Some(data) = resource.relationships.get(name).and_then(|r| r.data.as_ref()) else {
                    return Ok(());
                };
                let outcome = match data {
                    ResourceLinkage::ToOne(None) => return Ok(()),
                    ResourceLinkage::ToOne(Some(identifier)) => {
                        self.check_linkage_type(target_type, &identifier.resource_type)?;
                        field.assign_text(&identifier.id)?
                    }
                    ResourceLinkage::ToMany(identifiers) => {
                        for identifier in identifiers {
                            self.check_linkage_type(target_type, &identifier.resource_type)?;
                        }
                        let ids: Vec<&str> = identifiers.iter().map(|i| i.id.as_str()).collect();
                        field.assign_texts(&ids)?
                    }
                };
                (format!("relationships.{name}"), outcome)
            }
            // Templated and inline members have no field value to recover.
            Tag::Link { .. } | Tag::Relationship { .. } | Tag::Skip => return Ok(()),
        };

        if outcome == Outcome::Defaulted {
            let member = format!("{prefix}{member}");
            if self.options.strict {
                return Err(Error::Coercion { member });
            }
            tracing::debug!(member = %member, "member could not be parsed, left at zero value");
            report.defaulted.push(member);
        }
        Ok(())
    }

    fn check_linkage_type(&self, expected: &str, found: &str) -> Result<(), Error> {
        if type_matches(expected, found, self.options.permissive_plural) {
            Ok(())
        } else {
            Err(Error::IdentifierTypeMismatch {
                expected: expected.to_string(),
                found: found.to_string(),
            })
        }
    }
}

/// Decodes a single-resource document with default options.
pub fn decode<R: Record>(root: &Root, record: &mut R) -> Result<DecodeReport, Error> {
    Decoder::new().decode(root, record)
}

/// Decodes a collection document with default options.
pub fn decode_many<R: Record>(root: &Root, records: &mut Vec<R>) -> Result<DecodeReport, Error> {
    Decoder::new().decode_many(root, records)
}
