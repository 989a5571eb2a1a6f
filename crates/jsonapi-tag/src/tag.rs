//! Field annotation grammar.
//!
//! An annotation is a comma-separated list of segments. The first segment
//! picks the category; the rest name the member and, for relationships and
//! links, how the field's value is turned into one:
//!
//! ```text
//! identifier, <type>
//! attribute, <name>
//! relationship, <name>                    inline Relationship value
//! relationship, <name>, context           populate a context template
//! relationship, <name>, link              string value becomes links.self
//! relationship, <name>, data, <type>      value becomes resource linkage
//! link, <name>
//! link, <name>, context
//! meta, <name>
//! -                                       field is ignored
//! ```
//!
//! Whitespace around segments is ignored.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

pub const IDENTIFIER: &str = "identifier";
pub const ATTRIBUTE: &str = "attribute";
pub const RELATIONSHIP: &str = "relationship";
pub const LINK: &str = "link";
pub const META: &str = "meta";
pub const SKIP: &str = "-";

pub const MODE_CONTEXT: &str = "context";
pub const MODE_LINK: &str = "link";
pub const MODE_DATA: &str = "data";

/// How a relationship field is represented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationshipMode {
    /// The field holds a complete Relationship.
    Inline,
    /// The field value populates a named context template.
    Context,
    /// The field's string value becomes the relationship's `self` link.
    Link,
    /// The field value is the id (or ids) of resources of `target_type`.
    Data { target_type: String },
}

/// How a link field is represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkMode {
    /// The field's string value is the href.
    Plain,
    /// The field value populates a named context template.
    Context,
}

/// A parsed field annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    Identifier { resource_type: String },
    Attribute { name: String },
    Relationship { name: String, mode: RelationshipMode },
    Link { name: String, mode: LinkMode },
    Meta { name: String },
    Skip,
}

impl Tag {
    /// Parses one annotation.
    pub fn parse(tag: &str) -> Result<Tag, Error> {
        let segments: Vec<&str> = tag.split(',').map(str::trim).collect();

        match segments.as_slice() {
            [SKIP] => Ok(Tag::Skip),
            [IDENTIFIER, rest @ ..] => match rest {
                [resource_type] => Ok(Tag::Identifier {
                    resource_type: name(tag, resource_type)?,
                }),
                [] => Err(Error::invalid_tag(tag, "identifier requires a resource type")),
                _ => Err(Error::invalid_tag(tag, "too many segments")),
            },
            [ATTRIBUTE, rest @ ..] => Ok(Tag::Attribute {
                name: single_name(tag, rest, "attribute requires a name")?,
            }),
            [META, rest @ ..] => Ok(Tag::Meta {
                name: single_name(tag, rest, "meta requires a name")?,
            }),
            [RELATIONSHIP, rest @ ..] => parse_relationship(tag, rest),
            [LINK, rest @ ..] => match rest {
                [] => Err(Error::invalid_tag(tag, "link requires a name")),
                [link_name] => Ok(Tag::Link {
                    name: name(tag, link_name)?,
                    mode: LinkMode::Plain,
                }),
                [link_name, MODE_CONTEXT] => Ok(Tag::Link {
                    name: name(tag, link_name)?,
                    mode: LinkMode::Context,
                }),
                [_, _] => Err(Error::invalid_tag(tag, "unknown link mode")),
                _ => Err(Error::invalid_tag(tag, "too many segments")),
            },
            [""] => Err(Error::invalid_tag(tag, "empty tag")),
            _ => Err(Error::invalid_tag(tag, "unknown category")),
        }
    }

    /// Returns the member name, or the resource type for identifiers.
    pub fn name(&self) -> Option<&str> {
        match self {
            Tag::Identifier { resource_type } => Some(resource_type),
            Tag::Attribute { name }
            | Tag::Relationship { name, .. }
            | Tag::Link { name, .. }
            | Tag::Meta { name } => Some(name),
            Tag::Skip => None,
        }
    }
}

fn parse_relationship(tag: &str, rest: &[&str]) -> Result<Tag, Error> {
    let (relationship_name, mode) = match rest {
        [] => return Err(Error::invalid_tag(tag, "relationship requires a name")),
        [n] => (n, RelationshipMode::Inline),
        [n, MODE_CONTEXT] => (n, RelationshipMode::Context),
        [n, MODE_LINK] => (n, RelationshipMode::Link),
        [_, MODE_DATA] => {
            return Err(Error::invalid_tag(tag, "data relationship requires a target type"));
        }
        [n, MODE_DATA, target_type] => (
            n,
            RelationshipMode::Data {
                target_type: name(tag, target_type)?,
            },
        ),
        [_, MODE_CONTEXT | MODE_LINK, ..] | [_, MODE_DATA, _, ..] => {
            return Err(Error::invalid_tag(tag, "too many segments"));
        }
        _ => return Err(Error::invalid_tag(tag, "unknown relationship mode")),
    };

    Ok(Tag::Relationship {
        name: name(tag, relationship_name)?,
        mode,
    })
}

fn single_name(tag: &str, rest: &[&str], missing: &'static str) -> Result<String, Error> {
    match rest {
        [n] => name(tag, n),
        [] => Err(Error::invalid_tag(tag, missing)),
        _ => Err(Error::invalid_tag(tag, "too many segments")),
    }
}

fn name(tag: &str, segment: &str) -> Result<String, Error> {
    if segment.is_empty() {
        return Err(Error::invalid_tag(tag, "empty name"));
    }
    Ok(segment.to_string())
}

/// Parses every annotation of a record, in field order.
pub fn parse_tags(tags: &[&str]) -> Result<Vec<Tag>, Error> {
    tags.iter().map(|tag| Tag::parse(tag)).collect()
}

impl FromStr for Tag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tag::parse(s)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Identifier { resource_type } => write!(f, "{IDENTIFIER},{resource_type}"),
            Tag::Attribute { name } => write!(f, "{ATTRIBUTE},{name}"),
            Tag::Meta { name } => write!(f, "{META},{name}"),
            Tag::Relationship { name, mode } => match mode {
                RelationshipMode::Inline => write!(f, "{RELATIONSHIP},{name}"),
                RelationshipMode::Context => write!(f, "{RELATIONSHIP},{name},{MODE_CONTEXT}"),
                RelationshipMode::Link => write!(f, "{RELATIONSHIP},{name},{MODE_LINK}"),
                RelationshipMode::Data { target_type } => {
                    write!(f, "{RELATIONSHIP},{name},{MODE_DATA},{target_type}")
                }
            },
            Tag::Link { name, mode } => match mode {
                LinkMode::Plain => write!(f, "{LINK},{name}"),
                LinkMode::Context => write!(f, "{LINK},{name},{MODE_CONTEXT}"),
            },
            Tag::Skip => f.write_str(SKIP),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_parse_categories() {
        assert_eq!(
            Tag::parse("identifier,tests").unwrap(),
            Tag::Identifier {
                resource_type: "tests".to_string()
            }
        );
        assert_eq!(
            Tag::parse("attribute,first").unwrap(),
            Tag::Attribute {
                name: "first".to_string()
            }
        );
        assert_eq!(
            Tag::parse("meta,version").unwrap(),
            Tag::Meta {
                name: "version".to_string()
            }
        );
        assert_eq!(Tag::parse("-").unwrap(), Tag::Skip);
    }

    #[test]
    fn test_parse_relationship_modes() {
        let rel = |name: &str, mode| Tag::Relationship {
            name: name.to_string(),
            mode,
        };

        assert_eq!(Tag::parse("relationship,owner").unwrap(), rel("owner", RelationshipMode::Inline));
        assert_eq!(
            Tag::parse("relationship,owner,context").unwrap(),
            rel("owner", RelationshipMode::Context)
        );
        assert_eq!(
            Tag::parse("relationship,owner,link").unwrap(),
            rel("owner", RelationshipMode::Link)
        );
        assert_eq!(
            Tag::parse("relationship,many_rels,data,tests").unwrap(),
            rel(
                "many_rels",
                RelationshipMode::Data {
                    target_type: "tests".to_string()
                }
            )
        );
    }

    #[test]
    fn test_parse_links() {
        assert_eq!(
            Tag::parse("link,self").unwrap(),
            Tag::Link {
                name: "self".to_string(),
                mode: LinkMode::Plain
            }
        );
        assert_eq!(
            Tag::parse("link,related,context").unwrap(),
            Tag::Link {
                name: "related".to_string(),
                mode: LinkMode::Context
            }
        );
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        assert_eq!(
            Tag::parse(" relationship , author , data , people ").unwrap(),
            Tag::Relationship {
                name: "author".to_string(),
                mode: RelationshipMode::Data {
                    target_type: "people".to_string()
                }
            }
        );
    }

    #[test]
    fn test_invalid_tags() {
        let cases = [
            ("", "empty tag"),
            ("identifier", "identifier requires a resource type"),
            ("identifier,", "empty name"),
            ("attribute", "attribute requires a name"),
            ("attribute,a,b", "too many segments"),
            ("relationship", "relationship requires a name"),
            ("relationship,r,bogus", "unknown relationship mode"),
            ("relationship,r,data", "data relationship requires a target type"),
            ("relationship,r,data,t,x", "too many segments"),
            ("relationship,,link", "empty name"),
            ("link", "link requires a name"),
            ("link,l,bogus", "unknown link mode"),
            ("meta", "meta requires a name"),
            ("column,x", "unknown category"),
        ];

        for (input, reason) in cases {
            let err = Tag::parse(input).unwrap_err();
            assert_eq!(err, Error::invalid_tag(input, reason), "input {input:?}");
            assert_eq!(err.kind(), ErrorKind::InvalidTag);
        }
    }

    #[test]
    fn test_display_reparses() {
        for input in [
            "identifier,tests",
            "attribute,a",
            "relationship,r",
            "relationship,r,context",
            "relationship,r,link",
            "relationship,r,data,t",
            "link,l",
            "link,l,context",
            "meta,m",
            "-",
        ] {
            let tag: Tag = input.parse().unwrap();
            assert_eq!(tag.to_string(), input);
        }
    }

    #[test]
    fn test_parse_tags_stops_at_first_error() {
        let err = parse_tags(&["identifier,a", "nope", "attribute,"]).unwrap_err();
        assert_eq!(err, Error::invalid_tag("nope", "unknown category"));
    }
}
