//! jsonapi-tag: annotation-driven JSON:API encoding and decoding.
//!
//! This crate maps plain Rust records to and from JSON:API documents. Each
//! record field carries a short annotation saying where it lives in the
//! document (identifier, attribute, relationship, link, or meta), and the
//! engine does the rest, coercing between strings, numbers, and booleans in
//! both directions.
//!
//! # Overview
//!
//! - **Document model**: typed resources, relationships, links, and meta.
//!   Single-or-collection payloads are one enum, so `data` serializes as an
//!   object, `null`, or an array depending on what it holds.
//! - **Annotations**: `identifier,<type>`, `attribute,<name>`,
//!   `relationship,<name>[,context|,link|,data,<type>]`,
//!   `link,<name>[,context]`, `meta,<name>`, or `-`.
//! - **Templates**: a [`Context`] holds shared relationship and link
//!   skeletons that are copied and filled in with field values.
//!
//! # Quick Start
//!
//! ```rust
//! use jsonapi_tag::{decode, encode, codec};
//!
//! jsonapi_tag::record! {
//!     #[derive(Debug, Default, PartialEq)]
//!     pub struct Article {
//!         #[jsonapi("identifier,articles")]
//!         pub id: u64,
//!         #[jsonapi("attribute,title")]
//!         pub title: String,
//!         #[jsonapi("relationship,comments,data,comments")]
//!         pub comments: Vec<u64>,
//!     }
//! }
//!
//! let article = Article { id: 1, title: "JSON:API paints my bikeshed!".into(), comments: vec![5, 12] };
//!
//! // Encode to a document and then to bytes
//! let root = encode(&article).unwrap();
//! let bytes = codec::to_vec(&root).unwrap();
//!
//! // Parse and decode back
//! let parsed = codec::from_slice(&bytes).unwrap();
//! let mut decoded = Article::default();
//! let report = decode(&parsed, &mut decoded).unwrap();
//! assert!(report.is_clean());
//! assert_eq!(decoded, article);
//! ```
//!
//! # Modules
//!
//! - [`model`]: Document types (Root, Resource, Relationship, Links, Meta)
//! - [`codec`]: Encoder, decoder, coercion tables, and the JSON wire format
//! - [`context`]: Relationship and link templates
//! - [`record`]: The field surface records expose, and the `record!` macro
//! - [`tag`]: Annotation grammar
//! - [`validate`]: Value and document validation
//! - [`error`]: Error types
//!
//! # Coercion
//!
//! Decoding never fails on a value it merely cannot parse: the field is left
//! at its zero value and the member is listed in the returned
//! [`DecodeReport`]. Set [`DecodeOptions::strict`](codec::DecodeOptions) to
//! turn those into errors instead.

pub mod codec;
pub mod context;
pub mod error;
pub mod model;
pub mod record;
pub mod tag;
pub mod validate;

// Re-export commonly used types at crate root
pub use codec::{
    DecodeOptions, DecodeReport, Decoder, EncodeOptions, Encoder, decode, decode_many, encode, encode_many,
};
pub use context::{Context, Populate, VALUE_SLOT};
pub use error::{Error, ErrorKind};
pub use model::{
    Attributes, Cardinality, Link, LinkValue, Links, Meta, Relationship, RelationshipBuilder, Relationships,
    Resource, ResourceBuilder, ResourceIdentifier, ResourceLinkage, Resources, Root,
};
pub use record::{Field, FieldKind, FieldType, FieldValue, Json, Record};
pub use tag::{LinkMode, RelationshipMode, Tag};
pub use validate::{is_representable, validate_root, validate_value};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
