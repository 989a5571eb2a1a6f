//! Encoding and decoding between records and JSON:API documents.
//!
//! - [`encoder`]: record(s) to [`Root`](crate::model::Root)
//! - [`decoder`]: [`Root`](crate::model::Root) to record(s)
//! - [`coerce`]: the string and attribute coercion tables
//! - [`document`]: the JSON wire format

pub mod coerce;
pub mod decoder;
pub mod document;
pub mod encoder;

pub use coerce::{Coercion, Outcome};
pub use decoder::{DecodeOptions, DecodeReport, Decoder, decode, decode_many, type_matches};
pub use document::{from_slice, from_str, to_string, to_string_pretty, to_vec};
pub use encoder::{EncodeOptions, Encoder, encode, encode_many};
