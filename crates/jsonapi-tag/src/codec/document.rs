//! Wire codec: bytes to and from a [`Root`] document.
//!
//! Parsing checks the structural shape of the document (cardinality
//! auto-detection, required `type` members) and reports failures as
//! [`Error::Malformed`]. Use [`crate::validate::validate_root`] for the
//! semantic checks deserialization cannot make.

use crate::error::Error;
use crate::model::Root;

/// Serializes a document to compact JSON bytes.
pub fn to_vec(root: &Root) -> Result<Vec<u8>, Error> {
    Ok(serde_json::to_vec(root)?)
}

/// Serializes a document to a compact JSON string.
pub fn to_string(root: &Root) -> Result<String, Error> {
    Ok(serde_json::to_string(root)?)
}

/// Serializes a document to an indented JSON string.
pub fn to_string_pretty(root: &Root) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(root)?)
}

/// Parses a document from JSON bytes.
pub fn from_slice(input: &[u8]) -> Result<Root, Error> {
    let root: Root = serde_json::from_slice(input)?;
    tracing::trace!(resources = root.resources().count(), "parsed document");
    Ok(root)
}

/// Parses a document from a JSON string.
pub fn from_str(input: &str) -> Result<Root, Error> {
    from_slice(input.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::model::{Resource, Resources};

    #[test]
    fn test_parse_and_serialize() {
        let input = r#"{"data":{"id":"1","type":"articles","attributes":{"title":"Hi"}},"meta":{"total":1}}"#;
        let root = from_str(input).unwrap();
        assert_eq!(root.data.as_ref().unwrap().single().unwrap().unwrap().id, "1");
        assert_eq!(to_string(&root).unwrap(), input);
        assert_eq!(to_vec(&root).unwrap(), input.as_bytes());
    }

    #[test]
    fn test_pretty_output_parses_back() {
        let root = Root::many(vec![Resource::new("a", "1"), Resource::new("a", "2")]);
        let pretty = to_string_pretty(&root).unwrap();
        assert!(pretty.contains('\n'));
        assert_eq!(from_str(&pretty).unwrap(), root);
    }

    #[test]
    fn test_null_and_absent_data() {
        let root = from_str(r#"{"data": null}"#).unwrap();
        assert_eq!(root.data, Some(Resources::One(None)));
        assert_eq!(to_string(&root).unwrap(), r#"{"data":null}"#);

        let root = from_str("{}").unwrap();
        assert_eq!(root.data, None);
        assert_eq!(to_string(&root).unwrap(), "{}");
    }

    #[test]
    fn test_malformed_input() {
        for input in ["", "[", r#"{"data": 5}"#, r#"{"data": {"id": "1"}}"#] {
            let err = from_str(input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Malformed, "input {input:?}");
        }
    }
}
