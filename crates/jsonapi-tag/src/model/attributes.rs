//! Resource attributes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Error;
use crate::record::FieldValue;
use crate::validate::validate_value;

/// Member names an attributes object must never contain.
pub const RESERVED_KEYS: [&str; 2] = ["relationships", "links"];

/// Returns true if `key` may not be used as an attribute name.
pub fn is_reserved_key(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// The attributes object of a resource.
///
/// Values are stored as-is (numbers stay numbers); the reserved member names
/// `relationships` and `links` are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(Map<String, Value>);

impl Attributes {
    /// Creates an empty attributes object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an attribute, replacing any previous value under `key`.
    ///
    /// The key is checked before the value, so a reserved key fails with
    /// [`Error::ReservedKey`] whatever the value is.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Result<(), Error> {
        let key = key.into();
        if is_reserved_key(&key) {
            return Err(Error::ReservedKey { key });
        }
        let value = value.into();
        validate_value(&value)?;
        self.0.insert(key, value.into_json());
        Ok(())
    }

    /// Returns the attribute under `key`.
    pub fn get(&self, key: &str) -> Result<&Value, Error> {
        self.0.get(key).ok_or_else(|| Error::AttributeNotFound {
            key: key.to_string(),
        })
    }

    /// Returns the attribute under `key`, if present.
    pub fn get_value(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes and returns the attribute under `key`.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over attributes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Iterates over attribute names in key order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::model::Relationship;

    #[test]
    fn test_values_are_stored_as_is() {
        let mut attrs = Attributes::new();
        attrs.add("first", 84).unwrap();
        attrs.add("second", "a string").unwrap();
        attrs.add("ratio", 0.5).unwrap();
        attrs.add("tags", vec!["a", "b"]).unwrap();
        attrs.add("nothing", Option::<i64>::None).unwrap();

        assert_eq!(attrs.get("first").unwrap(), &Value::from(84));
        assert_eq!(attrs.get("second").unwrap(), &Value::from("a string"));
        assert_eq!(attrs.get("ratio").unwrap(), &Value::from(0.5));
        assert_eq!(attrs.get("tags").unwrap(), &serde_json::json!(["a", "b"]));
        assert_eq!(attrs.get("nothing").unwrap(), &Value::Null);
    }

    #[test]
    fn test_reserved_keys() {
        let mut attrs = Attributes::new();
        for key in ["links", "relationships"] {
            let err = attrs.add(key, 1).unwrap_err();
            assert_eq!(err, Error::ReservedKey { key: key.to_string() });

            // Reserved regardless of value validity.
            let err = attrs.add(key, f64::INFINITY).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ReservedKey);
        }
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_unsupported_kinds() {
        let mut attrs = Attributes::new();

        let err = attrs.add("bad", f64::NAN).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedType);

        let err = attrs.add("rel", Relationship::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedType);
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_get_missing() {
        let attrs = Attributes::new();
        assert_eq!(
            attrs.get("missing").unwrap_err(),
            Error::AttributeNotFound { key: "missing".to_string() }
        );
        assert!(attrs.get_value("missing").is_none());
    }
}
