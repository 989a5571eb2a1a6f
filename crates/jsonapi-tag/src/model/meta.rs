//! Free-form meta objects.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Error;
use crate::record::FieldValue;
use crate::validate::validate_value;

/// A meta object: non-standard information keyed by member name.
///
/// Every value inserted through [`Meta::add`] must pass the value validator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meta(Map<String, Value>);

impl Meta {
    /// Creates an empty meta object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a member, replacing any previous value under `key`.
    ///
    /// Fails with an unsupported-type error if the value is not representable.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Result<(), Error> {
        let value = value.into();
        validate_value(&value)?;
        self.0.insert(key.into(), value.into_json());
        Ok(())
    }

    /// Returns the member under `key`.
    pub fn get(&self, key: &str) -> Result<&Value, Error> {
        self.0.get(key).ok_or_else(|| Error::MetaNotFound {
            key: key.to_string(),
        })
    }

    /// Returns the member under `key`, if present.
    pub fn get_value(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Removes and returns the member under `key`.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over members in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub(crate) fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub(crate) fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_add_and_get() {
        let mut meta = Meta::new();
        meta.add("count", 3).unwrap();
        meta.add("label", "three").unwrap();

        assert_eq!(meta.get("count").unwrap(), &Value::from(3));
        assert_eq!(meta.get("label").unwrap(), &Value::from("three"));
        assert_eq!(meta.len(), 2);
    }

    #[test]
    fn test_get_missing() {
        let meta = Meta::new();
        let err = meta.get("nope").unwrap_err();
        assert_eq!(err, Error::MetaNotFound { key: "nope".to_string() });
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_rejects_unrepresentable() {
        let mut meta = Meta::new();
        let err = meta.add("ratio", f64::NAN).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedType);
        assert!(meta.is_empty());
    }
}
