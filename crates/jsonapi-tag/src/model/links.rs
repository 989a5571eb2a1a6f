//! Links objects.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::model::Meta;

/// A link object with an href and optional meta information.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    #[serde(default, skip_serializing_if = "Meta::is_empty")]
    pub meta: Meta,
}

impl Link {
    /// Creates a link object pointing at `href` with empty meta.
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            meta: Meta::new(),
        }
    }
}

/// A member of a links object: either a plain href or a link object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LinkValue {
    Href(String),
    Object(Link),
}

impl LinkValue {
    /// Returns the href of either form.
    pub fn href(&self) -> &str {
        match self {
            LinkValue::Href(href) => href,
            LinkValue::Object(link) => &link.href,
        }
    }
}

/// A links object, keyed by link name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Links(BTreeMap<String, LinkValue>);

impl Links {
    /// Creates an empty links object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a plain href under `key`.
    pub fn add(&mut self, key: impl Into<String>, href: impl Into<String>) {
        self.0.insert(key.into(), LinkValue::Href(href.into()));
    }

    /// Adds a link object under `key`.
    pub fn add_object(&mut self, key: impl Into<String>, link: Link) {
        self.0.insert(key.into(), LinkValue::Object(link));
    }

    /// Returns the href of the link under `key`, whichever form it takes.
    pub fn href(&self, key: &str) -> Result<&str, Error> {
        self.0
            .get(key)
            .map(LinkValue::href)
            .ok_or_else(|| Error::LinkNotFound { key: key.to_string() })
    }

    /// Returns the meta object of the link under `key`.
    ///
    /// Plain href links have no meta object and fail with
    /// [`Error::LinkHasNoMeta`].
    pub fn link_meta(&self, key: &str) -> Result<&Meta, Error> {
        match self.0.get(key) {
            Some(LinkValue::Object(link)) => Ok(&link.meta),
            Some(LinkValue::Href(_)) => Err(Error::LinkHasNoMeta { key: key.to_string() }),
            None => Err(Error::LinkNotFound { key: key.to_string() }),
        }
    }

    /// Returns the link under `key`, if present.
    pub fn get(&self, key: &str) -> Option<&LinkValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over links in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &LinkValue)> {
        self.0.iter()
    }

    pub(crate) fn insert(&mut self, key: String, link: LinkValue) {
        self.0.insert(key, link);
    }
}
