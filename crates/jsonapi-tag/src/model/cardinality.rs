//! Cardinality of one-or-many containers.

use std::fmt;

/// Whether a container holds exactly one element or an ordered collection.
///
/// `One`/`Many` apply to [`Resources`](crate::model::Resources),
/// `ToOne`/`ToMany` to [`ResourceLinkage`](crate::model::ResourceLinkage).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    One,
    Many,
    ToOne,
    ToMany,
}

impl Cardinality {
    /// Returns true for the single-element cardinalities.
    pub fn is_single(&self) -> bool {
        matches!(self, Cardinality::One | Cardinality::ToOne)
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Cardinality::One => "one",
            Cardinality::Many => "many",
            Cardinality::ToOne => "to-one",
            Cardinality::ToMany => "to-many",
        })
    }
}
