//! Typed access to native record fields.
//!
//! The encoder and decoder never inspect a record's layout at runtime. A
//! record instead lists one tag per field ([`Record::tags`]) and hands out its
//! fields as [`Field`] trait objects by position. Each supported field type
//! implements [`FieldType`], which describes its [`FieldKind`] and converts
//! to and from the closed [`FieldValue`] sum type.
//!
//! The [`record!`](crate::record!) macro writes the `Record` impl from
//! `#[jsonapi("...")]` field annotations.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Number, Value};
use uuid::Uuid;

use crate::codec::coerce::{self, Outcome};
use crate::error::Error;
use crate::model::Relationship;

/// Shape of a field as the coercion tables see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Signed integer of any width.
    Int,
    /// Unsigned integer of any width.
    Uint,
    /// Floating point of any width.
    Float,
    Bool,
    Text,
    /// Nullable value of the inner kind.
    Optional(Box<FieldKind>),
    /// Ordered sequence of the inner kind.
    Sequence(Box<FieldKind>),
    /// A value that serializes itself to and from JSON.
    Json,
    /// An inline relationship object.
    Relationship,
}

impl FieldKind {
    /// Returns the zero value of this kind.
    pub fn zero(&self) -> FieldValue {
        match self {
            FieldKind::Int => FieldValue::Int(0),
            FieldKind::Uint => FieldValue::Uint(0),
            FieldKind::Float => FieldValue::Float(0.0),
            FieldKind::Bool => FieldValue::Bool(false),
            FieldKind::Text => FieldValue::Text(String::new()),
            FieldKind::Optional(_) => FieldValue::Optional(None),
            FieldKind::Sequence(_) => FieldValue::Sequence(Vec::new()),
            FieldKind::Json => FieldValue::Json(Value::Null),
            FieldKind::Relationship => FieldValue::Relationship(Box::default()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Int => "integer",
            FieldKind::Uint => "unsigned integer",
            FieldKind::Float => "float",
            FieldKind::Bool => "bool",
            FieldKind::Text => "text",
            FieldKind::Optional(_) => "optional",
            FieldKind::Sequence(_) => "sequence",
            FieldKind::Json => "json",
            FieldKind::Relationship => "relationship",
        }
    }
}

/// A field value in transit between a record and a document.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Text(String),
    Optional(Option<Box<FieldValue>>),
    Sequence(Vec<FieldValue>),
    /// A value that already knows its JSON form.
    Json(Value),
    Relationship(Box<Relationship>),
}

impl FieldValue {
    /// Returns the kind name of this value, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Int(_) => "integer",
            FieldValue::Uint(_) => "unsigned integer",
            FieldValue::Float(_) => "float",
            FieldValue::Bool(_) => "bool",
            FieldValue::Text(_) => "text",
            FieldValue::Optional(_) => "optional",
            FieldValue::Sequence(_) => "sequence",
            FieldValue::Json(_) => "json",
            FieldValue::Relationship(_) => "relationship",
        }
    }

    /// Returns true for an absent optional.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Optional(None))
    }

    /// Converts into the generic document value.
    ///
    /// Non-finite floats nested inside composites become `null`; top-level
    /// values are expected to have passed the value validator already.
    /// Relationships have no attribute form and also become `null`.
    pub fn into_json(self) -> Value {
        match self {
            FieldValue::Int(v) => Value::from(v),
            FieldValue::Uint(v) => Value::from(v),
            FieldValue::Float(v) => Number::from_f64(v).map_or(Value::Null, Value::Number),
            FieldValue::Bool(v) => Value::Bool(v),
            FieldValue::Text(v) => Value::String(v),
            FieldValue::Optional(None) => Value::Null,
            FieldValue::Optional(Some(inner)) => inner.into_json(),
            FieldValue::Sequence(items) => {
                Value::Array(items.into_iter().map(FieldValue::into_json).collect())
            }
            FieldValue::Json(v) => v,
            FieldValue::Relationship(_) => Value::Null,
        }
    }

    fn unsupported(&self) -> Error {
        Error::UnsupportedType {
            kind: self.kind_name(),
        }
    }
}

macro_rules! field_value_from {
    ($variant:ident as $target:ty: $($t:ty),*) => {
        $(
            impl From<$t> for FieldValue {
                fn from(v: $t) -> Self {
                    FieldValue::$variant(v as $target)
                }
            }
        )*
    };
}

field_value_from!(Int as i64: i8, i16, i32, i64, isize);
field_value_from!(Uint as u64: u8, u16, u32, u64, usize);
field_value_from!(Float as f64: f32, f64);

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl From<Value> for FieldValue {
    fn from(v: Value) -> Self {
        FieldValue::Json(v)
    }
}

impl From<Relationship> for FieldValue {
    fn from(v: Relationship) -> Self {
        FieldValue::Relationship(Box::new(v))
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        FieldValue::Optional(v.map(|inner| Box::new(inner.into())))
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(v: Vec<T>) -> Self {
        FieldValue::Sequence(v.into_iter().map(Into::into).collect())
    }
}

// =============================================================================
// FIELD TYPES
// =============================================================================

/// A Rust type that can sit in a tagged record field.
pub trait FieldType: Sized {
    /// The kind the coercion tables dispatch on.
    fn kind() -> FieldKind;

    /// Converts the field into a transit value.
    fn to_field(&self) -> Result<FieldValue, Error>;

    /// Builds the field from a transit value of its own kind.
    fn from_field(value: FieldValue) -> Result<Self, Error>;

    /// Custom parse-from-text hook. When it returns `Some`, the built-in
    /// string table is skipped.
    fn parse_text(_text: &str) -> Option<Self> {
        None
    }

    /// Decodes the field from a string (identifier ids, linkage ids, string
    /// attributes).
    fn from_text(text: &str) -> Result<(Self, Outcome), Error> {
        if let Some(value) = Self::parse_text(text) {
            return Ok((value, Outcome::Coerced));
        }
        let coercion = coerce::text_to_field(text, &Self::kind())?;
        let outcome = coercion.outcome();
        Ok((Self::from_field(coercion.into_value())?, outcome))
    }

    /// Decodes the field from a generic document value (attributes, meta).
    fn from_json(value: &Value) -> Result<(Self, Outcome), Error> {
        if let Value::String(text) = value {
            return Self::from_text(text);
        }
        let coercion = coerce::json_to_field(value, &Self::kind())?;
        let outcome = coercion.outcome();
        Ok((Self::from_field(coercion.into_value())?, outcome))
    }

    /// Decodes the field from the ids of a to-many linkage. Only sequence
    /// fields accept this.
    fn from_texts(_texts: &[&str]) -> Result<(Self, Outcome), Error> {
        Err(Error::InvalidInput {
            context: "to-many linkage requires a sequence field",
        })
    }
}

macro_rules! int_field_type {
    ($variant:ident, $wide:ty, $kind:expr; $($t:ty),*) => {
        $(
            impl FieldType for $t {
                fn kind() -> FieldKind {
                    $kind
                }

                fn to_field(&self) -> Result<FieldValue, Error> {
                    Ok(FieldValue::$variant(*self as $wide))
                }

                fn from_field(value: FieldValue) -> Result<Self, Error> {
                    match value {
                        FieldValue::$variant(v) => <$t>::try_from(v).map_err(|_| Error::OutOfRange {
                            target: stringify!($t),
                            value: v.to_string(),
                        }),
                        other => Err(other.unsupported()),
                    }
                }
            }
        )*
    };
}

int_field_type!(Int, i64, FieldKind::Int; i8, i16, i32, i64, isize);
int_field_type!(Uint, u64, FieldKind::Uint; u8, u16, u32, u64, usize);

impl FieldType for f64 {
    fn kind() -> FieldKind {
        FieldKind::Float
    }

    fn to_field(&self) -> Result<FieldValue, Error> {
        Ok(FieldValue::Float(*self))
    }

    fn from_field(value: FieldValue) -> Result<Self, Error> {
        match value {
            FieldValue::Float(v) => Ok(v),
            other => Err(other.unsupported()),
        }
    }
}

impl FieldType for f32 {
    fn kind() -> FieldKind {
        FieldKind::Float
    }

    fn to_field(&self) -> Result<FieldValue, Error> {
        Ok(FieldValue::Float(f64::from(*self)))
    }

    fn from_field(value: FieldValue) -> Result<Self, Error> {
        match value {
            FieldValue::Float(v) => Ok(v as f32),
            other => Err(other.unsupported()),
        }
    }
}

impl FieldType for bool {
    fn kind() -> FieldKind {
        FieldKind::Bool
    }

    fn to_field(&self) -> Result<FieldValue, Error> {
        Ok(FieldValue::Bool(*self))
    }

    fn from_field(value: FieldValue) -> Result<Self, Error> {
        match value {
            FieldValue::Bool(v) => Ok(v),
            other => Err(other.unsupported()),
        }
    }
}

impl FieldType for String {
    fn kind() -> FieldKind {
        FieldKind::Text
    }

    fn to_field(&self) -> Result<FieldValue, Error> {
        Ok(FieldValue::Text(self.clone()))
    }

    fn from_field(value: FieldValue) -> Result<Self, Error> {
        match value {
            FieldValue::Text(v) => Ok(v),
            other => Err(other.unsupported()),
        }
    }
}

impl<T: FieldType> FieldType for Option<T> {
    fn kind() -> FieldKind {
        FieldKind::Optional(Box::new(T::kind()))
    }

    fn to_field(&self) -> Result<FieldValue, Error> {
        match self {
            Some(inner) => Ok(FieldValue::Optional(Some(Box::new(inner.to_field()?)))),
            None => Ok(FieldValue::Optional(None)),
        }
    }

    fn from_field(value: FieldValue) -> Result<Self, Error> {
        match value {
            FieldValue::Optional(Some(inner)) => T::from_field(*inner).map(Some),
            FieldValue::Optional(None) => Ok(None),
            other => Err(other.unsupported()),
        }
    }

    fn parse_text(text: &str) -> Option<Self> {
        T::parse_text(text).map(Some)
    }

    fn from_text(text: &str) -> Result<(Self, Outcome), Error> {
        T::from_text(text).map(|(inner, outcome)| (Some(inner), outcome))
    }

    fn from_json(value: &Value) -> Result<(Self, Outcome), Error> {
        match value {
            Value::Null => Ok((None, Outcome::Coerced)),
            other => T::from_json(other).map(|(inner, outcome)| (Some(inner), outcome)),
        }
    }
}

impl<T: FieldType> FieldType for Vec<T> {
    fn kind() -> FieldKind {
        FieldKind::Sequence(Box::new(T::kind()))
    }

    fn to_field(&self) -> Result<FieldValue, Error> {
        let items = self.iter().map(T::to_field).collect::<Result<Vec<_>, _>>()?;
        Ok(FieldValue::Sequence(items))
    }

    fn from_field(value: FieldValue) -> Result<Self, Error> {
        match value {
            FieldValue::Sequence(items) => items.into_iter().map(T::from_field).collect(),
            other => Err(other.unsupported()),
        }
    }

    fn from_json(value: &Value) -> Result<(Self, Outcome), Error> {
        match value {
            Value::Array(items) => {
                let mut outcome = Outcome::Coerced;
                let mut decoded = Vec::with_capacity(items.len());
                for item in items {
                    let (element, element_outcome) = T::from_json(item)?;
                    outcome = outcome.merge(element_outcome);
                    decoded.push(element);
                }
                Ok((decoded, outcome))
            }
            Value::Null => Ok((Vec::new(), Outcome::Coerced)),
            other => Err(Error::UnsupportedType {
                kind: coerce::json_kind_name(other),
            }),
        }
    }

    fn from_texts(texts: &[&str]) -> Result<(Self, Outcome), Error> {
        let mut outcome = Outcome::Coerced;
        let mut decoded = Vec::with_capacity(texts.len());
        for text in texts {
            let (element, element_outcome) = T::from_text(text)?;
            outcome = outcome.merge(element_outcome);
            decoded.push(element);
        }
        Ok((decoded, outcome))
    }
}

impl FieldType for Value {
    fn kind() -> FieldKind {
        FieldKind::Json
    }

    fn to_field(&self) -> Result<FieldValue, Error> {
        Ok(FieldValue::Json(self.clone()))
    }

    fn from_field(value: FieldValue) -> Result<Self, Error> {
        match value {
            FieldValue::Json(v) => Ok(v),
            other => Err(other.unsupported()),
        }
    }
}

impl FieldType for Relationship {
    fn kind() -> FieldKind {
        FieldKind::Relationship
    }

    fn to_field(&self) -> Result<FieldValue, Error> {
        Ok(FieldValue::Relationship(Box::new(self.clone())))
    }

    fn from_field(value: FieldValue) -> Result<Self, Error> {
        match value {
            FieldValue::Relationship(r) => Ok(*r),
            other => Err(other.unsupported()),
        }
    }
}

/// UUIDs travel as their hyphenated text form. Unparseable text and
/// non-string values leave the nil UUID and report it as defaulted.
impl FieldType for Uuid {
    fn kind() -> FieldKind {
        FieldKind::Text
    }

    fn to_field(&self) -> Result<FieldValue, Error> {
        Ok(FieldValue::Text(self.to_string()))
    }

    fn from_field(value: FieldValue) -> Result<Self, Error> {
        match value {
            FieldValue::Text(text) => Uuid::parse_str(&text).map_err(|_| Error::InvalidInput {
                context: "invalid uuid text",
            }),
            other => Err(other.unsupported()),
        }
    }

    fn parse_text(text: &str) -> Option<Self> {
        Uuid::parse_str(text).ok()
    }

    fn from_text(text: &str) -> Result<(Self, Outcome), Error> {
        match Self::parse_text(text) {
            Some(id) => Ok((id, Outcome::Coerced)),
            None => Ok((Uuid::nil(), Outcome::Defaulted)),
        }
    }

    fn from_json(value: &Value) -> Result<(Self, Outcome), Error> {
        match value {
            Value::String(text) => Self::from_text(text),
            Value::Null => Ok((Uuid::nil(), Outcome::Coerced)),
            _ => Ok((Uuid::nil(), Outcome::Defaulted)),
        }
    }
}

/// Wraps any serde type so it can be stored as a composite attribute or
/// meta member. Its JSON form comes from its own `Serialize` impl.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Json<T>(pub T);

impl<T> FieldType for Json<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    fn kind() -> FieldKind {
        FieldKind::Json
    }

    fn to_field(&self) -> Result<FieldValue, Error> {
        Ok(FieldValue::Json(serde_json::to_value(&self.0)?))
    }

    fn from_field(value: FieldValue) -> Result<Self, Error> {
        match value {
            // `null` is the zero value; types that cannot read it fall back
            // to their default.
            FieldValue::Json(Value::Null) => Ok(Json(serde_json::from_value(Value::Null).unwrap_or_default())),
            FieldValue::Json(v) => Ok(Json(serde_json::from_value(v)?)),
            other => Err(other.unsupported()),
        }
    }
}

// =============================================================================
// RECORDS
// =============================================================================

/// Object-safe view of a record field used by the encoder and decoder.
///
/// Implemented for every [`FieldType`].
pub trait Field {
    fn field_kind(&self) -> FieldKind;

    /// Reads the field as a transit value.
    fn value(&self) -> Result<FieldValue, Error>;

    /// Overwrites the field from a string.
    fn assign_text(&mut self, text: &str) -> Result<Outcome, Error>;

    /// Overwrites the field from a generic document value.
    fn assign_json(&mut self, value: &Value) -> Result<Outcome, Error>;

    /// Clears and repopulates a sequence field from linkage ids.
    fn assign_texts(&mut self, texts: &[&str]) -> Result<Outcome, Error>;
}

impl<T: FieldType> Field for T {
    fn field_kind(&self) -> FieldKind {
        T::kind()
    }

    fn value(&self) -> Result<FieldValue, Error> {
        self.to_field()
    }

    fn assign_text(&mut self, text: &str) -> Result<Outcome, Error> {
        let (value, outcome) = T::from_text(text)?;
        *self = value;
        Ok(outcome)
    }

    fn assign_json(&mut self, value: &Value) -> Result<Outcome, Error> {
        let (value, outcome) = T::from_json(value)?;
        *self = value;
        Ok(outcome)
    }

    fn assign_texts(&mut self, texts: &[&str]) -> Result<Outcome, Error> {
        let (value, outcome) = T::from_texts(texts)?;
        *self = value;
        Ok(outcome)
    }
}

/// A native record the engine can encode and decode.
///
/// `tags()` lists one annotation per field in declaration order; `field` and
/// `field_mut` return the field at the same position. Usually written by the
/// [`record!`](crate::record!) macro.
pub trait Record: Default {
    fn tags() -> &'static [&'static str];

    fn field(&self, index: usize) -> Option<&dyn Field>;

    fn field_mut(&mut self, index: usize) -> Option<&mut dyn Field>;
}

/// Declares a struct and implements [`Record`] for it from `#[jsonapi]`
/// field annotations.
///
/// The `#[jsonapi("...")]` annotation must be the first attribute of each
/// field; any attributes after it (doc comments, serde attributes) are kept.
///
/// ```rust
/// jsonapi_tag::record! {
///     #[derive(Debug, Default, Clone, PartialEq)]
///     pub struct Article {
///         #[jsonapi("identifier,articles")]
///         pub id: u64,
///         #[jsonapi("attribute,title")]
///         pub title: String,
///         #[jsonapi("relationship,author,data,people")]
///         pub author: Option<u64>,
///     }
/// }
///
/// let root = jsonapi_tag::encode(&Article { id: 1, title: "Hi".into(), author: Some(9) }).unwrap();
/// let mut article = Article::default();
/// jsonapi_tag::decode(&root, &mut article).unwrap();
/// assert_eq!(article.author, Some(9));
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident {
            $(
                #[jsonapi($tag:literal)]
                $(#[$field_attr:meta])*
                $field_vis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$attr])*
        $vis struct $name {
            $(
                $(#[$field_attr])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::Record for $name {
            fn tags() -> &'static [&'static str] {
                &[$($tag),*]
            }

            fn field(&self, index: usize) -> ::core::option::Option<&dyn $crate::Field> {
                let fields = [$(&self.$field as &dyn $crate::Field),*];
                fields.into_iter().nth(index)
            }

            fn field_mut(&mut self, index: usize) -> ::core::option::Option<&mut dyn $crate::Field> {
                let fields = [$(&mut self.$field as &mut dyn $crate::Field),*];
                fields.into_iter().nth(index)
            }
        }
    };
}
