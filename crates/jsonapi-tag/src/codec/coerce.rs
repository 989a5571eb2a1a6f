//! Coercion tables between strings, generic document values, and typed
//! fields.
//!
//! Parse failures are not errors here: they produce the zero value of the
//! target wrapped in [`Coercion::Defaulted`], and the decoder decides whether
//! that is acceptable. Kinds a table has no rule for fail with
//! [`Error::UnsupportedType`].

use serde_json::Value;

use crate::error::Error;
use crate::record::{FieldKind, FieldValue};

/// Whether a coercion parsed its input or fell back to a zero value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Coerced,
    Defaulted,
}

impl Outcome {
    /// Combines the outcomes of the elements of a composite value.
    pub fn merge(self, other: Outcome) -> Outcome {
        match (self, other) {
            (Outcome::Coerced, Outcome::Coerced) => Outcome::Coerced,
            _ => Outcome::Defaulted,
        }
    }
}

/// Result of one coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Coercion {
    /// The input was parsed into this value.
    Coerced(FieldValue),
    /// The input could not be parsed; this is the zero value of the target.
    Defaulted(FieldValue),
}

impl Coercion {
    pub fn outcome(&self) -> Outcome {
        match self {
            Coercion::Coerced(_) => Outcome::Coerced,
            Coercion::Defaulted(_) => Outcome::Defaulted,
        }
    }

    pub fn into_value(self) -> FieldValue {
        match self {
            Coercion::Coerced(v) | Coercion::Defaulted(v) => v,
        }
    }

    fn map(self, f: impl FnOnce(FieldValue) -> FieldValue) -> Coercion {
        match self {
            Coercion::Coerced(v) => Coercion::Coerced(f(v)),
            Coercion::Defaulted(v) => Coercion::Defaulted(f(v)),
        }
    }

    fn from_parse<T>(parsed: Option<T>, kind: &FieldKind, wrap: impl FnOnce(T) -> FieldValue) -> Coercion {
        match parsed {
            Some(v) => Coercion::Coerced(wrap(v)),
            None => Coercion::Defaulted(kind.zero()),
        }
    }
}

/// Accepted spellings for booleans, in the order they are documented.
const TRUE_WORDS: [&str; 6] = ["1", "t", "T", "TRUE", "true", "True"];
const FALSE_WORDS: [&str; 6] = ["0", "f", "F", "FALSE", "false", "False"];

/// Parses a boolean from one of the accepted spellings.
pub fn parse_bool(text: &str) -> Option<bool> {
    if TRUE_WORDS.contains(&text) {
        Some(true)
    } else if FALSE_WORDS.contains(&text) {
        Some(false)
    } else {
        None
    }
}

/// Returns the JSON type name of a generic value, for error messages.
pub fn json_kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// ENCODE DIRECTION
// =============================================================================

/// Renders a field value as the string used for ids, link hrefs, and
/// template slots.
///
/// Floats use the shortest round-trip scientific form (`42.0` becomes
/// `4.2E1`).
pub fn value_to_text(value: &FieldValue) -> Result<String, Error> {
    match value {
        FieldValue::Int(v) => Ok(v.to_string()),
        FieldValue::Uint(v) => Ok(v.to_string()),
        FieldValue::Float(v) => Ok(format!("{v:E}")),
        FieldValue::Bool(v) => Ok(v.to_string()),
        FieldValue::Text(v) => Ok(v.clone()),
        FieldValue::Optional(Some(inner)) => value_to_text(inner),
        FieldValue::Optional(None)
        | FieldValue::Sequence(_)
        | FieldValue::Json(_)
        | FieldValue::Relationship(_) => Err(Error::UnsupportedType {
            kind: value.kind_name(),
        }),
    }
}

// =============================================================================
// DECODE DIRECTION
// =============================================================================

/// Parses a string into a value of the given kind.
pub fn text_to_field(text: &str, kind: &FieldKind) -> Result<Coercion, Error> {
    let coercion = match kind {
        FieldKind::Int => Coercion::from_parse(text.parse::<i64>().ok(), kind, FieldValue::Int),
        FieldKind::Uint => Coercion::from_parse(text.parse::<u64>().ok(), kind, FieldValue::Uint),
        FieldKind::Float => Coercion::from_parse(text.parse::<f64>().ok(), kind, FieldValue::Float),
        FieldKind::Bool => Coercion::from_parse(parse_bool(text), kind, FieldValue::Bool),
        FieldKind::Text => Coercion::Coerced(FieldValue::Text(text.to_string())),
        FieldKind::Optional(inner) => {
            text_to_field(text, inner)?.map(|v| FieldValue::Optional(Some(Box::new(v))))
        }
        FieldKind::Json => Coercion::Coerced(FieldValue::Json(Value::String(text.to_string()))),
        FieldKind::Sequence(_) | FieldKind::Relationship => {
            return Err(Error::UnsupportedType { kind: kind.name() });
        }
    };
    Ok(coercion)
}

/// Converts a generic document value (attribute or meta member) into a value
/// of the given kind.
pub fn json_to_field(value: &Value, kind: &FieldKind) -> Result<Coercion, Error> {
    match (value, kind) {
        (_, FieldKind::Json) => Ok(Coercion::Coerced(FieldValue::Json(value.clone()))),
        (Value::Null, _) => Ok(Coercion::Coerced(kind.zero())),
        (Value::String(text), _) => text_to_field(text, kind),
        (_, FieldKind::Optional(inner)) => {
            Ok(json_to_field(value, inner)?.map(|v| FieldValue::Optional(Some(Box::new(v)))))
        }
        (Value::Number(n), _) => number_to_field(n, kind),
        (Value::Bool(b), FieldKind::Bool) => Ok(Coercion::Coerced(FieldValue::Bool(*b))),
        (Value::Array(items), FieldKind::Sequence(inner)) => {
            let mut outcome = Outcome::Coerced;
            let mut decoded = Vec::with_capacity(items.len());
            for item in items {
                let coercion = json_to_field(item, inner)?;
                outcome = outcome.merge(coercion.outcome());
                decoded.push(coercion.into_value());
            }
            let value = FieldValue::Sequence(decoded);
            Ok(match outcome {
                Outcome::Coerced => Coercion::Coerced(value),
                Outcome::Defaulted => Coercion::Defaulted(value),
            })
        }
        _ => Err(Error::UnsupportedType {
            kind: json_kind_name(value),
        }),
    }
}

// Truncated floats in `[I64_LOWER, I64_UPPER)` and `[0, U64_UPPER)` convert
// without saturating.
const I64_LOWER: f64 = -9_223_372_036_854_775_808.0;
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;
const U64_UPPER: f64 = 18_446_744_073_709_551_616.0;

fn number_to_field(n: &serde_json::Number, kind: &FieldKind) -> Result<Coercion, Error> {
    let out_of_range = |target: &'static str| Error::OutOfRange {
        target,
        value: n.to_string(),
    };

    let value = match kind {
        FieldKind::Int => {
            if let Some(v) = n.as_i64() {
                FieldValue::Int(v)
            } else if n.is_u64() {
                return Err(out_of_range("i64"));
            } else {
                let f = n.as_f64().unwrap_or_default().trunc();
                if !(I64_LOWER..I64_UPPER).contains(&f) {
                    return Err(out_of_range("i64"));
                }
                FieldValue::Int(f as i64)
            }
        }
        FieldKind::Uint => {
            if let Some(v) = n.as_u64() {
                FieldValue::Uint(v)
            } else if n.is_i64() {
                return Err(out_of_range("u64"));
            } else {
                let f = n.as_f64().unwrap_or_default().trunc();
                if !(0.0..U64_UPPER).contains(&f) {
                    return Err(out_of_range("u64"));
                }
                FieldValue::Uint(f as u64)
            }
        }
        FieldKind::Float => FieldValue::Float(n.as_f64().unwrap_or_default()),
        FieldKind::Bool => FieldValue::Bool(n.as_f64().unwrap_or_default() != 0.0),
        FieldKind::Text => match n.as_f64() {
            Some(f) if n.is_f64() => FieldValue::Text(f.to_string()),
            _ => FieldValue::Text(n.to_string()),
        },
        FieldKind::Optional(_) | FieldKind::Sequence(_) | FieldKind::Json | FieldKind::Relationship => {
            return Err(Error::UnsupportedType { kind: "number" });
        }
    };
    Ok(Coercion::Coerced(value))
}
