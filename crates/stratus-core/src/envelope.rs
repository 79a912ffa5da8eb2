//! Read-only envelopes over decoded JSON response bodies.
//!
//! The server's responses are loosely shaped: snake_case keys, booleans
//! spelled as `"0"`/`"1"` or real booleans, numbers that arrive as strings,
//! and fields that are absent or `null` depending on the endpoint. Rather
//! than one bespoke parsing routine per resource, an [`Envelope`] wraps the
//! decoded value and exposes named, typed accessors that fail predictably:
//! an absent field is [`EnvelopeError::MissingField`], a present field of the
//! wrong type is [`EnvelopeError::WrongShape`]. Binary download bodies never
//! pass through an envelope.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::error::EnvelopeError;

/// Typed, read-only wrapper over a decoded JSON value.
///
/// Immutable after construction; no accessor mutates the underlying value.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    value: Value,
}

impl Envelope {
    /// Wrap an already-decoded value (object, array, or scalar).
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    /// Decode a raw response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::InvalidJson`] if the body does not parse.
    pub fn from_slice(body: &[u8]) -> Result<Self, EnvelopeError> {
        let value =
            serde_json::from_slice(body).map_err(|e| EnvelopeError::InvalidJson(e.to_string()))?;
        Ok(Self::new(value))
    }

    /// The wrapped value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Unwrap the value.
    pub fn into_value(self) -> Value {
        self.value
    }

    /// Raw access to a named field, if present.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.value.get(field)
    }

    fn require(&self, field: &str) -> Result<&Value, EnvelopeError> {
        self.get(field)
            .ok_or_else(|| EnvelopeError::MissingField(field.to_string()))
    }

    /// A field that must be present, in whatever shape the server sent it.
    pub fn value_field(&self, field: &str) -> Result<&Value, EnvelopeError> {
        self.require(field)
    }

    /// A field that is documented nullable; absent and `null` both map to
    /// `None`.
    pub fn opt_value_field(&self, field: &str) -> Result<Option<&Value>, EnvelopeError> {
        match self.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => Ok(Some(value)),
        }
    }

    /// A string field.
    pub fn str_field(&self, field: &str) -> Result<&str, EnvelopeError> {
        match self.require(field)? {
            Value::String(s) => Ok(s),
            _ => Err(EnvelopeError::wrong_shape(field, "string")),
        }
    }

    /// A scalar field in textual form; the server emits identifiers both as
    /// strings and as bare numbers.
    pub fn text_field(&self, field: &str) -> Result<String, EnvelopeError> {
        match self.require(field)? {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            _ => Err(EnvelopeError::wrong_shape(field, "string or number")),
        }
    }

    /// Nullable variant of [`Envelope::text_field`].
    pub fn opt_text_field(&self, field: &str) -> Result<Option<String>, EnvelopeError> {
        match self.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(_) => self.text_field(field).map(Some),
        }
    }

    /// A boolean field, tolerating the server's loose spellings: real
    /// booleans, `0`/`1` numbers, and `"0"`/`"1"`/`"true"`/`"false"` strings.
    pub fn bool_field(&self, field: &str) -> Result<bool, EnvelopeError> {
        match self.require(field)? {
            Value::Bool(b) => Ok(*b),
            Value::Number(n) => match n.as_i64() {
                Some(0) => Ok(false),
                Some(1) => Ok(true),
                _ => Err(EnvelopeError::wrong_shape(field, "boolean")),
            },
            Value::String(s) => match s.as_str() {
                "0" | "false" => Ok(false),
                "1" | "true" => Ok(true),
                _ => Err(EnvelopeError::wrong_shape(field, "boolean")),
            },
            _ => Err(EnvelopeError::wrong_shape(field, "boolean")),
        }
    }

    /// An unsigned integer field, as a number or numeric string.
    pub fn u64_field(&self, field: &str) -> Result<u64, EnvelopeError> {
        match self.require(field)? {
            Value::Number(n) => n
                .as_u64()
                .ok_or_else(|| EnvelopeError::wrong_shape(field, "unsigned integer")),
            Value::String(s) => s
                .parse()
                .map_err(|_| EnvelopeError::wrong_shape(field, "unsigned integer")),
            _ => Err(EnvelopeError::wrong_shape(field, "unsigned integer")),
        }
    }

    /// Nullable variant of [`Envelope::u64_field`].
    pub fn opt_u64_field(&self, field: &str) -> Result<Option<u64>, EnvelopeError> {
        match self.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(_) => self.u64_field(field).map(Some),
        }
    }

    /// A unix-seconds timestamp field, as a number or numeric string.
    pub fn timestamp_field(&self, field: &str) -> Result<DateTime<Utc>, EnvelopeError> {
        let seconds = match self.require(field)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
        .ok_or_else(|| EnvelopeError::wrong_shape(field, "unix timestamp"))?;

        Utc.timestamp_opt(seconds, 0)
            .single()
            .ok_or_else(|| EnvelopeError::wrong_shape(field, "unix timestamp"))
    }

    /// A UUID field.
    pub fn uuid_field(&self, field: &str) -> Result<Uuid, EnvelopeError> {
        Uuid::parse_str(self.str_field(field)?)
            .map_err(|_| EnvelopeError::wrong_shape(field, "uuid string"))
    }

    /// An array-of-scalars field, each element in textual form.
    pub fn text_array_field(&self, field: &str) -> Result<Vec<String>, EnvelopeError> {
        match self.require(field)? {
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.clone()),
                    Value::Number(n) => Ok(n.to_string()),
                    _ => Err(EnvelopeError::wrong_shape(field, "array of strings")),
                })
                .collect(),
            _ => Err(EnvelopeError::wrong_shape(field, "array of strings")),
        }
    }
}

/// A typed view over an envelope for one resource kind.
///
/// Each resource designates a primary field whose value stands in for the
/// whole record in textual contexts. The contract is an explicit accessor,
/// [`Resource::primary_value`], so call sites stay visible.
pub trait Resource: From<Envelope> {
    /// Field designated as the textual form of this resource.
    const PRIMARY_FIELD: &'static str;

    /// The wrapped envelope.
    fn envelope(&self) -> &Envelope;

    /// The primary field as text. Listing endpoints that return bare
    /// identifiers yield scalar envelopes, which are their own primary value.
    fn primary_value(&self) -> Result<String, EnvelopeError> {
        match self.envelope().value() {
            Value::String(s) => Ok(s.clone()),
            _ => self.envelope().text_field(Self::PRIMARY_FIELD),
        }
    }
}

/// Ordered sequence of envelopes of one resource kind.
///
/// Iteration follows server-supplied order and is restartable: iterating
/// twice yields the same sequence.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T: From<Envelope>> Collection<T> {
    /// Wrap an array-shaped body, one child envelope per element.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::WrongShape`] if the body is not an array.
    pub fn from_value(value: Value) -> Result<Self, EnvelopeError> {
        match value {
            Value::Array(elements) => Ok(Self {
                items: elements
                    .into_iter()
                    .map(|element| T::from(Envelope::new(element)))
                    .collect(),
            }),
            _ => Err(EnvelopeError::wrong_shape("<body>", "array")),
        }
    }
}

impl<T> Collection<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
