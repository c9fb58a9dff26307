//! API request and response types.

use crate::SUCCESS_STATUS;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

// ============================================================================
// Input
// ============================================================================

/// A single element of a submitted list.
///
/// Clients are expected to send strings or `null`, but any JSON value is
/// accepted here so the summation rule can skip it instead of the whole
/// request being rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum Entry {
    Text(String),
    Null,
    Other(Value),
}

impl Entry {
    /// The string content, if this element is a string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Entry::Text(s) => Some(s),
            Entry::Null | Entry::Other(_) => None,
        }
    }
}

impl From<Value> for Entry {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Entry::Text(s),
            Value::Null => Entry::Null,
            other => Entry::Other(other),
        }
    }
}

impl From<Entry> for Value {
    fn from(entry: Entry) -> Self {
        match entry {
            Entry::Text(s) => Value::String(s),
            Entry::Null => Value::Null,
            Entry::Other(v) => v,
        }
    }
}

impl From<&str> for Entry {
    fn from(s: &str) -> Self {
        Entry::Text(s.to_string())
    }
}

impl From<Option<&str>> for Entry {
    fn from(s: Option<&str>) -> Self {
        s.map_or(Entry::Null, Entry::from)
    }
}

/// Request body for both the immediate and the deferred sum endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SumRequest {
    /// List elements; only strings made entirely of ASCII digits are summed
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<Option<String>>))]
    pub array: Vec<Entry>,
}

impl SumRequest {
    pub fn new<I, E>(items: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Entry>,
    {
        Self {
            array: items.into_iter().map(Into::into).collect(),
        }
    }
}

// ============================================================================
// Output
// ============================================================================

/// A computed sum. Also the value kept for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SumResponse {
    /// Always 200
    pub status: u16,
    /// Unbounded non-negative integer, written as a plain JSON number
    #[serde(with = "json_biguint")]
    #[cfg_attr(feature = "openapi", schema(value_type = u64))]
    pub result: BigUint,
}

impl SumResponse {
    pub fn ok(result: impl Into<BigUint>) -> Self {
        Self {
            status: SUCCESS_STATUS,
            result: result.into(),
        }
    }
}

/// (De)serializes a `BigUint` as a JSON integer of any length.
///
/// Relies on serde_json's `arbitrary_precision` so digits beyond 64 bits
/// are written and read verbatim.
mod json_biguint {
    use num_bigint::BigUint;
    use serde::de::Error as _;
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::Number;

    pub fn serialize<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        let number: Number = value.to_string().parse().map_err(S::Error::custom)?;
        number.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        let number = Number::deserialize(deserializer)?;
        let digits = number.to_string();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(D::Error::custom(format!(
                "expected a non-negative integer, got {}",
                digits
            )));
        }
        digits.parse().map_err(D::Error::custom)
    }
}

/// Response to a deferred submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SessionResponse {
    /// Always 200
    pub status: u16,
    /// Opaque identifier to pass to `/get_sum/{session_id}`
    pub session_id: String,
}

impl SessionResponse {
    pub fn ok(session_id: impl Into<String>) -> Self {
        Self {
            status: SUCCESS_STATUS,
            session_id: session_id.into(),
        }
    }
}

/// Error body returned by every failing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ErrorResponse {
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
