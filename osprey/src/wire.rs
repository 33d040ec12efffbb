//! Decoder for the gateway's line-oriented response format.
//!
//! The gateway responds with a newline-separated sequence of `key=value`
//! ASCII records. Values carry no escaping; the gateway contract is that
//! neither keys nor values contain `=` or newlines. The literal tokens
//! `true` and `false` (case-sensitive) are coerced to booleans, every
//! other value is kept as a string.
//!
//! # Trailing newline
//!
//! A well-formed body ends with a single `\n`, leaving one empty segment
//! after the final record. [`decode`] discards exactly that one segment,
//! and only when the terminator is present: a body without a trailing
//! newline keeps its final record instead of silently dropping it.
//!
//! # Round-tripping
//!
//! [`encode`] followed by [`decode`] reproduces the original mapping, with
//! one documented exception: string values that are exactly `"true"` or
//! `"false"` come back as booleans, so the codec is not invertible for
//! those two literals.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Response field carrying the gateway status: the literal success token
/// on success, an error code otherwise.
pub const ERROR_MESSAGE: &str = "ERROR_MESSAGE";

/// Response field carrying the gateway's human-readable diagnostic text.
pub const DEBUG_MESSAGE: &str = "DEBUG_MESSAGE";

/// The literal status token reported on success.
pub const SUCCESS: &str = "SUCCESS";

/// A decoded scalar from a gateway response record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A string value.
    Str(String),
    /// A boolean, coerced from the literal tokens `true` / `false`.
    Bool(bool),
}

impl Value {
    /// Returns the string value, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Bool(_) => None,
        }
    }

    /// Returns the boolean value, if this is a boolean.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Str(_) => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Errors for structurally invalid response bodies.
///
/// These indicate a violation of the gateway's wire contract, as opposed
/// to a gateway-reported business error. Malformed records fail the call;
/// they are never silently skipped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    /// A record contained no `=` separator.
    #[error("record {index} has no '=' separator: {record:?}")]
    MissingSeparator {
        /// Zero-based record index within the body.
        index: usize,
        /// The offending record text.
        record: String,
    },

    /// A record's key was empty.
    #[error("record {index} has an empty key: {record:?}")]
    EmptyKey {
        /// Zero-based record index within the body.
        index: usize,
        /// The offending record text.
        record: String,
    },

    /// A record's value contained a second `=`.
    #[error("record {index} has more than one '=' separator: {record:?}")]
    ExtraSeparator {
        /// Zero-based record index within the body.
        index: usize,
        /// The offending record text.
        record: String,
    },

    /// The body decoded cleanly but carried no `ERROR_MESSAGE` field, so
    /// success cannot be determined.
    #[error("response is missing the ERROR_MESSAGE status field")]
    MissingStatus,
}

/// A decoded gateway response: field name to scalar value.
///
/// Produced by [`decode`], which guarantees the [`ERROR_MESSAGE`] status
/// field is present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedResponse(BTreeMap<String, Value>);

impl DecodedResponse {
    /// Returns the value for a field, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the string value for a field, if present and a string.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Returns the boolean value for a field, if present and a boolean.
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(Value::as_bool)
    }

    /// Returns the gateway status field: the success token or an error code.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.get_str(ERROR_MESSAGE)
    }

    /// Returns `true` if the status field equals the literal success token.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status() == Some(SUCCESS)
    }

    /// Returns the gateway's diagnostic message field, if present.
    #[must_use]
    pub fn debug_message(&self) -> Option<&str> {
        self.get_str(DEBUG_MESSAGE)
    }

    /// Returns the number of decoded fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no fields were decoded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, Value)> for DecodedResponse {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Decodes a raw response body into a [`DecodedResponse`].
///
/// # Errors
///
/// Returns [`WireError`] when a record is malformed or the decoded body
/// lacks the [`ERROR_MESSAGE`] status field.
pub fn decode(body: &str) -> Result<DecodedResponse, WireError> {
    let body = body.strip_suffix('\n').unwrap_or(body);
    if body.is_empty() {
        return Err(WireError::MissingStatus);
    }

    let mut fields = BTreeMap::new();
    for (index, record) in body.split('\n').enumerate() {
        let Some((key, value)) = record.split_once('=') else {
            return Err(WireError::MissingSeparator {
                index,
                record: record.to_owned(),
            });
        };
        if key.is_empty() {
            return Err(WireError::EmptyKey {
                index,
                record: record.to_owned(),
            });
        }
        if value.contains('=') {
            return Err(WireError::ExtraSeparator {
                index,
                record: record.to_owned(),
            });
        }
        let value = match value {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            other => Value::Str(other.to_owned()),
        };
        fields.insert(key.to_owned(), value);
    }

    if !fields.contains_key(ERROR_MESSAGE) {
        return Err(WireError::MissingStatus);
    }
    Ok(DecodedResponse(fields))
}

/// Encodes a response mapping as `key=value` records with a trailing newline.
///
/// The inverse of [`decode`] except for the boolean literals (see the
/// module docs on round-tripping).
#[must_use]
pub fn encode(response: &DecodedResponse) -> String {
    let mut body = String::new();
    for (key, value) in response.iter() {
        body.push_str(key);
        body.push('=');
        body.push_str(&value.to_string());
        body.push('\n');
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_strings_and_booleans() {
        let decoded = decode("ERROR_MESSAGE=SUCCESS\nAPPROVED=true\n").unwrap();
        assert_eq!(decoded.status(), Some("SUCCESS"));
        assert_eq!(decoded.get_bool("APPROVED"), Some(true));
        assert!(decoded.is_success());
    }

    #[test]
    fn boolean_coercion_is_case_sensitive() {
        let decoded = decode("ERROR_MESSAGE=SUCCESS\nAPPROVED=TRUE\n").unwrap();
        assert_eq!(decoded.get_str("APPROVED"), Some("TRUE"));
        assert_eq!(decoded.get_bool("APPROVED"), None);
    }

    #[test]
    fn discards_exactly_one_trailing_empty_segment() {
        // A second empty segment is a malformed record, not discardable.
        let err = decode("ERROR_MESSAGE=SUCCESS\n\n").unwrap_err();
        assert!(matches!(err, WireError::MissingSeparator { index: 1, .. }));
    }

    #[test]
    fn keeps_final_record_without_trailing_newline() {
        let decoded = decode("ERROR_MESSAGE=SUCCESS\nTRANSACTIONID=555").unwrap();
        assert_eq!(decoded.get_str("TRANSACTIONID"), Some("555"));
    }

    #[test]
    fn record_without_separator_is_an_error() {
        let err = decode("ERROR_MESSAGE=SUCCESS\ngarbage\n").unwrap_err();
        assert_eq!(
            err,
            WireError::MissingSeparator {
                index: 1,
                record: "garbage".to_owned(),
            }
        );
    }

    #[test]
    fn record_with_extra_separator_is_an_error() {
        let err = decode("ERROR_MESSAGE=SUCCESS\nKEY=a=b\n").unwrap_err();
        assert!(matches!(err, WireError::ExtraSeparator { index: 1, .. }));
    }

    #[test]
    fn record_with_empty_key_is_an_error() {
        let err = decode("ERROR_MESSAGE=SUCCESS\n=value\n").unwrap_err();
        assert!(matches!(err, WireError::EmptyKey { index: 1, .. }));
    }

    #[test]
    fn empty_body_is_missing_status() {
        assert_eq!(decode(""), Err(WireError::MissingStatus));
        assert_eq!(decode("\n"), Err(WireError::MissingStatus));
    }

    #[test]
    fn body_without_status_field_is_an_error() {
        assert_eq!(decode("TRANSACTIONID=555\n"), Err(WireError::MissingStatus));
    }

    #[test]
    fn encode_then_decode_round_trips() {
        let original: DecodedResponse = [
            ("ERROR_MESSAGE".to_owned(), Value::from("SUCCESS")),
            ("APPROVED".to_owned(), Value::from(true)),
            ("TRANSACTIONID".to_owned(), Value::from("555")),
        ]
        .into_iter()
        .collect();
        assert_eq!(decode(&encode(&original)).unwrap(), original);
    }

    #[test]
    fn round_trip_coerces_boolean_literal_strings() {
        // Not invertible for the two boolean literals: the string "true"
        // comes back as a boolean.
        let original: DecodedResponse = [
            ("ERROR_MESSAGE".to_owned(), Value::from("SUCCESS")),
            ("FLAG".to_owned(), Value::from("true")),
        ]
        .into_iter()
        .collect();
        let decoded = decode(&encode(&original)).unwrap();
        assert_eq!(decoded.get_bool("FLAG"), Some(true));
    }
}
