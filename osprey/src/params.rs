//! The flat request parameter schema.
//!
//! The gateway accepts every operation as a form-encoded mapping of string
//! keys to scalar values. [`RequestParameters`] models that mapping; it is
//! built fresh for each call by the operation types in [`crate::ops`] and
//! handed to the transport for form encoding.
//!
//! # Serialization
//!
//! The map serializes as `string → string`, with each scalar rendered in
//! its canonical wire form (decimals keep their scale, so an amount of
//! `10.00` is sent as `"10.00"`, not `"10"`).

use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Key carrying the operation's request code.
pub const REQUEST_CODE: &str = "requestCode";

/// Key carrying the sub-operation code for grouped operations.
pub const OPERATION_CODE: &str = "operationCode";

/// Key for the merchant API token. Injected by the client; caller-supplied
/// values are overwritten.
pub const API_TOKEN: &str = "apiToken";

/// Key for the merchant identifier. Injected by the client; caller-supplied
/// values are overwritten.
pub const MERCHANT_ID: &str = "merchantId";

/// A scalar value in the gateway's flat parameter schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// A free-form string value.
    Str(String),
    /// An integer value (request codes, state codes, counts).
    Int(i64),
    /// A fixed-point decimal value (monetary amounts).
    Decimal(Decimal),
}

impl Display for ParamValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Decimal(d) => write!(f, "{d}"),
        }
    }
}

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Str(s) => serializer.serialize_str(s),
            other => serializer.serialize_str(&other.to_string()),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<Decimal> for ParamValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

/// The flat parameter set for one gateway call.
///
/// Key order is irrelevant to the gateway; a sorted map is used so encoded
/// bodies are deterministic. A parameter set is built fresh per call and
/// never reused across calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParameters(BTreeMap<String, ParamValue>);

impl RequestParameters {
    /// Creates a parameter set for the given request code.
    #[must_use]
    pub fn new(request_code: &str) -> Self {
        let mut params = Self(BTreeMap::new());
        params.insert(REQUEST_CODE, request_code);
        params
    }

    /// Creates a parameter set for a grouped operation
    /// (`requestCode` + `operationCode`).
    #[must_use]
    pub fn with_operation(request_code: &str, operation_code: &str) -> Self {
        let mut params = Self::new(request_code);
        params.insert(OPERATION_CODE, operation_code);
        params
    }

    /// Inserts a parameter, replacing any existing value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Inserts a parameter only when a value is present.
    ///
    /// Absent optional fields are omitted from the request entirely, never
    /// sent as empty strings.
    pub fn insert_opt<V: Into<ParamValue>>(&mut self, key: impl Into<String>, value: Option<V>) {
        if let Some(value) = value {
            self.insert(key, value);
        }
    }

    /// Returns the value for a key, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    /// Returns `true` if the key is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the request code, if one has been set.
    #[must_use]
    pub fn request_code(&self) -> Option<&str> {
        match self.get(REQUEST_CODE) {
            Some(ParamValue::Str(code)) => Some(code),
            _ => None,
        }
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no parameters have been set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Serialize for RequestParameters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_code_is_set_on_construction() {
        let params = RequestParameters::new("singlePurchase");
        assert_eq!(params.request_code(), Some("singlePurchase"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn with_operation_sets_both_codes() {
        let params = RequestParameters::with_operation("batch", "close");
        assert_eq!(params.request_code(), Some("batch"));
        assert_eq!(
            params.get(OPERATION_CODE),
            Some(&ParamValue::Str("close".to_owned()))
        );
    }

    #[test]
    fn decimal_values_keep_their_scale() {
        let amount = Decimal::new(1000, 2);
        assert_eq!(ParamValue::from(amount).to_string(), "10.00");
    }

    #[test]
    fn insert_opt_omits_absent_values() {
        let mut params = RequestParameters::new("singlePurchase");
        params.insert_opt("cvv", None::<&str>);
        params.insert_opt("zip", Some("90210"));
        assert!(!params.contains_key("cvv"));
        assert_eq!(params.get("zip"), Some(&ParamValue::Str("90210".to_owned())));
    }

    #[test]
    fn insert_replaces_existing_values() {
        let mut params = RequestParameters::new("void");
        params.insert(API_TOKEN, "caller-supplied");
        params.insert(API_TOKEN, "canonical");
        assert_eq!(
            params.get(API_TOKEN),
            Some(&ParamValue::Str("canonical".to_owned()))
        );
    }
}
