//! Card references shared across operations.

use crate::error::ValidationError;
use crate::params::RequestParameters;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A card expiry date in the gateway's `YYMM` form.
///
/// Kept as a validated four-digit string: an integer representation would
/// drop the leading zero of expiries like `0107`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiryDate(String);

impl ExpiryDate {
    /// Validates and wraps a `YYMM` expiry date.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidExpiryDate`] unless the input is
    /// exactly four ASCII digits.
    pub fn new(expiry: impl Into<String>) -> Result<Self, ValidationError> {
        let expiry = expiry.into();
        if expiry.len() == 4 && expiry.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(expiry))
        } else {
            Err(ValidationError::InvalidExpiryDate(expiry))
        }
    }

    /// Returns the expiry as its four-digit string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ExpiryDate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Display for ExpiryDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw card details: the primary account number plus its expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDetails {
    /// The card number (PAN).
    pub number: String,
    /// The card expiry date.
    pub expiry: ExpiryDate,
}

impl CardDetails {
    /// Creates card details from a PAN and a `YYMM` expiry.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidExpiryDate`] when the expiry is
    /// not four ASCII digits.
    pub fn new(number: impl Into<String>, expiry: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            number: number.into(),
            expiry: ExpiryDate::new(expiry)?,
        })
    }

    pub(crate) fn apply(&self, params: &mut RequestParameters) {
        params.insert("creditCardNumber", self.number.clone());
        params.insert("expiryDate", self.expiry.as_str());
    }
}

/// Resolved card reference: raw details or a stored profile, never both.
pub(crate) enum CardSource {
    Card(CardDetails),
    StorageToken(String),
}

impl CardSource {
    /// Resolves an operation's optional card fields into exactly one
    /// source. Supplying both or neither fails validation.
    pub(crate) fn resolve(
        card: Option<CardDetails>,
        storage_token_id: Option<String>,
    ) -> Result<Self, ValidationError> {
        match (card, storage_token_id) {
            (Some(_), Some(_)) => Err(ValidationError::AmbiguousCardSource),
            (None, None) => Err(ValidationError::MissingCardSource),
            (Some(card), None) => Ok(Self::Card(card)),
            (None, Some(token)) => Ok(Self::StorageToken(token)),
        }
    }

    pub(crate) fn apply(&self, params: &mut RequestParameters) {
        match self {
            Self::Card(card) => card.apply(params),
            Self::StorageToken(token) => params.insert("storageTokenId", token.clone()),
        }
    }
}
