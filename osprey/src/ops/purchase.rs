//! Single purchase, void, and refund operations.

use rust_decimal::Decimal;

use super::card::{CardDetails, CardSource};
use super::{DEFAULT_MARKET_SEGMENT, Operation, codes};
use crate::error::ValidationError;
use crate::params::RequestParameters;

/// Arguments for a single purchase.
///
/// The card is referenced either by raw details or by a storage token;
/// exactly one of the two must be supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SinglePurchase {
    /// Merchant-assigned order identifier, unique per purchase.
    pub order_id: String,
    /// Purchase amount in major currency units.
    pub amount: Decimal,
    /// Raw card details; mutually exclusive with `storage_token_id`.
    pub card: Option<CardDetails>,
    /// Storage token referencing a stored card profile; mutually exclusive
    /// with `card`.
    pub storage_token_id: Option<String>,
    /// Card verification value. Omitted from the request when absent.
    pub cvv: Option<String>,
    /// Cardholder postal/zip code for address verification.
    pub zip: Option<String>,
    /// Cardholder street address for address verification.
    pub street: Option<String>,
    /// Transaction-channel classifier; `"I"` when unset.
    pub market_segment_code: Option<String>,
    /// AVS request code; `0` when unset.
    pub avs_request_code: Option<u8>,
    /// CVV2 request code; `0` when unset.
    pub cvv2_request_code: Option<u8>,
}

impl SinglePurchase {
    /// Creates a purchase for the given order and amount. The card
    /// reference is filled in through the struct fields.
    #[must_use]
    pub fn new(order_id: impl Into<String>, amount: Decimal) -> Self {
        Self {
            order_id: order_id.into(),
            amount,
            ..Self::default()
        }
    }

    /// References the card by raw details.
    #[must_use]
    pub fn with_card(mut self, card: CardDetails) -> Self {
        self.card = Some(card);
        self
    }

    /// References the card by storage token.
    #[must_use]
    pub fn with_storage_token(mut self, storage_token_id: impl Into<String>) -> Self {
        self.storage_token_id = Some(storage_token_id.into());
        self
    }
}

impl Operation for SinglePurchase {
    fn into_params(self) -> Result<RequestParameters, ValidationError> {
        let source = CardSource::resolve(self.card, self.storage_token_id)?;
        let mut params = RequestParameters::new(codes::SINGLE_PURCHASE);
        params.insert("orderId", self.order_id);
        params.insert("amount", self.amount);
        source.apply(&mut params);
        params.insert_opt("cvv", self.cvv);
        params.insert_opt("zip", self.zip);
        params.insert_opt("street", self.street);
        params.insert(
            "marketSegmentCode",
            self.market_segment_code
                .unwrap_or_else(|| DEFAULT_MARKET_SEGMENT.to_owned()),
        );
        params.insert(
            "avsRequestCode",
            i64::from(self.avs_request_code.unwrap_or(0)),
        );
        params.insert(
            "cvv2RequestCode",
            i64::from(self.cvv2_request_code.unwrap_or(0)),
        );
        Ok(params)
    }
}

/// Arguments to void a previously approved transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Void {
    /// Gateway-assigned transaction identifier.
    pub transaction_id: String,
    /// Order identifier of the original purchase.
    pub order_id: String,
}

impl Operation for Void {
    fn into_params(self) -> Result<RequestParameters, ValidationError> {
        let mut params = RequestParameters::new(codes::VOID);
        params.insert("transactionId", self.transaction_id);
        params.insert("orderId", self.order_id);
        Ok(params)
    }
}

/// Arguments to refund a settled purchase, in full or in part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refund {
    /// Gateway-assigned transaction identifier.
    pub transaction_id: String,
    /// Order identifier of the original purchase.
    pub order_id: String,
    /// Amount to refund.
    pub amount: Decimal,
}

impl Operation for Refund {
    fn into_params(self) -> Result<RequestParameters, ValidationError> {
        let mut params = RequestParameters::new(codes::REFUND);
        params.insert("transactionId", self.transaction_id);
        params.insert("orderId", self.order_id);
        params.insert("amount", self.amount);
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamValue;

    fn test_card() -> CardDetails {
        CardDetails::new("4111111111111111", "2512").unwrap()
    }

    #[test]
    fn purchase_applies_documented_defaults() {
        let params = SinglePurchase::new("ORD1", Decimal::new(1000, 2))
            .with_card(test_card())
            .into_params()
            .unwrap();

        assert_eq!(params.request_code(), Some(super::codes::SINGLE_PURCHASE));
        assert_eq!(params.get("marketSegmentCode"), Some(&ParamValue::from("I")));
        assert_eq!(params.get("avsRequestCode"), Some(&ParamValue::Int(0)));
        assert_eq!(params.get("cvv2RequestCode"), Some(&ParamValue::Int(0)));
        assert_eq!(
            params.get("amount"),
            Some(&ParamValue::Decimal(Decimal::new(1000, 2)))
        );
        assert!(!params.contains_key("cvv"));
    }

    #[test]
    fn purchase_with_both_card_references_fails_validation() {
        let err = SinglePurchase::new("ORD1", Decimal::ONE)
            .with_card(test_card())
            .with_storage_token("tok-1")
            .into_params()
            .unwrap_err();
        assert_eq!(err, ValidationError::AmbiguousCardSource);
    }

    #[test]
    fn purchase_with_no_card_reference_fails_validation() {
        let err = SinglePurchase::new("ORD1", Decimal::ONE)
            .into_params()
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingCardSource);
    }

    #[test]
    fn purchase_by_storage_token_omits_card_fields() {
        let params = SinglePurchase::new("ORD1", Decimal::ONE)
            .with_storage_token("tok-1")
            .into_params()
            .unwrap();
        assert_eq!(params.get("storageTokenId"), Some(&ParamValue::from("tok-1")));
        assert!(!params.contains_key("creditCardNumber"));
        assert!(!params.contains_key("expiryDate"));
    }

    #[test]
    fn void_and_refund_carry_their_identifiers() {
        let void = Void {
            transaction_id: "555".to_owned(),
            order_id: "ORD1".to_owned(),
        }
        .into_params()
        .unwrap();
        assert_eq!(void.request_code(), Some(super::codes::VOID));
        assert_eq!(void.get("transactionId"), Some(&ParamValue::from("555")));

        let refund = Refund {
            transaction_id: "555".to_owned(),
            order_id: "ORD1".to_owned(),
            amount: Decimal::new(250, 2),
        }
        .into_params()
        .unwrap();
        assert_eq!(refund.request_code(), Some(super::codes::REFUND));
        assert_eq!(
            refund.get("amount"),
            Some(&ParamValue::Decimal(Decimal::new(250, 2)))
        );
    }
}
