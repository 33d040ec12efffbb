//! Transaction and credit-card verification operations.

use super::card::CardDetails;
use super::{DEFAULT_MARKET_SEGMENT, Operation, codes};
use crate::error::ValidationError;
use crate::params::RequestParameters;

/// Arguments to verify the state of a previously submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyTransaction {
    /// Gateway-assigned transaction identifier.
    pub transaction_id: String,
    /// Order identifier of the original transaction, when known.
    pub order_id: Option<String>,
}

impl VerifyTransaction {
    /// Creates a verification request for the given transaction.
    #[must_use]
    pub fn new(transaction_id: impl Into<String>) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            order_id: None,
        }
    }
}

impl Operation for VerifyTransaction {
    fn into_params(self) -> Result<RequestParameters, ValidationError> {
        let mut params = RequestParameters::new(codes::VERIFY_TRANSACTION);
        params.insert("transactionId", self.transaction_id);
        params.insert_opt("orderId", self.order_id);
        Ok(params)
    }
}

/// Arguments to validate a credit card without charging it.
///
/// Verification always works on raw card details; storage tokens are not
/// accepted here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyCreditCard {
    /// The card under verification.
    pub card: CardDetails,
    /// Cardholder postal/zip code, e.g. `K1K1K1` or `90210`.
    pub zip: String,
    /// Cardholder street address.
    pub street: String,
    /// Card verification value. Omitted from the request when absent.
    pub cvv: Option<String>,
    /// Transaction-channel classifier; `"I"` when unset.
    pub market_segment_code: Option<String>,
    /// AVS request code; `0` when unset.
    pub avs_request_code: Option<u8>,
    /// CVV2 request code; `0` when unset.
    pub cvv2_request_code: Option<u8>,
}

impl VerifyCreditCard {
    /// Creates a verification request for the given card and address.
    #[must_use]
    pub fn new(card: CardDetails, zip: impl Into<String>, street: impl Into<String>) -> Self {
        Self {
            card,
            zip: zip.into(),
            street: street.into(),
            cvv: None,
            market_segment_code: None,
            avs_request_code: None,
            cvv2_request_code: None,
        }
    }
}

impl Operation for VerifyCreditCard {
    fn into_params(self) -> Result<RequestParameters, ValidationError> {
        let mut params = RequestParameters::new(codes::VERIFY_CREDIT_CARD);
        self.card.apply(&mut params);
        params.insert("zip", self.zip);
        params.insert("street", self.street);
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
        params.insert_opt("cvv", self.cvv);
        Ok(params)
    }
}
