//! Gateway error-code taxonomy and local validation errors.
//!
//! The gateway reports failures through the `ERROR_MESSAGE` response field,
//! which carries one of a closed set of codes (`C001_TIMED_OUT`,
//! `C100_INVALID_MERCHANT_CREDENTIALS`, ...). [`GatewayError`] binds each
//! known code to a variant; codes outside the table fall back to
//! [`GatewayError::Generic`] so new gateway codes degrade gracefully
//! instead of failing to classify.
//!
//! The variant message is sourced from the response's `DEBUG_MESSAGE`
//! field, falling back to the raw code when that field is absent.

use crate::wire::DecodedResponse;

/// Local argument-validation failures, raised before any network access.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Both raw card details and a storage token were supplied.
    #[error("supply either card details or a storage token, not both")]
    AmbiguousCardSource,

    /// Neither raw card details nor a storage token was supplied.
    #[error("either card details or a storage token is required")]
    MissingCardSource,

    /// Expiry dates are exactly four ASCII digits, `YYMM`.
    #[error("invalid expiry date {0:?}: expected four digits (YYMM)")]
    InvalidExpiryDate(String),

    /// The API token was missing or empty at client construction.
    #[error("an API token is required")]
    MissingApiToken,

    /// The merchant id was missing or empty at client construction.
    #[error("a merchant id is required")]
    MissingMerchantId,
}

/// A gateway-reported business error.
///
/// One variant per code in the gateway's fixed error table, each carrying
/// the gateway's human-readable message, plus [`GatewayError::Generic`]
/// for unrecognized codes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The gateway timed out processing the request.
    #[error("C001_TIMED_OUT: {0}")]
    TimedOut(String),
    /// The gateway encountered an internal error.
    #[error("C002_SYSTEM_ERROR: {0}")]
    SystemError(String),
    /// The gateway could not reach a downstream network peer.
    #[error("C003_NETWORK_ERROR: {0}")]
    NetworkError(String),
    /// The gateway rejected the request parameters.
    #[error("C004_VALIDATION_ERROR: {0}")]
    Validation(String),
    /// The transaction was declined.
    #[error("C005_DECLINED: {0}")]
    Declined(String),
    /// The merchant credentials were rejected.
    #[error("C100_INVALID_MERCHANT_CREDENTIALS: {0}")]
    InvalidMerchantCredentials(String),
    /// The amount is outside the permitted bounds.
    #[error("C101_AMOUNT_OUT_OF_BOUNDS: {0}")]
    AmountOutOfBounds(String),
    /// The referenced purchase is invalid.
    #[error("C102_INVALID_PURCHASE: {0}")]
    InvalidPurchase(String),
    /// The referenced transaction is invalid.
    #[error("C103_INVALID_TRANSACTION: {0}")]
    InvalidTransaction(String),
    /// The purchase is not in a refundable state.
    #[error("C104_PURCHASE_NOT_IN_REFUNDABLE_STATE: {0}")]
    PurchaseNotInRefundableState(String),
    /// The refund amount exceeds what the purchase allows.
    #[error("C105_PURCHASE_REFUND_AMOUNT_OVER_LIMIT: {0}")]
    PurchaseRefundAmountOverLimit(String),
    /// The transaction can no longer be voided.
    #[error("C106_TRANSACTION_NOT_VOIDABLE: {0}")]
    TransactionNotVoidable(String),
    /// The gateway denied the request.
    #[error("C107_REQUEST_DENIED: {0}")]
    RequestDenied(String),
    /// The order id has already been used.
    #[error("C108_ORDER_ID_ALREADY_EXIST: {0}")]
    OrderIdAlreadyExist(String),
    /// The total number of installments is invalid.
    #[error("C109_INVALID_TOTAL_NUMBER_INSTALLMENTS: {0}")]
    InvalidTotalNumberInstallments(String),
    /// The transaction exceeds the account's limits.
    #[error("C110_TRANSACTION_EXCEEDS_ACCOUNT_LIMITS: {0}")]
    TransactionExceedsAccountLimits(String),
    /// The referenced transaction does not exist.
    #[error("C111_TRANSACTION_DOES_NOT_EXIST: {0}")]
    TransactionDoesNotExist(String),
    /// The recurring purchase is already complete or cancelled.
    #[error("C112_PERIODIC_PURCHASE_COMPLETE_OR_CANCELLED: {0}")]
    PeriodicPurchaseCompleteOrCancelled(String),
    /// The card number failed validation.
    #[error("C200_INVALID_CREDIT_CARD_NUMBER: {0}")]
    InvalidCreditCardNumber(String),
    /// The card expiry date failed validation.
    #[error("C201_INVALID_CREDIT_CARD_EXPIRY_DATE: {0}")]
    InvalidCreditCardExpiryDate(String),
    /// The CVV2 value is malformed.
    #[error("C202_INVALID_CREDIT_CARD_CVV2_FORMAT: {0}")]
    InvalidCreditCardCvv2Format(String),
    /// The postal/zip code is malformed.
    #[error("C203_INVALID_ZIP_FORMAT: {0}")]
    InvalidZipFormat(String),
    /// The street address is malformed.
    #[error("C204_INVALID_STREET_FORMAT: {0}")]
    InvalidStreetFormat(String),
    /// CVV2 verification failed.
    #[error("C220_CVV2_VERIFICATION_FAILED: {0}")]
    Cvv2VerificationFailed(String),
    /// CVV2 verification is not supported for this card.
    #[error("C221_CVV2_VERIFICATION_NOT_SUPPORTED: {0}")]
    Cvv2VerificationNotSupported(String),
    /// Address verification failed.
    #[error("C222_AVS_FAILED: {0}")]
    AvsFailed(String),
    /// Address verification is not supported for this card.
    #[error("C223_AVS_NOT_SUPPORTED: {0}")]
    AvsNotSupported(String),
    /// The card has expired.
    #[error("C224_CREDIT_CARD_EXPIRED: {0}")]
    CreditCardExpired(String),
    /// The card type is not supported.
    #[error("C225_CARD_NOT_SUPPORTED: {0}")]
    CardNotSupported(String),
    /// The card's limit has been exceeded.
    #[error("C226_CARD_LIMIT_EXCEEDED: {0}")]
    CardLimitExceeded(String),
    /// The card has been reported lost or stolen.
    #[error("C227_CARD_LOST_OR_STOLEN: {0}")]
    CardLostOrStolen(String),
    /// The storage token id is already in use.
    #[error("C300_STORAGE_TOKEN_ID_ALREADY_IN_USE: {0}")]
    StorageTokenIdAlreadyInUse(String),
    /// The referenced storage record does not exist.
    #[error("C301_STORAGE_RECORD_DOES_NOT_EXIST: {0}")]
    StorageRecordDoesNotExist(String),
    /// The storage record holds no card.
    #[error("C302_NO_CREDIT_CARD_IN_STORAGE_RECORD: {0}")]
    NoCreditCardInStorageRecord(String),
    /// The fraud provider declined the transaction.
    #[error("C400_DECLINED_FROM_FRAUD_PROVIDER: {0}")]
    DeclinedFromFraudProvider(String),
    /// The fraud provider approved the transaction.
    #[error("C401_APPROVED_FROM_FRAUD_PROVIDER: {0}")]
    ApprovedFromFraudProvider(String),
    /// The fraud provider flagged the transaction for review.
    #[error("C402_REVIEW_FROM_FRAUD_PROVIDER: {0}")]
    ReviewFromFraudProvider(String),
    /// The gateway reported a code outside the known table.
    #[error("{code}: {message}")]
    Generic {
        /// The raw gateway code.
        code: String,
        /// The gateway's message text.
        message: String,
    },
}

impl GatewayError {
    /// Classifies a non-success response into a [`GatewayError`].
    ///
    /// The code is read from the `ERROR_MESSAGE` field; the message from
    /// `DEBUG_MESSAGE`, falling back to the raw code when absent. Whether
    /// live gateways ever omit `DEBUG_MESSAGE` on failures is unconfirmed;
    /// the fallback keeps classification total either way.
    #[must_use]
    pub fn classify(response: &DecodedResponse) -> Self {
        let code = response.status().unwrap_or_default();
        let message = response.debug_message().unwrap_or(code).to_owned();
        Self::from_code(code, message)
    }

    /// Builds the variant for a raw gateway code, carrying `message`.
    #[must_use]
    pub fn from_code(code: &str, message: String) -> Self {
        match code {
            "C001_TIMED_OUT" => Self::TimedOut(message),
            "C002_SYSTEM_ERROR" => Self::SystemError(message),
            "C003_NETWORK_ERROR" => Self::NetworkError(message),
            "C004_VALIDATION_ERROR" => Self::Validation(message),
            "C005_DECLINED" => Self::Declined(message),
            "C100_INVALID_MERCHANT_CREDENTIALS" => Self::InvalidMerchantCredentials(message),
            "C101_AMOUNT_OUT_OF_BOUNDS" => Self::AmountOutOfBounds(message),
            "C102_INVALID_PURCHASE" => Self::InvalidPurchase(message),
            "C103_INVALID_TRANSACTION" => Self::InvalidTransaction(message),
            "C104_PURCHASE_NOT_IN_REFUNDABLE_STATE" => Self::PurchaseNotInRefundableState(message),
            "C105_PURCHASE_REFUND_AMOUNT_OVER_LIMIT" => {
                Self::PurchaseRefundAmountOverLimit(message)
            }
            "C106_TRANSACTION_NOT_VOIDABLE" => Self::TransactionNotVoidable(message),
            "C107_REQUEST_DENIED" => Self::RequestDenied(message),
            "C108_ORDER_ID_ALREADY_EXIST" => Self::OrderIdAlreadyExist(message),
            "C109_INVALID_TOTAL_NUMBER_INSTALLMENTS" => {
                Self::InvalidTotalNumberInstallments(message)
            }
            "C110_TRANSACTION_EXCEEDS_ACCOUNT_LIMITS" => {
                Self::TransactionExceedsAccountLimits(message)
            }
            "C111_TRANSACTION_DOES_NOT_EXIST" => Self::TransactionDoesNotExist(message),
            "C112_PERIODIC_PURCHASE_COMPLETE_OR_CANCELLED" => {
                Self::PeriodicPurchaseCompleteOrCancelled(message)
            }
            "C200_INVALID_CREDIT_CARD_NUMBER" => Self::InvalidCreditCardNumber(message),
            "C201_INVALID_CREDIT_CARD_EXPIRY_DATE" => Self::InvalidCreditCardExpiryDate(message),
            "C202_INVALID_CREDIT_CARD_CVV2_FORMAT" => Self::InvalidCreditCardCvv2Format(message),
            "C203_INVALID_ZIP_FORMAT" => Self::InvalidZipFormat(message),
            "C204_INVALID_STREET_FORMAT" => Self::InvalidStreetFormat(message),
            "C220_CVV2_VERIFICATION_FAILED" => Self::Cvv2VerificationFailed(message),
            "C221_CVV2_VERIFICATION_NOT_SUPPORTED" => Self::Cvv2VerificationNotSupported(message),
            "C222_AVS_FAILED" => Self::AvsFailed(message),
            "C223_AVS_NOT_SUPPORTED" => Self::AvsNotSupported(message),
            "C224_CREDIT_CARD_EXPIRED" => Self::CreditCardExpired(message),
            "C225_CARD_NOT_SUPPORTED" => Self::CardNotSupported(message),
            "C226_CARD_LIMIT_EXCEEDED" => Self::CardLimitExceeded(message),
            "C227_CARD_LOST_OR_STOLEN" => Self::CardLostOrStolen(message),
            "C300_STORAGE_TOKEN_ID_ALREADY_IN_USE" => Self::StorageTokenIdAlreadyInUse(message),
            "C301_STORAGE_RECORD_DOES_NOT_EXIST" => Self::StorageRecordDoesNotExist(message),
            "C302_NO_CREDIT_CARD_IN_STORAGE_RECORD" => Self::NoCreditCardInStorageRecord(message),
            "C400_DECLINED_FROM_FRAUD_PROVIDER" => Self::DeclinedFromFraudProvider(message),
            "C401_APPROVED_FROM_FRAUD_PROVIDER" => Self::ApprovedFromFraudProvider(message),
            "C402_REVIEW_FROM_FRAUD_PROVIDER" => Self::ReviewFromFraudProvider(message),
            other => Self::Generic {
                code: other.to_owned(),
                message,
            },
        }
    }

    /// Returns the gateway code for this error.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::TimedOut(_) => "C001_TIMED_OUT",
            Self::SystemError(_) => "C002_SYSTEM_ERROR",
            Self::NetworkError(_) => "C003_NETWORK_ERROR",
            Self::Validation(_) => "C004_VALIDATION_ERROR",
            Self::Declined(_) => "C005_DECLINED",
            Self::InvalidMerchantCredentials(_) => "C100_INVALID_MERCHANT_CREDENTIALS",
            Self::AmountOutOfBounds(_) => "C101_AMOUNT_OUT_OF_BOUNDS",
            Self::InvalidPurchase(_) => "C102_INVALID_PURCHASE",
            Self::InvalidTransaction(_) => "C103_INVALID_TRANSACTION",
            Self::PurchaseNotInRefundableState(_) => "C104_PURCHASE_NOT_IN_REFUNDABLE_STATE",
            Self::PurchaseRefundAmountOverLimit(_) => "C105_PURCHASE_REFUND_AMOUNT_OVER_LIMIT",
            Self::TransactionNotVoidable(_) => "C106_TRANSACTION_NOT_VOIDABLE",
            Self::RequestDenied(_) => "C107_REQUEST_DENIED",
            Self::OrderIdAlreadyExist(_) => "C108_ORDER_ID_ALREADY_EXIST",
            Self::InvalidTotalNumberInstallments(_) => "C109_INVALID_TOTAL_NUMBER_INSTALLMENTS",
            Self::TransactionExceedsAccountLimits(_) => "C110_TRANSACTION_EXCEEDS_ACCOUNT_LIMITS",
            Self::TransactionDoesNotExist(_) => "C111_TRANSACTION_DOES_NOT_EXIST",
            Self::PeriodicPurchaseCompleteOrCancelled(_) => {
                "C112_PERIODIC_PURCHASE_COMPLETE_OR_CANCELLED"
            }
            Self::InvalidCreditCardNumber(_) => "C200_INVALID_CREDIT_CARD_NUMBER",
            Self::InvalidCreditCardExpiryDate(_) => "C201_INVALID_CREDIT_CARD_EXPIRY_DATE",
            Self::InvalidCreditCardCvv2Format(_) => "C202_INVALID_CREDIT_CARD_CVV2_FORMAT",
            Self::InvalidZipFormat(_) => "C203_INVALID_ZIP_FORMAT",
            Self::InvalidStreetFormat(_) => "C204_INVALID_STREET_FORMAT",
            Self::Cvv2VerificationFailed(_) => "C220_CVV2_VERIFICATION_FAILED",
            Self::Cvv2VerificationNotSupported(_) => "C221_CVV2_VERIFICATION_NOT_SUPPORTED",
            Self::AvsFailed(_) => "C222_AVS_FAILED",
            Self::AvsNotSupported(_) => "C223_AVS_NOT_SUPPORTED",
            Self::CreditCardExpired(_) => "C224_CREDIT_CARD_EXPIRED",
            Self::CardNotSupported(_) => "C225_CARD_NOT_SUPPORTED",
            Self::CardLimitExceeded(_) => "C226_CARD_LIMIT_EXCEEDED",
            Self::CardLostOrStolen(_) => "C227_CARD_LOST_OR_STOLEN",
            Self::StorageTokenIdAlreadyInUse(_) => "C300_STORAGE_TOKEN_ID_ALREADY_IN_USE",
            Self::StorageRecordDoesNotExist(_) => "C301_STORAGE_RECORD_DOES_NOT_EXIST",
            Self::NoCreditCardInStorageRecord(_) => "C302_NO_CREDIT_CARD_IN_STORAGE_RECORD",
            Self::DeclinedFromFraudProvider(_) => "C400_DECLINED_FROM_FRAUD_PROVIDER",
            Self::ApprovedFromFraudProvider(_) => "C401_APPROVED_FROM_FRAUD_PROVIDER",
            Self::ReviewFromFraudProvider(_) => "C402_REVIEW_FROM_FRAUD_PROVIDER",
            Self::Generic { code, .. } => code,
        }
    }

    /// Returns the gateway's message text.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::TimedOut(m)
            | Self::SystemError(m)
            | Self::NetworkError(m)
            | Self::Validation(m)
            | Self::Declined(m)
            | Self::InvalidMerchantCredentials(m)
            | Self::AmountOutOfBounds(m)
            | Self::InvalidPurchase(m)
            | Self::InvalidTransaction(m)
            | Self::PurchaseNotInRefundableState(m)
            | Self::PurchaseRefundAmountOverLimit(m)
            | Self::TransactionNotVoidable(m)
            | Self::RequestDenied(m)
            | Self::OrderIdAlreadyExist(m)
            | Self::InvalidTotalNumberInstallments(m)
            | Self::TransactionExceedsAccountLimits(m)
            | Self::TransactionDoesNotExist(m)
            | Self::PeriodicPurchaseCompleteOrCancelled(m)
            | Self::InvalidCreditCardNumber(m)
            | Self::InvalidCreditCardExpiryDate(m)
            | Self::InvalidCreditCardCvv2Format(m)
            | Self::InvalidZipFormat(m)
            | Self::InvalidStreetFormat(m)
            | Self::Cvv2VerificationFailed(m)
            | Self::Cvv2VerificationNotSupported(m)
            | Self::AvsFailed(m)
            | Self::AvsNotSupported(m)
            | Self::CreditCardExpired(m)
            | Self::CardNotSupported(m)
            | Self::CardLimitExceeded(m)
            | Self::CardLostOrStolen(m)
            | Self::StorageTokenIdAlreadyInUse(m)
            | Self::StorageRecordDoesNotExist(m)
            | Self::NoCreditCardInStorageRecord(m)
            | Self::DeclinedFromFraudProvider(m)
            | Self::ApprovedFromFraudProvider(m)
            | Self::ReviewFromFraudProvider(m) => m,
            Self::Generic { message, .. } => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::decode;

    #[test]
    fn known_code_maps_to_its_variant() {
        let response =
            decode("ERROR_MESSAGE=C005_DECLINED\nDEBUG_MESSAGE=Card was declined\n").unwrap();
        let err = GatewayError::classify(&response);
        assert_eq!(err, GatewayError::Declined("Card was declined".to_owned()));
        assert_eq!(err.code(), "C005_DECLINED");
        assert_eq!(err.to_string(), "C005_DECLINED: Card was declined");
    }

    #[test]
    fn unknown_code_falls_back_to_generic() {
        let response = decode("ERROR_MESSAGE=C999_UNKNOWN\nDEBUG_MESSAGE=mystery\n").unwrap();
        let err = GatewayError::classify(&response);
        assert_eq!(
            err,
            GatewayError::Generic {
                code: "C999_UNKNOWN".to_owned(),
                message: "mystery".to_owned(),
            }
        );
        assert_eq!(err.code(), "C999_UNKNOWN");
    }

    #[test]
    fn missing_debug_message_falls_back_to_code() {
        let response = decode("ERROR_MESSAGE=C107_REQUEST_DENIED\n").unwrap();
        let err = GatewayError::classify(&response);
        assert_eq!(err.message(), "C107_REQUEST_DENIED");
    }

    #[test]
    fn every_table_code_round_trips_through_classification() {
        let codes = [
            "C001_TIMED_OUT",
            "C002_SYSTEM_ERROR",
            "C003_NETWORK_ERROR",
            "C004_VALIDATION_ERROR",
            "C005_DECLINED",
            "C100_INVALID_MERCHANT_CREDENTIALS",
            "C101_AMOUNT_OUT_OF_BOUNDS",
            "C102_INVALID_PURCHASE",
            "C103_INVALID_TRANSACTION",
            "C104_PURCHASE_NOT_IN_REFUNDABLE_STATE",
            "C105_PURCHASE_REFUND_AMOUNT_OVER_LIMIT",
            "C106_TRANSACTION_NOT_VOIDABLE",
            "C107_REQUEST_DENIED",
            "C108_ORDER_ID_ALREADY_EXIST",
            "C109_INVALID_TOTAL_NUMBER_INSTALLMENTS",
            "C110_TRANSACTION_EXCEEDS_ACCOUNT_LIMITS",
            "C111_TRANSACTION_DOES_NOT_EXIST",
            "C112_PERIODIC_PURCHASE_COMPLETE_OR_CANCELLED",
            "C200_INVALID_CREDIT_CARD_NUMBER",
            "C201_INVALID_CREDIT_CARD_EXPIRY_DATE",
            "C202_INVALID_CREDIT_CARD_CVV2_FORMAT",
            "C203_INVALID_ZIP_FORMAT",
            "C204_INVALID_STREET_FORMAT",
            "C220_CVV2_VERIFICATION_FAILED",
            "C221_CVV2_VERIFICATION_NOT_SUPPORTED",
            "C222_AVS_FAILED",
            "C223_AVS_NOT_SUPPORTED",
            "C224_CREDIT_CARD_EXPIRED",
            "C225_CARD_NOT_SUPPORTED",
            "C226_CARD_LIMIT_EXCEEDED",
            "C227_CARD_LOST_OR_STOLEN",
            "C300_STORAGE_TOKEN_ID_ALREADY_IN_USE",
            "C301_STORAGE_RECORD_DOES_NOT_EXIST",
            "C302_NO_CREDIT_CARD_IN_STORAGE_RECORD",
            "C400_DECLINED_FROM_FRAUD_PROVIDER",
            "C401_APPROVED_FROM_FRAUD_PROVIDER",
            "C402_REVIEW_FROM_FRAUD_PROVIDER",
        ];
        for code in codes {
            let err = GatewayError::from_code(code, "msg".to_owned());
            assert_eq!(err.code(), code);
            assert_eq!(err.message(), "msg");
            assert!(
                !matches!(err, GatewayError::Generic { .. }),
                "{code} fell through to Generic"
            );
        }
    }
}
