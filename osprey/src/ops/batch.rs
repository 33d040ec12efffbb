//! Batch closure and fraud-review operations.

use super::{Operation, codes};
use crate::error::ValidationError;
use crate::params::RequestParameters;

/// Closes the gateway's current settlement batch, finalizing pending
/// transactions for settlement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CloseBatch;

impl Operation for CloseBatch {
    fn into_params(self) -> Result<RequestParameters, ValidationError> {
        Ok(RequestParameters::with_operation(
            codes::BATCH,
            codes::OP_CLOSE,
        ))
    }
}

/// Asks the gateway to refresh the fraud-provider decision for a
/// transaction. The refreshed decision is reported through the
/// fraud-provider result codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FraudUpdate {
    /// Gateway-assigned transaction identifier.
    pub transaction_id: String,
    /// Order identifier of the original transaction.
    pub order_id: String,
}

impl Operation for FraudUpdate {
    fn into_params(self) -> Result<RequestParameters, ValidationError> {
        let mut params = RequestParameters::new(codes::FRAUD_UPDATE);
        params.insert("transactionId", self.transaction_id);
        params.insert("orderId", self.order_id);
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamValue;

    #[test]
    fn close_batch_sends_only_its_codes() {
        let params = CloseBatch.into_params().unwrap();
        assert_eq!(params.request_code(), Some(codes::BATCH));
        assert_eq!(params.get("operationCode"), Some(&ParamValue::from("close")));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn fraud_update_carries_its_identifiers() {
        let params = FraudUpdate {
            transaction_id: "555".to_owned(),
            order_id: "ORD1".to_owned(),
        }
        .into_params()
        .unwrap();
        assert_eq!(params.request_code(), Some(codes::FRAUD_UPDATE));
        assert_eq!(params.get("transactionId"), Some(&ParamValue::from("555")));
        assert_eq!(params.get("orderId"), Some(&ParamValue::from("ORD1")));
    }
}
