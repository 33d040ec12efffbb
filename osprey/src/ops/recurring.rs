//! Recurring purchase lifecycle operations.
//!
//! Recurring purchases are addressed by their order id in every lifecycle
//! call. Hold, resume, and cancel are state transitions applied through the
//! generic update operation; the numeric state encoding is gateway
//! convention.

use rust_decimal::Decimal;

use super::card::{CardDetails, CardSource};
use super::{DEFAULT_MARKET_SEGMENT, Operation, codes};
use crate::error::ValidationError;
use crate::params::RequestParameters;

/// Lifecycle state of a recurring purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurringState {
    /// Scheduled executions proceed.
    Active,
    /// Scheduled executions are suspended.
    Held,
    /// The schedule is terminated.
    Cancelled,
}

impl RecurringState {
    /// Returns the gateway's numeric state code.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Active => 1,
            Self::Held => 3,
            Self::Cancelled => 4,
        }
    }
}

/// Billing cadence of a recurring purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleType {
    /// Executions every `interval_length` days.
    Daily,
    /// Executions every `interval_length` weeks.
    Weekly,
    /// Executions every `interval_length` months.
    Monthly,
}

impl ScheduleType {
    /// Returns the gateway's numeric schedule-type code.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Daily => 1,
            Self::Weekly => 2,
            Self::Monthly => 3,
        }
    }
}

/// A recurring billing schedule: cadence plus interval length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecurringSchedule {
    /// The billing cadence.
    pub schedule_type: ScheduleType,
    /// Number of cadence units between executions.
    pub interval_length: u32,
}

impl RecurringSchedule {
    fn apply(self, params: &mut RequestParameters) {
        params.insert("periodicPurchaseScheduleTypeCode", self.schedule_type.code());
        params.insert(
            "periodicPurchaseIntervalLength",
            i64::from(self.interval_length),
        );
    }
}

/// Arguments to create a recurring purchase.
///
/// The card-reference rule of single purchases applies: exactly one of raw
/// card details or a storage token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRecurringPurchase {
    /// Merchant-assigned order identifier addressing the schedule.
    pub order_id: String,
    /// Amount charged on each execution.
    pub per_payment_amount: Decimal,
    /// The billing schedule.
    pub schedule: RecurringSchedule,
    /// First execution date, `YYYYMMDD`.
    pub start_date: String,
    /// Last possible execution date, `YYYYMMDD`; open-ended when absent.
    pub end_date: Option<String>,
    /// Total number of installments, when the schedule is bounded by count.
    pub total_number_installments: Option<u32>,
    /// Raw card details; mutually exclusive with `storage_token_id`.
    pub card: Option<CardDetails>,
    /// Storage token referencing a stored card profile; mutually exclusive
    /// with `card`.
    pub storage_token_id: Option<String>,
    /// Transaction-channel classifier; `"I"` when unset.
    pub market_segment_code: Option<String>,
}

impl Operation for CreateRecurringPurchase {
    fn into_params(self) -> Result<RequestParameters, ValidationError> {
        let source = CardSource::resolve(self.card, self.storage_token_id)?;
        let mut params =
            RequestParameters::with_operation(codes::RECURRING_PURCHASE, codes::OP_CREATE);
        params.insert("orderId", self.order_id);
        params.insert("perPaymentAmount", self.per_payment_amount);
        self.schedule.apply(&mut params);
        params.insert("startDate", self.start_date);
        params.insert_opt("endDate", self.end_date);
        params.insert_opt(
            "totalNumberInstallments",
            self.total_number_installments.map(i64::from),
        );
        source.apply(&mut params);
        params.insert(
            "marketSegmentCode",
            self.market_segment_code
                .unwrap_or_else(|| DEFAULT_MARKET_SEGMENT.to_owned()),
        );
        Ok(params)
    }
}

/// Arguments to update a recurring purchase.
///
/// Absent fields are left untouched on the gateway side. The
/// [`hold`](Self::hold) / [`resume`](Self::resume) /
/// [`cancel`](Self::cancel) constructors build the pure state transitions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateRecurringPurchase {
    /// Order identifier addressing the schedule.
    pub order_id: String,
    /// New lifecycle state.
    pub state: Option<RecurringState>,
    /// New per-execution amount.
    pub per_payment_amount: Option<Decimal>,
    /// New billing schedule.
    pub schedule: Option<RecurringSchedule>,
    /// New end date, `YYYYMMDD`.
    pub end_date: Option<String>,
    /// Re-points the schedule at a stored card profile.
    pub storage_token_id: Option<String>,
}

impl UpdateRecurringPurchase {
    /// An update that suspends scheduled executions.
    #[must_use]
    pub fn hold(order_id: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            state: Some(RecurringState::Held),
            ..Self::default()
        }
    }

    /// An update that resumes a held schedule.
    #[must_use]
    pub fn resume(order_id: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            state: Some(RecurringState::Active),
            ..Self::default()
        }
    }

    /// An update that terminates the schedule.
    #[must_use]
    pub fn cancel(order_id: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            state: Some(RecurringState::Cancelled),
            ..Self::default()
        }
    }
}

impl Operation for UpdateRecurringPurchase {
    fn into_params(self) -> Result<RequestParameters, ValidationError> {
        let mut params =
            RequestParameters::with_operation(codes::RECURRING_PURCHASE, codes::OP_UPDATE);
        params.insert("orderId", self.order_id);
        params.insert_opt(
            "periodicPurchaseStateCode",
            self.state.map(RecurringState::code),
        );
        params.insert_opt("perPaymentAmount", self.per_payment_amount);
        if let Some(schedule) = self.schedule {
            schedule.apply(&mut params);
        }
        params.insert_opt("endDate", self.end_date);
        params.insert_opt("storageTokenId", self.storage_token_id);
        Ok(params)
    }
}

/// Arguments to execute one installment of a recurring purchase now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecuteRecurringPurchase {
    /// Order identifier addressing the schedule.
    pub order_id: String,
    /// Card verification value, when the gateway requires one per
    /// execution. Omitted from the request when absent.
    pub cvv: Option<String>,
}

impl ExecuteRecurringPurchase {
    /// Creates an execute request for the given schedule.
    #[must_use]
    pub fn new(order_id: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            cvv: None,
        }
    }
}

impl Operation for ExecuteRecurringPurchase {
    fn into_params(self) -> Result<RequestParameters, ValidationError> {
        let mut params =
            RequestParameters::with_operation(codes::RECURRING_PURCHASE, codes::OP_EXECUTE);
        params.insert("orderId", self.order_id);
        params.insert_opt("cvv", self.cvv);
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamValue;

    #[test]
    fn hold_always_sends_state_code_3() {
        let params = UpdateRecurringPurchase::hold("ORD1").into_params().unwrap();
        assert_eq!(params.request_code(), Some(codes::RECURRING_PURCHASE));
        assert_eq!(params.get("operationCode"), Some(&ParamValue::from("update")));
        assert_eq!(
            params.get("periodicPurchaseStateCode"),
            Some(&ParamValue::Int(3))
        );
    }

    #[test]
    fn resume_and_cancel_send_their_state_codes() {
        let resume = UpdateRecurringPurchase::resume("ORD1")
            .into_params()
            .unwrap();
        assert_eq!(
            resume.get("periodicPurchaseStateCode"),
            Some(&ParamValue::Int(1))
        );

        let cancel = UpdateRecurringPurchase::cancel("ORD1")
            .into_params()
            .unwrap();
        assert_eq!(
            cancel.get("periodicPurchaseStateCode"),
            Some(&ParamValue::Int(4))
        );
    }

    #[test]
    fn plain_update_omits_the_state_code() {
        let update = UpdateRecurringPurchase {
            order_id: "ORD1".to_owned(),
            per_payment_amount: Some(Decimal::new(500, 2)),
            ..UpdateRecurringPurchase::default()
        };
        let params = update.into_params().unwrap();
        assert!(!params.contains_key("periodicPurchaseStateCode"));
        assert_eq!(
            params.get("perPaymentAmount"),
            Some(&ParamValue::Decimal(Decimal::new(500, 2)))
        );
    }

    #[test]
    fn create_requires_a_card_reference() {
        let create = CreateRecurringPurchase {
            order_id: "ORD1".to_owned(),
            per_payment_amount: Decimal::new(999, 2),
            schedule: RecurringSchedule {
                schedule_type: ScheduleType::Monthly,
                interval_length: 1,
            },
            start_date: "20260901".to_owned(),
            end_date: None,
            total_number_installments: Some(12),
            card: None,
            storage_token_id: None,
            market_segment_code: None,
        };
        assert_eq!(
            create.into_params().unwrap_err(),
            ValidationError::MissingCardSource
        );
    }

    #[test]
    fn create_encodes_the_schedule() {
        let create = CreateRecurringPurchase {
            order_id: "ORD1".to_owned(),
            per_payment_amount: Decimal::new(999, 2),
            schedule: RecurringSchedule {
                schedule_type: ScheduleType::Monthly,
                interval_length: 1,
            },
            start_date: "20260901".to_owned(),
            end_date: None,
            total_number_installments: Some(12),
            card: None,
            storage_token_id: Some("tok-1".to_owned()),
            market_segment_code: None,
        };
        let params = create.into_params().unwrap();
        assert_eq!(params.get("operationCode"), Some(&ParamValue::from("create")));
        assert_eq!(
            params.get("periodicPurchaseScheduleTypeCode"),
            Some(&ParamValue::Int(3))
        );
        assert_eq!(
            params.get("periodicPurchaseIntervalLength"),
            Some(&ParamValue::Int(1))
        );
        assert_eq!(
            params.get("totalNumberInstallments"),
            Some(&ParamValue::Int(12))
        );
        assert!(!params.contains_key("endDate"));
    }

    #[test]
    fn execute_carries_order_id_and_optional_cvv() {
        let params = ExecuteRecurringPurchase::new("ORD1").into_params().unwrap();
        assert_eq!(params.get("operationCode"), Some(&ParamValue::from("execute")));
        assert!(!params.contains_key("cvv"));
    }
}
