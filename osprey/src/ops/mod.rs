//! Typed gateway operations and their parameter builders.
//!
//! Each operation is an explicit struct enumerating every recognized field
//! with its default; unrecognized options are unrepresentable. An operation
//! renders itself into the flat parameter schema through the [`Operation`]
//! trait, validating its arguments first - the card-reference rule in
//! particular fails here, before any network access.
//!
//! # Modules
//!
//! - [`purchase`] - Single purchase, void, refund
//! - [`verify`] - Transaction and credit-card verification
//! - [`recurring`] - Recurring purchase lifecycle
//! - [`storage`] - Secure card storage records
//! - [`batch`] - Batch closure and fraud updates

mod batch;
mod card;
mod purchase;
mod recurring;
mod storage;
mod verify;

pub use batch::{CloseBatch, FraudUpdate};
pub use card::{CardDetails, ExpiryDate};
pub use purchase::{Refund, SinglePurchase, Void};
pub use recurring::{
    CreateRecurringPurchase, ExecuteRecurringPurchase, RecurringSchedule, RecurringState,
    ScheduleType, UpdateRecurringPurchase,
};
pub use storage::{
    CreateStorageRecord, DeleteStorageRecord, QueryStorageRecord, UpdateStorageRecord,
};
pub use verify::{VerifyCreditCard, VerifyTransaction};

use crate::error::ValidationError;
use crate::params::RequestParameters;

/// A typed gateway operation that renders itself into the flat parameter
/// schema.
pub trait Operation {
    /// Validates the arguments and produces the request parameter set.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the arguments are locally invalid,
    /// before any network access.
    fn into_params(self) -> Result<RequestParameters, ValidationError>;
}

/// Request and operation codes of the gateway's fixed operation table.
pub(crate) mod codes {
    pub const SINGLE_PURCHASE: &str = "singlePurchase";
    pub const VOID: &str = "void";
    pub const REFUND: &str = "refund";
    pub const VERIFY_TRANSACTION: &str = "verifyTransaction";
    pub const VERIFY_CREDIT_CARD: &str = "verifyCreditCard";
    pub const BATCH: &str = "batch";
    pub const FRAUD_UPDATE: &str = "fraudUpdate";
    pub const SECURE_STORAGE: &str = "secureStorage";
    pub const RECURRING_PURCHASE: &str = "recurringPurchase";

    pub const OP_CREATE: &str = "create";
    pub const OP_UPDATE: &str = "update";
    pub const OP_DELETE: &str = "delete";
    pub const OP_QUERY: &str = "query";
    pub const OP_EXECUTE: &str = "execute";
    pub const OP_CLOSE: &str = "close";
}

/// Default transaction-channel classifier.
pub(crate) const DEFAULT_MARKET_SEGMENT: &str = "I";
