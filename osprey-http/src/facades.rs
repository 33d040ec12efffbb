//! Operation facade methods: one call-site per gateway operation.
//!
//! Each method assembles one canonical parameter set from its typed
//! arguments and delegates to [`GatewayClient::execute`]. The lifecycle
//! conveniences (`hold_recurring_purchase` and friends) are state-code
//! transitions applied through the generic recurring update.

use osprey::DecodedResponse;
use osprey::ops::{
    CloseBatch, CreateRecurringPurchase, CreateStorageRecord, DeleteStorageRecord,
    ExecuteRecurringPurchase, FraudUpdate, QueryStorageRecord, Refund, SinglePurchase,
    UpdateRecurringPurchase, UpdateStorageRecord, VerifyCreditCard, VerifyTransaction, Void,
};

use crate::client::GatewayClient;
use crate::error::ClientError;

impl GatewayClient {
    /// Processes a single purchase.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on validation, transport, protocol, or
    /// gateway failure.
    pub async fn single_purchase(
        &self,
        purchase: SinglePurchase,
    ) -> Result<DecodedResponse, ClientError> {
        self.submit(purchase).await
    }

    /// Voids a previously approved transaction.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport, protocol, or gateway failure.
    pub async fn void(&self, void: Void) -> Result<DecodedResponse, ClientError> {
        self.submit(void).await
    }

    /// Refunds a settled purchase, in full or in part.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport, protocol, or gateway failure.
    pub async fn refund(&self, refund: Refund) -> Result<DecodedResponse, ClientError> {
        self.submit(refund).await
    }

    /// Verifies the state of a previously submitted transaction.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport, protocol, or gateway failure.
    pub async fn verify_transaction(
        &self,
        verify: VerifyTransaction,
    ) -> Result<DecodedResponse, ClientError> {
        self.submit(verify).await
    }

    /// Validates a credit card without charging it.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport, protocol, or gateway failure.
    pub async fn verify_credit_card(
        &self,
        verify: VerifyCreditCard,
    ) -> Result<DecodedResponse, ClientError> {
        self.submit(verify).await
    }

    /// Closes the current settlement batch.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport, protocol, or gateway failure.
    pub async fn close_batch(&self) -> Result<DecodedResponse, ClientError> {
        self.submit(CloseBatch).await
    }

    /// Refreshes the fraud-provider decision for a transaction.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport, protocol, or gateway failure.
    pub async fn fraud_update(&self, update: FraudUpdate) -> Result<DecodedResponse, ClientError> {
        self.submit(update).await
    }

    /// Creates a secure-storage record.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport, protocol, or gateway failure.
    pub async fn create_storage_record(
        &self,
        create: CreateStorageRecord,
    ) -> Result<DecodedResponse, ClientError> {
        self.submit(create).await
    }

    /// Updates a secure-storage record.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport, protocol, or gateway failure.
    pub async fn update_storage_record(
        &self,
        update: UpdateStorageRecord,
    ) -> Result<DecodedResponse, ClientError> {
        self.submit(update).await
    }

    /// Deletes a secure-storage record.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport, protocol, or gateway failure.
    pub async fn delete_storage_record(
        &self,
        storage_token_id: impl Into<String> + Send,
    ) -> Result<DecodedResponse, ClientError> {
        self.submit(DeleteStorageRecord {
            storage_token_id: storage_token_id.into(),
        })
        .await
    }

    /// Queries a secure-storage record's current contents.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport, protocol, or gateway failure.
    pub async fn query_storage_record(
        &self,
        storage_token_id: impl Into<String> + Send,
    ) -> Result<DecodedResponse, ClientError> {
        self.submit(QueryStorageRecord {
            storage_token_id: storage_token_id.into(),
        })
        .await
    }

    /// Creates a recurring purchase schedule.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on validation, transport, protocol, or
    /// gateway failure.
    pub async fn create_recurring_purchase(
        &self,
        create: CreateRecurringPurchase,
    ) -> Result<DecodedResponse, ClientError> {
        self.submit(create).await
    }

    /// Updates a recurring purchase schedule.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport, protocol, or gateway failure.
    pub async fn update_recurring_purchase(
        &self,
        update: UpdateRecurringPurchase,
    ) -> Result<DecodedResponse, ClientError> {
        self.submit(update).await
    }

    /// Executes one installment of a recurring purchase now.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport, protocol, or gateway failure.
    pub async fn execute_recurring_purchase(
        &self,
        execute: ExecuteRecurringPurchase,
    ) -> Result<DecodedResponse, ClientError> {
        self.submit(execute).await
    }

    /// Suspends a recurring purchase schedule.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport, protocol, or gateway failure.
    pub async fn hold_recurring_purchase(
        &self,
        order_id: impl Into<String> + Send,
    ) -> Result<DecodedResponse, ClientError> {
        self.submit(UpdateRecurringPurchase::hold(order_id)).await
    }

    /// Resumes a held recurring purchase schedule.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport, protocol, or gateway failure.
    pub async fn resume_recurring_purchase(
        &self,
        order_id: impl Into<String> + Send,
    ) -> Result<DecodedResponse, ClientError> {
        self.submit(UpdateRecurringPurchase::resume(order_id)).await
    }

    /// Terminates a recurring purchase schedule.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport, protocol, or gateway failure.
    pub async fn cancel_recurring_purchase(
        &self,
        order_id: impl Into<String> + Send,
    ) -> Result<DecodedResponse, ClientError> {
        self.submit(UpdateRecurringPurchase::cancel(order_id)).await
    }
}
