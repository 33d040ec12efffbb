//! Secure card storage operations.
//!
//! A storage record holds a card profile under a merchant-chosen storage
//! token; the token can then stand in for raw card details in purchase and
//! recurring-purchase calls.

use super::card::CardDetails;
use super::{Operation, codes};
use crate::error::ValidationError;
use crate::params::RequestParameters;

/// Arguments to create a storage record.
///
/// A record may be created without a card and populated later; the gateway
/// rejects charging such records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateStorageRecord {
    /// Merchant-chosen storage token; must not already be in use.
    pub storage_token_id: String,
    /// Card profile to store.
    pub card: Option<CardDetails>,
    /// Cardholder postal/zip code.
    pub zip: Option<String>,
    /// Cardholder street address.
    pub street: Option<String>,
}

impl CreateStorageRecord {
    /// Creates a storage-record request for the given token.
    #[must_use]
    pub fn new(storage_token_id: impl Into<String>) -> Self {
        Self {
            storage_token_id: storage_token_id.into(),
            ..Self::default()
        }
    }

    /// Stores the given card profile in the record.
    #[must_use]
    pub fn with_card(mut self, card: CardDetails) -> Self {
        self.card = Some(card);
        self
    }
}

impl Operation for CreateStorageRecord {
    fn into_params(self) -> Result<RequestParameters, ValidationError> {
        let mut params = RequestParameters::with_operation(codes::SECURE_STORAGE, codes::OP_CREATE);
        params.insert("storageTokenId", self.storage_token_id);
        if let Some(card) = self.card {
            card.apply(&mut params);
        }
        params.insert_opt("zip", self.zip);
        params.insert_opt("street", self.street);
        Ok(params)
    }
}

/// Arguments to update an existing storage record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateStorageRecord {
    /// Storage token of the record to update.
    pub storage_token_id: String,
    /// Replacement card profile.
    pub card: Option<CardDetails>,
    /// Replacement postal/zip code.
    pub zip: Option<String>,
    /// Replacement street address.
    pub street: Option<String>,
}

impl UpdateStorageRecord {
    /// Creates an update request for the given token.
    #[must_use]
    pub fn new(storage_token_id: impl Into<String>) -> Self {
        Self {
            storage_token_id: storage_token_id.into(),
            ..Self::default()
        }
    }

    /// Replaces the stored card profile.
    #[must_use]
    pub fn with_card(mut self, card: CardDetails) -> Self {
        self.card = Some(card);
        self
    }
}

impl Operation for UpdateStorageRecord {
    fn into_params(self) -> Result<RequestParameters, ValidationError> {
        let mut params = RequestParameters::with_operation(codes::SECURE_STORAGE, codes::OP_UPDATE);
        params.insert("storageTokenId", self.storage_token_id);
        if let Some(card) = self.card {
            card.apply(&mut params);
        }
        params.insert_opt("zip", self.zip);
        params.insert_opt("street", self.street);
        Ok(params)
    }
}

/// Arguments to delete a storage record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteStorageRecord {
    /// Storage token of the record to delete.
    pub storage_token_id: String,
}

impl Operation for DeleteStorageRecord {
    fn into_params(self) -> Result<RequestParameters, ValidationError> {
        let mut params = RequestParameters::with_operation(codes::SECURE_STORAGE, codes::OP_DELETE);
        params.insert("storageTokenId", self.storage_token_id);
        Ok(params)
    }
}

/// Arguments to query a storage record's current contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryStorageRecord {
    /// Storage token of the record to query.
    pub storage_token_id: String,
}

impl Operation for QueryStorageRecord {
    fn into_params(self) -> Result<RequestParameters, ValidationError> {
        let mut params = RequestParameters::with_operation(codes::SECURE_STORAGE, codes::OP_QUERY);
        params.insert("storageTokenId", self.storage_token_id);
        Ok(params)
    }
}
