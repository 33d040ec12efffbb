#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! HTTP transport for the Osprey payment gateway SDK.
//!
//! Provides [`GatewayClient`], an asynchronous client that submits the
//! typed operations of the `osprey` crate to a gateway endpoint over
//! HTTPS: one form-encoded POST per call, the line-oriented response
//! decoded and classified into the crate's error taxonomy.
//!
//! # Modules
//!
//! - [`client`] - The gateway client and its operation facade methods
//! - [`diagnostics`] - The per-client [`LastExchange`] snapshot
//! - [`error`] - Transport-level error types
//!
//! # Example
//!
//! ```no_run
//! use osprey::ops::{CardDetails, SinglePurchase};
//! use osprey_http::GatewayClient;
//! use rust_decimal::Decimal;
//!
//! # async fn run() -> Result<(), osprey_http::ClientError> {
//! let client = GatewayClient::from_endpoint(
//!     "https://gateway.example.com/creditcard/processor.do",
//!     "my-api-token",
//!     "my-merchant-id",
//! )?;
//!
//! let purchase = SinglePurchase::new("ORD1", Decimal::new(1000, 2))
//!     .with_card(CardDetails::new("4111111111111111", "2512")?);
//! let response = client.single_purchase(purchase).await?;
//! println!("approved: {:?}", response.get_str("TRANSACTIONID"));
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod diagnostics;
pub mod error;

mod facades;

pub use client::GatewayClient;
pub use diagnostics::LastExchange;
pub use error::ClientError;
