#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Protocol types for the Osprey payment gateway.
//!
//! This crate defines the protocol-level building blocks used by the Osprey
//! SDK: the flat parameter schema the gateway accepts, the line-oriented
//! `key=value` wire format it responds with, and the typed taxonomy of the
//! error codes it reports. It performs no I/O; the HTTP transport lives in
//! the companion `osprey-http` crate.
//!
//! # Overview
//!
//! Every gateway call is a single form-encoded POST. The request is a flat
//! mapping of string keys to scalar values, always carrying a `requestCode`
//! (and, for grouped operations, an `operationCode`). The response is a
//! newline-separated sequence of `key=value` records whose `ERROR_MESSAGE`
//! field determines success or failure.
//!
//! # Modules
//!
//! - [`ops`] - Typed operation arguments and their parameter builders
//! - [`params`] - The flat request parameter schema
//! - [`wire`] - Decoder for the gateway's `key=value` response format
//! - [`error`] - Gateway error-code taxonomy and local validation errors

pub mod error;
pub mod ops;
pub mod params;
pub mod wire;

pub use error::{GatewayError, ValidationError};
pub use params::{ParamValue, RequestParameters};
pub use wire::{DecodedResponse, Value, WireError};
