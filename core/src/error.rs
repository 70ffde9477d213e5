//! Error types for the record store and the weather client.
//!
//! # Design
//! `StoreError` has exactly two failure classes: the caller sent something
//! malformed, or the addressed record does not exist. `NotFound` carries the
//! kind so its message matches the collection ("User not found").
//!
//! `WeatherError` keeps 401 apart from other non-2xx statuses because a
//! rejected credential gets its own message at the HTTP boundary. Every
//! variant is an upstream failure from the server's point of view.

use thiserror::Error;

use crate::types::RecordKind;

/// Failures returned by `RecordStore` operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Missing or malformed input.
    #[error("{0}")]
    InvalidArgument(String),

    /// No record with the requested identifier exists in the collection.
    #[error("{} not found", .0.label())]
    NotFound(RecordKind),
}

/// Failures returned by `WeatherClient` build and parse methods, or by the
/// host executing the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    /// No provider credential is configured.
    #[error("weather API key is not configured")]
    MissingApiKey,

    /// The provider rejected the credential (HTTP 401).
    #[error("weather provider rejected the API key")]
    Unauthorized,

    /// The provider returned a non-2xx status other than 401.
    #[error("weather provider responded with status {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The provider body did not have the expected shape.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request never produced a response (connect error, timeout).
    #[error("transport failed: {0}")]
    Transport(String),
}
