//! Error taxonomy for the scheduling API client.
//!
//! # Design
//! Every failed call is reported as one `ApiError` carrying a message fit for
//! an end user. The raw cause (transport error text, unparsable body) is
//! logged but never copied into the message. Classification happens in
//! `normalize`, a pure function over what was observed on the wire:
//!
//! 1. a response arrived and its JSON body has a `detail` field: use it;
//! 2. a response arrived without a usable `detail`: generic server message;
//! 3. no response arrived: connectivity message;
//! 4. the request was never sent: generic unexpected message.

use thiserror::Error;

/// Message used when the server answered without a usable `detail`.
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// Message used when no response was received.
pub const CONNECTIVITY_ERROR_MESSAGE: &str =
    "Connection error. Check that the backend is running and reachable.";

/// Message used when the request could not be built or sent.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "Unexpected error";

/// Errors returned by every `ScheduleClient` operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered, either with a non-2xx status or with a body
    /// that is not JSON.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// No response was received: refused connection, timeout, DNS failure.
    #[error("{0}")]
    Connectivity(String),

    /// The request never made it onto the wire.
    #[error("{0}")]
    Unexpected(String),
}

/// Coarse classification of an `ApiError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Server,
    Connectivity,
    Unexpected,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Server { .. } => ErrorKind::Server,
            ApiError::Connectivity(_) => ErrorKind::Connectivity,
            ApiError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::Server { message, .. } => message,
            ApiError::Connectivity(message) | ApiError::Unexpected(message) => message,
        }
    }

    /// HTTP status of the response, when one arrived.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// What went wrong with a call, as observed by the client.
#[derive(Debug, Clone, Copy)]
pub enum Failure<'a> {
    /// A response arrived but cannot be returned as a success value.
    Response { status: u16, body: &'a str },
    /// The request was sent but nothing came back.
    NoResponse,
    /// The request could not be built.
    Internal,
}

/// Raw failure reported by a `Transport`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request left (or tried to leave) but no response arrived.
    #[error("no response: {0}")]
    NoResponse(String),

    /// The request could not be constructed by the transport.
    #[error("invalid request: {0}")]
    Request(String),
}

impl TransportError {
    pub fn as_failure(&self) -> Failure<'static> {
        match self {
            TransportError::NoResponse(_) => Failure::NoResponse,
            TransportError::Request(_) => Failure::Internal,
        }
    }
}

/// Map an observed failure to the error surfaced to callers.
pub fn normalize(failure: Failure<'_>) -> ApiError {
    match failure {
        Failure::Response { status, body } => ApiError::Server {
            status,
            message: detail_of(body).unwrap_or_else(|| SERVER_ERROR_MESSAGE.to_string()),
        },
        Failure::NoResponse => ApiError::Connectivity(CONNECTIVITY_ERROR_MESSAGE.to_string()),
        Failure::Internal => ApiError::Unexpected(UNEXPECTED_ERROR_MESSAGE.to_string()),
    }
}

/// Extract a usable `detail` from a JSON object body.
///
/// String details are taken verbatim; structured ones (validation error
/// lists) are rendered as compact JSON. Empty or falsy values (`null`, `""`,
/// `false`, `0`) count as absent.
fn detail_of(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::Null | serde_json::Value::Bool(false) => None,
        serde_json::Value::Number(n) if n.as_f64() == Some(0.0) => None,
        serde_json::Value::String(s) if s.is_empty() => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
