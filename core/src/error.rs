//! Error types for the todo list client.
//!
//! # Design
//! Two layers. `ApiError` describes what went wrong on the wire and is what
//! `TodoClient::parse_*` and `Transport::execute` return. `TodoError` is the
//! taxonomy callers of the session and controller see: a blank title is
//! rejected before any request exists, every wire failure is a network
//! error, and ids missing from the local list are reported separately.

use thiserror::Error;

use crate::types::TodoId;

/// Wire-level failures.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The request never produced a response (connection refused, timeout).
    #[error("transport failed: {0}")]
    Transport(String),
}

/// Errors surfaced by `TodoSession` and `TodoListController` operations.
///
/// None of them are fatal: local state stays at its last known good
/// configuration and the session remains usable.
#[derive(Debug, Error)]
pub enum TodoError {
    /// Input rejected before any network call.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The request failed, timed out, or returned a non-success status.
    #[error("network error: {0}")]
    Network(#[from] ApiError),

    /// The operation referenced an id absent from the local list.
    #[error("todo {0} is not in the local list")]
    NotFoundLocal(TodoId),
}

impl TodoError {
    pub fn is_validation(&self) -> bool {
        matches!(self, TodoError::Validation(_))
    }

    pub fn is_network(&self) -> bool {
        matches!(self, TodoError::Network(_))
    }
}
