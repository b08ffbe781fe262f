//! Error types for the client core.
//!
//! # Design
//! Every write path returns `Result<T, ApiError>`. `NotFound` and
//! `Unauthorized` get dedicated variants because screens branch on them
//! (empty detail view, forced logout). All other non-2xx responses land in
//! `Http` with the status and the message extracted from the body.

use crate::http::TransportError;
use crate::validation::ValidationErrors;

/// Errors produced while building requests or interpreting responses.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The host could not complete the round trip.
    #[error("network error: {0}")]
    Transport(String),

    /// 401: the session token is missing, expired, or rejected.
    #[error("unauthorized")]
    Unauthorized,

    /// 404: the requested resource does not exist.
    #[error("resource not found")]
    NotFound,

    /// Any other non-2xx status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("deserialization failed: {0}")]
    Deserialization(String),

    #[error("serialization failed: {0}")]
    Serialization(String),

    /// Form input was rejected before any request was built.
    #[error("invalid input: {0}")]
    Validation(ValidationErrors),
}

impl ApiError {
    /// HTTP status associated with the error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::NotFound => Some(404),
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text for a dismissable alert.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Transport(_) => "Could not reach the server.".to_string(),
            ApiError::Unauthorized => "Your session has expired. Please sign in again.".to_string(),
            ApiError::NotFound => "The requested item no longer exists.".to_string(),
            ApiError::Http { message, .. } => message.clone(),
            ApiError::Deserialization(_) => "The server sent an unexpected response.".to_string(),
            ApiError::Serialization(_) => "The request could not be prepared.".to_string(),
            ApiError::Validation(errors) => errors.to_string(),
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        ApiError::Transport(err.0)
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(err: ValidationErrors) -> Self {
        ApiError::Validation(err)
    }
}
