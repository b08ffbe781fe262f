use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Handler failure, rendered as `{"message": ...}` with a matching status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerError {
    BadRequest(String),
    Unauthorized,
    InvalidCredentials,
    Forbidden,
    NotFound(&'static str),
    Conflict(String),
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    message: String,
}

impl ServerError {
    pub fn required(field: &str) -> Self {
        ServerError::BadRequest(format!("{field} is required"))
    }

    fn into_response_parts(self) -> (StatusCode, ErrorResponse) {
        let (status, message) = match self {
            ServerError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ServerError::Unauthorized => (StatusCode::UNAUTHORIZED, "Authentication required".to_string()),
            ServerError::InvalidCredentials => {
                (StatusCode::BAD_REQUEST, "Invalid email or password".to_string())
            }
            ServerError::Forbidden => (StatusCode::FORBIDDEN, "Not allowed".to_string()),
            ServerError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{what} not found")),
            ServerError::Conflict(message) => (StatusCode::CONFLICT, message),
        };
        (status, ErrorResponse { message })
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = self.into_response_parts();
        tracing::debug!(status = status.as_u16(), message = %body.message, "request rejected");
        (status, Json(body)).into_response()
    }
}
