use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Failure to hand a message to the mail delivery service
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("Mail service rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("Mail send failed: {0}")]
    Transport(String),
}

impl DeliveryError {
    /// Error detail as reported by the service, falling back to the error itself
    pub fn detail(&self) -> &str {
        match self {
            DeliveryError::Rejected { body, .. } => body,
            DeliveryError::Transport(msg) => msg,
        }
    }
}

impl From<reqwest::Error> for DeliveryError {
    fn from(err: reqwest::Error) -> Self {
        DeliveryError::Transport(err.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Delivery(err) => (StatusCode::BAD_GATEWAY, err.to_string()),
        };

        let body = Json(json!({
            "error": error_message,
            "code": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::BadRequest(format!("JSON error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
