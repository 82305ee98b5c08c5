use std::fmt;

use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse
};
use derive_more::Display;
use serde::Serialize;
use validator::ValidationErrors;

#[derive(Debug)]
pub enum AppError {
    ValidationError(Vec<FieldError>),
    NotFound(String),
    Conflict(String),
    UnauthorizedAccess,
    RelayFailure(String),
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(errors) => {
                let messages = errors.iter()
                    .map(|e| format!("{}:{}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "validation error: {}", messages)
            }
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::UnauthorizedAccess => write!(f, "Unauthorized access"),
            AppError::RelayFailure(msg) => write!(f, "Failed to send message: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal server error: {}", msg)
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::ValidationError(errors) => {
                serde_json::json!({
                    "error": "Validation failed",
                    "details": errors
                })
            }
            _ => {
                serde_json::json!({"error": self.to_string()})
            }
        };
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::UnauthorizedAccess => StatusCode::UNAUTHORIZED,
            AppError::RelayFailure(_) => StatusCode::BAD_GATEWAY,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut field_errors: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(|e| FieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string()),
                })
            })
            .collect();

        // field_errors() is backed by a HashMap
        field_errors.sort_by(|a, b| a.field.cmp(&b.field));

        AppError::ValidationError(field_errors)
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        tracing::error!("Storage failure: {}", err);
        AppError::InternalError(err.to_string())
    }
}

impl From<RelayError> for AppError {
    fn from(err: RelayError) -> Self {
        tracing::warn!("Message relay failure: {}", err);
        AppError::RelayFailure(err.to_string())
    }
}

impl AppError {
    pub fn validation(field: &str, message: &str) -> Self {
        AppError::ValidationError(vec![FieldError {
            field: field.to_string(),
            message: message.to_string(),
        }])
    }
}

#[derive(Debug, Display, PartialEq)]
pub enum AuthError {
    #[display("Invalid username or password.")]
    WrongCredentials,

    #[display("Missing credentials")]
    MissingCredentials,

    #[display("Invalid session")]
    InvalidSession,

    #[display("Session expired")]
    SessionExpired,

    #[display("Current password is incorrect.")]
    IncorrectCurrentPassword,

    #[display("New password must be at least {_0} characters long.")]
    PasswordTooShort(usize),

    #[display("New passwords do not match.")]
    PasswordMismatch,

    #[display("Please enter a valid email address.")]
    InvalidEmail,

    #[display("Storage error: {_0}")]
    Storage(String),

    #[display("Notification failed: {_0}")]
    Notification(String),
}

impl ResponseError for AuthError {
    fn error_response(&self) -> HttpResponse {
        let error_message = match self {
            AuthError::Storage(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({"error": error_message}))
    }

    fn status_code(&self) -> StatusCode {
        match *self {
            AuthError::WrongCredentials => StatusCode::UNAUTHORIZED,
            AuthError::MissingCredentials => StatusCode::UNAUTHORIZED,
            AuthError::InvalidSession => StatusCode::UNAUTHORIZED,
            AuthError::SessionExpired => StatusCode::UNAUTHORIZED,
            AuthError::IncorrectCurrentPassword => StatusCode::BAD_REQUEST,
            AuthError::PasswordTooShort(_) => StatusCode::BAD_REQUEST,
            AuthError::PasswordMismatch => StatusCode::BAD_REQUEST,
            AuthError::InvalidEmail => StatusCode::BAD_REQUEST,
            AuthError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::Notification(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<StorageError> for AuthError {
    fn from(err: StorageError) -> Self {
        tracing::error!("Storage failure during authentication: {}", err);
        AuthError::Storage(err.to_string())
    }
}

impl From<RelayError> for AuthError {
    fn from(err: RelayError) -> Self {
        AuthError::Notification(err.to_string())
    }
}

/// A login form with an empty field fails like any other bad pair.
impl From<ValidationErrors> for AuthError {
    fn from(_: ValidationErrors) -> Self {
        AuthError::WrongCredentials
    }
}

#[derive(Debug, Display)]
pub enum StorageError {
    #[display("Storage I/O failed for '{key}': {message}")]
    Io { key: String, message: String },

    #[display("Failed to (de)serialize '{key}': {message}")]
    Serialization { key: String, message: String },

    #[display("Invalid storage key: {_0}")]
    InvalidKey(String),
}

#[derive(Debug, Display)]
pub enum RelayError {
    #[display("Relay is not configured: {_0}")]
    NotConfigured(String),

    #[display("Relay request failed: {_0}")]
    Transport(String),

    #[display("Relay rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

impl std::error::Error for StorageError {}

impl std::error::Error for RelayError {}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        RelayError::Transport(err.to_string())
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}
