use core::fmt;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::store::StoreError;

pub const INVALID_NAME_MSG: &str = "El nombre es invalido";
pub const INVALID_PHONE_MSG: &str = "El telefono es invalido";
pub const FORBIDDEN_MSG: &str = "No tiene los permisos";
pub const NOT_FOUND_MSG: &str = "El contacto no existe";
pub const DUPLICATE_MSG: &str = "Numero duplicado";
pub const INTERNAL_MSG: &str = "Hubo un error";

/// Contact field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Phone,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => write!(f, "name"),
            Field::Phone => write!(f, "phone"),
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    InvalidInput(Field),
    Forbidden,
    NotFound,
    DuplicateResource,
    Internal(String),
    Io(std::io::Error),
    Config(String),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ConstraintViolation(_) => AppError::DuplicateResource,
            StoreError::Backend(cause) => AppError::Internal(cause),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::InvalidInput(field) => {
                write!(f, "Invalid input: {}", field)
            }
            AppError::Forbidden => {
                write!(f, "Requester does not own this resource")
            }
            AppError::NotFound => {
                write!(f, "Contact Not found")
            }
            AppError::DuplicateResource => {
                write!(f, "Resource already exists")
            }
            AppError::Internal(cause) => {
                write!(f, "Internal error: {}", cause)
            }
            AppError::Io(e) => {
                write!(f, "I/O error while accessing a file or resource: {}", e)
            }
            AppError::Config(msg) => {
                write!(f, "Configuration error: {}", msg)
            }
        }
    }
}

impl std::error::Error for AppError {}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    /// HTTP status and public message for this error.
    pub fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::InvalidInput(Field::Name) => (StatusCode::BAD_REQUEST, INVALID_NAME_MSG),
            AppError::InvalidInput(Field::Phone) => (StatusCode::BAD_REQUEST, INVALID_PHONE_MSG),
            AppError::Forbidden => (StatusCode::FORBIDDEN, FORBIDDEN_MSG),
            // Delete reports a missing row as 400
            AppError::NotFound => (StatusCode::BAD_REQUEST, NOT_FOUND_MSG),
            AppError::DuplicateResource => (StatusCode::CONFLICT, DUPLICATE_MSG),
            AppError::Internal(_) | AppError::Io(_) | AppError::Config(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MSG)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!("Internal error: {}", self);
        } else {
            tracing::warn!(status = status.as_u16(), "Request rejected: {}", self);
        }

        let body = Json(ErrorResponse {
            error: message.to_string(),
        });

        (status, body).into_response()
    }
}
