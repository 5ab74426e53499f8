use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use sqlx::error::ErrorKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("Invalid email address: {0}")]
    EmailAddress(#[from] lettre::address::AddressError),

    #[error("Email build error: {0}")]
    EmailBuild(#[from] lettre::error::Error),

    #[error("Email delivery error: {0}")]
    Email(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Keeps client-facing variants and collapses everything else into a
    /// generic internal error carrying `message`, so SQL and transport
    /// details never reach the response body.
    pub fn or_generic(self, message: &str) -> Self {
        match self {
            Error::BadRequest(_) | Error::NotFound(_) | Error::Conflict(_) => self,
            _ => Error::Internal(message.to_string()),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, error_message) = match self {
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Error::Conflict(msg) => (StatusCode::CONFLICT, msg),
            Error::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Ocurrió un error inesperado".to_string(),
            ),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            match db.kind() {
                ErrorKind::UniqueViolation => {
                    return Error::Conflict("Ya existe un registro con esos datos".to_string())
                }
                ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => {
                    return Error::BadRequest(
                        "Los datos enviados no cumplen las restricciones".to_string(),
                    )
                }
                _ => {}
            }
        }

        match err {
            sqlx::Error::RowNotFound => Error::NotFound("Recurso no encontrado".to_string()),
            other => Error::Database(other),
        }
    }
}
