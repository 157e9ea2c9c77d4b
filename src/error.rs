//! Application error type and the terminal link of the request pipeline.
//!
//! Every failure that escapes a handler, an extractor or the JSON body parser
//! ends up here as an [`AppError`]. The `ResponseError` impl converts it into
//! the wire shape the clients of this API already parse:
//!
//! ```json
//! { "message": "...", "data": null, "error": "yes",
//!   "errors": { "kind": "not_found", "status": 404, "message": "..." } }
//! ```
//!
//! The status code is derived from the error kind; an error that carries no
//! better classification answers with 500. Every error is logged before the
//! response is written, and nothing is ever re-thrown past this point.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::{json, Value};
use std::fmt;
use validator::ValidationErrors;

/// Classification of an [`AppError`]; each kind maps to one HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    Unauthorized,
    NotFound,
    Validation,
    Database,
    Internal,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::Database | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "bad_request",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Validation => "validation",
            ErrorKind::Database => "database",
            ErrorKind::Internal => "internal",
        }
    }
}

/// Tagged application error: a kind (which fixes the HTTP status), a message,
/// and optional structured detail surfaced to the client in the `data` field.
#[derive(Debug)]
pub struct AppError {
    kind: ErrorKind,
    message: String,
    data: Option<Value>,
}

impl AppError {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            data: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Attaches structured detail carried to the client in the `data` field.
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.kind.as_str(), self.message)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.kind.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        log::error!("request failed ({}): {}", status.as_u16(), self);

        HttpResponse::build(status).json(json!({
            "message": self.message,
            "data": self.data,
            "error": "yes",
            "errors": {
                "kind": self.kind.as_str(),
                "status": status.as_u16(),
                "message": self.message,
            },
        }))
    }
}

/// `RowNotFound` is the one database error a client can act on; everything
/// else stays a generic database failure.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::not_found("record not found"),
            _ => AppError::database(error.to_string()),
        }
    }
}

/// Field-level validation failures keep their structure in `data`.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> AppError {
        let detail = serde_json::to_value(&errors).unwrap_or(Value::Null);
        AppError::validation("invalid input").with_data(detail)
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::unauthorized(format!("invalid token: {}", error))
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::internal(format!("password hashing failed: {}", error))
    }
}

/// Malformed or oversized JSON bodies surface through the same terminal
/// responder as every other failure.
impl From<actix_web::error::JsonPayloadError> for AppError {
    fn from(error: actix_web::error::JsonPayloadError) -> AppError {
        AppError::bad_request(format!("invalid request body: {}", error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_kind_to_status_mapping() {
        assert_eq!(AppError::bad_request("x").status_code(), 400);
        assert_eq!(AppError::unauthorized("x").status_code(), 401);
        assert_eq!(AppError::not_found("x").status_code(), 404);
        assert_eq!(AppError::validation("x").status_code(), 422);
        assert_eq!(AppError::database("x").status_code(), 500);
        assert_eq!(AppError::internal("x").status_code(), 500);
    }

    #[actix_rt::test]
    async fn test_error_response_shape() {
        let error = AppError::not_found("task not found");
        let response = error.error_response();
        assert_eq!(response.status(), 404);

        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["message"], "task not found");
        assert_eq!(json["data"], Value::Null);
        assert_eq!(json["error"], "yes");
        assert_eq!(json["errors"]["kind"], "not_found");
        assert_eq!(json["errors"]["status"], 404);
    }

    #[test]
    fn test_row_not_found_becomes_404() {
        let error = AppError::from(sqlx::Error::RowNotFound);
        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert_eq!(error.status_code(), 404);
    }

    #[actix_rt::test]
    async fn test_validation_errors_carry_detail() {
        use validator::Validate;

        #[derive(Validate)]
        struct Probe {
            #[validate(length(min = 3))]
            name: String,
        }

        let probe = Probe {
            name: "ab".to_string(),
        };
        let error = AppError::from(probe.validate().unwrap_err());
        assert_eq!(error.status_code(), 422);

        let response = error.error_response();
        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert!(json["data"]["name"].is_array());
    }
}
