// HTTP API error types
use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Value};

use crate::api::FieldError;
use crate::services::ServiceError;

/// HTTP API error with a status code and a client-safe message
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 403 Forbidden
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // 422 Unprocessable Entity (decodable body, failed field constraints)
    ValidationFailed { details: Vec<FieldError> },

    // 500 Internal Server Error
    InternalServerError,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::ValidationFailed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg) => msg,
            ApiError::ValidationFailed { .. } => "Validation failed",
            ApiError::InternalServerError => "Internal server error",
        }
    }

    /// Machine-readable code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::ValidationFailed { .. } => "VALIDATION_FAILED",
            ApiError::InternalServerError => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn to_json(&self) -> Value {
        let mut body = json!({
            "error": self.message(),
            "code": self.error_code(),
        });

        if let ApiError::ValidationFailed { details } = self {
            body["details"] = json!(details);
        }

        body
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn validation_failed(details: Vec<FieldError>) -> Self {
        ApiError::ValidationFailed { details }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::EmailExists => ApiError::bad_request("Email already exists"),
            ServiceError::UserNotFound | ServiceError::OrderUserNotFound => {
                ApiError::not_found("User not found")
            }
            ServiceError::InvalidCredentials => ApiError::unauthorized("Invalid email or password"),
            other => {
                tracing::error!("Internal error: {}", other);
                ApiError::InternalServerError
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

/// Response for a handler that panicked; the payload is logged, never sent
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");

    tracing::error!("Handler panicked: {}", detail);
    ApiError::InternalServerError.into_response()
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::PasswordError;

    #[test]
    fn service_errors_map_to_status() {
        let cases = [
            (ServiceError::EmailExists, StatusCode::BAD_REQUEST, "Email already exists"),
            (ServiceError::UserNotFound, StatusCode::NOT_FOUND, "User not found"),
            (ServiceError::OrderUserNotFound, StatusCode::NOT_FOUND, "User not found"),
            (
                ServiceError::InvalidCredentials,
                StatusCode::UNAUTHORIZED,
                "Invalid email or password",
            ),
        ];

        for (err, status, message) in cases {
            let api = ApiError::from(err);
            assert_eq!(api.status_code(), status);
            assert_eq!(api.message(), message);
        }
    }

    #[test]
    fn internal_detail_is_not_exposed() {
        let err = ServiceError::Password(PasswordError::Hash("salt exploded".into()));
        let body = ApiError::from(err).to_json();
        assert_eq!(body, json!({ "error": "Internal server error", "code": "INTERNAL_SERVER_ERROR" }));
    }

    #[test]
    fn validation_body_carries_details() {
        let err = ApiError::validation_failed(vec![FieldError {
            field: "age".into(),
            constraint: "lower than 1".into(),
        }]);
        let body = err.to_json();
        assert_eq!(body["error"], "Validation failed");
        assert_eq!(body["details"][0]["field"], "age");
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn panic_payload_is_not_exposed() {
        let response = panic_response(Box::new(String::from("secret state")));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn plain_errors_have_no_details() {
        let body = ApiError::forbidden("nope").to_json();
        assert_eq!(body, json!({ "error": "nope", "code": "FORBIDDEN" }));
    }
}
