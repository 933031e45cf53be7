//! Error types and API response structures

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// A single violated field rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Application error with structured error code and details
///
/// - Standardized error code via [`ErrorCode`]
/// - Human-readable message
/// - Optional structured details
/// - Field-level errors when a validation pass fails
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional context
    pub details: Option<HashMap<String, Value>>,
    /// Every violated field rule, empty unless validation failed
    pub errors: Vec<FieldError>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
            errors: Vec::new(),
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
            errors: Vec::new(),
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    /// `true` for the not-found family (404)
    pub fn is_not_found(&self) -> bool {
        self.http_status() == StatusCode::NOT_FOUND
    }

    /// `true` for uniqueness / state conflicts (409)
    pub fn is_conflict(&self) -> bool {
        self.http_status() == StatusCode::CONFLICT
    }

    // ==================== Convenience constructors ====================

    /// Validation failure carrying every violated rule
    pub fn validation_errors(errors: Vec<FieldError>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: ErrorCode::ValidationFailed.message().to_string(),
            details: None,
            errors,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    /// Conflict with a caller-provided message
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::AlreadyExists, msg)
    }

    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }

    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TokenInvalid, msg)
    }

    pub fn token_expired() -> Self {
        Self::new(ErrorCode::TokenExpired)
    }

    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::PermissionDenied, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    pub fn unavailable() -> Self {
        Self::new(ErrorCode::ServiceUnavailable)
    }
}

impl From<Vec<FieldError>> for AppError {
    fn from(errors: Vec<FieldError>) -> Self {
        Self::validation_errors(errors)
    }
}

/// Outcome tag carried by every response envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseCode {
    Successful,
    Failed,
    DataNotFound,
}

/// Unified API response envelope
///
/// `errorCode` is the numeric [`ErrorCode`] and `errors` the field-level
/// list; both are omitted on success.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: ResponseCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl<T> ApiResponse<T> {
    /// Create a success response with data
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            code: ResponseCode::Successful,
            error_code: None,
            message: None,
            data: Some(data),
            errors: Vec::new(),
        }
    }

    /// Create a success response with custom message and data
    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::success(data)
        }
    }

    /// Create an error response from an AppError
    pub fn error(err: &AppError) -> Self {
        let code = if err.is_not_found() {
            ResponseCode::DataNotFound
        } else {
            ResponseCode::Failed
        };
        Self {
            success: false,
            code,
            error_code: Some(err.code.code()),
            message: Some(err.message.clone()),
            data: None,
            errors: err.errors.clone(),
        }
    }
}

impl<T> From<AppError> for ApiResponse<T> {
    fn from(err: AppError) -> Self {
        Self::error(&err)
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        let body = ApiResponse::<()>::error(&self);

        if matches!(self.code.category(), ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        (status, Json(body)).into_response()
    }
}

impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = match self.error_code.map(ErrorCode::try_from) {
            None => StatusCode::OK,
            Some(Ok(code)) => code.http_status(),
            Some(Err(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::MemberNotFound);
        assert_eq!(err.code, ErrorCode::MemberNotFound);
        assert_eq!(err.message, "Member not found");
        assert!(err.details.is_none());
        assert!(err.errors.is_empty());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::with_message(ErrorCode::EmailAlreadyExists, "Email taken")
            .with_detail("email", "a@b.com");
        assert_eq!(err.code, ErrorCode::EmailAlreadyExists);
        assert_eq!(err.details.unwrap().get("email").unwrap(), "a@b.com");
    }

    #[test]
    fn test_validation_errors_keep_every_rule() {
        let err = AppError::from(vec![
            FieldError::new("firstName", "First name is required"),
            FieldError::new("email", "Email format is invalid"),
        ]);
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.errors.len(), 2);
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_predicates() {
        assert!(AppError::new(ErrorCode::ContributionNotFound).is_not_found());
        assert!(AppError::new(ErrorCode::MonthlyContributionExists).is_conflict());
        assert!(!AppError::validation("bad").is_conflict());
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::with_message(ErrorCode::NotFound, "Member not found");
        assert_eq!(format!("{}", err), "Member not found");
    }

    #[test]
    fn test_api_response_success() {
        let response = ApiResponse::success(42);
        assert!(response.success);
        assert_eq!(response.code, ResponseCode::Successful);
        assert_eq!(response.data, Some(42));
        assert!(response.error_code.is_none());
    }

    #[test]
    fn test_api_response_not_found_is_data_not_found() {
        let response = ApiResponse::<()>::error(&AppError::new(ErrorCode::MemberNotFound));
        assert!(!response.success);
        assert_eq!(response.code, ResponseCode::DataNotFound);
        assert_eq!(response.error_code, Some(3001));
    }

    #[test]
    fn test_api_response_conflict_is_failed() {
        let response: ApiResponse<String> =
            AppError::new(ErrorCode::MonthlyContributionExists).into();
        assert_eq!(response.code, ResponseCode::Failed);
        assert_eq!(response.error_code, Some(4002));
        assert!(response.data.is_none());
    }

    #[test]
    fn test_api_response_serialize() {
        let json = serde_json::to_string(&ApiResponse::success("hello")).unwrap();
        assert_eq!(
            json,
            r#"{"success":true,"code":"Successful","data":"hello"}"#
        );

        let err = AppError::from(vec![FieldError::new("amount", "Amount must be greater than 0")]);
        let json = serde_json::to_value(ApiResponse::<()>::error(&err)).unwrap();
        assert_eq!(json["errorCode"], 2);
        assert_eq!(json["code"], "Failed");
        assert_eq!(json["errors"][0]["field"], "amount");
    }

    #[test]
    fn test_api_response_deserialize() {
        let json = r#"{"success":true,"code":"Successful","data":42}"#;
        let response: ApiResponse<i32> = serde_json::from_str(json).unwrap();
        assert_eq!(response.data, Some(42));
        assert!(response.errors.is_empty());
    }
}
