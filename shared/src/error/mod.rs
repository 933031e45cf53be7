//! Unified error system
//!
//! - [`ErrorCode`]: Standardized numeric error codes
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Error carrying a code, message, details and field errors
//! - [`ApiResponse`]: Unified API response envelope
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Member errors
//! - 4xxx: Contribution errors
//! - 5xxx: Employer errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{ApiResponse, AppError, ErrorCode, FieldError};
//!
//! let err = AppError::new(ErrorCode::MemberNotFound);
//! assert_eq!(err.http_status().as_u16(), 404);
//!
//! let err = AppError::from(vec![FieldError::new("email", "Email is required")]);
//! let response = ApiResponse::<()>::error(&err);
//! assert_eq!(response.errors.len(), 1);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult, FieldError, ResponseCode};
