//! Numeric error codes
//!
//! Codes are grouped by leading digit, see [`super::ErrorCategory`].
//! They are serialized as plain numbers so clients can switch on them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed
    Success = 0,
    /// Unclassified error
    Unknown = 1,
    /// One or more field rules failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Malformed request
    InvalidRequest = 5,
    /// Value has the wrong format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value outside the allowed range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    NotAuthenticated = 1001,
    InvalidCredentials = 1002,
    TokenExpired = 1003,
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    PermissionDenied = 2001,

    // ==================== 3xxx: Member ====================
    /// Member missing or soft-deleted
    MemberNotFound = 3001,
    /// Email held by another active member
    EmailAlreadyExists = 3002,
    /// No eligibility snapshot stored for the member
    EligibilityNotFound = 3003,

    // ==================== 4xxx: Contribution ====================
    /// Contribution missing or soft-deleted
    ContributionNotFound = 4001,
    /// Member already has a monthly contribution in that calendar month
    MonthlyContributionExists = 4002,

    // ==================== 5xxx: Employer ====================
    EmployerNotFound = 5001,
    /// RC number already registered
    RcNumberExists = 5002,

    // ==================== 9xxx: System ====================
    InternalError = 9001,
    DatabaseError = 9002,
    /// Store unreachable or pool exhausted, retry later
    ServiceUnavailable = 9003,
    ConfigError = 9004,
    TimeoutError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Default message used when no custom message is given
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::InvalidFormat => "Invalid format",
            Self::RequiredField => "Required field missing",
            Self::ValueOutOfRange => "Value out of range",

            Self::NotAuthenticated => "Authentication required",
            Self::InvalidCredentials => "Invalid email or password",
            Self::TokenExpired => "Token expired",
            Self::TokenInvalid => "Invalid token",

            Self::PermissionDenied => "Permission denied",

            Self::MemberNotFound => "Member not found",
            Self::EmailAlreadyExists => "A member with this email already exists",
            Self::EligibilityNotFound => "Eligibility has not been computed for this member",

            Self::ContributionNotFound => "Contribution not found",
            Self::MonthlyContributionExists => {
                "A monthly contribution already exists for this month"
            }

            Self::EmployerNotFound => "Employer not found",
            Self::RcNumberExists => "An employer with this RC number already exists",

            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::ServiceUnavailable => "Service temporarily unavailable",
            Self::ConfigError => "Configuration error",
            Self::TimeoutError => "Operation timed out",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            2001 => Ok(ErrorCode::PermissionDenied),

            3001 => Ok(ErrorCode::MemberNotFound),
            3002 => Ok(ErrorCode::EmailAlreadyExists),
            3003 => Ok(ErrorCode::EligibilityNotFound),

            4001 => Ok(ErrorCode::ContributionNotFound),
            4002 => Ok(ErrorCode::MonthlyContributionExists),

            5001 => Ok(ErrorCode::EmployerNotFound),
            5002 => Ok(ErrorCode::RcNumberExists),

            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::ServiceUnavailable),
            9004 => Ok(ErrorCode::ConfigError),
            9005 => Ok(ErrorCode::TimeoutError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::MemberNotFound.code(), 3001);
        assert_eq!(ErrorCode::EmailAlreadyExists.code(), 3002);
        assert_eq!(ErrorCode::ContributionNotFound.code(), 4001);
        assert_eq!(ErrorCode::MonthlyContributionExists.code(), 4002);
        assert_eq!(ErrorCode::RcNumberExists.code(), 5002);
        assert_eq!(ErrorCode::ServiceUnavailable.code(), 9003);
    }

    #[test]
    fn test_try_from_round_trips_every_code() {
        let all = [
            ErrorCode::Success,
            ErrorCode::Unknown,
            ErrorCode::ValidationFailed,
            ErrorCode::NotFound,
            ErrorCode::AlreadyExists,
            ErrorCode::InvalidRequest,
            ErrorCode::InvalidFormat,
            ErrorCode::RequiredField,
            ErrorCode::ValueOutOfRange,
            ErrorCode::NotAuthenticated,
            ErrorCode::InvalidCredentials,
            ErrorCode::TokenExpired,
            ErrorCode::TokenInvalid,
            ErrorCode::PermissionDenied,
            ErrorCode::MemberNotFound,
            ErrorCode::EmailAlreadyExists,
            ErrorCode::EligibilityNotFound,
            ErrorCode::ContributionNotFound,
            ErrorCode::MonthlyContributionExists,
            ErrorCode::EmployerNotFound,
            ErrorCode::RcNumberExists,
            ErrorCode::InternalError,
            ErrorCode::DatabaseError,
            ErrorCode::ServiceUnavailable,
            ErrorCode::ConfigError,
            ErrorCode::TimeoutError,
        ];
        for code in all {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_invalid_code() {
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
        assert_eq!(
            InvalidErrorCode(4242).to_string(),
            "invalid error code: 4242"
        );
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::MemberNotFound.is_success());
    }

    #[test]
    fn test_serialize() {
        assert_eq!(serde_json::to_string(&ErrorCode::NotFound).unwrap(), "3");
        assert_eq!(
            serde_json::to_string(&ErrorCode::MonthlyContributionExists).unwrap(),
            "4002"
        );
        let code: ErrorCode = serde_json::from_str("3002").unwrap();
        assert_eq!(code, ErrorCode::EmailAlreadyExists);
        assert!(serde_json::from_str::<ErrorCode>("77").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::ContributionNotFound.to_string(), "4001");
    }
}
