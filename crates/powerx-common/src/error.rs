//! Error types and error codes for PowerX
//!
//! This module defines:
//! - `OrgError`: typed failures returned by every organization operation
//! - `ErrorCode`: structured error codes for outer response layers

use serde::{Deserialize, Serialize};

pub type OrgResult<T> = std::result::Result<T, OrgError>;

/// Failures surfaced by the organization services.
///
/// Business-rule violations (`Validation`, `Conflict`, `NotFound`) are always
/// returned to the caller as-is. `Store` wraps infrastructure faults and is
/// never retried internally.
#[derive(thiserror::Error, Debug)]
pub enum OrgError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Store(#[from] sea_orm::DbErr),

    #[error("password hash failed: {0}")]
    Hash(String),

    #[error("invariant violated: {0}")]
    Invariant(String),

    #[error("operation cancelled")]
    Cancelled,
}

impl OrgError {
    pub fn validation(msg: impl Into<String>) -> Self {
        OrgError::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        OrgError::Conflict(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        OrgError::NotFound(msg.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, OrgError::Validation(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, OrgError::Conflict(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, OrgError::NotFound(_))
    }

    /// Whether the failure was caused by the caller's input rather than the system.
    pub fn is_business(&self) -> bool {
        matches!(
            self,
            OrgError::Validation(_) | OrgError::Conflict(_) | OrgError::NotFound(_)
        )
    }

    pub fn error_code(&self) -> ErrorCode<'static> {
        match self {
            OrgError::Validation(_) => PARAMETER_VALIDATE_ERROR,
            OrgError::Conflict(_) => RESOURCE_CONFLICT,
            OrgError::NotFound(_) => RESOURCE_NOT_FOUND,
            OrgError::Store(_) => DATA_ACCESS_ERROR,
            OrgError::Hash(_) | OrgError::Invariant(_) => SERVER_ERROR,
            OrgError::Cancelled => REQUEST_CANCELLED,
        }
    }
}

/// Error code structure for API responses
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorCode<'a> {
    pub code: i32,
    pub message: &'a str,
}

pub const SUCCESS: ErrorCode<'static> = ErrorCode {
    code: 0,
    message: "success",
};

pub const DATA_ACCESS_ERROR: ErrorCode<'static> = ErrorCode {
    code: 10002,
    message: "data access error",
};

pub const PARAMETER_VALIDATE_ERROR: ErrorCode<'static> = ErrorCode {
    code: 20002,
    message: "parameter validate error",
};

pub const RESOURCE_NOT_FOUND: ErrorCode<'static> = ErrorCode {
    code: 20004,
    message: "resource not found",
};

pub const RESOURCE_CONFLICT: ErrorCode<'static> = ErrorCode {
    code: 20005,
    message: "resource conflict",
};

pub const REQUEST_CANCELLED: ErrorCode<'static> = ErrorCode {
    code: 20006,
    message: "request cancelled",
};

pub const SERVER_ERROR: ErrorCode<'static> = ErrorCode {
    code: 30000,
    message: "server error",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            OrgError::validation("account is empty").error_code(),
            PARAMETER_VALIDATE_ERROR
        );
        assert_eq!(
            OrgError::conflict("account exists").error_code(),
            RESOURCE_CONFLICT
        );
        assert_eq!(OrgError::not_found("employee").error_code(), RESOURCE_NOT_FOUND);
        assert_eq!(
            OrgError::from(sea_orm::DbErr::Custom("boom".to_string())).error_code(),
            DATA_ACCESS_ERROR
        );
        assert_eq!(OrgError::Cancelled.error_code(), REQUEST_CANCELLED);
    }

    #[test]
    fn test_business_classification() {
        assert!(OrgError::validation("x").is_business());
        assert!(OrgError::conflict("x").is_business());
        assert!(OrgError::not_found("x").is_business());
        assert!(!OrgError::Hash("x".to_string()).is_business());
        assert!(!OrgError::Store(sea_orm::DbErr::Custom("x".to_string())).is_business());
    }

    #[test]
    fn test_error_display() {
        let err = OrgError::not_found("department 7");
        assert_eq!(err.to_string(), "not found: department 7");
    }
}
