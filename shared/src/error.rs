//! Unified error system for the Ecologika marketplace
//!
//! Provides [`ErrorCode`] (standardized numeric codes), [`MarketError`]
//! (rich error type with code, message and details) and the
//! [`MarketResult`] alias used throughout the workspace.
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Catalog errors
//! - 4xxx: Checkout errors
//! - 5xxx: Approval errors

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Standardized error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // ==================== General (0xxx) ====================
    /// Unknown / internal error
    InternalError,
    /// Malformed request or argument
    InvalidRequest,
    /// Input failed validation
    ValidationFailed,
    /// Referenced entity does not exist
    NotFound,
    /// Backend (store/auth/storage) call failed
    BackendError,

    // ==================== Authentication (1xxx) ====================
    /// No authenticated session
    NotAuthenticated,
    /// Credentials rejected by the auth provider
    InvalidCredentials,

    // ==================== Permission (2xxx) ====================
    /// Authenticated but not allowed
    PermissionDenied,
    /// Account exists but has not been approved yet
    AccountNotApproved,

    // ==================== Catalog (3xxx) ====================
    /// Listing is inactive or not approved
    ListingUnavailable,

    // ==================== Checkout (4xxx) ====================
    /// Requested quantity outside [1, stock]
    QuantityOutOfRange,
    /// Shipping form incomplete
    ShippingIncomplete,

    // ==================== Approval (5xxx) ====================
    /// Entity is no longer pending
    NotPending,
}

impl ErrorCode {
    /// Numeric code for logs and API payloads
    pub fn code(&self) -> u16 {
        match self {
            ErrorCode::InternalError => 1,
            ErrorCode::InvalidRequest => 2,
            ErrorCode::ValidationFailed => 3,
            ErrorCode::NotFound => 4,
            ErrorCode::BackendError => 5,
            ErrorCode::NotAuthenticated => 1001,
            ErrorCode::InvalidCredentials => 1002,
            ErrorCode::PermissionDenied => 2001,
            ErrorCode::AccountNotApproved => 2002,
            ErrorCode::ListingUnavailable => 3001,
            ErrorCode::QuantityOutOfRange => 4001,
            ErrorCode::ShippingIncomplete => 4002,
            ErrorCode::NotPending => 5001,
        }
    }

    /// Default human-readable message for the code
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::InternalError => "Internal error",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Not found",
            ErrorCode::BackendError => "Backend call failed",
            ErrorCode::NotAuthenticated => "Not authenticated",
            ErrorCode::InvalidCredentials => "Invalid credentials",
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AccountNotApproved => "Account pending approval",
            ErrorCode::ListingUnavailable => "Listing unavailable",
            ErrorCode::QuantityOutOfRange => "Quantity out of range",
            ErrorCode::ShippingIncomplete => "Shipping details incomplete",
            ErrorCode::NotPending => "Entity is not pending",
        }
    }

    /// Whether the user can fix this error by correcting input
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            ErrorCode::ValidationFailed
                | ErrorCode::InvalidCredentials
                | ErrorCode::QuantityOutOfRange
                | ErrorCode::ShippingIncomplete
        )
    }
}

/// Marketplace error with structured error code and details
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct MarketError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl MarketError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    /// Create a not authenticated error
    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    /// Create a permission denied error
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::PermissionDenied, msg)
    }

    /// Create a backend error
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::BackendError, msg)
    }

    /// Create an invalid request error
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }
}

/// Result type for marketplace operations
pub type MarketResult<T> = Result<T, MarketError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_ranges() {
        assert_eq!(ErrorCode::InternalError.code(), 1);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::PermissionDenied.code(), 2001);
        assert_eq!(ErrorCode::QuantityOutOfRange.code(), 4001);
    }

    #[test]
    fn test_default_message() {
        let err = MarketError::new(ErrorCode::NotFound);
        assert_eq!(err.message, "Not found");
    }

    #[test]
    fn test_with_detail() {
        let err = MarketError::validation("Missing required field").with_detail("field", "email");
        let details = err.details.expect("details present");
        assert_eq!(details.get("field").and_then(|v| v.as_str()), Some("email"));
    }

    #[test]
    fn test_user_correctable() {
        assert!(ErrorCode::ShippingIncomplete.is_user_correctable());
        assert!(!ErrorCode::BackendError.is_user_correctable());
    }
}
