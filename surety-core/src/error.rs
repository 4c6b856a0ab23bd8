//! Error types for Surety.
//!
//! Provides structured errors with:
//! - Unique error codes for host-facing responses
//! - Source error chaining
//! - Client vs server error categorization
//!
//! The codes cover the whole system: the escrow operation errors defined in
//! the ledger crate map onto this taxonomy through their `code()` accessor.

use std::io;
use thiserror::Error;

/// Result type for Surety operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error codes for host-facing responses.
///
/// Codes are structured as:
/// - 1xxx: Validation errors (client)
/// - 2xxx: Not found errors (client)
/// - 3xxx: State errors (client)
/// - 4xxx: Authorization errors (client)
/// - 5xxx: Storage errors (server)
/// - 6xxx: Internal errors (server)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ErrorCode {
    // Validation errors (1xxx)
    InvalidAddress = 1001,
    InvalidTxId = 1002,
    InvalidPrincipal = 1003,
    InvalidConfig = 1004,

    // Not found errors (2xxx)
    PaymentNotFound = 2001,

    // State errors (3xxx)
    NotConfirmed = 3001,
    TimeoutNotReached = 3002,

    // Auth errors (4xxx)
    Unauthorized = 4001,

    // Storage errors (5xxx)
    StorageRead = 5001,
    StorageWrite = 5002,
    StorageInit = 5003,

    // Internal errors (6xxx)
    Serialization = 6001,
    Internal = 6002,
}

impl ErrorCode {
    /// Get the numeric code.
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Check if this is a client error (4xx equivalent).
    pub fn is_client_error(self) -> bool {
        (1000..5000).contains(&self.code())
    }

    /// Check if this is a server error (5xx equivalent).
    pub fn is_server_error(self) -> bool {
        self.code() >= 5000
    }

    /// Check if this error is retryable.
    pub fn is_retryable(self) -> bool {
        matches!(self, ErrorCode::StorageRead | ErrorCode::StorageWrite)
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Errors that can occur in the Surety core and storage layers.
///
/// Operation-level failures (unauthorized submission, unconfirmed height,
/// missing payment, early refund) live in the ledger crate's error type;
/// this type covers input validation and the storage/serialization plumbing
/// beneath it.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid Bitcoin address hash.
    #[error("[{code}] invalid address: {message}")]
    InvalidAddress {
        code: ErrorCode,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid Bitcoin transaction id.
    #[error("[{code}] invalid transaction id: {message}")]
    InvalidTxId { code: ErrorCode, message: String },

    /// Invalid principal identifier.
    #[error("[{code}] invalid principal: {message}")]
    InvalidPrincipal { code: ErrorCode, message: String },

    /// Storage operation failed.
    #[error("[{code}] storage error: {message}")]
    Storage {
        code: ErrorCode,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Serialization/deserialization failed.
    #[error("[{code}] serialization error: {message}")]
    Serialization {
        code: ErrorCode,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal error.
    #[error("[{code}] internal error: {message}")]
    Internal { code: ErrorCode, message: String },
}

impl Error {
    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::InvalidAddress { code, .. } => *code,
            Error::InvalidTxId { code, .. } => *code,
            Error::InvalidPrincipal { code, .. } => *code,
            Error::Storage { code, .. } => *code,
            Error::Serialization { code, .. } => *code,
            Error::Internal { code, .. } => *code,
        }
    }

    /// Check if this is a client error.
    pub fn is_client_error(&self) -> bool {
        self.code().is_client_error()
    }

    /// Check if this is a server error.
    pub fn is_server_error(&self) -> bool {
        self.code().is_server_error()
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        self.code().is_retryable()
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl Error {
    /// Create an InvalidAddress error.
    pub fn invalid_address(message: impl Into<String>) -> Self {
        Error::InvalidAddress {
            code: ErrorCode::InvalidAddress,
            message: message.into(),
            source: None,
        }
    }

    /// Create an InvalidTxId error.
    pub fn invalid_tx_id(message: impl Into<String>) -> Self {
        Error::InvalidTxId {
            code: ErrorCode::InvalidTxId,
            message: message.into(),
        }
    }

    /// Create an InvalidPrincipal error.
    pub fn invalid_principal(message: impl Into<String>) -> Self {
        Error::InvalidPrincipal {
            code: ErrorCode::InvalidPrincipal,
            message: message.into(),
        }
    }

    /// Create a Storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Error::Storage {
            code: ErrorCode::StorageRead,
            message: message.into(),
            source: None,
        }
    }

    /// Create a Storage error for backend open/initialization failures.
    pub fn storage_init(message: impl Into<String>) -> Self {
        Error::Storage {
            code: ErrorCode::StorageInit,
            message: message.into(),
            source: None,
        }
    }

    /// Create an Internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal {
            code: ErrorCode::Internal,
            message: message.into(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<bincode::Error> for Error {
    fn from(e: bincode::Error) -> Self {
        Error::Serialization {
            code: ErrorCode::Serialization,
            message: e.to_string(),
            source: Some(Box::new(e)),
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Storage {
            code: ErrorCode::StorageRead,
            message: e.to_string(),
            source: Some(Box::new(e)),
        }
    }
}

impl From<hex::FromHexError> for Error {
    fn from(e: hex::FromHexError) -> Self {
        Error::InvalidAddress {
            code: ErrorCode::InvalidAddress,
            message: e.to_string(),
            source: Some(Box::new(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ErrorCode::InvalidAddress.code(), 1001);
        assert_eq!(ErrorCode::PaymentNotFound.code(), 2001);
        assert_eq!(ErrorCode::NotConfirmed.code(), 3001);
        assert_eq!(ErrorCode::StorageRead.code(), 5001);
    }

    #[test]
    fn test_error_categorization() {
        assert!(ErrorCode::InvalidAddress.is_client_error());
        assert!(!ErrorCode::InvalidAddress.is_server_error());

        assert!(ErrorCode::TimeoutNotReached.is_client_error());
        assert!(ErrorCode::Unauthorized.is_client_error());

        assert!(ErrorCode::StorageWrite.is_server_error());
        assert!(!ErrorCode::StorageWrite.is_client_error());
    }

    #[test]
    fn test_retryable() {
        assert!(ErrorCode::StorageRead.is_retryable());
        assert!(ErrorCode::StorageWrite.is_retryable());
        assert!(!ErrorCode::StorageInit.is_retryable());
        assert!(!ErrorCode::Unauthorized.is_retryable());
    }

    #[test]
    fn test_error_display() {
        let e = Error::invalid_address("bad hex");
        assert!(e.to_string().contains("E1001"));
        assert!(e.to_string().contains("bad hex"));
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::InvalidAddress.to_string(), "E1001");
        assert_eq!(ErrorCode::Internal.to_string(), "E6002");
    }

    #[test]
    fn test_from_bincode() {
        // Deserialize invalid data as a String to trigger a bincode error
        let bad_data = [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff];
        let bincode_err: bincode::Error = bincode::deserialize::<String>(&bad_data).unwrap_err();
        let err: Error = bincode_err.into();
        assert_eq!(err.code(), ErrorCode::Serialization);
        assert!(err.is_server_error());
    }

    #[test]
    fn test_from_hex() {
        let hex_err = hex::decode("zz").unwrap_err();
        let err: Error = hex_err.into();
        assert_eq!(err.code(), ErrorCode::InvalidAddress);
        assert!(err.is_client_error());
    }

    #[test]
    fn test_storage_constructors() {
        let e = Error::storage("disk full");
        assert_eq!(e.code(), ErrorCode::StorageRead);
        assert!(e.is_server_error());

        let e = Error::storage_init("cannot open database");
        assert_eq!(e.code(), ErrorCode::StorageInit);
        assert!(!e.is_retryable());
    }
}
