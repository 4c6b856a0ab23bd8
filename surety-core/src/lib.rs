//! Surety Core - Fundamental types for the Surety payment escrow.
//!
//! This crate provides the domain types shared across the Surety system:
//!
//! - [`address`] - Bitcoin address hashes (hash160)
//! - [`payment`] - Payment records, transaction ids, and address bindings
//! - [`principal`] - Authenticated host-chain caller identities
//! - [`constants`] - Confirmation threshold and refund delay
//!
//! # Example
//!
//! ```rust
//! use surety_core::{Hash160, PaymentRecord, PrincipalId, TxHash};
//!
//! // The principal registering a Bitcoin address it controls
//! let owner = PrincipalId::account("ST1PQHQKV0RJXZFY1DGD29ZWHZFJFZ7Z1Q9QZB1M2").unwrap();
//!
//! let hash160 = Hash160::from_hex("0123456789abcdef0123456789abcdef01234567").unwrap();
//! let tx_hash = TxHash::from_hex(
//!     "fedcba9876543210fedcba9876543210fedcba9876543210fedcba9876543210",
//! ).unwrap();
//!
//! // A payment accepted at height 10001
//! let record = PaymentRecord::confirmed(hash160, tx_hash, 1_000_000, 10_001);
//! assert!(record.confirmed);
//! assert_eq!(format!("{}", owner), "account:ST1PQHQKV0RJXZFY1DGD29ZWHZFJFZ7Z1Q9QZB1M2");
//! ```

pub mod address;
pub mod constants;
pub mod error;
pub mod payment;
pub mod principal;

// Re-exports for convenience
pub use address::Hash160;
pub use constants::{CONFIRMATION_THRESHOLD, REFUND_DELAY};
pub use error::{Error, ErrorCode, Result};
pub use payment::{AddressBinding, PaymentRecord, TxHash};
pub use principal::{PrincipalId, PrincipalKind};
