//! Cross-chain payment escrow for Surety.
//!
//! This crate provides the confirmation/refund state machine: a principal
//! registers a Bitcoin address it controls, submits proof of a payment to
//! that address, and the payment becomes refundable if it sits unclaimed
//! past a timeout.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │                        ESCROW PAYMENT FLOW                         │
//! │                                                                    │
//! │  1. register(owner, hash160)                                       │
//! │     └─ binds the caller to the Bitcoin address it claims           │
//! │                                                                    │
//! │  2. submit_payment(sender, hash160, tx_hash, sats, height)         │
//! │     └─ requires sender's registered address == hash160             │
//! │     └─ requires height >= confirmation threshold                   │
//! │     └─ writes the record + increments the counter, atomically      │
//! │                                                                    │
//! │  3. refund(hash160, tx_hash, height)       (anyone may call)       │
//! │     └─ requires height >= recorded height + refund delay           │
//! │     └─ zeroes amount/height, clears confirmed; counter untouched   │
//! └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use surety_core::{Hash160, PrincipalId, TxHash};
//! use surety_ledger::{EscrowLedger, LedgerConfig};
//! use surety_storage::MemoryStorage;
//!
//! let storage = Arc::new(MemoryStorage::new());
//! let ledger = EscrowLedger::new(storage, LedgerConfig::default()).unwrap();
//!
//! let alice = PrincipalId::account("ST1PQHQKV0RJXZFY1DGD29ZWHZFJFZ7Z1Q9QZB1M2").unwrap();
//! let hash160 = Hash160::from_bytes([1u8; 20]);
//! let tx_hash = TxHash::from_bytes([2u8; 32]);
//!
//! ledger.register(&alice, hash160).unwrap();
//! let receipt = ledger
//!     .submit_payment(&alice, hash160, tx_hash, 1_000_000, 10_001)
//!     .unwrap();
//! assert_eq!(receipt.total_payments, 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod config;
mod escrow;

#[cfg(test)]
mod proptest;

pub use config::LedgerConfig;
pub use escrow::{EscrowError, EscrowLedger, RefundReceipt, SubmitReceipt};
