//! The escrow state machine.
//!
//! `EscrowLedger` tracks, per Bitcoin address:
//! - Which principal has registered the address
//! - The single in-flight or settled payment record
//! - The running count of confirmed payments

use std::sync::Arc;

use tracing::{debug, info};

use surety_core::{AddressBinding, ErrorCode, Hash160, PaymentRecord, PrincipalId, TxHash};
use surety_storage::EscrowStore;

use crate::config::LedgerConfig;

/// Errors specific to escrow operations.
#[derive(Debug, thiserror::Error)]
pub enum EscrowError {
    /// The sender has no registered address, or its registered address does
    /// not match the submitted one.
    #[error("address {hash160} is not registered to the sender")]
    Unauthorized {
        /// The address the sender tried to submit for.
        hash160: Hash160,
    },

    /// The chain has not yet reached the confirmation threshold.
    #[error("chain height {height} is below confirmation threshold {threshold}")]
    NotConfirmed {
        /// The caller-supplied current height.
        height: u64,
        /// The configured confirmation threshold.
        threshold: u64,
    },

    /// No payment record exists for the given address.
    #[error("no payment recorded for address {0}")]
    PaymentNotFound(Hash160),

    /// The refund delay has not elapsed since the recorded confirmation.
    #[error("refund locked until height {deadline}, current height is {height}")]
    TimeoutNotReached {
        /// The caller-supplied current height.
        height: u64,
        /// Height at which the payment becomes refundable.
        deadline: u64,
    },

    /// Invalid ledger configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage error.
    #[error("storage error: {0}")]
    Storage(#[from] surety_core::Error),
}

impl EscrowError {
    /// Get the host-facing error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            EscrowError::Unauthorized { .. } => ErrorCode::Unauthorized,
            EscrowError::NotConfirmed { .. } => ErrorCode::NotConfirmed,
            EscrowError::PaymentNotFound(_) => ErrorCode::PaymentNotFound,
            EscrowError::TimeoutNotReached { .. } => ErrorCode::TimeoutNotReached,
            EscrowError::Config(_) => ErrorCode::InvalidConfig,
            EscrowError::Storage(e) => e.code(),
        }
    }

    /// Check if this is a client error (retrying cannot help until the
    /// blocking condition — height or registration — changes).
    pub fn is_client_error(&self) -> bool {
        self.code().is_client_error()
    }
}

/// Result of a successful payment submission.
#[derive(Debug, Clone)]
pub struct SubmitReceipt {
    /// The address the payment was recorded against.
    pub hash160: Hash160,
    /// Transaction id of the recorded payment.
    pub tx_hash: TxHash,
    /// Chain height at which the payment was accepted.
    pub block_height: u64,
    /// Total confirmed payments after this submission.
    pub total_payments: u64,
}

/// Result of a successful refund.
#[derive(Debug, Clone)]
pub struct RefundReceipt {
    /// The refunded address.
    pub hash160: Hash160,
    /// Transaction id from the stored record.
    pub tx_hash: TxHash,
    /// Chain height at which the refund was applied.
    pub refunded_at: u64,
}

/// The escrow ledger: a deterministic state machine over a shared store.
///
/// State-mutating calls are serialized by the backing store; the ledger
/// itself holds no state besides its configuration, so it is `&self`-callable
/// and ledger handles may share a store through the `Arc`.
#[derive(Debug)]
pub struct EscrowLedger<S: EscrowStore> {
    /// The storage backend.
    storage: Arc<S>,
    /// Ledger configuration.
    config: LedgerConfig,
}

impl<S: EscrowStore> EscrowLedger<S> {
    /// Create a ledger over the given storage.
    pub fn new(storage: Arc<S>, config: LedgerConfig) -> Result<Self, EscrowError> {
        config.validate()?;
        Ok(Self { storage, config })
    }

    /// Get the ledger configuration.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Register `hash160` as the Bitcoin address controlled by `owner`.
    ///
    /// Unconditionally replaces any previous binding for the owner; no
    /// history is kept. Validating the hash160 itself (that it came from a
    /// real key) is the caller's responsibility.
    pub fn register(&self, owner: &PrincipalId, hash160: Hash160) -> Result<(), EscrowError> {
        self.storage
            .put_binding(&AddressBinding::new(owner.clone(), hash160))?;
        debug!(%owner, %hash160, "registered bitcoin address");
        Ok(())
    }

    /// Get the address registered by `owner`, if any.
    pub fn registered_address(&self, owner: &PrincipalId) -> Result<Option<Hash160>, EscrowError> {
        Ok(self.storage.get_binding(owner)?)
    }

    /// Submit proof of a Bitcoin payment to `hash160`.
    ///
    /// The sender must have registered exactly this address, and the chain
    /// must have reached the confirmation threshold. On success the payment
    /// record is written (overwriting any prior record for the address) and
    /// the payment counter incremented, atomically. Failures leave no
    /// partial state.
    pub fn submit_payment(
        &self,
        sender: &PrincipalId,
        hash160: Hash160,
        tx_hash: TxHash,
        amount_sats: u64,
        current_height: u64,
    ) -> Result<SubmitReceipt, EscrowError> {
        match self.storage.get_binding(sender)? {
            Some(registered) if registered == hash160 => {}
            _ => return Err(EscrowError::Unauthorized { hash160 }),
        }

        if current_height < self.config.confirmation_threshold {
            return Err(EscrowError::NotConfirmed {
                height: current_height,
                threshold: self.config.confirmation_threshold,
            });
        }

        let record = PaymentRecord::confirmed(hash160, tx_hash, amount_sats, current_height);
        let total_payments = self.storage.record_confirmation(&record)?;

        info!(
            %hash160,
            %tx_hash,
            amount_sats,
            block_height = current_height,
            "confirmed bitcoin payment"
        );

        Ok(SubmitReceipt {
            hash160,
            tx_hash,
            block_height: current_height,
            total_payments,
        })
    }

    /// Refund the payment recorded at `hash160`.
    ///
    /// Anyone may call this once the refund delay has elapsed since the
    /// recorded confirmation height. The record's amount and height are
    /// zeroed and its confirmed flag cleared; its identity stays in place
    /// and the payment counter is unaffected.
    ///
    /// The `tx_hash` argument is accepted for interface compatibility and is
    /// not matched against the stored record; the receipt carries the stored
    /// record's transaction id.
    pub fn refund(
        &self,
        hash160: Hash160,
        tx_hash: TxHash,
        current_height: u64,
    ) -> Result<RefundReceipt, EscrowError> {
        let record = self
            .storage
            .get_payment(&hash160)?
            .ok_or(EscrowError::PaymentNotFound(hash160))?;

        let deadline = record.block_height.saturating_add(self.config.refund_delay);
        if current_height < deadline {
            return Err(EscrowError::TimeoutNotReached {
                height: current_height,
                deadline,
            });
        }

        let refunded = record.refunded();
        self.storage.put_payment(&refunded)?;

        debug!(
            %hash160,
            requested_tx = %tx_hash,
            refunded_at = current_height,
            "refunded unclaimed payment"
        );

        Ok(RefundReceipt {
            hash160,
            tx_hash: refunded.tx_hash,
            refunded_at: current_height,
        })
    }

    /// Get the payment record for `hash160`, if any.
    pub fn payment(&self, hash160: &Hash160) -> Result<Option<PaymentRecord>, EscrowError> {
        Ok(self.storage.get_payment(hash160)?)
    }

    /// Get the count of payments confirmed so far.
    ///
    /// Counts historical confirmations: refunds do not decrement it.
    pub fn total_payments(&self) -> Result<u64, EscrowError> {
        Ok(self.storage.total_payments()?)
    }
}
