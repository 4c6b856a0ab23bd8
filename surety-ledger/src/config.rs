//! Ledger configuration.

use serde::{Deserialize, Serialize};

use surety_core::constants::{CONFIRMATION_THRESHOLD, REFUND_DELAY};

use crate::escrow::EscrowError;

/// Configuration parameters for an escrow ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Host chain identifier (for operator logs and host config files).
    pub chain_id: String,

    /// Minimum chain height for a submission to be accepted as confirmed.
    ///
    /// Compared against the absolute height supplied by the caller, never
    /// against confirmations accumulated since the payment was made.
    pub confirmation_threshold: u64,

    /// Blocks after the recorded confirmation height before refund is
    /// permitted.
    pub refund_delay: u64,
}

impl LedgerConfig {
    /// Create a configuration with the protocol defaults.
    pub fn new(chain_id: impl Into<String>) -> Self {
        Self {
            chain_id: chain_id.into(),
            confirmation_threshold: CONFIRMATION_THRESHOLD,
            refund_delay: REFUND_DELAY,
        }
    }

    /// Set the confirmation threshold.
    pub fn with_confirmation_threshold(mut self, height: u64) -> Self {
        self.confirmation_threshold = height;
        self
    }

    /// Set the refund delay.
    pub fn with_refund_delay(mut self, blocks: u64) -> Self {
        self.refund_delay = blocks;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), EscrowError> {
        if self.chain_id.is_empty() {
            return Err(EscrowError::Config("chain ID is required".into()));
        }

        if self.confirmation_threshold == 0 {
            return Err(EscrowError::Config(
                "confirmation threshold must be at least 1".into(),
            ));
        }

        if self.refund_delay == 0 {
            return Err(EscrowError::Config(
                "refund delay must be at least 1 block".into(),
            ));
        }

        Ok(())
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self::new("surety-mainnet")
    }
}
