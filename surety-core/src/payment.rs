//! Payment records and address bindings.
//!
//! A payment record is the single-slot ledger entry for a Bitcoin address:
//! at most one in-flight or settled payment per hash160. Submitting a second
//! payment for the same address overwrites the first — the ledger keeps the
//! latest state, not a history.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::address::Hash160;
use crate::error::{Error, Result};
use crate::principal::PrincipalId;

/// A 32-byte Bitcoin transaction id.
///
/// Like [`Hash160`], this is opaque here: the escrow trusts that an oracle
/// has already established what the transaction pays and to whom.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TxHash([u8; 32]);

impl TxHash {
    /// The zero hash (used as a sentinel).
    pub const ZERO: Self = Self([0u8; 32]);

    /// Create a transaction id from raw bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Create from hex string.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|e| Error::invalid_tx_id(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(Error::invalid_tx_id(format!(
                "expected 32 bytes, got {}",
                bytes.len()
            )));
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxHash({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl AsRef<[u8]> for TxHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Binds a principal to the Bitcoin address it claims to control.
///
/// One binding per owner; re-registering replaces the previous binding
/// entirely. Bindings are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressBinding {
    /// The host-chain principal that registered the address.
    pub owner: PrincipalId,
    /// The claimed Bitcoin public-key-hash.
    pub hash160: Hash160,
}

impl AddressBinding {
    /// Create a new binding.
    pub fn new(owner: PrincipalId, hash160: Hash160) -> Self {
        Self { owner, hash160 }
    }
}

/// A payment ledger entry, keyed by the paid-to [`Hash160`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// The Bitcoin address the payment went to.
    pub hash160: Hash160,
    /// Transaction id of the Bitcoin payment (oracle-supplied).
    pub tx_hash: TxHash,
    /// Amount paid, in satoshis.
    pub amount_sats: u64,
    /// Host-chain height at which the payment was accepted.
    pub block_height: u64,
    /// Whether the payment is currently confirmed.
    pub confirmed: bool,
}

impl PaymentRecord {
    /// Create a confirmed record for a payment accepted at `block_height`.
    pub fn confirmed(hash160: Hash160, tx_hash: TxHash, amount_sats: u64, block_height: u64) -> Self {
        Self {
            hash160,
            tx_hash,
            amount_sats,
            block_height,
            confirmed: true,
        }
    }

    /// The refunded form of this record: amount and height zeroed, the
    /// confirmed flag cleared. Identity (`hash160`, `tx_hash`) is preserved.
    pub fn refunded(&self) -> Self {
        Self {
            hash160: self.hash160,
            tx_hash: self.tx_hash,
            amount_sats: 0,
            block_height: 0,
            confirmed: false,
        }
    }

    /// Check whether this record is in the refunded state.
    pub fn is_refunded(&self) -> bool {
        self.amount_sats == 0 && self.block_height == 0 && !self.confirmed
    }
}
