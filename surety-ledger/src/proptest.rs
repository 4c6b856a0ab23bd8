//! Property-based tests for the escrow state machine.
//!
//! Uses proptest to verify invariants hold for arbitrary inputs.

use proptest::prelude::*;
use std::sync::Arc;

use surety_core::constants::{CONFIRMATION_THRESHOLD, REFUND_DELAY};
use surety_core::{Hash160, PrincipalId, TxHash};
use surety_storage::MemoryStorage;

use crate::config::LedgerConfig;
use crate::escrow::EscrowLedger;

// ============================================================================
// Arbitrary Implementations
// ============================================================================

/// Generate arbitrary Hash160 values.
fn arb_hash160() -> impl Strategy<Value = Hash160> {
    prop::array::uniform20(any::<u8>()).prop_map(Hash160::from_bytes)
}

/// Generate arbitrary TxHash values.
fn arb_tx_hash() -> impl Strategy<Value = TxHash> {
    prop::array::uniform32(any::<u8>()).prop_map(TxHash::from_bytes)
}

/// Generate heights on both sides of the confirmation threshold.
fn arb_height() -> impl Strategy<Value = u64> {
    0..(CONFIRMATION_THRESHOLD * 4)
}

fn ledger() -> (EscrowLedger<MemoryStorage>, PrincipalId) {
    let storage = Arc::new(MemoryStorage::new());
    let ledger = EscrowLedger::new(storage, LedgerConfig::default()).unwrap();
    let sender = PrincipalId::account("prop-sender").unwrap();
    (ledger, sender)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// The registry keeps only the latest binding, whatever the sequence.
    #[test]
    fn register_last_write_wins(addresses in prop::collection::vec(arb_hash160(), 1..20)) {
        let (ledger, sender) = ledger();

        for addr in &addresses {
            ledger.register(&sender, *addr).unwrap();
        }

        let last = *addresses.last().unwrap();
        prop_assert_eq!(ledger.registered_address(&sender).unwrap(), Some(last));
    }

    /// The counter counts exactly the successful submissions, and never
    /// moves on a failed one.
    #[test]
    fn counter_counts_successful_submits(
        submissions in prop::collection::vec((arb_hash160(), arb_tx_hash(), arb_height()), 1..30),
        registered in arb_hash160(),
    ) {
        let (ledger, sender) = ledger();
        ledger.register(&sender, registered).unwrap();

        let mut expected = 0u64;
        for (addr, tx_hash, height) in submissions {
            let before = ledger.total_payments().unwrap();
            let result = ledger.submit_payment(&sender, addr, tx_hash, 1_000, height);
            let after = ledger.total_payments().unwrap();

            if result.is_ok() {
                expected += 1;
                prop_assert_eq!(after, before + 1);
            } else {
                prop_assert_eq!(after, before);
            }
        }

        prop_assert_eq!(ledger.total_payments().unwrap(), expected);
    }

    /// A record, whenever it is confirmed, sits at or above the threshold.
    #[test]
    fn confirmed_implies_threshold_reached(
        tx_hash in arb_tx_hash(),
        height in arb_height(),
        registered in arb_hash160(),
    ) {
        let (ledger, sender) = ledger();
        ledger.register(&sender, registered).unwrap();

        let _ = ledger.submit_payment(&sender, registered, tx_hash, 1_000, height);

        if let Some(record) = ledger.payment(&registered).unwrap() {
            if record.confirmed {
                prop_assert!(record.block_height >= CONFIRMATION_THRESHOLD);
            }
        }
    }

    /// Refunding never changes the counter and always zeroes the record.
    #[test]
    fn refund_preserves_counter_and_zeroes_record(
        registered in arb_hash160(),
        tx_hash in arb_tx_hash(),
        amount in 1u64..21_000_000 * 100_000_000,
        height in CONFIRMATION_THRESHOLD..(CONFIRMATION_THRESHOLD * 2),
    ) {
        let (ledger, sender) = ledger();
        ledger.register(&sender, registered).unwrap();
        ledger.submit_payment(&sender, registered, tx_hash, amount, height).unwrap();

        let total_before = ledger.total_payments().unwrap();
        ledger.refund(registered, tx_hash, height + REFUND_DELAY).unwrap();

        prop_assert_eq!(ledger.total_payments().unwrap(), total_before);
        let record = ledger.payment(&registered).unwrap().unwrap();
        prop_assert!(record.is_refunded());
        prop_assert_eq!(record.tx_hash, tx_hash);
    }

    /// A refund one block before the deadline is always rejected.
    #[test]
    fn refund_below_deadline_always_rejected(
        registered in arb_hash160(),
        tx_hash in arb_tx_hash(),
        height in CONFIRMATION_THRESHOLD..(CONFIRMATION_THRESHOLD * 2),
        shortfall in 1u64..REFUND_DELAY,
    ) {
        let (ledger, sender) = ledger();
        ledger.register(&sender, registered).unwrap();
        ledger.submit_payment(&sender, registered, tx_hash, 1_000, height).unwrap();

        let result = ledger.refund(registered, tx_hash, height + REFUND_DELAY - shortfall);
        prop_assert!(result.is_err());

        // Record is untouched by the failed refund
        let record = ledger.payment(&registered).unwrap().unwrap();
        prop_assert!(record.confirmed);
        prop_assert_eq!(record.block_height, height);
    }
}
