//! Escrow protocol constants.

/// Minimum host-chain height at which a submitted payment is accepted as
/// confirmed.
///
/// The check is against the absolute chain height, not against a number of
/// confirmations accumulated since the payment itself: a submission fails
/// until the chain reaches this height, regardless of when the Bitcoin
/// payment occurred.
pub const CONFIRMATION_THRESHOLD: u64 = 10_000;

/// Number of blocks after a payment's recorded confirmation height before
/// the payment becomes refundable.
///
/// A refund at exactly `block_height + REFUND_DELAY` is permitted; anything
/// earlier is rejected.
pub const REFUND_DELAY: u64 = 10_000;
