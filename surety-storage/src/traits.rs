//! Storage traits.

use surety_core::{AddressBinding, Hash160, PaymentRecord, PrincipalId, Result};

/// Store for address bindings (principal -> claimed hash160).
pub trait AddressStore {
    /// Get the registered address for an owner.
    fn get_binding(&self, owner: &PrincipalId) -> Result<Option<Hash160>>;

    /// Store a binding, replacing any previous binding for the owner.
    fn put_binding(&self, binding: &AddressBinding) -> Result<()>;
}

/// Store for payment records (hash160 -> at most one record).
pub trait PaymentStore {
    /// Get the payment record for an address.
    fn get_payment(&self, hash160: &Hash160) -> Result<Option<PaymentRecord>>;

    /// Store a payment record, replacing any previous record at that address.
    fn put_payment(&self, record: &PaymentRecord) -> Result<()>;

    /// Get the count of payments confirmed so far.
    fn total_payments(&self) -> Result<u64>;
}

/// Combined escrow store.
pub trait EscrowStore: AddressStore + PaymentStore {
    /// Atomically store a confirmed payment record and increment the payment
    /// counter, returning the new total. Either both writes land or neither.
    fn record_confirmation(&self, record: &PaymentRecord) -> Result<u64>;

    /// Flush all pending writes.
    fn flush(&self) -> Result<()>;
}
