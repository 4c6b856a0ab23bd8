//! In-memory storage implementation.
//!
//! The backend every test and embedded host constructs: all tables behind a
//! single `RwLock`, so state-mutating calls serialize and the record+counter
//! commit in [`EscrowStore::record_confirmation`] is one critical section.

use std::collections::HashMap;

use parking_lot::RwLock;

use surety_core::{AddressBinding, Hash160, PaymentRecord, PrincipalId, Result};

use crate::traits::{AddressStore, EscrowStore, PaymentStore};

#[derive(Debug, Default)]
struct Tables {
    bindings: HashMap<PrincipalId, Hash160>,
    payments: HashMap<Hash160, PaymentRecord>,
    total_payments: u64,
}

/// In-memory escrow storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    tables: RwLock<Tables>,
}

impl MemoryStorage {
    /// Create an empty storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl AddressStore for MemoryStorage {
    fn get_binding(&self, owner: &PrincipalId) -> Result<Option<Hash160>> {
        Ok(self.tables.read().bindings.get(owner).copied())
    }

    fn put_binding(&self, binding: &AddressBinding) -> Result<()> {
        self.tables
            .write()
            .bindings
            .insert(binding.owner.clone(), binding.hash160);
        Ok(())
    }
}

impl PaymentStore for MemoryStorage {
    fn get_payment(&self, hash160: &Hash160) -> Result<Option<PaymentRecord>> {
        Ok(self.tables.read().payments.get(hash160).cloned())
    }

    fn put_payment(&self, record: &PaymentRecord) -> Result<()> {
        self.tables
            .write()
            .payments
            .insert(record.hash160, record.clone());
        Ok(())
    }

    fn total_payments(&self) -> Result<u64> {
        Ok(self.tables.read().total_payments)
    }
}

impl EscrowStore for MemoryStorage {
    fn record_confirmation(&self, record: &PaymentRecord) -> Result<u64> {
        let mut tables = self.tables.write();
        tables.payments.insert(record.hash160, record.clone());
        tables.total_payments += 1;
        Ok(tables.total_payments)
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }
}
