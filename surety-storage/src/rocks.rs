//! RocksDB storage implementation.

use std::path::Path;
use std::sync::Arc;

use rocksdb::{ColumnFamilyDescriptor, Options, WriteBatch, DB};
use tracing::{debug, info};

use surety_core::{AddressBinding, Error, Hash160, PaymentRecord, PrincipalId, Result};

use crate::traits::{AddressStore, EscrowStore, PaymentStore};

/// Column family names.
mod cf {
    pub const DEFAULT: &str = "default";
    pub const OWNERS: &str = "owners";
    pub const PAYMENTS: &str = "payments";
    pub const META: &str = "meta";
}

/// Metadata keys.
mod meta {
    pub const TOTAL_PAYMENTS: &[u8] = b"total_payments";
}

/// RocksDB-backed storage.
///
/// Owner bindings are keyed by the principal's canonical `kind:id` rendering;
/// payment records by the raw hash160 bytes. Record values are
/// bincode-encoded.
pub struct RocksStorage {
    db: Arc<DB>,
}

impl RocksStorage {
    /// Open or create a storage at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening RocksDB at {:?}", path);

        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_names = [cf::DEFAULT, cf::OWNERS, cf::PAYMENTS, cf::META];

        let cf_descriptors: Vec<_> = cf_names
            .iter()
            .map(|name| ColumnFamilyDescriptor::new(*name, Options::default()))
            .collect();

        let db = DB::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| Error::storage_init(e.to_string()))?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Open with a temporary directory (for testing).
    pub fn open_temp() -> Result<Self> {
        let dir = tempfile::tempdir().map_err(|e| Error::storage_init(e.to_string()))?;
        let path = dir.path().to_path_buf();
        // Keep the temp dir alive by forgetting it (won't be cleaned up on drop)
        std::mem::forget(dir);
        Self::open(path)
    }

    fn get_cf(&self, cf_name: &str, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let cf = self
            .db
            .cf_handle(cf_name)
            .ok_or_else(|| Error::storage(format!("missing column family: {}", cf_name)))?;
        self.db
            .get_cf(&cf, key)
            .map_err(|e| Error::storage(e.to_string()))
    }

    fn put_cf(&self, cf_name: &str, key: &[u8], value: &[u8]) -> Result<()> {
        let cf = self
            .db
            .cf_handle(cf_name)
            .ok_or_else(|| Error::storage(format!("missing column family: {}", cf_name)))?;
        self.db
            .put_cf(&cf, key, value)
            .map_err(|e| Error::storage(e.to_string()))
    }

    fn get_u64(&self, cf_name: &str, key: &[u8]) -> Result<Option<u64>> {
        match self.get_cf(cf_name, key)? {
            Some(bytes) => {
                if bytes.len() != 8 {
                    return Err(Error::storage("invalid u64 encoding"));
                }
                let arr: [u8; 8] = bytes.as_slice().try_into().unwrap();
                Ok(Some(u64::from_be_bytes(arr)))
            }
            None => Ok(None),
        }
    }

    fn owner_key(owner: &PrincipalId) -> Vec<u8> {
        owner.to_string().into_bytes()
    }
}

impl Clone for RocksStorage {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
        }
    }
}

impl AddressStore for RocksStorage {
    fn get_binding(&self, owner: &PrincipalId) -> Result<Option<Hash160>> {
        match self.get_cf(cf::OWNERS, &Self::owner_key(owner))? {
            Some(bytes) => {
                let arr: [u8; 20] = bytes
                    .as_slice()
                    .try_into()
                    .map_err(|_| Error::storage("invalid hash160 encoding"))?;
                Ok(Some(Hash160::from_bytes(arr)))
            }
            None => Ok(None),
        }
    }

    fn put_binding(&self, binding: &AddressBinding) -> Result<()> {
        self.put_cf(
            cf::OWNERS,
            &Self::owner_key(&binding.owner),
            binding.hash160.as_bytes(),
        )
    }
}

impl PaymentStore for RocksStorage {
    fn get_payment(&self, hash160: &Hash160) -> Result<Option<PaymentRecord>> {
        match self.get_cf(cf::PAYMENTS, hash160.as_bytes())? {
            Some(bytes) => {
                let record: PaymentRecord = bincode::deserialize(&bytes)?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    fn put_payment(&self, record: &PaymentRecord) -> Result<()> {
        let bytes = bincode::serialize(record)?;
        self.put_cf(cf::PAYMENTS, record.hash160.as_bytes(), &bytes)
    }

    fn total_payments(&self) -> Result<u64> {
        Ok(self
            .get_u64(cf::META, meta::TOTAL_PAYMENTS)?
            .unwrap_or(0))
    }
}

impl EscrowStore for RocksStorage {
    fn record_confirmation(&self, record: &PaymentRecord) -> Result<u64> {
        let payments_cf = self
            .db
            .cf_handle(cf::PAYMENTS)
            .ok_or_else(|| Error::storage("missing payments cf"))?;
        let meta_cf = self
            .db
            .cf_handle(cf::META)
            .ok_or_else(|| Error::storage("missing meta cf"))?;

        let total = self.total_payments()? + 1;

        let mut batch = WriteBatch::default();

        // Store record
        let record_bytes = bincode::serialize(record)?;
        batch.put_cf(&payments_cf, record.hash160.as_bytes(), record_bytes);

        // Update counter
        batch.put_cf(&meta_cf, meta::TOTAL_PAYMENTS, total.to_be_bytes());

        self.db
            .write(batch)
            .map_err(|e| Error::storage(e.to_string()))?;

        debug!(
            "Stored confirmed payment for {} at height {}",
            record.hash160, record.block_height
        );
        Ok(total)
    }

    fn flush(&self) -> Result<()> {
        self.db.flush().map_err(|e| Error::storage(e.to_string()))
    }
}
