//! Escrow ledger benchmarks.
//!
//! Benchmarks:
//! - Address registration throughput
//! - Payment submission (authorize + record + count)
//! - Refund application

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use surety_core::{Hash160, PrincipalId, TxHash};
use surety_ledger::{EscrowLedger, LedgerConfig};
use surety_storage::MemoryStorage;

fn test_ledger() -> EscrowLedger<MemoryStorage> {
    EscrowLedger::new(Arc::new(MemoryStorage::new()), LedgerConfig::default()).unwrap()
}

fn hash160(i: u64) -> Hash160 {
    let mut bytes = [0u8; 20];
    bytes[..8].copy_from_slice(&i.to_le_bytes());
    Hash160::from_bytes(bytes)
}

fn tx_hash(i: u64) -> TxHash {
    let mut bytes = [0u8; 32];
    bytes[..8].copy_from_slice(&i.to_le_bytes());
    TxHash::from_bytes(bytes)
}

fn bench_register(c: &mut Criterion) {
    let ledger = test_ledger();
    let sender = PrincipalId::account("bench-sender").unwrap();

    let mut group = c.benchmark_group("escrow/register");
    group.throughput(Throughput::Elements(1));
    group.bench_function("overwrite", |b| {
        let mut i = 0u64;
        b.iter(|| {
            i += 1;
            ledger.register(&sender, black_box(hash160(i))).unwrap()
        })
    });
    group.finish();
}

fn bench_submit_payment(c: &mut Criterion) {
    let ledger = test_ledger();
    let sender = PrincipalId::account("bench-sender").unwrap();
    let addr = hash160(1);
    ledger.register(&sender, addr).unwrap();

    let mut group = c.benchmark_group("escrow/submit_payment");
    group.throughput(Throughput::Elements(1));
    group.bench_function("confirmed", |b| {
        let mut i = 0u64;
        b.iter(|| {
            i += 1;
            ledger
                .submit_payment(&sender, addr, black_box(tx_hash(i)), 1_000_000, 10_001)
                .unwrap()
        })
    });
    group.finish();
}

fn bench_refund(c: &mut Criterion) {
    let ledger = test_ledger();
    let sender = PrincipalId::account("bench-sender").unwrap();
    let addr = hash160(1);
    ledger.register(&sender, addr).unwrap();

    c.bench_function("escrow/refund", |b| {
        b.iter_batched(
            || {
                ledger
                    .submit_payment(&sender, addr, tx_hash(1), 1_000_000, 10_001)
                    .unwrap();
            },
            |_| ledger.refund(black_box(addr), tx_hash(1), 20_002).unwrap(),
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_register, bench_submit_payment, bench_refund);
criterion_main!(benches);
