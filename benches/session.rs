//! Benchmarks for a [`Session`].

use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use linering::{Config, Session};
use std::{cell::Cell, hint::black_box, time::Duration};

// Number of records retained by the session.
const CAPACITY: usize = 1024;

// Number of records to append in a single chunk.
const BATCH_SIZE: usize = 64;

// Size of a single record, including delimiter.
const RECORD_SIZE: usize = 128;

criterion_main!(benches);
criterion_group! {
    name = benches;
    config = Criterion::default()
        .warm_up_time(Duration::from_secs(3))
        .measurement_time(Duration::from_secs(15));
    targets = append_bench, read_bench
}

/// A chunk holding a batch of records.
fn chunk(seed: usize) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(BATCH_SIZE * RECORD_SIZE);
    for record in 0..BATCH_SIZE {
        let byte = b'a' + ((seed + record) % 26) as u8;
        bytes.extend(std::iter::repeat_n(byte, RECORD_SIZE - 1));
        bytes.push(b'\n');
    }

    bytes
}

fn session() -> Session {
    Session::new(Config::default().with_capacity(CAPACITY)).expect("Valid config")
}

fn append_bench(c: &mut Criterion) {
    let session = session();
    let seed = Cell::new(0);

    let mut group = c.benchmark_group("session");
    group.throughput(Throughput::BytesDecimal((BATCH_SIZE * RECORD_SIZE) as _));
    group.bench_function("append", |bencher| {
        bencher.iter_batched(
            || {
                // Different records for every iteration.
                seed.set(seed.get() + 1);
                chunk(seed.get())
            },
            |chunk| {
                // Append records, evicting once the session is full.
                session.append(&chunk).expect("Should append records");
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn read_bench(c: &mut Criterion) {
    // Fill the session to capacity.
    let session = session();
    for seed in 0..(CAPACITY / BATCH_SIZE) {
        session.append(&chunk(seed)).expect("Should append records");
    }

    let content_len = session.content_len() as u64;
    let offset = Cell::new(0);

    let mut group = c.benchmark_group("session");
    group.throughput(Throughput::BytesDecimal(RECORD_SIZE as _));
    group.bench_function("read_from", |bencher| {
        bencher.iter(|| {
            // Read the next record, wrapping around at end of content.
            let bytes = session
                .read_from(offset.get(), RECORD_SIZE)
                .expect("Offset within content");

            offset.set((offset.get() + bytes.len() as u64) % content_len);
            black_box(bytes)
        })
    });
    group.finish();
}
