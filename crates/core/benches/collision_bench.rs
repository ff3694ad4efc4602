use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use hashprobe_core::generate::RandomMessages;
use hashprobe_core::hash::format_digest;
use hashprobe_core::{CollisionCounter, HashAlgorithm};

fn bench_hash_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash_32_byte_messages");
    let messages: Vec<Vec<u8>> = RandomMessages::new(10_000, 32, 1).map(|m| m.bytes).collect();
    group.throughput(Throughput::Bytes((messages.len() * 32) as u64));

    for algorithm in HashAlgorithm::ALL {
        group.bench_function(algorithm.name(), |b| {
            b.iter(|| {
                for message in &messages {
                    black_box(algorithm.digest(message));
                }
            });
        });
    }

    group.finish();
}

fn bench_collision_counter(c: &mut Criterion) {
    let mut group = c.benchmark_group("collision_counter");
    group.throughput(Throughput::Elements(10_000));

    group.bench_function("10k_unique", |b| {
        b.iter(|| {
            let mut counter = CollisionCounter::with_capacity(10_000);
            for i in 0..10_000 {
                black_box(counter.insert(&format!("data_{}", i), &format!("{:X}", i)));
            }
        });
    });

    group.bench_function("10k_dense_collisions", |b| {
        b.iter(|| {
            let mut counter = CollisionCounter::with_capacity(100);
            for i in 0..10_000 {
                black_box(counter.insert(&format!("data_{}", i), &format!("{:X}", i % 100)));
            }
        });
    });

    group.finish();
}

fn bench_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("throughput");
    let pairs: Vec<(String, String)> = RandomMessages::new(100_000, 4, 2)
        .map(|m| {
            let hash = format_digest(HashAlgorithm::Adler32.digest(&m.bytes));
            (m.repr, hash)
        })
        .collect();

    group.throughput(Throughput::Elements(pairs.len() as u64));
    group.bench_function("100k_adler32_pairs", |b| {
        b.iter(|| {
            let mut counter = CollisionCounter::with_capacity(pairs.len());
            counter.extend(pairs.iter().map(|(d, h)| (d.as_str(), h.as_str())));
            black_box(counter.finish())
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_hash_algorithms,
    bench_collision_counter,
    bench_throughput
);
criterion_main!(benches);
