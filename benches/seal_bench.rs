use base64::{engine::general_purpose::STANDARD, Engine as _};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use crypto_box::aead::OsRng;
use crypto_box::SecretKey;
use ghcrew::core::cipher::{seal, RepositoryPublicKey};
use std::time::Duration;

/// Generate a payload of given size.
fn generate_payload(size: usize) -> String {
    "x".repeat(size)
}

/// Benchmark sealing with varying payload sizes.
fn bench_seal(c: &mut Criterion) {
    let mut group = c.benchmark_group("seal");
    group.sample_size(50);
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));

    let secret = SecretKey::generate(&mut OsRng);
    let key = RepositoryPublicKey {
        key_id: "bench".to_string(),
        key: STANDARD.encode(secret.public_key().as_bytes()),
    };
    // GitHub caps secret values at 48 KB
    let sizes = [40, 256, 1024, 4096, 49152];

    for size in sizes {
        let payload = generate_payload(size);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(
            BenchmarkId::new("seal", format!("{}B", size)),
            &payload,
            |b, payload| {
                b.iter(|| {
                    let sealed = seal(black_box(&key), black_box(payload)).unwrap();
                    black_box(sealed);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_seal);
criterion_main!(benches);
