use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use lzbs_encoder::{EncoderConfig, StreamEncoder};
use lzbs_tests::{compressible, incompressible};

fn encode_all(config: EncoderConfig, data: &[u8]) -> Vec<u8> {
    let mut encoder = StreamEncoder::with_config(config, Vec::new()).unwrap();
    encoder.write(data).unwrap();
    encoder.finish().unwrap()
}

fn bench_encode_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_throughput");

    for size_kb in [4, 64, 1024] {
        let data = compressible(size_kb * 1024);
        group.throughput(Throughput::Bytes((size_kb * 1024) as u64));
        group.bench_with_input(
            BenchmarkId::new("compressible", format!("{size_kb}kb")),
            &data,
            |b, data| b.iter(|| encode_all(EncoderConfig::default(), data)),
        );
    }

    group.finish();
}

fn bench_encode_modes(c: &mut Criterion) {
    let data = compressible(256 * 1024);
    let mut group = c.benchmark_group("encode_modes");
    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("fast", |b| {
        b.iter(|| encode_all(EncoderConfig::default(), &data));
    });

    group.bench_function("high_compression", |b| {
        let config = EncoderConfig {
            high_compression: true,
            ..EncoderConfig::default()
        };
        b.iter(|| encode_all(config, &data));
    });

    group.finish();
}

fn bench_encode_raw_fallback(c: &mut Criterion) {
    // Incompressible input exercises the compress-then-discard path.
    let data = incompressible(256 * 1024);
    let mut group = c.benchmark_group("encode_raw_fallback");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("incompressible", |b| {
        b.iter(|| encode_all(EncoderConfig::default(), &data));
    });
    group.finish();
}

fn bench_encode_small_writes(c: &mut Criterion) {
    // Many sub-block writes stress the accumulator rather than LZ4.
    let data = compressible(64 * 1024);
    c.bench_function("encode_64b_writes", |b| {
        b.iter(|| {
            let mut encoder = StreamEncoder::new(Vec::new());
            for chunk in data.chunks(64) {
                encoder.write(chunk).unwrap();
            }
            encoder.finish().unwrap()
        });
    });
}

criterion_group!(
    benches,
    bench_encode_throughput,
    bench_encode_modes,
    bench_encode_raw_fallback,
    bench_encode_small_writes
);
criterion_main!(benches);
