use criterion::{criterion_group, BenchmarkId, Criterion, Throughput};
use rans_codec::{compress, Order};

use super::{zipfian_input, INPUT_SIZES};

fn order0_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("order0_compress");
    for &size in INPUT_SIZES {
        let data = zipfian_input(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| compress(data, Order::Zero).unwrap());
        });
    }
    group.finish();
}

fn order1_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("order1_compress");
    for &size in INPUT_SIZES {
        let data = zipfian_input(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| compress(data, Order::One).unwrap());
        });
    }
    group.finish();
}

criterion_group! {
    name = compress_benches;
    config = Criterion::default();
    targets = order0_compress, order1_compress
}
