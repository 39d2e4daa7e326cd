use criterion::{criterion_group, BenchmarkId, Criterion, Throughput};
use rans_codec::{compress, decompress, Order};

use super::{zipfian_input, INPUT_SIZES};

fn order0_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("order0_decompress");
    for &size in INPUT_SIZES {
        let data = zipfian_input(size);
        let packed = compress(&data, Order::Zero).unwrap();
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &packed, |b, packed| {
            b.iter(|| decompress(packed).unwrap());
        });
    }
    group.finish();
}

fn order1_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("order1_decompress");
    for &size in INPUT_SIZES {
        let data = zipfian_input(size);
        let packed = compress(&data, Order::One).unwrap();
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &packed, |b, packed| {
            b.iter(|| decompress(packed).unwrap());
        });
    }
    group.finish();
}

criterion_group! {
    name = decompress_benches;
    config = Criterion::default();
    targets = order0_decompress, order1_decompress
}
