mod benchmarks;

criterion::criterion_main! {
    benchmarks::compress::compress_benches,
    benchmarks::decompress::decompress_benches,
}
