//! Shared helpers for the integration tests.

use rand::prelude::{Distribution, SmallRng};
use rand::{Rng, SeedableRng};
use rand_distr::Zipf;

/// Turns on `env_logger` so `RUST_LOG=rans_codec=trace` surfaces the
/// histogram/normalize trace output while a test runs. Safe to call from
/// every test; only the first call in a given test binary does anything.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Input sizes exercised explicitly for round-trip coverage: small edge
/// cases around the 4-byte order-1 quarter-split boundary, plus a few
/// larger sizes.
pub const ROUNDTRIP_SIZES: &[usize] = &[0, 1, 3, 4, 5, 7, 8, 15, 16, 100, 1000, 1 << 16];

/// A byte sequence whose symbol frequencies follow a Zipfian distribution,
/// so normalization actually has skewed counts to work with instead of a
/// uniform histogram.
pub fn zipfian_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let distribution = Zipf::new(256u64, 1.2).unwrap();
    (0..len)
        .map(|_| (distribution.sample(&mut rng) as u64 - 1) as u8)
        .collect::<Vec<u8>>()
}

/// Uniformly random bytes.
pub fn random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen::<u8>()).collect()
}
