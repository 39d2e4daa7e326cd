pub mod compress;
pub mod decompress;

use rand::prelude::{Distribution, SmallRng};
use rand::SeedableRng;
use rand_distr::Zipf;

pub const INPUT_SIZES: &[usize] = &[1 << 10, 1 << 16, 1 << 20];

/// Skewed input so the codecs have something worth compressing, instead of
/// benchmarking the incompressible worst case exclusively.
pub fn zipfian_input(len: usize) -> Vec<u8> {
    let mut rng = SmallRng::seed_from_u64(42);
    let distribution = Zipf::new(256u64, 1.2).unwrap();
    (0..len)
        .map(|_| (distribution.sample(&mut rng) as u64 - 1) as u8)
        .collect()
}
