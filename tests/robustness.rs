//! Mutation/robustness tests: a well-formed block run through byte flips,
//! truncation, and oversized size fields must either still round-trip
//! exactly or fail cleanly with `Err` — never panic or read out of bounds.

mod common;

use common::random_bytes;
use rans_codec::{compress, decompress, Order};

fn assert_no_panic(mutated: &[u8]) {
    let _ = std::panic::catch_unwind(|| decompress(mutated))
        .unwrap_or_else(|_| panic!("decompress panicked on mutated input: {mutated:?}"));
}

#[test]
fn truncated_blocks_never_panic() {
    let data = random_bytes(2000, 1);
    for order in [Order::Zero, Order::One] {
        let packed = compress(&data, order).unwrap();
        for cut in 0..packed.len() {
            assert_no_panic(&packed[..cut]);
        }
    }
}

#[test]
fn single_byte_flips_never_panic() {
    let data = random_bytes(500, 2);
    for order in [Order::Zero, Order::One] {
        let packed = compress(&data, order).unwrap();
        for i in 0..packed.len() {
            let mut mutated = packed.clone();
            mutated[i] ^= 0xff;
            assert_no_panic(&mutated);
        }
    }
}

#[test]
fn oversized_orig_size_is_rejected_or_harmless() {
    let data = random_bytes(100, 3);
    let packed = compress(&data, Order::Zero).unwrap();

    let mut mutated = packed.clone();
    mutated[5..9].copy_from_slice(&u32::MAX.to_le_bytes());
    assert_no_panic(&mutated);
    assert!(decompress(&mutated).is_err());
}

#[test]
fn oversized_comp_size_is_rejected() {
    let data = random_bytes(100, 4);
    let packed = compress(&data, Order::Zero).unwrap();

    let mut mutated = packed.clone();
    mutated[1..5].copy_from_slice(&u32::MAX.to_le_bytes());
    assert_no_panic(&mutated);
    assert!(decompress(&mutated).is_err());
}

#[test]
fn garbage_input_is_rejected_or_harmless() {
    for seed in 0..20u64 {
        let garbage = random_bytes(64, 1000 + seed);
        assert_no_panic(&garbage);
    }
}

#[test]
fn empty_input_is_rejected() {
    assert!(decompress(&[]).is_err());
}
