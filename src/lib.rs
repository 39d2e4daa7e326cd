//! A byte-oriented order-0/order-1 rANS entropy codec.
//!
//! `compress`/`decompress` operate purely in memory: given a byte slice and
//! a model order, produce a self-describing block (header + frequency
//! table + rANS payload) that [`decompress`] can invert without any side
//! channel.
//!
//! ```
//! use rans_codec::{compress, decompress, Order};
//!
//! let data = b"the quick brown fox jumps over the lazy dog";
//! let packed = compress(data, Order::One).unwrap();
//! let unpacked = decompress(&packed).unwrap();
//! assert_eq!(unpacked, data);
//! ```

pub mod block;
pub mod error;
pub mod model;
pub mod rans;
pub mod scratch;
pub mod table;

pub use error::Result;

/// Shift defining the frequency quantum: all normalized frequencies are
/// expressed out of `TOTFREQ = 1 << TF_SHIFT`.
pub const TF_SHIFT: u32 = 12;

/// Total frequency budget every row of a frequency table normalizes to.
pub const TOTFREQ: u32 = 1 << TF_SHIFT;

/// Size in bytes of the block header: `order (1) + comp_size (4) + orig_size (4)`.
pub const HEADER_SIZE: usize = 9;

/// Selects the frequency model used to compress a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    /// A single marginal byte histogram.
    Zero = 0,
    /// A histogram conditioned on the immediately preceding byte.
    One = 1,
}

/// Compresses `input` into a self-describing block under the given model
/// order.
///
/// Inputs shorter than 4 bytes are compressed as order-0 regardless of
/// `order`, since there is no meaningful context to condition on; the
/// block header still reports which codec actually ran.
pub fn compress(input: &[u8], order: Order) -> Result<Vec<u8>> {
    match order {
        Order::Zero => block::order0::compress(input),
        Order::One => block::order1::compress(input),
    }
}

/// Decompresses a block produced by [`compress`], dispatching on the order
/// byte stored in its header.
pub fn decompress(input: &[u8]) -> Result<Vec<u8>> {
    use anyhow::ensure;
    ensure!(!input.is_empty(), "header: empty input");
    match input[0] {
        0 => block::order0::decompress(input),
        1 => block::order1::decompress(input),
        other => anyhow::bail!("header: unknown order byte {other}"),
    }
}
