//! RLE frequency table wire codec.

pub mod codec;
