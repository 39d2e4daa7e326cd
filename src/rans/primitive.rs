//! The 32-bit rANS primitive layer: state init, per-symbol encode, flush,
//! decoder init, and renormalization.
//!
//! Grounded in `rANS_static.c`'s `RansEncPutSymbol` / `RansEncFlush` /
//! `RansDecInit` / `RansDecGet` / `RansDecAdvance` / `RansDecRenorm*`. Every
//! higher layer (`src::block::order0`, `src::block::order1`) is built on
//! top of exactly these operations and nothing else.

use crate::error::Result;
use crate::rans::symbol::EncSymbol;
use crate::{TF_SHIFT, TOTFREQ};
use anyhow::ensure;

/// Interval lower bound. State renormalizes to stay within
/// `[RANS_BYTE_L, RANS_BYTE_L << 8)`.
pub const RANS_BYTE_L: u32 = 1 << 23;

/// Writes bytes from the tail of a buffer toward the head, mirroring the
/// reference's `uint8_t **ptr` cursor, decremented before each write.
pub struct RevCursor<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> RevCursor<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        let pos = buf.len();
        Self { buf, pos }
    }

    #[inline(always)]
    pub fn put_u8(&mut self, b: u8) {
        self.pos -= 1;
        self.buf[self.pos] = b;
    }

    /// Writes `bytes` at the new (decremented) position, preserving order —
    /// used by [`enc_flush`] to lay a little-endian word down in one move.
    #[inline(always)]
    pub fn put_block(&mut self, bytes: &[u8]) {
        self.pos -= bytes.len();
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
    }

    pub fn pos(&self) -> usize {
        self.pos
    }
}

/// Reads bytes forward from the start of a buffer.
pub struct FwdCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> FwdCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    #[inline(always)]
    pub fn get_u8(&mut self) -> u8 {
        let b = self.buf[self.pos];
        self.pos += 1;
        b
    }

    /// Looks at the next byte without consuming it. The table RLE decoder
    /// uses this to decide whether a run continues.
    #[inline(always)]
    pub fn peek_u8(&self) -> u8 {
        self.buf[self.pos]
    }
}

/// Initializes an encoder state to the interval lower bound.
#[inline(always)]
pub fn enc_init() -> u32 {
    RANS_BYTE_L
}

/// Encodes one symbol into `x`, writing renormalization bytes backward
/// through `cursor` as needed first.
#[inline(always)]
pub fn enc_put_symbol(x: &mut u32, cursor: &mut RevCursor, sym: &EncSymbol) {
    while *x >= sym.x_max {
        cursor.put_u8((*x & 0xff) as u8);
        *x >>= 8;
    }
    let q = *x / sym.reciprocal;
    let r = *x - q * sym.freq as u32;
    *x = (q << TF_SHIFT) + r + sym.start as u32;
}

/// Flushes the final state as 4 little-endian bytes.
#[inline(always)]
pub fn enc_flush(x: u32, cursor: &mut RevCursor) {
    cursor.put_block(&x.to_le_bytes());
}

/// Reads 4 little-endian bytes forward to initialize a decoder state.
#[inline(always)]
pub fn dec_init(cursor: &mut FwdCursor) -> Result<u32> {
    ensure!(cursor.remaining() >= 4, "payload: truncated rANS state init");
    let mut bytes = [0u8; 4];
    for b in bytes.iter_mut() {
        *b = cursor.get_u8();
    }
    let x = u32::from_le_bytes(bytes);
    ensure!(x >= RANS_BYTE_L, "payload: rANS init state below the interval lower bound");
    Ok(x)
}

/// Extracts the slot in `[0, TOTFREQ)` addressed by the current state.
#[inline(always)]
pub fn dec_get(x: u32) -> u32 {
    x & (TOTFREQ - 1)
}

/// Advances the decoder state past one decoded symbol.
///
/// Uses a 64-bit intermediate so a malformed stream (an out-of-range
/// initial state past what [`dec_init`] would ever produce honestly) wraps
/// the same way the reference's unsigned 32-bit arithmetic does, instead of
/// tripping Rust's debug-mode overflow check.
#[inline(always)]
pub fn dec_advance(x: u32, start: u32, freq: u32) -> u32 {
    let advanced = freq as u64 * (x >> TF_SHIFT) as u64 + dec_get(x) as u64;
    advanced.wrapping_sub(start as u64) as u32
}

/// Renormalizes, refusing to read past `end` (the true end of the payload).
///
/// The reference splits this into a fast unchecked path used while more
/// than 8 bytes remain and this bounds-checked path near the tail. We use
/// the bounds-checked path throughout: the two are byte-for-byte
/// equivalent given the same input, and the fast path is a speed
/// optimization, not a behavioral difference.
#[inline(always)]
pub fn dec_renorm_safe(x: &mut u32, cursor: &mut FwdCursor, end: usize) {
    while *x < RANS_BYTE_L && cursor.pos() < end {
        *x = (*x << 8) | cursor.get_u8() as u32;
    }
}
