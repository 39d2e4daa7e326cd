//! Encoder/decoder symbol table entries.
//!
//! Grounded in `rANS_static.c`'s `RansEncSymbol`/`RansDecSymbol32`. The
//! reciprocal-division idiom precomputes a `StrengthReducedU32` (state here
//! is 32-bit) so the encode hot path avoids a runtime integer division.

use crate::TF_SHIFT;
use strength_reduce::StrengthReducedU32;

/// Per-symbol data the encoder needs for one [`crate::rans::enc_put_symbol`]
/// call: the renormalization threshold `x_max` and a precomputed reciprocal
/// for `x / freq`.
#[readonly::make]
#[derive(Clone, Debug)]
pub struct EncSymbol {
    #[readonly]
    pub start: u16,
    #[readonly]
    pub freq: u16,
    pub(crate) x_max: u32,
    pub(crate) reciprocal: StrengthReducedU32,
}

impl EncSymbol {
    pub fn new(start: u16, freq: u16) -> Self {
        let safe_freq = if freq == 0 { 1 } else { freq as u32 };
        Self {
            start,
            freq,
            x_max: (freq as u32) << (32 - TF_SHIFT - 8),
            reciprocal: StrengthReducedU32::new(safe_freq),
        }
    }
}

impl Default for EncSymbol {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

/// Per-symbol data the decoder needs: cumulative start and frequency.
#[readonly::make]
#[derive(Clone, Copy, Debug, Default)]
pub struct DecSymbol {
    #[readonly]
    pub start: u16,
    #[readonly]
    pub freq: u16,
}
