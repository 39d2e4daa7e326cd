//! Serializes and deserializes quantized frequency tables with run-length
//! encoding over present symbols, matching the table-writing loops in
//! `rans_compress_O0`/`O1` and the table-reading loops in
//! `rans_uncompress_O0`/`O1`.

use crate::error::Result;
use crate::rans::primitive::FwdCursor;
use crate::rans::symbol::{DecSymbol, EncSymbol};
use crate::TOTFREQ;
use anyhow::ensure;

/// Writes one row's worth of present symbols, returning the `EncSymbol`
/// built for each.
///
/// A present symbol gets its own index byte unless it falls inside an
/// already-announced run; a run-length byte follows a symbol's index byte
/// only when the *previous* numeric symbol was also present (the point at
/// which the encoder first knows there's a run worth compressing).
pub fn write_row(cp: &mut Vec<u8>, freq: &[u32; 256]) -> [EncSymbol; 256] {
    let mut syms: [EncSymbol; 256] = std::array::from_fn(|_| EncSymbol::default());
    let mut x: u32 = 0;
    let mut rle: i32 = 0;

    for j in 0..256usize {
        if freq[j] == 0 {
            continue;
        }

        if rle > 0 {
            rle -= 1;
        } else {
            cp.push(j as u8);
            if j > 0 && freq[j - 1] != 0 {
                let mut r = j + 1;
                while r < 256 && freq[r] != 0 {
                    r += 1;
                }
                rle = (r - (j + 1)) as i32;
                cp.push(rle as u8);
            }
        }

        let f = freq[j];
        if f < 128 {
            cp.push(f as u8);
        } else {
            cp.push((0x80 | (f >> 8)) as u8);
            cp.push((f & 0xff) as u8);
        }

        syms[j] = EncSymbol::new(x as u16, f as u16);
        x += f;
    }
    cp.push(0);
    syms
}

/// Reads one row back into caller-provided (zeroed) buffers: the
/// `DecSymbol` table and the slot→symbol reverse lookup `r[0..TOTFREQ)`.
///
/// `zero_means_totfreq` and `apply_off_by_one_fill` gate two historical
/// decoder leniencies that `rans_uncompress_O1` applies but
/// `rans_uncompress_O0` does not: a wire frequency of `0` meaning
/// `TOTFREQ`, and filling the last slot from the second-to-last one when
/// the row's cumulative sum lands one short of `TOTFREQ`. Order-0 callers
/// must pass `false` for both so a row that relies on either leniency is
/// rejected instead of silently accepted.
pub fn read_row(
    cp: &mut FwdCursor,
    zero_means_totfreq: bool,
    apply_off_by_one_fill: bool,
    syms: &mut [DecSymbol; 256],
    r: &mut [u8],
) -> Result<()> {
    debug_assert_eq!(r.len(), TOTFREQ as usize);
    let mut rle: i32 = 0;
    let mut x: u32 = 0;

    ensure!(cp.remaining() >= 1, "table: truncated row, expected a symbol byte");
    let mut j: i32 = cp.get_u8() as i32;

    loop {
        ensure!(cp.remaining() >= 1, "table: truncated row, expected a frequency byte");
        let mut f = cp.get_u8() as u32;
        if f >= 128 {
            ensure!(cp.remaining() >= 1, "table: truncated row, expected a second frequency byte");
            f = ((f & 0x7f) << 8) | cp.get_u8() as u32;
        }
        if f == 0 && zero_means_totfreq {
            f = TOTFREQ;
        }

        let c = x;
        ensure!(x + f <= TOTFREQ, "table: row cumulative frequency exceeds TOTFREQ");

        for y in c..c + f {
            r[y as usize] = j as u8;
        }
        syms[j as usize] = DecSymbol { start: c as u16, freq: f as u16 };
        x += f;

        let next_is_continuation = rle == 0 && cp.remaining() >= 1 && cp.peek_u8() as i32 == j + 1;
        if next_is_continuation {
            j = cp.get_u8() as i32;
            ensure!(cp.remaining() >= 1, "table: truncated row, expected a run-length byte");
            rle = cp.get_u8() as i32;
        } else if rle > 0 {
            rle -= 1;
            j += 1;
            ensure!(j <= 255, "table: symbol index overflow past 255 in row RLE");
        } else {
            ensure!(cp.remaining() >= 1, "table: truncated row, expected a symbol byte");
            j = cp.get_u8() as i32;
        }

        if j == 0 {
            break;
        }
    }

    if apply_off_by_one_fill {
        ensure!(
            x == TOTFREQ - 1 || x == TOTFREQ,
            "table: row cumulative sum {x} out of range"
        );
        if x == TOTFREQ - 1 {
            r[(TOTFREQ - 1) as usize] = r[(TOTFREQ - 2) as usize];
        }
    } else {
        ensure!(x == TOTFREQ, "table: row cumulative sum {x} out of range");
    }

    Ok(())
}

/// Writes the order-0 table: a single row terminated by `\x00`.
pub fn write_table_order0(freq: &[u32; 256]) -> (Vec<u8>, [EncSymbol; 256]) {
    let mut cp = Vec::new();
    let syms = write_row(&mut cp, freq);
    (cp, syms)
}

/// Reads the order-0 table back. Neither historical leniency applies here:
/// `rans_uncompress_O0` rejects an `F==0` row and a cumulative sum one
/// short of `TOTFREQ` rather than papering over either.
pub fn read_table_order0(cp: &mut FwdCursor) -> Result<([DecSymbol; 256], Vec<u8>)> {
    let mut syms = [DecSymbol::default(); 256];
    let mut r = vec![0u8; TOTFREQ as usize];
    read_row(cp, false, false, &mut syms, &mut r)?;
    Ok((syms, r))
}

/// Writes the order-1 table: present contexts run-length encoded the same
/// way present symbols are within a row, each followed by its row,
/// terminated by a trailing `\x00`.
pub fn write_table_order1(rows: &[[u32; 256]], used: &[bool; 256]) -> (Vec<u8>, Vec<[EncSymbol; 256]>) {
    let mut cp = Vec::new();
    let mut syms_per_ctx: Vec<[EncSymbol; 256]> = vec![std::array::from_fn(|_| EncSymbol::default()); 256];
    let mut rle_i: i32 = 0;

    for i in 0..256usize {
        if !used[i] {
            continue;
        }

        if rle_i > 0 {
            rle_i -= 1;
        } else {
            cp.push(i as u8);
            if i > 0 && used[i - 1] {
                let mut r = i + 1;
                while r < 256 && used[r] {
                    r += 1;
                }
                rle_i = (r - (i + 1)) as i32;
                cp.push(rle_i as u8);
            }
        }

        syms_per_ctx[i] = write_row(&mut cp, &rows[i]);
    }
    cp.push(0);
    (cp, syms_per_ctx)
}

/// Reads the order-1 table back into caller-provided (zeroed) buffers,
/// indexed directly by raw context byte. Contexts never seen on the wire
/// keep their all-zero defaults, so an illegal transition on malformed
/// input decodes deterministically to symbol `0` over and over rather than
/// reading uninitialized memory — the reference achieves the same end via
/// a `map[]` indirection defaulting unseen contexts to row 0; we skip the
/// indirection since it is a cache-locality optimization with no wire- or
/// semantics-level effect (see `DESIGN.md`).
pub fn read_table_order1(
    cp: &mut FwdCursor,
    syms: &mut [[DecSymbol; 256]],
    tables: &mut [Vec<u8>],
) -> Result<()> {
    debug_assert_eq!(syms.len(), 256);
    debug_assert_eq!(tables.len(), 256);
    let mut rle_i: i32 = 0;

    ensure!(cp.remaining() >= 1, "table: truncated order-1 table, expected a context byte");
    let mut i: i32 = cp.get_u8() as i32;

    loop {
        read_row(cp, true, true, &mut syms[i as usize], &mut tables[i as usize])?;

        let next_is_continuation =
            rle_i == 0 && cp.remaining() >= 1 && cp.peek_u8() as i32 == i + 1;

        if next_is_continuation {
            i = cp.get_u8() as i32;
            ensure!(cp.remaining() >= 1, "table: truncated order-1 table, expected a run-length byte");
            rle_i = cp.get_u8() as i32;
        } else if rle_i > 0 {
            rle_i -= 1;
            i += 1;
            ensure!(i <= 255, "table: context index overflow past 255 in table RLE");
        } else {
            ensure!(cp.remaining() >= 1, "table: truncated order-1 table, expected a context byte");
            i = cp.get_u8() as i32;
        }

        if i == 0 {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_row_fresh(
        cp: &mut FwdCursor,
        zero_means_totfreq: bool,
        apply_off_by_one_fill: bool,
    ) -> Result<([DecSymbol; 256], Vec<u8>)> {
        let mut syms = [DecSymbol::default(); 256];
        let mut r = vec![0u8; TOTFREQ as usize];
        read_row(cp, zero_means_totfreq, apply_off_by_one_fill, &mut syms, &mut r)?;
        Ok((syms, r))
    }

    #[test]
    fn row_round_trips_for_a_single_symbol() {
        let mut freq = [0u32; 256];
        freq[0] = TOTFREQ;
        let mut cp = Vec::new();
        let enc_syms = write_row(&mut cp, &freq);
        assert_eq!(enc_syms[0].freq, TOTFREQ as u16);

        let mut fwd = FwdCursor::new(&cp);
        let (dec_syms, r) = decode_row_fresh(&mut fwd, true, true).unwrap();
        assert_eq!(dec_syms[0].freq, TOTFREQ as u16);
        assert_eq!(r[0], 0);
        assert_eq!(r[(TOTFREQ - 1) as usize], 0);
    }

    #[test]
    fn row_round_trips_for_a_run_of_consecutive_symbols() {
        let mut freq = [0u32; 256];
        freq[5] = 1000;
        freq[6] = 2000;
        freq[7] = 1095;
        freq[9] = 1;
        let sum: u32 = freq.iter().sum();
        assert_eq!(sum, TOTFREQ);

        let mut cp = Vec::new();
        let enc_syms = write_row(&mut cp, &freq);

        let mut fwd = FwdCursor::new(&cp);
        let (dec_syms, r) = decode_row_fresh(&mut fwd, true, true).unwrap();
        for j in [5usize, 6, 7, 9] {
            assert_eq!(dec_syms[j].freq, enc_syms[j].freq);
            assert_eq!(dec_syms[j].start, enc_syms[j].start);
        }
        assert_eq!(r[0], 5);
        assert_eq!(r[999], 5);
        assert_eq!(r[1000], 6);
        assert_eq!(r[(TOTFREQ - 1) as usize], 9);
    }

    #[test]
    fn row_handles_symbol_zero_and_frequencies_above_127() {
        let mut freq = [0u32; 256];
        freq[0] = 200;
        freq[255] = TOTFREQ - 200;

        let mut cp = Vec::new();
        let enc_syms = write_row(&mut cp, &freq);

        let mut fwd = FwdCursor::new(&cp);
        let (dec_syms, r) = decode_row_fresh(&mut fwd, true, true).unwrap();
        assert_eq!(dec_syms[0].freq, enc_syms[0].freq);
        assert_eq!(dec_syms[255].freq, enc_syms[255].freq);
        assert_eq!(r[0], 0);
        assert_eq!(r[(TOTFREQ - 1) as usize], 255);
    }

    #[test]
    fn zero_means_totfreq_is_gated_by_the_flag() {
        // symbol 5, wire frequency byte 0 (the "F==0 aliases TOTFREQ" escape), terminator.
        let bytes = [5u8, 0, 0];

        let mut fwd = FwdCursor::new(&bytes);
        let (syms, _) = decode_row_fresh(&mut fwd, true, true).unwrap();
        assert_eq!(syms[5].freq, TOTFREQ as u16);

        let mut fwd = FwdCursor::new(&bytes);
        assert!(decode_row_fresh(&mut fwd, false, false).is_err());
    }

    #[test]
    fn off_by_one_slot_fill_is_gated_by_the_flag() {
        // symbol 5, two-byte frequency 4095 (one short of TOTFREQ), terminator.
        let bytes = [5u8, 0x8F, 0xFF, 0];

        let mut fwd = FwdCursor::new(&bytes);
        let (_, r) = decode_row_fresh(&mut fwd, true, true).unwrap();
        assert_eq!(r[(TOTFREQ - 1) as usize], 5);

        let mut fwd = FwdCursor::new(&bytes);
        assert!(decode_row_fresh(&mut fwd, true, false).is_err());
    }

    #[test]
    fn read_table_order0_rejects_a_row_with_cumulative_sum_one_short() {
        let bytes = [5u8, 0x8F, 0xFF, 0];
        let mut fwd = FwdCursor::new(&bytes);
        assert!(read_table_order0(&mut fwd).is_err());
    }

    #[test]
    fn order1_table_round_trips_across_several_contexts() {
        let mut rows = [[0u32; 256]; 256];
        let mut used = [false; 256];
        for ctx in [0usize, 1, 2, 200] {
            rows[ctx][ctx] = TOTFREQ;
            used[ctx] = true;
        }

        let (bytes, enc_syms) = write_table_order1(&rows, &used);

        let mut syms = vec![[DecSymbol::default(); 256]; 256];
        let mut tables = vec![vec![0u8; TOTFREQ as usize]; 256];
        let mut fwd = FwdCursor::new(&bytes);
        read_table_order1(&mut fwd, &mut syms, &mut tables).unwrap();

        for ctx in [0usize, 1, 2, 200] {
            assert_eq!(syms[ctx][ctx].freq, enc_syms[ctx][ctx].freq);
            assert_eq!(tables[ctx][0], ctx as u8);
        }
    }
}
