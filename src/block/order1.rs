//! Order-1 block codec: four rANS streams, each walking one quarter of the
//! input, conditioned on the previous byte. Grounded in
//! `rans_compress_O1`/`rans_uncompress_O1` in `rANS_static.c`.
//!
//! Inputs shorter than 4 bytes fall back to the order-0 codec (there's no
//! meaningful quarter-split below that), matching the reference's own
//! `in_size < 4` escape in `rans_compress`.

use crate::block::{header, order0};
use crate::error::Result;
use crate::model::normalize;
use crate::rans::{self, DecSymbol, FwdCursor, RevCursor};
use crate::scratch;
use crate::table;
use crate::{HEADER_SIZE, TOTFREQ};
use anyhow::ensure;

/// Compresses `input` as an order-1 block, or falls back to order-0 for
/// inputs shorter than 4 bytes.
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    let n = input.len();
    if n < 4 {
        return order0::compress(input);
    }

    let (table_bytes, syms) = scratch::with_zeroed_order1_histogram(|freq| {
        let marginal = crate::model::histogram::histogram_order1_into(freq, input);
        let mut used = [false; 256];
        for i in 0..256 {
            if marginal[i] > 0 {
                used[i] = true;
                normalize::normalize_order1_row(&mut freq[i]);
            }
        }
        table::codec::write_table_order1(freq.as_slice(), &used)
    });
    log::trace!("order-1 table: {} bytes for {n} input bytes", table_bytes.len());

    let cap = ((n as f64 * 1.05).ceil() as usize) + 257 * 257 * 3;
    let mut scratch_buf = vec![0u8; cap];
    let mut cursor = RevCursor::new(&mut scratch_buf);

    let mut r0 = rans::enc_init();
    let mut r1 = rans::enc_init();
    let mut r2 = rans::enc_init();
    let mut r3 = rans::enc_init();

    let isz4 = (n >> 2) as isize;
    let mut i0 = isz4 - 2;
    let mut i1 = 2 * isz4 - 2;
    let mut i2 = 3 * isz4 - 2;
    let i3_boundary = 4 * isz4 - 2;
    let mut i3 = i3_boundary;

    let mut l0 = input[(i0 + 1) as usize];
    let mut l1 = input[(i1 + 1) as usize];
    let mut l2 = input[(i2 + 1) as usize];
    let mut l3 = input[n - 1];

    let mut p = n as isize - 2;
    while p > i3_boundary {
        let c3 = input[p as usize];
        rans::enc_put_symbol(&mut r3, &mut cursor, &syms[c3 as usize][l3 as usize]);
        l3 = c3;
        p -= 1;
    }

    while i0 >= 0 {
        let c3 = input[i3 as usize];
        let c2 = input[i2 as usize];
        let c1 = input[i1 as usize];
        let c0 = input[i0 as usize];

        let s3 = &syms[c3 as usize][l3 as usize];
        let s2 = &syms[c2 as usize][l2 as usize];
        let s1 = &syms[c1 as usize][l1 as usize];
        let s0 = &syms[c0 as usize][l0 as usize];

        rans::enc_put_symbol(&mut r3, &mut cursor, s3);
        rans::enc_put_symbol(&mut r2, &mut cursor, s2);
        rans::enc_put_symbol(&mut r1, &mut cursor, s1);
        rans::enc_put_symbol(&mut r0, &mut cursor, s0);

        l3 = c3;
        l2 = c2;
        l1 = c1;
        l0 = c0;
        i0 -= 1;
        i1 -= 1;
        i2 -= 1;
        i3 -= 1;
    }

    rans::enc_put_symbol(&mut r3, &mut cursor, &syms[0][l3 as usize]);
    rans::enc_put_symbol(&mut r2, &mut cursor, &syms[0][l2 as usize]);
    rans::enc_put_symbol(&mut r1, &mut cursor, &syms[0][l1 as usize]);
    rans::enc_put_symbol(&mut r0, &mut cursor, &syms[0][l0 as usize]);

    rans::enc_flush(r3, &mut cursor);
    rans::enc_flush(r2, &mut cursor);
    rans::enc_flush(r1, &mut cursor);
    rans::enc_flush(r0, &mut cursor);

    let payload = &scratch_buf[cursor.pos()..];
    let comp_size = (table_bytes.len() + payload.len()) as u32;

    let mut out = Vec::with_capacity(HEADER_SIZE + table_bytes.len() + payload.len());
    header::write(&mut out, 1, comp_size, n as u32);
    out.extend_from_slice(&table_bytes);
    out.extend_from_slice(payload);
    Ok(out)
}

/// Decompresses an order-1 block produced by [`compress`].
pub fn decompress(input: &[u8]) -> Result<Vec<u8>> {
    let hdr = header::read(input)?;
    ensure!(hdr.order == 1, "header: expected an order-1 block, got order {}", hdr.order);

    if hdr.orig_size == 0 {
        return Ok(Vec::new());
    }

    let out_sz = hdr.orig_size as usize;

    scratch::with_zeroed_order1_decoder_tables(|syms, tables| {
        let mut cp = FwdCursor::new(&input[HEADER_SIZE..]);
        table::codec::read_table_order1(&mut cp, syms, tables)?;

        let payload = &input[HEADER_SIZE + cp.pos()..];
        ensure!(
            payload.len() >= 16,
            "payload: not enough input bytes left to initialize rANS state"
        );
        let mut pc = FwdCursor::new(payload);
        let end = payload.len();

        let mut r0 = rans::dec_init(&mut pc)?;
        let mut r1 = rans::dec_init(&mut pc)?;
        let mut r2 = rans::dec_init(&mut pc)?;
        let mut r3 = rans::dec_init(&mut pc)?;

        let mut out = vec![0u8; out_sz];
        let isz4 = out_sz >> 2;

        let mut l0 = 0u8;
        let mut l1 = 0u8;
        let mut l2 = 0u8;
        let mut l3 = 0u8;

        let mut i0 = 0usize;
        let mut i1 = isz4;
        let mut i2 = 2 * isz4;
        let mut i3 = 3 * isz4;

        while i0 < isz4 {
            let c0 = decode_symbol(&mut r0, l0, tables, syms);
            let c1 = decode_symbol(&mut r1, l1, tables, syms);
            let c2 = decode_symbol(&mut r2, l2, tables, syms);
            let c3 = decode_symbol(&mut r3, l3, tables, syms);

            out[i0] = c0;
            out[i1] = c1;
            out[i2] = c2;
            out[i3] = c3;

            l0 = c0;
            l1 = c1;
            l2 = c2;
            l3 = c3;

            rans::dec_renorm_safe(&mut r0, &mut pc, end);
            rans::dec_renorm_safe(&mut r1, &mut pc, end);
            rans::dec_renorm_safe(&mut r2, &mut pc, end);
            rans::dec_renorm_safe(&mut r3, &mut pc, end);

            i0 += 1;
            i1 += 1;
            i2 += 1;
            i3 += 1;
        }

        while i3 < out_sz {
            let c3 = decode_symbol(&mut r3, l3, tables, syms);
            out[i3] = c3;
            l3 = c3;
            rans::dec_renorm_safe(&mut r3, &mut pc, end);
            i3 += 1;
        }

        Ok(out)
    })
}

#[inline(always)]
fn decode_symbol(x: &mut u32, ctx: u8, tables: &[Vec<u8>], syms: &[[DecSymbol; 256]]) -> u8 {
    debug_assert_eq!(tables[ctx as usize].len(), TOTFREQ as usize);
    let slot = rans::dec_get(*x);
    let sym = tables[ctx as usize][slot as usize];
    let entry = syms[ctx as usize][sym as usize];
    *x = rans::dec_advance(*x, entry.start as u32, entry.freq as u32);
    sym
}
