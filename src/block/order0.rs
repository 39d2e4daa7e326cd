//! Order-0 block codec: four rANS streams interleaved over a single
//! marginal frequency table. Grounded in `rans_compress_O0`/
//! `rans_uncompress_O0` in `rANS_static.c`.

use crate::error::Result;
use crate::model::{histogram, normalize};
use crate::rans::{self, DecSymbol, FwdCursor, RevCursor};
use crate::table;
use crate::{HEADER_SIZE, TOTFREQ};
use crate::block::header;
use anyhow::ensure;

/// Compresses `input` as an order-0 block (9-byte header, table, payload).
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    if input.is_empty() {
        return Ok(vec![0u8; HEADER_SIZE]);
    }

    let n = input.len();
    let mut freq = histogram::histogram_order0(input);
    normalize::normalize_order0(&mut freq);

    let (table_bytes, syms) = table::codec::write_table_order0(&freq);
    log::trace!("order-0 table: {} bytes for {n} input bytes", table_bytes.len());

    let cap = ((n as f64 * 1.05).ceil() as usize) + 257 * 257 * 3;
    let mut scratch = vec![0u8; cap];
    let mut cursor = RevCursor::new(&mut scratch);

    let mut r0 = rans::enc_init();
    let mut r1 = rans::enc_init();
    let mut r2 = rans::enc_init();
    let mut r3 = rans::enc_init();

    let tail = n % 4;
    match tail {
        3 => {
            rans::enc_put_symbol(&mut r2, &mut cursor, &syms[input[n - 1] as usize]);
            rans::enc_put_symbol(&mut r1, &mut cursor, &syms[input[n - 2] as usize]);
            rans::enc_put_symbol(&mut r0, &mut cursor, &syms[input[n - 3] as usize]);
        }
        2 => {
            rans::enc_put_symbol(&mut r1, &mut cursor, &syms[input[n - 1] as usize]);
            rans::enc_put_symbol(&mut r0, &mut cursor, &syms[input[n - 2] as usize]);
        }
        1 => {
            rans::enc_put_symbol(&mut r0, &mut cursor, &syms[input[n - 1] as usize]);
        }
        _ => {}
    }

    let aligned = n - tail;
    let mut i = aligned;
    while i > 0 {
        let s3 = &syms[input[i - 1] as usize];
        let s2 = &syms[input[i - 2] as usize];
        let s1 = &syms[input[i - 3] as usize];
        let s0 = &syms[input[i - 4] as usize];
        rans::enc_put_symbol(&mut r3, &mut cursor, s3);
        rans::enc_put_symbol(&mut r2, &mut cursor, s2);
        rans::enc_put_symbol(&mut r1, &mut cursor, s1);
        rans::enc_put_symbol(&mut r0, &mut cursor, s0);
        i -= 4;
    }

    rans::enc_flush(r3, &mut cursor);
    rans::enc_flush(r2, &mut cursor);
    rans::enc_flush(r1, &mut cursor);
    rans::enc_flush(r0, &mut cursor);

    let payload = &scratch[cursor.pos()..];
    let comp_size = (table_bytes.len() + payload.len()) as u32;

    let mut out = Vec::with_capacity(HEADER_SIZE + table_bytes.len() + payload.len());
    header::write(&mut out, 0, comp_size, n as u32);
    out.extend_from_slice(&table_bytes);
    out.extend_from_slice(payload);
    Ok(out)
}

/// Decompresses an order-0 block produced by [`compress`].
pub fn decompress(input: &[u8]) -> Result<Vec<u8>> {
    let hdr = header::read(input)?;
    ensure!(hdr.order == 0, "header: expected an order-0 block, got order {}", hdr.order);

    if hdr.orig_size == 0 {
        return Ok(Vec::new());
    }

    let mut cp = FwdCursor::new(&input[HEADER_SIZE..]);
    let (syms, r) = table::codec::read_table_order0(&mut cp)?;

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

    let out_sz = hdr.orig_size as usize;
    let mut out = vec![0u8; out_sz];
    let out_end = out_sz & !3;

    let mut i = 0;
    while i < out_end {
        out[i] = decode_symbol(&mut r0, &r, &syms);
        out[i + 1] = decode_symbol(&mut r1, &r, &syms);
        out[i + 2] = decode_symbol(&mut r2, &r, &syms);
        out[i + 3] = decode_symbol(&mut r3, &r, &syms);

        rans::dec_renorm_safe(&mut r0, &mut pc, end);
        rans::dec_renorm_safe(&mut r1, &mut pc, end);
        rans::dec_renorm_safe(&mut r2, &mut pc, end);
        rans::dec_renorm_safe(&mut r3, &mut pc, end);

        i += 4;
    }

    let rem = out_sz & 3;
    if rem >= 1 {
        out[out_end] = r[rans::dec_get(r0) as usize];
    }
    if rem >= 2 {
        out[out_end + 1] = r[rans::dec_get(r1) as usize];
    }
    if rem >= 3 {
        out[out_end + 2] = r[rans::dec_get(r2) as usize];
    }

    Ok(out)
}

#[inline(always)]
fn decode_symbol(x: &mut u32, r: &[u8], syms: &[DecSymbol; 256]) -> u8 {
    debug_assert_eq!(r.len(), TOTFREQ as usize);
    let slot = rans::dec_get(*x);
    let sym = r[slot as usize];
    let entry = syms[sym as usize];
    *x = rans::dec_advance(*x, entry.start as u32, entry.freq as u32);
    sym
}
