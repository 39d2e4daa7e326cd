//! Frequency normalization: scale a row of integer counts so it sums to
//! exactly `TOTFREQ`, without zeroing out any symbol that had a nonzero
//! count.
//!
//! The order-0 and order-1 variants use different fixed-point strategies,
//! matching `rans_compress_O0`/`rans_compress_O1` in `rANS_static.c`, and
//! deliberately different comparisons (`>` vs `>=`) in the "would this
//! crush the most frequent symbol" check before re-scaling harder. This
//! looks like an unintentional asymmetry but is preserved exactly for
//! bit-exact output; see `DESIGN.md`.

use crate::TOTFREQ;

/// Order-0 normalizer: scales with a fixed-point ratio close to
/// `TOTFREQ / total`, re-scaling by a fixed ~0.98 factor (in the same
/// fixed-point representation) when the first pass would crush the most
/// frequent symbol.
pub fn normalize_order0(freq: &mut [u32; 256]) {
    let total: u64 = freq.iter().map(|&f| f as u64).sum();
    if total == 0 {
        return;
    }

    let mut tr: u64 = ((TOTFREQ as u64) << 31) / total + (1u64 << 30) / total;

    loop {
        let mut fsum: u64 = 0;
        let mut m: u64 = 0;
        let mut big_m: usize = 0;

        for j in 0..256 {
            if freq[j] == 0 {
                continue;
            }
            if m < freq[j] as u64 {
                m = freq[j] as u64;
                big_m = j;
            }
            let scaled = ((freq[j] as u64 * tr) >> 31) as u32;
            freq[j] = if scaled == 0 { 1 } else { scaled };
            fsum += freq[j] as u64;
        }

        fsum += 1;
        if fsum < TOTFREQ as u64 {
            freq[big_m] += (TOTFREQ as u64 - fsum) as u32;
            break;
        } else if fsum - TOTFREQ as u64 > (freq[big_m] as u64) / 2 {
            log::debug!("order-0 normalizer rescaling harder (fsum={fsum})");
            tr = 2_104_533_975;
        } else {
            freq[big_m] -= (fsum - TOTFREQ as u64) as u32;
            break;
        }
    }

    debug_assert_eq!(freq.iter().map(|&f| f as u64).sum::<u64>(), TOTFREQ as u64);
}

/// Order-1 normalizer: same shape as [`normalize_order0`] but scales with a
/// floating-point ratio per row and re-scales by a literal `0.98`.
pub fn normalize_order1_row(freq: &mut [u32; 256]) {
    let total: u64 = freq.iter().map(|&f| f as u64).sum();
    if total == 0 {
        return;
    }

    let mut p: f64 = TOTFREQ as f64 / total as f64;

    loop {
        let mut fsum: u64 = 0;
        let mut m: u32 = 0;
        let mut big_m: usize = 0;

        for j in 0..256 {
            if freq[j] == 0 {
                continue;
            }
            if m < freq[j] {
                m = freq[j];
                big_m = j;
            }
            let scaled = (freq[j] as f64 * p) as u32;
            freq[j] = if scaled == 0 { 1 } else { scaled };
            fsum += freq[j] as u64;
        }

        fsum += 1;
        if fsum < TOTFREQ as u64 {
            freq[big_m] += (TOTFREQ as u64 - fsum) as u32;
            break;
        } else if fsum - TOTFREQ as u64 >= (freq[big_m] as u64) / 2 {
            log::debug!("order-1 normalizer rescaling harder (fsum={fsum})");
            p = 0.98;
        } else {
            freq[big_m] -= (fsum - TOTFREQ as u64) as u32;
            break;
        }
    }

    debug_assert_eq!(freq.iter().map(|&f| f as u64).sum::<u64>(), TOTFREQ as u64);
}
