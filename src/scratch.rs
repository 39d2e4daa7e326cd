//! Thread-local scratch for the large per-call tables the order-1 path
//! needs: a `256x256` histogram/frequency buffer on encode, and the
//! matching `256x4096` reverse-lookup tables on decode.
//!
//! Grounded in `rANS_static.c`'s `thread_enc_data`/`rans_enc_alloc` and
//! `thread_data`/`rans_tb_alloc`: a lazily-initialized per-thread cache
//! reused across calls instead of freshly allocated and zeroed each time.
//! We keep the structure (a per-thread cache of the big arrays) but use
//! `std::thread_local!` rather than the reference's pthread-key API, since
//! that's the idiomatic Rust substitute with the same behavior: the first
//! call on a thread allocates, every later call on the same thread reuses
//! and re-zeroes in place.
//!
//! This is purely a performance optimization, not a contract: callers that
//! allocate these buffers directly instead (as the unit tests in
//! `src/table/codec.rs` do) see identical results.

use crate::rans::symbol::DecSymbol;
use crate::TOTFREQ;
use std::cell::RefCell;

thread_local! {
    static ORDER1_HISTOGRAM: RefCell<Option<Vec<[u32; 256]>>> = RefCell::new(None);
    static ORDER1_DECODER_SYMS: RefCell<Option<Vec<[DecSymbol; 256]>>> = RefCell::new(None);
    static ORDER1_DECODER_TABLES: RefCell<Option<Vec<Vec<u8>>>> = RefCell::new(None);
}

/// Borrows a zeroed `256x256` `u32` histogram buffer, reusing the
/// thread-local allocation if one already exists from a previous call on
/// this thread.
pub fn with_zeroed_order1_histogram<R>(f: impl FnOnce(&mut Vec<[u32; 256]>) -> R) -> R {
    ORDER1_HISTOGRAM.with(|cell| {
        let mut slot = cell.borrow_mut();
        let buf = slot.get_or_insert_with(|| vec![[0u32; 256]; 256]);
        for row in buf.iter_mut() {
            row.fill(0);
        }
        f(buf)
    })
}

/// Borrows zeroed `256`-entry decoder symbol and reverse-lookup tables,
/// reusing the thread-local allocation if one already exists.
pub fn with_zeroed_order1_decoder_tables<R>(
    f: impl FnOnce(&mut Vec<[DecSymbol; 256]>, &mut Vec<Vec<u8>>) -> R,
) -> R {
    ORDER1_DECODER_SYMS.with(|syms_cell| {
        ORDER1_DECODER_TABLES.with(|tables_cell| {
            let mut syms_slot = syms_cell.borrow_mut();
            let syms = syms_slot.get_or_insert_with(|| vec![[DecSymbol::default(); 256]; 256]);
            for row in syms.iter_mut() {
                row.fill(DecSymbol::default());
            }

            let mut tables_slot = tables_cell.borrow_mut();
            let tables = tables_slot.get_or_insert_with(|| vec![vec![0u8; TOTFREQ as usize]; 256]);
            for row in tables.iter_mut() {
                row.fill(0);
            }

            f(syms, tables)
        })
    })
}
