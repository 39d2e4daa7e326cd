//! Shared error plumbing.
//!
//! Library functions return `anyhow::Result<T>` and fail with
//! `bail!`/`ensure!` carrying a descriptive message, rather than a
//! hand-rolled error enum.
//!
//! Messages consistently start with one of four prefixes so callers can
//! classify a failure without matching on types:
//!
//! - `"alloc: ..."`   — an allocation could not be satisfied.
//! - `"header: ..."`  — the 9-byte block header was malformed.
//! - `"table: ..."`   — the frequency table failed to parse.
//! - `"payload: ..."` — the rANS bitstream itself was malformed.

pub use anyhow::Result;
