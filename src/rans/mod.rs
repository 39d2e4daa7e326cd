//! The rANS primitive layer: 32-bit state machinery plus the symbol table
//! entries it operates on.

pub mod primitive;
pub mod symbol;

pub use primitive::*;
pub use symbol::{DecSymbol, EncSymbol};
