//! The block codec: header framing plus order-0/order-1 encode/decode.

pub mod header;
pub mod order0;
pub mod order1;
