//! The 9-byte block header: `order: u8`, `comp_size: u32 LE`, `orig_size: u32 LE`.

use crate::error::Result;
use crate::HEADER_SIZE;
use anyhow::ensure;

pub struct Header {
    pub order: u8,
    pub comp_size: u32,
    pub orig_size: u32,
}

pub fn write(buf: &mut Vec<u8>, order: u8, comp_size: u32, orig_size: u32) {
    buf.push(order);
    buf.extend_from_slice(&comp_size.to_le_bytes());
    buf.extend_from_slice(&orig_size.to_le_bytes());
}

pub fn read(input: &[u8]) -> Result<Header> {
    ensure!(
        input.len() >= HEADER_SIZE,
        "header: input shorter than {HEADER_SIZE} bytes"
    );

    let order = input[0];
    ensure!(order == 0 || order == 1, "header: unknown order byte {order}");

    let comp_size = u32::from_le_bytes(input[1..5].try_into().unwrap());
    let orig_size = u32::from_le_bytes(input[5..9].try_into().unwrap());

    ensure!(
        comp_size as usize == input.len() - HEADER_SIZE,
        "header: comp_size {comp_size} does not match remaining input length {}",
        input.len() - HEADER_SIZE
    );
    ensure!(
        orig_size < i32::MAX as u32,
        "header: orig_size {orig_size} is implausibly large"
    );

    Ok(Header { order, comp_size, orig_size })
}
