// Variable-length integers for the token stream.
//
// Base-128, big-endian: most-significant 7-bit group first.
// Every byte has bit 7 set except the final one. This is the same integer
// encoding VCDIFF (RFC 3284, Section 2) uses.

use crate::codec::sink::OutputSink;
use crate::error::{CodecError, CorruptKind, Result};

/// Maximum encoded length for a 64-bit value (ceil(64/7) = 10).
pub const MAX_VARINT_LEN: usize = 10;

/// If any of these bits are set before a shift, `<< 7` would lose data.
const U64_OVERFLOW_MASK: u64 = 0xFE00_0000_0000_0000;

/// Encode `num` into the tail of `buf`, returning the number of bytes used.
///
/// The encoded bytes are `buf[MAX_VARINT_LEN - len..]`.
#[inline]
pub fn encode_u64(mut num: u64, buf: &mut [u8; MAX_VARINT_LEN]) -> usize {
    let mut i = MAX_VARINT_LEN;
    loop {
        i -= 1;
        buf[i] = (num as u8 & 0x7F) | 0x80;
        num >>= 7;
        if num == 0 {
            break;
        }
    }
    buf[MAX_VARINT_LEN - 1] &= 0x7F;
    MAX_VARINT_LEN - i
}

/// Append the varint form of `num` to `sink`.
pub fn put_u64<S: OutputSink + ?Sized>(sink: &mut S, num: u64) -> Result<()> {
    let mut buf = [0u8; MAX_VARINT_LEN];
    let len = encode_u64(num, &mut buf);
    sink.put_slice(&buf[MAX_VARINT_LEN - len..])
}

/// Decode a varint from the front of `data`.
///
/// Returns `(value, bytes_consumed)`. `offset` is the position of `data`
/// within the whole stream and is only used for error reporting.
pub fn read_u64(data: &[u8], offset: usize) -> Result<(u64, usize)> {
    let mut val: u64 = 0;
    for (i, &byte) in data.iter().enumerate() {
        if val & U64_OVERFLOW_MASK != 0 {
            return Err(CodecError::corrupt(offset + i, CorruptKind::VarintOverflow));
        }
        val = (val << 7) | u64::from(byte & 0x7F);
        if byte & 0x80 == 0 {
            return Ok((val, i + 1));
        }
    }
    Err(CodecError::corrupt(
        offset + data.len(),
        CorruptKind::Truncated,
    ))
}

/// Number of bytes `num` occupies once encoded.
#[inline]
pub fn sizeof_u64(num: u64) -> usize {
    let bits = 64 - num.leading_zeros();
    (bits.max(1).div_ceil(7) as usize).min(MAX_VARINT_LEN)
}

#[inline]
pub fn sizeof_usize(num: usize) -> usize {
    sizeof_u64(num as u64)
}
