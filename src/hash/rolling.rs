// Prefix hashing and match-length scanning.
//
//   - **Prefix hash**: the 3 bytes at a position, multiplied by an LCG
//     constant; the bucket is taken from the high bits of the product.
//   - **Forward match**: length of the common prefix of two slices,
//     compared eight bytes at a time.

use super::config::MIN_MATCH;

/// LCG multiplier for 32-bit hashes.
pub const HASH_MULT_32: u32 = 1_597_334_677;

/// Hash the `MIN_MATCH` bytes at the front of `base`.
#[inline(always)]
pub fn prefix_hash(base: &[u8]) -> u32 {
    debug_assert!(base.len() >= MIN_MATCH);
    let val = u32::from_le_bytes([base[0], base[1], base[2], 0]);
    val.wrapping_mul(HASH_MULT_32)
}

/// Reduce a prefix hash to a bucket index in a table of `1 << bits` entries.
#[inline(always)]
pub fn bucket(hash: u32, bits: u32) -> usize {
    debug_assert!((1..=32).contains(&bits));
    (hash >> (32 - bits)) as usize
}

/// Length of the common prefix of `a` and `b`, capped at `limit`.
///
/// `a` and `b` may be overlapping views of the same buffer.
#[inline]
pub fn forward_match(a: &[u8], b: &[u8], limit: usize) -> usize {
    let limit = limit.min(a.len()).min(b.len());
    let mut n = 0usize;

    while n + 8 <= limit {
        let x = read_u64_le(&a[n..n + 8]);
        let y = read_u64_le(&b[n..n + 8]);
        let diff = x ^ y;
        if diff != 0 {
            return n + (diff.trailing_zeros() / 8) as usize;
        }
        n += 8;
    }

    while n < limit && a[n] == b[n] {
        n += 1;
    }
    n
}

#[inline(always)]
fn read_u64_le(chunk: &[u8]) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(chunk);
    u64::from_le_bytes(word)
}
