// Hash table for prefix matching.
//
// A head array keyed by prefix hash, plus an optional `prev` chain: a
// circular buffer indexed by `pos & mask` that links each inserted position
// to the previous head of its bucket.
//
// Stored values are `pos + HASH_CKOFFSET`, so 0 means "empty".

use super::config::MatcherConfig;
use super::rolling;

/// Offset added to stored positions so 0 means "empty bucket".
pub const HASH_CKOFFSET: u32 = 1;

pub struct MatchTable {
    /// `head[bucket] = pos + HASH_CKOFFSET` or 0.
    head: Vec<u32>,
    bits: u32,
    /// Previous-position chain; only allocated for chained profiles.
    prev: Option<Vec<u32>>,
    /// `prev.len() - 1`.
    prev_mask: usize,
}

impl MatchTable {
    /// Allocate a table sized for `config`.
    ///
    /// The chain covers exactly one window, so any chain entry still in the
    /// buffer is either within the window or detected as stale.
    pub fn new(config: &MatcherConfig) -> Self {
        let head = vec![0u32; 1 << config.hash_bits];
        let (prev, prev_mask) = if config.chained() {
            debug_assert!(config.window.is_power_of_two());
            (Some(vec![0u32; config.window]), config.window - 1)
        } else {
            (None, 0)
        };
        Self {
            head,
            bits: config.hash_bits,
            prev,
            prev_mask,
        }
    }

    /// Forget every stored position.
    pub fn reset(&mut self) {
        self.head.fill(0);
        if let Some(ref mut prev) = self.prev {
            prev.fill(0);
        }
    }

    /// Most recent position stored under `hash`.
    #[inline(always)]
    pub fn lookup(&self, hash: u32) -> Option<usize> {
        match self.head[rolling::bucket(hash, self.bits)] {
            0 => None,
            v => Some((v - HASH_CKOFFSET) as usize),
        }
    }

    /// Record `pos` as the newest position for `hash`.
    ///
    /// Positions that do not fit the stored representation are ignored; the
    /// encoder rejects such inputs before matching starts.
    #[inline(always)]
    pub fn insert(&mut self, hash: u32, pos: usize) {
        let Some(stored) = u32::try_from(pos)
            .ok()
            .and_then(|p| p.checked_add(HASH_CKOFFSET))
        else {
            return;
        };
        let bucket = rolling::bucket(hash, self.bits);
        if let Some(ref mut prev) = self.prev {
            prev[pos & self.prev_mask] = self.head[bucket];
        }
        self.head[bucket] = stored;
    }

    /// The position inserted into the same bucket before `pos`.
    ///
    /// Returns `None` at the end of the chain, for unchained tables, and for
    /// entries that were overwritten after the circular buffer wrapped.
    /// `current` is the position being matched.
    #[inline]
    pub fn chain_prev(&self, pos: usize, current: usize) -> Option<usize> {
        let prev = self.prev.as_ref()?;
        let val = prev[pos & self.prev_mask];
        if val == 0 {
            return None;
        }
        let prev_pos = (val - HASH_CKOFFSET) as usize;
        // Slot was rewritten by a newer position after wrapping.
        if prev_pos >= pos {
            return None;
        }
        if current - prev_pos > self.prev_mask {
            return None;
        }
        Some(prev_pos)
    }

    /// Bucket count.
    pub fn size(&self) -> usize {
        self.head.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::config::{FAST, HIGH};

    #[test]
    fn insert_then_lookup() {
        let mut t = MatchTable::new(&FAST);
        assert!(t.lookup(42).is_none());
        t.insert(42, 0);
        assert_eq!(t.lookup(42), Some(0));
        t.insert(42, 200);
        assert_eq!(t.lookup(42), Some(200));
        assert_eq!(t.size(), 1 << FAST.hash_bits);
    }

    #[test]
    fn reset_empties_every_bucket() {
        let mut t = MatchTable::new(&HIGH);
        t.insert(7, 100);
        t.insert(7, 120);
        t.reset();
        assert!(t.lookup(7).is_none());
        assert!(t.chain_prev(120, 120).is_none());
    }

    #[test]
    fn unchained_table_has_no_history() {
        let mut t = MatchTable::new(&FAST);
        t.insert(42, 10);
        t.insert(42, 50);
        assert!(t.chain_prev(50, 50).is_none());
    }

    #[test]
    fn chain_walks_newest_to_oldest() {
        let mut t = MatchTable::new(&HIGH);
        t.insert(42, 10);
        t.insert(42, 30);
        t.insert(42, 50);
        assert_eq!(t.lookup(42), Some(50));
        assert_eq!(t.chain_prev(50, 60), Some(30));
        assert_eq!(t.chain_prev(30, 60), Some(10));
        assert_eq!(t.chain_prev(10, 60), None);
    }

    #[test]
    fn chain_entries_outside_window_are_stale() {
        let mut t = MatchTable::new(&HIGH);
        t.insert(42, 0);
        t.insert(42, HIGH.window);
        // 0 is exactly one window behind: too far.
        assert_eq!(t.chain_prev(HIGH.window, HIGH.window), None);
    }
}
