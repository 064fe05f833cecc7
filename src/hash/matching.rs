// Greedy match finder.
//
// Scans the input left to right:
//   1. Hash the 3-byte prefix at the current position
//   2. Walk the bucket chain (newest first) for the longest match in window
//   3. Emit a back-reference, or extend the pending literal run
//   4. Insert covered positions (all of them, or only the tail)

use log::trace;

use super::config::{MIN_MATCH, MatcherConfig};
use super::rolling;
use super::table::MatchTable;
use crate::error::Result;
use crate::format::token::{self, Token};

/// A back-reference candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Bytes between the current position and the match source.
    pub distance: usize,
    /// Number of matching bytes.
    pub length: usize,
}

/// Token counts gathered while scanning one input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub literal_runs: usize,
    pub literal_bytes: usize,
    pub backrefs: usize,
    pub backref_bytes: usize,
}

/// Match engine for one level profile.
///
/// The table is reset at the start of every `tokenize` call, so one engine
/// can be reused across unrelated inputs without carrying positions over.
pub struct MatchEngine {
    config: MatcherConfig,
    table: MatchTable,
}

impl MatchEngine {
    pub fn new(config: MatcherConfig) -> Self {
        let table = MatchTable::new(&config);
        Self { config, table }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Split `input` into tokens, handing each to `emit` in stream order.
    ///
    /// The tokens cover `input` exactly. An error from `emit` stops the scan
    /// and is returned as is.
    pub fn tokenize<'a, F>(&mut self, input: &'a [u8], mut emit: F) -> Result<ScanStats>
    where
        F: FnMut(Token<'a>) -> Result<()>,
    {
        self.table.reset();
        let mut stats = ScanStats::default();
        let len = input.len();

        if len < MIN_MATCH {
            if len > 0 {
                stats.literal_runs = 1;
                stats.literal_bytes = len;
                emit(Token::Literal(input))?;
            }
            return Ok(stats);
        }

        // Last position with a full prefix.
        let last = len - MIN_MATCH;
        let mut anchor = 0usize;
        let mut pos = 0usize;

        while pos <= last {
            let hash = rolling::prefix_hash(&input[pos..]);
            let found = self.longest_match(input, pos, hash);
            self.table.insert(hash, pos);

            let Some(m) = found else {
                pos += 1;
                continue;
            };

            if anchor < pos {
                stats.literal_runs += 1;
                stats.literal_bytes += pos - anchor;
                emit(Token::Literal(&input[anchor..pos]))?;
            }
            trace!(
                "backref at {pos}: distance {} length {}",
                m.distance, m.length
            );
            stats.backrefs += 1;
            stats.backref_bytes += m.length;
            emit(Token::BackRef {
                distance: m.distance,
                length: m.length,
            })?;

            let end = pos + m.length;
            self.insert_covered(input, pos + 1, end, last);
            pos = end;
            anchor = end;
        }

        if anchor < len {
            stats.literal_runs += 1;
            stats.literal_bytes += len - anchor;
            emit(Token::Literal(&input[anchor..]))?;
        }

        Ok(stats)
    }

    /// Longest profitable match for the prefix at `pos`.
    ///
    /// Candidates are visited nearest first and only a strictly longer match
    /// replaces the current best, so equal lengths keep the smaller distance.
    fn longest_match(&self, input: &[u8], pos: usize, hash: u32) -> Option<Match> {
        let mut candidate = self.table.lookup(hash)?;
        let max_len = input.len() - pos;
        let mut best: Option<Match> = None;
        let mut best_len = MIN_MATCH - 1;

        for _ in 0..self.config.chain_depth {
            if candidate >= pos {
                break;
            }
            let distance = pos - candidate;
            if distance > self.config.window {
                break;
            }

            let length = rolling::forward_match(&input[candidate..], &input[pos..], max_len);
            // A back-reference must never cost more than the bytes it covers.
            if length > best_len && token::backref_len(distance, length) <= length {
                best_len = length;
                best = Some(Match { distance, length });
                if length >= self.config.long_enough || length == max_len {
                    break;
                }
            }

            match self.table.chain_prev(candidate, pos) {
                Some(p) => candidate = p,
                None => break,
            }
        }

        best
    }

    /// Insert positions in `from..end` that a match skipped over.
    fn insert_covered(&mut self, input: &[u8], from: usize, end: usize, last: usize) {
        let upper = end.min(last + 1);
        let lower = if self.config.insert_all {
            from
        } else {
            from.max(end.saturating_sub(2))
        };
        for p in lower..upper {
            self.table.insert(rolling::prefix_hash(&input[p..]), p);
        }
    }
}
