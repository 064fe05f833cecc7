// Matcher profiles for the two compression levels.
//
// Each profile defines the window, table size and search effort used by
// the match engine.

use std::fmt;
use std::str::FromStr;

use crate::format::MAX_WINDOW;

/// Minimum back-reference length; also the hashed prefix width.
pub const MIN_MATCH: usize = 3;

/// Inputs at or above this size use `Level::High` when the level is chosen
/// automatically.
pub const AUTO_HIGH_THRESHOLD: usize = 1 << 16;

/// Compression level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Level {
    /// Single-entry buckets, sparse insertion, 8 KiB window.
    #[default]
    Fast,
    /// Chained buckets, full insertion, 64 KiB window.
    High,
}

impl Level {
    /// Pick a level from the input size.
    pub fn auto_for(input_len: usize) -> Self {
        if input_len < AUTO_HIGH_THRESHOLD {
            Level::Fast
        } else {
            Level::High
        }
    }

    pub fn config(self) -> MatcherConfig {
        match self {
            Level::Fast => FAST,
            Level::High => HIGH,
        }
    }

    pub fn name(self) -> &'static str {
        self.config().name
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fast" | "1" => Ok(Level::Fast),
            "high" | "2" => Ok(Level::High),
            other => Err(format!("unknown level '{other}' (expected fast or high)")),
        }
    }
}

/// Matcher profile configuration.
#[derive(Debug, Clone, Copy)]
pub struct MatcherConfig {
    /// Name for display purposes.
    pub name: &'static str,
    /// Maximum back-reference distance.
    pub window: usize,
    /// log2 of the bucket count.
    pub hash_bits: u32,
    /// Candidates examined per position (1 = head only, no chaining).
    pub chain_depth: usize,
    /// Insert every position covered by a match, not just its tail.
    pub insert_all: bool,
    /// Match length considered good enough to stop searching.
    pub long_enough: usize,
}

impl MatcherConfig {
    pub fn chained(&self) -> bool {
        self.chain_depth > 1
    }
}

// ---------------------------------------------------------------------------
// Profile definitions
// ---------------------------------------------------------------------------

pub const FAST: MatcherConfig = MatcherConfig {
    name: "fast",
    window: 1 << 13,
    hash_bits: 13,
    chain_depth: 1,
    insert_all: false,
    long_enough: 64,
};

pub const HIGH: MatcherConfig = MatcherConfig {
    name: "high",
    window: MAX_WINDOW,
    hash_bits: 16,
    chain_depth: 32,
    insert_all: true,
    long_enough: 258,
};
