// Hash and matching algorithms for the block encoder.
//
// This module provides:
// - Level profiles (fast, high)
// - The 3-byte prefix hash and match-length scanning
// - A hash table with optional chaining
// - The greedy match engine that turns input into tokens

pub mod config;
pub mod matching;
pub mod rolling;
pub mod table;
