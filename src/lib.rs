//! Blocklz: a byte-oriented LZ77 block compressor/decompressor.
//!
//! The crate provides:
//! - The block codec (`codec`): whole-buffer encode and decode
//! - The stream format (`format`): varints, tokens and a token parser
//! - The match finder (`hash`): level profiles, hash tables, match engine
//! - File-oriented helpers (`io`)
//! - An optional CLI (`cli` feature)
//!
//! A compressed stream is a bare sequence of tokens with no header, so the
//! caller tracks its length. Each token is either a literal run or a
//! back-reference into the output decoded so far; see [`format::token`] for
//! the byte layout.
//!
//! # Quick Start
//!
//! ```
//! use blocklz::{Level, decode, encode};
//!
//! let input = b"to be or not to be, that is the question";
//! let packed = encode(input, Level::Fast).unwrap();
//! let unpacked = decode(&packed, Some(input.len())).unwrap();
//! assert_eq!(unpacked, input);
//! ```

pub mod codec;
pub mod error;
pub mod format;
pub mod hash;
pub mod io;

#[cfg(feature = "cli")]
pub mod cli;

pub use codec::{
    DecodeStats, Encoder, decode, decode_to_buf, decoded_len, encode, encode_to_buf,
    max_encoded_len,
};
pub use error::{CodecError, CorruptKind};
pub use format::{FORMAT_VERSION, MAX_INPUT_LEN, MAX_WINDOW};
pub use hash::config::{Level, MIN_MATCH};
