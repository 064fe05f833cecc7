// Compressed stream format.
//
// - `varint`: big-endian base-128 integers
// - `token`:  literal/back-reference tokens and the stream parser

pub mod token;
pub mod varint;

pub use token::{Token, TokenReader};

/// Version of the token grammar implemented by this crate.
///
/// The stream carries no header, so this is never written; it identifies the
/// layout documented in `token`.
pub const FORMAT_VERSION: u32 = 1;

/// Largest back-reference distance the format allows.
pub const MAX_WINDOW: usize = 1 << 16;

/// Largest input the encoder accepts, and the largest output the decoder
/// will produce. Hash tables store `position + 1` in a `u32`.
pub const MAX_INPUT_LEN: usize = u32::MAX as usize - 1;
