// Block encoder.
//
// `encode` and `encode_to_buf` build a fresh match table per call.
// `Encoder` keeps one table per level alive between calls and resets it at
// the start of each call, which avoids reallocating for many small blocks.

use log::debug;

use super::sink::{OutputSink, SliceSink};
use crate::error::{CodecError, Result};
use crate::format::MAX_INPUT_LEN;
use crate::format::varint::MAX_VARINT_LEN;
use crate::hash::config::Level;
use crate::hash::matching::{MatchEngine, ScanStats};

/// Upper bound on the encoded size of `input_len` bytes, at any level.
///
/// Back-references never cost more than the bytes they cover, and every
/// literal run except the last is followed by at least `MIN_MATCH` matched
/// bytes, so run headers add at most one byte per four input bytes.
pub fn max_encoded_len(input_len: usize) -> usize {
    input_len
        .saturating_add(input_len / 4)
        .saturating_add(MAX_VARINT_LEN)
}

fn check_input_len(len: usize) -> Result<()> {
    if len > MAX_INPUT_LEN {
        return Err(CodecError::InputTooLarge {
            len,
            max: MAX_INPUT_LEN,
        });
    }
    Ok(())
}

/// Reusable encoder state.
///
/// # Example
/// ```
/// use blocklz::{Encoder, Level, decode};
///
/// let mut enc = Encoder::new();
/// for block in [&b"first block first block"[..], &b"second block"[..]] {
///     let packed = enc.encode(block, Level::Fast).unwrap();
///     assert_eq!(decode(&packed, Some(block.len())).unwrap(), block);
/// }
/// ```
#[derive(Default)]
pub struct Encoder {
    fast: Option<MatchEngine>,
    high: Option<MatchEngine>,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    fn engine(&mut self, level: Level) -> &mut MatchEngine {
        let slot = match level {
            Level::Fast => &mut self.fast,
            Level::High => &mut self.high,
        };
        slot.get_or_insert_with(|| MatchEngine::new(level.config()))
    }

    fn encode_into<S: OutputSink>(
        &mut self,
        input: &[u8],
        sink: &mut S,
        level: Level,
    ) -> Result<ScanStats> {
        check_input_len(input.len())?;
        let stats = self
            .engine(level)
            .tokenize(input, |token| token.write_to(&mut *sink))?;
        debug!(
            "encode ({level}): {} -> {} bytes, {} literal runs ({} bytes), {} backrefs ({} bytes)",
            input.len(),
            sink.written(),
            stats.literal_runs,
            stats.literal_bytes,
            stats.backrefs,
            stats.backref_bytes
        );
        Ok(stats)
    }

    /// Compress `input` into a new buffer.
    pub fn encode(&mut self, input: &[u8], level: Level) -> Result<Vec<u8>> {
        check_input_len(input.len())?;
        let mut out = Vec::new();
        let capacity = max_encoded_len(input.len());
        out.try_reserve_exact(capacity)
            .map_err(|_| CodecError::AllocationFailure {
                requested: capacity,
            })?;
        self.encode_into(input, &mut out, level)?;
        Ok(out)
    }

    /// Compress `input` into `out`, returning the number of bytes written.
    ///
    /// A buffer of `max_encoded_len(input.len())` bytes always suffices. On
    /// error the contents of `out` are unspecified.
    pub fn encode_to_buf(&mut self, input: &[u8], out: &mut [u8], level: Level) -> Result<usize> {
        let mut sink = SliceSink::new(out);
        self.encode_into(input, &mut sink, level)?;
        Ok(sink.written())
    }
}

/// Compress `input` at `level`.
///
/// Each call allocates its own match table; nothing is shared between calls.
pub fn encode(input: &[u8], level: Level) -> Result<Vec<u8>> {
    Encoder::new().encode(input, level)
}

/// Compress `input` into a caller buffer. See [`Encoder::encode_to_buf`].
pub fn encode_to_buf(input: &[u8], out: &mut [u8], level: Level) -> Result<usize> {
    Encoder::new().encode_to_buf(input, out, level)
}
