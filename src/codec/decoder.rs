// Block decoder.
//
// Per-stream state machine:
//
//   Idle -> ReadingTokenHeader -> { CopyingLiteral | CopyingMatch }
//        -> ReadingTokenHeader -> ... -> Done
//
// Token parsing and structural checks live in `TokenReader`; this module
// checks each back-reference against the output produced so far and
// performs the copies.

use log::debug;

use super::sink::{OutputSink, SliceSink};
use crate::error::{CodecError, CorruptKind, Result};
use crate::format::{MAX_INPUT_LEN, Token, TokenReader};

#[derive(Debug, Clone, Copy)]
enum State<'a> {
    Idle,
    ReadingTokenHeader,
    CopyingLiteral {
        offset: usize,
        bytes: &'a [u8],
    },
    CopyingMatch {
        offset: usize,
        distance: usize,
        length: usize,
    },
    Done,
}

/// Outcome of a successful run over one stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
    pub tokens: usize,
    pub output_len: usize,
}

/// Output size after appending `len` bytes, or the overflow error.
fn grown(offset: usize, produced: usize, len: usize) -> Result<usize> {
    produced
        .checked_add(len)
        .filter(|&total| total <= MAX_INPUT_LEN)
        .ok_or(CodecError::corrupt(offset, CorruptKind::LengthOverflow))
}

/// Drive the state machine over `input`, writing into `sink`.
///
/// With `sink = None` the stream is only validated and measured.
fn run<S: OutputSink>(input: &[u8], mut sink: Option<&mut S>) -> Result<DecodeStats> {
    let mut reader = TokenReader::new(input);
    let mut stats = DecodeStats::default();
    let mut state = State::Idle;

    loop {
        state = match state {
            State::Idle => State::ReadingTokenHeader,

            State::ReadingTokenHeader => {
                let offset = reader.offset();
                match reader.next().transpose()? {
                    None => State::Done,
                    Some(Token::Literal(bytes)) => State::CopyingLiteral { offset, bytes },
                    Some(Token::BackRef { distance, length }) => State::CopyingMatch {
                        offset,
                        distance,
                        length,
                    },
                }
            }

            State::CopyingLiteral { offset, bytes } => {
                let total = grown(offset, stats.output_len, bytes.len())?;
                if let Some(sink) = sink.as_deref_mut() {
                    sink.put_slice(bytes)?;
                }
                stats.output_len = total;
                stats.tokens += 1;
                State::ReadingTokenHeader
            }

            State::CopyingMatch {
                offset,
                distance,
                length,
            } => {
                if distance > stats.output_len {
                    return Err(CodecError::corrupt(
                        offset,
                        CorruptKind::DistanceOutOfRange {
                            distance,
                            produced: stats.output_len,
                        },
                    ));
                }
                let total = grown(offset, stats.output_len, length)?;
                if let Some(sink) = sink.as_deref_mut() {
                    sink.copy_back(distance, length)?;
                }
                stats.output_len = total;
                stats.tokens += 1;
                State::ReadingTokenHeader
            }

            State::Done => return Ok(stats),
        };
    }
}

/// Decompress `input` into a new buffer.
///
/// `size_hint` pre-sizes the output; a wrong hint only costs reallocation,
/// and a hint that cannot be reserved is ignored. The buffer is returned
/// only if the whole stream decodes.
///
/// A few bytes of stream can describe up to `MAX_INPUT_LEN` bytes of
/// output. For untrusted input, check [`decoded_len`] first or decode into
/// a bounded buffer with [`decode_to_buf`].
pub fn decode(input: &[u8], size_hint: Option<usize>) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    if let Some(hint) = size_hint {
        let hint = hint.min(MAX_INPUT_LEN);
        if out.try_reserve_exact(hint).is_err() {
            debug!("decode: cannot reserve size hint of {hint} bytes, growing on demand");
        }
    }
    let stats = run(input, Some(&mut out))?;
    debug!(
        "decode: {} -> {} bytes in {} tokens (hint {size_hint:?})",
        input.len(),
        stats.output_len,
        stats.tokens
    );
    Ok(out)
}

/// Decompress `input` into `out`, returning the number of bytes written.
///
/// Fails with `OutputTooSmall` if `out` cannot hold the result; use
/// [`decoded_len`] to size it exactly. On error the contents of `out` are
/// unspecified.
pub fn decode_to_buf(input: &[u8], out: &mut [u8]) -> Result<usize> {
    let mut sink = SliceSink::new(out);
    let stats = run(input, Some(&mut sink))?;
    debug!(
        "decode: {} -> {} bytes in {} tokens (caller buffer)",
        input.len(),
        stats.output_len,
        stats.tokens
    );
    Ok(sink.written())
}

/// Validate `input` and return the size it decodes to, without producing
/// any output.
pub fn decoded_len(input: &[u8]) -> Result<usize> {
    run::<Vec<u8>>(input, None).map(|stats| stats.output_len)
}

/// Validate `input` and return token and size statistics.
pub fn scan(input: &[u8]) -> Result<DecodeStats> {
    run::<Vec<u8>>(input, None)
}
