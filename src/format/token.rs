// Token grammar (format version 1).
//
//   token    := literal | backref
//   literal  := varint((run_len - 1) << 1)            raw[run_len]
//   backref  := varint(((distance - 1) << 1) | 1)     varint(length - MIN_MATCH)
//
// Bit 0 of the header varint is the discriminator. Both header forms are
// biased by one because zero-length runs and zero distances never occur.

use super::varint;
use super::{MAX_INPUT_LEN, MAX_WINDOW};
use crate::codec::sink::OutputSink;
use crate::error::{CodecError, CorruptKind, Result};
use crate::hash::config::MIN_MATCH;

const BACKREF_FLAG: u64 = 1;

/// One unit of the compressed stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Raw bytes copied verbatim to the output.
    Literal(&'a [u8]),
    /// Copy `length` bytes starting `distance` bytes behind the output cursor.
    BackRef { distance: usize, length: usize },
}

impl Token<'_> {
    /// Number of bytes this token contributes to the decoded output.
    pub fn decoded_len(&self) -> usize {
        match *self {
            Token::Literal(bytes) => bytes.len(),
            Token::BackRef { length, .. } => length,
        }
    }

    /// Number of bytes this token occupies in the compressed stream.
    pub fn encoded_len(&self) -> usize {
        match *self {
            Token::Literal(bytes) => literal_header_len(bytes.len()) + bytes.len(),
            Token::BackRef { distance, length } => backref_len(distance, length),
        }
    }

    /// Serialize the token into `sink`.
    pub fn write_to<S: OutputSink + ?Sized>(&self, sink: &mut S) -> Result<()> {
        match *self {
            Token::Literal(bytes) => {
                debug_assert!(!bytes.is_empty());
                varint::put_u64(sink, ((bytes.len() - 1) as u64) << 1)?;
                sink.put_slice(bytes)
            }
            Token::BackRef { distance, length } => {
                debug_assert!((1..=MAX_WINDOW).contains(&distance));
                debug_assert!(length >= MIN_MATCH);
                varint::put_u64(sink, backref_header(distance))?;
                varint::put_u64(sink, (length - MIN_MATCH) as u64)
            }
        }
    }
}

#[inline]
fn backref_header(distance: usize) -> u64 {
    (((distance - 1) as u64) << 1) | BACKREF_FLAG
}

/// Size of the header that precedes a literal run of `run_len` bytes.
#[inline]
pub fn literal_header_len(run_len: usize) -> usize {
    varint::sizeof_u64(((run_len.max(1) - 1) as u64) << 1)
}

/// Serialized size of a back-reference.
#[inline]
pub fn backref_len(distance: usize, length: usize) -> usize {
    varint::sizeof_u64(backref_header(distance)) + varint::sizeof_usize(length - MIN_MATCH)
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Iterator over the tokens of a compressed stream.
///
/// Validates everything that can be checked without the decoded output:
/// truncation, varint overflow, window bound, length bound. Whether a
/// back-reference reaches before the start of the output is left to the
/// decoder. After the first error the iterator is exhausted.
pub struct TokenReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> TokenReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Offset in the stream of the next token header.
    pub fn offset(&self) -> usize {
        self.pos
    }

    fn read_varint(&mut self) -> Result<u64> {
        let (val, used) = varint::read_u64(&self.data[self.pos..], self.pos)?;
        self.pos += used;
        Ok(val)
    }

    fn read_token(&mut self) -> Result<Token<'a>> {
        let start = self.pos;
        let header = self.read_varint()?;
        let payload = usize::try_from(header >> 1)
            .ok()
            .filter(|&v| v < MAX_INPUT_LEN);

        if header & BACKREF_FLAG == 0 {
            let run_len = payload
                .map(|v| v + 1)
                .ok_or(CodecError::corrupt(start, CorruptKind::LengthOverflow))?;
            let remaining = self.data.len() - self.pos;
            if remaining < run_len {
                return Err(CodecError::corrupt(
                    self.data.len(),
                    CorruptKind::Truncated,
                ));
            }
            let bytes = &self.data[self.pos..self.pos + run_len];
            self.pos += run_len;
            return Ok(Token::Literal(bytes));
        }

        let distance = match payload.map(|v| v + 1) {
            Some(d) if d <= MAX_WINDOW => d,
            _ => {
                let distance =
                    usize::try_from((header >> 1).saturating_add(1)).unwrap_or(usize::MAX);
                return Err(CodecError::corrupt(
                    start,
                    CorruptKind::DistanceBeyondWindow {
                        distance,
                        max: MAX_WINDOW,
                    },
                ));
            }
        };

        let extra = self.read_varint()?;
        let length = usize::try_from(extra)
            .ok()
            .and_then(|v| v.checked_add(MIN_MATCH))
            .filter(|&v| v <= MAX_INPUT_LEN)
            .ok_or(CodecError::corrupt(start, CorruptKind::LengthOverflow))?;

        Ok(Token::BackRef { distance, length })
    }
}

impl<'a> Iterator for TokenReader<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.data.len() {
            return None;
        }
        let token = self.read_token();
        if token.is_err() {
            self.pos = self.data.len();
        }
        Some(token)
    }
}
