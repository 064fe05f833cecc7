// File- and stream-level helpers.
//
// The codec works on whole buffers, so these read the full input into
// memory, run one encode or decode, and write the result with buffered I/O.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use thiserror::Error;

use crate::codec::{Encoder, decoder};
use crate::error::CodecError;
use crate::hash::config::Level;

const BUF_SIZE: usize = 64 * 1024;

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Statistics returned by the compress helpers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressStats {
    /// Level actually used.
    pub level: Level,
    pub input_size: u64,
    pub output_size: u64,
}

impl CompressStats {
    /// Output size as a fraction of input size (0.0 for empty input).
    pub fn ratio(&self) -> f64 {
        if self.input_size == 0 {
            0.0
        } else {
            self.output_size as f64 / self.input_size as f64
        }
    }
}

/// Statistics returned by the decompress helpers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecompressStats {
    pub input_size: u64,
    pub output_size: u64,
    pub tokens: u64,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
}

// ---------------------------------------------------------------------------
// Stream helpers
// ---------------------------------------------------------------------------

/// Compress everything from `reader` into `writer`.
///
/// `level = None` picks a level from the input size.
pub fn compress_stream<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    level: Option<Level>,
) -> Result<CompressStats, IoError> {
    let mut input = Vec::new();
    reader.read_to_end(&mut input)?;

    let level = level.unwrap_or_else(|| Level::auto_for(input.len()));
    let output = Encoder::new().encode(&input, level)?;
    writer.write_all(&output)?;
    writer.flush()?;

    Ok(CompressStats {
        level,
        input_size: input.len() as u64,
        output_size: output.len() as u64,
    })
}

/// Decompress everything from `reader` into `writer`.
pub fn decompress_stream<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    size_hint: Option<usize>,
) -> Result<DecompressStats, IoError> {
    let mut input = Vec::new();
    reader.read_to_end(&mut input)?;

    let stats = decoder::scan(&input)?;
    let output = decoder::decode(&input, size_hint.or(Some(stats.output_len)))?;
    writer.write_all(&output)?;
    writer.flush()?;

    Ok(DecompressStats {
        input_size: input.len() as u64,
        output_size: output.len() as u64,
        tokens: stats.tokens as u64,
    })
}

// ---------------------------------------------------------------------------
// File helpers
// ---------------------------------------------------------------------------

/// Compress `input_path` into `output_path`, replacing any existing file.
pub fn compress_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input_path: P,
    output_path: Q,
    level: Option<Level>,
) -> Result<CompressStats, IoError> {
    let reader = BufReader::with_capacity(BUF_SIZE, File::open(input_path)?);
    let writer = BufWriter::with_capacity(BUF_SIZE, File::create(output_path)?);
    compress_stream(reader, writer, level)
}

/// Decompress `input_path` into `output_path`, replacing any existing file.
pub fn decompress_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input_path: P,
    output_path: Q,
    size_hint: Option<usize>,
) -> Result<DecompressStats, IoError> {
    let reader = BufReader::with_capacity(BUF_SIZE, File::open(input_path)?);
    let writer = BufWriter::with_capacity(BUF_SIZE, File::create(output_path)?);
    decompress_stream(reader, writer, size_hint)
}
