// Output destinations shared by the encoder and decoder.
//
// - `Vec<u8>`     grows on demand; allocation failure is reported, not aborted
// - `SliceSink`   writes into a caller buffer and never grows

use crate::error::{CodecError, Result};

/// Somewhere to put produced bytes.
pub trait OutputSink {
    /// Append `bytes`.
    fn put_slice(&mut self, bytes: &[u8]) -> Result<()>;

    /// Append `length` bytes copied from `distance` bytes behind the end.
    ///
    /// `length` may exceed `distance`, in which case the copy repeats the
    /// last `distance` bytes. Callers guarantee `1 <= distance <= written()`.
    fn copy_back(&mut self, distance: usize, length: usize) -> Result<()>;

    /// Bytes written so far.
    fn written(&self) -> usize;
}

fn reserve(vec: &mut Vec<u8>, additional: usize) -> Result<()> {
    vec.try_reserve(additional)
        .map_err(|_| CodecError::AllocationFailure {
            requested: vec.len().saturating_add(additional),
        })
}

impl OutputSink for Vec<u8> {
    fn put_slice(&mut self, bytes: &[u8]) -> Result<()> {
        reserve(self, bytes.len())?;
        self.extend_from_slice(bytes);
        Ok(())
    }

    fn copy_back(&mut self, distance: usize, length: usize) -> Result<()> {
        debug_assert!(distance >= 1 && distance <= self.len());
        reserve(self, length)?;

        // Each chunk's source lies wholly in bytes already written, and the
        // chunk doubles every round, so overlapping copies replicate the
        // period without ever reading unwritten output.
        let start = self.len() - distance;
        let mut remaining = length;
        while remaining > 0 {
            let chunk = remaining.min(self.len() - start);
            self.extend_from_within(start..start + chunk);
            remaining -= chunk;
        }
        Ok(())
    }

    fn written(&self) -> usize {
        self.len()
    }
}

/// Fixed-capacity output over a caller-provided buffer.
pub struct SliceSink<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> SliceSink<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn ensure(&self, additional: usize) -> Result<()> {
        if self.buf.len() - self.pos < additional {
            return Err(CodecError::OutputTooSmall {
                needed_at_least: self.pos.saturating_add(additional),
                available: self.buf.len(),
            });
        }
        Ok(())
    }
}

impl OutputSink for SliceSink<'_> {
    fn put_slice(&mut self, bytes: &[u8]) -> Result<()> {
        self.ensure(bytes.len())?;
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
        Ok(())
    }

    fn copy_back(&mut self, distance: usize, length: usize) -> Result<()> {
        debug_assert!(distance >= 1 && distance <= self.pos);
        self.ensure(length)?;

        // Same doubling scheme as the Vec sink: source and destination of
        // every `copy_within` are disjoint.
        let start = self.pos - distance;
        let mut remaining = length;
        while remaining > 0 {
            let chunk = remaining.min(self.pos - start);
            self.buf.copy_within(start..start + chunk, self.pos);
            self.pos += chunk;
            remaining -= chunk;
        }
        Ok(())
    }

    fn written(&self) -> usize {
        self.pos
    }
}
