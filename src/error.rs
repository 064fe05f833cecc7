// Error taxonomy for the block codec.
//
// Encode-time: InputTooLarge, OutputTooSmall (slice output only).
// Decode-time: CorruptStream, OutputTooSmall (slice output only).
// Both sides: AllocationFailure when the output buffer cannot grow.

use thiserror::Error;

/// Why a compressed stream was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorruptKind {
    /// The stream ended in the middle of a token.
    #[error("stream truncated mid-token")]
    Truncated,

    /// A varint did not fit in 64 bits.
    #[error("varint overflow")]
    VarintOverflow,

    /// A back-reference points before the start of the output.
    #[error("back-reference distance {distance} exceeds produced output {produced}")]
    DistanceOutOfRange { distance: usize, produced: usize },

    /// A back-reference reaches further than any encoder window.
    #[error("back-reference distance {distance} exceeds maximum window {max}")]
    DistanceBeyondWindow { distance: usize, max: usize },

    /// A token length, or the running output size, exceeds the addressable limit.
    #[error("token length overflows the addressable output size")]
    LengthOverflow,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CodecError {
    #[error("input of {len} bytes exceeds the addressable limit of {max} bytes")]
    InputTooLarge { len: usize, max: usize },

    #[error("corrupt stream at offset {offset}: {kind}")]
    CorruptStream { offset: usize, kind: CorruptKind },

    #[error("failed to allocate {requested} bytes of output")]
    AllocationFailure { requested: usize },

    #[error("output buffer too small: need at least {needed_at_least} bytes, have {available}")]
    OutputTooSmall {
        needed_at_least: usize,
        available: usize,
    },
}

impl CodecError {
    pub(crate) fn corrupt(offset: usize, kind: CorruptKind) -> Self {
        Self::CorruptStream { offset, kind }
    }

    /// True for errors caused by the compressed input rather than resources.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::CorruptStream { .. })
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrupt_message_includes_offset_and_reason() {
        let err = CodecError::corrupt(
            7,
            CorruptKind::DistanceOutOfRange {
                distance: 9,
                produced: 4,
            },
        );
        assert!(err.is_corrupt());
        assert_eq!(
            err.to_string(),
            "corrupt stream at offset 7: back-reference distance 9 exceeds produced output 4"
        );
    }

    #[test]
    fn allocation_failure_is_not_corruption() {
        let err = CodecError::AllocationFailure { requested: 1 << 40 };
        assert!(!err.is_corrupt());
    }
}
