use alloc::string::String;
use enough::StopReason;

use crate::format::PixelFormat;

/// Errors from AHFF decoding and conversion.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AhffError {
    #[error("truncated input: need {needed} bytes, got {actual}")]
    TruncatedInput { needed: usize, actual: usize },

    #[error("malformed {format} payload: need {needed} bytes, got {actual}")]
    MalformedPayload {
        format: PixelFormat,
        needed: usize,
        actual: usize,
    },

    #[error("unsupported dimensions {width}x{height} for {format}: {reason}")]
    UnsupportedDimensions {
        format: PixelFormat,
        width: u32,
        height: u32,
        reason: &'static str,
    },

    #[error("unknown pixel format {0}")]
    UnknownFormat(u32),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("block decoder failed: {0}")]
    BlockDecode(&'static str),

    #[error("encoder failed: {0}")]
    Encode(String),

    #[cfg(feature = "std")]
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for AhffError {
    fn from(r: StopReason) -> Self {
        AhffError::Cancelled(r)
    }
}
