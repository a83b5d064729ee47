//! AHFF container header.
//!
//! The container is a 16-byte header of four little-endian `u32` fields
//! (`width`, `height`, `datsize`, `pixel_format`) followed immediately by
//! `datsize` bytes of pixel payload.

use crate::error::AhffError;
use crate::format::PixelFormat;

/// Size of the fixed header in bytes.
pub const HEADER_LEN: usize = 16;

/// Parsed container header. Field ranges are not validated here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AhffHeader {
    pub width: u32,
    pub height: u32,
    /// Declared payload size. Advisory: the payload may be larger than the
    /// format needs.
    pub datsize: u32,
    /// Raw format tag, see [`PixelFormat::from_tag`].
    pub pixel_format: u32,
}

impl AhffHeader {
    /// Resolve the format tag.
    pub fn format(&self) -> Result<PixelFormat, AhffError> {
        PixelFormat::from_tag(self.pixel_format).ok_or(AhffError::UnknownFormat(self.pixel_format))
    }

    /// Serialize back to the 16-byte on-disk layout.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[0..4].copy_from_slice(&self.width.to_le_bytes());
        out[4..8].copy_from_slice(&self.height.to_le_bytes());
        out[8..12].copy_from_slice(&self.datsize.to_le_bytes());
        out[12..16].copy_from_slice(&self.pixel_format.to_le_bytes());
        out
    }
}

fn read_u32_le(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

/// Parse the header from the start of `data`.
pub fn parse_header(data: &[u8]) -> Result<AhffHeader, AhffError> {
    if data.len() < HEADER_LEN {
        return Err(AhffError::TruncatedInput {
            needed: HEADER_LEN,
            actual: data.len(),
        });
    }
    Ok(AhffHeader {
        width: read_u32_le(data, 0),
        height: read_u32_le(data, 4),
        datsize: read_u32_le(data, 8),
        pixel_format: read_u32_le(data, 12),
    })
}
