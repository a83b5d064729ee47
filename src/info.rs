use crate::error::AhffError;
use crate::format::PixelFormat;
use crate::header::parse_header;

/// Container metadata, probed from the header without decoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    /// Payload size declared by the header.
    pub declared_size: usize,
    /// Payload size the format actually consumes.
    pub expected_size: usize,
}

impl ImageInfo {
    /// Probe the 16-byte header at the start of `data`.
    pub fn from_bytes(data: &[u8]) -> Result<Self, AhffError> {
        let header = parse_header(data)?;
        let format = header.format()?;
        Ok(Self {
            width: header.width,
            height: header.height,
            format,
            declared_size: header.datsize as usize,
            expected_size: format.expected_size(header.width, header.height)?,
        })
    }
}
