use core::fmt;

use crate::error::AhffError;

/// Pixel encoding of an AHFF payload, keyed by the header's format tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 1 byte/px alpha, RGB fixed white.
    Alpha8,
    /// 3 bytes/px R, G, B.
    Rgb24,
    /// 4 bytes/px R, G, B, A (canonical layout).
    Rgba32,
    /// 4 bytes/px A, R, G, B.
    Argb32,
    /// 16-bit little-endian 5-6-5 RGB.
    Rgb565,
    /// 16-bit little-endian 4-4-4-4 RGBA.
    Rgba4444,
    /// PVRTC1 4bpp, alpha ignored.
    PvrtcRgb4,
    /// PVRTC1 4bpp with alpha.
    PvrtcRgba4,
    /// ETC1 4bpp RGB.
    Etc1Rgb,
}

impl PixelFormat {
    /// Every supported format, in tag order.
    pub const ALL: [PixelFormat; 9] = [
        Self::Alpha8,
        Self::Rgb24,
        Self::Rgba32,
        Self::Argb32,
        Self::Rgb565,
        Self::Rgba4444,
        Self::PvrtcRgb4,
        Self::PvrtcRgba4,
        Self::Etc1Rgb,
    ];

    /// Map a header tag to a format. Returns `None` for unknown tags.
    pub fn from_tag(tag: u32) -> Option<Self> {
        match tag {
            1 => Some(Self::Alpha8),
            3 => Some(Self::Rgb24),
            4 => Some(Self::Rgba32),
            5 => Some(Self::Argb32),
            7 => Some(Self::Rgb565),
            13 => Some(Self::Rgba4444),
            32 => Some(Self::PvrtcRgb4),
            33 => Some(Self::PvrtcRgba4),
            34 => Some(Self::Etc1Rgb),
            _ => None,
        }
    }

    /// The header tag for this format.
    pub fn tag(self) -> u32 {
        match self {
            Self::Alpha8 => 1,
            Self::Rgb24 => 3,
            Self::Rgba32 => 4,
            Self::Argb32 => 5,
            Self::Rgb565 => 7,
            Self::Rgba4444 => 13,
            Self::PvrtcRgb4 => 32,
            Self::PvrtcRgba4 => 33,
            Self::Etc1Rgb => 34,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Alpha8 => "Alpha8",
            Self::Rgb24 => "RGB24",
            Self::Rgba32 => "RGBA32",
            Self::Argb32 => "ARGB32",
            Self::Rgb565 => "RGB565",
            Self::Rgba4444 => "RGBA4444",
            Self::PvrtcRgb4 => "PVRTC_RGB4",
            Self::PvrtcRgba4 => "PVRTC_RGBA4",
            Self::Etc1Rgb => "ETC1_RGB",
        }
    }

    /// Average encoded bits per output pixel.
    pub fn bits_per_pixel(self) -> usize {
        match self {
            Self::Alpha8 => 8,
            Self::Rgb565 | Self::Rgba4444 => 16,
            Self::Rgb24 => 24,
            Self::Rgba32 | Self::Argb32 => 32,
            Self::PvrtcRgb4 | Self::PvrtcRgba4 | Self::Etc1Rgb => 4,
        }
    }

    /// Whether the format stores 4x4 pixel blocks rather than pixels.
    pub fn is_block_compressed(self) -> bool {
        matches!(self, Self::PvrtcRgb4 | Self::PvrtcRgba4 | Self::Etc1Rgb)
    }

    /// Number of payload bytes this format consumes for a `width`x`height` image.
    ///
    /// Block formats count whole 8-byte blocks, so partial edge blocks are
    /// rounded up. For dimensions that are multiples of 4 this is `w*h/2`.
    pub fn expected_size(self, width: u32, height: u32) -> Result<usize, AhffError> {
        let too_large = AhffError::DimensionsTooLarge { width, height };
        if self.is_block_compressed() {
            let blocks_x = width.div_ceil(4) as usize;
            let blocks_y = height.div_ceil(4) as usize;
            return blocks_x
                .checked_mul(blocks_y)
                .and_then(|n| n.checked_mul(8))
                .ok_or(too_large);
        }
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(self.bits_per_pixel() / 8))
            .ok_or(too_large)
    }

    /// Reject dimensions the decoder for this format cannot address.
    pub fn check_dimensions(self, width: u32, height: u32) -> Result<(), AhffError> {
        let unsupported = |reason| AhffError::UnsupportedDimensions {
            format: self,
            width,
            height,
            reason,
        };
        if width == 0 || height == 0 {
            return Err(unsupported("width and height must be non-zero"));
        }
        match self {
            Self::Etc1Rgb if width % 4 != 0 || height % 4 != 0 => {
                Err(unsupported("ETC1 needs dimensions that are multiples of 4"))
            }
            Self::PvrtcRgb4 | Self::PvrtcRgba4
                if !width.div_ceil(4).is_power_of_two() || !height.div_ceil(4).is_power_of_two() =>
            {
                Err(unsupported("PVRTC needs a power-of-two block count per side"))
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Non-fatal payload diagnostic.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PayloadWarning {
    /// The header declares more payload bytes than the format consumes.
    /// Decoding uses only the first `expected` bytes.
    Oversize { declared: usize, expected: usize },
}

impl fmt::Display for PayloadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Oversize { declared, expected } => write!(
                f,
                "image data is larger than expected ({declared} as opposed to {expected})"
            ),
        }
    }
}

/// Compare the declared payload size with what the format needs.
///
/// Only an oversized payload produces a warning. A smaller payload is left
/// to the decoder's minimum-size check.
pub fn check_payload_size(declared: usize, expected: usize) -> Option<PayloadWarning> {
    (declared > expected).then_some(PayloadWarning::Oversize { declared, expected })
}
