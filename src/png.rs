//! PNG output through the `image` crate.

use std::path::Path;

use crate::convert::ImageSink;
use crate::error::AhffError;

/// Writes RGBA8 PNG files.
#[derive(Clone, Copy, Debug, Default)]
pub struct PngSink;

impl ImageSink for PngSink {
    fn encode(
        &self,
        path: &Path,
        pixels: &[u8],
        width: u32,
        height: u32,
    ) -> Result<(), AhffError> {
        image::save_buffer_with_format(
            path,
            pixels,
            width,
            height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| AhffError::Encode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_readable_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let pixels = [255u8, 0, 0, 255, 0, 255, 0, 128];
        PngSink.encode(&path, &pixels, 2, 1).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (2, 1));
        assert_eq!(img.as_raw().as_slice(), &pixels);
    }

    #[test]
    fn size_mismatch_is_encode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.png");
        let err = PngSink.encode(&path, &[0u8; 3], 2, 1).unwrap_err();
        assert!(matches!(err, AhffError::Encode(_)));
    }
}
