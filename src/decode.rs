use alloc::borrow::Cow;
use alloc::vec;
use alloc::vec::Vec;

use enough::Stop;
#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use crate::error::AhffError;
use crate::format::{PayloadWarning, PixelFormat, check_payload_size};
use crate::header::{AhffHeader, HEADER_LEN, parse_header};
use crate::limits::Limits;
use crate::orient::Orientation;
use crate::{etc1, linear, pvrtc};

/// Decoded RGBA8 image. Pixels may be borrowed (zero-copy) or owned.
#[derive(Clone, Debug)]
pub struct DecodeOutput<'a> {
    pixels: Cow<'a, [u8]>,
    pub width: u32,
    pub height: u32,
    /// Source encoding of the payload.
    pub format: PixelFormat,
    /// Set when the container declared more payload than the format needs.
    pub warning: Option<PayloadWarning>,
}

impl<'a> DecodeOutput<'a> {
    /// Row-major RGBA8 pixel data, `width * height * 4` bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the pixel data (copies if borrowed).
    pub fn into_owned(self) -> DecodeOutput<'static> {
        DecodeOutput {
            pixels: Cow::Owned(self.pixels.into_owned()),
            width: self.width,
            height: self.height,
            format: self.format,
            warning: self.warning,
        }
    }

    /// Consume the output and return the pixel buffer.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels.into_owned()
    }

    /// Whether the pixel data is borrowed (zero-copy from input).
    pub fn is_borrowed(&self) -> bool {
        matches!(self.pixels, Cow::Borrowed(_))
    }

    fn borrowed(
        data: &'a [u8],
        width: u32,
        height: u32,
        format: PixelFormat,
        warning: Option<PayloadWarning>,
    ) -> Self {
        Self {
            pixels: Cow::Borrowed(data),
            width,
            height,
            format,
            warning,
        }
    }

    fn owned(
        data: Vec<u8>,
        width: u32,
        height: u32,
        format: PixelFormat,
        warning: Option<PayloadWarning>,
    ) -> Self {
        Self {
            pixels: Cow::Owned(data),
            width,
            height,
            format,
            warning,
        }
    }

    /// Reinterpret pixel data as typed RGBA8 pixels.
    #[cfg(feature = "rgb")]
    pub fn as_rgba(&self) -> &[rgb::RGBA8] {
        self.pixels().as_pixels()
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of RGBA8 pixels.
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, rgb::RGBA8> {
        imgref::ImgRef::new(self.as_rgba(), self.width as usize, self.height as usize)
    }

    /// Convert to an [`imgref::ImgVec`] of RGBA8 pixels.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<rgb::RGBA8> {
        imgref::ImgVec::new(
            self.as_rgba().to_vec(),
            self.width as usize,
            self.height as usize,
        )
    }
}

/// Builder for decoding a complete in-memory AHFF container.
///
/// ```no_run
/// use ahff::{DecodeRequest, Unstoppable};
///
/// let data: &[u8] = &[]; // header + payload
/// let decoded = DecodeRequest::new(data).decode(Unstoppable)?;
/// assert_eq!(decoded.pixels().len(), decoded.width as usize * decoded.height as usize * 4);
/// # Ok::<(), ahff::AhffError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
    orientation: Orientation,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limits: None,
            orientation: Orientation::default(),
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Override the default vertical flip.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn decode(self, stop: impl Stop) -> Result<DecodeOutput<'a>, AhffError> {
        let header = parse_header(self.data)?;
        // Format, dimensions and limits before touching the payload.
        validate(&header, self.limits)?;
        let datsize = header.datsize as usize;
        let payload = self.data[HEADER_LEN..]
            .get(..datsize)
            .ok_or(AhffError::TruncatedInput {
                needed: HEADER_LEN.saturating_add(datsize),
                actual: self.data.len(),
            })?;
        decode_payload(&header, payload, self.limits, self.orientation, &stop)
    }
}

/// Bytes in the canonical RGBA8 buffer for `width`x`height`.
pub(crate) fn canonical_len(width: u32, height: u32) -> Result<usize, AhffError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or(AhffError::DimensionsTooLarge { width, height })
}

/// Check the header against the format and limits before any allocation.
pub(crate) fn validate(
    header: &AhffHeader,
    limits: Option<&Limits>,
) -> Result<PixelFormat, AhffError> {
    let format = header.format()?;
    let (width, height) = (header.width, header.height);
    format.check_dimensions(width, height)?;
    if let Some(limits) = limits {
        limits.check(width, height)?;
        limits.check_memory(canonical_len(width, height)?)?;
        limits.check_memory(header.datsize as usize)?;
    }
    Ok(format)
}

/// Decode an already separated payload, then apply `orientation`.
pub(crate) fn decode_payload<'a>(
    header: &AhffHeader,
    payload: &'a [u8],
    limits: Option<&Limits>,
    orientation: Orientation,
    stop: &dyn Stop,
) -> Result<DecodeOutput<'a>, AhffError> {
    let format = validate(header, limits)?;
    let (width, height) = (header.width, header.height);
    let expected = format.expected_size(width, height)?;
    let warning = check_payload_size(payload.len(), expected);
    stop.check()?;

    log::debug!(
        "decoding {width}x{height} {format}: {} payload bytes, {expected} used",
        payload.len()
    );

    if format == PixelFormat::Rgba32 && orientation.is_identity() && payload.len() >= expected {
        return Ok(DecodeOutput::borrowed(
            &payload[..expected],
            width,
            height,
            format,
            warning,
        ));
    }

    let mut pixels = decode_into_vec(format, payload, width, height, stop)?;
    orientation.apply(&mut pixels, width, height)?;
    Ok(DecodeOutput::owned(pixels, width, height, format, warning))
}

/// Decode a raw payload to RGBA8 in storage row order (no orientation).
///
/// Fails with [`AhffError::MalformedPayload`] when `payload` is shorter than
/// [`PixelFormat::expected_size`]; extra bytes are ignored.
pub fn decode_pixels(
    format: PixelFormat,
    payload: &[u8],
    width: u32,
    height: u32,
    stop: impl Stop,
) -> Result<Vec<u8>, AhffError> {
    decode_into_vec(format, payload, width, height, &stop)
}

fn decode_into_vec(
    format: PixelFormat,
    payload: &[u8],
    width: u32,
    height: u32,
    stop: &dyn Stop,
) -> Result<Vec<u8>, AhffError> {
    format.check_dimensions(width, height)?;
    let needed = format.expected_size(width, height)?;
    if payload.len() < needed {
        return Err(AhffError::MalformedPayload {
            format,
            needed,
            actual: payload.len(),
        });
    }
    let src = &payload[..needed];
    let mut out = vec![0u8; canonical_len(width, height)?];
    let w = width as usize;

    match format {
        PixelFormat::Alpha8 => linear::decode_alpha8(src, &mut out, w, stop)?,
        PixelFormat::Rgb24 => linear::decode_rgb24(src, &mut out, w, stop)?,
        PixelFormat::Rgba32 => linear::decode_rgba32(src, &mut out, w, stop)?,
        PixelFormat::Argb32 => linear::decode_argb32(src, &mut out, w, stop)?,
        PixelFormat::Rgb565 => linear::decode_rgb565(src, &mut out, w, stop)?,
        PixelFormat::Rgba4444 => linear::decode_rgba4444(src, &mut out, w, stop)?,
        PixelFormat::PvrtcRgb4 => pvrtc::decode_pvrtc4(src, &mut out, width, height, false, stop)?,
        PixelFormat::PvrtcRgba4 => pvrtc::decode_pvrtc4(src, &mut out, width, height, true, stop)?,
        PixelFormat::Etc1Rgb => etc1::decode_etc1(src, &mut out, width, height, stop)?,
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use enough::Unstoppable;

    fn container(header: AhffHeader, payload: &[u8]) -> Vec<u8> {
        let mut data = header.to_bytes().to_vec();
        data.extend_from_slice(payload);
        data
    }

    fn header(width: u32, height: u32, datsize: u32, format: PixelFormat) -> AhffHeader {
        AhffHeader {
            width,
            height,
            datsize,
            pixel_format: format.tag(),
        }
    }

    #[test]
    fn all_zero_minimum_payloads() {
        for format in PixelFormat::ALL {
            let (w, h) = (4, 4);
            let payload = vec![0u8; format.expected_size(w, h).unwrap()];
            let out = decode_pixels(format, &payload, w, h, Unstoppable).unwrap();
            assert_eq!(out.len(), 64, "{format}");
            let expected: [u8; 4] = match format {
                PixelFormat::Alpha8 => [0xFF, 0xFF, 0xFF, 0],
                PixelFormat::Rgb24 | PixelFormat::Rgb565 | PixelFormat::PvrtcRgb4 => {
                    [0, 0, 0, 0xFF]
                }
                PixelFormat::Rgba32
                | PixelFormat::Argb32
                | PixelFormat::Rgba4444
                | PixelFormat::PvrtcRgba4 => [0, 0, 0, 0],
                PixelFormat::Etc1Rgb => [2, 2, 2, 0xFF],
            };
            assert!(
                out.chunks_exact(4).all(|px| px == expected),
                "{format}: {:?}",
                &out[..4]
            );
        }
    }

    #[test]
    fn short_payload_is_malformed() {
        let err = decode_pixels(PixelFormat::Rgb24, &[0u8; 11], 2, 2, Unstoppable).unwrap_err();
        assert!(matches!(
            err,
            AhffError::MalformedPayload {
                format: PixelFormat::Rgb24,
                needed: 12,
                actual: 11
            }
        ));
    }

    #[test]
    fn rgba32_without_flip_is_zero_copy() {
        let payload: Vec<u8> = (0..16).collect();
        let data = container(header(2, 2, 16, PixelFormat::Rgba32), &payload);
        let out = DecodeRequest::new(&data)
            .with_orientation(Orientation::NONE)
            .decode(Unstoppable)
            .unwrap();
        assert!(out.is_borrowed());
        assert_eq!(out.pixels(), &payload[..]);
        assert!(!out.into_owned().is_borrowed());
    }

    #[test]
    fn oversize_payload_warns_and_decodes() {
        let payload = [1u8, 2, 3, 4, 5, 6];
        let data = container(header(1, 1, 6, PixelFormat::Rgba32), &payload);
        let out = DecodeRequest::new(&data).decode(Unstoppable).unwrap();
        assert_eq!(out.pixels(), &[1, 2, 3, 4]);
        assert_eq!(
            out.warning,
            Some(PayloadWarning::Oversize {
                declared: 6,
                expected: 4
            })
        );
    }

    #[test]
    fn undersized_declared_payload_is_malformed() {
        let data = container(header(2, 1, 4, PixelFormat::Rgba32), &[0u8; 8]);
        let err = DecodeRequest::new(&data).decode(Unstoppable).unwrap_err();
        assert!(matches!(err, AhffError::MalformedPayload { needed: 8, actual: 4, .. }));
    }

    #[test]
    fn payload_shorter_than_declared_is_truncated() {
        let data = container(header(2, 2, 16, PixelFormat::Rgba32), &[0u8; 10]);
        let err = DecodeRequest::new(&data).decode(Unstoppable).unwrap_err();
        assert!(matches!(
            err,
            AhffError::TruncatedInput {
                needed: 32,
                actual: 26
            }
        ));
    }

    #[test]
    fn unknown_format_checked_before_payload() {
        let data = AhffHeader {
            width: 2,
            height: 2,
            datsize: 1000,
            pixel_format: 999,
        }
        .to_bytes();
        let err = DecodeRequest::new(&data).decode(Unstoppable).unwrap_err();
        assert!(matches!(err, AhffError::UnknownFormat(999)));
    }

    #[test]
    fn limits_apply() {
        let data = container(header(4, 4, 64, PixelFormat::Rgba32), &[0u8; 64]);
        let limits = Limits {
            max_width: Some(2),
            ..Default::default()
        };
        let err = DecodeRequest::new(&data)
            .with_limits(&limits)
            .decode(Unstoppable)
            .unwrap_err();
        assert!(matches!(err, AhffError::LimitExceeded(_)));
    }

    #[test]
    fn horizontal_flip_option() {
        let payload = [1u8, 1, 1, 1, 2, 2, 2, 2];
        let data = container(header(2, 1, 8, PixelFormat::Rgba32), &payload);
        let out = DecodeRequest::new(&data)
            .with_orientation(Orientation {
                flip_vertical: false,
                flip_horizontal: true,
            })
            .decode(Unstoppable)
            .unwrap();
        assert!(!out.is_borrowed());
        assert_eq!(out.pixels(), &[2, 2, 2, 2, 1, 1, 1, 1]);
    }
}
