//! Per-pixel (linear) format decoders.
//!
//! Each decoder reads exactly `width * height` source pixels from `src` and
//! writes RGBA8 into `out`, which the caller sizes to `width * height * 4`.
//! Rows are processed in source order; orientation is handled later.

use enough::Stop;

use crate::bits::{expand4, expand5, expand6};
use crate::error::AhffError;

/// Walk source and output rows together, checking `stop` every 16 rows.
fn for_each_row(
    src: &[u8],
    out: &mut [u8],
    width: usize,
    src_bpp: usize,
    stop: &dyn Stop,
    mut f: impl FnMut(&[u8], &mut [u8]),
) -> Result<(), AhffError> {
    let src_stride = width * src_bpp;
    let out_stride = width * 4;
    for (row_idx, (src_row, out_row)) in src
        .chunks_exact(src_stride)
        .zip(out.chunks_exact_mut(out_stride))
        .enumerate()
    {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        f(src_row, out_row);
    }
    Ok(())
}

/// A8 → RGBA: white with the source byte as alpha.
pub(crate) fn decode_alpha8(
    src: &[u8],
    out: &mut [u8],
    width: usize,
    stop: &dyn Stop,
) -> Result<(), AhffError> {
    for_each_row(src, out, width, 1, stop, |src_row, out_row| {
        for (&a, px) in src_row.iter().zip(out_row.chunks_exact_mut(4)) {
            px.copy_from_slice(&[0xFF, 0xFF, 0xFF, a]);
        }
    })
}

/// RGB → RGBA with opaque alpha.
pub(crate) fn decode_rgb24(
    src: &[u8],
    out: &mut [u8],
    width: usize,
    stop: &dyn Stop,
) -> Result<(), AhffError> {
    for_each_row(src, out, width, 3, stop, |src_row, out_row| {
        for (s, px) in src_row.chunks_exact(3).zip(out_row.chunks_exact_mut(4)) {
            px[..3].copy_from_slice(s);
            px[3] = 0xFF;
        }
    })
}

/// RGBA → RGBA.
pub(crate) fn decode_rgba32(
    src: &[u8],
    out: &mut [u8],
    width: usize,
    stop: &dyn Stop,
) -> Result<(), AhffError> {
    for_each_row(src, out, width, 4, stop, |src_row, out_row| {
        out_row.copy_from_slice(src_row);
    })
}

/// ARGB → RGBA.
pub(crate) fn decode_argb32(
    src: &[u8],
    out: &mut [u8],
    width: usize,
    stop: &dyn Stop,
) -> Result<(), AhffError> {
    for_each_row(src, out, width, 4, stop, |src_row, out_row| {
        for (s, px) in src_row.chunks_exact(4).zip(out_row.chunks_exact_mut(4)) {
            px.copy_from_slice(&[s[1], s[2], s[3], s[0]]);
        }
    })
}

/// Little-endian RRRRRGGG GGGBBBBB → RGBA with opaque alpha.
pub(crate) fn decode_rgb565(
    src: &[u8],
    out: &mut [u8],
    width: usize,
    stop: &dyn Stop,
) -> Result<(), AhffError> {
    for_each_row(src, out, width, 2, stop, |src_row, out_row| {
        for (s, px) in src_row.chunks_exact(2).zip(out_row.chunks_exact_mut(4)) {
            let v = u16::from_le_bytes([s[0], s[1]]);
            let r = ((v >> 11) & 0x1F) as u8;
            let g = ((v >> 5) & 0x3F) as u8;
            let b = (v & 0x1F) as u8;
            px.copy_from_slice(&[expand5(r), expand6(g), expand5(b), 0xFF]);
        }
    })
}

/// Little-endian RRRRGGGG BBBBAAAA → RGBA.
pub(crate) fn decode_rgba4444(
    src: &[u8],
    out: &mut [u8],
    width: usize,
    stop: &dyn Stop,
) -> Result<(), AhffError> {
    for_each_row(src, out, width, 2, stop, |src_row, out_row| {
        for (s, px) in src_row.chunks_exact(2).zip(out_row.chunks_exact_mut(4)) {
            let v = u16::from_le_bytes([s[0], s[1]]);
            let r = ((v >> 12) & 0xF) as u8;
            let g = ((v >> 8) & 0xF) as u8;
            let b = ((v >> 4) & 0xF) as u8;
            let a = (v & 0xF) as u8;
            px.copy_from_slice(&[expand4(r), expand4(g), expand4(b), expand4(a)]);
        }
    })
}
