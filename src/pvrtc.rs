//! PVRTC1 4bpp through `texture2ddecoder`.
//!
//! Each 8-byte block covers 4x4 pixels: 32 bits of 2-bit modulation values,
//! then colour A (bit 0 is the punch-through flag) and colour B. Blocks are
//! stored in Morton order and colours are interpolated across block edges
//! with wrap-around, so the whole texture is decoded in one call.

use alloc::vec;

use enough::Stop;

use crate::bits::unpack_bgra32;
use crate::error::AhffError;

/// Decode PVRTC1 4bpp blocks from `src` into RGBA8 `out`.
///
/// Both block counts must be powers of two. Partial edge blocks are
/// cropped. When `alpha` is false the output is opaque regardless of the
/// encoded alpha.
pub(crate) fn decode_pvrtc4(
    src: &[u8],
    out: &mut [u8],
    width: u32,
    height: u32,
    alpha: bool,
    stop: &dyn Stop,
) -> Result<(), AhffError> {
    let (w, h) = (width as usize, height as usize);
    let mut texels = vec![0u32; w * h];
    stop.check()?;
    texture2ddecoder::decode_pvrtc_4bpp(src, w, h, &mut texels)
        .map_err(AhffError::BlockDecode)?;
    stop.check()?;

    unpack_bgra32(&texels, out);
    if !alpha {
        for px in out.chunks_exact_mut(4) {
            px[3] = 0xFF;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use enough::Unstoppable;

    fn decode(src: &[u8], width: u32, height: u32, alpha: bool) -> Vec<u8> {
        let mut out = vec![0u8; width as usize * height as usize * 4];
        decode_pvrtc4(src, &mut out, width, height, alpha, &Unstoppable).unwrap();
        out
    }

    #[test]
    fn translucent_colours_forced_opaque_without_alpha() {
        // Colour A and B both translucent grey (alpha bits 0b011).
        let block = [0, 0, 0, 0, 0x4A, 0x35, 0x4A, 0x35];
        let rgba = decode(&block, 4, 4, true);
        assert!(rgba.chunks_exact(4).all(|px| px[3] < 0xFF));

        let rgb = decode(&block, 4, 4, false);
        for (a, b) in rgba.chunks_exact(4).zip(rgb.chunks_exact(4)) {
            assert_eq!(a[..3], b[..3]);
            assert_eq!(b[3], 0xFF);
        }
    }
}
