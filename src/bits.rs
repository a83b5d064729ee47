//! Bit expansion and texel unpacking shared by the decoders.
//!
//! Narrow channels are widened to 8 bits by replicating their high bits into
//! the vacated low bits, so 0 maps to 0x00 and all-ones maps to 0xFF.

#[inline(always)]
pub(crate) const fn expand4(v: u8) -> u8 {
    (v << 4) | v
}

#[inline(always)]
pub(crate) const fn expand5(v: u8) -> u8 {
    (v << 3) | (v >> 2)
}

#[inline(always)]
pub(crate) const fn expand6(v: u8) -> u8 {
    (v << 2) | (v >> 4)
}

/// Unpack `0xAARRGGBB` texels, as the block decoders emit them, to RGBA8.
pub(crate) fn unpack_bgra32(src: &[u32], out: &mut [u8]) {
    for (&texel, px) in src.iter().zip(out.chunks_exact_mut(4)) {
        let [b, g, r, a] = texel.to_le_bytes();
        px.copy_from_slice(&[r, g, b, a]);
    }
}
