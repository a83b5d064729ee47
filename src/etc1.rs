//! ETC1 through `texture2ddecoder`.
//!
//! Blocks are 8 bytes for 4x4 pixels, big-endian, in row-major block order.
//! That lets the payload be decoded one block row at a time.

use alloc::vec;

use enough::Stop;

use crate::bits::unpack_bgra32;
use crate::error::AhffError;

const BLOCK_BYTES: usize = 8;

/// Decode ETC1 blocks from `src` into RGBA8 `out`.
///
/// `width` and `height` must be multiples of 4 and `src` must hold
/// `width * height / 2` bytes.
pub(crate) fn decode_etc1(
    src: &[u8],
    out: &mut [u8],
    width: u32,
    height: u32,
    stop: &dyn Stop,
) -> Result<(), AhffError> {
    let width = width as usize;
    let block_row_bytes = width / 4 * BLOCK_BYTES;
    let mut strip = vec![0u32; width * 4];

    for (by, (block_row, out_rows)) in src
        .chunks_exact(block_row_bytes)
        .zip(out.chunks_exact_mut(width * 4 * 4))
        .take(height as usize / 4)
        .enumerate()
    {
        if by % 4 == 0 {
            stop.check()?;
        }
        texture2ddecoder::decode_etc1(block_row, width, 4, &mut strip)
            .map_err(AhffError::BlockDecode)?;
        unpack_bgra32(&strip, out_rows);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use enough::Unstoppable;

    fn decode(src: &[u8], width: u32, height: u32) -> Vec<u8> {
        let mut out = vec![0u8; width as usize * height as usize * 4];
        decode_etc1(src, &mut out, width, height, &Unstoppable).unwrap();
        out
    }

    #[test]
    fn strips_match_whole_image() {
        let src: Vec<u8> = (0..8 * 8 / 2).map(|i| (i * 73 + 11) as u8).collect();
        let mut whole = vec![0u32; 64];
        texture2ddecoder::decode_etc1(&src, 8, 8, &mut whole).unwrap();
        let mut expected = vec![0u8; 256];
        unpack_bgra32(&whole, &mut expected);
        assert_eq!(decode(&src, 8, 8), expected);
    }

    #[test]
    fn all_zero_block_is_near_black() {
        // Base 0, table 0, index 0: +2 on every channel.
        let out = decode(&[0u8; 8], 4, 4);
        assert!(out.chunks_exact(4).all(|p| p == [2, 2, 2, 0xFF]));
    }
}
