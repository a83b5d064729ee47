//! In-place orientation correction for RGBA8 buffers.
//!
//! AHFF payloads are stored bottom row first, so the standard pipeline flips
//! vertically. Each flip borrows a single scratch row of `width * 4` bytes
//! for the duration of the call.

use alloc::vec;

use crate::error::AhffError;

/// Which flips to apply after decoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Orientation {
    /// Reverse row order (bottom-up storage to top-down output).
    pub flip_vertical: bool,
    /// Reverse pixel order within each row.
    pub flip_horizontal: bool,
}

impl Orientation {
    /// Vertical flip only. This matches the container's row convention.
    pub const STANDARD: Self = Self {
        flip_vertical: true,
        flip_horizontal: false,
    };

    /// Leave rows in storage order.
    pub const NONE: Self = Self {
        flip_vertical: false,
        flip_horizontal: false,
    };

    pub fn is_identity(&self) -> bool {
        !self.flip_vertical && !self.flip_horizontal
    }

    pub(crate) fn apply(&self, buf: &mut [u8], width: u32, height: u32) -> Result<(), AhffError> {
        if self.flip_horizontal {
            flip_horizontal(buf, width, height)?;
        }
        if self.flip_vertical {
            flip_vertical(buf, width, height)?;
        }
        Ok(())
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Checked `width * 4` and `width * height * 4`.
fn geometry(buf: &[u8], width: u32, height: u32) -> Result<(usize, usize), AhffError> {
    let stride = (width as usize)
        .checked_mul(4)
        .ok_or(AhffError::DimensionsTooLarge { width, height })?;
    let needed = stride
        .checked_mul(height as usize)
        .ok_or(AhffError::DimensionsTooLarge { width, height })?;
    if buf.len() < needed {
        return Err(AhffError::BufferTooSmall {
            needed,
            actual: buf.len(),
        });
    }
    Ok((stride, needed))
}

/// Swap row `i` with row `height - 1 - i` for every `i < height / 2`.
///
/// The middle row of an odd-height image is left untouched. Bytes past
/// `width * height * 4` are ignored.
pub fn flip_vertical(buf: &mut [u8], width: u32, height: u32) -> Result<(), AhffError> {
    let (stride, _) = geometry(buf, width, height)?;
    if stride == 0 || height < 2 {
        return Ok(());
    }
    let h = height as usize;
    let mut scratch = vec![0u8; stride];
    for row in 0..h / 2 {
        let target = h - 1 - row;
        let (upper, lower) = buf.split_at_mut(target * stride);
        let top = &mut upper[row * stride..(row + 1) * stride];
        let bottom = &mut lower[..stride];
        scratch.copy_from_slice(bottom);
        bottom.copy_from_slice(top);
        top.copy_from_slice(&scratch);
    }
    Ok(())
}

/// Reverse the pixel order of every row.
pub fn flip_horizontal(buf: &mut [u8], width: u32, height: u32) -> Result<(), AhffError> {
    let (stride, needed) = geometry(buf, width, height)?;
    if stride == 0 || width < 2 {
        return Ok(());
    }
    let mut scratch = vec![0u8; stride];
    for row in buf[..needed].chunks_exact_mut(stride) {
        for (dst, src) in scratch.chunks_exact_mut(4).zip(row.chunks_exact(4).rev()) {
            dst.copy_from_slice(src);
        }
        row.copy_from_slice(&scratch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn numbered(width: u32, height: u32) -> Vec<u8> {
        (0..width * height)
            .flat_map(|i| [i as u8, (i >> 8) as u8, 0xA0, 0xFF])
            .collect()
    }

    #[test]
    fn vertical_swaps_rows() {
        let mut buf = numbered(2, 3);
        let orig = buf.clone();
        flip_vertical(&mut buf, 2, 3).unwrap();
        assert_eq!(&buf[0..8], &orig[16..24]);
        assert_eq!(&buf[8..16], &orig[8..16]);
        assert_eq!(&buf[16..24], &orig[0..8]);
    }

    #[test]
    fn horizontal_reverses_pixels() {
        let mut buf = numbered(3, 2);
        let orig = buf.clone();
        flip_horizontal(&mut buf, 3, 2).unwrap();
        for y in 0..2 {
            for x in 0..3 {
                let dst = (y * 3 + x) * 4;
                let src = (y * 3 + (2 - x)) * 4;
                assert_eq!(&buf[dst..dst + 4], &orig[src..src + 4]);
            }
        }
    }

    #[test]
    fn single_row_and_column_unchanged() {
        let mut row = numbered(5, 1);
        let orig = row.clone();
        flip_vertical(&mut row, 5, 1).unwrap();
        assert_eq!(row, orig);

        let mut col = numbered(1, 5);
        let orig = col.clone();
        flip_horizontal(&mut col, 1, 5).unwrap();
        assert_eq!(col, orig);
    }

    #[test]
    fn short_buffer_rejected() {
        let mut buf = vec![0u8; 15];
        assert!(matches!(
            flip_vertical(&mut buf, 2, 2),
            Err(AhffError::BufferTooSmall {
                needed: 16,
                actual: 15
            })
        ));
        assert!(flip_horizontal(&mut buf, 2, 2).is_err());
    }

    #[test]
    fn standard_orientation_flips_vertically_only() {
        let o = Orientation::default();
        assert_eq!(o, Orientation::STANDARD);
        assert!(!o.is_identity());
        assert!(Orientation::NONE.is_identity());

        let mut buf = numbered(2, 2);
        let mut expected = buf.clone();
        flip_vertical(&mut expected, 2, 2).unwrap();
        o.apply(&mut buf, 2, 2).unwrap();
        assert_eq!(buf, expected);
    }
}
