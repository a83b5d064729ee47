//! # ahff
//!
//! Decoder for AHFF texture containers, producing top-down RGBA8 images.
//!
//! An AHFF file is a 16-byte little-endian header (`width`, `height`,
//! `datsize`, `pixel_format`) followed by `datsize` bytes of pixel payload.
//! Rows are stored bottom first; decoding flips them by default.
//!
//! ## Zero-Copy Decoding
//!
//! RGBA32 payloads decoded without any orientation change are returned as a
//! borrowed slice into the input buffer. Everything else allocates a single
//! `width * height * 4` output buffer.
//!
//! ## Supported Formats
//!
//! | tag | format | storage |
//! |-----|--------|---------|
//! | 1  | Alpha8 | 1 byte, alpha only |
//! | 3  | RGB24 | 3 bytes |
//! | 4  | RGBA32 | 4 bytes |
//! | 5  | ARGB32 | 4 bytes, alpha first |
//! | 7  | RGB565 | 16-bit little-endian |
//! | 13 | RGBA4444 | 16-bit little-endian |
//! | 32 | PVRTC_RGB4 | 4bpp, 8-byte blocks, Morton order |
//! | 33 | PVRTC_RGBA4 | 4bpp, 8-byte blocks, Morton order |
//! | 34 | ETC1_RGB | 4bpp, 8-byte blocks, row-major |
//!
//! ## Non-Goals
//!
//! - Encoding AHFF containers
//! - Mipmaps, arrays, cubemaps
//! - PVRTC 2bpp, ETC2, DXT/ASTC
//!
//! ## Usage
//!
//! ```no_run
//! use ahff::{DecodeRequest, ImageInfo, Unstoppable};
//!
//! let data: &[u8] = &[]; // container bytes
//!
//! // Probe without decoding
//! let info = ImageInfo::from_bytes(data)?;
//! println!("{}x{} {}", info.width, info.height, info.format);
//!
//! let decoded = DecodeRequest::new(data).decode(Unstoppable)?;
//! if let Some(warning) = decoded.warning {
//!     eprintln!("{warning}");
//! }
//! # Ok::<(), ahff::AhffError>(())
//! ```
//!
//! With the `png` feature, [`Converter`] and [`PngSink`] turn files on disk
//! into PNGs; the `cli` feature builds the `ahff2png` binary on top of them.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod bits;
mod error;
mod format;
mod header;
mod info;
mod limits;
mod orient;

mod etc1;
mod linear;
mod pvrtc;

mod decode;

#[cfg(feature = "std")]
pub mod convert;

#[cfg(feature = "png")]
mod png;

// Re-exports
pub use decode::{DecodeOutput, DecodeRequest, decode_pixels};
pub use enough::{Stop, Unstoppable};
pub use error::AhffError;
pub use format::{PayloadWarning, PixelFormat, check_payload_size};
pub use header::{AhffHeader, HEADER_LEN, parse_header};
pub use info::ImageInfo;
pub use limits::Limits;
pub use orient::{Orientation, flip_horizontal, flip_vertical};

#[cfg(feature = "std")]
pub use convert::{
    ConvertOptions, ConvertReport, Converter, ImageSink, output_path_for, read_container,
};
#[cfg(feature = "png")]
pub use png::PngSink;
