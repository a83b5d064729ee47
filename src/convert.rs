//! File and stream conversion: read a container, decode it, hand the RGBA8
//! result to an [`ImageSink`].

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use std::vec::Vec;

use enough::Stop;

use crate::decode::{decode_payload, validate};
use crate::error::AhffError;
use crate::format::{PayloadWarning, PixelFormat};
use crate::header::{AhffHeader, HEADER_LEN, parse_header};
use crate::limits::Limits;
use crate::orient::Orientation;

/// Container file extension replaced by [`output_path_for`].
pub const CONTAINER_EXTENSION: &str = "ahff";
/// Extension of the files written by the PNG sink.
pub const IMAGE_EXTENSION: &str = "png";

/// Destination for decoded images.
///
/// Receives top-row-first RGBA8 pixels, `width * height * 4` bytes.
pub trait ImageSink {
    fn encode(&self, path: &Path, pixels: &[u8], width: u32, height: u32)
    -> Result<(), AhffError>;
}

impl<S: ImageSink + ?Sized> ImageSink for &S {
    fn encode(
        &self,
        path: &Path,
        pixels: &[u8],
        width: u32,
        height: u32,
    ) -> Result<(), AhffError> {
        (**self).encode(path, pixels, width, height)
    }
}

/// A container read from a stream: header plus exactly `datsize` payload bytes.
#[derive(Clone, Debug)]
pub struct Container {
    pub header: AhffHeader,
    pub format: PixelFormat,
    pub payload: Vec<u8>,
}

/// Fill `buf` completely, mapping a short stream to `TruncatedInput`.
fn read_full<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> Result<(), AhffError> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => {
                return Err(AhffError::TruncatedInput {
                    needed: buf.len(),
                    actual: filled,
                });
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Read the header, validate it, then read the declared payload.
///
/// Unknown formats, unsupported dimensions and limit violations are
/// reported before the payload buffer is allocated.
pub fn read_container<R: Read + ?Sized>(
    reader: &mut R,
    limits: Option<&Limits>,
) -> Result<Container, AhffError> {
    let mut raw = [0u8; HEADER_LEN];
    read_full(reader, &mut raw)?;
    let header = parse_header(&raw)?;
    let format = validate(&header, limits)?;

    let mut payload = vec![0u8; header.datsize as usize];
    read_full(reader, &mut payload)?;
    Ok(Container {
        header,
        format,
        payload,
    })
}

/// Derive the output path: a trailing `.ahff` becomes `.png`, anything else
/// gets `.png` appended.
pub fn output_path_for(input: &Path) -> PathBuf {
    if input.extension().is_some_and(|ext| ext == CONTAINER_EXTENSION) {
        return input.with_extension(IMAGE_EXTENSION);
    }
    let mut name = input.as_os_str().to_owned();
    name.push(".");
    name.push(IMAGE_EXTENSION);
    PathBuf::from(name)
}

/// Conversion settings.
#[derive(Clone, Debug, Default)]
pub struct ConvertOptions {
    pub limits: Limits,
    pub orientation: Orientation,
}

/// Outcome of a successful conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConvertReport {
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub warning: Option<PayloadWarning>,
}

/// Reads containers, decodes them and writes the result through a sink.
#[derive(Clone, Debug)]
pub struct Converter<S> {
    sink: S,
    options: ConvertOptions,
}

impl<S: ImageSink> Converter<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            options: ConvertOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert one container read from `reader`, writing to `output`.
    ///
    /// Nothing is handed to the sink unless decoding succeeds.
    pub fn convert_reader<R: Read + ?Sized>(
        &self,
        reader: &mut R,
        output: &Path,
        stop: impl Stop,
    ) -> Result<ConvertReport, AhffError> {
        let container = read_container(reader, Some(&self.options.limits))?;
        stop.check()?;
        let decoded = decode_payload(
            &container.header,
            &container.payload,
            Some(&self.options.limits),
            self.options.orientation,
            &stop,
        )?;

        if let Some(warning) = decoded.warning {
            log::warn!("{}: {warning}", output.display());
        }

        self.sink
            .encode(output, decoded.pixels(), decoded.width, decoded.height)?;
        log::info!(
            "wrote {} ({}x{} {})",
            output.display(),
            decoded.width,
            decoded.height,
            decoded.format
        );

        Ok(ConvertReport {
            output: output.to_path_buf(),
            width: decoded.width,
            height: decoded.height,
            format: decoded.format,
            warning: decoded.warning,
        })
    }

    /// Convert the container at `input`, writing to `output`.
    pub fn convert_file(
        &self,
        input: &Path,
        output: &Path,
        stop: impl Stop,
    ) -> Result<ConvertReport, AhffError> {
        let mut reader = BufReader::new(File::open(input)?);
        self.convert_reader(&mut reader, output, stop)
    }
}
