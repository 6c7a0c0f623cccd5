//! In-memory rasters and the portable any-map (PPM/PGM) writer.
//!
//! A [`Raster`] is a tightly packed, row-major 8-bit pixel buffer with either
//! three interleaved channels ([`Channels::Rgb`]) or one ([`Channels::Gray`]).
//! [`write_raster`] serialises any buffer, padded rows included, as binary
//! `P6` (colour) or `P5` (grayscale) with a maxval of 255:
//!
//! ```text
//! P6\n<width> <height>\n255\n<height rows of width*3 bytes>
//! P5\n<width> <height>\n255\n<height rows of width bytes>
//! ```
//!
//! [`PnmHeader`] parses those headers back.

use std::{
    fs::File,
    io::{BufWriter, Read, Write},
    path::Path,
};

use ffmpeg_next::frame::Video as VideoFrame;

use crate::error::FrameGrabError;

/// Largest sample value written into every header.
pub const MAX_VALUE: u32 = 255;

/// Pixel layout of a raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channels {
    /// Interleaved R, G, B bytes. Written as `P6`.
    Rgb,
    /// One luminance byte. Written as `P5`.
    Gray,
}

impl Channels {
    /// Bytes per pixel.
    pub fn count(self) -> usize {
        match self {
            Channels::Rgb => 3,
            Channels::Gray => 1,
        }
    }

    /// The any-map magic number for this layout.
    pub fn magic(self) -> &'static str {
        match self {
            Channels::Rgb => "P6",
            Channels::Gray => "P5",
        }
    }

    fn from_magic(magic: &[u8]) -> Option<Self> {
        match magic {
            b"P6" => Some(Channels::Rgb),
            b"P5" => Some(Channels::Gray),
            _ => None,
        }
    }
}

/// A tightly packed 8-bit raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    channels: Channels,
    data: Vec<u8>,
}

impl Raster {
    /// Wrap an existing buffer.
    ///
    /// # Errors
    ///
    /// Returns [`FrameGrabError::InvalidRaster`] if `data` is not exactly
    /// `width * height * channels` bytes long.
    pub fn new(
        width: u32,
        height: u32,
        channels: Channels,
        data: Vec<u8>,
    ) -> Result<Self, FrameGrabError> {
        let expected = width as usize * height as usize * channels.count();
        if data.len() != expected {
            return Err(FrameGrabError::InvalidRaster(format!(
                "{width}x{height} {channels:?} raster needs {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Copy plane 0 of a converted FFmpeg frame, dropping row padding.
    pub(crate) fn from_frame(
        frame: &VideoFrame,
        width: u32,
        height: u32,
        channels: Channels,
    ) -> Result<Self, FrameGrabError> {
        let stride = frame.stride(0);
        let row_bytes = width as usize * channels.count();
        let rows = height as usize;
        let plane = frame.data(0);

        let data = if stride == row_bytes {
            plane
                .get(..row_bytes * rows)
                .map(<[u8]>::to_vec)
                .ok_or_else(|| short_plane(plane.len(), row_bytes * rows))?
        } else {
            if stride < row_bytes {
                return Err(FrameGrabError::InvalidRaster(format!(
                    "frame stride {stride} is narrower than a {row_bytes}-byte row"
                )));
            }
            let needed = packed_len(stride, row_bytes, rows);
            if plane.len() < needed {
                return Err(short_plane(plane.len(), needed));
            }
            let mut buffer = Vec::with_capacity(row_bytes * rows);
            for row in plane.chunks(stride).take(rows) {
                buffer.extend_from_slice(&row[..row_bytes]);
            }
            buffer
        };

        Self::new(width, height, channels, data)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel layout.
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Bytes per row. Always `width * channels` for a `Raster`.
    pub fn stride(&self) -> usize {
        self.width as usize * self.channels.count()
    }

    /// The raw pixel bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the raster and return its pixel bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// The bytes of the pixel at `(x, y)`, or `None` if out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let count = self.channels.count();
        let start = y as usize * self.stride() + x as usize * count;
        self.data.get(start..start + count)
    }

    /// Write this raster as `P6` or `P5` to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// See [`write_raster`].
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), FrameGrabError> {
        write_raster(
            &self.data,
            self.stride(),
            self.width,
            self.height,
            path,
            self.channels,
        )
    }
}

/// Write a pixel buffer as a binary any-map file.
///
/// Row `r` is read from `buffer[r * row_stride..]`, and exactly
/// `width * channels` bytes of it are written, so padded source rows are
/// written without an intermediate copy.
///
/// # Errors
///
/// - [`FrameGrabError::InvalidRaster`] if `row_stride` is narrower than a row
///   or `buffer` is too short for the declared geometry. Nothing is written.
/// - [`FrameGrabError::RasterWrite`] if the file cannot be created or a write
///   fails. A partially written file is left in place.
///
/// # Example
///
/// ```no_run
/// use framegrab::{Channels, write_raster};
///
/// // 2x1 gray image stored with 4 bytes per row.
/// let padded = [10u8, 20, 0, 0];
/// write_raster(&padded, 4, 2, 1, "tiny.pgm", Channels::Gray)?;
/// # Ok::<(), framegrab::FrameGrabError>(())
/// ```
pub fn write_raster<P: AsRef<Path>>(
    buffer: &[u8],
    row_stride: usize,
    width: u32,
    height: u32,
    path: P,
    channels: Channels,
) -> Result<(), FrameGrabError> {
    let path = path.as_ref();
    let row_bytes = width as usize * channels.count();
    let rows = height as usize;

    if row_stride < row_bytes {
        return Err(FrameGrabError::InvalidRaster(format!(
            "row stride {row_stride} is narrower than a {row_bytes}-byte row"
        )));
    }
    let needed = packed_len(row_stride, row_bytes, rows);
    if buffer.len() < needed {
        return Err(short_plane(buffer.len(), needed));
    }

    let write_error = |source| FrameGrabError::RasterWrite {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);

    write!(writer, "{}\n{width} {height}\n{MAX_VALUE}\n", channels.magic()).map_err(write_error)?;
    for row in 0..rows {
        let start = row * row_stride;
        writer
            .write_all(&buffer[start..start + row_bytes])
            .map_err(write_error)?;
    }
    writer.flush().map_err(write_error)?;

    log::debug!(
        "Wrote {width}x{height} {} raster to {}",
        channels.magic(),
        path.display()
    );
    Ok(())
}

/// The header of a binary any-map file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PnmHeader {
    /// Pixel layout implied by the magic number.
    pub channels: Channels,
    /// Declared width.
    pub width: u32,
    /// Declared height.
    pub height: u32,
    /// Declared maximum sample value.
    pub max_value: u32,
    /// Byte offset of the first pixel.
    pub data_offset: usize,
}

impl PnmHeader {
    /// Parse the header at the start of `bytes`.
    ///
    /// Fields may be separated by any whitespace and interleaved with `#`
    /// comments; exactly one whitespace byte follows the maxval.
    ///
    /// # Errors
    ///
    /// Returns [`FrameGrabError::InvalidRaster`] for an unknown magic number or
    /// a missing or non-numeric field.
    pub fn parse(bytes: &[u8]) -> Result<Self, FrameGrabError> {
        let magic = bytes
            .get(..2)
            .ok_or_else(|| FrameGrabError::InvalidRaster("file too short for a header".into()))?;
        let channels = Channels::from_magic(magic).ok_or_else(|| {
            FrameGrabError::InvalidRaster(format!(
                "unsupported magic number {:?}",
                String::from_utf8_lossy(magic)
            ))
        })?;

        let mut cursor = 2;
        let width = next_header_number(bytes, &mut cursor, "width")?;
        let height = next_header_number(bytes, &mut cursor, "height")?;
        let max_value = next_header_number(bytes, &mut cursor, "maxval")?;

        match bytes.get(cursor) {
            Some(byte) if byte.is_ascii_whitespace() => cursor += 1,
            _ => {
                return Err(FrameGrabError::InvalidRaster(
                    "missing whitespace after maxval".into(),
                ));
            }
        }

        Ok(Self {
            channels,
            width,
            height,
            max_value,
            data_offset: cursor,
        })
    }

    /// Read and parse the header of the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`FrameGrabError::IoError`] if the file cannot be read, or the
    /// errors of [`parse`](PnmHeader::parse).
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, FrameGrabError> {
        let mut head = Vec::with_capacity(256);
        File::open(path)?.take(4096).read_to_end(&mut head)?;
        Self::parse(&head)
    }

    /// Number of pixel bytes the header promises.
    pub fn data_len(&self) -> usize {
        self.width as usize * self.height as usize * self.channels.count()
    }
}

fn next_header_number(
    bytes: &[u8],
    cursor: &mut usize,
    field: &str,
) -> Result<u32, FrameGrabError> {
    loop {
        match bytes.get(*cursor) {
            Some(byte) if byte.is_ascii_whitespace() => *cursor += 1,
            Some(b'#') => {
                while bytes.get(*cursor).is_some_and(|byte| *byte != b'\n') {
                    *cursor += 1;
                }
            }
            _ => break,
        }
    }

    let start = *cursor;
    while bytes.get(*cursor).is_some_and(u8::is_ascii_digit) {
        *cursor += 1;
    }

    std::str::from_utf8(&bytes[start..*cursor])
        .ok()
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(|| FrameGrabError::InvalidRaster(format!("missing or invalid {field}")))
}

/// Bytes spanned by `rows` rows when the last one is not padded.
fn packed_len(row_stride: usize, row_bytes: usize, rows: usize) -> usize {
    if rows == 0 {
        0
    } else {
        (rows - 1) * row_stride + row_bytes
    }
}

fn short_plane(actual: usize, needed: usize) -> FrameGrabError {
    FrameGrabError::InvalidRaster(format!(
        "pixel buffer holds {actual} bytes, geometry needs {needed}"
    ))
}
