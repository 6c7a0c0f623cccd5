//! The one-shot extraction pipeline.
//!
//! [`extract`] opens a container, captures one frame as RGB, derives the
//! weighted grayscale raster, and writes `frame.ppm` and `frame.pgm`. All
//! FFmpeg state is dropped before the first byte is written.

use std::path::{Path, PathBuf};

use crate::{
    config::ExtractOptions,
    error::FrameGrabError,
    grayscale::{LumaWeights, to_grayscale},
    media::MediaFile,
};

/// What an extraction produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFrame {
    /// Index of the captured frame.
    pub frame_index: u64,
    /// Raster width in pixels.
    pub width: u32,
    /// Raster height in pixels.
    pub height: u32,
    /// Where the `P6` colour raster was written.
    pub color_path: PathBuf,
    /// Where the `P5` grayscale raster was written.
    pub gray_path: PathBuf,
}

/// Capture frame `frame_index` of `path` and write both rasters into the
/// current directory as `frame.ppm` and `frame.pgm`.
///
/// # Errors
///
/// Any error of [`MediaFile::open`],
/// [`VideoHandle::frame`](crate::VideoHandle::frame), or
/// [`write_raster`](crate::write_raster).
///
/// # Example
///
/// ```no_run
/// use framegrab::LumaWeights;
///
/// let frame = framegrab::extract("input.mp4", 0, LumaWeights::new(0.3, 0.59, 0.11))?;
/// println!("{} and {}", frame.color_path.display(), frame.gray_path.display());
/// # Ok::<(), framegrab::FrameGrabError>(())
/// ```
pub fn extract<P: AsRef<Path>>(
    path: P,
    frame_index: u64,
    weights: LumaWeights,
) -> Result<ExtractedFrame, FrameGrabError> {
    extract_with_options(path, frame_index, weights, &ExtractOptions::new())
}

/// [`extract`] with explicit output locations and progress reporting.
///
/// # Errors
///
/// Same as [`extract`].
pub fn extract_with_options<P: AsRef<Path>>(
    path: P,
    frame_index: u64,
    weights: LumaWeights,
    options: &ExtractOptions,
) -> Result<ExtractedFrame, FrameGrabError> {
    let rgb = {
        let mut media = MediaFile::open(path)?;
        media.video().frame_with_options(frame_index, options)?
    };
    let gray = to_grayscale(&rgb, weights)?;

    let color_path = options.color_path();
    let gray_path = options.gray_path();
    rgb.write(&color_path)?;
    gray.write(&gray_path)?;

    log::debug!(
        "Frame {frame_index} written to {} and {}",
        color_path.display(),
        gray_path.display()
    );

    Ok(ExtractedFrame {
        frame_index,
        width: rgb.width(),
        height: rgb.height(),
        color_path,
        gray_path,
    })
}
