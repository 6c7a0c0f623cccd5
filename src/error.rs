//! Error types for the `framegrab` crate.
//!
//! This module defines [`FrameGrabError`], the single error type returned by
//! every fallible operation in the crate, from opening the container to
//! writing the rasters and showing them.

use std::{io::Error as IoError, path::PathBuf};

use ffmpeg_next::Error as FfmpegError;
use image::ImageError;
use thiserror::Error;

/// The unified error type for all `framegrab` operations.
///
/// Variants carry enough context (paths, frame indices, upstream messages)
/// to diagnose a failed run from the message alone.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FrameGrabError {
    /// The media file could not be opened or its streams could not be probed.
    #[error("Failed to open media file at {path}: {reason}")]
    FileOpen {
        /// Path that was passed to [`crate::MediaFile::open`].
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The container has no stream of video type.
    #[error("No video stream found in file")]
    NoVideoStream,

    /// No decoder is registered for the stream's codec, or the decoder or
    /// pixel converter could not be initialised.
    #[error("Failed to initialise video decoder: {0}")]
    DecoderInit(String),

    /// The input ran out of frames before the requested index was reached.
    #[error("Frame {frame_index} not found (stream yielded {decoded_frames} decodable frames)")]
    FrameNotFound {
        /// The zero-based frame index that was requested.
        frame_index: u64,
        /// How many frames were decoded before the input was exhausted.
        decoded_frames: u64,
    },

    /// A raster file could not be created or written.
    #[error("Failed to write raster to {path}: {source}")]
    RasterWrite {
        /// Destination that failed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: IoError,
    },

    /// A raster buffer or file header is malformed.
    #[error("Invalid raster: {0}")]
    InvalidRaster(String),

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    FfmpegError(String),

    /// An I/O error outside of raster writing.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// An error from the `image` crate while loading a raster for display.
    #[error("Image processing error: {0}")]
    ImageError(#[from] ImageError),

    /// The preview windows could not be created or drawn.
    #[error("Display error: {0}")]
    Display(String),
}

impl From<FfmpegError> for FrameGrabError {
    fn from(error: FfmpegError) -> Self {
        FrameGrabError::FfmpegError(error.to_string())
    }
}
