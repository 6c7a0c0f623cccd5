//! # framegrab
//!
//! Grab one frame from a video by index, write it as a binary PPM, derive a
//! weighted grayscale PGM from it, and optionally preview both.
//!
//! Decoding and pixel conversion are done by FFmpeg through the
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next) crate. The frame is
//! located by decoding the first video stream from its first packet, so the
//! index counts decoded frames, not timestamps.
//!
//! ## Quick Start
//!
//! ```no_run
//! use framegrab::LumaWeights;
//!
//! // Writes ./frame.ppm and ./frame.pgm
//! let frame = framegrab::extract("input.mp4", 120, LumaWeights::new(0.3, 0.59, 0.11))?;
//! println!("{}x{}", frame.width, frame.height);
//! # Ok::<(), framegrab::FrameGrabError>(())
//! ```
//!
//! ### Working with rasters directly
//!
//! ```no_run
//! use framegrab::{LumaWeights, MediaFile, to_grayscale};
//!
//! let mut media = MediaFile::open("input.mkv")?;
//! let rgb = media.video().frame(0)?;
//! let gray = to_grayscale(&rgb, LumaWeights::REC709)?;
//! gray.write("first.pgm")?;
//! # Ok::<(), framegrab::FrameGrabError>(())
//! ```
//!
//! ## Grayscale narrowing
//!
//! The weighted sum is truncated toward zero and then wrapped to 8 bits, so
//! weights that push a pixel past 255 produce a wrapped value rather than
//! white. See [`LumaWeights::luma`].
//!
//! ## Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `viewer` (default) | [`viewer::show`] preview windows via `winit` + `softbuffer` |
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on your system.

pub mod config;
pub mod error;
pub mod extract;
pub mod ffmpeg;
pub mod grayscale;
pub mod media;
pub mod metadata;
pub mod progress;
pub mod raster;
pub mod video;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use config::{DEFAULT_COLOR_FILE_NAME, DEFAULT_GRAY_FILE_NAME, ExtractOptions};
pub use error::FrameGrabError;
pub use extract::{ExtractedFrame, extract, extract_with_options};
pub use ffmpeg::{FfmpegLogLevel, get_ffmpeg_log_level, set_ffmpeg_log_level};
pub use grayscale::{LumaWeights, to_grayscale};
pub use media::MediaFile;
pub use metadata::VideoMetadata;
pub use progress::{ProgressCallback, ProgressInfo};
pub use raster::{Channels, MAX_VALUE, PnmHeader, Raster, write_raster};
pub use video::VideoHandle;
#[cfg(feature = "viewer")]
pub use viewer::{COLOR_TITLE, GRAY_TITLE, ViewerEntry, WINDOW_SIZE};
