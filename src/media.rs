//! Core [`MediaFile`] implementation.
//!
//! `MediaFile` owns the demuxer context for one input, remembers which
//! stream is the first video stream, and hands out a [`VideoHandle`] for
//! frame capture. The demuxer is closed when the `MediaFile` is dropped,
//! on success and on every early return alike.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
};

use ffmpeg_next::{
    Stream, codec::context::Context as CodecContext, format::context::Input, media::Type,
};

use crate::{error::FrameGrabError, metadata::VideoMetadata, video::VideoHandle};

/// An opened media container.
///
/// # Example
///
/// ```no_run
/// use framegrab::MediaFile;
///
/// let mut media = MediaFile::open("input.mp4")?;
/// let raster = media.video().frame(0)?;
/// println!("{}x{}", raster.width(), raster.height());
/// # Ok::<(), framegrab::FrameGrabError>(())
/// ```
pub struct MediaFile {
    /// The opened FFmpeg input (demuxer) context.
    pub(crate) input_context: Input,
    /// Metadata of the first video stream, if the container has one.
    pub(crate) video: Option<VideoMetadata>,
    /// Container format name as reported by the demuxer.
    pub(crate) format: String,
    /// Path the file was opened from (kept for error messages).
    pub(crate) file_path: PathBuf,
    /// Set once packets have been read; the next scan reopens the input.
    pub(crate) packets_consumed: bool,
}

impl Debug for MediaFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("MediaFile")
            .field("file_path", &self.file_path)
            .field("format", &self.format)
            .field("video", &self.video)
            .finish_non_exhaustive()
    }
}

impl MediaFile {
    /// Open a media container and locate its first video stream.
    ///
    /// Opening also probes stream information. A container without video
    /// opens fine; the missing stream is reported when a frame is
    /// requested.
    ///
    /// # Errors
    ///
    /// Returns [`FrameGrabError::FileOpen`] if FFmpeg cannot be initialised
    /// or the file cannot be opened and probed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, FrameGrabError> {
        let path = path.as_ref();
        let file_path = path.to_path_buf();

        log::debug!("Opening media file: {}", file_path.display());

        crate::ffmpeg::init().map_err(|error| FrameGrabError::FileOpen {
            path: file_path.clone(),
            reason: error.to_string(),
        })?;

        let input_context =
            ffmpeg_next::format::input(&path).map_err(|error| FrameGrabError::FileOpen {
                path: file_path.clone(),
                reason: error.to_string(),
            })?;

        let format = input_context.format().name().to_string();

        // First video stream in container order, not FFmpeg's "best" pick.
        let video = input_context
            .streams()
            .find(|stream| stream.parameters().medium() == Type::Video)
            .map(|stream| read_video_metadata(&stream));

        match &video {
            Some(metadata) => log::debug!(
                "Selected video stream {} ({}x{}, {}) in {format} container",
                metadata.stream_index,
                metadata.width,
                metadata.height,
                metadata.codec,
            ),
            None => log::debug!("No video stream in {format} container"),
        }

        Ok(Self {
            input_context,
            video,
            format,
            file_path,
            packets_consumed: false,
        })
    }

    /// Put the demuxer back at the first packet.
    ///
    /// Reopens the input instead of seeking, so every scan starts from the
    /// same state regardless of the container's seek support.
    pub(crate) fn rewind(&mut self) -> Result<(), FrameGrabError> {
        if self.packets_consumed {
            log::debug!("Reopening {} for a fresh scan", self.file_path.display());
            self.input_context = ffmpeg_next::format::input(&self.file_path).map_err(|error| {
                FrameGrabError::FileOpen {
                    path: self.file_path.clone(),
                    reason: error.to_string(),
                }
            })?;
            self.packets_consumed = false;
        }
        Ok(())
    }

    /// Metadata of the selected video stream, or `None` for containers
    /// without video.
    pub fn video_metadata(&self) -> Option<&VideoMetadata> {
        self.video.as_ref()
    }

    /// Container format name (e.g. `"mov,mp4,m4a,3gp,3g2,mj2"`, `"yuv4mpegpipe"`).
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Path this file was opened from.
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Frame capture operations on the selected video stream.
    pub fn video(&mut self) -> VideoHandle<'_> {
        VideoHandle { media: self }
    }
}

fn read_video_metadata(stream: &Stream<'_>) -> VideoMetadata {
    let parameters = stream.parameters();
    let (width, height) = unsafe {
        let raw = parameters.as_ptr();
        ((*raw).width.max(0) as u32, (*raw).height.max(0) as u32)
    };

    let frame_rate = stream.avg_frame_rate();
    let frames_per_second = if frame_rate.denominator() != 0 {
        f64::from(frame_rate.numerator()) / f64::from(frame_rate.denominator())
    } else {
        let rate = stream.rate();
        if rate.denominator() != 0 {
            f64::from(rate.numerator()) / f64::from(rate.denominator())
        } else {
            0.0
        }
    };

    // The native format is only known once a decoder has been opened.
    let pixel_format = CodecContext::from_parameters(parameters.clone())
        .and_then(|context| context.decoder().video())
        .ok()
        .map(|decoder| format!("{:?}", decoder.format()))
        .filter(|name| name != "None");

    VideoMetadata {
        stream_index: stream.index(),
        width,
        height,
        frames_per_second,
        codec: parameters.id().name().to_string(),
        pixel_format,
    }
}
