//! Video frame capture.
//!
//! [`VideoHandle`] decodes the selected video stream from its first packet
//! and captures the frame at a zero-based index. There is no seeking: every
//! frame before the target is decoded and discarded, which makes the result
//! independent of keyframe placement and timestamps.

use ffmpeg_next::{
    codec::{Parameters, context::Context as CodecContext},
    decoder::Video as VideoDecoder,
    format::Pixel,
    frame::Video as VideoFrame,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};

use crate::{
    config::ExtractOptions,
    error::FrameGrabError,
    media::MediaFile,
    progress::ProgressTracker,
    raster::{Channels, Raster},
};

/// Frame capture on the first video stream of a [`MediaFile`].
///
/// Obtained via [`MediaFile::video`]. Each capture builds a fresh decoder
/// and pixel converter and drops them before returning.
pub struct VideoHandle<'a> {
    pub(crate) media: &'a mut MediaFile,
}

impl VideoHandle<'_> {
    /// Capture the frame at `frame_index` (0-based) as an RGB raster.
    ///
    /// The captured frame is the (`frame_index` + 1)-th frame the decoder
    /// produces, counting frames drained after end of input as well.
    ///
    /// # Errors
    ///
    /// - [`FrameGrabError::NoVideoStream`] if the file has no video.
    /// - [`FrameGrabError::DecoderInit`] if the codec has no decoder or the
    ///   pixel converter cannot be built.
    /// - [`FrameGrabError::FrameNotFound`] if the stream ends first.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use framegrab::MediaFile;
    ///
    /// let mut media = MediaFile::open("input.mp4")?;
    /// media.video().frame(42)?.write("frame_42.ppm")?;
    /// # Ok::<(), framegrab::FrameGrabError>(())
    /// ```
    pub fn frame(&mut self, frame_index: u64) -> Result<Raster, FrameGrabError> {
        self.frame_with_options(frame_index, &ExtractOptions::new())
    }

    /// Like [`frame`](VideoHandle::frame), reporting decode progress to the
    /// callback in `options`.
    ///
    /// # Errors
    ///
    /// Same as [`frame`](VideoHandle::frame).
    pub fn frame_with_options(
        &mut self,
        frame_index: u64,
        options: &ExtractOptions,
    ) -> Result<Raster, FrameGrabError> {
        let video_metadata = self
            .media
            .video
            .clone()
            .ok_or(FrameGrabError::NoVideoStream)?;
        let video_stream_index = video_metadata.stream_index;

        self.media.rewind()?;

        let stream = self
            .media
            .input_context
            .stream(video_stream_index)
            .ok_or(FrameGrabError::NoVideoStream)?;
        let mut decoder = open_decoder(stream.parameters(), &video_metadata.codec)?;

        let width = decoder.width();
        let height = decoder.height();

        // Native format -> interleaved RGB24, same size.
        let mut scaler = ScalingContext::get(
            decoder.format(),
            width,
            height,
            Pixel::RGB24,
            width,
            height,
            ScalingFlags::BICUBIC,
        )
        .map_err(|error| {
            FrameGrabError::DecoderInit(format!(
                "cannot convert {:?} {width}x{height} to RGB24: {error}",
                decoder.format()
            ))
        })?;

        log::debug!(
            "Decoding stream {video_stream_index} ({}, {width}x{height}) up to frame {frame_index}",
            video_metadata.codec
        );

        let mut scan = FrameScan {
            target: frame_index,
            decoded: 0,
            progress: ProgressTracker::new(
                options.progress.clone(),
                frame_index.saturating_add(1),
                options.batch_size,
            ),
        };
        let mut decoded_frame = VideoFrame::empty();

        self.media.packets_consumed = true;
        let mut found = false;
        for (stream, packet) in self.media.input_context.packets() {
            if stream.index() != video_stream_index {
                continue;
            }
            if let Err(error) = decoder.send_packet(&packet) {
                log::warn!("Decoder rejected a packet, skipping it: {error}");
                continue;
            }
            if scan.drain(&mut decoder, &mut decoded_frame) {
                found = true;
                break;
            }
        }

        if !found {
            // Frames still buffered inside the decoder count too.
            match decoder.send_eof() {
                Ok(()) => found = scan.drain(&mut decoder, &mut decoded_frame),
                Err(error) => log::warn!("Decoder refused end of stream: {error}"),
            }
        }
        scan.progress.finish();

        if !found {
            return Err(FrameGrabError::FrameNotFound {
                frame_index,
                decoded_frames: scan.decoded,
            });
        }

        log::debug!("Captured frame {frame_index} after {} decoded frames", scan.decoded);

        let mut rgb_frame = VideoFrame::empty();
        scaler.run(&decoded_frame, &mut rgb_frame)?;
        Raster::from_frame(&rgb_frame, width, height, Channels::Rgb)
    }
}

/// Build and open a video decoder for `parameters`.
fn open_decoder(parameters: Parameters, codec: &str) -> Result<VideoDecoder, FrameGrabError> {
    let decoder_context = CodecContext::from_parameters(parameters).map_err(|error| {
        FrameGrabError::DecoderInit(format!("cannot read codec parameters: {error}"))
    })?;
    decoder_context.decoder().video().map_err(|error| {
        FrameGrabError::DecoderInit(format!("no usable decoder for codec {codec}: {error}"))
    })
}

/// Frame counter for one linear scan.
struct FrameScan {
    target: u64,
    decoded: u64,
    progress: ProgressTracker,
}

impl FrameScan {
    /// Receive every frame the decoder has ready. Returns `true` with the
    /// target left in `frame` as soon as it is reached.
    fn drain(&mut self, decoder: &mut VideoDecoder, frame: &mut VideoFrame) -> bool {
        while decoder.receive_frame(frame).is_ok() {
            let index = self.decoded;
            self.decoded += 1;
            self.progress.advance();
            log::trace!("Decoded frame {index} (pts {:?})", frame.pts());
            if index == self.target {
                return true;
            }
        }
        false
    }
}
