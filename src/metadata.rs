//! Video stream metadata.
//!
//! [`VideoMetadata`] is read once when a [`MediaFile`](crate::MediaFile) is
//! opened, from the codec parameters of the first video stream in container
//! order.

/// Metadata for the selected video stream.
///
/// # Example
///
/// ```no_run
/// use framegrab::MediaFile;
///
/// let media = MediaFile::open("input.mp4").unwrap();
/// if let Some(video) = media.video_metadata() {
///     println!("{}x{} [{}]", video.width, video.height, video.codec);
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct VideoMetadata {
    /// Index of the stream inside the container.
    pub stream_index: usize,
    /// Coded frame width in pixels.
    pub width: u32,
    /// Coded frame height in pixels.
    pub height: u32,
    /// Average frame rate, or `0.0` when the container does not declare one.
    pub frames_per_second: f64,
    /// Codec name (e.g. `"h264"`, `"rawvideo"`).
    pub codec: String,
    /// Native pixel format of the decoded frames (e.g. `"YUV420P"`), or
    /// `None` when no decoder is available to report it.
    pub pixel_format: Option<String>,
}
