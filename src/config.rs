//! Extraction options.
//!
//! [`ExtractOptions`] is a builder carrying the per-run settings of
//! [`extract_with_options`](crate::extract_with_options): where the two
//! rasters go and who hears about decode progress. The defaults reproduce
//! the classic behaviour of writing `frame.ppm` and `frame.pgm` into the
//! current directory.
//!
//! # Example
//!
//! ```no_run
//! use framegrab::{ExtractOptions, LumaWeights};
//!
//! let options = ExtractOptions::new()
//!     .with_output_dir("out")
//!     .with_file_names("still.ppm", "still.pgm");
//! let frame = framegrab::extract_with_options("input.mp4", 10, LumaWeights::REC601, &options)?;
//! println!("{}", frame.gray_path.display());
//! # Ok::<(), framegrab::FrameGrabError>(())
//! ```

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::progress::{NoOpProgress, ProgressCallback};

/// Default file name of the colour raster.
pub const DEFAULT_COLOR_FILE_NAME: &str = "frame.ppm";

/// Default file name of the grayscale raster.
pub const DEFAULT_GRAY_FILE_NAME: &str = "frame.pgm";

/// Settings for one extraction run.
#[derive(Clone)]
pub struct ExtractOptions {
    pub(crate) output_dir: PathBuf,
    pub(crate) color_file_name: String,
    pub(crate) gray_file_name: String,
    pub(crate) progress: Arc<dyn ProgressCallback>,
    /// Fire the progress callback every N decoded frames.
    pub(crate) batch_size: u64,
}

impl Debug for ExtractOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ExtractOptions")
            .field("output_dir", &self.output_dir)
            .field("color_file_name", &self.color_file_name)
            .field("gray_file_name", &self.gray_file_name)
            .field("batch_size", &self.batch_size)
            .finish_non_exhaustive()
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractOptions {
    /// Defaults: current directory, `frame.ppm` / `frame.pgm`, no progress
    /// callback, batch size 1.
    pub fn new() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            color_file_name: DEFAULT_COLOR_FILE_NAME.to_string(),
            gray_file_name: DEFAULT_GRAY_FILE_NAME.to_string(),
            progress: Arc::new(NoOpProgress),
            batch_size: 1,
        }
    }

    /// Directory both rasters are written into. It must already exist.
    #[must_use]
    pub fn with_output_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }

    /// File names of the colour and grayscale rasters.
    #[must_use]
    pub fn with_file_names(mut self, color: impl Into<String>, gray: impl Into<String>) -> Self {
        self.color_file_name = color.into();
        self.gray_file_name = gray.into();
        self
    }

    /// Attach a progress callback.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    /// Set how often the progress callback fires. Clamped to at least 1.
    #[must_use]
    pub fn with_batch_size(mut self, size: u64) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// Full path of the colour raster.
    pub fn color_path(&self) -> PathBuf {
        self.output_dir.join(&self.color_file_name)
    }

    /// Full path of the grayscale raster.
    pub fn gray_path(&self) -> PathBuf {
        self.output_dir.join(&self.gray_file_name)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::ExtractOptions;

    #[test]
    fn defaults_write_into_current_directory() {
        let options = ExtractOptions::new();
        assert_eq!(options.color_path(), Path::new("./frame.ppm"));
        assert_eq!(options.gray_path(), Path::new("./frame.pgm"));
        assert_eq!(options.batch_size, 1);
    }

    #[test]
    fn builder_overrides_paths_and_clamps_batch() {
        let options = ExtractOptions::new()
            .with_output_dir("/tmp/grabs")
            .with_file_names("a.ppm", "b.pgm")
            .with_batch_size(0);
        assert_eq!(options.color_path(), Path::new("/tmp/grabs/a.ppm"));
        assert_eq!(options.gray_path(), Path::new("/tmp/grabs/b.pgm"));
        assert_eq!(options.batch_size, 1);
    }
}
