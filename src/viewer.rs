//! Preview windows for written rasters.
//!
//! [`show`] opens one 600×600 window per file, draws the image stretched to
//! the window, and blocks until every window has been closed. Files are
//! loaded with the `image` crate, so anything it decodes (PPM and PGM
//! included) can be previewed. Drawing goes through `softbuffer` on a
//! `winit` event loop.
//!
//! Only one event loop may exist per process, so [`show`] can be called at
//! most once.

use std::{collections::HashMap, num::NonZeroU32, path::PathBuf, rc::Rc};

use image::RgbImage;
use softbuffer::{Context, Surface};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use crate::{error::FrameGrabError, extract::ExtractedFrame};

/// Initial inner width and height of every preview window.
pub const WINDOW_SIZE: u32 = 600;

/// Window title used for the colour raster.
pub const COLOR_TITLE: &str = "Colored Image";

/// Window title used for the grayscale raster.
pub const GRAY_TITLE: &str = "Grayscale Image";

/// One file to preview and the title of its window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerEntry {
    /// Image file to load.
    pub path: PathBuf,
    /// Window title.
    pub title: String,
}

impl ViewerEntry {
    /// Pair a path with a window title.
    pub fn new(path: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
        }
    }
}

impl ExtractedFrame {
    /// The colour raster, then the grayscale raster, with their titles.
    pub fn viewer_entries(&self) -> Vec<ViewerEntry> {
        vec![
            ViewerEntry::new(self.color_path.clone(), COLOR_TITLE),
            ViewerEntry::new(self.gray_path.clone(), GRAY_TITLE),
        ]
    }
}

/// Show every entry in its own window and wait until all are closed.
///
/// # Errors
///
/// - [`FrameGrabError::ImageError`] if a file cannot be loaded. No window
///   is opened in that case.
/// - [`FrameGrabError::Display`] if the event loop, a window, or its
///   drawing surface cannot be created.
///
/// # Example
///
/// ```no_run
/// use framegrab::{ViewerEntry, viewer};
///
/// viewer::show(&[ViewerEntry::new("frame.ppm", "Colored Image")])?;
/// # Ok::<(), framegrab::FrameGrabError>(())
/// ```
pub fn show(entries: &[ViewerEntry]) -> Result<(), FrameGrabError> {
    if entries.is_empty() {
        return Ok(());
    }

    let pending = entries
        .iter()
        .map(|entry| -> Result<(String, RgbImage), FrameGrabError> {
            let image = image::open(&entry.path)?.to_rgb8();
            log::debug!(
                "Loaded {} ({}x{}) for preview",
                entry.path.display(),
                image.width(),
                image.height()
            );
            Ok((entry.title.clone(), image))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let event_loop = EventLoop::new().map_err(display_error)?;
    let mut viewer = Viewer {
        pending,
        windows: HashMap::new(),
        failure: None,
    };
    event_loop.run_app(&mut viewer).map_err(display_error)?;

    match viewer.failure {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

struct Viewer {
    /// Images waiting for the first `resumed` call.
    pending: Vec<(String, RgbImage)>,
    windows: HashMap<WindowId, PreviewWindow>,
    failure: Option<FrameGrabError>,
}

impl Viewer {
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: FrameGrabError) {
        log::error!("Preview failed: {error}");
        self.failure.get_or_insert(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for Viewer {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        for (title, image) in std::mem::take(&mut self.pending) {
            match PreviewWindow::open(event_loop, &title, image) {
                Ok(preview) => {
                    self.windows.insert(preview.window.id(), preview);
                }
                Err(error) => {
                    self.fail(event_loop, error);
                    return;
                }
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.windows.remove(&window_id);
                if self.windows.is_empty() {
                    event_loop.exit();
                }
            }
            WindowEvent::Resized(_) => {
                if let Some(preview) = self.windows.get(&window_id) {
                    preview.window.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => {
                let result = match self.windows.get_mut(&window_id) {
                    Some(preview) => preview.redraw(),
                    None => Ok(()),
                };
                if let Err(error) = result {
                    self.fail(event_loop, error);
                }
            }
            _ => {}
        }
    }
}

struct PreviewWindow {
    surface: Surface<Rc<Window>, Rc<Window>>,
    window: Rc<Window>,
    image: RgbImage,
}

impl PreviewWindow {
    fn open(
        event_loop: &ActiveEventLoop,
        title: &str,
        image: RgbImage,
    ) -> Result<Self, FrameGrabError> {
        let attributes = Window::default_attributes()
            .with_title(title)
            .with_inner_size(LogicalSize::new(f64::from(WINDOW_SIZE), f64::from(WINDOW_SIZE)));
        let window = Rc::new(event_loop.create_window(attributes).map_err(display_error)?);
        let context = Context::new(window.clone()).map_err(display_error)?;
        let surface = Surface::new(&context, window.clone()).map_err(display_error)?;
        window.request_redraw();

        Ok(Self {
            surface,
            window,
            image,
        })
    }

    fn redraw(&mut self) -> Result<(), FrameGrabError> {
        let size = self.window.inner_size();
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return Ok(());
        };

        self.surface.resize(width, height).map_err(display_error)?;
        let mut buffer = self.surface.buffer_mut().map_err(display_error)?;
        fill_scaled(&self.image, size.width, size.height, &mut buffer);
        buffer.present().map_err(display_error)
    }
}

/// Nearest-neighbour stretch of `image` into a `width`×`height` buffer of
/// `0x00RRGGBB` pixels.
pub(crate) fn fill_scaled(image: &RgbImage, width: u32, height: u32, out: &mut [u32]) {
    let (source_width, source_height) = image.dimensions();
    if width == 0 || height == 0 {
        return;
    }
    if source_width == 0 || source_height == 0 {
        out.fill(0);
        return;
    }

    for (y, row) in out.chunks_mut(width as usize).take(height as usize).enumerate() {
        let source_y = (y as u64 * u64::from(source_height) / u64::from(height)) as u32;
        for (x, pixel) in row.iter_mut().enumerate() {
            let source_x = (x as u64 * u64::from(source_width) / u64::from(width)) as u32;
            let [red, green, blue] = image.get_pixel(source_x, source_y).0;
            *pixel = (u32::from(red) << 16) | (u32::from(green) << 8) | u32::from(blue);
        }
    }
}

fn display_error(error: impl std::fmt::Display) -> FrameGrabError {
    FrameGrabError::Display(error.to_string())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use image::{Rgb, RgbImage};

    use super::{COLOR_TITLE, GRAY_TITLE, fill_scaled};
    use crate::extract::ExtractedFrame;

    #[test]
    fn stretches_each_source_pixel_over_a_block() {
        let mut image = RgbImage::new(2, 1);
        image.put_pixel(0, 0, Rgb([255, 0, 0]));
        image.put_pixel(1, 0, Rgb([0, 0, 255]));

        let mut out = vec![0u32; 4 * 2];
        fill_scaled(&image, 4, 2, &mut out);
        assert_eq!(
            out,
            vec![
                0x00ff_0000, 0x00ff_0000, 0x0000_00ff, 0x0000_00ff,
                0x00ff_0000, 0x00ff_0000, 0x0000_00ff, 0x0000_00ff,
            ]
        );
    }

    #[test]
    fn gray_pixels_fill_all_three_channels() {
        let image = RgbImage::from_pixel(3, 3, Rgb([7, 7, 7]));
        let mut out = vec![0u32; 1];
        fill_scaled(&image, 1, 1, &mut out);
        assert_eq!(out, vec![0x0007_0707]);
    }

    #[test]
    fn entries_list_color_before_gray() {
        let frame = ExtractedFrame {
            frame_index: 3,
            width: 4,
            height: 4,
            color_path: "frame.ppm".into(),
            gray_path: "frame.pgm".into(),
        };
        let entries = frame.viewer_entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].path, Path::new("frame.ppm"));
        assert_eq!(entries[0].title, COLOR_TITLE);
        assert_eq!(entries[1].path, Path::new("frame.pgm"));
        assert_eq!(entries[1].title, GRAY_TITLE);
    }
}
