//! Weighted grayscale conversion.
//!
//! Each gray byte is `R*w0 + G*w1 + B*w2`, truncated toward zero and then
//! narrowed to 8 bits with wraparound. Sums above 255 or below zero wrap
//! modulo 256; they are not clamped. Weights are used exactly as given,
//! with no normalisation.
//!
//! # Example
//!
//! ```
//! use framegrab::LumaWeights;
//!
//! let weights = LumaWeights::new(0.3, 0.59, 0.11);
//! assert_eq!(weights.luma(200, 100, 50), 124);
//!
//! // 200 + 100 = 300 wraps to 44.
//! assert_eq!(LumaWeights::new(1.0, 1.0, 0.0).luma(200, 100, 50), 44);
//! ```

use crate::{
    error::FrameGrabError,
    raster::{Channels, Raster},
};

/// Per-channel coefficients of the grayscale sum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LumaWeights {
    /// Red coefficient.
    pub red: f64,
    /// Green coefficient.
    pub green: f64,
    /// Blue coefficient.
    pub blue: f64,
}

impl LumaWeights {
    /// ITU-R BT.601 luma coefficients.
    pub const REC601: Self = Self::new(0.299, 0.587, 0.114);

    /// ITU-R BT.709 luma coefficients.
    pub const REC709: Self = Self::new(0.2126, 0.7152, 0.0722);

    /// Build a weight triple. Values are not validated.
    pub const fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }

    /// Gray value of one RGB pixel.
    pub fn luma(&self, red: u8, green: u8, blue: u8) -> u8 {
        let sum = f64::from(red) * self.red
            + f64::from(green) * self.green
            + f64::from(blue) * self.blue;
        // Truncate to an integer first, then keep the low byte.
        sum as i64 as u8
    }
}

impl From<[f64; 3]> for LumaWeights {
    fn from([red, green, blue]: [f64; 3]) -> Self {
        Self::new(red, green, blue)
    }
}

/// Derive a one-channel raster from an RGB raster.
///
/// # Errors
///
/// Returns [`FrameGrabError::InvalidRaster`] if `rgb` is not a
/// [`Channels::Rgb`] raster.
pub fn to_grayscale(rgb: &Raster, weights: LumaWeights) -> Result<Raster, FrameGrabError> {
    if rgb.channels() != Channels::Rgb {
        return Err(FrameGrabError::InvalidRaster(format!(
            "grayscale conversion needs an RGB raster, got {:?}",
            rgb.channels()
        )));
    }

    let gray = rgb
        .as_bytes()
        .chunks_exact(3)
        .map(|pixel| weights.luma(pixel[0], pixel[1], pixel[2]))
        .collect();

    Raster::new(rgb.width(), rgb.height(), Channels::Gray, gray)
}

#[cfg(test)]
mod tests {
    use super::{LumaWeights, to_grayscale};
    use crate::raster::{Channels, Raster};

    #[test]
    fn weighted_sum_truncates_fraction() {
        // 60 + 59 + 5.5 = 124.5
        assert_eq!(LumaWeights::new(0.3, 0.59, 0.11).luma(200, 100, 50), 124);
    }

    #[test]
    fn overflow_wraps_instead_of_clamping() {
        let weights = LumaWeights::new(1.0, 1.0, 1.0);
        // 255 * 3 = 765 = 2 * 256 + 253
        assert_eq!(weights.luma(255, 255, 255), 253);
        // 300.9 truncates to 300, wraps to 44
        assert_eq!(LumaWeights::new(1.0, 1.0, 0.018).luma(200, 100, 50), 44);
    }

    #[test]
    fn negative_sum_wraps_from_the_top() {
        // -1.5 truncates to -1, whose low byte is 255
        assert_eq!(LumaWeights::new(-0.015, 0.0, 0.0).luma(100, 0, 0), 255);
        assert_eq!(LumaWeights::new(-1.0, 0.0, 0.0).luma(6, 0, 0), 250);
    }

    #[test]
    fn standard_weights_keep_white_white() {
        assert_eq!(LumaWeights::REC601.luma(255, 255, 255), 255);
        assert_eq!(LumaWeights::REC601.luma(0, 0, 0), 0);
    }

    #[test]
    fn converts_whole_raster() {
        let rgb = Raster::new(2, 1, Channels::Rgb, vec![200, 100, 50, 10, 20, 30]).unwrap();
        let gray = to_grayscale(&rgb, [0.3, 0.59, 0.11].into()).unwrap();
        assert_eq!(gray.channels(), Channels::Gray);
        assert_eq!((gray.width(), gray.height()), (2, 1));
        // 3 + 11.8 + 3.3 = 18.1
        assert_eq!(gray.as_bytes(), &[124u8, 18]);
    }

    #[test]
    fn rejects_gray_input() {
        let gray = Raster::new(1, 1, Channels::Gray, vec![7]).unwrap();
        assert!(to_grayscale(&gray, LumaWeights::REC601).is_err());
    }
}
