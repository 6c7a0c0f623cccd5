//! Synthetic media fixtures.
//!
//! Inputs are generated into a temporary directory per test, so the suite
//! needs no checked-in binaries. Y4M carries raw planar YUV and decodes with
//! FFmpeg's `rawvideo` decoder, which is always built.

#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
};

pub const WIDTH: u32 = 8;
pub const HEIGHT: u32 = 6;

/// Luma of frame `index`. Strictly increasing, so later frames are brighter.
pub fn frame_luma(index: usize) -> u8 {
    (16 + 20 * index).min(235) as u8
}

/// Write a 4:4:4 Y4M clip of `frames` flat gray frames to `dir/name`.
pub fn write_y4m(dir: &Path, name: &str, frames: usize) -> PathBuf {
    write_y4m_with(dir, name, frames, |index| (frame_luma(index), 128, 128))
}

/// BT.601 limited-range YUV of pure red.
pub const RED_YUV: (u8, u8, u8) = (81, 90, 240);

/// Write a clip whose every frame is the flat colour `(y, u, v)`.
pub fn write_y4m_solid(dir: &Path, name: &str, frames: usize, yuv: (u8, u8, u8)) -> PathBuf {
    write_y4m_with(dir, name, frames, |_| yuv)
}

fn write_y4m_with(
    dir: &Path,
    name: &str,
    frames: usize,
    yuv_of: impl Fn(usize) -> (u8, u8, u8),
) -> PathBuf {
    let plane = (WIDTH * HEIGHT) as usize;
    let mut bytes = format!("YUV4MPEG2 W{WIDTH} H{HEIGHT} F25:1 Ip A1:1 C444\n").into_bytes();
    for index in 0..frames {
        let (y, u, v) = yuv_of(index);
        bytes.extend_from_slice(b"FRAME\n");
        bytes.extend(std::iter::repeat_n(y, plane));
        bytes.extend(std::iter::repeat_n(u, plane));
        bytes.extend(std::iter::repeat_n(v, plane));
    }

    let path = dir.join(name);
    fs::write(&path, bytes).expect("Failed to write y4m fixture");
    path
}

/// Write a mono 16-bit PCM WAV file with a tenth of a second of silence.
pub fn write_wav(dir: &Path, name: &str) -> PathBuf {
    let sample_rate: u32 = 8000;
    let samples: u32 = sample_rate / 10;
    let data_len = samples * 2;

    let mut bytes = Vec::with_capacity(44 + data_len as usize);
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&(sample_rate * 2).to_le_bytes());
    bytes.extend_from_slice(&2u16.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    bytes.resize(44 + data_len as usize, 0);

    let path = dir.join(name);
    fs::write(&path, bytes).expect("Failed to write wav fixture");
    path
}

/// Split a P5/P6 file into its header and pixel bytes.
pub fn read_pnm(path: &Path) -> (framegrab::PnmHeader, Vec<u8>) {
    let bytes = fs::read(path).expect("Failed to read raster");
    let header = framegrab::PnmHeader::parse(&bytes).expect("Failed to parse header");
    let pixels = bytes[header.data_offset..].to_vec();
    (header, pixels)
}

/// Mean of all samples.
pub fn mean(pixels: &[u8]) -> f64 {
    pixels.iter().map(|&value| f64::from(value)).sum::<f64>() / pixels.len() as f64
}
