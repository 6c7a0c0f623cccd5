//! Benchmarks for grayscale conversion and raster writing.
//!
//! Run with: cargo bench

use std::hint::black_box;

use criterion::Criterion;
use framegrab::{Channels, LumaWeights, Raster, to_grayscale, write_raster};

const WIDTH: u32 = 1920;
const HEIGHT: u32 = 1080;

fn sample_rgb() -> Raster {
    let data = (0..WIDTH as usize * HEIGHT as usize * 3)
        .map(|index| (index % 251) as u8)
        .collect();
    Raster::new(WIDTH, HEIGHT, Channels::Rgb, data).unwrap()
}

fn benchmark_grayscale(criterion: &mut Criterion) {
    let rgb = sample_rgb();

    criterion.bench_function("grayscale 1080p (rec601)", |bencher| {
        bencher.iter(|| to_grayscale(black_box(&rgb), LumaWeights::REC601).unwrap());
    });

    criterion.bench_function("grayscale 1080p (wrapping weights)", |bencher| {
        bencher.iter(|| to_grayscale(black_box(&rgb), LumaWeights::new(1.0, 1.0, 1.0)).unwrap());
    });
}

fn benchmark_raster_write(criterion: &mut Criterion) {
    let temporary_directory = tempfile::tempdir().unwrap();
    let rgb = sample_rgb();
    let ppm_path = temporary_directory.path().join("bench.ppm");

    criterion.bench_function("write 1080p P6", |bencher| {
        bencher.iter(|| rgb.write(&ppm_path).unwrap());
    });

    // Rows padded to a 64-byte boundary, as FFmpeg frames usually are.
    let row_bytes = WIDTH as usize * 3;
    let stride = row_bytes.div_ceil(64) * 64;
    let padded = vec![0x80u8; stride * HEIGHT as usize];
    let padded_path = temporary_directory.path().join("padded.ppm");

    criterion.bench_function("write 1080p P6 from padded rows", |bencher| {
        bencher.iter(|| {
            write_raster(&padded, stride, WIDTH, HEIGHT, &padded_path, Channels::Rgb).unwrap()
        });
    });
}

criterion::criterion_group!(benches, benchmark_grayscale, benchmark_raster_write);
criterion::criterion_main!(benches);
