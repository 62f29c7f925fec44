// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for image recoding in the lipi-image crate.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, Rgb, RgbImage};

use lipi_core::{OutputFormat, Quality};
use lipi_image::{ImageRecoder, RecodeRequest};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// A 640x480 gradient with a little per-pixel variation, so JPEG sizes
/// respond to quality the way photographs do.
fn sample_image() -> DynamicImage {
    let img = RgbImage::from_fn(640, 480, |x, y| {
        let noise = ((x * 31 + y * 17) % 23) as u8;
        Rgb([(x % 256) as u8, (y % 256) as u8, noise.wrapping_mul(11)])
    });
    DynamicImage::ImageRgb8(img)
}

/// Single JPEG encode at 0.9: the no-target path.
fn bench_single_pass(c: &mut Criterion) {
    let image = sample_image();
    let recoder = ImageRecoder::new();
    let request = RecodeRequest::new("bench.png", OutputFormat::Jpeg, Quality::from_fraction(0.9));

    c.bench_function("recode jpeg single pass (640x480)", |b| {
        b.iter(|| black_box(recoder.recode(black_box(&image), &request, 0)));
    });
}

/// Size fitting against a tight budget, which walks several qualities.
fn bench_size_fitting(c: &mut Criterion) {
    let image = sample_image();
    let recoder = ImageRecoder::new();
    let request = RecodeRequest::new("bench.png", OutputFormat::Jpeg, Quality::from_fraction(0.9))
        .with_target_size_kb(Some(20));

    c.bench_function("recode jpeg to 20 KiB (640x480)", |b| {
        b.iter(|| black_box(recoder.recode(black_box(&image), &request, 0)));
    });
}

criterion_group!(benches, bench_single_pass, bench_size_fitting);
criterion_main!(benches);
