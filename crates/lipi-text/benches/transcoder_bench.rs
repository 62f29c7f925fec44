// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for Unicode <-> Bijoy conversion.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use lipi_text::GlyphTranscoder;

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// A paragraph mixing plain consonants, i-kar syllables, and multi-consonant
/// conjuncts, repeated to roughly 8 KiB.
fn sample_paragraph() -> String {
    "আমার সোনার বাংলা, আমি তোমায় ভালোবাসি। কিন্তু স্ত্রী ও সন্ত্রাস শব্দে যুক্তাক্ষর আছে। "
        .repeat(40)
}

fn bench_to_legacy(c: &mut Criterion) {
    let transcoder = GlyphTranscoder::global();
    let text = sample_paragraph();

    c.bench_function("to_legacy (paragraph x40)", |b| {
        b.iter(|| black_box(transcoder.to_legacy(black_box(&text))));
    });
}

fn bench_to_unicode(c: &mut Criterion) {
    let transcoder = GlyphTranscoder::global();
    let legacy = transcoder.to_legacy(&sample_paragraph());

    c.bench_function("to_unicode (paragraph x40)", |b| {
        b.iter(|| black_box(transcoder.to_unicode(black_box(&legacy))));
    });
}

/// Table construction cost, paid once per process by `GlyphTranscoder::global`.
fn bench_table_build(c: &mut Criterion) {
    c.bench_function("build glyph tables", |b| {
        b.iter(|| black_box(GlyphTranscoder::new()));
    });
}

criterion_group!(benches, bench_to_legacy, bench_to_unicode, bench_table_build);
criterion_main!(benches);
