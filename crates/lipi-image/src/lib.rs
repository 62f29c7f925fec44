// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// lipi-image — Image recoding for Lipi.
//
// Re-encodes decoded images to JPEG, PNG, or WebP with optional resizing and
// size-budget fitting, and combines images into a single PDF. Batching is
// left to the caller; every operation here works on one image or one
// finished set of images.

pub mod image;
pub mod pdf;

// Re-export the primary structs so callers can use `lipi_image::ImageRecoder` etc.
pub use self::image::processor::ImageProcessor;
pub use self::image::recoder::{
    ImageCodec, ImageRecoder, RasterEncoder, RecodeOutput, RecodeRequest, output_file_name,
};
pub use self::pdf::writer::PdfWriter;
