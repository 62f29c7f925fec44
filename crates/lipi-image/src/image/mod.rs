// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — decoding, preparation, and recoding to a size budget.

pub mod processor;
pub mod recoder;

pub use processor::ImageProcessor;
pub use recoder::{ImageRecoder, RecodeOutput, RecodeRequest};
