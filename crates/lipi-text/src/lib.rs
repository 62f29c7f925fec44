// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// lipi-text — Bangla transliteration between Unicode and the Bijoy legacy
// glyph encoding.
//
// Both directions are pure and total: characters outside the glyph table
// pass through untouched and nothing here returns an error at runtime.

pub mod mapping;
pub mod transcoder;

pub use transcoder::{Direction, GlyphMapping, GlyphTranscoder, to_legacy, to_unicode};
