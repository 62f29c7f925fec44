// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Lipi.

use thiserror::Error;

/// Top-level error type for all Lipi operations.
///
/// Transliteration never fails at runtime; only table construction can
/// produce `MappingData`. Image errors abort the single file being
/// processed, never the whole batch.
#[derive(Debug, Error)]
pub enum LipiError {
    // -- Text errors --
    #[error("invalid glyph mapping data: {0}")]
    MappingData(String),

    // -- Image errors --
    #[error("image decoding failed: {0}")]
    Decode(String),

    #[error("image encoding failed: {0}")]
    Encode(String),

    #[error("PDF operation failed: {0}")]
    Pdf(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, LipiError>;
