// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Lipi.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LipiError;

/// Target encodings offered for image recoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Jpeg,
    Png,
    #[serde(rename = "webp")]
    WebP,
}

impl OutputFormat {
    /// MIME type string, as used by the host when naming formats.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::WebP => "image/webp",
        }
    }

    /// Canonical file extension including the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => ".jpg",
            Self::Png => ".png",
            Self::WebP => ".webp",
        }
    }

    /// Whether the encoder honours a quality setting (and so whether
    /// target-size fitting applies).
    pub fn is_lossy(&self) -> bool {
        matches!(self, Self::Jpeg | Self::WebP)
    }

    /// Whether transparent pixels survive encoding. Formats without alpha
    /// are composited onto white first.
    pub fn supports_alpha(&self) -> bool {
        matches!(self, Self::Png | Self::WebP)
    }

    /// Parse a MIME type string (`image/jpeg`, ...).
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "image/webp" => Some(Self::WebP),
            _ => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime_type())
    }
}

impl FromStr for OutputFormat {
    type Err = LipiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(format) = Self::from_mime(s) {
            return Ok(format);
        }
        match s.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            "webp" => Ok(Self::WebP),
            other => Err(LipiError::InvalidParameter(format!(
                "unknown output format: {other}"
            ))),
        }
    }
}

/// Encoder quality in whole percent, always within `[10, 100]`.
///
/// Stored as an integer so repeated 0.1 decrements land exactly on
/// 0.9, 0.8, ... instead of drifting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Quality(u8);

impl Quality {
    /// Lowest quality the size-fitting loop will try.
    pub const FLOOR: Quality = Quality(10);
    /// Highest representable quality.
    pub const MAX: Quality = Quality(100);
    /// Amount removed per size-fitting retry.
    const STEP: u8 = 10;

    /// Build from a fraction in `[0.1, 1.0]`. Out-of-range and non-finite
    /// values are clamped into range.
    pub fn from_fraction(fraction: f32) -> Self {
        if !fraction.is_finite() {
            return Self::MAX;
        }
        let percent = (fraction * 100.0).round().clamp(10.0, 100.0);
        Self(percent as u8)
    }

    /// Build from whole percent, clamped into `[10, 100]`.
    pub fn from_percent(percent: u8) -> Self {
        Self(percent.clamp(Self::FLOOR.0, Self::MAX.0))
    }

    pub fn percent(&self) -> u8 {
        self.0
    }

    pub fn as_fraction(&self) -> f32 {
        f32::from(self.0) / 100.0
    }

    /// Whether this is the lowest quality the fitting loop accepts.
    pub fn is_floor(&self) -> bool {
        self.0 <= Self::FLOOR.0
    }

    /// One retry step lower, never below the floor.
    pub fn step_down(&self) -> Self {
        Self(self.0.saturating_sub(Self::STEP).max(Self::FLOOR.0))
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

impl From<Quality> for f32 {
    fn from(q: Quality) -> f32 {
        q.as_fraction()
    }
}

impl TryFrom<f32> for Quality {
    type Error = LipiError;

    fn try_from(fraction: f32) -> Result<Self, Self::Error> {
        if !fraction.is_finite() || !(0.1..=1.0).contains(&fraction) {
            return Err(LipiError::InvalidParameter(format!(
                "quality must be within [0.1, 1.0], got {fraction}"
            )));
        }
        Ok(Self::from_fraction(fraction))
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.as_fraction())
    }
}

/// Page sizes offered for PDF packaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    A4,
    A3,
    A5,
    Letter,
    Legal,
}

impl PaperSize {
    /// Dimensions in millimetres (width, height), portrait.
    pub fn dimensions_mm(&self) -> (f32, f32) {
        match self {
            Self::A4 => (210.0, 297.0),
            Self::A3 => (297.0, 420.0),
            Self::A5 => (148.0, 210.0),
            Self::Letter => (215.9, 279.4),
            Self::Legal => (215.9, 355.6),
        }
    }
}

impl FromStr for PaperSize {
    type Err = LipiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "a4" => Ok(Self::A4),
            "a3" => Ok(Self::A3),
            "a5" => Ok(Self::A5),
            "letter" => Ok(Self::Letter),
            "legal" => Ok(Self::Legal),
            other => Err(LipiError::InvalidParameter(format!(
                "unknown page size: {other}"
            ))),
        }
    }
}

/// Outcome of processing one file in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    /// Recoded successfully.
    Converted {
        file_name: String,
        original_size: u64,
        new_size: u64,
    },
    /// Failed; the rest of the batch carried on.
    Failed { reason: String },
}

impl FileStatus {
    pub fn is_converted(&self) -> bool {
        matches!(self, Self::Converted { .. })
    }
}
