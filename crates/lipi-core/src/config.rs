// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::types::{OutputFormat, PaperSize, Quality};

/// Persistent settings for image batches. Command-line flags override
/// whatever is loaded here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Encoding for recoded images.
    pub output_format: OutputFormat,
    /// Starting encoder quality (0.1-1.0).
    pub quality: Quality,
    /// Upper bound on each output file, in KiB. Lossy formats only.
    pub target_size_kb: Option<u32>,
    /// Shrink images wider than this before encoding.
    pub max_width: Option<u32>,
    /// Shrink images taller than this before encoding.
    pub max_height: Option<u32>,
    /// Page size used when combining images into a PDF.
    pub pdf_page_size: PaperSize,
    /// File name for the combined PDF.
    pub pdf_file_name: String,
    /// Maximum number of files recoded at once.
    pub concurrency: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Jpeg,
            quality: Quality::default(),
            target_size_kb: None,
            max_width: None,
            max_height: None,
            pdf_page_size: PaperSize::A4,
            pdf_file_name: "converted_images.pdf".into(),
            concurrency: 4,
        }
    }
}

impl AppConfig {
    /// Load settings from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&raw)?;
        debug!(path = %path.as_ref().display(), ?config, "Configuration loaded");
        Ok(config)
    }

    /// Write settings as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), raw)?;
        info!(path = %path.as_ref().display(), "Configuration saved");
        Ok(())
    }
}
