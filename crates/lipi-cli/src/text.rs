// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text conversion commands — read a file or stdin, convert, write a file or
// stdout.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use lipi_text::{Direction, GlyphTranscoder};
use tracing::info;

/// Convert `input` (or stdin) in `direction`, writing to `output` (or stdout).
pub fn run(input: Option<&Path>, output: Option<&Path>, direction: Direction) -> Result<()> {
    let source = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => io::read_to_string(io::stdin()).context("failed to read stdin")?,
    };

    let converted = GlyphTranscoder::global().convert(&source, direction);
    info!(
        ?direction,
        in_chars = source.chars().count(),
        out_chars = converted.chars().count(),
        "Text converted"
    );

    match output {
        Some(path) => std::fs::write(path, &converted)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(converted.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
