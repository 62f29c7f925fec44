// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Lipi — Bangla Unicode/Bijoy conversion and local batch image recoding.
//
// Entry point. Initialises logging, parses the command line, and dispatches
// to the text or image commands.

mod batch;
mod text;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use lipi_core::{AppConfig, FileStatus, OutputFormat, PaperSize, Quality};
use lipi_text::Direction;

use batch::{BatchPlan, PdfOutcome};

/// Bangla Unicode/Bijoy text conversion and local image recoding.
#[derive(Parser, Debug)]
#[command(name = "lipi", version)]
#[command(about = "Convert Bangla text between Unicode and Bijoy, and recode images locally")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert Unicode Bangla text to Bijoy glyphs (for SutonnyMJ-style fonts)
    ToBijoy(TextArgs),
    /// Convert Bijoy glyph text back to Unicode Bangla
    ToUnicode(TextArgs),
    /// Recode images, optionally combining them into one PDF
    Images(ImageArgs),
}

#[derive(Args, Debug)]
struct TextArgs {
    /// Input file; reads stdin when omitted
    input: Option<PathBuf>,

    /// Output file; writes stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ImageArgs {
    /// Images to recode
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Directory for recoded images and the PDF
    #[arg(short = 'd', long, default_value = "converted")]
    out_dir: PathBuf,

    /// JSON settings file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format: jpeg, png, or webp
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Starting quality between 0.1 and 1.0
    #[arg(short, long)]
    quality: Option<f32>,

    /// Keep each lossy output at or under this many KiB
    #[arg(short, long)]
    target_kb: Option<u32>,

    /// Shrink wider images to this width
    #[arg(long)]
    max_width: Option<u32>,

    /// Shrink taller images to this height
    #[arg(long)]
    max_height: Option<u32>,

    /// Also combine the recoded images into one PDF
    #[arg(long)]
    pdf: bool,

    /// Write only the combined PDF
    #[arg(long)]
    pdf_only: bool,

    /// PDF page size: a4, a3, a5, letter, or legal
    #[arg(long)]
    page_size: Option<PaperSize>,

    /// PDF file name
    #[arg(long)]
    pdf_name: Option<String>,

    /// Files recoded at once
    #[arg(short, long)]
    jobs: Option<usize>,
}

impl ImageArgs {
    /// Loaded (or default) settings with command-line overrides applied.
    fn resolve_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => AppConfig::default(),
        };

        if let Some(format) = self.format {
            config.output_format = format;
        }
        if let Some(quality) = self.quality {
            config.quality = Quality::try_from(quality)?;
        }
        if self.target_kb.is_some() {
            config.target_size_kb = self.target_kb;
        }
        if self.max_width.is_some() {
            config.max_width = self.max_width;
        }
        if self.max_height.is_some() {
            config.max_height = self.max_height;
        }
        if let Some(page_size) = self.page_size {
            config.pdf_page_size = page_size;
        }
        if let Some(name) = &self.pdf_name {
            config.pdf_file_name = name.clone();
        }
        if let Some(jobs) = self.jobs {
            config.concurrency = jobs;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so converted text on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::ToBijoy(args) => {
            text::run(args.input.as_deref(), args.output.as_deref(), Direction::ToLegacy)
        }
        Command::ToUnicode(args) => {
            text::run(args.input.as_deref(), args.output.as_deref(), Direction::ToUnicode)
        }
        Command::Images(args) => run_images(args).await,
    }
}

async fn run_images(args: ImageArgs) -> Result<()> {
    let config = args.resolve_config()?;
    tracing::info!(
        files = args.files.len(),
        format = %config.output_format,
        quality = %config.quality,
        target_kb = ?config.target_size_kb,
        "Starting image batch"
    );

    let report = batch::run(BatchPlan {
        inputs: args.files,
        out_dir: args.out_dir,
        config,
        make_pdf: args.pdf,
        pdf_only: args.pdf_only,
    })
    .await?;

    for file in &report.files {
        match &file.status {
            FileStatus::Converted {
                file_name,
                original_size,
                new_size,
            } => println!(
                "converted {} -> {} ({} -> {})",
                file.source.display(),
                file_name,
                human_size(*original_size),
                human_size(*new_size)
            ),
            FileStatus::Failed { reason } => {
                println!("failed    {}: {}", file.source.display(), reason)
            }
        }
    }
    match &report.pdf {
        PdfOutcome::NotRequested => {}
        PdfOutcome::Skipped => println!("pdf       skipped: no images converted"),
        PdfOutcome::Written(path) => println!("pdf       {}", path.display()),
        PdfOutcome::Failed(reason) => println!("pdf       failed: {reason}"),
    }

    if report.is_failure() {
        bail!(
            "{} of {} files converted",
            report.converted(),
            report.files.len()
        );
    }
    Ok(())
}

/// Format a byte count the way file managers do (KB/MB, one decimal).
fn human_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let bytes = bytes as f64;
    if bytes < KB {
        format!("{bytes} B")
    } else if bytes < KB * KB {
        format!("{:.1} KB", bytes / KB)
    } else {
        format!("{:.1} MB", bytes / (KB * KB))
    }
}
