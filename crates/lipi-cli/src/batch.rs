// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Batch image recoding.
//
// Each file is decoded, recoded and written on the blocking pool with at most
// `concurrency` files in flight. A worker drops its blob once the file is on
// disk unless the PDF needs it. The report is put back in input order. A
// failing file is recorded and skipped; the rest of the batch carries on.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use lipi_core::{AppConfig, FileStatus};
use lipi_image::{ImageRecoder, PdfWriter, RecodeOutput, RecodeRequest, output_file_name};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, instrument, warn};

/// What to produce for a batch.
#[derive(Debug, Clone)]
pub struct BatchPlan {
    pub inputs: Vec<PathBuf>,
    pub out_dir: PathBuf,
    pub config: AppConfig,
    /// Combine the recoded images into one PDF.
    pub make_pdf: bool,
    /// Write only the PDF, not the individual images.
    pub pdf_only: bool,
}

/// Per-file outcome.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub source: PathBuf,
    pub status: FileStatus,
}

/// Outcome of the PDF packaging step.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfOutcome {
    NotRequested,
    /// Requested, but no image converted.
    Skipped,
    Written(PathBuf),
    Failed(String),
}

/// Everything a batch did.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
    pub pdf: PdfOutcome,
}

impl BatchReport {
    pub fn converted(&self) -> usize {
        self.files.iter().filter(|f| f.status.is_converted()).count()
    }

    /// True when there was work and none of it succeeded, or packaging failed.
    pub fn is_failure(&self) -> bool {
        let all_failed = !self.files.is_empty() && self.converted() == 0;
        all_failed || matches!(self.pdf, PdfOutcome::Failed(_))
    }
}

/// What a worker hands back for one converted file.
struct Stored {
    status: FileStatus,
    /// Recoded blob, kept only when it becomes a PDF page.
    pdf_page: Option<Vec<u8>>,
}

/// Run a whole batch. Only setup problems (e.g. an unwritable output
/// directory) return `Err`; per-file failures land in the report.
#[instrument(skip_all, fields(files = plan.inputs.len(), out_dir = %plan.out_dir.display()))]
pub async fn run(plan: BatchPlan) -> Result<BatchReport> {
    tokio::fs::create_dir_all(&plan.out_dir)
        .await
        .with_context(|| format!("failed to create {}", plan.out_dir.display()))?;

    let config = &plan.config;
    let recoder = Arc::new(ImageRecoder::new());
    let semaphore = Arc::new(Semaphore::new(config.concurrency.max(1)));
    let make_pdf = plan.make_pdf || plan.pdf_only;

    let requests: Vec<RecodeRequest> = plan
        .inputs
        .iter()
        .map(|source| request_for(source, config))
        .collect();
    let writers = file_writers(&requests);

    let mut tasks = JoinSet::new();
    for (index, (source, request)) in plan.inputs.iter().zip(requests).enumerate() {
        let permit = semaphore.clone().acquire_owned().await?;
        let recoder = Arc::clone(&recoder);
        let source = source.clone();
        let target = (!plan.pdf_only && writers[index])
            .then(|| plan.out_dir.join(output_file_name(&request.file_name, request.format)));
        tasks.spawn_blocking(move || {
            let _permit = permit;
            let stored = recode_file(&recoder, &source, &request)
                .and_then(|output| store(output, target.as_deref(), make_pdf));
            (index, stored)
        });
    }

    let mut statuses: Vec<Option<FileStatus>> = vec![None; plan.inputs.len()];
    let mut pdf_pages: Vec<Option<Vec<u8>>> = vec![None; plan.inputs.len()];
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, Ok(stored))) => {
                statuses[index] = Some(stored.status);
                pdf_pages[index] = stored.pdf_page;
            }
            Ok((index, Err(err))) => statuses[index] = Some(failed(&plan.inputs[index], err)),
            Err(err) => warn!(error = %err, "Worker task failed"),
        }
    }

    let files: Vec<FileReport> = plan
        .inputs
        .iter()
        .zip(statuses)
        .map(|(source, status)| FileReport {
            source: source.clone(),
            status: status.unwrap_or_else(|| FileStatus::Failed {
                reason: "worker task failed".to_owned(),
            }),
        })
        .collect();
    let pdf_blobs: Vec<Vec<u8>> = pdf_pages.into_iter().flatten().collect();

    let pdf = if !make_pdf {
        PdfOutcome::NotRequested
    } else if pdf_blobs.is_empty() {
        warn!("No images converted; skipping PDF");
        PdfOutcome::Skipped
    } else {
        package_pdf(&plan, pdf_blobs).await
    };

    let report = BatchReport { files, pdf };
    info!(
        converted = report.converted(),
        failed = report.files.len() - report.converted(),
        "Batch finished"
    );
    Ok(report)
}

/// Recode request for one source file under the batch settings.
fn request_for(source: &Path, config: &AppConfig) -> RecodeRequest {
    let file_name = source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_owned());
    RecodeRequest::new(file_name, config.output_format, config.quality)
        .with_target_size_kb(config.target_size_kb)
        .with_max_dimensions(config.max_width, config.max_height)
}

/// Which requests write their output file. When several inputs map to the
/// same output name, only the last of them writes it.
fn file_writers(requests: &[RecodeRequest]) -> Vec<bool> {
    let names: Vec<String> = requests
        .iter()
        .map(|request| output_file_name(&request.file_name, request.format))
        .collect();
    let last: HashMap<&str, usize> = names
        .iter()
        .enumerate()
        .map(|(index, name)| (name.as_str(), index))
        .collect();
    names
        .iter()
        .enumerate()
        .map(|(index, name)| last[name.as_str()] == index)
        .collect()
}

fn recode_file(
    recoder: &ImageRecoder,
    source: &Path,
    request: &RecodeRequest,
) -> Result<RecodeOutput> {
    let data =
        std::fs::read(source).with_context(|| format!("failed to read {}", source.display()))?;
    Ok(recoder.recode_bytes(&data, request)?)
}

/// Write the recoded image to `target` (if any) and keep its blob only when
/// it is needed for the PDF.
fn store(output: RecodeOutput, target: Option<&Path>, keep_for_pdf: bool) -> Result<Stored> {
    if let Some(target) = target {
        std::fs::write(target, &output.blob)
            .with_context(|| format!("failed to write {}", target.display()))?;
    }

    Ok(Stored {
        status: FileStatus::Converted {
            file_name: output.file_name,
            original_size: output.original_size,
            new_size: output.new_size,
        },
        pdf_page: keep_for_pdf.then_some(output.blob),
    })
}

fn failed(source: &Path, err: anyhow::Error) -> FileStatus {
    let reason = format!("{err:#}");
    warn!(source = %source.display(), error = %reason, "File failed");
    FileStatus::Failed { reason }
}

async fn package_pdf(plan: &BatchPlan, blobs: Vec<Vec<u8>>) -> PdfOutcome {
    let writer = PdfWriter::new(plan.config.pdf_page_size);
    let target = plan.out_dir.join(&plan.config.pdf_file_name);

    let built = tokio::task::spawn_blocking(move || writer.create_from_encoded(&blobs)).await;
    let bytes = match built {
        Ok(Ok(bytes)) => bytes,
        Ok(Err(err)) => return PdfOutcome::Failed(err.to_string()),
        Err(err) => return PdfOutcome::Failed(format!("PDF task failed: {err}")),
    };

    match tokio::fs::write(&target, bytes).await {
        Ok(()) => {
            info!(path = %target.display(), "PDF written");
            PdfOutcome::Written(target)
        }
        Err(err) => PdfOutcome::Failed(format!("failed to write {}: {err}", target.display())),
    }
}
