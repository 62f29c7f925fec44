// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer — combine images into a single PDF, one page per image, using
// `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use std::path::Path;

use image::DynamicImage;
use lipi_core::PaperSize;
use lipi_core::error::LipiError;
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use tracing::{debug, info, instrument, warn};

use crate::image::processor::ImageProcessor;

/// Resolution images are placed at before scaling to the page.
const PLACEMENT_DPI: f32 = 150.0;

/// Packs images into a portrait PDF, each scaled to fill its page as far as
/// the aspect ratio allows and centred.
pub struct PdfWriter {
    /// Paper size for every page.
    paper_size: PaperSize,
    /// Title metadata embedded in the PDF /Info dictionary.
    title: Option<String>,
}

/// Where an image lands on a page, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Placement {
    scale: f32,
    x: f32,
    y: f32,
}

impl PdfWriter {
    /// Create a new writer targeting the given paper size.
    pub fn new(paper_size: PaperSize) -> Self {
        Self {
            paper_size,
            title: None,
        }
    }

    /// Create a new writer defaulting to A4.
    pub fn a4() -> Self {
        Self::new(PaperSize::A4)
    }

    /// Set a title for the PDF metadata.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Paper dimensions in printpdf's Mm units.
    fn page_dimensions(&self) -> (Mm, Mm) {
        let (w_mm, h_mm) = self.paper_size.dimensions_mm();
        (Mm(w_mm), Mm(h_mm))
    }

    /// Create a PDF with one page per image.
    #[instrument(skip_all, fields(images = images.len(), paper = ?self.paper_size))]
    pub fn create_from_images(&self, images: &[DynamicImage]) -> Result<Vec<u8>, LipiError> {
        if images.is_empty() {
            return Err(LipiError::InvalidParameter(
                "cannot build a PDF from zero images".into(),
            ));
        }

        let (page_w, page_h) = self.page_dimensions();
        let title = self.title.as_deref().unwrap_or("Lipi Images");
        info!(title, "Creating image PDF");

        let mut doc = PdfDocument::new(title);
        let mut pages: Vec<PdfPage> = Vec::with_capacity(images.len());

        for (index, image) in images.iter().enumerate() {
            // printpdf takes opaque RGB8.
            let rgb_image = ImageProcessor::from_dynamic(image.clone())
                .flatten_onto_white()
                .into_dynamic()
                .to_rgb8();
            let (img_width, img_height) = rgb_image.dimensions();
            if img_width == 0 || img_height == 0 {
                return Err(LipiError::InvalidParameter(format!(
                    "image {index} has no pixels"
                )));
            }

            let raw = RawImage {
                pixels: RawImageData::U8(rgb_image.into_raw()),
                width: img_width as usize,
                height: img_height as usize,
                data_format: RawImageFormat::RGB8,
                tag: Vec::new(),
            };
            let xobject_id = doc.add_image(&raw);

            let placement = place_on_page(
                (page_w.into_pt().0, page_h.into_pt().0),
                (img_width, img_height),
            );
            debug!(index, ?placement, "Image placed on page");

            let ops = vec![Op::UseXobject {
                id: xobject_id,
                transform: XObjectTransform {
                    translate_x: Some(Pt(placement.x)),
                    translate_y: Some(Pt(placement.y)),
                    scale_x: Some(placement.scale),
                    scale_y: Some(placement.scale),
                    dpi: Some(PLACEMENT_DPI),
                    rotate: None,
                },
            }];
            pages.push(PdfPage::new(page_w, page_h, ops));
        }

        doc.with_pages(pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            warn!(count = warnings.len(), "PDF serialisation produced warnings");
        }
        debug!(bytes = output.len(), "PDF serialised");

        Ok(output)
    }

    /// Decode each encoded image and combine them into a PDF.
    pub fn create_from_encoded(&self, blobs: &[Vec<u8>]) -> Result<Vec<u8>, LipiError> {
        let images = blobs
            .iter()
            .map(|blob| ImageProcessor::from_bytes(blob).map(ImageProcessor::into_dynamic))
            .collect::<Result<Vec<_>, _>>()?;
        self.create_from_images(&images)
    }

    /// Create an image PDF and write it directly to a file.
    pub fn write_images_to_file(
        &self,
        images: &[DynamicImage],
        path: impl AsRef<Path>,
    ) -> Result<(), LipiError> {
        let bytes = self.create_from_images(images)?;
        std::fs::write(path.as_ref(), &bytes)?;
        info!("Wrote image PDF to {}", path.as_ref().display());
        Ok(())
    }
}

/// Scale an image to the largest size that fits the page and centre it.
fn place_on_page((page_w_pt, page_h_pt): (f32, f32), (img_w, img_h): (u32, u32)) -> Placement {
    let img_w_pt = img_w as f32 / PLACEMENT_DPI * 72.0;
    let img_h_pt = img_h as f32 / PLACEMENT_DPI * 72.0;

    let scale = (page_w_pt / img_w_pt).min(page_h_pt / img_h_pt);
    let rendered_w = img_w_pt * scale;
    let rendered_h = img_h_pt * scale;

    Placement {
        scale,
        x: (page_w_pt - rendered_w) / 2.0,
        y: (page_h_pt - rendered_h) / 2.0,
    }
}
