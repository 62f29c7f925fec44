// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image recoder — re-encode a decoded image to JPEG, PNG, or WebP, optionally
// stepping quality down until the result fits a size budget.
//
// Size fitting only applies to lossy formats. Attempts run one after another,
// each at 0.1 lower quality than the last, and stop at the first blob within
// budget or at quality 0.1, whose blob is accepted whatever its size.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use lipi_core::error::{LipiError, Result};
use lipi_core::types::{OutputFormat, Quality};
use tracing::{debug, info, instrument};

use super::processor::ImageProcessor;

// -- Encoder seam ----------------------------------------------------------------

/// Raster encode capability. The default is [`ImageCodec`]; hosts with
/// their own codecs plug in here.
pub trait RasterEncoder: Send + Sync {
    /// Encode `image` as `format` at `quality`. Lossless formats may ignore
    /// the quality.
    fn encode(
        &self,
        image: &DynamicImage,
        format: OutputFormat,
        quality: Quality,
    ) -> Result<Vec<u8>>;

    /// Whether a lower quality can shrink `format` output. Size fitting
    /// encodes once when it cannot.
    fn varies_with_quality(&self, format: OutputFormat) -> bool {
        format.is_lossy()
    }
}

/// Default encoder. JPEG and PNG go through the `image` crate; WebP is
/// lossy and goes through libwebp. JPEG and WebP honour quality.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCodec;

impl RasterEncoder for ImageCodec {
    fn encode(
        &self,
        image: &DynamicImage,
        format: OutputFormat,
        quality: Quality,
    ) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        match format {
            OutputFormat::Jpeg => {
                let rgb = image.to_rgb8();
                let encoder = JpegEncoder::new_with_quality(&mut buffer, quality.percent());
                rgb.write_with_encoder(encoder)
                    .map_err(|err| LipiError::Encode(format!("JPEG encoding failed: {err}")))?;
            }
            OutputFormat::Png => {
                let mut cursor = Cursor::new(&mut buffer);
                image
                    .write_to(&mut cursor, ImageFormat::Png)
                    .map_err(|err| LipiError::Encode(format!("PNG encoding failed: {err}")))?;
            }
            OutputFormat::WebP => {
                let rgba = image.to_rgba8();
                let encoded = webp::Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height())
                    .encode_simple(false, f32::from(quality.percent()))
                    .map_err(|err| LipiError::Encode(format!("WebP encoding failed: {err:?}")))?;
                buffer.extend_from_slice(&encoded);
            }
        }
        Ok(buffer)
    }
}

// -- Request / output ---------------------------------------------------------------

/// Parameters for recoding one image.
#[derive(Debug, Clone, PartialEq)]
pub struct RecodeRequest {
    /// Name of the source file; its extension is replaced in the output.
    pub file_name: String,
    pub format: OutputFormat,
    /// Starting quality.
    pub quality: Quality,
    /// Size budget in KiB. Ignored for lossless formats.
    pub target_size_kb: Option<u32>,
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
}

impl RecodeRequest {
    pub fn new(file_name: impl Into<String>, format: OutputFormat, quality: Quality) -> Self {
        Self {
            file_name: file_name.into(),
            format,
            quality,
            target_size_kb: None,
            max_width: None,
            max_height: None,
        }
    }

    pub fn with_target_size_kb(mut self, target_size_kb: Option<u32>) -> Self {
        self.target_size_kb = target_size_kb;
        self
    }

    pub fn with_max_dimensions(mut self, max_width: Option<u32>, max_height: Option<u32>) -> Self {
        self.max_width = max_width;
        self.max_height = max_height;
        self
    }

    /// Byte budget when size fitting applies.
    fn size_limit(&self) -> Option<u64> {
        if !self.format.is_lossy() {
            return None;
        }
        self.target_size_kb.map(|kb| u64::from(kb) * 1024)
    }
}

/// A recoded image plus size metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct RecodeOutput {
    pub blob: Vec<u8>,
    /// Source base name plus the format's extension.
    pub file_name: String,
    pub original_size: u64,
    pub new_size: u64,
    /// Quality of the accepted attempt.
    pub final_quality: Quality,
    /// Every quality tried, in order.
    pub attempts: Vec<Quality>,
}

// -- Recoder ------------------------------------------------------------------------

/// Re-encodes images through a [`RasterEncoder`].
pub struct ImageRecoder<E: RasterEncoder = ImageCodec> {
    encoder: E,
}

impl ImageRecoder<ImageCodec> {
    /// Recoder using the `image` crate codecs.
    pub fn new() -> Self {
        Self {
            encoder: ImageCodec,
        }
    }
}

impl Default for ImageRecoder<ImageCodec> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: RasterEncoder> ImageRecoder<E> {
    /// Recoder using a host-supplied encoder.
    pub fn with_encoder(encoder: E) -> Self {
        Self { encoder }
    }

    /// Decode `data` and recode it. `original_size` is the input length.
    #[instrument(skip(self, data), fields(file = %request.file_name, data_len = data.len()))]
    pub fn recode_bytes(&self, data: &[u8], request: &RecodeRequest) -> Result<RecodeOutput> {
        let image = ImageProcessor::from_bytes(data)?.into_dynamic();
        self.recode(&image, request, data.len() as u64)
    }

    /// Recode an already-decoded image.
    #[instrument(skip(self, image), fields(file = %request.file_name, format = %request.format))]
    pub fn recode(
        &self,
        image: &DynamicImage,
        request: &RecodeRequest,
        original_size: u64,
    ) -> Result<RecodeOutput> {
        let prepared = self.prepare(image, request);
        let limit = request
            .size_limit()
            .filter(|_| self.encoder.varies_with_quality(request.format));

        let mut quality = request.quality;
        let mut attempts = Vec::new();
        loop {
            let blob = self.encoder.encode(&prepared, request.format, quality)?;
            attempts.push(quality);
            let size = blob.len() as u64;
            debug!(%quality, size, ?limit, "Encode attempt");

            let fits = limit.is_none_or(|limit| size <= limit);
            if fits || quality.is_floor() {
                info!(
                    original_size,
                    new_size = size,
                    %quality,
                    attempts = attempts.len(),
                    within_budget = fits,
                    "Image recoded"
                );
                return Ok(RecodeOutput {
                    blob,
                    file_name: output_file_name(&request.file_name, request.format),
                    original_size,
                    new_size: size,
                    final_quality: quality,
                    attempts,
                });
            }
            quality = quality.step_down();
        }
    }

    /// Resize to the requested bounds and flatten transparency for formats
    /// that cannot store it.
    fn prepare(&self, image: &DynamicImage, request: &RecodeRequest) -> DynamicImage {
        let mut processor = ImageProcessor::from_dynamic(image.clone())
            .fit_within(request.max_width, request.max_height);
        if !request.format.supports_alpha() {
            processor = processor.flatten_onto_white();
        }
        processor.into_dynamic()
    }
}

/// Replace the trailing `.ext` of `source` (if any) with the format's
/// canonical extension.
pub fn output_file_name(source: &str, format: OutputFormat) -> String {
    let base = match source.rfind('.') {
        Some(idx) if idx + 1 < source.len() && !source[idx + 1..].contains('/') => &source[..idx],
        _ => source,
    };
    format!("{base}{}", format.extension())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    /// Encoder whose output size is `percent * bytes_per_point`, recording
    /// each call.
    struct ScriptedEncoder {
        bytes_per_point: usize,
        calls: Mutex<Vec<(OutputFormat, u8, bool)>>,
    }

    impl ScriptedEncoder {
        fn new(bytes_per_point: usize) -> Self {
            Self {
                bytes_per_point,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn qualities(&self) -> Vec<u8> {
            self.calls.lock().unwrap().iter().map(|c| c.1).collect()
        }
    }

    impl RasterEncoder for ScriptedEncoder {
        fn encode(
            &self,
            image: &DynamicImage,
            format: OutputFormat,
            quality: Quality,
        ) -> Result<Vec<u8>> {
            self.calls
                .lock()
                .unwrap()
                .push((format, quality.percent(), image.color().has_alpha()));
            Ok(vec![0u8; usize::from(quality.percent()) * self.bytes_per_point])
        }
    }

    /// Lossy-format encoder whose output size ignores quality.
    struct FixedSizeEncoder {
        calls: Mutex<usize>,
    }

    impl RasterEncoder for FixedSizeEncoder {
        fn encode(&self, _: &DynamicImage, _: OutputFormat, _: Quality) -> Result<Vec<u8>> {
            *self.calls.lock().unwrap() += 1;
            Ok(vec![0u8; 100_000])
        }

        fn varies_with_quality(&self, _: OutputFormat) -> bool {
            false
        }
    }

    struct FailingEncoder;

    impl RasterEncoder for FailingEncoder {
        fn encode(&self, _: &DynamicImage, _: OutputFormat, _: Quality) -> Result<Vec<u8>> {
            Err(LipiError::Encode("rejected parameters".into()))
        }
    }

    /// Opaque image with enough texture that JPEG size tracks quality.
    fn textured_image(width: u32, height: u32) -> DynamicImage {
        let img = RgbImage::from_fn(width, height, |x, y| {
            let v = (x.wrapping_mul(7919) ^ y.wrapping_mul(104_729)).wrapping_mul(2_654_435_761);
            Rgb([(v >> 8) as u8, (v >> 16) as u8, (v >> 24) as u8])
        });
        DynamicImage::ImageRgb8(img)
    }

    fn request(format: OutputFormat, quality: f32, target_kb: Option<u32>) -> RecodeRequest {
        RecodeRequest::new("holiday.photo.png", format, Quality::from_fraction(quality))
            .with_target_size_kb(target_kb)
    }

    #[test]
    fn no_target_encodes_once() {
        let recoder = ImageRecoder::with_encoder(ScriptedEncoder::new(1000));
        let out = recoder
            .recode(&textured_image(8, 8), &request(OutputFormat::WebP, 0.9, None), 123)
            .unwrap();
        assert_eq!(recoder.encoder.qualities(), vec![90]);
        assert_eq!(out.new_size, 90_000);
        assert_eq!(out.original_size, 123);
        assert_eq!(out.file_name, "holiday.photo.webp");
    }

    #[test]
    fn size_fitting_steps_down_until_within_budget() {
        let recoder = ImageRecoder::with_encoder(ScriptedEncoder::new(1000));
        let out = recoder
            .recode(&textured_image(8, 8), &request(OutputFormat::Jpeg, 0.9, Some(50)), 0)
            .unwrap();
        assert_eq!(recoder.encoder.qualities(), vec![90, 80, 70, 60, 50]);
        assert_eq!(out.final_quality.percent(), 50);
        assert!(out.new_size <= 50 * 1024);
        assert_eq!(out.attempts.len(), 5);
    }

    #[test]
    fn size_fitting_accepts_floor_blob_when_budget_is_unreachable() {
        let recoder = ImageRecoder::with_encoder(ScriptedEncoder::new(1000));
        let out = recoder
            .recode(&textured_image(8, 8), &request(OutputFormat::Jpeg, 0.9, Some(1)), 0)
            .unwrap();
        assert_eq!(
            recoder.encoder.qualities(),
            vec![90, 80, 70, 60, 50, 40, 30, 20, 10]
        );
        assert_eq!(out.final_quality, Quality::FLOOR);
        assert_eq!(out.new_size, 10_000);
    }

    #[test]
    fn quality_never_drops_below_floor() {
        let recoder = ImageRecoder::with_encoder(ScriptedEncoder::new(1000));
        recoder
            .recode(&textured_image(8, 8), &request(OutputFormat::Jpeg, 0.35, Some(1)), 0)
            .unwrap();
        assert_eq!(recoder.encoder.qualities(), vec![35, 25, 15, 10]);
    }

    #[test]
    fn lossless_format_ignores_target() {
        let recoder = ImageRecoder::with_encoder(ScriptedEncoder::new(1000));
        let out = recoder
            .recode(&textured_image(8, 8), &request(OutputFormat::Png, 0.9, Some(1)), 0)
            .unwrap();
        assert_eq!(recoder.encoder.qualities(), vec![90]);
        assert_eq!(out.file_name, "holiday.photo.png");
    }

    #[test]
    fn quality_insensitive_encoder_is_called_once() {
        let recoder = ImageRecoder::with_encoder(FixedSizeEncoder {
            calls: Mutex::new(0),
        });
        let out = recoder
            .recode(&textured_image(8, 8), &request(OutputFormat::WebP, 0.9, Some(10)), 0)
            .unwrap();
        assert_eq!(*recoder.encoder.calls.lock().unwrap(), 1);
        assert_eq!(out.attempts, vec![Quality::from_percent(90)]);
        assert_eq!(out.new_size, 100_000);
    }

    #[test]
    fn jpeg_input_is_flattened_but_png_keeps_alpha() {
        let rgba = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 0])));
        let recoder = ImageRecoder::with_encoder(ScriptedEncoder::new(1));

        recoder
            .recode(&rgba, &request(OutputFormat::Jpeg, 0.9, None), 0)
            .unwrap();
        recoder
            .recode(&rgba, &request(OutputFormat::Png, 0.9, None), 0)
            .unwrap();

        let calls = recoder.encoder.calls.lock().unwrap();
        assert_eq!(calls[0], (OutputFormat::Jpeg, 90, false));
        assert_eq!(calls[1], (OutputFormat::Png, 90, true));
    }

    #[test]
    fn encoder_failure_surfaces_as_encode_error() {
        let recoder = ImageRecoder::with_encoder(FailingEncoder);
        let result = recoder.recode(&textured_image(4, 4), &request(OutputFormat::Jpeg, 0.9, None), 0);
        assert!(matches!(result, Err(LipiError::Encode(_))));
    }

    #[test]
    fn undecodable_input_is_a_decode_error() {
        let recoder = ImageRecoder::new();
        let result = recoder.recode_bytes(b"\x89PNG broken", &request(OutputFormat::Jpeg, 0.9, None));
        assert!(matches!(result, Err(LipiError::Decode(_))));
    }

    #[test]
    fn single_pass_matches_direct_encode() {
        let image = textured_image(200, 150);
        let recoder = ImageRecoder::new();
        let out = recoder
            .recode(&image, &request(OutputFormat::WebP, 0.9, None), 0)
            .unwrap();
        let direct = ImageCodec
            .encode(&image, OutputFormat::WebP, Quality::from_fraction(0.9))
            .unwrap();
        assert_eq!(out.attempts.len(), 1);
        assert_eq!(out.blob.len(), direct.len());
    }

    #[test]
    fn real_jpeg_fits_budget_or_reaches_floor() {
        let image = textured_image(400, 300);
        let recoder = ImageRecoder::new();
        let out = recoder
            .recode(&image, &request(OutputFormat::Jpeg, 0.9, Some(50)), 0)
            .unwrap();

        assert!(out.new_size <= 50 * 1024 || out.final_quality == Quality::FLOOR);
        assert!(out.attempts.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(out.attempts[0].percent(), 90);
        assert_eq!(out.new_size, out.blob.len() as u64);
    }

    #[test]
    fn webp_size_tracks_quality() {
        let image = textured_image(300, 200);
        let high = ImageCodec
            .encode(&image, OutputFormat::WebP, Quality::from_percent(90))
            .unwrap();
        let low = ImageCodec
            .encode(&image, OutputFormat::WebP, Quality::FLOOR)
            .unwrap();
        assert!(low.len() < high.len(), "{} !< {}", low.len(), high.len());
        assert!(ImageCodec.varies_with_quality(OutputFormat::WebP));
        assert!(!ImageCodec.varies_with_quality(OutputFormat::Png));
    }

    #[test]
    fn real_webp_fitting_shrinks_output() {
        let image = textured_image(300, 200);
        let first = ImageCodec
            .encode(&image, OutputFormat::WebP, Quality::from_percent(90))
            .unwrap();
        let recoder = ImageRecoder::new();
        let out = recoder
            .recode(&image, &request(OutputFormat::WebP, 0.9, Some(10)), 0)
            .unwrap();

        assert!(out.attempts.len() > 1);
        assert!(out.new_size < first.len() as u64);
        assert!(out.new_size <= 10 * 1024 || out.final_quality == Quality::FLOOR);
        assert!(out.attempts.windows(2).all(|w| w[0] > w[1]));
        let decoded = image::load_from_memory(&out.blob).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (300, 200));
    }

    #[test]
    fn recode_bytes_reports_input_length_and_round_trips() {
        let png = ImageCodec
            .encode(&textured_image(32, 24), OutputFormat::Png, Quality::MAX)
            .unwrap();
        let recoder = ImageRecoder::new();
        let out = recoder
            .recode_bytes(&png, &RecodeRequest::new("scan.png", OutputFormat::Jpeg, Quality::MAX))
            .unwrap();

        assert_eq!(out.original_size, png.len() as u64);
        assert_eq!(out.file_name, "scan.jpg");
        let decoded = image::load_from_memory(&out.blob).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (32, 24));
    }

    #[test]
    fn resize_applies_before_encoding() {
        let recoder = ImageRecoder::new();
        let req = RecodeRequest::new("big.png", OutputFormat::Png, Quality::MAX)
            .with_max_dimensions(Some(50), None);
        let out = recoder.recode(&textured_image(200, 100), &req, 0).unwrap();
        let decoded = image::load_from_memory(&out.blob).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (50, 25));
    }

    #[test]
    fn output_names_follow_extension_rules() {
        assert_eq!(output_file_name("photo.PNG", OutputFormat::Jpeg), "photo.jpg");
        assert_eq!(output_file_name("archive.tar.gz", OutputFormat::Png), "archive.tar.png");
        assert_eq!(output_file_name("noext", OutputFormat::WebP), "noext.webp");
        assert_eq!(output_file_name("dir.d/file", OutputFormat::Jpeg), "dir.d/file.jpg");
    }
}
