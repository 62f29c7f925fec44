// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — decode, bounding-box resize, and flattening onto an
// opaque white background. Operates on in-memory images using the `image`
// crate.

use image::{DynamicImage, RgbImage};
use lipi_core::error::LipiError;
use tracing::{debug, info, instrument};

/// Preparation steps applied to a single decoded image before encoding.
///
/// Each method consumes `self` and returns a new `ImageProcessor`, so steps
/// chain:
///
/// ```ignore
/// let prepared = ImageProcessor::from_bytes(&bytes)?
///     .fit_within(Some(1920), None)
///     .flatten_onto_white()
///     .into_dynamic();
/// ```
pub struct ImageProcessor {
    /// The current working image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Decode raw encoded bytes (JPEG, PNG, WebP, ...).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, LipiError> {
        let img = image::load_from_memory(data)
            .map_err(|err| LipiError::Decode(format!("failed to decode image: {err}")))?;
        debug!(
            width = img.width(),
            height = img.height(),
            "Image decoded from bytes"
        );
        Ok(Self { image: img })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Whether the image carries an alpha channel.
    pub fn has_alpha(&self) -> bool {
        self.image.color().has_alpha()
    }

    /// Borrow the underlying `DynamicImage`.
    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }

    /// Consume the processor and return the underlying `DynamicImage`.
    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }

    // -- Transformations (consume self, return new Self) -----------------------

    /// Shrink the image to fit within the given bounds, preserving aspect
    /// ratio. A missing bound leaves that axis unconstrained. Never upscales.
    #[instrument(skip(self))]
    pub fn fit_within(self, max_width: Option<u32>, max_height: Option<u32>) -> Self {
        let bound_w = max_width.unwrap_or(u32::MAX).max(1);
        let bound_h = max_height.unwrap_or(u32::MAX).max(1);
        if self.image.width() <= bound_w && self.image.height() <= bound_h {
            return self;
        }

        info!(
            from_w = self.image.width(),
            from_h = self.image.height(),
            bound_w,
            bound_h,
            "Resizing image"
        );
        let resized = self
            .image
            .resize(bound_w, bound_h, image::imageops::FilterType::Lanczos3);
        debug!(
            new_w = resized.width(),
            new_h = resized.height(),
            "Resize complete"
        );
        Self { image: resized }
    }

    /// Composite the image over opaque white and drop the alpha channel.
    /// Images without alpha are returned unchanged.
    #[instrument(skip(self))]
    pub fn flatten_onto_white(self) -> Self {
        if !self.has_alpha() {
            return self;
        }
        debug!("Compositing onto white background");

        let rgba = self.image.to_rgba8();
        let flattened = RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
            let image::Rgba([r, g, b, a]) = *rgba.get_pixel(x, y);
            let over_white = |channel: u8| -> u8 {
                let alpha = u32::from(a);
                let blended = u32::from(channel) * alpha + 255 * (255 - alpha);
                (blended / 255) as u8
            };
            image::Rgb([over_white(r), over_white(g), over_white(b)])
        });
        Self {
            image: DynamicImage::ImageRgb8(flattened),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        match ImageProcessor::from_bytes(b"definitely not an image") {
            Err(LipiError::Decode(_)) => {}
            Err(other) => panic!("unexpected error variant: {other}"),
            Ok(_) => panic!("garbage decoded"),
        }
    }

    #[test]
    fn fit_within_preserves_aspect_ratio() {
        let img = DynamicImage::new_rgb8(400, 200);
        let fitted = ImageProcessor::from_dynamic(img).fit_within(Some(100), None);
        assert_eq!((fitted.width(), fitted.height()), (100, 50));
    }

    #[test]
    fn fit_within_never_upscales() {
        let img = DynamicImage::new_rgb8(40, 20);
        let fitted = ImageProcessor::from_dynamic(img).fit_within(Some(100), Some(100));
        assert_eq!((fitted.width(), fitted.height()), (40, 20));
    }

    #[test]
    fn flatten_composites_transparent_pixels_onto_white() {
        let mut rgba = RgbaImage::new(3, 1);
        rgba.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
        rgba.put_pixel(1, 0, Rgba([255, 0, 0, 255]));
        rgba.put_pixel(2, 0, Rgba([0, 0, 0, 128]));

        let flat = ImageProcessor::from_dynamic(DynamicImage::ImageRgba8(rgba)).flatten_onto_white();
        assert!(!flat.has_alpha());

        let rgb = flat.into_dynamic().to_rgb8();
        assert_eq!(rgb.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(rgb.get_pixel(1, 0).0, [255, 0, 0]);
        assert_eq!(rgb.get_pixel(2, 0).0, [127, 127, 127]);
    }

    #[test]
    fn flatten_leaves_opaque_images_alone() {
        let img = DynamicImage::new_rgb8(2, 2);
        let flat = ImageProcessor::from_dynamic(img.clone()).flatten_onto_white();
        assert_eq!(flat.into_dynamic(), img);
    }
}
