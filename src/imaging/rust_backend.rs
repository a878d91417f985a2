//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::ImageReader::into_dimensions` (header only) |
//! | Decode (PNG, JPEG, TIFF, WebP) | `image` crate decoders, format sniffed from content |
//! | Resize | `DynamicImage::resize_exact` with `Lanczos3` |
//! | Drop alpha | `DynamicImage::to_rgb8` |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` |
//!
//! Dropping alpha keeps the stored colour of transparent pixels; nothing is
//! composited against a background.
//!
//! Decoding runs without the `image` crate's default allocation cap, so large
//! but valid sources are converted instead of failing the batch.

use super::backend::{BackendError, ConvertOutcome, Dimensions, ImageBackend, PixelLayout};
use super::params::ConvertParams;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, ImageReader, Limits, RgbImage};
use std::path::Path;

/// Pure Rust backend using the `image` crate for decoding, resampling and
/// JPEG output.
pub struct RustBackend {
    limits: Limits,
}

impl RustBackend {
    pub fn new() -> Self {
        Self {
            limits: Limits::no_limits(),
        }
    }

    /// Decode under explicit limits instead of none.
    pub fn with_limits(limits: Limits) -> Self {
        Self { limits }
    }

    fn open_reader(
        &self,
        path: &Path,
    ) -> Result<ImageReader<std::io::BufReader<std::fs::File>>, BackendError> {
        let mut reader = ImageReader::open(path)?.with_guessed_format()?;
        reader.limits(self.limits.clone());
        Ok(reader)
    }

    /// Load and decode an image from disk.
    fn load_image(&self, path: &Path) -> Result<DynamicImage, BackendError> {
        self.open_reader(path)?.decode().map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn pixel_layout(color: ColorType) -> PixelLayout {
    match (color.has_color(), color.has_alpha()) {
        (false, false) => PixelLayout::Gray,
        (false, true) => PixelLayout::GrayAlpha,
        (true, false) => PixelLayout::Rgb,
        (true, true) => PixelLayout::Rgba,
    }
}

/// Encode an RGB buffer as baseline JPEG.
fn encode_jpeg(rgb: &RgbImage, quality: u32) -> Result<Vec<u8>, BackendError> {
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality as u8)
        .encode_image(rgb)
        .map_err(|e| BackendError::ProcessingFailed(format!("JPEG encode failed: {}", e)))?;
    Ok(buf)
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = self.open_reader(path)?.into_dimensions().map_err(|e| {
            BackendError::ProcessingFailed(format!(
                "Failed to read dimensions of {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Dimensions { width, height })
    }

    fn convert(&self, params: &ConvertParams) -> Result<ConvertOutcome, BackendError> {
        let img = self.load_image(&params.source)?;
        let source_layout = pixel_layout(img.color());

        let img = if params.needs_resize((img.width(), img.height())) {
            img.resize_exact(params.width, params.height, FilterType::Lanczos3)
        } else {
            img
        };

        let rgb = img.to_rgb8();
        let bytes = encode_jpeg(&rgb, params.quality.value())?;
        std::fs::write(&params.output, bytes)?;

        Ok(ConvertOutcome {
            source_layout,
            output: Dimensions {
                width: rgb.width(),
                height: rgb.height(),
            },
        })
    }
}
