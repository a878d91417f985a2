//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations the batch loop needs:
//! identify (read dimensions) and convert (decode, resize, flatten, encode).
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend). Tests drive the loop with
//! a recording mock instead.

use super::params::ConvertParams;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl From<Dimensions> for (u32, u32) {
    fn from(d: Dimensions) -> Self {
        (d.width, d.height)
    }
}

/// Channel layout of a decoded source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    Gray,
    GrayAlpha,
    Rgb,
    Rgba,
}

impl PixelLayout {
    pub fn has_alpha(self) -> bool {
        matches!(self, Self::GrayAlpha | Self::Rgba)
    }
}

/// What a convert operation actually wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOutcome {
    /// Layout of the decoded source, before flattening to RGB.
    pub source_layout: PixelLayout,
    /// Dimensions of the encoded output.
    pub output: Dimensions,
}

/// Trait for image processing backends.
pub trait ImageBackend {
    /// Get image dimensions without decoding pixel data.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode `params.source`, resize to the requested dimensions if they
    /// differ, drop any alpha channel, and write a JPEG to `params.output`.
    fn convert(&self, params: &ConvertParams) -> Result<ConvertOutcome, BackendError>;
}
