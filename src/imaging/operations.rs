//! High-level image operations.
//!
//! These functions combine the resize policy with backend execution.

use super::backend::{BackendError, ConvertOutcome, ImageBackend};
use super::calculations::fit_to_max_width;
use super::params::{ConvertParams, Quality};
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<(u32, u32)> {
    Ok(backend.identify(path)?.into())
}

/// Plan a conversion without executing it.
///
/// The output dimensions follow [`fit_to_max_width`].
pub fn plan_conversion(
    source: &Path,
    output: &Path,
    original_dims: (u32, u32),
    max_width: u32,
    quality: Quality,
) -> ConvertParams {
    let (width, height) = fit_to_max_width(original_dims, max_width);
    ConvertParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        width,
        height,
        quality,
    }
}

/// Execute a planned conversion.
pub fn convert_image(backend: &impl ImageBackend, params: &ConvertParams) -> Result<ConvertOutcome> {
    backend.convert(params)
}
