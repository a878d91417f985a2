//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They sit between
//! [`operations`](super::operations), which decides the target dimensions, and
//! the [`backend`](super::backend), which does the pixel work. Keeping them
//! separate lets the batch loop run against a recording mock in tests.

use std::path::PathBuf;

/// Quality setting for lossy JPEG encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(80)
    }
}

/// Full specification for converting one source image to a JPEG.
///
/// `width`/`height` are the final output dimensions. When they equal the
/// source dimensions the backend skips resampling entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub quality: Quality,
}

impl ConvertParams {
    /// Whether these params shrink an image of the given original dimensions.
    pub fn needs_resize(&self, original: (u32, u32)) -> bool {
        (self.width, self.height) != original
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_clamps_to_valid_range() {
        assert_eq!(Quality::new(0).value(), 1);
        assert_eq!(Quality::new(80).value(), 80);
        assert_eq!(Quality::new(150).value(), 100);
    }

    #[test]
    fn quality_default_is_80() {
        assert_eq!(Quality::default().value(), 80);
    }

    #[test]
    fn needs_resize_compares_dimensions() {
        let params = ConvertParams {
            source: "a.png".into(),
            output: "a.jpg".into(),
            width: 1400,
            height: 700,
            quality: Quality::default(),
        };
        assert!(params.needs_resize((2000, 1000)));
        assert!(!params.needs_resize((1400, 700)));
    }
}
