//! Image processing — pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::ImageReader::into_dimensions` |
//! | **Resize** | Lanczos3 via `DynamicImage::resize_exact` |
//! | **Flatten** | `DynamicImage::to_rgb8` (alpha dropped) |
//! | **Encode** | `image::codecs::jpeg::JpegEncoder`, baseline |
//!
//! The module is split into:
//! - **Calculations**: the max-width resize policy (unit testable)
//! - **Parameters**: data structures describing a conversion
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: high-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ConvertOutcome, Dimensions, ImageBackend, PixelLayout};
pub use calculations::fit_to_max_width;
pub use operations::{convert_image, get_dimensions, plan_conversion};
pub use params::{ConvertParams, Quality};
pub use rust_backend::RustBackend;
