//! # compress-images
//!
//! Batch-prepare a folder of PNGs for the web: anything wider than 1400px is
//! downscaled (Lanczos3, aspect ratio kept), alpha is dropped, and the result
//! is written next to the original as a quality-80 JPEG. One line per file reports the size before and after.
//!
//! ```text
//! images/photo.PNG (2000x1000, 5.00MB)  →  images/photo.jpg (1400x700)
//! images/icon.png  (300x300)            →  images/icon.jpg  (300x300)
//! images/readme.txt                     →  untouched
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `CompressConfig` defaults, TOML loading, validation |
//! | [`naming`] | Suffix matching and output file names |
//! | [`imaging`] | Resize policy, backend trait, pure-Rust decode/resize/encode |
//! | [`compress`] | The sequential batch loop and its error policies |
//! | [`output`] | Report line formatting |
//!
//! # Design Decisions
//!
//! ## Fail Fast by Default
//!
//! A broken image stops the batch. Whatever was already written stays on
//! disk; nothing after the failure is attempted. `on_error = "continue"`
//! (or `--keep-going`) turns this into collect-and-continue.
//!
//! ## Directory Order
//!
//! Files are handled in the order the platform lists them. No sorting.
//!
//! ## Pure-Rust Imaging
//!
//! Decoding, resampling and JPEG encoding all go through the `image` crate,
//! with no decode allocation cap. No system libraries are needed.

pub mod compress;
pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
