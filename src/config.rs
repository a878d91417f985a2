//! Batch configuration.
//!
//! Every knob of the re-encoder lives in [`CompressConfig`]. Running the tool
//! with no config file and no flags uses the stock defaults, which reproduce
//! the fixed behaviour: scan `images/`, shrink anything wider than 1400px,
//! write quality-80 JPEGs next to the PNGs, stop at the first failure.
//!
//! ## Layering
//!
//! ```text
//! stock defaults  →  --config FILE  →  CLI flags (--dir, --keep-going)
//! ```
//!
//! Config files are sparse; override just the values you want:
//!
//! ```toml
//! source_dir = "assets/gallery"
//! max_width = 1920
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// What the batch does when one file fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Stop the whole batch at the first failure. Files already written stay.
    #[default]
    Abort,
    /// Report the failure, skip the file, and keep going.
    Continue,
}

/// Re-encoder configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompressConfig {
    /// Directory scanned for source images (not recursive).
    pub source_dir: PathBuf,
    /// Images wider than this are downscaled to exactly this width.
    pub max_width: u32,
    /// JPEG quality (1 = worst, 100 = best).
    pub quality: u32,
    /// Case-insensitive file name ending that marks an input.
    pub source_suffix: String,
    /// File name ending given to generated JPEGs.
    pub target_suffix: String,
    /// Failure handling for the batch.
    pub on_error: ErrorPolicy,
}

impl Default for CompressConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("images"),
            max_width: 1400,
            quality: 80,
            source_suffix: ".png".to_string(),
            target_suffix: ".jpg".to_string(),
            on_error: ErrorPolicy::Abort,
        }
    }
}

const JPEG_SUFFIXES: &[&str] = &[".jpg", ".jpeg"];

fn validate_suffix(key: &str, suffix: &str) -> Result<(), ConfigError> {
    if !suffix.starts_with('.') || suffix.len() < 2 {
        return Err(ConfigError::Validation(format!(
            "{key} must start with '.' followed by an extension, got {suffix:?}"
        )));
    }
    Ok(())
}

impl CompressConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_width == 0 {
            return Err(ConfigError::Validation("max_width must be non-zero".into()));
        }
        if !(1..=100).contains(&self.quality) {
            return Err(ConfigError::Validation("quality must be 1-100".into()));
        }
        validate_suffix("source_suffix", &self.source_suffix)?;
        validate_suffix("target_suffix", &self.target_suffix)?;
        if !JPEG_SUFFIXES
            .iter()
            .any(|s| s.eq_ignore_ascii_case(&self.target_suffix))
        {
            return Err(ConfigError::Validation(format!(
                "target_suffix must be one of {JPEG_SUFFIXES:?} (output is always JPEG)"
            )));
        }
        if self.source_suffix.eq_ignore_ascii_case(&self.target_suffix) {
            return Err(ConfigError::Validation(
                "source_suffix and target_suffix must differ".into(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(CompressConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
pub fn load_config_file(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<CompressConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: CompressConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the effective config: stock defaults, optionally overlaid by a file.
pub fn load_config(path: Option<&Path>) -> Result<CompressConfig, ConfigError> {
    let overlay = path.map(load_config_file).transpose()?;
    resolve_config(stock_defaults_value(), overlay)
}

/// Returns a fully-commented stock config with every key at its default.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r#"# compress-images configuration
# ==============================
# All settings are optional. Values shown below are the defaults.
# Pass the file with --config; --dir and --keep-going override it.
# Unknown keys will cause an error.

# Directory holding the images. Only its direct entries are processed.
source_dir = "images"

# Images wider than this many pixels are downscaled to exactly this width,
# keeping their aspect ratio (Lanczos3 resampling).
max_width = 1400

# JPEG quality (1 = worst, 100 = best).
quality = 80

# Files whose name ends with this (any case) are converted.
source_suffix = ".png"

# Converted files get this ending instead. Must be .jpg or .jpeg.
target_suffix = ".jpg"

# "abort" stops at the first broken image; "continue" reports it and moves on.
on_error = "abort"
"#
}
