//! Run configuration.
//!
//! Handles loading, validating, and merging `config.toml` files. Settings are
//! layered, each layer overriding the one below:
//!
//! ```text
//! stock defaults
//!   ← config.toml (from --config, else <input>/config.toml if present)
//!     ← command-line flags (--quality, --filter)
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [output]
//! quality = 90              # JPEG quality (1-100)
//!
//! [resize]
//! filter = "triangle"       # nearest | triangle | catmull-rom | gaussian | lanczos3
//!
//! [filler]
//! color = [255, 255, 255]   # Partner for an odd last image
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early. Layout is not configurable: pairs are
//! always placed side by side, first image on the left.

use crate::imaging::{CompositeConfig, Quality, ResizeFilter};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration for a docking run.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComposeConfig {
    /// Encoding of the written composites.
    pub output: OutputConfig,
    /// Scaling of sources to the pair height.
    pub resize: ResizeConfig,
    /// The synthetic partner of an unpaired last image.
    pub filler: FillerConfig,
}

impl ComposeConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.output.quality) {
            return Err(ConfigError::Validation(
                "output.quality must be 1-100".into(),
            ));
        }
        Ok(())
    }

    /// Settings handed to the imaging layer.
    pub fn composite_config(&self) -> CompositeConfig {
        CompositeConfig {
            quality: Quality::new(self.output.quality),
            filter: self.resize.filter,
            filler_color: self.filler.color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// JPEG quality (1 = worst, 100 = best).
    pub quality: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            quality: Quality::default().value(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResizeConfig {
    pub filter: ResizeFilter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FillerConfig {
    /// RGB color. White unless a config file says otherwise.
    pub color: [u8; 3],
}

impl Default for FillerConfig {
    fn default() -> Self {
        Self {
            color: [255, 255, 255],
        }
    }
}

/// Values given on the command line, applied on top of any config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub quality: Option<u32>,
    pub filter: Option<ResizeFilter>,
}

impl Overrides {
    /// Sparse TOML table holding only the flags that were set.
    pub fn to_toml(&self) -> Option<toml::Value> {
        let mut root = toml::Table::new();
        if let Some(quality) = self.quality {
            let mut output = toml::Table::new();
            output.insert("quality".into(), toml::Value::Integer(quality.into()));
            root.insert("output".into(), toml::Value::Table(output));
        }
        if let Some(filter) = self.filter {
            let mut resize = toml::Table::new();
            resize.insert("filter".into(), toml::Value::String(filter.name().into()));
            root.insert("resize".into(), toml::Value::Table(resize));
        }
        (!root.is_empty()).then_some(toml::Value::Table(root))
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(ComposeConfig::default()).expect("default config must serialize")
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

/// Load a config file as a raw TOML value.
pub fn load_raw_config(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

/// Merge overlays onto a base value in order, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlays: impl IntoIterator<Item = Option<toml::Value>>,
) -> Result<ComposeConfig, ConfigError> {
    let merged = overlays.into_iter().flatten().fold(base, merge_toml);
    let config: ComposeConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Resolve the effective config for a run.
///
/// An explicit `config_file` must exist. Without one, `config.toml` in the
/// input directory is used when present.
pub fn load_config(
    input_dir: &Path,
    config_file: Option<&Path>,
    overrides: &Overrides,
) -> Result<ComposeConfig, ConfigError> {
    let file_layer = match config_file {
        Some(path) => Some(load_raw_config(path)?),
        None => {
            let implicit = input_dir.join("config.toml");
            if implicit.is_file() {
                Some(load_raw_config(&implicit)?)
            } else {
                None
            }
        }
    };
    resolve_config(stock_defaults_value(), [file_layer, overrides.to_toml()])
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# image-docking configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# The file is picked up from --config, or from config.toml inside the input
# directory. Command-line flags override anything set here.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Output encoding
# ---------------------------------------------------------------------------
[output]
# JPEG quality for every written composite (1 = worst, 100 = best).
quality = 90

# ---------------------------------------------------------------------------
# Scaling
# ---------------------------------------------------------------------------
[resize]
# Resampling filter used when an image is scaled to its pair's height.
# One of: nearest, triangle (bilinear), catmull-rom, gaussian, lanczos3.
filter = "triangle"

# ---------------------------------------------------------------------------
# Filler
# ---------------------------------------------------------------------------
[filler]
# With an odd number of images the last one is paired with a solid block of
# its own size. RGB color of that block. The standard filler is white; any
# other color changes how unpaired images look compared to a default run.
color = [255, 255, 255]
"##
}
