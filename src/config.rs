//! Figure configuration module.
//!
//! Handles the configuration object a host hands to the figure: loading it
//! from TOML or JSON, layering several files on top of each other, and the
//! commented stock config printed by `gen-config`.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! caption = ""                       # Plain text, never interpreted as markup
//! alt = ""                           # Accessibility text for the image
//! block_class = ""                   # Style variant token → `base--token` classes
//! hero = false                       # Background-image rendering strategy
//! embedding = "container-and-wrapper" # none | wrapper-only | container-and-wrapper
//! # loading = true                   # Legacy priority flag: true = eager/high, false = lazy/low
//! # loading = "lazy"                 # Modern form: "lazy" | "eager"
//! # mobile_loading = "eager"         # Same shapes, applied on mobile viewports only
//!
//! [image]
//! desktop_url = ""                   # Required; empty renders nothing at all
//! # mobile_url = "m.jpg"
//! # desktop_width = 1920
//! # desktop_height = 600
//! # mobile_width = 750
//! # mobile_height = 900
//!
//! # [link]
//! # url = "/sale"
//! # open_in_new_tab = false
//! ```
//!
//! ## Layering
//!
//! Several files can be stacked: stock defaults, then each file in order.
//! Tables merge key by key, scalars are replaced. A typical setup is a shared
//! `defaults.toml` (block class, embedding) plus one file per figure.
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config conversion error: {0}")]
    Convert(#[from] toml::ser::Error),
}

/// The configuration of one figure.
///
/// Every field has a default; an all-default config is valid and renders
/// nothing because `image.desktop_url` is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FigureConfig {
    /// Image sources and their intrinsic dimensions.
    pub image: MediaSource,
    /// Optional hyperlink around the media node.
    pub link: Option<LinkTarget>,
    /// Caption text. Rendered verbatim when non-empty, whitespace included.
    pub caption: Option<String>,
    /// Accessibility text for the image element.
    pub alt: Option<String>,
    /// Style variant token.
    pub block_class: Option<String>,
    /// Loading hint, either legacy boolean priority or explicit mode.
    pub loading: Option<LoadingPolicy>,
    /// Loading hint used instead of `loading` when the viewport is mobile.
    pub mobile_loading: Option<LoadingPolicy>,
    /// Render the image as a background of the wrapper (or figure, without shell).
    pub hero: bool,
    /// How much structural shell surrounds the figure.
    pub embedding: LayoutEmbedding,
}

/// Desktop (required) and mobile (optional) image sources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MediaSource {
    pub desktop_url: String,
    pub mobile_url: Option<String>,
    pub desktop_width: Option<u32>,
    pub desktop_height: Option<u32>,
    pub mobile_width: Option<u32>,
    pub mobile_height: Option<u32>,
}

/// Hyperlink target. Only wraps the media when `url` is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinkTarget {
    pub url: String,
    pub open_in_new_tab: bool,
}

/// Loading hint in one of its two accepted shapes.
///
/// Both shapes live in the same field, so a config carries exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LoadingPolicy {
    /// `true` → eager + high fetch priority, `false` → lazy + low.
    Priority(bool),
    /// Explicit loading mode; fetch priority left to the browser.
    Mode(LoadingMode),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadingMode {
    Lazy,
    Eager,
}

impl LoadingMode {
    pub fn as_str(self) -> &'static str {
        match self {
            LoadingMode::Lazy => "lazy",
            LoadingMode::Eager => "eager",
        }
    }
}

/// Structural shell generated around the figure node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutEmbedding {
    /// The figure is the root node.
    None,
    /// wrapper → figure
    WrapperOnly,
    /// container → wrapper → figure
    #[default]
    ContainerAndWrapper,
}

impl FigureConfig {
    /// Parse a single TOML document on top of the defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Parse a JSON object as handed over by a host. `null` means "absent".
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        Ok(serde_json::from_value(strip_json_nulls(value))?)
    }
}

// =============================================================================
// Config loading and merging
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// Base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(FigureConfig::default()).expect("default config must serialize")
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

/// Read one config file as a raw TOML value.
///
/// Files ending in `.json` are parsed as JSON and converted; everything else
/// is parsed as TOML.
pub fn load_raw_config(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        let json: serde_json::Value = serde_json::from_str(&content)?;
        Ok(toml::Value::try_from(strip_json_nulls(json))?)
    } else {
        Ok(toml::from_str(&content)?)
    }
}

/// Merge overlays in order onto a base value, then deserialize.
pub fn resolve_layers(
    base: toml::Value,
    overlays: impl IntoIterator<Item = toml::Value>,
) -> Result<FigureConfig, ConfigError> {
    let merged = overlays.into_iter().fold(base, merge_toml);
    Ok(merged.try_into()?)
}

/// Load and layer config files on top of the stock defaults.
pub fn load_config<P: AsRef<Path>>(paths: &[P]) -> Result<FigureConfig, ConfigError> {
    let overlays = paths
        .iter()
        .map(|p| {
            tracing::debug!(path = %p.as_ref().display(), "Loading config layer");
            load_raw_config(p.as_ref())
        })
        .collect::<Result<Vec<_>, _>>()?;
    resolve_layers(stock_defaults_value(), overlays)
}

/// Drop `null` object members so they fall back to defaults. TOML has no null.
fn strip_json_nulls(value: serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => serde_json::Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_json_nulls(v)))
                .collect(),
        ),
        serde_json::Value::Array(items) => {
            serde_json::Value::Array(items.into_iter().map(strip_json_nulls).collect())
        }
        other => other,
    }
}

/// Returns a fully-commented stock config with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Figure Configuration
# ====================
# All settings are optional. Values shown below are the defaults.
# Several files can be layered: later files override earlier ones key by key.
# Unknown keys will cause an error.

# Caption shown under the image. Plain text, never parsed as markup.
# An empty caption renders no caption node.
caption = ""

# Accessibility text for the image element.
alt = ""

# Style variant token. When set, every structural node gets both its base
# class and `base--<token>`, e.g. "figure figure--home".
block_class = ""

# Render the image as a background-image of the wrapper instead of relying
# on the inline image alone. The inline image stays for semantics.
hero = false

# Structural shell around the figure:
#   "none"                  -> figure is the root
#   "wrapper-only"          -> wrapper > figure
#   "container-and-wrapper" -> container > wrapper > figure
embedding = "container-and-wrapper"

# Loading hint. Either the legacy priority flag
#   loading = true    # eager, fetchpriority=high
#   loading = false   # lazy, fetchpriority=low
# or an explicit mode
#   loading = "lazy"  # or "eager"
# Without it images load lazily with no fetch priority.

# Same shapes as `loading`, applied instead when the viewport is mobile.
# mobile_loading = "eager"

# ---------------------------------------------------------------------------
# Image sources
# ---------------------------------------------------------------------------
[image]
# Required. When empty, nothing at all is rendered.
desktop_url = ""

# Optional mobile source, selected by the browser below 1026px.
# mobile_url = ""

# Intrinsic dimensions, emitted as width/height for layout stability.
# desktop_width = 1920
# desktop_height = 600
# mobile_width = 750
# mobile_height = 900

# ---------------------------------------------------------------------------
# Link
# ---------------------------------------------------------------------------
# Wraps the image in a link when `url` is non-empty.
# [link]
# url = ""
# open_in_new_tab = false
"##
}
