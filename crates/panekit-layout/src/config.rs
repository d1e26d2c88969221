#![forbid(unsafe_code)]

//! Declarative splitter configuration.
//!
//! A [`SplitterConfig`] captures everything a host declares about one
//! splitter so it can be loaded from TOML or JSON instead of assembled in
//! code.
//!
//! ```toml
//! orientation = "vertical"
//! lazy = true
//!
//! [[panels]]
//! default_size = "30%"
//! min = 120
//! collapsible = true
//!
//! [[panels]]
//! max = "80%"
//! ```
//!
//! ```rust,ignore
//! let config = SplitterConfig::from_toml_file("splitter.toml")?;
//! let engine = PanelLayoutEngine::from_config(&config);
//! ```
//!
//! Every field defaults to the engine's built-in behavior, so an empty
//! document is a valid (if panel-less) configuration.

#[cfg(feature = "config")]
use std::path::Path;

use panekit_core::Orientation;
use serde::{Deserialize, Serialize};

use crate::collapse::DEFAULT_RESTORE_FALLBACK_PX;
use crate::drag::DEFAULT_MAX_DRAG_DURATION;
use crate::panel::Panel;

/// Configuration for one splitter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitterConfig {
    /// Axis along which panels are laid out.
    pub orientation: Orientation,
    /// Preview drags with a ghost bar and commit on release.
    pub lazy: bool,
    /// Size restored when expanding a panel with no remembered size.
    pub restore_fallback_px: f64,
    /// Safety unlock for drags whose release never arrives.
    pub max_drag_duration_ms: u64,
    pub panels: Vec<Panel>,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            lazy: false,
            restore_fallback_px: DEFAULT_RESTORE_FALLBACK_PX,
            max_drag_duration_ms: DEFAULT_MAX_DRAG_DURATION.as_millis() as u64,
            panels: Vec::new(),
        }
    }
}

impl SplitterConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, SplitterConfigError> {
        toml::from_str(s).map_err(SplitterConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, SplitterConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(SplitterConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, SplitterConfigError> {
        serde_json::from_str(s).map_err(SplitterConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SplitterConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(SplitterConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Validate, returning `self` when clean.
    pub fn validated(self) -> Result<Self, SplitterConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(SplitterConfigError::Validation(errors))
        }
    }

    /// Check every parameter.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.restore_fallback_px.is_finite() || self.restore_fallback_px < 0.0 {
            errors.push(format!(
                "restore_fallback_px must be a finite value >= 0, got {}",
                self.restore_fallback_px
            ));
        }
        if self.max_drag_duration_ms == 0 {
            errors.push("max_drag_duration_ms must be > 0".into());
        }

        for (index, panel) in self.panels.iter().enumerate() {
            for (name, value) in [
                ("size", panel.size),
                ("default_size", panel.default_size),
                ("min", panel.min),
                ("max", panel.max),
            ] {
                if let Some(value) = value
                    && value.magnitude < 0.0
                {
                    errors.push(format!("panels[{index}].{name} must be >= 0, got {value}"));
                }
            }
            // Bounds in different units can only be compared once measured.
            if let (Some(min), Some(max)) = (panel.min, panel.max)
                && min.unit == max.unit
                && min.magnitude > max.magnitude
            {
                errors.push(format!("panels[{index}].min ({min}) exceeds max ({max})"));
            }
        }

        let percent_total: f64 = self
            .panels
            .iter()
            .filter_map(Panel::declared_size)
            .filter(|size| size.is_percent())
            .map(|size| size.magnitude)
            .sum();
        if percent_total > 100.0 + 1e-9 {
            errors.push(format!(
                "declared percentage sizes sum to {percent_total}%, more than 100%"
            ));
        }

        errors
    }
}

/// Errors that can occur when loading a splitter configuration.
#[derive(Debug)]
pub enum SplitterConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for SplitterConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for SplitterConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
