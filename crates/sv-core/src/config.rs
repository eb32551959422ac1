//! Viewer configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Result, ViewerError};

/// How the color range of the displayed slice is chosen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ScaleMode {
    /// Min/max of the slice currently shown
    #[default]
    PerSliceAutoscale,

    /// Caller supplied range, identical for every slice
    Fixed { min: f64, max: f64 },

    /// Min/max over the whole stack, resolved once when the viewer is built
    StackRange,
}

impl ScaleMode {
    pub fn fixed(min: f64, max: f64) -> Self {
        ScaleMode::Fixed { min, max }
    }

    fn validate(&self) -> Result<()> {
        if let ScaleMode::Fixed { min, max } = *self {
            if !min.is_finite() || !max.is_finite() {
                return Err(ViewerError::Config(format!(
                    "fixed scale bounds must be finite, got ({}, {})",
                    min, max
                )));
            }
            if min > max {
                return Err(ViewerError::Config(format!(
                    "fixed scale min {} exceeds max {}",
                    min, max
                )));
            }
        }
        Ok(())
    }
}

/// Colormaps available for the image and its color bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ColormapKind {
    #[default]
    Viridis,
    Plasma,
    Inferno,
    Magma,
    Greys,
}

/// Display options of the page slider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderStyle {
    /// Label shown left of the page strip
    pub label: String,

    /// Font size of page numbers and button labels
    #[serde(alias = "fontSize")]
    pub font_size: f32,

    /// Fill of the selected page tile, also the button hover color
    #[serde(alias = "activeColor")]
    pub active_color: [u8; 3],

    /// Fill of every other tile and of the buttons
    #[serde(alias = "inactiveColor")]
    pub inactive_color: [u8; 3],
}

impl Default for SliderStyle {
    fn default() -> Self {
        Self {
            label: "Image".to_string(),
            font_size: 10.0,
            active_color: [0, 0, 255],
            inactive_color: [255, 255, 255],
        }
    }
}

/// Everything the viewer accepts at construction time.
///
/// The page count is not configurable: it always equals the stack length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Page shown first, clamped into range
    pub initial_index: i64,

    pub scale_mode: ScaleMode,

    pub colormap: ColormapKind,

    /// Rescale the color bar along with the image under per-slice
    /// autoscale. Off by default: the color bar keeps the range of the
    /// first slice shown.
    pub rescale_legend: bool,

    pub slider: SliderStyle,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            initial_index: 0,
            scale_mode: ScaleMode::default(),
            colormap: ColormapKind::default(),
            rescale_legend: false,
            slider: SliderStyle::default(),
        }
    }
}

impl ViewerConfig {
    /// Parse and validate a JSON document. Missing keys take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ViewerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        self.scale_mode.validate()?;
        if !(self.slider.font_size.is_finite() && self.slider.font_size > 0.0) {
            return Err(ViewerError::Config(format!(
                "font size must be positive, got {}",
                self.slider.font_size
            )));
        }
        Ok(())
    }
}
