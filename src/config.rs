use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Calibration constants and input limits for the editor tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old config
pub struct EditorConfig {
    /// Gizmo size numerator for orthographic cameras, divided by viewport height
    pub gizmo_ortho_scale: f32,
    /// Gizmo size numerator for perspective cameras, divided by the larger viewport side
    pub gizmo_perspective_scale: f32,
    /// Smallest half-extent the box inputs accept
    pub min_box_extent: f32,
    pub default_box_extent: f32,
    /// Smallest per-axis scale the transform inputs accept
    pub min_scale: f32,
    pub color_temperature_range: (f32, f32),
    pub color_tint_range: (f32, f32),
    /// Smallest per-channel value the color edit inputs accept
    pub min_color_value: f32,
    /// Decimals shown by numeric inputs
    pub input_precision: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            gizmo_ortho_scale: 1125.0,
            gizmo_perspective_scale: 1200.0,
            min_box_extent: 0.01,
            default_box_extent: 1.0,
            min_scale: 0.01,
            color_temperature_range: (-0.5, 0.5),
            color_tint_range: (-0.5, 0.5),
            min_color_value: 0.01,
            input_precision: 2,
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
